//! Read-side views over the store.
//!
//! Views keep only a [`StoreHandle`] and re-read `count()`/`get()` every
//! time they are asked for content, since the store can grow between
//! appearances.

use mememe_common::error::MemeResult;
use mememe_model::bitmap::Bitmap;
use mememe_model::meme::Meme;

use crate::store::StoreHandle;

/// Columns in the sent-memes grid.
pub const GRID_COLUMNS: u32 = 3;

/// Gap between grid cells and between grid lines, in points.
pub const GRID_SPACING: f64 = 3.0;

/// One line of the sent-memes list.
#[derive(Debug, Clone, PartialEq)]
pub struct MemeRow {
    pub index: usize,
    pub label: String,
    pub thumbnail: Bitmap,
}

/// Row label: both captions joined by an ellipsis.
pub fn row_label(meme: &Meme) -> String {
    format!("{}...{}", meme.top_text(), meme.bottom_text())
}

/// Table of saved memes, one row each, oldest first.
#[derive(Debug, Clone)]
pub struct MemeListView {
    store: StoreHandle,
}

impl MemeListView {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub fn row_count(&self) -> MemeResult<usize> {
        self.store.count()
    }

    pub fn row(&self, index: usize) -> MemeResult<MemeRow> {
        let meme = self.store.get(index)?;
        Ok(MemeRow {
            index,
            label: row_label(&meme),
            thumbnail: meme.memed_image().clone(),
        })
    }

    /// All rows as of this call.
    pub fn rows(&self) -> MemeResult<Vec<MemeRow>> {
        let count = self.row_count()?;
        (0..count).map(|index| self.row(index)).collect()
    }

    /// The detail screen for a tapped row.
    pub fn select(&self, index: usize) -> MemeResult<MemeDetailView> {
        MemeDetailView::open(&self.store, index)
    }
}

/// Cell geometry for the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: u32,
    /// Side of each square cell.
    pub item_dimension: f64,
    pub interitem_spacing: f64,
    pub line_spacing: f64,
}

impl GridLayout {
    /// Three square columns separated by [`GRID_SPACING`] across `surface_width`.
    pub fn for_width(surface_width: f64) -> Self {
        let gaps = GRID_SPACING * (GRID_COLUMNS - 1) as f64;
        Self {
            columns: GRID_COLUMNS,
            item_dimension: ((surface_width - gaps) / GRID_COLUMNS as f64).max(0.0),
            interitem_spacing: GRID_SPACING,
            line_spacing: GRID_SPACING,
        }
    }

    /// `(row, column)` of the cell at `index`.
    pub fn position(&self, index: usize) -> (usize, usize) {
        let columns = self.columns as usize;
        (index / columns, index % columns)
    }

    /// Top-left corner of the cell at `index`, in points.
    pub fn origin(&self, index: usize) -> (f64, f64) {
        let (row, column) = self.position(index);
        (
            column as f64 * (self.item_dimension + self.interitem_spacing),
            row as f64 * (self.item_dimension + self.line_spacing),
        )
    }
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub image: Bitmap,
}

/// Collection of saved memes laid out three per line.
#[derive(Debug, Clone)]
pub struct MemeGridView {
    store: StoreHandle,
    layout: GridLayout,
}

impl MemeGridView {
    pub fn new(store: StoreHandle, surface_width: f64) -> Self {
        Self {
            store,
            layout: GridLayout::for_width(surface_width),
        }
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn item_count(&self) -> MemeResult<usize> {
        self.store.count()
    }

    /// All cells as of this call.
    pub fn cells(&self) -> MemeResult<Vec<GridCell>> {
        let count = self.item_count()?;
        (0..count)
            .map(|index| {
                let meme = self.store.get(index)?;
                let (row, column) = self.layout.position(index);
                Ok(GridCell {
                    index,
                    row,
                    column,
                    image: meme.memed_image().clone(),
                })
            })
            .collect()
    }

    /// The detail screen for a tapped cell.
    pub fn select(&self, index: usize) -> MemeResult<MemeDetailView> {
        MemeDetailView::open(&self.store, index)
    }
}

/// A single saved meme shown full size.
#[derive(Debug, Clone, PartialEq)]
pub struct MemeDetailView {
    pub index: usize,
    pub meme: Meme,
}

impl MemeDetailView {
    /// Resolve `index` against the store as it is now.
    pub fn open(store: &StoreHandle, index: usize) -> MemeResult<Self> {
        let meme = store.get(index)?;
        tracing::debug!(index, "Opened meme detail");
        Ok(Self { index, meme })
    }

    pub fn image(&self) -> &Bitmap {
        self.meme.memed_image()
    }
}
