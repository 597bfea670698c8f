//! Replay a scripted series of capture flows against one store.
//!
//! The script is a JSON array; each entry drives one flow:
//!
//! ```json
//! [
//!   { "image": "cat.jpg", "top": "HELLO", "bottom": "WORLD", "share": "complete" },
//!   { "image": "dog.png", "top": "NOPE", "share": "fail" }
//! ]
//! ```
//!
//! Relative image paths are resolved against the script's directory. An
//! entry without `image` behaves like a dismissed picker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mememe_capture_flow::{CaptureFlow, ImageSourceKind, ShareResult, TextField};
use mememe_common::config::AppConfig;
use mememe_model::{CanvasSize, RenderStyle};
use mememe_render_engine::Compositor;
use mememe_store::{MemeGridView, MemeListView, MemeStore};
use serde::Deserialize;

use crate::collaborators::{DirectoryShareSink, FileImageSource, ScriptedShareSink, ShareAction};

#[derive(Debug, Deserialize)]
struct ScriptEntry {
    #[serde(default)]
    image: Option<PathBuf>,
    #[serde(default)]
    top: Option<String>,
    #[serde(default)]
    bottom: Option<String>,
    #[serde(default)]
    share: ShareAction,
}

pub async fn run(
    config: &AppConfig,
    script: PathBuf,
    output: Option<PathBuf>,
    grid_width: f64,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&script)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", script.display()))?;
    let entries: Vec<ScriptEntry> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid session script: {e}"))?;
    let base = script.parent().unwrap_or_else(|| Path::new("."));

    let store = MemeStore::shared();
    let compositor = Arc::new(Compositor::new(CanvasSize::from_defaults(&config.editor))?);
    let style = RenderStyle::from_defaults(&config.editor);
    let export = Arc::new(DirectoryShareSink::new(
        output.unwrap_or_else(|| config.export_dir.clone()),
    ));

    println!("Session: {} entries", entries.len());
    println!("  Export dir: {}", export.dir().display());
    println!();

    for (n, entry) in entries.into_iter().enumerate() {
        let image = entry.image.map(|p| base.join(p));
        let label = image
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(no image)".to_string());

        let mut flow = CaptureFlow::new(
            Arc::clone(&store),
            Arc::clone(&compositor),
            style,
            Box::new(FileImageSource::new(image)),
            Box::new(ScriptedShareSink::new(entry.share, Arc::clone(&export))),
        );

        match run_entry(&mut flow, entry.top, entry.bottom).await {
            Ok(ShareResult::Saved { index }) => {
                println!("[{n}] {label}: saved as #{index}");
            }
            Ok(ShareResult::Retained { reason }) => {
                println!("[{n}] {label}: not saved ({reason})");
            }
            Err(e) => {
                println!("[{n}] {label}: {e}");
            }
        }
    }

    println!();
    let list = MemeListView::new(store.view_handle());
    let rows = list.rows()?;
    println!("Sent memes ({}):", rows.len());
    for row in &rows {
        println!(
            "  {:>3}  {}  ({}x{})",
            row.index,
            row.label,
            row.thumbnail.width(),
            row.thumbnail.height()
        );
    }

    let grid = MemeGridView::new(store.view_handle(), grid_width);
    let layout = grid.layout();
    println!();
    println!(
        "Grid: {} columns, {:.1}pt cells, {:.1}pt spacing",
        layout.columns, layout.item_dimension, layout.interitem_spacing
    );
    for cell in grid.cells()? {
        let (x, y) = layout.origin(cell.index);
        println!(
            "  #{:<3} row {} col {} at ({x:.1}, {y:.1})",
            cell.index, cell.row, cell.column
        );
    }

    Ok(())
}

async fn run_entry(
    flow: &mut CaptureFlow,
    top: Option<String>,
    bottom: Option<String>,
) -> mememe_common::error::MemeResult<ShareResult> {
    flow.acquire_image(ImageSourceKind::Library).await?;
    for (field, text) in [(TextField::Top, top), (TextField::Bottom, bottom)] {
        if let Some(text) = text {
            flow.begin_editing(field)?;
            flow.set_text(field, text)?;
        }
    }
    flow.share().await
}
