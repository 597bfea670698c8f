//! The meme record.

use crate::bitmap::Bitmap;

/// A captioned image, frozen at creation.
///
/// `memed_image` was rendered from the other three fields and a
/// [`RenderStyle`](crate::style::RenderStyle) when the meme was built.
/// There are no setters; consumers receive clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meme {
    top_text: String,
    bottom_text: String,
    original_image: Bitmap,
    memed_image: Bitmap,
}

impl Meme {
    pub fn new(
        top_text: impl Into<String>,
        bottom_text: impl Into<String>,
        original_image: Bitmap,
        memed_image: Bitmap,
    ) -> Self {
        Self {
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
            original_image,
            memed_image,
        }
    }

    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    /// The picked photo, before captioning.
    pub fn original_image(&self) -> &Bitmap {
        &self.original_image
    }

    /// The flattened, captioned raster.
    pub fn memed_image(&self) -> &Bitmap {
        &self.memed_image
    }
}
