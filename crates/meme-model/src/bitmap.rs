//! Immutable raster images.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use mememe_common::error::{MemeError, MemeResult};

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// A decoded RGBA8 image that can no longer change.
///
/// Clones share the same pixel buffer. Since nothing can write through a
/// `Bitmap`, a clone is observably identical to a deep copy.
#[derive(Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    /// Freeze an owned RGBA buffer.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// Build from raw RGBA bytes, row-major, four bytes per pixel.
    pub fn from_raw(width: u32, height: u32, bytes: Vec<u8>) -> MemeResult<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = bytes.len();
        RgbaImage::from_raw(width, height, bytes)
            .map(Self::from_rgba)
            .ok_or_else(|| {
                MemeError::image(format!(
                    "Expected {expected} bytes for {width}x{height} RGBA, got {actual}"
                ))
            })
    }

    /// Decode an encoded image (PNG, JPEG) held in memory.
    pub fn decode(bytes: &[u8]) -> MemeResult<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| MemeError::image(format!("Failed to decode image: {e}")))?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    /// Decode an image file from disk.
    pub fn open(path: &Path) -> MemeResult<Self> {
        let decoded = image::open(path).map_err(|e| {
            MemeError::image(format!("Failed to open {}: {e}", path.display()))
        })?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Whether the image has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Read-only view of the pixel buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// 64-bit FNV-1a over the dimensions and raw pixel bytes.
    ///
    /// Equal hashes are used as evidence of byte-identical output.
    pub fn content_hash(&self) -> u64 {
        let (width, height) = self.dimensions();
        let mut hash = FNV_OFFSET_BASIS;
        let header = width
            .to_le_bytes()
            .into_iter()
            .chain(height.to_le_bytes());
        for byte in header.chain(self.pixels.as_raw().iter().copied()) {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    /// Encode as PNG.
    pub fn to_png_bytes(&self) -> MemeResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| MemeError::image(format!("Failed to encode PNG: {e}")))?;
        Ok(buffer.into_inner())
    }

    /// Encode as PNG and write to `path`.
    pub fn save_png(&self, path: &Path) -> MemeResult<()> {
        let bytes = self.to_png_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
            || (self.dimensions() == other.dimensions()
                && self.pixels.as_raw() == other.pixels.as_raw())
    }
}

impl Eq for Bitmap {}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("hash", &format_args!("{:016x}", self.content_hash()))
            .finish()
    }
}
