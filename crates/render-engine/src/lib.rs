//! MemeMe Render Engine
//!
//! Flattens a source photo and two caption lines into a single raster
//! of fixed size.
//!
//! # Pipeline Architecture
//!
//! ```text
//! source bitmap ──┐
//!                 ├── Aspect-fit + letterbox (canvas size)
//! canvas ─────────┘         │
//!                           ├── Top caption (stroke, then fill)
//! top text ─────────────────┘         │
//!                                     ├── Bottom caption (stroke, then fill)
//! bottom text ────────────────────────┘         │
//!                                               ▼
//!                                        flattened Bitmap
//! ```
//!
//! The result carries pixels only. Calling [`Compositor::compose`] twice
//! with the same inputs yields byte-identical bitmaps.

pub mod compositor;
pub mod text;

pub use compositor::*;
