//! MemeMe Meme Model
//!
//! Defines the core data contracts for MemeMe:
//! - **Bitmap:** Immutable decoded RGBA raster shared by value
//! - **Meme:** A captioned image and the flattened bitmap derived from it
//! - **Style:** Caption rendering parameters shared by both overlay lines
//! - **Canvas:** Fixed output surface and aspect-fit placement
//!
//! Nothing in this crate mutates after construction; readers always get
//! clones, never handles into shared mutable state.

pub mod bitmap;
pub mod canvas;
pub mod meme;
pub mod style;

pub use bitmap::*;
pub use canvas::*;
pub use meme::*;
pub use style::*;
