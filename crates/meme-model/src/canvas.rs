//! Output canvas and image placement.
//!
//! The canvas size is a property of the host surface and does not depend on
//! the source image. Sources are aspect-fitted and centered inside it.

use mememe_common::config::EditorDefaults;
use serde::{Deserialize, Serialize};

use crate::style::Color;

/// The fixed raster every meme is flattened into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
    /// Fill for the area an aspect-fitted image leaves uncovered.
    pub letterbox: Color,
}

/// Where a scaled source image lands on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Create a canvas with a black letterbox. Zero dimensions are bumped to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            letterbox: Color::BLACK,
        }
    }

    pub fn with_letterbox(mut self, letterbox: Color) -> Self {
        self.letterbox = letterbox;
        self
    }

    pub fn from_defaults(defaults: &EditorDefaults) -> Self {
        Self::new(defaults.canvas_width, defaults.canvas_height)
            .with_letterbox(Color::rgba(defaults.letterbox_rgba))
    }

    /// Scale `(src_width, src_height)` to fit inside the canvas, preserving
    /// aspect ratio, centered. Returns `None` for a zero-area source.
    pub fn aspect_fit(&self, src_width: u32, src_height: u32) -> Option<Placement> {
        if src_width == 0 || src_height == 0 {
            return None;
        }

        let scale = (self.width as f64 / src_width as f64)
            .min(self.height as f64 / src_height as f64);
        let width = ((src_width as f64 * scale).round() as u32).clamp(1, self.width);
        let height = ((src_height as f64 * scale).round() as u32).clamp(1, self.height);

        Some(Placement {
            x: (self.width - width) / 2,
            y: (self.height - height) / 2,
            width,
            height,
        })
    }

    /// Horizontal room a caption may occupy given a side margin.
    pub fn text_width_budget(&self, margin: u32) -> f32 {
        self.width.saturating_sub(margin.saturating_mul(2)).max(1) as f32
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::from_defaults(&EditorDefaults::default())
    }
}

impl Placement {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}
