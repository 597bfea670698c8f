//! Caption rendering style.

use mememe_common::config::EditorDefaults;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba([255, 255, 255, 255]);
    pub const BLACK: Color = Color::rgba([0, 0, 0, 255]);

    pub const fn rgba(c: [u8; 4]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        }
    }

    /// The color as an opaque `image` pixel.
    pub fn opaque_pixel(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }

    /// Alpha as a `[0.0, 1.0]` weight.
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

/// Horizontal placement of a caption line.
///
/// Captions are always centered; the enum exists so the style records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Center,
}

/// How both caption lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Nominal font size in pixels.
    pub font_size: f32,

    /// Lower bound when a line is shrunk to fit the canvas width.
    pub min_font_size: f32,

    /// Glyph fill.
    pub fill: Color,

    /// Glyph outline.
    pub stroke: Color,

    /// Outline width as a percentage of the rendered font size.
    pub stroke_width_percent: f32,

    pub alignment: TextAlignment,

    /// Gap between a canvas edge and the nearest caption, in pixels.
    pub margin: u32,
}

impl RenderStyle {
    pub fn from_defaults(defaults: &EditorDefaults) -> Self {
        Self {
            font_size: defaults.font_size,
            min_font_size: defaults.min_font_size,
            fill: Color::rgba(defaults.fill_rgba),
            stroke: Color::rgba(defaults.stroke_rgba),
            stroke_width_percent: defaults.stroke_width_percent,
            alignment: TextAlignment::Center,
            margin: defaults.margin,
        }
    }

    /// Outline radius in pixels for text rendered at `font_size`.
    pub fn stroke_radius(&self, font_size: f32) -> f32 {
        (font_size * self.stroke_width_percent / 100.0).max(0.0)
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_defaults(&EditorDefaults::default())
    }
}
