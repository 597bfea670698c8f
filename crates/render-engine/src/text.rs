//! Caption rasterization.
//!
//! A caption line becomes a coverage mask; its outline is the same mask
//! grown by the stroke radius. Both are plain `f32` buffers so blending
//! stays anti-aliased.

use mememe_common::error::{MemeError, MemeResult};
use mememe_model::style::RenderStyle;
use rusttype::{point, Font, Scale};

/// Bold condensed display face bundled with the engine.
const CAPTION_FONT: &[u8] = include_bytes!("../assets/DejaVuSansCondensed-Bold.ttf");

/// The typeface captions are set in.
pub struct CaptionFont {
    font: Font<'static>,
}

/// Coverage values for one rasterized line, `[0.0, 1.0]` per pixel.
#[derive(Debug, Clone)]
pub struct LineMask {
    pub width: u32,
    pub height: u32,
    /// Empty border around the glyph box, in pixels.
    pub padding: u32,
    /// Glyph box width (sum of advances), in pixels.
    pub text_width: f32,
    /// Glyph box height (ascent to descent), in pixels.
    pub text_height: f32,
    /// Pixels of the glyph box cut off on the left when the line is wider
    /// than the visible width. Zero for lines that fit.
    pub clip_left: u32,
    pub fill: Vec<f32>,
    pub stroke: Vec<f32>,
}

impl CaptionFont {
    /// Load the bundled caption font.
    pub fn embedded() -> MemeResult<Self> {
        Font::try_from_bytes(CAPTION_FONT)
            .map(|font| Self { font })
            .ok_or_else(|| MemeError::render("Bundled caption font could not be parsed"))
    }

    /// Load a TrueType/OpenType font from owned bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> MemeResult<Self> {
        Font::try_from_vec(bytes)
            .map(|font| Self { font })
            .ok_or_else(|| MemeError::render("Caption font could not be parsed"))
    }

    /// Horizontal advance of `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scale = Scale::uniform(size);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Largest size, up to `style.font_size`, at which `text` fits `budget`
    /// pixels. Never goes below `style.min_font_size`.
    pub fn fit_size(&self, text: &str, style: &RenderStyle, budget: f32) -> f32 {
        let nominal = style.font_size;
        let measured = self.measure(&printable(text), nominal);
        if measured <= budget || measured <= 0.0 {
            return nominal;
        }
        (nominal * budget / measured).max(style.min_font_size)
    }

    /// Rasterize one line at `size` pixels with an outline of
    /// `stroke_radius` pixels. Returns `None` when there is nothing to draw.
    ///
    /// A line wider than `visible_width` keeps only its centered
    /// `visible_width` span, so the mask never outgrows the canvas.
    pub fn rasterize(
        &self,
        text: &str,
        size: f32,
        stroke_radius: f32,
        visible_width: u32,
    ) -> Option<LineMask> {
        let text = printable(text);
        if text.trim().is_empty() {
            return None;
        }

        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let text_width = self.measure(&text, size);
        let text_height = v_metrics.ascent - v_metrics.descent;

        let visible = visible_width.max(1) as f32;
        let clip_left = ((text_width - visible) / 2.0).floor().max(0.0) as u32;
        let span = text_width.ceil().min(visible + 1.0) as u32;

        let padding = stroke_radius.ceil() as u32 + 2;
        let width = span + padding * 2;
        let height = text_height.ceil() as u32 + padding * 2;

        let mut fill = vec![0.0f32; width as usize * height as usize];
        let origin = point(
            padding as f32 - clip_left as f32,
            padding as f32 + v_metrics.ascent,
        );
        for glyph in self.font.layout(&text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            if bb.min.x >= width as i32 {
                break;
            }
            if bb.max.x < 0 {
                continue;
            }
            glyph.draw(|gx, gy, coverage| {
                let x = bb.min.x + gx as i32;
                let y = bb.min.y + gy as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    return;
                }
                let idx = y as usize * width as usize + x as usize;
                fill[idx] = fill[idx].max(coverage);
            });
        }

        let stroke = dilate(&fill, width, height, stroke_radius);

        Some(LineMask {
            width,
            height,
            padding,
            text_width,
            text_height,
            clip_left,
            fill,
            stroke,
        })
    }
}

/// Captions are single-line; control characters (newlines, tabs) are dropped.
fn printable(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Grayscale dilation with a disk of `radius`, soft at the rim.
fn dilate(mask: &[f32], width: u32, height: u32, radius: f32) -> Vec<f32> {
    if radius <= 0.0 {
        return mask.to_vec();
    }

    let reach = radius.ceil() as i32;
    let mut offsets = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let distance = ((dx * dx + dy * dy) as f32).sqrt();
            let weight = (radius + 0.5 - distance).clamp(0.0, 1.0);
            if weight > 0.0 {
                offsets.push((dx, dy, weight));
            }
        }
    }

    let (w, h) = (width as i32, height as i32);
    let mut out = vec![0.0f32; mask.len()];
    for y in 0..h {
        for x in 0..w {
            let mut best = 0.0f32;
            for &(dx, dy, weight) in &offsets {
                let sx = x + dx;
                let sy = y + dy;
                if sx < 0 || sy < 0 || sx >= w || sy >= h {
                    continue;
                }
                let value = mask[(sy * w + sx) as usize] * weight;
                if value > best {
                    best = value;
                }
            }
            out[(y * w + x) as usize] = best;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> CaptionFont {
        CaptionFont::embedded().unwrap()
    }

    #[test]
    fn test_embedded_font_loads() {
        assert!(CaptionFont::embedded().is_ok());
    }

    #[test]
    fn test_invalid_font_bytes_rejected() {
        let err = CaptionFont::from_bytes(vec![0u8; 32]).err().unwrap();
        assert!(matches!(err, MemeError::Render { .. }));
    }

    #[test]
    fn test_measure_grows_with_text_and_size() {
        let font = font();
        assert_eq!(font.measure("", 80.0), 0.0);
        let short = font.measure("TOP", 80.0);
        let long = font.measure("TOPTOP", 80.0);
        assert!(long > short);
        assert!(font.measure("TOP", 40.0) < short);
    }

    #[test]
    fn test_fit_size_shrinks_wide_lines() {
        let font = font();
        let style = RenderStyle::default();
        assert_eq!(font.fit_size("HI", &style, 600.0), style.font_size);

        let wide = "THIS CAPTION IS FAR TOO LONG FOR ONE LINE";
        let fitted = font.fit_size(wide, &style, 600.0);
        assert!(fitted < style.font_size);
        assert!(fitted >= style.min_font_size);
    }

    #[test]
    fn test_fit_size_respects_minimum() {
        let font = font();
        let style = RenderStyle::default();
        let fitted = font.fit_size(&"W".repeat(200), &style, 100.0);
        assert_eq!(fitted, style.min_font_size);
    }

    #[test]
    fn test_fit_size_ignores_control_characters() {
        let font = font();
        let style = RenderStyle::default();
        let noisy = format!("HI{}", "\n".repeat(500));
        assert_eq!(
            font.fit_size(&noisy, &style, 600.0),
            font.fit_size("HI", &style, 600.0)
        );
    }

    #[test]
    fn test_rasterize_empty_or_blank_is_none() {
        let font = font();
        assert!(font.rasterize("", 80.0, 2.8, 750).is_none());
        assert!(font.rasterize("   ", 80.0, 2.8, 750).is_none());
        assert!(font.rasterize("\n", 80.0, 2.8, 750).is_none());
    }

    #[test]
    fn test_stroke_covers_fill() {
        let mask = font().rasterize("MEME", 80.0, 2.8, 750).unwrap();
        assert_eq!(mask.fill.len(), (mask.width * mask.height) as usize);
        let fill_area: f32 = mask.fill.iter().sum();
        let stroke_area: f32 = mask.stroke.iter().sum();
        assert!(fill_area > 0.0);
        assert!(stroke_area > fill_area);
        for (f, s) in mask.fill.iter().zip(&mask.stroke) {
            assert!(s >= f);
        }
    }

    #[test]
    fn test_zero_radius_stroke_equals_fill() {
        let mask = font().rasterize("A", 40.0, 0.0, 750).unwrap();
        assert_eq!(mask.fill, mask.stroke);
    }

    #[test]
    fn test_line_that_fits_is_not_clipped() {
        let font = font();
        let narrow = font.rasterize("MEME", 80.0, 2.8, 750).unwrap();
        let wide = font.rasterize("MEME", 80.0, 2.8, 10_000).unwrap();
        assert_eq!(narrow.clip_left, 0);
        assert_eq!(narrow.width, wide.width);
        assert_eq!(narrow.fill, wide.fill);
    }

    #[test]
    fn test_overlong_line_mask_is_bounded_by_visible_width() {
        let font = font();
        let text = "W".repeat(20_000);
        let mask = font.rasterize(&text, 24.0, 0.84, 750).unwrap();

        assert!(mask.text_width > 100_000.0);
        assert!(mask.clip_left > 0);
        assert!(mask.width <= 750 + 1 + 2 * mask.padding);
        assert_eq!(mask.fill.len(), (mask.width * mask.height) as usize);
        assert_eq!(mask.stroke.len(), mask.fill.len());
        assert!(mask.fill.iter().any(|&c| c > 0.0));
    }

    #[test]
    fn test_clipped_mask_matches_visible_part_of_full_line() {
        let font = font();
        let text = "ABCDEFGHIJ";
        let full = font.rasterize(text, 80.0, 0.0, 10_000).unwrap();
        let clipped = font.rasterize(text, 80.0, 0.0, 200).unwrap();
        assert!(clipped.clip_left > 0);
        assert!(clipped.width < full.width);
        assert_eq!(clipped.height, full.height);

        for y in 0..clipped.height as usize {
            for x in 0..clipped.width as usize {
                let a = clipped.fill[y * clipped.width as usize + x];
                let b = full.fill[y * full.width as usize + x + clipped.clip_left as usize];
                assert!((a - b).abs() < 0.02, "pixel ({x}, {y}): {a} vs {b}");
            }
        }
    }
}
