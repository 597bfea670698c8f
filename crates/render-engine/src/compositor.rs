//! Meme compositor: combines the source photo and both captions.
//!
//! Layers are drawn bottom-up into one RGBA buffer and never kept apart:
//! letterbox, aspect-fitted photo, top caption, bottom caption.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use imageproc::pixelops::interpolate;
use mememe_common::error::{MemeError, MemeResult};
use mememe_model::bitmap::Bitmap;
use mememe_model::canvas::CanvasSize;
use mememe_model::style::{Color, RenderStyle};

use crate::text::{CaptionFont, LineMask};

/// Resampling filter used to fit the photo. Fixed so output is reproducible.
const FIT_FILTER: FilterType = FilterType::Triangle;

/// Which edge a caption hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionEdge {
    Top,
    Bottom,
}

/// Renders memes onto a fixed canvas.
///
/// The compositor holds no per-call state; it can be shared behind an `Arc`
/// and called from any number of flows.
pub struct Compositor {
    canvas: CanvasSize,
    font: CaptionFont,
}

impl Compositor {
    /// Build a compositor for `canvas` using the bundled caption font.
    pub fn new(canvas: CanvasSize) -> MemeResult<Self> {
        Ok(Self::with_font(canvas, CaptionFont::embedded()?))
    }

    pub fn with_font(canvas: CanvasSize, font: CaptionFont) -> Self {
        Self { canvas, font }
    }

    /// The output size every composed bitmap has.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Flatten `image` with `top_text` and `bottom_text` into one bitmap.
    ///
    /// Fails with [`MemeError::ImageMissing`] when no image is given. Empty
    /// captions are valid and leave their line blank.
    pub fn compose(
        &self,
        image: Option<&Bitmap>,
        top_text: &str,
        bottom_text: &str,
        style: &RenderStyle,
    ) -> MemeResult<Bitmap> {
        let image = image.ok_or(MemeError::ImageMissing)?;

        let mut raster = RgbaImage::from_pixel(
            self.canvas.width,
            self.canvas.height,
            self.canvas.letterbox.opaque_pixel(),
        );

        match self.canvas.aspect_fit(image.width(), image.height()) {
            Some(placement) => {
                let scaled = imageops::resize(
                    image.as_rgba(),
                    placement.width,
                    placement.height,
                    FIT_FILTER,
                );
                imageops::overlay(
                    &mut raster,
                    &scaled,
                    placement.x as i64,
                    placement.y as i64,
                );
            }
            None => {
                tracing::warn!("Source image has no pixels; composing captions only");
            }
        }

        self.draw_caption(&mut raster, top_text, CaptionEdge::Top, style);
        self.draw_caption(&mut raster, bottom_text, CaptionEdge::Bottom, style);

        let composed = Bitmap::from_rgba(raster);
        tracing::debug!(
            width = composed.width(),
            height = composed.height(),
            source_width = image.width(),
            source_height = image.height(),
            hash = composed.content_hash(),
            "Composed meme"
        );
        Ok(composed)
    }

    fn draw_caption(
        &self,
        raster: &mut RgbaImage,
        text: &str,
        edge: CaptionEdge,
        style: &RenderStyle,
    ) {
        let budget = self.canvas.text_width_budget(style.margin);
        let size = self.font.fit_size(text, style, budget);
        let stroke_radius = style.stroke_radius(size);
        let Some(mask) = self
            .font
            .rasterize(text, size, stroke_radius, self.canvas.width)
        else {
            return;
        };

        let (x, y) = caption_origin(&self.canvas, &mask, edge, style.margin);
        blend_mask(raster, &mask.stroke, &mask, x, y, style.stroke);
        blend_mask(raster, &mask.fill, &mask, x, y, style.fill);
    }
}

/// Canvas position of a mask's top-left corner.
///
/// The glyph box is centered horizontally; a clipped mask starts
/// `clip_left` pixels into it. A top caption's ascent line sits
/// `margin` below the top edge; a bottom caption's descent line sits
/// `margin` above the bottom edge.
fn caption_origin(
    canvas: &CanvasSize,
    mask: &LineMask,
    edge: CaptionEdge,
    margin: u32,
) -> (i64, i64) {
    let pad = mask.padding as i64;
    let x = ((canvas.width as f32 - mask.text_width) / 2.0).round() as i64 - pad
        + mask.clip_left as i64;
    let y = match edge {
        CaptionEdge::Top => margin as i64 - pad,
        CaptionEdge::Bottom => {
            canvas.height as i64 - margin as i64 - mask.text_height.ceil() as i64 - pad
        }
    };
    (x, y)
}

/// Blend `color` into `raster` weighted by `coverage`, clipped to the canvas.
fn blend_mask(
    raster: &mut RgbaImage,
    coverage: &[f32],
    mask: &LineMask,
    origin_x: i64,
    origin_y: i64,
    color: Color,
) {
    let opacity = color.opacity();
    if opacity <= 0.0 {
        return;
    }
    let ink = color.opaque_pixel();
    let (width, height) = (raster.width() as i64, raster.height() as i64);

    for my in 0..mask.height as i64 {
        let cy = origin_y + my;
        if cy < 0 || cy >= height {
            continue;
        }
        for mx in 0..mask.width as i64 {
            let cx = origin_x + mx;
            if cx < 0 || cx >= width {
                continue;
            }
            let weight = coverage[(my * mask.width as i64 + mx) as usize] * opacity;
            if weight <= 0.0 {
                continue;
            }
            let pixel = raster.get_pixel_mut(cx as u32, cy as u32);
            *pixel = interpolate(ink, *pixel, weight.min(1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn photo(width: u32, height: u32) -> Bitmap {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        Bitmap::from_rgba(image)
    }

    fn compositor() -> Compositor {
        Compositor::new(CanvasSize::new(300, 400)).unwrap()
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let err = compositor()
            .compose(None, "TOP", "BOTTOM", &RenderStyle::default())
            .unwrap_err();
        assert!(matches!(err, MemeError::ImageMissing));
    }

    #[test]
    fn test_output_has_canvas_dimensions() {
        let compositor = compositor();
        let style = RenderStyle::default();
        for (w, h) in [(1920, 1080), (1080, 1920), (10, 10), (1, 500)] {
            let out = compositor
                .compose(Some(&photo(w, h)), "TOP", "BOTTOM", &style)
                .unwrap();
            assert_eq!(out.dimensions(), (300, 400));
        }
    }

    #[test]
    fn test_empty_captions_leave_only_the_photo() {
        let compositor = compositor();
        let style = RenderStyle::default();
        let source = photo(300, 400);
        let out = compositor.compose(Some(&source), "", "", &style).unwrap();
        // Same size, so the fit is an identity resize.
        assert_eq!(out, source);
    }

    #[test]
    fn test_letterbox_fills_uncovered_area() {
        let canvas = CanvasSize::new(300, 400).with_letterbox(Color::rgba([0, 255, 0, 255]));
        let compositor = Compositor::new(canvas).unwrap();
        let out = compositor
            .compose(Some(&photo(300, 100)), "", "", &RenderStyle::default())
            .unwrap();
        assert_eq!(out.as_rgba().get_pixel(150, 5), &Rgba([0, 255, 0, 255]));
        assert_eq!(out.as_rgba().get_pixel(150, 395), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_captions_change_only_their_band() {
        let compositor = compositor();
        let style = RenderStyle::default();
        let source = photo(300, 400);
        let plain = compositor.compose(Some(&source), "", "", &style).unwrap();
        let top_only = compositor.compose(Some(&source), "HI", "", &style).unwrap();

        assert_ne!(plain, top_only);
        // The lower half is untouched by a top caption.
        for y in 200..400 {
            for x in 0..300 {
                assert_eq!(
                    plain.as_rgba().get_pixel(x, y),
                    top_only.as_rgba().get_pixel(x, y)
                );
            }
        }
    }

    #[test]
    fn test_caption_pixels_use_style_colors() {
        let compositor = compositor();
        let style = RenderStyle::default();
        let out = compositor
            .compose(Some(&photo(300, 400)), "I", "", &style)
            .unwrap();
        let raster = out.as_rgba();
        let white = raster.pixels().filter(|p| **p == Rgba([255, 255, 255, 255])).count();
        let black = raster.pixels().filter(|p| **p == Rgba([0, 0, 0, 255])).count();
        assert!(white > 0, "caption fill should be visible");
        assert!(black > 0, "caption stroke should be visible");
    }

    #[test]
    fn test_output_is_opaque() {
        let compositor = compositor();
        let translucent = Bitmap::from_rgba(RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 0])));
        let out = compositor
            .compose(Some(&translucent), "TOP", "BOTTOM", &RenderStyle::default())
            .unwrap();
        assert!(out.as_rgba().pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_zero_area_image_still_renders_canvas() {
        let compositor = compositor();
        let empty = Bitmap::from_rgba(RgbaImage::new(0, 0));
        let out = compositor
            .compose(Some(&empty), "TOP", "", &RenderStyle::default())
            .unwrap();
        assert_eq!(out.dimensions(), (300, 400));
    }

    #[test]
    fn test_bottom_caption_hangs_above_margin() {
        let canvas = CanvasSize::new(300, 400);
        let mask = CaptionFont::embedded()
            .unwrap()
            .rasterize("BOTTOM", 40.0, 1.4, 300)
            .unwrap();
        let (_, y) = caption_origin(&canvas, &mask, CaptionEdge::Bottom, 20);
        let glyph_bottom = y + mask.padding as i64 + mask.text_height.ceil() as i64;
        assert_eq!(glyph_bottom, 380);

        let (_, top_y) = caption_origin(&canvas, &mask, CaptionEdge::Top, 20);
        assert_eq!(top_y + mask.padding as i64, 20);
    }

    #[test]
    fn test_huge_caption_is_drawn_centered_and_clipped() {
        let compositor = compositor();
        let style = RenderStyle::default();
        let source = photo(300, 400);
        let caption = "W".repeat(20_000);

        let plain = compositor.compose(Some(&source), "", "", &style).unwrap();
        let out = compositor
            .compose(Some(&source), &caption, "", &style)
            .unwrap();
        assert_eq!(out.dimensions(), (300, 400));

        // Ink reaches both canvas edges of the top band.
        let inked = |xs: std::ops::Range<u32>| {
            xs.flat_map(|x| (0..120).map(move |y| (x, y)))
                .any(|(x, y)| out.as_rgba().get_pixel(x, y) != plain.as_rgba().get_pixel(x, y))
        };
        assert!(inked(0..4));
        assert!(inked(296..300));
    }

    #[test]
    fn test_clipped_caption_origin_accounts_for_clip() {
        let canvas = CanvasSize::new(300, 400);
        let font = CaptionFont::embedded().unwrap();
        let mask = font.rasterize(&"W".repeat(100), 24.0, 0.84, 300).unwrap();
        assert!(mask.clip_left > 0);

        let (x, _) = caption_origin(&canvas, &mask, CaptionEdge::Top, 20);
        // The first visible mask column lands just left of the canvas.
        assert!(x <= 0);
        assert!(x + (mask.width as i64) >= 300);
    }
}
