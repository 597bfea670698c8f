use image::{ImageBuffer, Rgba, RgbaImage};
use mememe_model::bitmap::Bitmap;
use mememe_model::canvas::CanvasSize;
use mememe_model::style::RenderStyle;
use mememe_render_engine::Compositor;
use proptest::prelude::*;

/// Checkerboard with a gradient band, so resampling has real work to do.
fn create_quality_pattern(width: u32, height: u32) -> Bitmap {
    let checker_size = 16u32;
    let image: RgbaImage = ImageBuffer::from_fn(width, height, |x, y| {
        if y < height / 2 {
            if (x / checker_size + y / checker_size) % 2 == 0 {
                Rgba([200, 200, 200, 255])
            } else {
                Rgba([50, 50, 50, 255])
            }
        } else {
            let intensity = (x * 255 / width.max(1)) as u8;
            Rgba([intensity, 40, 255 - intensity, 255])
        }
    });
    Bitmap::from_rgba(image)
}

fn default_compositor() -> Compositor {
    Compositor::new(CanvasSize::default()).expect("bundled font should load")
}

/// FNV-1a of the default 750x1334 canvas holding `create_quality_pattern(750, 562)`
/// with both captions empty: the pattern copied at y = 386, black above and below.
const PHOTO_ONLY_HASH: u64 = 0xe3609c26f854150c;

#[test]
fn photo_only_compose_matches_reference() {
    let compositor = default_compositor();
    let source = create_quality_pattern(750, 562);
    let out = compositor
        .compose(Some(&source), "", "", &RenderStyle::default())
        .unwrap();
    assert_eq!(out.content_hash(), PHOTO_ONLY_HASH);
}

#[test]
fn hello_world_only_touches_caption_bands() {
    let compositor = default_compositor();
    let style = RenderStyle::default();
    let source = create_quality_pattern(750, 562);

    let plain = compositor.compose(Some(&source), "", "", &style).unwrap();
    let meme = compositor
        .compose(Some(&source), "HELLO", "WORLD", &style)
        .unwrap();
    assert_eq!(plain.content_hash(), PHOTO_ONLY_HASH);
    assert_ne!(meme.content_hash(), PHOTO_ONLY_HASH);

    for y in 300..1030 {
        for x in 0..750 {
            assert_eq!(
                meme.as_rgba().get_pixel(x, y),
                plain.as_rgba().get_pixel(x, y),
                "pixel ({x}, {y}) lies between the captions"
            );
        }
    }
}

#[test]
fn repeated_compose_is_byte_identical() {
    let compositor = default_compositor();
    let style = RenderStyle::default();
    let source = create_quality_pattern(1024, 768);

    let first = compositor
        .compose(Some(&source), "HELLO", "WORLD", &style)
        .unwrap();
    for _ in 0..3 {
        let again = compositor
            .compose(Some(&source), "HELLO", "WORLD", &style)
            .unwrap();
        assert_eq!(again.content_hash(), first.content_hash());
        assert_eq!(again, first);
    }
}

#[test]
fn independent_compositors_agree() {
    let style = RenderStyle::default();
    let source = create_quality_pattern(640, 480);

    let a = default_compositor()
        .compose(Some(&source), "TOP", "BOTTOM", &style)
        .unwrap();
    let b = default_compositor()
        .compose(Some(&source), "TOP", "BOTTOM", &style)
        .unwrap();
    assert_eq!(a.content_hash(), b.content_hash());
}

#[test]
fn caption_text_is_part_of_the_output() {
    let compositor = default_compositor();
    let style = RenderStyle::default();
    let source = create_quality_pattern(640, 480);

    let hello = compositor
        .compose(Some(&source), "HELLO", "WORLD", &style)
        .unwrap();
    let swapped = compositor
        .compose(Some(&source), "WORLD", "HELLO", &style)
        .unwrap();
    let blank = compositor.compose(Some(&source), "", "", &style).unwrap();

    assert_ne!(hello.content_hash(), swapped.content_hash());
    assert_ne!(hello.content_hash(), blank.content_hash());
}

#[test]
fn style_is_part_of_the_output() {
    let compositor = default_compositor();
    let source = create_quality_pattern(640, 480);
    let default_style = RenderStyle::default();
    let thin = RenderStyle {
        stroke_width_percent: 0.0,
        ..RenderStyle::default()
    };

    let a = compositor
        .compose(Some(&source), "TOP", "BOTTOM", &default_style)
        .unwrap();
    let b = compositor
        .compose(Some(&source), "TOP", "BOTTOM", &thin)
        .unwrap();
    assert_ne!(a.content_hash(), b.content_hash());
}

#[test]
fn overlong_caption_stays_on_canvas() {
    let compositor = default_compositor();
    let style = RenderStyle::default();
    let source = create_quality_pattern(300, 300);
    let caption = "A CAPTION THAT IS MUCH WIDER THAN ANY PHONE SCREEN COULD EVER SHOW";

    let out = compositor
        .compose(Some(&source), caption, caption, &style)
        .unwrap();
    assert_eq!(out.dimensions(), (750, 1334));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn output_size_ignores_source_aspect(w in 1u32..400, h in 1u32..400) {
        let compositor = Compositor::new(CanvasSize::new(120, 200)).unwrap();
        let out = compositor
            .compose(Some(&create_quality_pattern(w, h)), "TOP", "BOTTOM", &RenderStyle::default())
            .unwrap();
        prop_assert_eq!(out.dimensions(), (120, 200));
    }
}
