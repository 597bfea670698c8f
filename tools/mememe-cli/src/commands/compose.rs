//! Caption a single image.

use std::path::PathBuf;

use mememe_common::config::AppConfig;
use mememe_model::{Bitmap, CanvasSize, RenderStyle};
use mememe_render_engine::Compositor;

pub fn run(
    config: &AppConfig,
    image: PathBuf,
    top: String,
    bottom: String,
    output: PathBuf,
    width: Option<u32>,
    height: Option<u32>,
) -> anyhow::Result<()> {
    let defaults = &config.editor;
    let canvas = CanvasSize::new(
        width.unwrap_or(defaults.canvas_width),
        height.unwrap_or(defaults.canvas_height),
    )
    .with_letterbox(mememe_model::Color::rgba(defaults.letterbox_rgba));
    let style = RenderStyle::from_defaults(defaults);

    let source = Bitmap::open(&image)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", image.display()))?;
    println!(
        "Composing {} ({}x{})",
        image.display(),
        source.width(),
        source.height()
    );

    let compositor = Compositor::new(canvas)?;
    let meme = compositor.compose(Some(&source), &top, &bottom, &style)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    meme.save_png(&output)?;

    println!("  Top: {top:?}");
    println!("  Bottom: {bottom:?}");
    println!("  Canvas: {}x{}", meme.width(), meme.height());
    println!("  Hash: {:016x}", meme.content_hash());
    println!("Wrote {}", output.display());

    Ok(())
}
