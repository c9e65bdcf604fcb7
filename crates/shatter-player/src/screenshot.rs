//! Headless single-frame render to a PNG file

use crate::config::ShatterConfig;
use crate::scene::ShatterScene;
use anyhow::{Context, Result};
use shatter_animation::tick;
use shatter_render::{Camera, FrameUniforms, HeadlessContext, ShatterRenderer};
use std::path::Path;

/// Render the scene as it looks `at` seconds into the animation and save it to `path`
pub fn render_screenshot(
    scene: &ShatterScene,
    config: &ShatterConfig,
    path: &Path,
    at: f64,
    width: u32,
    height: u32,
) -> Result<()> {
    let ctx = pollster::block_on(HeadlessContext::new(width, height))
        .context("Failed to create headless render context")?;

    let mut camera = Camera::new();
    camera.set_viewport(ctx.width, ctx.height);

    let mut renderer =
        ShatterRenderer::new(&ctx.device, ctx.format, &scene.mesh, &scene.attributes)
            .context("Failed to upload text mesh")?;
    renderer.set_clear_color(config.render.background_color().to_rgb());

    let state = tick(&config.timing, at);
    tracing::info!(
        at,
        phase = ?state.phase,
        amplitude = state.amplitude,
        "rendering screenshot"
    );

    let uniforms = FrameUniforms::new(&camera, &state, &config.render.shader_settings());
    renderer.render(&ctx.device, &ctx.queue, &ctx.color_view, &ctx.depth_view, &uniforms);

    ctx.save_png(path)
        .with_context(|| format!("Failed to write screenshot {}", path.display()))?;
    Ok(())
}
