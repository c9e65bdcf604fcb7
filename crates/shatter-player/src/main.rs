//! Shatter - animated 3D text that shatters and reassembles
//!
//! Usage:
//!   shatter [--text <TEXT>] [--font <URL|PATH>] [--seed <N>] [--fullscreen] [--config <PATH>]
//!   shatter --screenshot <out.png> [--at <seconds>] [--width W] [--height H]

use anyhow::{Context, Result};
use clap::Parser;
use shatter_player::{render_screenshot, ShatterApp, ShatterConfig, ShatterScene};
use shatter_text::FontLoader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "shatter")]
#[command(about = "Animated 3D text that shatters into colored fragments and reassembles")]
struct Args {
    /// Text to display
    #[arg(long)]
    text: Option<String>,

    /// Typeface JSON to load (URL or local path)
    #[arg(long)]
    font: Option<String>,

    /// Seed for face colors and displacement
    #[arg(long)]
    seed: Option<u64>,

    /// Config file layered over ~/.shatter/config.toml and ./shatter.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Start the animation this many seconds into the cycle
    #[arg(long, default_value_t = 0.0)]
    start_at: f64,

    /// Render one frame to this PNG file instead of opening a window
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Animation time of the screenshot frame, in seconds
    #[arg(long, default_value_t = 6.0)]
    at: f64,

    /// Output width (screenshot) or window width
    #[arg(long)]
    width: Option<u32>,

    /// Output height (screenshot) or window height
    #[arg(long)]
    height: Option<u32>,

    /// Always download the typeface instead of using the cache
    #[arg(long)]
    no_cache: bool,
}

impl Args {
    /// CLI flags are the highest config layer
    fn apply(&self, config: &mut ShatterConfig) {
        if let Some(text) = &self.text {
            config.text.content = text.clone();
        }
        if let Some(font) = &self.font {
            config.font.source = font.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.fullscreen {
            config.window.fullscreen = true;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if self.no_cache {
            config.font.cache = false;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(args) {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut config = ShatterConfig::load(args.config.as_deref()).context("Failed to load config")?;
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let loader = if config.font.cache {
        FontLoader::new()
    } else {
        FontLoader::without_cache()
    };
    let typeface = loader
        .load(&config.font.font_source())
        .with_context(|| format!("Failed to load font {}", config.font.source))?;

    let scene = ShatterScene::build(&config, &typeface).context("Failed to build text mesh")?;

    if let Some(path) = &args.screenshot {
        return render_screenshot(
            &scene,
            &config,
            path,
            args.at,
            config.window.width,
            config.window.height,
        );
    }

    tracing::info!("Escape to exit, F11 to toggle fullscreen");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ShatterApp::new(
        scene,
        config.timing,
        config.render.shader_settings(),
        config.render.background_color().to_rgb(),
        config.window.clone(),
    )
    .with_start_time(args.start_at);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
