//! Layered configuration system
//!
//! Config is loaded with layers of precedence (highest wins):
//! 1. Command-line flags (applied by the binary)
//! 2. An explicit `--config <path>` file
//! 3. Project-local: `./shatter.toml`
//! 4. Global: `~/.shatter/config.toml`
//!
//! Layers are merged key by key, so a file only needs the keys it changes.

use serde::{Deserialize, Serialize};
use shatter_animation::PhaseSchedule;
use shatter_core::{Color, Result, ShatterError};
use shatter_render::ShaderSettings;
use shatter_text::{FontSource, TessellateModifier, TextOptions, DEFAULT_FONT_URL, DEFAULT_PALETTE};
use std::path::{Path, PathBuf};

/// Which typeface to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// URL or local path of a typeface JSON file
    pub source: String,
    /// Reuse previously downloaded typefaces
    pub cache: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_FONT_URL.to_string(),
            cache: true,
        }
    }
}

impl FontConfig {
    pub fn font_source(&self) -> FontSource {
        FontSource::parse(&self.source)
    }
}

/// What text to build and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub content: String,
    #[serde(flatten)]
    pub options: TextOptions,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            content: "Gavyn Page".to_string(),
            options: TextOptions::default(),
        }
    }
}

/// Colors and shading constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Face colors as `0xRRGGBB` sRGB values
    pub palette: Vec<u32>,
    /// Clear color as `0xRRGGBB` sRGB
    pub background: u32,
    pub push_vector: [f32; 3],
    pub light_direction: [f32; 3],
    pub ambient: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let shader = ShaderSettings::default();
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            background: 0x000000,
            push_vector: shader.push_vector,
            light_direction: shader.light_direction,
            ambient: shader.ambient,
        }
    }
}

impl RenderConfig {
    /// Palette decoded into linear colors
    pub fn palette_colors(&self) -> Vec<Color> {
        self.palette.iter().map(|&hex| Color::from_srgb_hex(hex)).collect()
    }

    pub fn background_color(&self) -> Color {
        Color::from_srgb_hex(self.background)
    }

    pub fn shader_settings(&self) -> ShaderSettings {
        ShaderSettings {
            push_vector: self.push_vector,
            light_direction: self.light_direction,
            ambient: self.ambient,
        }
    }
}

/// Window options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shatter".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShatterConfig {
    /// Seed for face colors and displacement; random when absent
    pub seed: Option<u64>,
    pub font: FontConfig,
    pub text: TextConfig,
    pub tessellation: TessellateModifier,
    pub timing: PhaseSchedule,
    pub render: RenderConfig,
    pub window: WindowConfig,
}

impl ShatterConfig {
    /// Load config with layered precedence: global < project < explicit file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut paths: Vec<PathBuf> = Vec::new();
        if let Some(global) = Self::global_config_path() {
            paths.push(global);
        }
        paths.push(PathBuf::from("shatter.toml"));

        let mut merged = toml::Table::new();
        for path in paths.iter().filter(|p| p.exists()) {
            tracing::debug!(path = %path.display(), "reading config layer");
            merge_tables(&mut merged, Self::read_table(path)?);
        }
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "reading config file");
            merge_tables(&mut merged, Self::read_table(path)?);
        }

        Self::from_table(merged)
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        let config: ShatterConfig = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.text.options.validate()?;
        self.timing.validate()?;
        self.tessellation.validate()?;
        if self.text.content.trim().is_empty() {
            return Err(ShatterError::Config("text.content must not be empty".to_string()));
        }
        if self.render.palette.is_empty() {
            return Err(ShatterError::Config("render.palette must not be empty".to_string()));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".shatter").join("config.toml"))
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ShatterError::Config(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }
}

/// Recursively overlay `overlay` onto `base`; tables merge, other values replace
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
