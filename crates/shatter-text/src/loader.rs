//! Typeface loading from a URL or local file, with an on-disk download cache

use crate::typeface::Typeface;
use sha2::{Digest, Sha256};
use shatter_core::{Result, ShatterError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Helvetiker Regular as published with three.js
pub const DEFAULT_FONT_URL: &str =
    "https://cdn.jsdelivr.net/npm/three@0.157.0/examples/fonts/helvetiker_regular.typeface.json";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Where to read a typeface from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Url(String),
    File(PathBuf),
}

impl FontSource {
    /// Interpret `http://` and `https://` strings as URLs, anything else as a path
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            FontSource::Url(s.to_string())
        } else {
            FontSource::File(PathBuf::from(s))
        }
    }
}

impl Default for FontSource {
    fn default() -> Self {
        FontSource::Url(DEFAULT_FONT_URL.to_string())
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Url(url) => write!(f, "{}", url),
            FontSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolves font sources into parsed typefaces
pub struct FontLoader {
    /// Directory for downloaded typefaces; `None` disables caching
    cache_dir: Option<PathBuf>,
}

impl Default for FontLoader {
    fn default() -> Self {
        Self {
            cache_dir: dirs::cache_dir().map(|d| d.join("shatter").join("fonts")),
        }
    }
}

impl FontLoader {
    /// Loader caching downloads in the user cache directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader caching downloads in `dir`
    pub fn with_cache_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: Some(dir.into()),
        }
    }

    /// Loader that always downloads
    pub fn without_cache() -> Self {
        Self { cache_dir: None }
    }

    pub fn load(&self, source: &FontSource) -> Result<Typeface> {
        match source {
            FontSource::File(path) => Self::load_file(path),
            FontSource::Url(url) => self.load_url(url),
        }
    }

    fn load_file(path: &Path) -> Result<Typeface> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ShatterError::FontLoad(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let typeface = Typeface::from_json_str(&json)?;
        tracing::info!(path = %path.display(), family = %typeface.family_name, "loaded typeface");
        Ok(typeface)
    }

    fn load_url(&self, url: &str) -> Result<Typeface> {
        let cache_path = self.cache_path(url);

        if let Some(path) = cache_path.as_deref().filter(|p| p.exists()) {
            match std::fs::read_to_string(path)
                .map_err(ShatterError::from)
                .and_then(|json| Typeface::from_json_str(&json))
            {
                Ok(typeface) => {
                    tracing::info!(url, cache = %path.display(), "loaded typeface from cache");
                    return Ok(typeface);
                }
                Err(e) => {
                    tracing::warn!(cache = %path.display(), error = %e, "ignoring unreadable font cache entry");
                }
            }
        }

        tracing::info!(url, "downloading typeface");
        let json = download(url)?;
        let typeface = Typeface::from_json_str(&json)?;

        if let Some(path) = cache_path {
            if let Err(e) = write_cache(&path, &json) {
                tracing::warn!(cache = %path.display(), error = %e, "failed to cache typeface");
            }
        }

        tracing::info!(family = %typeface.family_name, glyphs = typeface.glyphs.len(), "loaded typeface");
        Ok(typeface)
    }

    /// Cache file for `url`: `<cache_dir>/<sha256(url)>.json`
    pub fn cache_path(&self, url: &str) -> Option<PathBuf> {
        let dir = self.cache_dir.as_ref()?;
        let digest = Sha256::digest(url.as_bytes());
        let name: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        Some(dir.join(format!("{}.json", name)))
    }
}

fn download(url: &str) -> Result<String> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build()
        .into();

    let mut response = agent
        .get(url)
        .call()
        .map_err(|e| ShatterError::FontLoad(format!("Failed to fetch {}: {}", url, e)))?;

    response
        .body_mut()
        .read_to_string()
        .map_err(|e| ShatterError::FontLoad(format!("Failed to read {}: {}", url, e)))
}

fn write_cache(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
}
