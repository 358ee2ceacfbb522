//! Configuration file handling for art-booth.
//!
//! Loads configuration from `~/.config/art-booth/config.toml` or a custom
//! path. Every field has a default tied to the engine's named constants, so
//! a missing file or empty table is valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ascii::DEFAULT_OUTPUT_WIDTH;
use crate::raster::{DEFAULT_CELL_SIZE, STICKER_MAX_SIDE};

/// Engine configuration. Loaded from TOML; defaults to the named constants.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ascii: AsciiConfig,
    #[serde(default)]
    pub pixelate: PixelateConfig,
    #[serde(default)]
    pub sticker: StickerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsciiConfig {
    /// Output width in glyphs.
    #[serde(default = "default_ascii_width")]
    pub width: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PixelateConfig {
    /// Pixelation cell side in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StickerConfig {
    /// Longest-side bound for sticker output in pixels.
    #[serde(default = "default_sticker_side")]
    pub max_side: u32,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
        }
    }
}

impl Default for PixelateConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            max_side: STICKER_MAX_SIDE,
        }
    }
}

fn default_ascii_width() -> u32 {
    DEFAULT_OUTPUT_WIDTH
}

fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}

fn default_sticker_side() -> u32 {
    STICKER_MAX_SIDE
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// Returns the default config if the file doesn't exist; an error only
    /// if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        })
        .join("art-booth/config.toml")
}
