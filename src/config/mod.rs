//! Render defaults and the optional TOML override file
//!
//! Precedence: explicit CLI flags > values from `--config` > built-in
//! defaults. The file only needs the keys it wants to override.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ShortxError, ShortxResult};

/// Montage render defaults, overridable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    pub fps: u32,
    pub crf: u8,
    pub preset: String,
    pub target_lufs: f64,
    pub voice_gain_db: f64,
    pub music_gain_db: f64,
    pub duck_threshold_db: f64,
    pub duck_ratio: f64,
    pub duck_attack_secs: f64,
    pub duck_release_secs: f64,
    pub sub_font_size: u32,
    pub sub_margin: u32,
    pub sub_outline: u32,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            fps: 30,
            crf: 20,
            preset: "veryfast".to_string(),
            target_lufs: -14.0,
            voice_gain_db: 0.0,
            music_gain_db: -10.0,
            duck_threshold_db: -20.0,
            duck_ratio: 8.0,
            duck_attack_secs: 0.02,
            duck_release_secs: 0.30,
            sub_font_size: 36,
            sub_margin: 64,
            sub_outline: 2,
        }
    }
}

impl RenderDefaults {
    /// Load defaults, overriding from `path` when given.
    pub fn load(path: Option<&Path>) -> ShortxResult<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| ShortxError::ConfigError {
                    message: format!("failed to read {}: {}", path.display(), e),
                })?;
                toml::from_str(&content).map_err(|e| ShortxError::ConfigError {
                    message: format!("failed to parse {}: {}", path.display(), e),
                })
            }
        }
    }
}
