//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MemeError, MemeResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where shared memes are exported.
    pub export_dir: PathBuf,

    /// Editor surface and caption style defaults.
    pub editor: EditorDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default editor surface and caption parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorDefaults {
    /// Output canvas width in pixels.
    pub canvas_width: u32,

    /// Output canvas height in pixels.
    pub canvas_height: u32,

    /// Color shown around an aspect-fitted image (RGBA).
    pub letterbox_rgba: [u8; 4],

    /// Caption font size in pixels.
    pub font_size: f32,

    /// Smallest size a caption may shrink to when it is too wide.
    pub min_font_size: f32,

    /// Caption fill color (RGBA).
    pub fill_rgba: [u8; 4],

    /// Caption outline color (RGBA).
    pub stroke_rgba: [u8; 4],

    /// Outline width as a percentage of the font size.
    pub stroke_width_percent: f32,

    /// Distance between the canvas edge and each caption, in pixels.
    pub margin: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "mememe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            editor: EditorDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            canvas_width: 750,
            canvas_height: 1334,
            letterbox_rgba: [0, 0, 0, 255],
            font_size: 80.0,
            min_font_size: 24.0,
            fill_rgba: [255, 255, 255, 255],
            stroke_rgba: [0, 0, 0, 255],
            stroke_width_percent: 3.5,
            margin: 32,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl EditorDefaults {
    /// Reject values the compositor cannot render with.
    pub fn validate(&self) -> MemeResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(MemeError::config("Canvas dimensions must be non-zero"));
        }
        if !(self.font_size > 0.0) || !(self.min_font_size > 0.0) {
            return Err(MemeError::config("Font sizes must be positive"));
        }
        if self.min_font_size > self.font_size {
            return Err(MemeError::config(
                "min_font_size must not exceed font_size",
            ));
        }
        if !(self.stroke_width_percent >= 0.0) {
            return Err(MemeError::config("stroke_width_percent must be >= 0"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
                    Ok(config) => match config.editor.validate() {
                        Ok(()) => return config,
                        Err(e) => {
                            tracing::warn!("Invalid config at {:?}: {}", config_path, e);
                        }
                    },
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&config_path, json)?;
        Ok(config_path)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("mememe").join("config.json")
}

/// Default export directory.
fn default_export_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("mememe").join("shared")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EditorDefaults::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_canvas() {
        let editor = EditorDefaults {
            canvas_width: 0,
            ..EditorDefaults::default()
        };
        assert!(matches!(editor.validate(), Err(MemeError::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_inverted_font_sizes() {
        let editor = EditorDefaults {
            font_size: 20.0,
            min_font_size: 40.0,
            ..EditorDefaults::default()
        };
        assert!(editor.validate().is_err());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.editor.canvas_width, 750);
        assert_eq!(parsed.editor.stroke_rgba, [0, 0, 0, 255]);
        assert_eq!(parsed.logging.level, "info");
    }
}
