//! Service configuration.
//!
//! Loaded once from a `config.toml` file (or built from defaults) and handed
//! to [`RenditionService::open`](crate::imaging::RenditionService::open).
//! There is no runtime reconfiguration.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! target_directory = "uploads"        # Storage root, created if absent
//! allowed_mime_types = ["image/jpeg"] # Whitelist consulted during validation
//!
//! [renditions]
//! default = [800, 800]   # [width, height] box per rendition;
//! small = [300, 300]     # comment a line out to disable that rendition
//! big = [1200, 1200]
//!
//! [encoding]
//! jpeg_quality = 60      # 0-100
//! # png_compression = 6  # 0-9; omit for the encoder default
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::imaging::EncodeOptions;
use crate::naming::Rendition;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Service configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Storage root for generated files; created recursively if absent.
    pub target_directory: String,
    /// MIME types accepted by validation.
    pub allowed_mime_types: Vec<String>,
    /// Per-rendition target boxes.
    pub renditions: RenditionsConfig,
    /// Encode-time quality parameters.
    pub encoding: EncodingConfig,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            target_directory: "uploads".to_string(),
            allowed_mime_types: vec!["image/jpeg".to_string()],
            renditions: RenditionsConfig::default(),
            encoding: EncodingConfig::default(),
        }
    }
}

/// `[width, height]` box per rendition. A `None` box disables the rendition:
/// requests for it fail instead of producing an unsized output.
///
/// Omitting the whole `[renditions]` table keeps the stock boxes; writing the
/// table makes it authoritative — boxes left out of it are disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenditionsConfig {
    #[serde(default)]
    pub default: Option<[u32; 2]>,
    #[serde(default)]
    pub small: Option<[u32; 2]>,
    #[serde(default)]
    pub big: Option<[u32; 2]>,
}

impl Default for RenditionsConfig {
    fn default() -> Self {
        Self {
            default: Some([800, 800]),
            small: Some([300, 300]),
            big: Some([1200, 1200]),
        }
    }
}

impl RenditionsConfig {
    /// Target box for a rendition, if configured.
    pub fn box_for(&self, rendition: Rendition) -> Option<[u32; 2]> {
        match rendition {
            Rendition::Default => self.default,
            Rendition::Small => self.small,
            Rendition::Big => self.big,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// JPEG quality, 0-100.
    pub jpeg_quality: u8,
    /// PNG compression level 0-9; omit for the encoder default.
    pub png_compression: Option<u8>,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 60,
            png_compression: None,
        }
    }
}

impl From<&EncodingConfig> for EncodeOptions {
    fn from(config: &EncodingConfig) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
            png_compression: config.png_compression,
        }
    }
}

impl UploadConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: UploadConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_directory.is_empty() {
            return Err(ConfigError::Validation(
                "target_directory must not be empty".into(),
            ));
        }
        if self.allowed_mime_types.is_empty() {
            return Err(ConfigError::Validation(
                "allowed_mime_types must list at least one type".into(),
            ));
        }
        if self.encoding.jpeg_quality > 100 {
            return Err(ConfigError::Validation(
                "encoding.jpeg_quality must be 0-100".into(),
            ));
        }
        if let Some(level) = self.encoding.png_compression {
            if level > 9 {
                return Err(ConfigError::Validation(
                    "encoding.png_compression must be 0-9".into(),
                ));
            }
        }
        for rendition in Rendition::ALL {
            if let Some([w, h]) = self.renditions.box_for(rendition) {
                if w == 0 || h == 0 {
                    return Err(ConfigError::Validation(format!(
                        "renditions.{rendition} box values must be non-zero"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> String {
    r#"# rendify configuration
# All options are optional - the values below are the defaults.

# Storage root for generated files; created recursively if absent.
target_directory = "uploads"

# MIME types accepted by validation. Add "image/png" to resize PNGs.
allowed_mime_types = ["image/jpeg"]

[renditions]
# [width, height] box per rendition. Comment a line out to disable
# that rendition; requests for it will then fail.
default = [800, 800]
small = [300, 300]
big = [1200, 1200]

[encoding]
# JPEG quality, 0-100.
jpeg_quality = 60
# PNG compression level, 0-9. Omit for the encoder default.
# png_compression = 6
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        UploadConfig::default().validate().unwrap();
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let parsed: UploadConfig = toml::from_str(&stock_config_toml()).unwrap();
        parsed.validate().unwrap();
        let defaults = UploadConfig::default();
        assert_eq!(parsed.target_directory, defaults.target_directory);
        assert_eq!(parsed.allowed_mime_types, defaults.allowed_mime_types);
        assert_eq!(parsed.renditions.box_for(Rendition::Default), Some([800, 800]));
        assert_eq!(parsed.renditions.box_for(Rendition::Small), Some([300, 300]));
        assert_eq!(parsed.renditions.box_for(Rendition::Big), Some([1200, 1200]));
        assert_eq!(parsed.encoding.jpeg_quality, 60);
        assert_eq!(parsed.encoding.png_compression, None);
    }

    #[test]
    fn omitted_renditions_table_keeps_stock_boxes() {
        let config: UploadConfig = toml::from_str("target_directory = \"renders\"").unwrap();
        assert_eq!(config.renditions.box_for(Rendition::Default), Some([800, 800]));
        assert_eq!(config.renditions.box_for(Rendition::Big), Some([1200, 1200]));
    }

    #[test]
    fn written_renditions_table_is_authoritative() {
        let config: UploadConfig = toml::from_str(
            r#"
            [renditions]
            small = [150, 150]
            "#,
        )
        .unwrap();
        assert_eq!(config.renditions.box_for(Rendition::Small), Some([150, 150]));
        // boxes left out of a written table are disabled
        assert_eq!(config.renditions.box_for(Rendition::Default), None);
        assert_eq!(config.renditions.box_for(Rendition::Big), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<UploadConfig, _> = toml::from_str("taget_directory = \"oops\"");
        assert!(result.is_err());
    }

    #[test]
    fn zero_box_dimension_fails_validation() {
        let mut config = UploadConfig::default();
        config.renditions.big = Some([1200, 0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn png_compression_out_of_range_fails_validation() {
        let mut config = UploadConfig::default();
        config.encoding.png_compression = Some(10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "target_directory = \"renders\"").unwrap();
        let config = UploadConfig::load(&path).unwrap();
        assert_eq!(config.target_directory, "renders");
    }
}
