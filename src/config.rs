//! Imaging configuration module.
//!
//! Handles loading and validating an optional `imgops.toml`. Every key has a
//! default, so a missing file (or an empty one) yields [`ImagingConfig::default`].
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resize]
//! filter = "catmullrom"      # nearest | triangle | catmullrom | gaussian | lanczos3
//!
//! [jpeg]
//! quality = 100              # 1-100
//!
//! [png]
//! compression = "default"    # default | fast | best
//!
//! [rotate]
//! interpolation = "bilinear" # nearest | bilinear | bicubic (non-right angles only)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Encoder and resampler settings shared by every operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagingConfig {
    pub resize: ResizeConfig,
    pub jpeg: JpegConfig,
    pub png: PngConfig,
    pub rotate: RotateConfig,
}

impl ImagingConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg.quality) {
            return Err(ConfigError::Validation(
                "jpeg.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Resampling settings for scale and thumbnail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub filter: ResampleFilter,
}

/// JPEG encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegConfig {
    pub quality: u8,
}

impl Default for JpegConfig {
    fn default() -> Self {
        Self { quality: 100 }
    }
}

/// PNG encoder settings. Output is always RGBA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PngConfig {
    pub compression: PngCompression,
}

/// Rotation settings for angles that are not multiples of 90°.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotateConfig {
    pub interpolation: RotateInterpolation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> image::imageops::FilterType {
        use image::imageops::FilterType;
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    #[default]
    Default,
    Fast,
    Best,
}

impl PngCompression {
    pub fn compression_type(self) -> image::codecs::png::CompressionType {
        use image::codecs::png::CompressionType;
        match self {
            Self::Default => CompressionType::Default,
            Self::Fast => CompressionType::Fast,
            Self::Best => CompressionType::Best,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateInterpolation {
    Nearest,
    #[default]
    Bilinear,
    Bicubic,
}

impl RotateInterpolation {
    pub fn interpolation(self) -> imageproc::geometric_transformations::Interpolation {
        use imageproc::geometric_transformations::Interpolation;
        match self {
            Self::Nearest => Interpolation::Nearest,
            Self::Bilinear => Interpolation::Bilinear,
            Self::Bicubic => Interpolation::Bicubic,
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse and validate config from TOML text.
pub fn parse_config(content: &str) -> Result<ImagingConfig, ConfigError> {
    let config: ImagingConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// Returns the defaults if the file does not exist. Rejects unknown keys
/// and validates the result.
pub fn load_config(path: &Path) -> Result<ImagingConfig, ConfigError> {
    if !path.exists() {
        return Ok(ImagingConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `imgops.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgops Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Resampling (scale, scale2h, scale2w, thumbnail)
# ---------------------------------------------------------------------------
[resize]
# One of: nearest, triangle, catmullrom, gaussian, lanczos3.
filter = "catmullrom"

# ---------------------------------------------------------------------------
# JPEG output
# ---------------------------------------------------------------------------
[jpeg]
# Encoder quality, 1-100. Defaults to maximum.
quality = 100

# ---------------------------------------------------------------------------
# PNG output (always written with an alpha channel)
# ---------------------------------------------------------------------------
[png]
# One of: default, fast, best.
compression = "default"

# ---------------------------------------------------------------------------
# Rotation by angles that are not multiples of 90 degrees
# ---------------------------------------------------------------------------
[rotate]
# One of: nearest, bilinear, bicubic.
interpolation = "bilinear"
"##
}
