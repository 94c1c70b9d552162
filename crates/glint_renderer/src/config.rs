//! Render settings loading and validation errors.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::camera::CameraConfig;
use glint_core::Color;
use glint_math::Vec3;

/// Errors raised while loading or validating render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Image width must be at least 1 pixel, got {0}")]
    InvalidImageWidth(u32),

    #[error("Aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Samples per pixel must be at least 1, got {0}")]
    InvalidSamplesPerPixel(u32),

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("Focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Defocus angle must be in [0, 180) degrees, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("Camera look_from and look_at coincide")]
    DegenerateView,

    #[error("Camera up vector is zero or parallel to the view direction")]
    DegenerateUp,

    #[error("Image of {width}x{height} pixels exceeds the {max} pixel limit")]
    ImageTooLarge { width: u32, height: f32, max: usize },

    #[error("Bucket size must be at least 1 pixel, got {0}")]
    InvalidBucketSize(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Camera fields a settings file may override. Any field left out keeps
/// the scene's own value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraOverrides {
    pub image_width: Option<u32>,
    pub aspect_ratio: Option<f32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub vfov: Option<f32>,
    pub defocus_angle: Option<f32>,
    pub focus_dist: Option<f32>,
    pub look_from: Option<Vec3>,
    pub look_at: Option<Vec3>,
    pub vup: Option<Vec3>,
    pub background: Option<Color>,
    pub sky_gradient: Option<bool>,
}

impl CameraOverrides {
    /// Overlay the given fields onto `base`.
    pub fn apply(&self, base: CameraConfig) -> CameraConfig {
        CameraConfig {
            image_width: self.image_width.unwrap_or(base.image_width),
            aspect_ratio: self.aspect_ratio.unwrap_or(base.aspect_ratio),
            samples_per_pixel: self.samples_per_pixel.unwrap_or(base.samples_per_pixel),
            max_depth: self.max_depth.unwrap_or(base.max_depth),
            vfov: self.vfov.unwrap_or(base.vfov),
            defocus_angle: self.defocus_angle.unwrap_or(base.defocus_angle),
            focus_dist: self.focus_dist.unwrap_or(base.focus_dist),
            look_from: self.look_from.unwrap_or(base.look_from),
            look_at: self.look_at.unwrap_or(base.look_at),
            vup: self.vup.unwrap_or(base.vup),
            background: self.background.unwrap_or(base.background),
            sky_gradient: self.sky_gradient.unwrap_or(base.sky_gradient),
        }
    }
}

/// Per-render settings, usually read from a JSON file.
///
/// ```json
/// {
///   "seed": 7,
///   "bucket_size": 32,
///   "camera": { "image_width": 600, "samples_per_pixel": 200 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Field-wise overrides on top of the scene's own camera.
    pub camera: Option<CameraOverrides>,
    pub seed: u64,
    pub bucket_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            camera: None,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderSettings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: RenderSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate settings from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Checks the settings that do not depend on a scene. Camera overrides
    /// are checked once merged, by [`RenderSettings::camera_for`].
    pub fn validate(&self) -> ConfigResult<()> {
        if self.bucket_size == 0 {
            return Err(ConfigError::InvalidBucketSize(self.bucket_size));
        }
        Ok(())
    }

    /// The scene camera with this file's overrides applied, validated.
    pub fn camera_for(&self, base: CameraConfig) -> ConfigResult<CameraConfig> {
        let config = match &self.camera {
            Some(overrides) => overrides.apply(base),
            None => base,
        };
        config.validate()?;
        Ok(config)
    }
}
