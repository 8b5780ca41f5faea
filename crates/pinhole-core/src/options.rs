//! Serializable camera configuration.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Full camera configuration: placement plus intrinsics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CameraOptions {
    /// Where the camera sits and what it looks at.
    pub look_at: LookAtOptions,

    /// Focal length and image size.
    pub intrinsics: IntrinsicsOptions,
}

impl CameraOptions {
    /// Parses options from a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded camera options from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookAtOptions {
    /// Camera position in world space.
    pub eye: DVec3,

    /// Point the camera is looking at.
    pub target: DVec3,

    /// Approximate up direction; must not be parallel to `target - eye`.
    pub up: DVec3,
}

impl Default for LookAtOptions {
    fn default() -> Self {
        Self {
            eye: DVec3::new(0.0, 0.0, 5.0),
            target: DVec3::ZERO,
            up: DVec3::Y,
        }
    }
}

/// Pinhole intrinsics with the principal point at the image center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrinsicsOptions {
    /// Focal length in pixels.
    pub focal: f64,

    /// Image width in pixels.
    pub width: f64,

    /// Image height in pixels.
    pub height: f64,
}

impl Default for IntrinsicsOptions {
    fn default() -> Self {
        Self {
            focal: 1000.0,
            width: 1920.0,
            height: 1080.0,
        }
    }
}
