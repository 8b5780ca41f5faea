//! Orthonormal camera basis derived from look-at parameters.

use glam::DVec3;
use pinhole_core::{CameraError, Result};

/// Vectors shorter than this cannot be normalized.
const DEGENERACY_EPSILON: f64 = 1e-12;

/// The camera's axes expressed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Right axis, `normalize(up × forward)`.
    pub right: DVec3,
    /// Re-orthogonalized up axis, `normalize(forward × right)`.
    pub up: DVec3,
    /// Viewing direction, from the eye toward the target.
    pub forward: DVec3,
}

impl CameraFrame {
    /// Builds the basis for a camera at `eye` looking at `target`.
    ///
    /// Returns [`CameraError::DegenerateGeometry`] when `eye` and `target`
    /// coincide, when `up` is zero or collinear with the view direction, or
    /// when any input is not finite.
    pub fn from_look_at(eye: DVec3, target: DVec3, up: DVec3) -> Result<Self> {
        let forward = normalize_checked(target - eye, "eye and look-at point coincide")?;
        let right = normalize_checked(
            up.cross(forward),
            "up vector is zero or parallel to the view direction",
        )?;
        let up = normalize_checked(forward.cross(right), "camera basis collapsed")?;
        Ok(Self { right, up, forward })
    }
}

fn normalize_checked(v: DVec3, reason: &'static str) -> Result<DVec3> {
    let length = v.length();
    if !length.is_finite() || length <= DEGENERACY_EPSILON {
        return Err(CameraError::DegenerateGeometry(reason));
    }
    Ok(v / length)
}
