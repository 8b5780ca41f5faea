//! World-to-pixel transform chain of a pinhole camera.
//!
//! A world point `p` is mapped as `K · P · W2C · (p, 1)`:
//! - `W2C` (4×4) is the rigid world-to-camera transform set by
//!   [`CameraTransform::set_look_at`]. The camera looks down its local -Z.
//! - `P` (3×4) drops the homogeneous coordinate.
//! - `K` (3×3) applies focal length and principal point.

use glam::{DVec2, DVec3};
use pinhole_core::{CameraError, CameraOptions, Matrix, Result};

use crate::frame::CameraFrame;

/// Below this magnitude a projected depth is treated as zero.
const DEPTH_EPSILON: f64 = 1e-12;

/// Holds the extrinsic, projection and calibration matrices of a camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransform {
    world_to_camera: Matrix,
    projection: Matrix,
    calibration: Matrix,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraTransform {
    /// Creates a transform with identity `W2C` and `K`.
    ///
    /// The projection starts as a zero 3×4 matrix; call
    /// [`set_projection`](Self::set_projection) before projecting points.
    #[must_use]
    pub fn new() -> Self {
        Self {
            world_to_camera: Matrix::identity("W2C", 4),
            projection: Matrix::new("P", 3, 4),
            calibration: Matrix::identity("K", 3),
        }
    }

    /// Builds a fully configured transform from options.
    pub fn from_options(options: &CameraOptions) -> Result<Self> {
        let mut transform = Self::new();
        let look_at = &options.look_at;
        transform.set_look_at(look_at.eye, look_at.target, look_at.up)?;
        transform.set_projection();
        let intrinsics = &options.intrinsics;
        transform.set_calibration(intrinsics.focal, intrinsics.width, intrinsics.height)?;
        Ok(transform)
    }

    /// Returns the 4×4 world-to-camera matrix.
    #[must_use]
    pub fn world_to_camera(&self) -> &Matrix {
        &self.world_to_camera
    }

    /// Returns the 3×4 projection matrix.
    #[must_use]
    pub fn projection(&self) -> &Matrix {
        &self.projection
    }

    /// Returns the 3×3 calibration matrix.
    #[must_use]
    pub fn calibration(&self) -> &Matrix {
        &self.calibration
    }

    /// Places the camera at `eye` looking toward `look_at_point`.
    ///
    /// Rows 0..3 of the rotation block are the right axis, the up axis and
    /// the negated forward axis. The translation column holds
    /// `-right·eye`, `-up·eye` and `+forward·eye`. Row 3 is left as is.
    ///
    /// On [`CameraError::DegenerateGeometry`] the matrix is not modified.
    pub fn set_look_at(&mut self, eye: DVec3, look_at_point: DVec3, up: DVec3) -> Result<()> {
        let frame = CameraFrame::from_look_at(eye, look_at_point, up)?;

        let rows = [
            (frame.right, -frame.right.dot(eye)),
            (frame.up, -frame.up.dot(eye)),
            (-frame.forward, frame.forward.dot(eye)),
        ];
        let mut w2c = self.world_to_camera.clone();
        for (r, (axis, translation)) in rows.into_iter().enumerate() {
            for (c, value) in axis.to_array().into_iter().enumerate() {
                w2c.set(r, c, value)?;
            }
            w2c.set(r, 3, translation)?;
        }
        self.world_to_camera = w2c;

        log::debug!("World-to-camera matrix:\n{}", self.world_to_camera);
        Ok(())
    }

    /// Sets the projection to the 3×4 selection matrix that passes camera
    /// `x`, `y`, `z` through and drops the homogeneous coordinate.
    pub fn set_projection(&mut self) {
        self.projection = Matrix::eye("P", 3, 4);

        log::debug!("Projection matrix:\n{}", self.projection);
    }

    /// Sets the intrinsic matrix with the principal point at the image
    /// center. All inputs must be finite and strictly positive.
    ///
    /// On [`CameraError::InvalidCalibration`] the matrix is not modified.
    pub fn set_calibration(&mut self, focal: f64, width: f64, height: f64) -> Result<()> {
        for (parameter, value) in [("focal", focal), ("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CameraError::InvalidCalibration { parameter, value });
            }
        }

        let cx = width / 2.0;
        let cy = height / 2.0;
        self.calibration = Matrix::from_rows(
            "K",
            &[&[focal, 0.0, cx], &[0.0, focal, cy], &[0.0, 0.0, 1.0]],
        )?;

        log::debug!("Calibration matrix:\n{}", self.calibration);
        Ok(())
    }

    /// Projects a world point through `W2C`, `P` and `K`.
    ///
    /// `x` and `y` of the result are image coordinates scaled by depth, and
    /// `z` is the camera-space depth (negative in front of the camera, zero
    /// at the eye).
    pub fn project_point(&self, p: DVec3) -> Result<DVec3> {
        let homogeneous = p.extend(1.0).to_array();
        let camera = self.world_to_camera.mul_vec(&homogeneous)?;
        let image_plane = self.projection.mul_vec(&camera)?;
        let pixel = self.calibration.mul_vec(&image_plane)?;
        vec3_from_slice(&pixel)
    }

    /// Projects a world point and divides by depth, giving its pixel
    /// position. A point on the optical axis lands on the principal point.
    ///
    /// Returns [`CameraError::DegenerateGeometry`] for points at zero depth.
    pub fn image_point(&self, p: DVec3) -> Result<DVec2> {
        let projected = self.project_point(p)?;
        if projected.z.abs() <= DEPTH_EPSILON {
            return Err(CameraError::DegenerateGeometry("point lies at zero depth"));
        }
        Ok(DVec2::new(projected.x / projected.z, projected.y / projected.z))
    }

    /// Rotates a direction into camera space. No translation is applied.
    pub fn transform_vector(&self, v: DVec3) -> Result<DVec3> {
        // The rotation block is orthonormal, so no rescaling is needed.
        let rotation = self.world_to_camera.sub_matrix(0, 0, 3, 3)?;
        let rotated = rotation.mul_vec(&v.to_array())?;
        vec3_from_slice(&rotated)
    }
}

fn vec3_from_slice(values: &[f64]) -> Result<DVec3> {
    if values.len() != 3 {
        return Err(CameraError::DimensionMismatch {
            expected: 3,
            actual: values.len(),
        });
    }
    Ok(DVec3::from_slice(values))
}
