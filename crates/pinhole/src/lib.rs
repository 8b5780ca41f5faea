//! pinhole-rs: the transform chain of a virtual pinhole camera.
//!
//! A [`CameraTransform`] maps world points to pixel coordinates plus depth
//! through three matrices:
//!
//! - **W2C** (4×4): rigid world-to-camera transform, set from eye, target
//!   and up vectors. The camera looks down its local -Z axis.
//! - **P** (3×4): projection that drops the homogeneous coordinate.
//! - **K** (3×3): intrinsic calibration (focal length, principal point).
//!
//! # Quick Start
//!
//! ```
//! use pinhole::*;
//!
//! fn main() -> Result<()> {
//!     let mut camera = CameraTransform::new();
//!     camera.set_look_at(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::Y)?;
//!     camera.set_projection();
//!     camera.set_calibration(1000.0, 1920.0, 1080.0)?;
//!
//!     let pixel = camera.image_point(DVec3::ZERO)?;
//!     assert_eq!(pixel, DVec2::new(960.0, 540.0));
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! All fallible operations return [`CameraError`]. Degenerate look-at inputs,
//! non-positive calibration parameters and matrix shape mismatches are
//! reported as errors rather than turned into NaN.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod frame;
mod transform;

// Re-export core types
pub use pinhole_core::{
    error::{CameraError, Result},
    matrix::Matrix,
    options::{CameraOptions, IntrinsicsOptions, LookAtOptions},
    DMat3, DMat4, DVec2, DVec3, DVec4,
};

pub use frame::CameraFrame;
pub use transform::CameraTransform;
