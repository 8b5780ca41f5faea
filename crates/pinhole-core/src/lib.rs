//! Core abstractions for pinhole-rs.
//!
//! This crate provides the building blocks used by the camera transform:
//! - [`Matrix`], a named dense matrix with checked shapes and indices
//! - [`CameraError`] and the crate-wide [`Result`] alias
//! - [`CameraOptions`] for loading camera placement and intrinsics from JSON

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod matrix;
pub mod options;

pub use error::{CameraError, Result};
pub use matrix::Matrix;
pub use options::{CameraOptions, IntrinsicsOptions, LookAtOptions};

// Re-export glam types for convenience
pub use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};
