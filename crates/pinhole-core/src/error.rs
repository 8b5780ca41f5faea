//! Error types for pinhole-rs.

use thiserror::Error;

/// The main error type for pinhole-rs operations.
#[derive(Error, Debug)]
pub enum CameraError {
    /// Operand shapes are incompatible (e.g. a matrix-vector product with
    /// a vector whose length is not the matrix column count).
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Element access outside the matrix bounds.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A matrix shape whose element count does not fit in `usize`.
    #[error("matrix shape {rows}x{cols} overflows usize")]
    ShapeOverflow { rows: usize, cols: usize },

    /// The camera basis cannot be built from the given look-at inputs.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// A calibration parameter is not finite and strictly positive.
    #[error("invalid calibration: {parameter} must be positive and finite, got {value}")]
    InvalidCalibration { parameter: &'static str, value: f64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for pinhole-rs operations.
pub type Result<T> = std::result::Result<T, CameraError>;
