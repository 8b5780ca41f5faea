//! Dense, named matrices with run-time shape checking.
//!
//! The camera chain mixes 4×4, 3×4 and 3×3 matrices, so shapes are carried
//! as data and every product is checked before it is computed. Storage is a
//! [`nalgebra::DMatrix`]; the serialized form is row-major. All indices are
//! zero-based.

use std::fmt;

use glam::{DMat3, DMat4};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{CameraError, Result};

/// A dense `rows × cols` matrix of `f64` tagged with a diagnostic name.
///
/// The name only shows up in [`fmt::Display`] output and log messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixData", into = "MatrixData")]
pub struct Matrix {
    name: String,
    data: DMatrix<f64>,
}

/// Serialized form of a [`Matrix`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct MatrixData {
    name: String,
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixData> for Matrix {
    type Error = CameraError;

    fn try_from(raw: MatrixData) -> Result<Self> {
        let expected = element_count(raw.rows, raw.cols)?;
        if raw.data.len() != expected {
            return Err(CameraError::DimensionMismatch {
                expected,
                actual: raw.data.len(),
            });
        }
        Ok(Self {
            name: raw.name,
            data: DMatrix::from_row_slice(raw.rows, raw.cols, &raw.data),
        })
    }
}

impl From<Matrix> for MatrixData {
    fn from(m: Matrix) -> Self {
        let (rows, cols) = m.data.shape();
        Self {
            name: m.name,
            rows,
            cols,
            // column-major storage of the transpose is row-major order
            data: m.data.transpose().as_slice().to_vec(),
        }
    }
}

/// Whether `[start, start + len)` lies inside `[0, limit)`.
fn fits(start: usize, len: usize, limit: usize) -> bool {
    start.checked_add(len).is_some_and(|end| end <= limit)
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(CameraError::ShapeOverflow { rows, cols })
}

impl Matrix {
    /// Creates a zero-filled matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`. Use [`Matrix::try_new`]
    /// for shapes that come from untrusted input.
    #[must_use]
    pub fn new(name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            name: name.into(),
            data: DMatrix::zeros(rows, cols),
        }
    }

    /// Creates a zero-filled matrix, rejecting shapes whose element count
    /// overflows `usize`.
    pub fn try_new(name: impl Into<String>, rows: usize, cols: usize) -> Result<Self> {
        element_count(rows, cols)?;
        Ok(Self::new(name, rows, cols))
    }

    /// Creates a `dim × dim` identity matrix.
    #[must_use]
    pub fn identity(name: impl Into<String>, dim: usize) -> Self {
        Self::eye(name, dim, dim)
    }

    /// Creates a `rows × cols` matrix with ones on the main diagonal.
    #[must_use]
    pub fn eye(name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self {
            name: name.into(),
            data: DMatrix::identity(rows, cols),
        }
    }

    /// Creates a matrix from row slices. All rows must have the same length.
    pub fn from_rows(name: impl Into<String>, rows: &[&[f64]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut flat = Vec::with_capacity(element_count(rows.len(), cols)?);
        for row in rows {
            if row.len() != cols {
                return Err(CameraError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        Ok(Self {
            name: name.into(),
            data: DMatrix::from_row_slice(rows.len(), cols, &flat),
        })
    }

    /// Returns the diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(CameraError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(())
    }

    /// Returns the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.data[(row, col)])
    }

    /// Sets the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_index(row, col)?;
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Returns a copy of one row.
    pub fn row(&self, row: usize) -> Result<Vec<f64>> {
        if row >= self.rows() {
            return Err(CameraError::IndexOutOfBounds {
                row,
                col: 0,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.data.row(row).iter().copied().collect())
    }

    /// Multiplies this matrix by a column vector.
    ///
    /// Fails with [`CameraError::DimensionMismatch`] when `v.len()` differs
    /// from the column count.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.cols() {
            return Err(CameraError::DimensionMismatch {
                expected: self.cols(),
                actual: v.len(),
            });
        }
        let product = &self.data * DVector::from_column_slice(v);
        Ok(product.as_slice().to_vec())
    }

    /// Extracts the `rows × cols` block starting at `(row_start, col_start)`.
    pub fn sub_matrix(
        &self,
        row_start: usize,
        col_start: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Matrix> {
        if !fits(row_start, rows, self.rows()) || !fits(col_start, cols, self.cols()) {
            return Err(CameraError::IndexOutOfBounds {
                row: row_start.saturating_add(rows.saturating_sub(1)),
                col: col_start.saturating_add(cols.saturating_sub(1)),
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(Self {
            name: format!("{}_sub", self.name),
            data: self.data.view((row_start, col_start), (rows, cols)).into_owned(),
        })
    }

    fn expect_shape(&self, rows: usize, cols: usize) -> Result<()> {
        if self.rows() != rows {
            return Err(CameraError::DimensionMismatch {
                expected: rows,
                actual: self.rows(),
            });
        }
        if self.cols() != cols {
            return Err(CameraError::DimensionMismatch {
                expected: cols,
                actual: self.cols(),
            });
        }
        Ok(())
    }
}

// Both nalgebra and glam store columns contiguously.
impl TryFrom<&Matrix> for DMat3 {
    type Error = CameraError;

    fn try_from(m: &Matrix) -> Result<Self> {
        m.expect_shape(3, 3)?;
        Ok(DMat3::from_cols_slice(m.data.as_slice()))
    }
}

impl TryFrom<&Matrix> for DMat4 {
    type Error = CameraError;

    fn try_from(m: &Matrix) -> Result<Self> {
        m.expect_shape(4, 4)?;
        Ok(DMat4::from_cols_slice(m.data.as_slice()))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}x{}):", self.name, self.rows(), self.cols())?;
        for row in self.data.row_iter() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>10.4}")).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let m = Matrix::identity("I", 3);
        assert_eq!(m.shape(), (3, 3));
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_eq!(m.get(r, c).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_rectangular_eye() {
        let m = Matrix::eye("P", 3, 4);
        assert_eq!(m.row(0).unwrap(), &[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.row(2).unwrap(), &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_new_is_zero() {
        let m = Matrix::new("P", 3, 4);
        assert_eq!(m.name(), "P");
        assert!(m.row(2).unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut m = Matrix::identity("W2C", 4);
        assert!(m.set(3, 3, 2.0).is_ok());
        assert!(matches!(
            m.set(4, 0, 1.0),
            Err(CameraError::IndexOutOfBounds { row: 4, col: 0, .. })
        ));
        assert!(matches!(m.get(0, 4), Err(CameraError::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_mul_vec() {
        let m = Matrix::from_rows("A", &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let out = m.mul_vec(&[1.0, 0.0, -1.0]).unwrap();
        assert_eq!(out, vec![-2.0, -2.0]);
    }

    #[test]
    fn test_mul_vec_dimension_mismatch() {
        let m = Matrix::new("P", 3, 4);
        let err = m.mul_vec(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            CameraError::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(Matrix::from_rows("bad", &[&[1.0, 2.0], &[3.0]]).is_err());
    }

    #[test]
    fn test_sub_matrix() {
        let m = Matrix::from_rows(
            "M",
            &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]],
        )
        .unwrap();
        let block = m.sub_matrix(1, 1, 2, 2).unwrap();
        assert_eq!(block.shape(), (2, 2));
        assert_eq!(block.row(0).unwrap(), &[5.0, 6.0]);
        assert_eq!(block.row(1).unwrap(), &[8.0, 9.0]);
        assert!(m.sub_matrix(2, 0, 2, 3).is_err());
    }

    #[test]
    fn test_sub_matrix_huge_extent() {
        let m = Matrix::identity("W2C", 4);
        let err = m.sub_matrix(1, 0, usize::MAX, 1).unwrap_err();
        assert!(matches!(err, CameraError::IndexOutOfBounds { rows: 4, cols: 4, .. }));
        assert!(m.sub_matrix(0, usize::MAX, 1, 2).is_err());
    }

    #[test]
    fn test_try_new_rejects_overflowing_shape() {
        let err = Matrix::try_new("big", usize::MAX, 2).unwrap_err();
        assert!(matches!(err, CameraError::ShapeOverflow { cols: 2, .. }));
        assert_eq!(Matrix::try_new("P", 3, 4).unwrap(), Matrix::new("P", 3, 4));
    }

    #[test]
    fn test_to_glam_keeps_layout() {
        let mut m = Matrix::identity("W2C", 4);
        m.set(0, 3, 7.0).unwrap();
        let mat: DMat4 = (&m).try_into().unwrap();
        // Column 3 holds the translation.
        assert_eq!(mat.w_axis.x, 7.0);
        assert!(DMat3::try_from(&m).is_err());
    }

    #[test]
    fn test_display_contains_name() {
        let text = Matrix::identity("K", 3).to_string();
        assert!(text.starts_with("K (3x3):"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_deserialize_rejects_bad_length() {
        let json = r#"{"name":"K","rows":3,"cols":3,"data":[1.0,0.0]}"#;
        assert!(serde_json::from_str::<Matrix>(json).is_err());

        let m = Matrix::from_rows("K", &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let back: Matrix = serde_json::from_str(&serde_json::to_string(&m).unwrap()).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_serialized_data_is_row_major() {
        let m = Matrix::from_rows("A", &[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains(r#""data":[1.0,2.0,3.0,4.0]"#));
    }

    #[test]
    fn test_deserialize_rejects_overflowing_shape() {
        let json = r#"{"name":"K","rows":18446744073709551615,"cols":2,"data":[]}"#;
        let err = serde_json::from_str::<Matrix>(json).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }
}
