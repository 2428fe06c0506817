// Glue between the f64 feature rows used across the service and aprender's
// f32 `Matrix`/`Vector` primitives, plus the one ensemble aprender lacks.

pub mod boosting;

use aprender::primitives::{Matrix, Vector};
use thiserror::Error;

pub use boosting::{BoostingParams, GradientBoostingRegressor};

/// Errors raised while fitting or querying a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("cannot fit on an empty dataset")]
    EmptyDataset,

    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("features and targets differ in length ({features} vs {targets})")]
    LengthMismatch { features: usize, targets: usize },

    #[error("classifier target needs at least two classes, found {0}")]
    SingleClass(usize),

    #[error("model backend error: {0}")]
    Backend(String),
}

impl ModelError {
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        ModelError::Backend(err.to_string())
    }
}

/// Packs equally wide rows into a row-major aprender matrix.
pub fn to_matrix(rows: &[Vec<f64>]) -> Result<Matrix<f32>, ModelError> {
    let first = rows.first().ok_or(ModelError::EmptyDataset)?;
    let width = first.len();
    let mut data = Vec::with_capacity(rows.len() * width);
    for row in rows {
        if row.len() != width {
            return Err(ModelError::DimensionMismatch {
                expected: width,
                actual: row.len(),
            });
        }
        data.extend(row.iter().map(|&v| v as f32));
    }
    Matrix::from_vec(rows.len(), width, data).map_err(ModelError::backend)
}

/// A single-row matrix, rejecting rows of the wrong width.
pub fn row_matrix(row: &[f64], expected: usize) -> Result<Matrix<f32>, ModelError> {
    if row.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            actual: row.len(),
        });
    }
    let data = row.iter().map(|&v| v as f32).collect();
    Matrix::from_vec(1, expected, data).map_err(ModelError::backend)
}

pub fn to_vector(values: &[f64]) -> Vector<f32> {
    Vector::from_vec(values.iter().map(|&v| v as f32).collect())
}

/// Number of distinct classes in `0..=max(labels)`. Fewer than two present is an error.
pub fn check_classes(labels: &[usize]) -> Result<usize, ModelError> {
    let n_classes = labels
        .iter()
        .max()
        .map(|m| m + 1)
        .ok_or(ModelError::EmptyDataset)?;
    let mut seen = vec![false; n_classes];
    for &label in labels {
        seen[label] = true;
    }
    let present = seen.iter().filter(|s| **s).count();
    if present < 2 {
        return Err(ModelError::SingleClass(present));
    }
    Ok(n_classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_rejected() {
        let err = to_matrix(&[vec![1.0, 2.0], vec![3.0]]).err().unwrap();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_rows_rejected() {
        assert_eq!(to_matrix(&[]).err(), Some(ModelError::EmptyDataset));
    }

    #[test]
    fn test_matrix_shape() {
        let m = to_matrix(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_cols(), 3);
        assert_eq!(m.get(1, 2), 6.0);
    }

    #[test]
    fn test_row_matrix_checks_width() {
        assert!(row_matrix(&[1.0, 2.0], 2).is_ok());
        assert!(matches!(
            row_matrix(&[1.0], 2),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_class_check() {
        assert_eq!(check_classes(&[0, 1, 1, 0]), Ok(2));
        assert_eq!(check_classes(&[0, 4, 2]), Ok(5));
        assert_eq!(check_classes(&[1, 1, 1]), Err(ModelError::SingleClass(1)));
        assert_eq!(check_classes(&[]), Err(ModelError::EmptyDataset));
    }
}
