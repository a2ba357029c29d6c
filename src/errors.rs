//! Crate errors.

use thiserror::Error;

/// Precondition failures raised by the matrix operations.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum MatrixError {
    /// Determinant or cofactor requested on a non-square matrix.
    #[error("matrix is not square ({rows} x {cols})")]
    NotSquare { rows: usize, cols: usize },

    /// Determinant or cofactor requested on a matrix smaller than 2 x 2.
    #[error("matrix is too small ({rows} x {cols}), at least 2 x 2 is required")]
    InvalidDimension { rows: usize, cols: usize },

    /// Matrices passed to `add` do not share a shape.
    #[error("matrix {index} is {found:?} but the first matrix is {expected:?}")]
    DimensionMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// `add` was called without any matrix.
    #[error("no matrix given")]
    EmptyInput,

    /// Left operand columns do not match right operand rows.
    #[error("cannot multiply a {left:?} matrix by a {right:?} matrix")]
    IncompatibleDimension {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Rows of differing lengths.
    #[error("row {row} has {found} entries, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An intermediate or final value does not fit in the element type.
    #[error("integer overflow in {operation}")]
    Overflow { operation: &'static str },

    /// Row or column outside of the matrix.
    #[error("index ({row}, {col}) out of bounds for a {rows} x {cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
