use num_bigint::BigInt;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, ToPrimitive, Zero};

use crate::errors::MatrixError;
use std::fmt::{Debug, Display};

/// Exact integer usable as a matrix entry: `i64`, `i128` or `BigInt`.
///
/// The operations only combine entries through the `*_exact` methods, so a
/// fixed-width type reports [`MatrixError::Overflow`] instead of wrapping.
pub trait Element:
    Clone + PartialEq + Zero + One + CheckedAdd + CheckedSub + CheckedMul + Display + Debug
{
    fn add_exact(&self, rhs: &Self, operation: &'static str) -> Result<Self, MatrixError> {
        self.checked_add(rhs)
            .ok_or(MatrixError::Overflow { operation })
    }

    fn sub_exact(&self, rhs: &Self, operation: &'static str) -> Result<Self, MatrixError> {
        self.checked_sub(rhs)
            .ok_or(MatrixError::Overflow { operation })
    }

    fn mul_exact(&self, rhs: &Self, operation: &'static str) -> Result<Self, MatrixError> {
        self.checked_mul(rhs)
            .ok_or(MatrixError::Overflow { operation })
    }

    /// `-self`; `i64::MIN` has no opposite.
    fn neg_exact(&self, operation: &'static str) -> Result<Self, MatrixError> {
        Self::zero().sub_exact(self, operation)
    }
}

impl<T> Element for T where
    T: Clone + PartialEq + Zero + One + CheckedAdd + CheckedSub + CheckedMul + Display + Debug
{
}

/// Narrows an exact result back to `i64`.
pub fn narrow(value: &BigInt) -> Result<i64, MatrixError> {
    value.to_i64().ok_or(MatrixError::Overflow {
        operation: "conversion to i64",
    })
}

/// Narrows every entry of `m`, failing on the first one out of range.
pub fn narrow_matrix(m: &Matrix<BigInt>) -> Result<Matrix<i64>, MatrixError> {
    Ok(Matrix::from_cells(
        m.rows(),
        m.cols(),
        m.cells().iter().map(narrow).collect::<Result<_, _>>()?,
    ))
}

/// Read access to the entries of a matrix-like value.
///
/// Implemented by [`Matrix`] and by the index-mapped [`MinorView`], so the
/// determinant expansion runs on either without copying.
///
/// [`MinorView`]: crate::matrix::minor::MinorView
pub trait Grid<T> {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn at(&self, row: usize, col: usize) -> &T;

    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Checks the shape required by determinant and cofactor, returning `n`.
    fn require_square(&self) -> Result<usize, MatrixError> {
        let (rows, cols) = (self.rows(), self.cols());
        if rows < 2 {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        if rows != cols {
            return Err(MatrixError::NotSquare { rows, cols });
        }
        Ok(rows)
    }
}

/// Dense row-major matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Matrix<T> {
    /// Builds a matrix from its rows. Every row must have the same length.
    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);

        if let Some((row, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != cols) {
            return Err(MatrixError::Ragged {
                row,
                expected: cols,
                found: line.len(),
            });
        }

        Ok(Matrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        Matrix {
            rows,
            cols,
            cells: (0..rows)
                .flat_map(|r| (0..cols).map(move |c| (r, c)))
                .map(|(r, c)| f(r, c))
                .collect(),
        }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Matrix { rows, cols, cells }
    }

    pub fn to_list(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        if self.cols == 0 {
            return vec![vec![]; self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.cols + col]
    }

    #[inline(always)]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.cells[row * self.cols + col]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            Some(self.at(row, col))
        } else {
            None
        }
    }

    /// Converts every entry, e.g. `i64` fixtures into `BigInt`.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T: Element> Matrix<T> {
    pub fn new(rows: usize, cols: usize) -> Matrix<T> {
        Matrix {
            rows,
            cols,
            cells: (0..(rows * cols)).map(|_| T::zero()).collect(),
        }
    }

    pub fn identity(n: usize) -> Matrix<T> {
        Matrix::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T> Grid<T> for Matrix<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> &T {
        Matrix::at(self, row, col)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
