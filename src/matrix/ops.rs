use log::debug;

use crate::errors::MatrixError;
use crate::matrix::matrix::{Element, Matrix};
use std::ops;

pub fn transpose<T: Clone>(m: &Matrix<T>) -> Matrix<T> {
    Matrix::from_fn(m.cols(), m.rows(), |r, c| m.at(c, r).clone())
}

/// Element-wise sum of one or more matrices of the same shape.
pub fn add<T: Element>(matrices: &[Matrix<T>]) -> Result<Matrix<T>, MatrixError> {
    let first = matrices.first().ok_or(MatrixError::EmptyInput)?;
    let expected = (first.rows(), first.cols());
    debug!("adding {} matrices of shape {expected:?}", matrices.len());

    if let Some((index, m)) = matrices
        .iter()
        .enumerate()
        .find(|(_, m)| (m.rows(), m.cols()) != expected)
    {
        return Err(MatrixError::DimensionMismatch {
            index,
            expected,
            found: (m.rows(), m.cols()),
        });
    }

    let cells = (0..expected.0 * expected.1)
        .map(|index| {
            matrices[1..].iter().try_fold(first.cells()[index].clone(), |acc, m| {
                acc.add_exact(&m.cells()[index], "add")
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(Matrix::from_cells(expected.0, expected.1, cells))
}

pub fn multiply<T: Element>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
    if lhs.cols() != rhs.rows() {
        return Err(MatrixError::IncompatibleDimension {
            left: (lhs.rows(), lhs.cols()),
            right: (rhs.rows(), rhs.cols()),
        });
    }
    debug!(
        "multiplying {} x {} by {} x {}",
        lhs.rows(),
        lhs.cols(),
        rhs.rows(),
        rhs.cols()
    );

    let cells = (0..lhs.rows())
        .flat_map(|i| (0..rhs.cols()).map(move |j| (i, j)))
        .map(|(i, j)| {
            (0..lhs.cols()).try_fold(T::zero(), |acc, k| {
                let product = lhs.at(i, k).mul_exact(rhs.at(k, j), "multiply")?;
                acc.add_exact(&product, "multiply")
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(Matrix::from_cells(lhs.rows(), rhs.cols(), cells))
}

impl<T: Element> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>, MatrixError>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols() != rhs.cols() || self.rows() != rhs.rows() {
            return Err(MatrixError::DimensionMismatch {
                index: 1,
                expected: (self.rows(), self.cols()),
                found: (rhs.rows(), rhs.cols()),
            });
        }

        Ok(Matrix::from_cells(
            self.rows(),
            self.cols(),
            self.cells()
                .iter()
                .zip(rhs.cells().iter())
                .map(|(a, b)| a.add_exact(b, "add"))
                .collect::<Result<_, _>>()?,
        ))
    }
}

impl<T: Element> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>, MatrixError>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        multiply(self, rhs)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
