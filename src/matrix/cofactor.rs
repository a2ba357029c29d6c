use log::{debug, warn};
use num_integer::Integer;

use crate::errors::MatrixError;
use crate::matrix::determinant::{laplace, EXPENSIVE_SIZE};
use crate::matrix::matrix::{Element, Grid, Matrix};
use crate::matrix::minor::source_index;

const OPERATION: &str = "cofactor";

#[inline(always)]
fn signed<T: Element>(parity: usize, value: T) -> Result<T, MatrixError> {
    if parity.is_even() {
        Ok(value)
    } else {
        value.neg_exact(OPERATION)
    }
}

/// Matrix of cofactors: entry `(i, j)` is `(-1)^(i+j)` times the determinant
/// of the minor without row `i` and column `j`.
pub fn cofactor<T: Element>(m: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
    let n = m.require_square()?;
    debug!("cofactor matrix of a {n} x {n} matrix");

    if n == 2 {
        return Ok(Matrix::from_cells(
            2,
            2,
            vec![
                m.at(1, 1).clone(),
                m.at(1, 0).neg_exact(OPERATION)?,
                m.at(0, 1).neg_exact(OPERATION)?,
                m.at(0, 0).clone(),
            ],
        ));
    }
    if n > EXPENSIVE_SIZE + 1 {
        warn!("cofactor matrix of a {n} x {n} matrix expands {n}^2 minors");
    }

    let mut cells = Vec::with_capacity(n * n);

    for i in 0..n {
        // Minor for (i, 0): every row but i, every column but the first.
        let mut window = Matrix::from_fn(n - 1, n - 1, |r, c| {
            m.at(source_index(r, i), c + 1).clone()
        });

        for j in 0..n {
            cells.push(signed(i + j, laplace(&window)?)?);

            if j == n - 1 {
                continue;
            }

            // Slide from the minor without column j to the one without j + 1.
            for r in 0..n - 1 {
                *window.at_mut(r, j) = m.at(source_index(r, i), j).clone();
            }
        }
    }

    Ok(Matrix::from_cells(n, n, cells))
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
