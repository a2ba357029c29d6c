use num_bigint::BigInt;
use pyo3::exceptions::{PyOverflowError, PyValueError};
use pyo3::prelude::*;

use crate::errors::MatrixError;
use crate::matrix::matrix::{narrow, narrow_matrix, Matrix};
use crate::matrix::{cofactor, determinant, ops};
use crate::random;

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        match error {
            MatrixError::Overflow { .. } => PyOverflowError::new_err(error.to_string()),
            _ => PyValueError::new_err(error.to_string()),
        }
    }
}

// Computed in BigInt so intermediate products cannot overflow.
fn to_matrix(lines: Vec<Vec<i64>>) -> PyResult<Matrix<BigInt>> {
    Ok(Matrix::from_list(lines)?.map(|x| BigInt::from(*x)))
}

fn to_list(m: &Matrix<BigInt>) -> PyResult<Vec<Vec<i64>>> {
    Ok(narrow_matrix(m)?.to_list())
}

#[pyfunction]
pub fn transpose(lines: Vec<Vec<i64>>) -> PyResult<Vec<Vec<i64>>> {
    Ok(ops::transpose(&Matrix::from_list(lines)?).to_list())
}

#[pyfunction]
pub fn add(matrices: Vec<Vec<Vec<i64>>>) -> PyResult<Vec<Vec<i64>>> {
    let matrices = matrices
        .into_iter()
        .map(to_matrix)
        .collect::<PyResult<Vec<_>>>()?;
    to_list(&ops::add(&matrices)?)
}

#[pyfunction]
pub fn multiply(lhs: Vec<Vec<i64>>, rhs: Vec<Vec<i64>>) -> PyResult<Vec<Vec<i64>>> {
    to_list(&ops::multiply(&to_matrix(lhs)?, &to_matrix(rhs)?)?)
}

#[pyfunction]
#[pyo3(name = "determinant")]
pub fn det(lines: Vec<Vec<i64>>) -> PyResult<i64> {
    Ok(narrow(&determinant::determinant(&to_matrix(lines)?)?)?)
}

#[pyfunction]
#[pyo3(name = "cofactor")]
pub fn cofactor_matrix(lines: Vec<Vec<i64>>) -> PyResult<Vec<Vec<i64>>> {
    to_list(&cofactor::cofactor(&to_matrix(lines)?)?)
}

#[pyfunction]
#[pyo3(signature = (n, seed=None))]
pub fn random_matrix(n: usize, seed: Option<u64>) -> Vec<Vec<i64>> {
    match seed {
        Some(seed) => random::random_matrix(&mut random::seeded(seed), n),
        None => random::random_matrix(&mut rand::thread_rng(), n),
    }
    .to_list()
}

/// Exact integer matrix operations.
#[pymodule]
fn matrix_tools(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transpose, m)?)?;
    m.add_function(wrap_pyfunction!(add, m)?)?;
    m.add_function(wrap_pyfunction!(multiply, m)?)?;
    m.add_function(wrap_pyfunction!(det, m)?)?;
    m.add_function(wrap_pyfunction!(cofactor_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(random_matrix, m)?)?;
    Ok(())
}
