//! Checks the operations against a directory of expected results.

use log::{info, warn};

use crate::errors::MatrixError;
use crate::io::fixture::{read_matrices, read_scalars, FixtureError};
use crate::matrix::cofactor::cofactor;
use crate::matrix::determinant::determinant;
use crate::matrix::matrix::{Element, Matrix};
use crate::matrix::ops::{add, multiply, transpose};
use std::fmt;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub test: String,
    pub expected: String,
    pub found: String,
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} test failed", self.test)?;
        writeln!(f, "Expected:")?;
        write!(f, "{}", self.expected)?;
        writeln!(f, "Found:")?;
        write!(f, "{}", self.found)
    }
}

pub fn check_matrix<T: Element>(
    test: &str,
    found: &Matrix<T>,
    expected: &Matrix<T>,
) -> Option<Mismatch> {
    (found != expected).then(|| Mismatch {
        test: test.into(),
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

pub fn check_scalar<T: Element>(test: &str, found: &T, expected: &T) -> Option<Mismatch> {
    (found != expected).then(|| Mismatch {
        test: test.into(),
        expected: format!("{expected}\n"),
        found: format!("{found}\n"),
    })
}

#[derive(Debug, Default)]
pub struct Report {
    pub checks: usize,
    pub failures: Vec<Mismatch>,
}

impl Report {
    pub fn record(&mut self, mismatch: Option<Mismatch>) {
        self.checks += 1;
        if let Some(mismatch) = mismatch {
            warn!("{} check #{} failed", mismatch.test, self.checks);
            self.failures.push(mismatch);
        }
    }

    /// Records an operation that failed where a result was expected.
    pub fn record_error(&mut self, test: &str, expected: impl Display, error: MatrixError) {
        self.record(Some(Mismatch {
            test: test.into(),
            expected: expected.to_string(),
            found: format!("error: {error}\n"),
        }));
    }

    fn record_matrix<T: Element>(
        &mut self,
        test: &str,
        found: Result<Matrix<T>, MatrixError>,
        expected: &Matrix<T>,
    ) {
        match found {
            Ok(found) => self.record(check_matrix(test, &found, expected)),
            Err(error) => self.record_error(test, expected, error),
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

fn load<T>(dir: &Path, name: &str) -> Result<Vec<Matrix<T>>, FixtureError>
where
    T: Element + FromStr,
    T::Err: Display,
{
    read_matrices(dir.join(format!("{name}.txt")))
}

fn require<U>(name: &str, values: &[U], needed: usize) -> Result<(), FixtureError> {
    if values.len() < needed {
        return Err(FixtureError::Incomplete {
            name: name.into(),
            needed,
            found: values.len(),
        });
    }
    Ok(())
}

/// Runs every operation against the fixtures found in `dir`.
///
/// Cofactors are only checked for the `data` matrices that have an entry in
/// `cofactors_expected`, so the costly ones can be left out.
pub fn run_suite<T>(dir: impl AsRef<Path>) -> Result<Report, FixtureError>
where
    T: Element + FromStr,
    T::Err: Display,
{
    let dir = dir.as_ref();
    let mut report = Report::default();

    let matrices = load::<T>(dir, "transpose")?;
    let expected = load::<T>(dir, "transpose_expected")?;
    require("transpose_expected", &expected, matrices.len())?;
    for (m, expected) in matrices.iter().zip(&expected) {
        report.record(check_matrix("transpose", &transpose(m), expected));
    }

    let matrices = load::<T>(dir, "add")?;
    let expected = load::<T>(dir, "add_expected")?;
    require("add_expected", &expected, 1)?;
    report.record_matrix("add", add(&matrices), &expected[0]);

    let matrices = load::<T>(dir, "multiply")?;
    let expected = load::<T>(dir, "multiply_expected")?;
    if matrices.len() % 2 != 0 {
        return Err(FixtureError::Incomplete {
            name: "multiply".into(),
            needed: matrices.len() + 1,
            found: matrices.len(),
        });
    }
    require("multiply_expected", &expected, matrices.len() / 2)?;
    for (pair, expected) in matrices.chunks(2).zip(&expected) {
        report.record_matrix("multiply", multiply(&pair[0], &pair[1]), expected);
    }

    let data = load::<T>(dir, "data")?;
    let determinants = read_scalars::<T>(dir.join("determinant_expected.txt"))?;
    require("determinant_expected", &determinants, data.len())?;
    for (m, expected) in data.iter().zip(&determinants) {
        match determinant(m) {
            Ok(found) => report.record(check_scalar("determinant", &found, expected)),
            Err(error) => report.record_error("determinant", format!("{expected}\n"), error),
        }
    }

    let expected = load::<T>(dir, "cofactors_expected")?;
    for (m, expected) in data.iter().zip(&expected) {
        report.record_matrix("cofactor", cofactor(m), expected);
    }

    info!(
        "{} checks, {} failed",
        report.checks,
        report.failures.len()
    );
    Ok(report)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
