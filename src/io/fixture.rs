//! Text fixtures holding matrices.
//!
//! A fixture is a sequence of blocks, each made of a row count, a column count
//! and then one comma separated line per row:
//!
//! ```text
//! # any line not starting with a digit is skipped between blocks
//! 2
//! 3
//! 1,2,3
//! 4,5,6
//! ```

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::errors::MatrixError;
use crate::matrix::matrix::{Element, Matrix};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `line` is 1-based.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{name} holds {found} entries, {needed} needed")]
    Incomplete {
        name: String,
        needed: usize,
        found: usize,
    },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

fn parse_error(line: usize, message: impl Into<String>) -> FixtureError {
    FixtureError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_count(line: usize, text: Option<&str>, what: &str) -> Result<usize, FixtureError> {
    let text = text.ok_or_else(|| parse_error(line, format!("missing {what}")))?;
    text.trim()
        .parse()
        .map_err(|e| parse_error(line, format!("invalid {what} {text:?}: {e}")))
}

fn parse_cell<T>(line: usize, text: &str) -> Result<T, FixtureError>
where
    T: FromStr,
    T::Err: Display,
{
    text.trim()
        .parse()
        .map_err(|e| parse_error(line, format!("invalid entry {text:?}: {e}")))
}

/// Parses every matrix block of `text`.
pub fn parse_matrices<T>(text: &str) -> Result<Vec<Matrix<T>>, FixtureError>
where
    T: Element + FromStr,
    T::Err: Display,
{
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut matrices = vec![];

    while let Some((line, header)) = lines.next() {
        if !header.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        let rows = parse_count(line, Some(header), "row count")?;
        let (line, cols) = match lines.next() {
            Some((next, text)) => (next, parse_count(next, Some(text), "column count")?),
            None => (line, parse_count(line, None, "column count")?),
        };

        let mut cells = Vec::with_capacity(rows);
        for expected_row in 0..rows {
            let (row_line, text) = lines
                .next()
                .ok_or_else(|| parse_error(line, format!("missing row {}", expected_row + 1)))?;

            // A matrix without columns is written as empty row lines.
            let row = if text.trim().is_empty() {
                Vec::new()
            } else {
                text.split(',')
                    .map(|cell| parse_cell(row_line, cell))
                    .collect::<Result<Vec<T>, _>>()?
            };
            if row.len() != cols {
                return Err(parse_error(
                    row_line,
                    format!("expected {cols} entries, found {}", row.len()),
                ));
            }
            cells.push(row);
        }

        matrices.push(Matrix::from_list(cells)?);
    }

    Ok(matrices)
}

/// Parses one integer per line, skipping blank lines and `#` comments.
pub fn parse_scalars<T>(text: &str) -> Result<Vec<T>, FixtureError>
where
    T: FromStr,
    T::Err: Display,
{
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .map(|(i, l)| parse_cell(i + 1, l))
        .collect()
}

fn read(path: &Path) -> Result<String, FixtureError> {
    std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_matrices<T>(path: impl AsRef<Path>) -> Result<Vec<Matrix<T>>, FixtureError>
where
    T: Element + FromStr,
    T::Err: Display,
{
    let path = path.as_ref();
    let matrices = parse_matrices(&read(path)?)?;
    debug!("read {} matrices from {}", matrices.len(), path.display());
    Ok(matrices)
}

pub fn read_scalars<T>(path: impl AsRef<Path>) -> Result<Vec<T>, FixtureError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_scalars(&read(path.as_ref())?)
}

/// Renders `m` as a fixture block, the inverse of [`parse_matrices`].
pub fn format_fixture<T: Display>(m: &Matrix<T>) -> String {
    let mut out = format!("{}\n{}\n", m.rows(), m.cols());
    for r in 0..m.rows() {
        out.push_str(&m.row(r).iter().join(","));
        out.push('\n');
    }
    out
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    const SAMPLE: &str = "\
matrices used by the tests

2
3
1,2,3
4,5,-6
# second
1
1
32
";

    #[test]
    fn test_parse_matrices() {
        let matrices = parse_matrices::<i64>(SAMPLE).unwrap();
        assert_eq!(matrices.len(), 2);
        assert_eq!(matrices[0].to_list(), vec![vec![1, 2, 3], vec![4, 5, -6]]);
        assert_eq!(matrices[1].to_list(), vec![vec![32]]);

        let matrices = parse_matrices::<BigInt>(SAMPLE).unwrap();
        assert_eq!(*matrices[0].at(1, 2), BigInt::from(-6));
    }

    #[test]
    fn test_parse_tolerates_spaces() {
        let matrices = parse_matrices::<i64>("2\n2\n 1, -2\n3 ,4\n").unwrap();
        assert_eq!(matrices[0].to_list(), vec![vec![1, -2], vec![3, 4]]);
    }

    #[test]
    fn test_parse_errors() {
        match parse_matrices::<i64>("2\n3\n1,2,3\n4,5\n") {
            Err(FixtureError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected {other:?}"),
        }
        match parse_matrices::<i64>("1\n2\n1,x\n") {
            Err(FixtureError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("\"x\""));
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse_matrices::<i64>("3\n1\n1\n2\n") {
            Err(FixtureError::Parse { message, .. }) => assert_eq!(message, "missing row 3"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse_matrices::<i64>("3\n"),
            Err(FixtureError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_scalars() {
        let values = parse_scalars::<i64>("# dets\n2\n\n-7\n  -3385\n").unwrap();
        assert_eq!(values, vec![2, -7, -3385]);
        assert!(parse_scalars::<i64>("1\nfoo\n").is_err());
    }

    #[test]
    fn test_format_fixture() {
        let m = Matrix::from_list(vec![vec![1i64, -2], vec![30, 4]]).unwrap();
        let text = format_fixture(&m);
        assert_eq!(text, "2\n2\n1,-2\n30,4\n");
        assert_eq!(parse_matrices::<i64>(&text).unwrap(), vec![m]);
    }

    #[test]
    fn test_zero_columns() {
        let matrices = parse_matrices::<i64>("2\n0\n\n\n1\n1\n5\n").unwrap();
        assert_eq!((matrices[0].rows(), matrices[0].cols()), (2, 0));
        assert_eq!(matrices[1].to_list(), vec![vec![5]]);

        let empty = Matrix::<i64>::from_list(vec![vec![], vec![], vec![]]).unwrap();
        let text = format_fixture(&empty);
        assert_eq!(text, "3\n0\n\n\n\n");
        assert_eq!(parse_matrices::<i64>(&text).unwrap(), vec![empty]);

        // a blank line still counts as a short row when columns are expected
        assert!(matches!(
            parse_matrices::<i64>("1\n2\n\n"),
            Err(FixtureError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_matrices::<i64>("does/not/exist.txt");
        assert!(matches!(result, Err(FixtureError::Io { .. })));
    }
}
