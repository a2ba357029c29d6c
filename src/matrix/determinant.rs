use log::{debug, trace, warn};
use num_integer::Integer;
use num_traits::Zero;

use crate::errors::MatrixError;
use crate::matrix::matrix::{Element, Grid};

/// Above this size the factorial cost of the expansion becomes noticeable.
pub const EXPENSIVE_SIZE: usize = 10;

/// Columns consumed by the enclosing levels of one expansion.
///
/// Owned by a single top-level call; columns are inserted before descending
/// and removed on the way back up, so siblings never see each other's state.
#[derive(Debug, Clone)]
pub struct SkipSet {
    skipped: Vec<bool>,
    len: usize,
}

impl SkipSet {
    pub fn new(cols: usize) -> Self {
        SkipSet {
            skipped: vec![false; cols],
            len: 0,
        }
    }

    #[inline(always)]
    pub fn contains(&self, col: usize) -> bool {
        self.skipped[col]
    }

    pub fn insert(&mut self, col: usize) {
        debug_assert!(!self.skipped[col]);
        self.skipped[col] = true;
        self.len += 1;
    }

    pub fn remove(&mut self, col: usize) {
        debug_assert!(self.skipped[col]);
        self.skipped[col] = false;
        self.len -= 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Columns not yet consumed, in ascending order.
    pub fn free(&self) -> impl Iterator<Item = usize> + '_ {
        self.skipped
            .iter()
            .enumerate()
            .filter(|(_, skipped)| !**skipped)
            .map(|(col, _)| col)
    }
}

/// Determinant by Laplace expansion along successive top rows.
///
/// Exact: no division or rounding happens. With a fixed-width `T`, any
/// intermediate value that does not fit is reported as
/// [`MatrixError::Overflow`].
pub fn determinant<T: Element, G: Grid<T> + ?Sized>(m: &G) -> Result<T, MatrixError> {
    let n = m.require_square()?;
    debug!("determinant of a {n} x {n} matrix");
    if n > EXPENSIVE_SIZE {
        warn!("determinant of a {n} x {n} matrix expands {n}! terms");
    }

    laplace(m)
}

// Caller guarantees a square matrix of size >= 2.
pub(crate) fn laplace<T: Element, G: Grid<T> + ?Sized>(m: &G) -> Result<T, MatrixError> {
    let mut skip = SkipSet::new(m.cols());
    expand(m, &mut skip, 0)
}

const OPERATION: &str = "determinant";

fn expand<T: Element, G: Grid<T> + ?Sized>(
    m: &G,
    skip: &mut SkipSet,
    depth: usize,
) -> Result<T, MatrixError> {
    let n = m.rows();
    debug_assert_eq!(skip.len(), depth);

    if n - depth == 2 {
        let mut free = skip.free();
        let (c1, c2) = match (free.next(), free.next()) {
            (Some(c1), Some(c2)) => (c1, c2),
            _ => unreachable!("two free columns at depth {depth}"),
        };
        let main = m.at(depth, c1).mul_exact(m.at(depth + 1, c2), OPERATION)?;
        let anti = m.at(depth, c2).mul_exact(m.at(depth + 1, c1), OPERATION)?;
        return main.sub_exact(&anti, OPERATION);
    }

    let mut total = T::zero();
    // sign follows the position among free columns, not the column index
    let mut position = 0usize;

    for col in 0..n {
        if skip.contains(col) {
            continue;
        }

        let entry = m.at(depth, col);
        if !entry.is_zero() {
            trace!("depth {depth}: expanding column {col} at position {position}");
            skip.insert(col);
            let sub = expand(m, skip, depth + 1);
            skip.remove(col);
            let term = entry.mul_exact(&sub?, OPERATION)?;

            total = if position.is_even() {
                total.add_exact(&term, OPERATION)?
            } else {
                total.sub_exact(&term, OPERATION)?
            };
        }
        position += 1;
    }

    Ok(total)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::matrix::Matrix;
    use crate::matrix::minor::MinorView;
    use num_bigint::BigInt;
    use rstest::rstest;

    fn matrix(lines: &[&[i64]]) -> Matrix<i64> {
        Matrix::from_list(lines.iter().map(|l| l.to_vec()).collect()).unwrap()
    }

    #[rstest]
    #[case(vec![vec![1, 0], vec![-1, 2]], 2)]
    #[case(vec![vec![-1, 2, 5], vec![1, 0, -2], vec![1, 1, 3]], -7)]
    #[case(vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]], 0)]
    #[case(vec![vec![5, 8, 9, 0], vec![-2, 4, -1, 7], vec![8, 1, 0, 2], vec![5, 3, 6, 6]], -3385)]
    #[case(vec![vec![-8, 5, -4, 0], vec![2, -9, 7, -9], vec![2, 0, -9, 5], vec![0, -6, -1, 3]], -4340)]
    #[case(vec![vec![-1, -5, 3, 0], vec![8, 4, -7, 2], vec![9, 7, 1, 0], vec![-4, -7, 8, -4]], -1024)]
    #[case(vec![vec![1, 1, 8, -6], vec![6, 0, -1, 8], vec![-3, 0, 8, 8], vec![8, 6, -6, 9]], -5769)]
    #[case(vec![vec![8, 1, 1, 8], vec![3, 6, 0, -1], vec![2, -3, 0, 8], vec![-3, 8, 6, -6]], -1213)]
    #[case(
        vec![
            vec![-9, -8, -6, 3, -7],
            vec![8, 1, 1, 8, -6],
            vec![3, 6, 0, -1, 8],
            vec![2, -3, 0, 8, 8],
            vec![-3, 8, 6, -6, 9],
        ],
        52903
    )]
    #[case(
        vec![
            vec![4, 2, -3, 0, 8, 9],
            vec![-2, -2, 8, 0, 7, 6],
            vec![2, -9, 0, 0, -2, 2],
            vec![4, -9, -5, -1, -9, 7],
            vec![7, -4, 8, -8, 8, -5],
            vec![2, 8, -9, 7, 5, -3],
        ],
        343460
    )]
    fn test_determinant(#[case] lines: Vec<Vec<i64>>, #[case] expected: i64) {
        let m = Matrix::from_list(lines).unwrap();
        assert_eq!(determinant(&m), Ok(expected));
    }

    #[test]
    fn test_determinant_9x9() {
        let m = matrix(&[
            &[9, 6, 9, 3, 5, 2, 3, 9, 4],
            &[-5, 6, 5, 1, 6, 6, 4, -4, 3],
            &[8, 9, 5, 8, 5, 2, 9, 4, 8],
            &[-3, 2, 1, 1, 0, 4, 0, 5, 6],
            &[3, 0, 5, 1, 1, 1, 3, 7, 3],
            &[6, 5, 5, 0, 0, 8, 2, 4, 4],
            &[5, 1, 5, 7, 1, 1, 3, 2, 8],
            &[2, -9, -5, 7, 0, 0, 0, 0, 9],
            &[5, 8, 2, -7, 1, 8, 6, 4, -2],
        ]);
        assert_eq!(determinant(&m), Ok(41493208));
        assert_eq!(
            determinant(&m.map(|x| BigInt::from(*x))),
            Ok(BigInt::from(41493208))
        );
    }

    #[test]
    fn test_determinant_identity() {
        assert_eq!(determinant(&Matrix::<i64>::identity(7)), Ok(1));
        assert_eq!(determinant(&Matrix::<i64>::new(4, 4)), Ok(0));
    }

    #[test]
    fn test_determinant_bigint() {
        // 10^30 * 10^30 does not fit in 128 bits
        let big = BigInt::parse_bytes(b"1000000000000000000000000000000", 10).unwrap();
        let m = Matrix::from_list(vec![
            vec![big.clone(), BigInt::from(0), BigInt::from(0)],
            vec![BigInt::from(0), big.clone(), BigInt::from(0)],
            vec![BigInt::from(0), BigInt::from(0), BigInt::from(-1)],
        ])
        .unwrap();
        assert_eq!(determinant(&m), Ok(-(&big * &big)));
    }

    #[test]
    fn test_determinant_of_minor_view() {
        let m = matrix(&[&[5, 8, 9, 0], &[-2, 4, -1, 7], &[8, 1, 0, 2], &[5, 3, 6, 6]]);
        let view = MinorView::new(&m, 0, 3).unwrap();
        // [[-2, 4, -1], [8, 1, 0], [5, 3, 6]]
        assert_eq!(determinant(&view), Ok(-223));
    }

    #[rstest]
    #[case(3, 2, MatrixError::NotSquare { rows: 3, cols: 2 })]
    #[case(2, 3, MatrixError::NotSquare { rows: 2, cols: 3 })]
    #[case(1, 1, MatrixError::InvalidDimension { rows: 1, cols: 1 })]
    #[case(0, 0, MatrixError::InvalidDimension { rows: 0, cols: 0 })]
    fn test_determinant_errors(
        #[case] rows: usize,
        #[case] cols: usize,
        #[case] expected: MatrixError,
    ) {
        assert_eq!(determinant(&Matrix::<i64>::new(rows, cols)), Err(expected));
    }

    #[test]
    fn test_determinant_overflow() {
        // 4e9 * 4e9 = 1.6e19 is above i64::MAX
        let m = matrix(&[&[4_000_000_000, 0], &[0, 4_000_000_000]]);
        assert_eq!(
            determinant(&m),
            Err(MatrixError::Overflow {
                operation: "determinant"
            })
        );
        assert_eq!(
            determinant(&m.map(|x| BigInt::from(*x))),
            Ok(BigInt::from(16_000_000_000_000_000_000u64))
        );
        assert_eq!(
            determinant(&m.map(|x| i128::from(*x))),
            Ok(16_000_000_000_000_000_000i128)
        );

        // overflow deep in the expansion, not only in the 2 x 2 base case
        let m = matrix(&[
            &[3_000_000, 0, 0, 0],
            &[0, 3_000_000, 0, 0],
            &[0, 0, 3_000_000, 0],
            &[0, 0, 0, 3_000_000],
        ]);
        assert!(matches!(determinant(&m), Err(MatrixError::Overflow { .. })));

        // difference of two products that each fit
        let m = matrix(&[&[i64::MAX, 1], &[-1, 1]]);
        assert!(matches!(determinant(&m), Err(MatrixError::Overflow { .. })));
    }

    #[test]
    fn test_skip_set() {
        let mut skip = SkipSet::new(4);
        assert!(skip.is_empty());
        skip.insert(1);
        skip.insert(3);
        assert_eq!(skip.len(), 2);
        assert!(skip.contains(3));
        assert_eq!(skip.free().collect::<Vec<_>>(), vec![0, 2]);
        skip.remove(3);
        assert_eq!(skip.free().collect::<Vec<_>>(), vec![0, 2, 3]);
    }
}
