use crate::errors::MatrixError;
use crate::matrix::matrix::{Grid, Matrix};

// Index of the source row/column once `skipped` has been removed.
#[inline(always)]
pub(crate) fn source_index(index: usize, skipped: usize) -> usize {
    if index < skipped {
        index
    } else {
        index + 1
    }
}

/// Minor of a square matrix seen through an index mapping, without copying.
#[derive(Debug)]
pub struct MinorView<'a, G: ?Sized> {
    source: &'a G,
    row: usize,
    col: usize,
}

impl<'a, G: ?Sized> MinorView<'a, G> {
    /// Minor of `source` without `row` and `col`.
    pub fn new<T>(source: &'a G, row: usize, col: usize) -> Result<Self, MatrixError>
    where
        G: Grid<T>,
    {
        let n = Grid::<T>::require_square(source)?;
        if row >= n || col >= n {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: n,
                cols: n,
            });
        }
        Ok(MinorView { source, row, col })
    }

    pub fn to_matrix<T: Clone>(&self) -> Matrix<T>
    where
        G: Grid<T>,
    {
        let n = Grid::<T>::rows(self.source) - 1;
        Matrix::from_fn(n, n, |r, c| Grid::<T>::at(self, r, c).clone())
    }
}

impl<T, G: Grid<T> + ?Sized> Grid<T> for MinorView<'_, G> {
    fn rows(&self) -> usize {
        Grid::<T>::rows(self.source) - 1
    }

    fn cols(&self) -> usize {
        Grid::<T>::cols(self.source) - 1
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> &T {
        Grid::<T>::at(
            self.source,
            source_index(row, self.row),
            source_index(col, self.col),
        )
    }
}

/// The `(n-1) x (n-1)` matrix left after deleting `row` and `col` from `m`.
pub fn minor<T: Clone>(m: &Matrix<T>, row: usize, col: usize) -> Result<Matrix<T>, MatrixError> {
    Ok(MinorView::new(m, row, col)?.to_matrix())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<i64> {
        Matrix::from_list(vec![
            vec![5, 8, 9, 0],
            vec![-2, 4, -1, 7],
            vec![8, 1, 0, 2],
            vec![5, 3, 6, 6],
        ])
        .unwrap()
    }

    #[test]
    fn test_minor() {
        let m = sample();
        assert_eq!(
            minor(&m, 0, 0).unwrap().to_list(),
            vec![vec![4, -1, 7], vec![1, 0, 2], vec![3, 6, 6]]
        );
        assert_eq!(
            minor(&m, 1, 2).unwrap().to_list(),
            vec![vec![5, 8, 0], vec![8, 1, 2], vec![5, 3, 6]]
        );
        assert_eq!(
            minor(&m, 3, 3).unwrap().to_list(),
            vec![vec![5, 8, 9], vec![-2, 4, -1], vec![8, 1, 0]]
        );
    }

    #[test]
    fn test_minor_of_minor() {
        let m = sample();
        let outer = MinorView::new(&m, 0, 0).unwrap();
        let inner = MinorView::new(&outer, 2, 1).unwrap();
        let inner: Matrix<i64> = inner.to_matrix();
        assert_eq!(inner.to_list(), vec![vec![4, 7], vec![1, 2]]);
    }

    #[test]
    fn test_minor_errors() {
        let m = sample();
        assert_eq!(
            minor(&m, 4, 0),
            Err(MatrixError::IndexOutOfBounds {
                row: 4,
                col: 0,
                rows: 4,
                cols: 4
            })
        );

        let m = Matrix::from_list(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(
            minor(&m, 0, 0),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );

        let m = Matrix::from_list(vec![vec![1]]).unwrap();
        assert_eq!(
            minor(&m, 0, 0),
            Err(MatrixError::InvalidDimension { rows: 1, cols: 1 })
        );
    }
}
