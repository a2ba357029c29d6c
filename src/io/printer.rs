use itertools::Itertools;

use crate::matrix::matrix::Matrix;
use std::fmt;
use std::fmt::Display;

/// One line per row, entries right aligned to the widest one and separated by
/// a single space.
pub fn format_matrix<T: Display>(m: &Matrix<T>) -> String {
    let cells: Vec<String> = m.cells().iter().map(|x| x.to_string()).collect();
    let width = cells.iter().map(String::len).max().unwrap_or(0);

    (0..m.rows())
        .map(|r| {
            cells[r * m.cols()..(r + 1) * m.cols()]
                .iter()
                .map(|cell| format!("{cell:>width$}"))
                .join(" ")
                + "\n"
        })
        .collect()
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_matrix(self))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
