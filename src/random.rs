use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::matrix::matrix::Matrix;

/// Chance for a negative draw to be flipped positive.
pub const POSITIVE_BIAS: f64 = 0.8;

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// Single digit, leaning towards positive values. Truncating a draw from
// (-10, 10) maps both (-1, 0] and [0, 1) to 0, so zero comes up twice as often.
fn entry<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let value = rng.gen_range(-10.0..10.0f64) as i64;
    if value < 0 && rng.gen_bool(POSITIVE_BIAS) {
        -value
    } else {
        value
    }
}

pub fn random_rect<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Matrix<i64> {
    Matrix::from_fn(rows, cols, |_, _| entry(rng))
}

/// Random `n x n` matrix with entries in `-9..=9`.
pub fn random_matrix<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Matrix<i64> {
    random_rect(rng, n, n)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
