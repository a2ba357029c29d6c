pub mod errors;
pub mod harness;
pub mod io {
    pub mod fixture;
    pub mod printer;
}
pub mod matrix {
    pub mod cofactor;
    pub mod determinant;
    pub mod matrix;
    pub mod minor;
    pub mod ops;
}
#[cfg(feature = "python")]
pub mod python;
pub mod random;

pub use errors::MatrixError;
pub use matrix::cofactor::cofactor;
pub use matrix::determinant::determinant;
pub use matrix::matrix::{Element, Grid, Matrix};
pub use matrix::minor::{minor, MinorView};
pub use matrix::ops::{add, multiply, transpose};
