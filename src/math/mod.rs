//! Mathematical utilities: feature crosses and QR least squares.

pub mod cross;
pub mod ols;

pub use cross::*;
pub use ols::*;
