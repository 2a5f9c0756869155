//! Regression fitting.
//!
//! Responsibilities:
//!
//! - hold training observations and registered feature crosses (`regression`)
//! - assemble the design matrix and target vector (`design`)
//! - compute variance / R² diagnostics after a fit (`stats`)

pub mod design;
pub mod regression;
pub mod stats;

pub use design::*;
pub use regression::*;
pub use stats::*;
