//! `regress` library crate.
//!
//! Multivariable ordinary least squares with feature crosses. The binary
//! (`regress`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the [`fit::Regression`] calculator can be embedded directly

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
