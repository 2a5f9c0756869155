//! Input/output helpers.
//!
//! - CSV ingest + table reshaping into observations (`ingest`)
//! - per-observation result exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
