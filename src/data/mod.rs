//! Synthetic data for demos and smoke tests.

pub mod sample;

pub use sample::*;
