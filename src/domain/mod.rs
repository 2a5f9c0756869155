//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - training records (`Observation`)
//! - fit outputs (`FittedModel`, `FitStatistics`)
//! - run configuration (`FitConfig`, `SampleConfig`) and the small argument
//!   types they are built from (`ColumnRef`, `FeatureVector`)

pub mod types;

pub use types::*;
