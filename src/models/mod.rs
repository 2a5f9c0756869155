//! Linear model evaluation.
//!
//! Kept as small, pure functions so the design-matrix builder, the fitter and
//! the prediction path all share one definition of a model term.

pub mod model;

pub use model::*;
