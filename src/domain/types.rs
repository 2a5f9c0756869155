//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to CSV/JSON reports

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::math::FeatureCross;

/// One training example: an observed target plus its raw variables.
///
/// `crosses`, `predicted` and `residual` are filled in by a fit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    pub observed: f64,
    pub variables: Vec<f64>,
    /// Cached cross outputs, in cross registration order.
    pub crosses: Vec<f64>,
    pub predicted: f64,
    /// `predicted - observed`.
    pub residual: f64,
}

impl Observation {
    pub fn new(observed: f64, variables: impl Into<Vec<f64>>) -> Self {
        Self {
            observed,
            variables: variables.into(),
            ..Self::default()
        }
    }
}

/// Fit quality diagnostics (population variances).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStatistics {
    pub variance_observed: f64,
    pub variance_predicted: f64,
    /// `variance_predicted / variance_observed`; `NaN` when every observed
    /// value is identical.
    pub r_squared: f64,
}

/// Result of a successful fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    /// Index 0 is the bias, then one entry per raw variable, then one per cross value.
    pub coefficients: Vec<f64>,
    pub variable_count: usize,
    pub cross_count: usize,
    pub observations: usize,
    pub statistics: FitStatistics,
}

impl FittedModel {
    pub fn bias(&self) -> f64 {
        self.coefficients.first().copied().unwrap_or(0.0)
    }

    /// Coefficients of the raw variables.
    ///
    /// Empty when `coefficients` is shorter than the recorded term counts.
    pub fn variable_coefficients(&self) -> &[f64] {
        self.coefficients.get(1..1 + self.variable_count).unwrap_or(&[])
    }

    /// Coefficients of the cross values.
    pub fn cross_coefficients(&self) -> &[f64] {
        let start = 1 + self.variable_count;
        self.coefficients.get(start..start + self.cross_count).unwrap_or(&[])
    }
}

/// A column selector: a zero-based position or a header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl Default for ColumnRef {
    fn default() -> Self {
        ColumnRef::Index(0)
    }
}

impl FromStr for ColumnRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("column reference must not be empty".to_string());
        }
        Ok(match s.parse::<usize>() {
            Ok(index) => ColumnRef::Index(index),
            Err(_) => ColumnRef::Name(s.to_string()),
        })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "#{i}"),
            ColumnRef::Name(name) => write!(f, "`{name}`"),
        }
    }
}

/// A comma-separated variable vector, e.g. `1.5,2,3`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector(pub Vec<f64>);

impl FromStr for FeatureVector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(FeatureVector(Vec::new()));
        }
        s.split(',')
            .map(|v| {
                let v = v.trim();
                let x: f64 = v.parse().map_err(|e| format!("invalid number `{v}`: {e}"))?;
                if x.is_finite() {
                    Ok(x)
                } else {
                    Err(format!("value must be finite, got `{v}`"))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FeatureVector)
    }
}

/// A full `regress fit` configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub observed: ColumnRef,
    pub has_header: bool,
    /// Crosses in registration order.
    pub crosses: Vec<FeatureCross>,
    /// Inputs to predict after fitting.
    pub predict: Vec<FeatureVector>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub json: bool,
}

/// Configuration for synthetic dataset generation (`regress sample`).
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub rows: usize,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    /// Standard deviation of additive Gaussian noise.
    pub noise: f64,
    pub seed: u64,
    pub x_min: f64,
    pub x_max: f64,
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ref_prefers_index() {
        assert_eq!("2".parse::<ColumnRef>().unwrap(), ColumnRef::Index(2));
        assert_eq!(" price ".parse::<ColumnRef>().unwrap(), ColumnRef::Name("price".to_string()));
        assert!("".parse::<ColumnRef>().is_err());
    }

    #[test]
    fn feature_vector_parses_lists() {
        assert_eq!("1, 2.5,-3".parse::<FeatureVector>().unwrap().0, vec![1.0, 2.5, -3.0]);
        assert!("".parse::<FeatureVector>().unwrap().0.is_empty());
        assert!("1,x".parse::<FeatureVector>().is_err());
        assert!("inf".parse::<FeatureVector>().is_err());
    }

    #[test]
    fn fitted_model_splits_coefficients() {
        let model = FittedModel {
            coefficients: vec![1.0, 2.0, 3.0, 4.0],
            variable_count: 2,
            cross_count: 1,
            observations: 10,
            statistics: FitStatistics {
                variance_observed: 1.0,
                variance_predicted: 1.0,
                r_squared: 1.0,
            },
        };
        assert_eq!(model.bias(), 1.0);
        assert_eq!(model.variable_coefficients(), &[2.0, 3.0]);
        assert_eq!(model.cross_coefficients(), &[4.0]);
    }

    #[test]
    fn inconsistent_term_counts_give_empty_slices() {
        let model: FittedModel = serde_json::from_str(
            r#"{"coefficients":[1.0,2.0],"variable_count":5,"cross_count":3,"observations":4,
                "statistics":{"variance_observed":1.0,"variance_predicted":0.5,"r_squared":0.5}}"#,
        )
        .unwrap();
        assert_eq!(model.bias(), 1.0);
        assert!(model.variable_coefficients().is_empty());
        assert!(model.cross_coefficients().is_empty());
    }
}
