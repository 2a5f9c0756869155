//! Feature crosses: derived features computed from an observation's raw variables.
//!
//! A cross is a plain value (kind + bound indices + exponent) rather than a
//! closure, so it can be printed, compared, serialized and parsed from the
//! command line:
//!
//! ```text
//! pow:0:2          ->  x0^2
//! product:0,1,3    ->  x0*x1*x3
//! ```
//!
//! Every cross has a fixed output arity. Both built-in kinds produce exactly
//! one value per call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegressionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureCross {
    /// `variables[index] ^ exponent`
    Power { index: usize, exponent: f64 },
    /// Product of the variables at `indices`. An empty index list yields `1.0`.
    Product { indices: Vec<usize> },
}

impl FeatureCross {
    pub fn power(index: usize, exponent: f64) -> Self {
        FeatureCross::Power { index, exponent }
    }

    pub fn product(indices: impl IntoIterator<Item = usize>) -> Self {
        FeatureCross::Product {
            indices: indices.into_iter().collect(),
        }
    }

    /// Number of values appended by [`FeatureCross::calculate`].
    pub fn arity(&self) -> usize {
        1
    }

    /// Variable indices this cross reads.
    pub fn bound_indices(&self) -> &[usize] {
        match self {
            FeatureCross::Power { index, .. } => std::slice::from_ref(index),
            FeatureCross::Product { indices } => indices,
        }
    }

    /// Smallest variable-vector length this cross can be evaluated on.
    pub fn required_variables(&self) -> usize {
        self.bound_indices().iter().max().map_or(0, |&i| i + 1)
    }

    /// Evaluate the cross on a raw variable vector.
    pub fn calculate(&self, variables: &[f64]) -> Result<Vec<f64>, RegressionError> {
        let mut out = Vec::with_capacity(self.arity());
        self.calculate_into(variables, &mut out)?;
        Ok(out)
    }

    /// Evaluate the cross and append its outputs to `out`.
    ///
    /// On error nothing is appended.
    pub fn calculate_into(&self, variables: &[f64], out: &mut Vec<f64>) -> Result<(), RegressionError> {
        self.check_bounds(variables.len())?;
        let value = match self {
            FeatureCross::Power { index, exponent } => variables[*index].powf(*exponent),
            FeatureCross::Product { indices } => indices.iter().map(|&i| variables[i]).product(),
        };
        out.push(value);
        Ok(())
    }

    /// Human-readable name, using `names[i]` for variable `i` when available.
    pub fn label(&self, names: &[String]) -> String {
        let name = |i: usize| names.get(i).cloned().unwrap_or_else(|| format!("x{i}"));
        match self {
            FeatureCross::Power { index, exponent } => format!("{}^{}", name(*index), exponent),
            FeatureCross::Product { indices } if indices.is_empty() => "1".to_string(),
            FeatureCross::Product { indices } => indices
                .iter()
                .map(|&i| name(i))
                .collect::<Vec<_>>()
                .join("*"),
        }
    }

    fn check_bounds(&self, available: usize) -> Result<(), RegressionError> {
        match self.bound_indices().iter().find(|&&i| i >= available) {
            Some(&index) => Err(RegressionError::CrossIndexOutOfRange {
                cross: self.to_string(),
                index,
                available,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for FeatureCross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(&[]))
    }
}

impl FromStr for FeatureCross {
    type Err = String;

    /// Parse `pow:<index>:<exponent>` or `product:<i>,<j>,...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid cross `{s}`: expected `pow:I:P` or `product:I,J,...`"))?;

        match kind.to_ascii_lowercase().as_str() {
            "pow" | "power" => {
                let (index, exponent) = rest
                    .split_once(':')
                    .ok_or_else(|| format!("invalid power cross `{s}`: expected `pow:I:P`"))?;
                let index = parse_index(index)?;
                let exponent: f64 = exponent
                    .trim()
                    .parse()
                    .map_err(|e| format!("invalid exponent `{exponent}`: {e}"))?;
                if !exponent.is_finite() {
                    return Err(format!("exponent must be finite, got `{exponent}`"));
                }
                Ok(FeatureCross::power(index, exponent))
            }
            "product" | "mul" => {
                let indices = rest
                    .split(',')
                    .map(parse_index)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FeatureCross::product(indices))
            }
            other => Err(format!("unknown cross kind `{other}` (expected `pow` or `product`)")),
        }
    }
}

fn parse_index(s: &str) -> Result<usize, String> {
    s.trim()
        .parse()
        .map_err(|e| format!("invalid variable index `{}`: {e}", s.trim()))
}
