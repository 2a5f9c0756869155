//! Fit statistics over predicted/observed pairs.

use crate::domain::{FitStatistics, Observation};

/// Population variances of observed and predicted values, and their ratio.
///
/// Expects `predicted` to be filled in. `r_squared` is `NaN` when the observed
/// values have zero variance (including the empty input).
pub fn compute_statistics(observations: &[Observation]) -> FitStatistics {
    let variance_observed = variance(observations.iter().map(|o| o.observed));
    let variance_predicted = variance(observations.iter().map(|o| o.predicted));

    let r_squared = if variance_observed > 0.0 {
        variance_predicted / variance_observed
    } else {
        f64::NAN
    };

    FitStatistics {
        variance_observed,
        variance_predicted,
        r_squared,
    }
}

fn variance(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let n = values.clone().count();
    if n == 0 {
        return f64::NAN;
    }
    let n = n as f64;
    let mean = values.clone().sum::<f64>() / n;
    values.map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
