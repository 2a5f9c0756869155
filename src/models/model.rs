//! Linear model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - build a design row `[1, variables…, crosses…]` (for OLS)
//! - evaluate `c0 + Σ c[j+1]·features[j]` given coefficients (for predictions/residuals)
//!
//! Coefficients are a plain slice whose length is the number of fitted terms.
//! Looking up a term past that length yields `0.0`: such a feature contributes
//! nothing to the prediction.

/// Number of model terms for `variables` raw variables and `crosses` cross values.
pub fn term_count(variables: usize, crosses: usize) -> usize {
    1 + variables + crosses
}

/// Coefficient for term `i` (0 = bias), or `0.0` past the fitted terms.
pub fn coefficient_at(coefficients: &[f64], i: usize) -> f64 {
    coefficients.get(i).copied().unwrap_or(0.0)
}

/// Fill a design row: bias first, then raw variables, then cross values.
///
/// # Panics
/// Panics if `out` does not have length `term_count(variables.len(), crosses.len())`.
/// Callers should size the row correctly.
pub fn fill_design_row(variables: &[f64], crosses: &[f64], out: &mut [f64]) {
    assert_eq!(
        out.len(),
        term_count(variables.len(), crosses.len()),
        "design row has the wrong length"
    );
    let v = variables.len();
    out[0] = 1.0;
    out[1..=v].copy_from_slice(variables);
    out[v + 1..].copy_from_slice(crosses);
}

/// Evaluate the linear model on an extended feature vector (raw variables
/// followed by cross values).
pub fn predict(coefficients: &[f64], features: &[f64]) -> f64 {
    features
        .iter()
        .enumerate()
        .fold(coefficient_at(coefficients, 0), |acc, (j, &x)| {
            acc + coefficient_at(coefficients, j + 1) * x
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_row_layout() {
        let mut row = vec![0.0; 5];
        fill_design_row(&[2.0, 3.0], &[4.0, 6.0], &mut row);
        assert_eq!(row, vec![1.0, 2.0, 3.0, 4.0, 6.0]);

        let mut row = vec![0.0; 1];
        fill_design_row(&[], &[], &mut row);
        assert_eq!(row, vec![1.0]);
    }

    #[test]
    fn predict_is_bias_plus_weighted_features() {
        let y = predict(&[1.0, 2.0, -1.0], &[3.0, 4.0]);
        assert_eq!(y, 1.0 + 6.0 - 4.0);
    }

    #[test]
    fn features_past_the_fitted_terms_contribute_nothing() {
        assert_eq!(predict(&[1.0, 2.0], &[3.0, 100.0, 1000.0]), 7.0);
        assert_eq!(predict(&[], &[3.0]), 0.0);
        assert_eq!(coefficient_at(&[5.0], 3), 0.0);
    }
}
