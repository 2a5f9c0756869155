//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::error::AppError;
use crate::report::{FitSummary, Prediction, TermCoefficient};

/// Format the full run summary (dataset + coefficients + fit diagnostics).
pub fn format_run_summary(summary: &FitSummary) -> String {
    let mut out = String::new();

    out.push_str("=== regress - OLS fit ===\n");
    out.push_str(&format!("Input: {}\n", summary.input));
    out.push_str(&format!("Observed: {}\n", summary.observed_column));
    out.push_str(&format!(
        "Rows: read={} | skipped={} | fitted={}\n",
        summary.rows_read, summary.rows_skipped, summary.observations
    ));
    if !summary.crosses.is_empty() {
        let crosses: Vec<String> = summary.crosses.iter().map(|c| c.to_string()).collect();
        out.push_str(&format!("Crosses: {}\n", crosses.join(", ")));
    }

    out.push_str("\nCoefficients:\n");
    out.push_str(&format_coefficients(&summary.terms));

    out.push_str("\nFit quality:\n");
    out.push_str(&format!("- variance (observed) : {:.6}\n", summary.statistics.variance_observed));
    out.push_str(&format!("- variance (predicted): {:.6}\n", summary.statistics.variance_predicted));
    out.push_str(&format!("- R²                  : {}\n", fmt_r_squared(summary.statistics.r_squared)));

    if !summary.predictions.is_empty() {
        out.push_str("\nPredictions:\n");
        out.push_str(&format_predictions(&summary.predictions));
    }

    out
}

/// Format the coefficient table, one term per line.
pub fn format_coefficients(terms: &[TermCoefficient]) -> String {
    let width = terms.iter().map(|t| t.term.len()).max().unwrap_or(0).max(4);
    let mut out = String::new();
    out.push_str(&format!("{:>3}  {:<width$}  {:>16}\n", "#", "term", "coefficient"));
    for t in terms {
        out.push_str(&format!("{:>3}  {:<width$}  {:>16.6}\n", t.index, t.term, t.coefficient));
    }
    out
}

pub fn format_predictions(predictions: &[Prediction]) -> String {
    let mut out = String::new();
    for p in predictions {
        out.push_str(&format!("- [{}] -> {:.6}\n", fmt_vec(&p.input), p.predicted));
    }
    out
}

/// Serialize the summary as pretty JSON.
///
/// An undefined R² is written as `null`.
pub fn format_summary_json(summary: &FitSummary) -> Result<String, AppError> {
    serde_json::to_string_pretty(summary)
        .map_err(|e| AppError::new(4, format!("Failed to serialize summary: {e}")))
}

fn fmt_r_squared(r2: f64) -> String {
    if r2.is_nan() {
        "undefined (observed values are constant)".to_string()
    } else {
        format!("{r2:.6}")
    }
}

fn fmt_vec(values: &[f64]) -> String {
    values.iter().map(|v| format!("{v}")).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitStatistics;
    use crate::math::FeatureCross;

    fn summary(r_squared: f64) -> FitSummary {
        FitSummary {
            input: "data.csv".to_string(),
            observed_column: "y".to_string(),
            rows_read: 5,
            rows_skipped: 1,
            observations: 4,
            crosses: vec![FeatureCross::power(0, 2.0)],
            terms: vec![
                TermCoefficient { index: 0, term: "(intercept)".to_string(), coefficient: 1.0 },
                TermCoefficient { index: 1, term: "x0".to_string(), coefficient: 0.0 },
                TermCoefficient { index: 2, term: "x0^2".to_string(), coefficient: 2.0 },
            ],
            statistics: FitStatistics {
                variance_observed: 2.0,
                variance_predicted: 2.0,
                r_squared,
            },
            predictions: vec![Prediction { input: vec![3.0], predicted: 19.0 }],
        }
    }

    #[test]
    fn summary_lists_terms_and_predictions() {
        let text = format_run_summary(&summary(1.0));
        assert!(text.contains("Rows: read=5 | skipped=1 | fitted=4"));
        assert!(text.contains("Crosses: x0^2"));
        assert!(text.contains("  2  x0^2                 2.000000\n"), "{text}");
        assert!(text.contains("- R²                  : 1.000000"));
        assert!(text.contains("- [3] -> 19.000000"));
    }

    #[test]
    fn undefined_r_squared_is_spelled_out() {
        let text = format_run_summary(&summary(f64::NAN));
        assert!(text.contains("R²                  : undefined"));

        let json = format_summary_json(&summary(f64::NAN)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["statistics"]["r_squared"].is_null());
        assert_eq!(value["crosses"][0]["kind"], "power");
        assert_eq!(value["terms"][2]["term"], "x0^2");
    }
}
