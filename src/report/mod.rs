//! Reporting utilities: run summaries and formatted terminal output.

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::FitStatistics;
use crate::math::FeatureCross;

pub mod format;

pub use format::*;

/// One fitted term with its human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermCoefficient {
    pub index: usize,
    pub term: String,
    pub coefficient: f64,
}

/// A prediction requested on the command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub input: Vec<f64>,
    pub predicted: f64,
}

/// Everything printed after a fit, in one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub input: String,
    pub observed_column: String,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub observations: usize,
    pub crosses: Vec<FeatureCross>,
    pub terms: Vec<TermCoefficient>,
    pub statistics: FitStatistics,
    pub predictions: Vec<Prediction>,
}

/// Labels for every model term: intercept, variables, then cross values.
pub fn term_labels(variable_names: &[String], crosses: &[FeatureCross]) -> Vec<String> {
    std::iter::once("(intercept)".to_string())
        .chain(variable_names.iter().cloned())
        .chain(crosses.iter().map(|c| c.label(variable_names)))
        .collect()
}

/// Pair fitted coefficients with their labels.
pub fn coefficient_table(coefficients: &[f64], labels: &[String]) -> Vec<TermCoefficient> {
    coefficients
        .iter()
        .enumerate()
        .map(|(index, &coefficient)| TermCoefficient {
            index,
            term: labels.get(index).cloned().unwrap_or_else(|| format!("term{index}")),
            coefficient,
        })
        .collect()
}

/// Build the summary for a completed run.
pub fn build_summary(run: &RunOutput) -> Option<FitSummary> {
    let model = run.regression.fitted()?;
    let labels = term_labels(&run.variable_names, run.regression.crosses());

    Some(FitSummary {
        input: run.input.clone(),
        observed_column: run.observed_name.clone(),
        rows_read: run.table.rows_read,
        rows_skipped: run.table.row_errors.len(),
        observations: model.observations,
        crosses: run.regression.crosses().to_vec(),
        terms: coefficient_table(&model.coefficients, &labels),
        statistics: model.statistics,
        predictions: run.predictions.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_design_matrix_columns() {
        let names = vec!["rooms".to_string(), "age".to_string()];
        let crosses = vec![FeatureCross::power(1, 2.0), FeatureCross::product([0, 1])];
        assert_eq!(
            term_labels(&names, &crosses),
            vec!["(intercept)", "rooms", "age", "age^2", "rooms*age"]
        );
    }

    #[test]
    fn coefficient_table_pairs_labels() {
        let labels = vec!["(intercept)".to_string(), "x0".to_string()];
        let table = coefficient_table(&[1.5, -2.0, 3.0], &labels);
        assert_eq!(table.len(), 3);
        assert_eq!(table[1].term, "x0");
        assert_eq!(table[1].coefficient, -2.0);
        assert_eq!(table[2].term, "term2");
    }
}
