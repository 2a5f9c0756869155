//! The "fit pipeline": CSV table -> observations -> regression -> predictions.
//!
//! Keeping this separate from `app` lets the whole workflow be exercised in
//! tests without touching argv or stdout.

use crate::domain::FitConfig;
use crate::error::AppError;
use crate::fit::Regression;
use crate::io::ingest::{TableData, load_table, make_observations};
use crate::report::Prediction;

/// All computed outputs of a single `regress fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: String,
    pub table: TableData,
    pub observed_index: usize,
    pub observed_name: String,
    pub variable_names: Vec<String>,
    pub regression: Regression,
    pub predictions: Vec<Prediction>,
}

/// Execute the full fitting pipeline for a CSV on disk.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let table = load_table(&config.input, config.has_header)?;
    run_fit_with_table(config, table)
}

/// Execute the fitting pipeline on an already-loaded table.
pub fn run_fit_with_table(config: &FitConfig, table: TableData) -> Result<RunOutput, AppError> {
    let observed_index = table.resolve_column(&config.observed)?;
    let observed_name = match &table.headers {
        Some(headers) => headers[observed_index].clone(),
        None => format!("column {observed_index}"),
    };
    let variable_names = table.variable_names(observed_index);

    let mut regression = Regression::new();
    regression.train(make_observations(&table.rows, observed_index)?);
    for cross in &config.crosses {
        regression.add_cross(cross.clone());
    }
    regression.fit()?;

    let predictions = config
        .predict
        .iter()
        .map(|input| {
            Ok(Prediction {
                input: input.0.clone(),
                predicted: regression.predict(&input.0)?,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(RunOutput {
        input: config.input.display().to_string(),
        table,
        observed_index,
        observed_name,
        variable_names,
        regression,
        predictions,
    })
}
