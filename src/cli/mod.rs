//! Command-line parsing for the `regress` OLS tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{ColumnRef, FeatureVector};
use crate::math::FeatureCross;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "regress", version, about = "Multivariable OLS regression with feature crosses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a linear model to a numeric CSV and print coefficients and fit quality.
    Fit(FitArgs),
    /// Generate a synthetic linear dataset as CSV.
    Sample(SampleArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Numeric CSV with one observation per row.
    #[arg(short, long, env = "REGRESS_INPUT", value_name = "CSV")]
    pub input: PathBuf,

    /// Observed (target) column: zero-based index or header name.
    #[arg(short, long, env = "REGRESS_OBSERVED", default_value = "0")]
    pub observed: ColumnRef,

    /// Treat the first CSV line as data rather than a header.
    #[arg(long)]
    pub no_header: bool,

    /// Feature cross, applied in the order given: `pow:I:P` or `product:I,J,...`.
    ///
    /// Indices refer to variables (columns left after removing the observed column).
    #[arg(short = 'x', long = "cross", value_name = "CROSS")]
    pub crosses: Vec<FeatureCross>,

    /// Variables to predict after fitting, comma separated (repeatable).
    #[arg(short, long, value_name = "V1,V2,...", allow_hyphen_values = true)]
    pub predict: Vec<FeatureVector>,

    /// Render an observed-vs-predicted ASCII plot.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-observation results (predicted, residual, crosses) to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Number of rows to generate.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub rows: usize,

    /// Intercept of the generating relation.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub intercept: f64,

    /// Coefficient for each variable (repeatable; one variable per flag).
    #[arg(short, long = "coef", value_name = "B", allow_hyphen_values = true, required = true)]
    pub coefficients: Vec<f64>,

    /// Standard deviation of Gaussian noise added to the target.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, env = "REGRESS_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Lower bound for generated variables.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub min: f64,

    /// Upper bound for generated variables.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub max: f64,

    /// Write to this file instead of stdout.
    #[arg(short = 'O', long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_fit_with_crosses_in_order() {
        let cli = Cli::try_parse_from([
            "regress", "fit", "-i", "data.csv", "--observed", "price", "--cross", "pow:0:2", "-x",
            "product:0,1", "--predict", "1,2", "--predict", "-3,4",
        ])
        .unwrap();

        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.observed, ColumnRef::Name("price".to_string()));
        assert_eq!(args.crosses, vec![FeatureCross::power(0, 2.0), FeatureCross::product([0, 1])]);
        assert_eq!(args.predict, vec![FeatureVector(vec![1.0, 2.0]), FeatureVector(vec![-3.0, 4.0])]);
        assert!(!args.no_header);
    }

    #[test]
    fn rejects_malformed_cross() {
        let result = Cli::try_parse_from(["regress", "fit", "-i", "d.csv", "--cross", "pow:zero:2"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_sample() {
        let cli = Cli::try_parse_from([
            "regress", "sample", "-n", "10", "--intercept", "-1", "-c", "2", "-c", "-0.5", "--seed", "3",
        ])
        .unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.rows, 10);
        assert_eq!(args.intercept, -1.0);
        assert_eq!(args.coefficients, vec![2.0, -0.5]);
        assert_eq!(args.seed, 3);
    }
}
