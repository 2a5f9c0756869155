//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the fit pipeline or the sample generator
//! - prints reports/plots and writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, FitArgs, SampleArgs};
use crate::domain::{FitConfig, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable holding the log filter (e.g. `debug`, `regress=info`).
pub const LOG_ENV: &str = "REGRESS_LOG";

/// Entry point for the `regress` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is the normal case.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
    }
}

/// Log to stderr so stdout stays clean for reports and CSV.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore "already set" when embedded in a process that configured its own subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    let summary = crate::report::build_summary(&run)
        .ok_or_else(|| AppError::new(4, "Regression finished without a fitted model."))?;

    if config.json {
        println!("{}", crate::report::format_summary_json(&summary)?);
    } else {
        println!("{}", crate::report::format_run_summary(&summary));
    }

    if config.plot {
        let plot = crate::plot::render_fit_plot(run.regression.observations(), config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.regression, &run.variable_names)?;
        tracing::info!(path = %path.display(), "wrote per-observation results");
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    crate::data::sample::write_sample_output(&config)
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    if args.plot && (args.width == 0 || args.height == 0) {
        return Err(AppError::new(2, "Plot width and height must be positive."));
    }

    Ok(FitConfig {
        input: args.input.clone(),
        observed: args.observed.clone(),
        has_header: !args.no_header,
        crosses: args.crosses.clone(),
        predict: args.predict.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        json: args.json,
    })
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        rows: args.rows,
        intercept: args.intercept,
        coefficients: args.coefficients.clone(),
        noise: args.noise,
        seed: args.seed,
        x_min: args.min,
        x_max: args.max,
        output: args.output.clone(),
    }
}
