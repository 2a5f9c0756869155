//! Synthetic linear dataset generation.
//!
//! Rows follow `y = intercept + Σ coef_i · x_i + noise · z`, with each `x_i`
//! drawn uniformly from `[x_min, x_max]` and `z ~ N(0, 1)`. The observed value
//! is the first column.

use std::fs::File;
use std::io::{BufWriter, Write};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::SampleConfig;
use crate::error::AppError;

/// Generate a row-major table with the observed value in column 0.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Vec<f64>>, AppError> {
    if config.rows == 0 {
        return Err(AppError::new(2, "Row count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid variable range for sample generation."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, "Noise must be a finite, non-negative standard deviation."));
    }
    if !config.intercept.is_finite() || config.coefficients.iter().any(|c| !c.is_finite()) {
        return Err(AppError::new(2, "Coefficients must be finite."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut rows = Vec::with_capacity(config.rows);
    for _ in 0..config.rows {
        let xs: Vec<f64> = config
            .coefficients
            .iter()
            .map(|_| rng.gen_range(config.x_min..=config.x_max))
            .collect();

        let signal = config.intercept
            + config
                .coefficients
                .iter()
                .zip(&xs)
                .map(|(c, x)| c * x)
                .sum::<f64>();
        let y = signal + config.noise * normal.sample(&mut rng);

        let mut row = Vec::with_capacity(xs.len() + 1);
        row.push(y);
        row.extend(xs);
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), seed = config.seed, "generated synthetic sample");
    Ok(rows)
}

/// Write a generated table as CSV with header `y,x0,x1,...`.
pub fn write_sample<W: Write>(out: &mut W, rows: &[Vec<f64>]) -> Result<(), AppError> {
    let width = rows.first().map_or(1, Vec::len);
    let mut header = vec!["y".to_string()];
    header.extend((0..width.saturating_sub(1)).map(|i| format!("x{i}")));

    writeln!(out, "{}", header.join(","))
        .map_err(|e| AppError::new(2, format!("Failed to write sample header: {e}")))?;
    for row in rows {
        let line = row.iter().map(|v| format!("{v}")).collect::<Vec<_>>().join(",");
        writeln!(out, "{line}").map_err(|e| AppError::new(2, format!("Failed to write sample row: {e}")))?;
    }
    Ok(())
}

/// Generate a sample and write it to `config.output` (or stdout).
pub fn write_sample_output(config: &SampleConfig) -> Result<(), AppError> {
    let rows = generate_sample(config)?;
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
            let mut out = BufWriter::new(file);
            write_sample(&mut out, &rows)?;
            out.flush()
                .map_err(|e| AppError::new(2, format!("Failed to write sample CSV: {e}")))
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_sample(&mut out, &rows)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::Regression;
    use crate::io::ingest::{load_table_from_reader, make_observations};
    use approx::assert_abs_diff_eq;

    fn config(noise: f64) -> SampleConfig {
        SampleConfig {
            rows: 40,
            intercept: 5.0,
            coefficients: vec![2.0, -1.5],
            noise,
            seed: 7,
            x_min: -10.0,
            x_max: 10.0,
            output: None,
        }
    }

    #[test]
    fn same_seed_same_sample() {
        let a = generate_sample(&config(1.0)).unwrap();
        let b = generate_sample(&config(1.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.iter().all(|r| r.len() == 3));
        assert!(a.iter().flat_map(|r| &r[1..]).all(|x| (-10.0..=10.0).contains(x)));
    }

    #[test]
    fn noise_free_sample_is_recovered_by_the_fit() {
        let rows = generate_sample(&config(0.0)).unwrap();
        let mut reg = Regression::new();
        reg.train(make_observations(&rows, 0).unwrap());
        let model = reg.fit().unwrap();

        for (got, want) in model.coefficients.iter().zip([5.0, 2.0, -1.5]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-8);
        }
    }

    #[test]
    fn written_sample_reads_back() {
        let rows = generate_sample(&config(0.5)).unwrap();
        let mut buf = Vec::new();
        write_sample(&mut buf, &rows).unwrap();

        let table = load_table_from_reader(buf.as_slice(), true).unwrap();
        assert_eq!(table.headers, Some(vec!["y".to_string(), "x0".to_string(), "x1".to_string()]));
        assert_eq!(table.rows, rows);
    }

    #[test]
    fn rejects_bad_settings() {
        let mut bad = config(0.0);
        bad.rows = 0;
        assert_eq!(generate_sample(&bad).unwrap_err().exit_code(), 2);

        let mut bad = config(-1.0);
        bad.rows = 3;
        assert!(generate_sample(&bad).is_err());

        let mut bad = config(0.0);
        bad.x_max = bad.x_min;
        assert!(generate_sample(&bad).is_err());
    }
}
