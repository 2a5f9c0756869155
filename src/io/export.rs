//! Export per-observation results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::fit::Regression;

/// Write per-observation results to a CSV file.
pub fn write_results_csv(path: &Path, regression: &Regression, variable_names: &[String]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_results(&mut out, regression, variable_names)?;
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))
}

/// Write per-observation results as CSV to any writer.
///
/// Columns: `row,observed,predicted,residual`, then the raw variables, then
/// the cached cross values (labelled like the report).
pub fn write_results<W: Write>(out: &mut W, regression: &Regression, variable_names: &[String]) -> Result<(), AppError> {
    let mut header = vec![
        "row".to_string(),
        "observed".to_string(),
        "predicted".to_string(),
        "residual".to_string(),
    ];
    let variable_count = regression
        .observations()
        .first()
        .map_or(variable_names.len(), |o| o.variables.len());
    header.extend((0..variable_count).map(|i| {
        variable_names
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("x{i}"))
    }));
    header.extend(regression.crosses().iter().map(|c| c.label(variable_names)));

    writeln!(out, "{}", header.join(","))
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (i, obs) in regression.observations().iter().enumerate() {
        let mut fields = vec![
            i.to_string(),
            format!("{:.10}", obs.observed),
            format!("{:.10}", obs.predicted),
            format!("{:.10}", obs.residual),
        ];
        fields.extend(obs.variables.iter().map(|v| format!("{v:.10}")));
        fields.extend(obs.crosses.iter().map(|v| format!("{v:.10}")));

        writeln!(out, "{}", fields.join(","))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use crate::math::FeatureCross;

    #[test]
    fn export_includes_variables_and_crosses() {
        let mut reg = Regression::new();
        reg.train([
            Observation::new(1.0, [0.0]),
            Observation::new(3.0, [1.0]),
            Observation::new(9.0, [2.0]),
            Observation::new(19.0, [3.0]),
        ]);
        reg.add_cross(FeatureCross::power(0, 2.0));
        reg.fit().unwrap();

        let mut buf = Vec::new();
        write_results(&mut buf, &reg, &["rooms".to_string()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "row,observed,predicted,residual,rooms,rooms^2");
        let last: Vec<&str> = lines[4].split(',').collect();
        assert_eq!(last[0], "3");
        assert_eq!(last[1], "19.0000000000");
        assert_eq!(last[4], "3.0000000000");
        assert_eq!(last[5], "9.0000000000");
    }
}
