//! CSV ingest and table reshaping.
//!
//! This module is responsible for turning a numeric CSV into observation
//! records that are safe to fit.
//!
//! Design goals:
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (rows keep their file order)
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{ColumnRef, Observation};
use crate::error::{AppError, RegressionError};

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// A loaded numeric table: optional headers + rows that parsed cleanly.
#[derive(Debug, Clone)]
pub struct TableData {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl TableData {
    pub fn column_count(&self) -> usize {
        self.headers
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.rows.first().map(Vec::len))
            .unwrap_or(0)
    }

    /// Resolve a column reference to a zero-based position.
    pub fn resolve_column(&self, column: &ColumnRef) -> Result<usize, AppError> {
        let columns = self.column_count();
        match column {
            ColumnRef::Index(i) if *i < columns => Ok(*i),
            ColumnRef::Index(i) => Err(AppError::new(
                2,
                format!("Column {i} is out of range: the table has {columns} columns."),
            )),
            ColumnRef::Name(name) => {
                let headers = self.headers.as_ref().ok_or_else(|| {
                    AppError::new(2, format!("Column `{name}` requested by name, but the CSV has no header row."))
                })?;
                let wanted = normalize_header_name(name);
                headers
                    .iter()
                    .position(|h| *h == wanted)
                    .ok_or_else(|| AppError::new(2, format!("Missing column: `{name}`")))
            }
        }
    }

    /// Names of the variable columns once `observed_index` is removed.
    ///
    /// Falls back to `x0, x1, ...` when the CSV has no header.
    pub fn variable_names(&self, observed_index: usize) -> Vec<String> {
        match &self.headers {
            Some(headers) => headers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != observed_index)
                .map(|(_, h)| h.clone())
                .collect(),
            None => (0..self.column_count().saturating_sub(1))
                .map(|i| format!("x{i}"))
                .collect(),
        }
    }
}

/// Reshape a row-major table into observations.
///
/// `row[observed_index]` becomes the observed value; the remaining columns,
/// in their original order, become the variables. All rows must have the
/// width of the first row.
pub fn make_observations(rows: &[Vec<f64>], observed_index: usize) -> Result<Vec<Observation>, RegressionError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let width = first.len();
    if observed_index >= width {
        return Err(RegressionError::ObservedColumnOutOfRange {
            index: observed_index,
            columns: width,
        });
    }

    rows.iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() != width {
                return Err(RegressionError::RaggedTable {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            let variables: Vec<f64> = values[..observed_index]
                .iter()
                .chain(&values[observed_index + 1..])
                .copied()
                .collect();
            Ok(Observation::new(values[observed_index], variables))
        })
        .collect()
}

/// Load a numeric CSV file.
pub fn load_table(path: &Path, has_header: bool) -> Result<TableData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    load_table_from_reader(file, has_header)
}

/// Load a numeric CSV from any reader.
///
/// Rows that fail to parse, or whose width differs from the table's, are
/// skipped and reported in `row_errors`.
pub fn load_table_from_reader<R: Read>(reader: R, has_header: bool) -> Result<TableData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = if has_header {
        let record = reader
            .headers()
            .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?;
        Some(record.iter().map(normalize_header_name).collect::<Vec<_>>())
    } else {
        None
    };

    let mut width = headers.as_ref().map(Vec::len);
    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() is 0-based; lines are 1-based and the header takes line 1.
        let line = idx + if has_header { 2 } else { 1 };
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record));

        match parsed {
            Ok(values) if values.is_empty() => {}
            Ok(values) => match width {
                Some(w) if values.len() != w => row_errors.push(RowError {
                    line,
                    message: format!("Expected {w} columns, found {}.", values.len()),
                }),
                _ => {
                    width = Some(values.len());
                    rows.push(values);
                }
            },
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        tracing::warn!(line = err.line, "skipping row: {}", err.message);
    }

    if rows.is_empty() {
        return Err(AppError::new(3, "No valid rows in CSV."));
    }

    Ok(TableData {
        headers,
        rows,
        row_errors,
        rows_read,
    })
}

fn parse_row(record: &StringRecord) -> Result<Vec<f64>, String> {
    if record.iter().all(str::is_empty) {
        return Ok(Vec::new());
    }
    record
        .iter()
        .enumerate()
        .map(|(col, field)| {
            let value: f64 = field
                .parse()
                .map_err(|_| format!("Column {col}: `{field}` is not a number."))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(format!("Column {col}: `{field}` is not finite."))
            }
        })
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, lookups by name fail.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_first_column() {
        let table = vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![2.0, 2.0, 3.0, 4.0],
            vec![3.0, 2.0, 3.0, 4.0],
        ];
        let obs = make_observations(&table, 0).unwrap();
        assert_eq!(obs.len(), 3);
        for (i, o) in obs.iter().enumerate() {
            assert_eq!(o.variables, vec![2.0, 3.0, 4.0]);
            assert_eq!(o.observed, (i + 1) as f64);
            assert!(o.crosses.is_empty());
        }
    }

    #[test]
    fn observed_interior_and_last_column() {
        let table = vec![vec![1.0, 2.0, 3.0, 4.0]; 3];

        for o in make_observations(&table, 1).unwrap() {
            assert_eq!(o.variables, vec![1.0, 3.0, 4.0]);
            assert_eq!(o.observed, 2.0);
        }
        for o in make_observations(&table, 2).unwrap() {
            assert_eq!(o.variables, vec![1.0, 2.0, 4.0]);
            assert_eq!(o.observed, 3.0);
        }
        for o in make_observations(&table, 3).unwrap() {
            assert_eq!(o.variables, vec![1.0, 2.0, 3.0]);
            assert_eq!(o.observed, 4.0);
        }
    }

    #[test]
    fn reshape_rejects_bad_tables() {
        let table = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            make_observations(&table, 0).unwrap_err(),
            RegressionError::RaggedTable { row: 1, expected: 2, found: 1 }
        );
        assert_eq!(
            make_observations(&table, 2).unwrap_err(),
            RegressionError::ObservedColumnOutOfRange { index: 2, columns: 2 }
        );
        assert!(make_observations(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn loads_csv_with_header_and_reports_bad_rows() {
        let csv = "\u{feff}Y, x0 ,x1\n1,2,3\n4,oops,6\n7,8\n9,10,11\n";
        let table = load_table_from_reader(csv.as_bytes(), true).unwrap();

        assert_eq!(table.headers, Some(vec!["y".to_string(), "x0".to_string(), "x1".to_string()]));
        assert_eq!(table.rows, vec![vec![1.0, 2.0, 3.0], vec![9.0, 10.0, 11.0]]);
        assert_eq!(table.rows_read, 4);
        assert_eq!(table.row_errors.len(), 2);
        assert_eq!(table.row_errors[0].line, 3);
        assert_eq!(table.row_errors[1].line, 4);
    }

    #[test]
    fn loads_csv_without_header() {
        let csv = "1,2\n3,4\n5,6\n";
        let table = load_table_from_reader(csv.as_bytes(), false).unwrap();
        assert_eq!(table.headers, None);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.variable_names(1), vec!["x0".to_string()]);
    }

    #[test]
    fn empty_csv_is_an_error() {
        let err = load_table_from_reader("a,b\n".as_bytes(), true).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn resolves_columns_by_name_or_index() {
        let csv = "price,rooms,age\n1,2,3\n";
        let table = load_table_from_reader(csv.as_bytes(), true).unwrap();

        assert_eq!(table.resolve_column(&ColumnRef::Name("Rooms".to_string())).unwrap(), 1);
        assert_eq!(table.resolve_column(&ColumnRef::Index(2)).unwrap(), 2);
        assert_eq!(table.resolve_column(&ColumnRef::Index(3)).unwrap_err().exit_code(), 2);
        assert!(table.resolve_column(&ColumnRef::Name("size".to_string())).is_err());
        assert_eq!(table.variable_names(1), vec!["price".to_string(), "age".to_string()]);
    }
}
