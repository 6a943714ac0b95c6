//! Turning raw input into observation sequences.
//!
//! Manual text is strict: one bad token rejects the whole input.
//! CSV columns are lenient per row: unusable cells are skipped, and only a
//! missing column or a column with nothing numeric in it is an error.

use serde::Serialize;
use stat_lens_common::{Result, StatLensError};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// A decoded CSV file: the header row plus one map per data row.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl CsvTable {
    pub fn column(&self, column: &str) -> Result<Vec<f64>> {
        parse_csv_column(&self.rows, &self.header, column)
    }
}

fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a comma-separated list of numbers.
///
/// Empty tokens (`"1,,2"`, trailing commas) are dropped. An input with no
/// tokens at all parses to an empty sequence.
pub fn parse(text: &str) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match parse_value(token) {
            Some(v) => data.push(v),
            None => {
                return Err(StatLensError::Parse {
                    token: token.to_string(),
                })
            }
        }
    }
    debug!(count = data.len(), "parsed manual input");
    Ok(data)
}

/// Extract one numeric column from already-decoded CSV rows.
pub fn parse_csv_column<'a, I>(rows: I, header: &[String], column: &str) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = &'a HashMap<String, String>>,
{
    let column = column.trim();
    if column.is_empty() {
        return Err(StatLensError::MissingColumnName);
    }
    if !header.iter().any(|h| h == column) {
        return Err(StatLensError::ColumnNotFound {
            column: column.to_string(),
        });
    }
    let mut data = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let value = row
            .get(column)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .and_then(parse_value);
        match value {
            Some(v) => data.push(v),
            None => skipped += 1,
        }
    }
    debug!(column, kept = data.len(), skipped, "extracted csv column");
    if data.is_empty() {
        return Err(StatLensError::NoNumericData {
            column: column.to_string(),
        });
    }
    Ok(data)
}

/// Decode CSV text with a header row into a [`CsvTable`].
pub fn read_csv_str(text: &str) -> Result<CsvTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let header: Vec<String> = rdr
        .headers()
        .map_err(|e| StatLensError::FileRead(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| StatLensError::FileRead(e.to_string()))?;
        // short rows just lack trailing keys; extra cells have no header and are dropped
        let row: HashMap<String, String> = header
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(CsvTable { header, rows })
}

/// Load a `.csv` file from disk.
pub fn read_csv_file(path: &Path) -> Result<CsvTable> {
    let display = path.display().to_string();
    let is_csv = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".csv"))
        .unwrap_or(false);
    if !is_csv || !path.is_file() {
        return Err(StatLensError::FileFormat { path: display });
    }
    let bytes = std::fs::read(path).map_err(|e| StatLensError::FileRead(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| StatLensError::FileRead(e.to_string()))?;
    read_csv_str(&text)
}
