pub mod config;
pub use config::{Config, DisplayConfig, ExportConfig, RenderConfig};

use thiserror::Error;

/// Every failure the engine can report. Each variant maps to one
/// user-facing message; none of them are fatal to the caller.
#[derive(Error, Debug)]
pub enum StatLensError {
    #[error("Please enter valid comma-separated numbers (bad value: {token:?}).")]
    Parse { token: String },
    #[error("Please enter valid comma-separated numbers.")]
    EmptyInput,
    #[error("Please specify a column name.")]
    MissingColumnName,
    #[error("Column \"{column}\" not found in the CSV file.")]
    ColumnNotFound { column: String },
    #[error("No valid numeric data found in column \"{column}\".")]
    NoNumericData { column: String },
    #[error("Please upload a CSV file ({path}).")]
    FileFormat { path: String },
    #[error("Error processing CSV file: {0}")]
    FileRead(String),
    #[error("Histogram rendering failed: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StatLensError>;
