use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::parse::CsvTable;
use crate::record::{compute_with, StatisticsRecord};
use crate::render::HistogramRenderer;

/// Outcome for one column of a batch run. Failures carry the user-facing
/// message instead of aborting the batch.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub column: String,
    pub outcome: Result<StatisticsRecord, String>,
}

/// Compute a record for each requested column (all header columns when
/// `columns` is `None`), in parallel. Reports come back in request order.
pub fn profile_columns(
    table: &CsvTable,
    columns: Option<&[String]>,
    renderer: &dyn HistogramRenderer,
) -> Vec<ColumnReport> {
    let wanted: Vec<String> = columns.map(|c| c.to_vec()).unwrap_or_else(|| table.header.clone());
    wanted
        .par_iter()
        .map(|column| {
            let outcome = table
                .column(column)
                .and_then(|data| compute_with(&data, renderer))
                .map_err(|e| {
                    warn!(column = column.as_str(), error = %e, "column skipped");
                    e.to_string()
                });
            ColumnReport { column: column.clone(), outcome }
        })
        .collect()
}
