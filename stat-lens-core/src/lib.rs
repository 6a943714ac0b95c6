pub mod batch;
pub mod export;
pub mod histogram;
pub mod parse;
pub mod record;
pub mod render;
pub mod stats;

pub use batch::{profile_columns, ColumnReport};
pub use export::{export_csv, export_json, format_float, print_summary, summary_lines, write_png};
pub use histogram::{build_histogram, sturges_bins, sturges_histogram, HistogramBin};
pub use parse::{parse, parse_csv_column, read_csv_file, read_csv_str, CsvTable};
pub use record::{compute, compute_with, StatisticsRecord};
pub use render::{to_data_uri, HistogramRenderer, PngHistogramRenderer};
pub use stat_lens_common::{Result, StatLensError};
pub use stats::{
    confidence_interval, confidence_intervals, mean, std_dev, variance, z_critical,
    ConfidenceInterval, ConfidenceLevel, Summary,
};
