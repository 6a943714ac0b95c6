use std::path::Path;

use stat_lens_common::{Result, StatLensError};

use crate::batch::ColumnReport;
use crate::record::StatisticsRecord;
use crate::render::from_data_uri;
use crate::stats::ConfidenceLevel;

/// Four decimal places, the precision results are shown with.
pub fn format_float(value: f64) -> String {
    format!("{value:.4}")
}

fn fmt(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Aligned `label value` lines for headless output.
pub fn summary_lines(record: &StatisticsRecord, decimals: usize) -> Vec<String> {
    let mut lines = vec![
        format!("{:<12} {}", "Count:", record.count()),
        format!("{:<12} {}", "Mean:", fmt(record.mean(), decimals)),
        format!("{:<12} {}", "Variance:", fmt(record.variance(), decimals)),
        format!("{:<12} {}", "Std dev:", fmt(record.std_dev(), decimals)),
    ];
    for level in ConfidenceLevel::ALL {
        let ci = record.interval(level);
        lines.push(format!(
            "{:<12} ({}, {})",
            format!("{}:", level.label()),
            fmt(ci.lower, decimals),
            fmt(ci.upper, decimals)
        ));
    }
    lines
}

pub fn print_summary(record: &StatisticsRecord, decimals: usize) {
    for line in summary_lines(record, decimals) {
        println!("{line}");
    }
}

/// Pretty JSON of the record. With `include_image == false` the data URI
/// is left out, which keeps the file readable.
pub fn export_json(
    output_path: &Path,
    record: &StatisticsRecord,
    include_image: bool,
) -> Result<()> {
    let mut doc =
        serde_json::to_value(record).map_err(|e| StatLensError::Other(e.to_string()))?;
    if !include_image {
        if let Some(obj) = doc.as_object_mut() {
            obj.remove("histogram");
        }
    }
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, &doc)
        .map_err(|e| StatLensError::Other(e.to_string()))?;
    Ok(())
}

const CSV_HEADER: [&str; 12] = [
    "column",
    "count",
    "mean",
    "variance",
    "std_dev",
    "ci90_lower",
    "ci90_upper",
    "ci95_lower",
    "ci95_upper",
    "ci99_lower",
    "ci99_upper",
    "error",
];

/// One summary row per column report; failed columns keep their message.
pub fn export_csv(output_path: &Path, reports: &[ColumnReport]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(output_path).map_err(|e| StatLensError::Other(e.to_string()))?;
    writer.write_record(CSV_HEADER).map_err(|e| StatLensError::Other(e.to_string()))?;
    for report in reports {
        let row: Vec<String> = match &report.outcome {
            Ok(rec) => {
                let mut row = vec![report.column.clone(), rec.count().to_string()];
                row.extend([rec.mean(), rec.variance(), rec.std_dev()].map(format_float));
                for level in ConfidenceLevel::ALL {
                    let ci = rec.interval(level);
                    row.push(format_float(ci.lower));
                    row.push(format_float(ci.upper));
                }
                row.push(String::new());
                row
            }
            Err(msg) => {
                let mut row = vec![report.column.clone()];
                row.extend(std::iter::repeat(String::new()).take(CSV_HEADER.len() - 2));
                row.push(msg.clone());
                row
            }
        };
        writer.write_record(&row).map_err(|e| StatLensError::Other(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Decode the record's embedded PNG and write it to disk.
pub fn write_png(output_path: &Path, record: &StatisticsRecord) -> Result<()> {
    let bytes = from_data_uri(record.histogram())?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::compute_with;
    use crate::render::HistogramRenderer;

    struct Stub;

    impl HistogramRenderer for Stub {
        fn render(&self, _data: &[f64]) -> Result<Vec<u8>> {
            Ok(b"png".to_vec())
        }
    }

    fn record(data: &[f64]) -> StatisticsRecord {
        compute_with(data, &Stub).unwrap()
    }

    #[test]
    fn four_decimals() {
        assert_eq!(format_float(2.0), "2.0000");
        assert_eq!(format_float(1.0 / 3.0), "0.3333");
        assert_eq!(format_float(1234.56789), "1234.5679");
    }

    #[test]
    fn summary_has_every_field() {
        let lines = summary_lines(&record(&[1.0, 2.0, 3.0]), 2);
        assert_eq!(lines.len(), 7);
        assert!(lines[1].ends_with("2.00"));
        assert!(lines[4].starts_with("90% CI:"));
        assert!(lines[6].starts_with("99% CI:"));
    }

    #[test]
    fn json_without_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        export_json(&path, &record(&[1.0, 2.0]), false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(v.get("histogram").is_none());
        assert_eq!(v["mean"], serde_json::json!(1.5));
    }

    #[test]
    fn csv_rows_for_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let reports = vec![
            ColumnReport { column: "a,b".into(), outcome: Ok(record(&[1.0, 2.0, 3.0])) },
            ColumnReport {
                column: "name".into(),
                outcome: Err("No valid numeric data found in column \"name\".".into()),
            },
        ];
        export_csv(&path, &reports).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"a,b\",3,2.0000,1.0000,1.0000,"));
        assert!(lines[2].starts_with("name,,,"));
        assert!(lines[2].ends_with("\"No valid numeric data found in column \"\"name\"\".\""));
    }

    #[test]
    fn csv_quotes_carriage_returns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let reports = vec![
            ColumnReport { column: "a\rb".into(), outcome: Ok(record(&[1.0, 2.0])) },
            ColumnReport { column: "c".into(), outcome: Err("bad".into()) },
        ];
        export_csv(&path, &reports).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "a\rb");
        assert_eq!(rows[0].len(), CSV_HEADER.len());
        assert_eq!(&rows[1][11], "bad");
    }

    #[test]
    fn png_written_from_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.png");
        write_png(&path, &record(&[1.0])).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
    }
}
