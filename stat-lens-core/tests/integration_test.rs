use stat_lens_core::{
    compute, compute_with, parse, profile_columns, read_csv_file, render::DATA_URI_PREFIX,
    to_data_uri, PngHistogramRenderer, StatLensError,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    tmp.write_all(contents.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

fn renderer() -> PngHistogramRenderer {
    PngHistogramRenderer::default()
}

#[test]
fn manual_text_to_record() {
    let data = parse("1, 2, 3").unwrap();
    let rec = compute_with(&data, &renderer()).unwrap();
    assert_eq!(rec.count(), 3);
    assert_eq!(rec.mean(), 2.0);
    assert_eq!(rec.variance(), 1.0);
    assert_eq!(rec.std_dev(), 1.0);
    assert!(rec.histogram().starts_with(DATA_URI_PREFIX));
}

#[test]
fn overflowing_spread_still_produces_a_record() {
    let data = parse("1e200, -1e200").unwrap();
    let rec = compute_with(&data, &renderer()).unwrap();
    assert_eq!(rec.mean(), 0.0);
    assert!(rec.variance().is_infinite());
    assert!(rec.histogram().starts_with(DATA_URI_PREFIX));
}

#[test]
fn blank_manual_text_is_empty_input() {
    let data = parse(" , ").unwrap();
    assert!(matches!(compute(&data), Err(StatLensError::EmptyInput)));
}

#[test]
fn csv_file_to_record() {
    let tmp = write_fixture("x,y\n1,foo\nbad,2\n3,4\n");
    let table = read_csv_file(tmp.path()).unwrap();
    let data = table.column("x").unwrap();
    assert_eq!(data, vec![1.0, 3.0]);
    let rec = compute_with(&data, &renderer()).unwrap();
    assert_eq!(rec.mean(), 2.0);
    assert!(rec.ci_95().contains(2.0));
}

#[test]
fn csv_file_missing_column() {
    let tmp = write_fixture("x,y\n1,2\n");
    let table = read_csv_file(tmp.path()).unwrap();
    assert!(matches!(table.column("z"), Err(StatLensError::ColumnNotFound { .. })));
}

#[test]
fn compute_is_repeatable() {
    let data = parse("4.2, 3.9, 5.1, 4.8, 4.4, 3.7, 5.0, 4.6").unwrap();
    let a = compute(&data).unwrap();
    let b = compute(&data).unwrap();
    assert_eq!(a.mean().to_bits(), b.mean().to_bits());
    assert_eq!(a.variance().to_bits(), b.variance().to_bits());
    assert_eq!(a.std_dev().to_bits(), b.std_dev().to_bits());
    assert_eq!(a.ci_90(), b.ci_90());
    assert_eq!(a.ci_99(), b.ci_99());
    assert_eq!(a.histogram(), b.histogram());
}

#[test]
fn batch_over_file() {
    let tmp = write_fixture("a,b,label\n1,2,p\n3,4,q\n5,,r\n");
    let table = read_csv_file(tmp.path()).unwrap();
    let reports = profile_columns(&table, None, &renderer());
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].outcome.as_ref().unwrap().mean(), 3.0);
    assert_eq!(reports[1].outcome.as_ref().unwrap().count(), 2);
    assert!(reports[2].outcome.is_err());
}

#[test]
fn data_uri_prefix() {
    assert_eq!(to_data_uri(&[]), DATA_URI_PREFIX);
}
