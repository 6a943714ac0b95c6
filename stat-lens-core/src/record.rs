use serde::Serialize;
use stat_lens_common::{Result, StatLensError};
use tracing::info;

use crate::histogram::{sturges_histogram, HistogramBin};
use crate::render::{to_data_uri, HistogramRenderer, PngHistogramRenderer};
use crate::stats::{ConfidenceInterval, ConfidenceLevel, Summary};

/// The full result for one sequence. Built once by [`compute`] and never
/// modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsRecord {
    data: Vec<f64>,
    count: usize,
    mean: f64,
    variance: f64,
    std_dev: f64,
    ci_90: ConfidenceInterval,
    ci_95: ConfidenceInterval,
    ci_99: ConfidenceInterval,
    bins: Vec<HistogramBin>,
    histogram: String,
}

impl StatisticsRecord {
    pub fn data(&self) -> &[f64] {
        &self.data
    }
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn mean(&self) -> f64 {
        self.mean
    }
    pub fn variance(&self) -> f64 {
        self.variance
    }
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
    pub fn ci_90(&self) -> ConfidenceInterval {
        self.ci_90
    }
    pub fn ci_95(&self) -> ConfidenceInterval {
        self.ci_95
    }
    pub fn ci_99(&self) -> ConfidenceInterval {
        self.ci_99
    }
    pub fn interval(&self, level: ConfidenceLevel) -> ConfidenceInterval {
        match level {
            ConfidenceLevel::P90 => self.ci_90,
            ConfidenceLevel::P95 => self.ci_95,
            ConfidenceLevel::P99 => self.ci_99,
        }
    }
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }
    /// PNG as a `data:image/png;base64,` URI.
    pub fn histogram(&self) -> &str {
        &self.histogram
    }
}

/// Statistics and chart for `data` with the default PNG renderer.
pub fn compute(data: &[f64]) -> Result<StatisticsRecord> {
    compute_with(data, &PngHistogramRenderer::default())
}

pub fn compute_with(data: &[f64], renderer: &dyn HistogramRenderer) -> Result<StatisticsRecord> {
    if data.is_empty() {
        return Err(StatLensError::EmptyInput);
    }
    let summary = Summary::of(data);
    let png = renderer.render(data)?;
    info!(
        count = summary.count,
        mean = summary.mean,
        std_dev = summary.std_dev,
        "computed statistics"
    );
    Ok(StatisticsRecord {
        data: data.to_vec(),
        count: summary.count,
        mean: summary.mean,
        variance: summary.variance,
        std_dev: summary.std_dev,
        ci_90: summary.ci_90,
        ci_95: summary.ci_95,
        ci_99: summary.ci_99,
        bins: sturges_histogram(data),
        histogram: to_data_uri(&png),
    })
}
