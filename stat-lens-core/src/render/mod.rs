//! Histogram rendering.
//!
//! The statistics and binning code never touches graphics; this module turns
//! a sequence into a PNG through [`HistogramRenderer`], so callers (and tests)
//! can swap the image backend out.

pub mod axes;
pub mod canvas;
pub mod chart;
pub mod png;

use base64::{engine::general_purpose::STANDARD, Engine};
use stat_lens_common::{RenderConfig, Result, StatLensError};

pub use chart::{chart_svg, ChartModel};

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

pub trait HistogramRenderer: Send + Sync {
    /// Encoded image bytes for `data`.
    fn render(&self, data: &[f64]) -> Result<Vec<u8>>;
}

/// Draws the annotated histogram and rasterizes it to PNG.
#[derive(Debug, Clone, Default)]
pub struct PngHistogramRenderer {
    pub config: RenderConfig,
}

impl PngHistogramRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl HistogramRenderer for PngHistogramRenderer {
    fn render(&self, data: &[f64]) -> Result<Vec<u8>> {
        let svg = chart_svg(data, &self.config);
        png::svg_to_png(&svg, &self.config)
    }
}

pub fn to_data_uri(png: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(png))
}

pub fn from_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| StatLensError::Other("not a PNG data URI".into()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| StatLensError::Other(e.to_string()))
}
