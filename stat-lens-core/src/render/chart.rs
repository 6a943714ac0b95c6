use stat_lens_common::RenderConfig;

use super::axes::Axis;
use super::canvas::{Anchor, Canvas, Color, Fill, Stroke};
use crate::histogram::{bin_range, sturges_histogram, HistogramBin};
use crate::stats::{ConfidenceInterval, ConfidenceLevel, Summary};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 48.0;
const FONT_SIZE: f64 = 11.0;

const BAR: Color = Color::rgb(135, 206, 235);
const MEAN: Color = Color::rgb(255, 0, 0);
const BAND_ALPHA: f64 = 0.1;

pub fn band_color(level: ConfidenceLevel) -> Color {
    match level {
        ConfidenceLevel::P90 => Color::rgb(0, 0, 255),
        ConfidenceLevel::P95 => Color::rgb(0, 128, 0),
        ConfidenceLevel::P99 => Color::rgb(128, 0, 128),
    }
}

/// Everything the chart draws, computed before any drawing happens.
#[derive(Debug, Clone)]
pub struct ChartModel {
    pub summary: Summary,
    pub bins: Vec<HistogramBin>,
    pub x: Axis,
    pub y: Axis,
}

impl ChartModel {
    pub fn new(data: &[f64]) -> Self {
        let summary = Summary::of(data);
        let bins = sturges_histogram(data);
        let (mut lo, mut hi) = bin_range(data).unwrap_or((0.0, 1.0));
        if summary.count > 1 && is_finite(summary.ci_99) {
            lo = lo.min(summary.ci_99.lower);
            hi = hi.max(summary.ci_99.upper);
        }
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        Self {
            summary,
            bins,
            x: Axis::auto_linear(lo, hi, 7),
            y: Axis::with_min_step(0.0, max_count as f64 * 1.05, 6, 1.0),
        }
    }

    /// Bands drawn for this data, narrowest first. Empty for fewer than
    /// two observations; a band whose bounds overflowed is left out.
    pub fn bands(&self) -> Vec<ConfidenceLevel> {
        if self.summary.count <= 1 {
            return Vec::new();
        }
        ConfidenceLevel::ALL
            .into_iter()
            .filter(|&level| is_finite(self.summary.interval(level)))
            .collect()
    }
}

fn is_finite(ci: ConfidenceInterval) -> bool {
    ci.lower.is_finite() && ci.upper.is_finite()
}

struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl PlotArea {
    fn for_config(config: &RenderConfig) -> Self {
        Self {
            left: MARGIN_LEFT,
            right: config.width as f64 - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: config.height as f64 - MARGIN_BOTTOM,
        }
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }
    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Build the annotated histogram as an SVG document.
pub fn chart_svg(data: &[f64], config: &RenderConfig) -> String {
    let model = ChartModel::new(data);
    let width = config.width as f64;
    let height = config.height as f64;
    let area = PlotArea::for_config(config);
    let mut canvas = Canvas::new(width, height);
    let px = |v: f64| model.x.data_to_pixel(v, area.left, area.right);
    let py = |v: f64| model.y.data_to_pixel(v, area.bottom, area.top);

    let bar = Fill::outlined(BAR.with_alpha(0.7), Color::BLACK, 1.0);
    for bin in &model.bins {
        let x0 = px(bin.range_start);
        let x1 = px(bin.range_end);
        if !(x0.is_finite() && x1.is_finite()) {
            continue;
        }
        let top = py(bin.count as f64);
        canvas.rect(x0, top, x1 - x0, area.bottom - top, &bar);
    }

    for level in model.bands() {
        let ci = model.summary.interval(level);
        let x0 = px(ci.lower);
        let fill = Fill::solid(band_color(level).with_alpha(BAND_ALPHA));
        canvas.rect(x0, area.top, px(ci.upper) - x0, area.height(), &fill);
    }

    if model.summary.mean.is_finite() {
        let mx = px(model.summary.mean);
        let dashed = Stroke { color: MEAN, width: 2.0, dash: Some((6.0, 4.0)) };
        canvas.line(mx, area.top, mx, area.bottom, &dashed);
    }

    draw_axes(&mut canvas, &model, &area);
    draw_legend(&mut canvas, &model, &area);

    let title_y = MARGIN_TOP / 2.0 + 5.0;
    canvas.text(width / 2.0, title_y, "Data Distribution", FONT_SIZE + 3.0, Anchor::Middle);
    let centre_x = area.left + area.width() / 2.0;
    canvas.text(centre_x, height - 10.0, "Value", FONT_SIZE, Anchor::Middle);
    canvas.text_vertical(16.0, area.top + area.height() / 2.0, "Frequency", FONT_SIZE);
    canvas.finish()
}

fn draw_axes(canvas: &mut Canvas, model: &ChartModel, area: &PlotArea) {
    let frame = Fill::outlined(Color::WHITE.with_alpha(0.0), Color::BLACK, 1.0);
    canvas.rect(area.left, area.top, area.width(), area.height(), &frame);
    let tick = Stroke { color: Color::BLACK, width: 1.0, dash: None };
    for (v, label) in model.x.ticks.iter().zip(&model.x.labels) {
        let x = model.x.data_to_pixel(*v, area.left, area.right);
        canvas.line(x, area.bottom, x, area.bottom + 4.0, &tick);
        canvas.text(x, area.bottom + 16.0, label, FONT_SIZE - 1.0, Anchor::Middle);
    }
    for (v, label) in model.y.ticks.iter().zip(&model.y.labels) {
        let y = model.y.data_to_pixel(*v, area.bottom, area.top);
        canvas.line(area.left - 4.0, y, area.left, y, &tick);
        canvas.text(area.left - 7.0, y + 4.0, label, FONT_SIZE - 1.0, Anchor::End);
    }
}

fn draw_legend(canvas: &mut Canvas, model: &ChartModel, area: &PlotArea) {
    let mean_label = format!("Mean: {:.2}", model.summary.mean);
    let mut entries: Vec<(String, Option<Color>)> = vec![(mean_label, None)];
    for level in model.bands() {
        entries.push((level.label().to_string(), Some(band_color(level))));
    }
    let row_h = FONT_SIZE + 6.0;
    let legend_w = 110.0;
    let legend_h = 8.0 + entries.len() as f64 * row_h;
    let lx = area.right - legend_w - 6.0;
    let ly = area.top + 6.0;
    let frame = Fill::outlined(Color::WHITE.with_alpha(0.85), Color::rgb(200, 200, 200), 0.8);
    canvas.rect(lx, ly, legend_w, legend_h, &frame);
    for (i, (label, swatch)) in entries.iter().enumerate() {
        let cy = ly + 4.0 + row_h * (i as f64 + 0.5);
        let sx = lx + 8.0;
        match swatch {
            Some(color) => {
                let fill = Fill::outlined(color.with_alpha(BAND_ALPHA * 3.0), *color, 0.5);
                canvas.rect(sx, cy - 5.0, 20.0, 10.0, &fill);
            }
            None => {
                let dashed = Stroke { color: MEAN, width: 2.0, dash: Some((4.0, 2.0)) };
                canvas.line(sx, cy, sx + 20.0, cy, &dashed);
            }
        }
        canvas.text(sx + 28.0, cy + 4.0, label, FONT_SIZE - 1.0, Anchor::Start);
    }
}
