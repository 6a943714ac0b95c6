/// Largest magnitude an axis bound may take. Wider data is clamped so
/// the span, step and tick arithmetic stay finite.
const AXIS_LIMIT: f64 = f64::MAX / 16.0;
const MAX_TICKS: usize = 64;

/// Linear axis with "nice number" ticks and data→pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
    pub labels: Vec<String>,
}

impl Axis {
    pub fn auto_linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        Self::with_min_step(data_min, data_max, target_ticks, 0.0)
    }

    /// Like [`Axis::auto_linear`] but never steps below `min_step`
    /// (frequency axes use 1 so counts stay integral).
    pub fn with_min_step(data_min: f64, data_max: f64, target_ticks: usize, min_step: f64) -> Self {
        let (min, max, step) = nice_range(data_min, data_max, target_ticks, min_step);
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        for i in 0..MAX_TICKS {
            let v = min + i as f64 * step;
            // a NaN tick ends the axis as well
            if !(v <= max + step * 0.01) {
                break;
            }
            ticks.push(v);
            labels.push(format_tick(v, step));
        }
        Self { min, max, ticks, labels }
    }

    /// Values outside the axis are pinned to its ends.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = (value.clamp(self.min, self.max) - self.min) / (self.max - self.min);
        px_min + frac * (px_max - px_min)
    }
}

fn clamp_bound(v: f64, fallback: f64) -> f64 {
    if v.is_nan() {
        fallback
    } else {
        v.clamp(-AXIS_LIMIT, AXIS_LIMIT)
    }
}

fn nice_range(data_min: f64, data_max: f64, target_ticks: usize, min_step: f64) -> (f64, f64, f64) {
    let data_min = clamp_bound(data_min, 0.0);
    let data_max = clamp_bound(data_max, data_min);
    let (data_min, data_max) = (data_min.min(data_max), data_min.max(data_max));
    if (data_max - data_min).abs() < 1e-12 {
        let pad = (data_min.abs() * 1e-9).max(1.0);
        return (data_min - pad, data_max + pad, pad);
    }
    let rough = (data_max - data_min) / (target_ticks.max(2) - 1) as f64;
    let step = nice_step(rough).max(min_step);
    let nice_min = (data_min / step).floor() * step;
    let nice_max = (data_max / step).ceil() * step;
    (nice_min, nice_max, step)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10f64.powf(exp);
    let nice = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice * 10f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    let v = if value.abs() < step * 0.01 { 0.0 } else { value }; // no "-0"
    format!("{:.prec$}", v, prec = decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_data() {
        let ax = Axis::auto_linear(0.3, 9.7, 6);
        assert!(ax.min <= 0.3);
        assert!(ax.max >= 9.7);
        assert_eq!(ax.ticks.len(), ax.labels.len());
        assert_eq!(ax.labels.first().map(String::as_str), Some("0"));
    }

    #[test]
    fn fractional_labels() {
        let ax = Axis::auto_linear(0.0, 1.0, 6);
        assert!(ax.labels.contains(&"0.2".to_string()));
    }

    #[test]
    fn count_axis_is_integral() {
        let ax = Axis::with_min_step(0.0, 2.0, 6, 1.0);
        assert_eq!(ax.labels, vec!["0", "1", "2"]);
    }

    #[test]
    fn pixel_mapping() {
        let ax = Axis::auto_linear(0.0, 100.0, 5);
        assert!((ax.data_to_pixel(50.0, 0.0, 500.0) - 250.0).abs() < 1.0);
        // inverted pixel range for y axes
        assert!((ax.data_to_pixel(0.0, 400.0, 0.0) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range() {
        let ax = Axis::auto_linear(3.0, 3.0, 5);
        assert_eq!(ax.min, 2.0);
        assert_eq!(ax.max, 4.0);
    }

    #[test]
    fn infinite_bounds_give_a_finite_axis() {
        let ax = Axis::auto_linear(f64::NEG_INFINITY, f64::INFINITY, 7);
        assert!(ax.min.is_finite() && ax.max.is_finite());
        assert!(ax.min < ax.max);
        assert!(!ax.ticks.is_empty() && ax.ticks.len() <= MAX_TICKS);
        let end = ax.data_to_pixel(f64::INFINITY, 0.0, 500.0);
        assert!((end - 500.0).abs() < 1e-9);
    }

    #[test]
    fn huge_constant_range_keeps_a_width() {
        let ax = Axis::auto_linear(1e300, 1e300, 7);
        assert!(ax.min < 1e300 && ax.max > 1e300);
        assert!(ax.data_to_pixel(1e300, 0.0, 100.0).is_finite());
    }

    #[test]
    fn nan_bounds_do_not_loop() {
        let ax = Axis::auto_linear(f64::NAN, f64::NAN, 7);
        assert!(ax.min.is_finite() && ax.max.is_finite());
        assert!(ax.ticks.len() <= MAX_TICKS);
    }

    #[test]
    fn nice_steps() {
        assert!((nice_step(3.2) - 2.0).abs() < 1e-9);
        assert!((nice_step(0.7) - 0.5).abs() < 1e-9);
        assert!((nice_step(15.0) - 10.0).abs() < 1e-9);
    }
}
