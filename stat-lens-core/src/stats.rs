use serde::{Deserialize, Serialize};

/// The three confidence levels every record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    P90,
    P95,
    P99,
}

impl ConfidenceLevel {
    /// Increasing level, and therefore increasing interval width.
    pub const ALL: [ConfidenceLevel; 3] = [Self::P90, Self::P95, Self::P99];

    pub fn fraction(self) -> f64 {
        match self {
            Self::P90 => 0.90,
            Self::P95 => 0.95,
            Self::P99 => 0.99,
        }
    }

    /// Two-sided Normal critical value.
    pub fn z(self) -> f64 {
        match self {
            Self::P90 => 1.645,
            Self::P95 => 1.96,
            Self::P99 => 2.576,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::P90 => "90% CI",
            Self::P95 => "95% CI",
            Self::P99 => "99% CI",
        }
    }

    pub fn from_fraction(level: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.fraction() == level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl From<ConfidenceInterval> for (f64, f64) {
    fn from(ci: ConfidenceInterval) -> Self {
        (ci.lower, ci.upper)
    }
}

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance with Bessel's correction. Zero for fewer than two values.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n <= 1 {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    ss / (n - 1) as f64
}

pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Critical value for a confidence level given as a fraction.
///
/// Only 0.90, 0.95 and 0.99 are known; anything else silently uses the
/// 0.95 value (1.96).
pub fn z_critical(level: f64) -> f64 {
    ConfidenceLevel::from_fraction(level)
        .unwrap_or(ConfidenceLevel::P95)
        .z()
}

/// Normal-approximation interval for the mean, whatever the sample size.
/// `(0, 0)` for fewer than two values.
pub fn confidence_interval(data: &[f64], level: f64) -> ConfidenceInterval {
    interval_with_z(data, z_critical(level))
}

fn interval_with_z(data: &[f64], z: f64) -> ConfidenceInterval {
    let n = data.len();
    if n <= 1 {
        return ConfidenceInterval::default();
    }
    let m = mean(data);
    let margin = z * (std_dev(data) / (n as f64).sqrt());
    ConfidenceInterval {
        lower: m - margin,
        upper: m + margin,
    }
}

/// 90%, 95% and 99% intervals, in that order.
pub fn confidence_intervals(data: &[f64]) -> [ConfidenceInterval; 3] {
    ConfidenceLevel::ALL.map(|level| interval_with_z(data, level.z()))
}

/// Everything the engine derives from one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub ci_90: ConfidenceInterval,
    pub ci_95: ConfidenceInterval,
    pub ci_99: ConfidenceInterval,
}

impl Summary {
    pub fn of(data: &[f64]) -> Self {
        let [ci_90, ci_95, ci_99] = confidence_intervals(data);
        Self {
            count: data.len(),
            mean: mean(data),
            variance: variance(data),
            std_dev: std_dev(data),
            ci_90,
            ci_95,
            ci_99,
        }
    }

    pub fn interval(&self, level: ConfidenceLevel) -> ConfidenceInterval {
        match level {
            ConfidenceLevel::P90 => self.ci_90,
            ConfidenceLevel::P95 => self.ci_95,
            ConfidenceLevel::P99 => self.ci_99,
        }
    }
}
