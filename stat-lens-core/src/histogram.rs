use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub range_start: f64,
    pub range_end: f64,
    pub count: u64,
}

/// Sturges' rule. Five bins for an empty sequence.
pub fn sturges_bins(n: usize) -> usize {
    if n == 0 {
        return 5;
    }
    (1.0 + 3.322 * (n as f64).log10()).floor() as usize
}

/// Lower and upper edge of the binned range. A zero-width range is widened
/// by half a unit on each side so the requested bin count still applies.
pub fn bin_range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max - min == 0.0 {
        return Some((min - 0.5, max + 0.5));
    }
    Some((min, max))
}

/// Equal-width bins over the value range; the last bin is closed on the right.
pub fn build_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some((lo, hi)) = bin_range(values) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &v in values {
        let idx = ((v - lo) / width) as usize;
        let idx = idx.min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &c)| HistogramBin {
            range_start: lo + i as f64 * width,
            range_end: if i + 1 == bins { hi } else { lo + (i + 1) as f64 * width },
            count: c,
        })
        .collect()
}

/// Histogram with the Sturges bin count for `values.len()`.
pub fn sturges_histogram(values: &[f64]) -> Vec<HistogramBin> {
    build_histogram(values, sturges_bins(values.len()))
}
