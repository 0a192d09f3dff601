//! Descriptive statistics and bootstrap resampling.

use rand::rngs::StdRng;
use rand::Rng;

/// Fraction of the data range added on each side of a padded axis.
pub const AXIS_PADDING: f64 = 0.05;

/// Arithmetic mean; NaN for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; NaN for an empty slice.
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Population standard deviation.
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Percentile `p` in `[0, 100]` using linear interpolation.
#[must_use]
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// Percentile of already sorted data.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let k = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let f = k.floor() as usize;
            let c = k.ceil() as usize;
            if f == c {
                sorted[f]
            } else {
                let d = k - f as f64;
                sorted[f] * (1.0 - d) + sorted[c] * d
            }
        }
    }
}

/// Minimum and maximum of the finite values.
#[must_use]
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Data extent widened by [`AXIS_PADDING`] of its span on each side.
#[must_use]
pub fn padded_extent(values: &[f64]) -> Option<(f64, f64)> {
    extent(values).map(|(lo, hi)| {
        let pad = AXIS_PADDING * (hi - lo);
        (lo - pad, hi + pad)
    })
}

/// Symmetric percentile interval at `level` percent.
#[must_use]
pub fn ci(values: &[f64], level: f64) -> (f64, f64) {
    let tail = (100.0 - level) / 2.0;
    (percentile(values, tail), percentile(values, 100.0 - tail))
}

/// Row indices of a bootstrap resample of size `n`.
pub fn resample(n: usize, rng: &mut StdRng) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}

/// Bootstrap distribution of `func` over `values`.
pub fn bootstrap<F>(values: &[f64], n_boot: usize, rng: &mut StdRng, func: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if values.is_empty() {
        return Vec::new();
    }
    let mut sample = vec![0.0; values.len()];
    (0..n_boot)
        .map(|_| {
            for (slot, idx) in sample.iter_mut().zip(resample(values.len(), rng)) {
                *slot = values[idx];
            }
            func(&sample)
        })
        .collect()
}
