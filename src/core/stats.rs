// stats.rs - Descriptive statistics over distance values

use serde::Serialize;

/// n / mean / stddev / min / max over a set of distances
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Compute statistics; stddev is the sample standard deviation (n - 1)
    /// when there are at least two values that are not all equal, and 0 otherwise.
    /// An empty slice yields all zeros.
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                n: 0,
                mean: 0.0,
                stddev: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
        );
        // Rounding in the sum can push the mean just outside [min, max]
        let mean = (sum / n as f64).clamp(min, max);

        let stddev = if n > 1 && max > min {
            let ss: f64 = values.iter().map(|&v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            n,
            mean,
            stddev,
            min,
            max,
        }
    }
}
