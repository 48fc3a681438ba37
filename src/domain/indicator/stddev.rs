//! Rolling sample standard deviation.
//!
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n) / (n - 1))
//! Warmup: first (n-1) sessions are undefined. A window below 2 has no sample
//! deviation and is undefined everywhere. A window of one repeated value has
//! a deviation of exactly 0.

use crate::domain::indicator::sma::uniform_value;

/// Trailing sample (n-1) standard deviation of `values`.
pub fn rolling_sample_stddev(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            if uniform_value(slice).is_some() {
                return Some(0.0);
            }
            let mean = slice.iter().sum::<f64>() / window as f64;
            let variance = slice
                .iter()
                .map(|v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (window - 1) as f64;
            Some(variance.sqrt())
        })
        .collect()
}
