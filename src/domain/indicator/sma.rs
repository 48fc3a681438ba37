//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]) over a trailing window.
//! Warmup: first (n-1) sessions are undefined; a series shorter than n is
//! undefined throughout.

use crate::domain::indicator::IndicatorSeries;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::validation::closes;

pub const SHORT_WINDOW: usize = 30;
pub const LONG_WINDOW: usize = 100;

/// Trailing mean of `values`; `None` until `window` values are available.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let slice = &values[i + 1 - window..=i];
                uniform_value(slice).or(Some(slice.iter().sum::<f64>() / window as f64))
            }
        })
        .collect()
}

/// The shared value of a window holding a single repeated value. Summing such a
/// window can drift off the value itself, so callers short-circuit on it.
pub(crate) fn uniform_value(window: &[f64]) -> Option<f64> {
    let (&first, rest) = window.split_first()?;
    rest.iter().all(|&v| v == first).then_some(first)
}

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let values = rolling_mean(&closes(bars), period);
    IndicatorSeries::aligned(format!("SMA{}", period), bars, values)
}
