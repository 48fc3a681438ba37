//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is the sample standard deviation (divides by N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) sessions are undefined.

use crate::domain::indicator::{IndicatorSeries, rolling_mean, rolling_sample_stddev};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::validation::closes;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

pub const UPPER_NAME: &str = "Upper Band";
pub const LOWER_NAME: &str = "Lower Band";

/// Returns `[SMA<period>, Upper Band, Lower Band]`.
pub fn calculate_bollinger(bars: &[OhlcvBar], period: usize, multiplier: f64) -> Vec<IndicatorSeries> {
    let closes = closes(bars);
    let middle = rolling_mean(&closes, period);
    let stddev = rolling_sample_stddev(&closes, period);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&stddev)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m + sign * multiplier * s),
                _ => None,
            })
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    vec![
        IndicatorSeries::aligned(format!("SMA{}", period), bars, middle),
        IndicatorSeries::aligned(UPPER_NAME, bars, upper),
        IndicatorSeries::aligned(LOWER_NAME, bars, lower),
    ]
}
