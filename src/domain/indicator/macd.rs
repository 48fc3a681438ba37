//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//!
//! Every EMA is seeded with its first input, so both lines are defined from
//! the first session.

use crate::domain::indicator::{IndicatorSeries, ema_values};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::validation::closes;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub const LINE_NAME: &str = "MACD";
pub const SIGNAL_NAME: &str = "Signal Line";

/// Returns `[MACD, Signal Line]`, both aligned with `bars`.
pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Vec<IndicatorSeries> {
    let closes = closes(bars);
    let ema_fast = ema_values(&closes, fast);
    let ema_slow = ema_values(&closes, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_values(&macd_line, signal_period);

    vec![
        IndicatorSeries::aligned(LINE_NAME, bars, align(macd_line, bars.len())),
        IndicatorSeries::aligned(SIGNAL_NAME, bars, align(signal_line, bars.len())),
    ]
}

pub fn calculate_macd_default(bars: &[OhlcvBar]) -> Vec<IndicatorSeries> {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

// A zero period yields no raw values; report those as undefined throughout.
fn align(raw: Vec<f64>, len: usize) -> Vec<Option<f64>> {
    if raw.len() == len {
        raw.into_iter().map(Some).collect()
    } else {
        vec![None; len]
    }
}
