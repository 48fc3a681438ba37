//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the first close, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! There is no warmup: every session has a value.

use crate::domain::indicator::IndicatorSeries;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::validation::closes;

pub const DEFAULT_SPAN: usize = 50;

/// Raw EMA over `values`. Empty input or a zero span yields an empty vector.
pub fn ema_values(values: &[f64], span: usize) -> Vec<f64> {
    let Some(&seed) = values.first() else {
        return Vec::new();
    };
    if span == 0 {
        return Vec::new();
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = seed;
    out.push(ema);

    for &value in &values[1..] {
        ema = value * k + ema * (1.0 - k);
        out.push(ema);
    }

    out
}

pub fn calculate_ema(bars: &[OhlcvBar], span: usize) -> IndicatorSeries {
    let raw = ema_values(&closes(bars), span);
    let values = if raw.len() == bars.len() {
        raw.into_iter().map(Some).collect()
    } else {
        vec![None; bars.len()]
    };
    IndicatorSeries::aligned(format!("EMA{}", span), bars, values)
}
