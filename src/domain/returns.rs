//! Daily percentage returns.

use crate::domain::indicator::IndicatorSeries;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::validation::finite_or_none;

pub const RETURNS_NAME: &str = "Returns";

/// (C[i] / C[i-1] - 1) × 100. The first session, and any session after a zero
/// close, is undefined.
pub fn daily_returns(bars: &[OhlcvBar]) -> IndicatorSeries {
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let prev = bars.get(i.checked_sub(1)?)?.close;
            if prev == 0.0 {
                return None;
            }
            finite_or_none((bar.close / prev - 1.0) * 100.0)
        })
        .collect();

    IndicatorSeries::aligned(RETURNS_NAME, bars, values)
}
