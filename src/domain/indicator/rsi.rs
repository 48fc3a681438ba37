//! RSI (Relative Strength Index) indicator implementation.
//!
//! Average gain/loss are plain trailing means over n sessions (no Wilder
//! smoothing). The first session has no prior close and contributes a zero
//! change, so the first defined value sits at index n-1.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0 the ratio is indeterminate and the session is undefined.

use crate::domain::indicator::{IndicatorSeries, rolling_mean};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::validation::finite_or_none;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut gains = Vec::with_capacity(bars.len());
    let mut losses = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let change = if i == 0 { 0.0 } else { bar.close - bars[i - 1].close };
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let avg_gains = rolling_mean(&gains, period);
    let avg_losses = rolling_mean(&losses, period);

    let values = avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| match (gain, loss) {
            (Some(gain), Some(loss)) if loss != 0.0 => {
                finite_or_none(100.0 - 100.0 / (1.0 + gain / loss))
            }
            _ => None,
        })
        .collect();

    IndicatorSeries::aligned("RSI", bars, values)
}
