//! Gain/loss classification of individual sessions.
//!
//! Only the category is decided here; colours and bar geometry belong to
//! whatever renders the chart.

use crate::domain::ohlcv::OhlcvBar;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandleLabel {
    /// Close > Open
    Gain,
    /// Open > Close
    Loss,
    /// Open == Close
    Flat,
}

impl CandleLabel {
    pub fn classify(bar: &OhlcvBar) -> Self {
        let body = bar.body();
        if body > 0.0 {
            CandleLabel::Gain
        } else if body < 0.0 {
            CandleLabel::Loss
        } else {
            CandleLabel::Flat
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CandleLabel::Gain => "gain",
            CandleLabel::Loss => "loss",
            CandleLabel::Flat => "flat",
        }
    }
}

impl fmt::Display for CandleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One label per session, index-aligned with `bars`.
pub fn classify_candles(bars: &[OhlcvBar]) -> Vec<CandleLabel> {
    bars.iter().map(CandleLabel::classify).collect()
}
