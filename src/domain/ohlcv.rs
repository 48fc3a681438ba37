//! OHLCV session representation.

use chrono::NaiveDate;
use serde::Serialize;

/// One trading session. Fields are taken as delivered by the data source;
/// `high >= max(open, close) >= min(open, close) >= low` is assumed, not checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// close - open; positive for a gain session.
    pub fn body(&self) -> f64 {
        self.close - self.open
    }
}
