#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use stockview::domain::error::StockviewError;
pub use stockview::domain::ohlcv::OhlcvBar;
use stockview::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, StockviewError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(StockviewError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(code)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockviewError> {
        let mut codes: Vec<String> = self.data.keys().cloned().collect();
        codes.sort();
        Ok(codes)
    }

    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockviewError> {
        match self.data.get(code) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sessions on consecutive days from 2023-01-01 with the given open/close pairs.
pub fn bars_from_open_close(pairs: &[(f64, f64)]) -> Vec<OhlcvBar> {
    let start = date(2023, 1, 1);
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(open, close))| OhlcvBar {
            date: start + chrono::Duration::days(i as i64),
            open,
            high: open.max(close) + 2.0,
            low: open.min(close) - 2.0,
            close,
            volume: 1_000.0 + i as f64,
        })
        .collect()
}

/// Sessions on consecutive days from 2023-01-01; open sits 1.0 below close.
pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    let pairs: Vec<(f64, f64)> = closes.iter().map(|&c| (c - 1.0, c)).collect();
    bars_from_open_close(&pairs)
}

/// A deterministic wavy series with both up and down sessions.
pub fn wavy_closes(count: usize, base: f64) -> Vec<f64> {
    (0..count)
        .map(|i| base + (i as f64 * 0.45).sin() * 6.0 + i as f64 * 0.1)
        .collect()
}

/// The three-session fixture: opens 100..102, closes 103..105.
pub fn three_session_fixture() -> Vec<OhlcvBar> {
    bars_from_open_close(&[(100.0, 103.0), (101.0, 104.0), (102.0, 105.0)])
}
