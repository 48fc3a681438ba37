//! Technical indicator implementations.
//!
//! This module provides the shared indicator types:
//! - `IndicatorId`: the closed vocabulary of indicators a caller may request
//! - `IndicatorPoint`: a single dated value, `None` while the lookback is unmet
//! - `IndicatorSeries`: a named sub-series aligned 1:1 with the input sessions
//! - `TrendLine`: the two-point least-squares segment
//! - `IndicatorOutput`: what one indicator contributes to a result
//!
//! The calculators live in the submodules and never mutate their input.

pub mod bollinger;
pub mod ema;
pub mod linreg;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::calculate_bollinger;
pub use ema::{calculate_ema, ema_values};
pub use linreg::calculate_trend;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::{calculate_sma, rolling_mean};
pub use stddev::rolling_sample_stddev;

use crate::domain::error::RequestError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IndicatorId {
    #[serde(rename = "sma30")]
    Sma30,
    #[serde(rename = "sma100")]
    Sma100,
    #[serde(rename = "linreg")]
    LinearRegression,
    #[serde(rename = "ema50")]
    Ema50,
    #[serde(rename = "rsi")]
    Rsi,
    #[serde(rename = "macd")]
    Macd,
    #[serde(rename = "bollinger")]
    Bollinger,
}

impl IndicatorId {
    pub const ALL: [IndicatorId; 7] = [
        IndicatorId::Sma30,
        IndicatorId::Sma100,
        IndicatorId::LinearRegression,
        IndicatorId::Ema50,
        IndicatorId::Rsi,
        IndicatorId::Macd,
        IndicatorId::Bollinger,
    ];

    /// Human-facing name, as shown in an indicator picker.
    pub fn label(self) -> &'static str {
        match self {
            IndicatorId::Sma30 => "30 Day SMA",
            IndicatorId::Sma100 => "100 Day SMA",
            IndicatorId::LinearRegression => "Linear Regression Line",
            IndicatorId::Ema50 => "50 Day EMA",
            IndicatorId::Rsi => "RSI",
            IndicatorId::Macd => "MACD",
            IndicatorId::Bollinger => "Bollinger Bands",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            IndicatorId::Sma30 => "sma30",
            IndicatorId::Sma100 => "sma100",
            IndicatorId::LinearRegression => "linreg",
            IndicatorId::Ema50 => "ema50",
            IndicatorId::Rsi => "rsi",
            IndicatorId::Macd => "macd",
            IndicatorId::Bollinger => "bollinger",
        }
    }

    /// Sessions needed before the first defined value (1 means defined from the start).
    pub fn lookback(self) -> usize {
        match self {
            IndicatorId::Sma30 => sma::SHORT_WINDOW,
            IndicatorId::Sma100 => sma::LONG_WINDOW,
            IndicatorId::LinearRegression => 1,
            IndicatorId::Ema50 => 1,
            IndicatorId::Rsi => rsi::DEFAULT_PERIOD,
            IndicatorId::Macd => 1,
            IndicatorId::Bollinger => bollinger::DEFAULT_PERIOD,
        }
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IndicatorId {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        IndicatorId::ALL
            .into_iter()
            .find(|id| {
                id.label().eq_ignore_ascii_case(wanted) || id.slug().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| RequestError::UnknownIndicator {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl IndicatorPoint {
    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Pair `values` with the session dates of `bars`. Both must be the same length.
    pub fn aligned(name: impl Into<String>, bars: &[OhlcvBar], values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(bars.len(), values.len());
        Self {
            name: name.into(),
            values: bars
                .iter()
                .zip(values)
                .map(|(bar, value)| IndicatorPoint {
                    date: bar.date,
                    value,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).and_then(|p| p.value)
    }

    /// Index of the first defined value, if any.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(IndicatorPoint::is_defined)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|p| p.is_defined()).count()
    }
}

/// Least-squares fit of close against session index, reduced to its endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub start_date: NaiveDate,
    pub start_value: f64,
    pub end_date: NaiveDate,
    pub end_value: f64,
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorOutput {
    Series(Vec<IndicatorSeries>),
    Trend(TrendLine),
}

impl IndicatorOutput {
    pub fn series(&self) -> &[IndicatorSeries] {
        match self {
            IndicatorOutput::Series(series) => series,
            IndicatorOutput::Trend(_) => &[],
        }
    }

    pub fn sub_series(&self, name: &str) -> Option<&IndicatorSeries> {
        self.series().iter().find(|s| s.name == name)
    }

    pub fn trend(&self) -> Option<&TrendLine> {
        match self {
            IndicatorOutput::Trend(line) => Some(line),
            IndicatorOutput::Series(_) => None,
        }
    }
}
