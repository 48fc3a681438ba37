//! Indicator engine: resolves a request against an OHLCV series.
//!
//! Requests are validated up front. Either every requested indicator is
//! computed or the call fails before any work is done. Insufficient history
//! is not an error; it shows up as undefined points in the affected series.

use crate::domain::error::{InputError, RequestError};
use crate::domain::indicator::{
    self, IndicatorId, IndicatorOutput, bollinger, ema, macd, rsi, sma,
};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::validation::validate_series;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

impl From<EngineError> for crate::domain::error::StockviewError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Input(e) => e.into(),
            EngineError::Request(e) => e.into(),
        }
    }
}

/// A set of indicators to compute; order is irrelevant and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorRequest {
    indicators: BTreeSet<IndicatorId>,
}

impl IndicatorRequest {
    pub fn new(ids: impl IntoIterator<Item = IndicatorId>) -> Self {
        Self {
            indicators: ids.into_iter().collect(),
        }
    }

    pub fn all() -> Self {
        Self::new(IndicatorId::ALL)
    }

    /// Resolve identifiers by label or slug; the first unknown name fails the whole request.
    pub fn parse<I, S>(names: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let indicators = names
            .into_iter()
            .map(|name| name.as_ref().parse::<IndicatorId>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { indicators })
    }

    /// Parse a comma separated list; blank entries are ignored.
    pub fn parse_list(list: &str) -> Result<Self, RequestError> {
        Self::parse(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn contains(&self, id: IndicatorId) -> bool {
        self.indicators.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IndicatorId> + '_ {
        self.indicators.iter().copied()
    }
}

/// Exactly the requested indicators, each aligned with the input sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorResult {
    outputs: BTreeMap<IndicatorId, IndicatorOutput>,
}

impl IndicatorResult {
    pub fn get(&self, id: IndicatorId) -> Option<&IndicatorOutput> {
        self.outputs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = IndicatorId> + '_ {
        self.outputs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorId, &IndicatorOutput)> {
        self.outputs.iter().map(|(id, out)| (*id, out))
    }
}

pub fn compute_indicators(
    bars: &[OhlcvBar],
    request: &IndicatorRequest,
) -> Result<IndicatorResult, EngineError> {
    validate_series(bars)?;

    let mut outputs = BTreeMap::new();
    for id in request.iter() {
        let output = compute_one(id, bars)?;
        debug!(indicator = %id, sessions = bars.len(), "computed indicator");
        outputs.insert(id, output);
    }

    Ok(IndicatorResult { outputs })
}

/// Same as [`compute_indicators`] but takes raw identifier strings.
pub fn compute_named<I, S>(bars: &[OhlcvBar], names: I) -> Result<IndicatorResult, EngineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let request = IndicatorRequest::parse(names)?;
    compute_indicators(bars, &request)
}

fn compute_one(id: IndicatorId, bars: &[OhlcvBar]) -> Result<IndicatorOutput, InputError> {
    let output = match id {
        IndicatorId::Sma30 => {
            IndicatorOutput::Series(vec![indicator::calculate_sma(bars, sma::SHORT_WINDOW)])
        }
        IndicatorId::Sma100 => {
            IndicatorOutput::Series(vec![indicator::calculate_sma(bars, sma::LONG_WINDOW)])
        }
        IndicatorId::LinearRegression => {
            IndicatorOutput::Trend(indicator::calculate_trend(bars).ok_or(InputError::EmptySeries)?)
        }
        IndicatorId::Ema50 => {
            IndicatorOutput::Series(vec![indicator::calculate_ema(bars, ema::DEFAULT_SPAN)])
        }
        IndicatorId::Rsi => {
            IndicatorOutput::Series(vec![indicator::calculate_rsi(bars, rsi::DEFAULT_PERIOD)])
        }
        IndicatorId::Macd => IndicatorOutput::Series(macd::calculate_macd_default(bars)),
        IndicatorId::Bollinger => IndicatorOutput::Series(indicator::calculate_bollinger(
            bars,
            bollinger::DEFAULT_PERIOD,
            bollinger::DEFAULT_MULTIPLIER,
        )),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(closes: &[f64]) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                OhlcvBar::new(
                    start + chrono::Duration::days(i as i64),
                    close - 3.0,
                    close + 2.0,
                    close - 5.0,
                    close,
                    1_000.0,
                )
            })
            .collect()
    }

    #[test]
    fn request_collapses_duplicates() {
        let request = IndicatorRequest::parse(["RSI", "rsi", "MACD", " RSI "]).unwrap();
        assert_eq!(request.len(), 2);
        assert!(request.contains(IndicatorId::Rsi));
        assert!(request.contains(IndicatorId::Macd));
    }

    #[test]
    fn request_parse_list_skips_blanks() {
        let request = IndicatorRequest::parse_list("30 Day SMA, ,Bollinger Bands,").unwrap();
        assert_eq!(
            request.iter().collect::<Vec<_>>(),
            vec![IndicatorId::Sma30, IndicatorId::Bollinger]
        );
        assert!(IndicatorRequest::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn unknown_identifier_fails_request() {
        let bars = make_bars(&[1.0, 2.0]);
        let err = compute_named(&bars, ["RSI", "Stochastic"]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Request(RequestError::UnknownIndicator { ref name }) if name == "Stochastic"
        ));
    }

    #[test]
    fn empty_series_fails_input() {
        let err = compute_indicators(&[], &IndicatorRequest::all()).unwrap_err();
        assert!(matches!(err, EngineError::Input(InputError::EmptySeries)));
    }

    #[test]
    fn empty_request_yields_empty_result() {
        let bars = make_bars(&[1.0, 2.0]);
        let result = compute_indicators(&bars, &IndicatorRequest::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn result_holds_exactly_requested() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let request = IndicatorRequest::new([IndicatorId::Ema50, IndicatorId::Macd]);
        let result = compute_indicators(&bars, &request).unwrap();

        assert_eq!(
            result.ids().collect::<Vec<_>>(),
            vec![IndicatorId::Ema50, IndicatorId::Macd]
        );
        assert!(result.get(IndicatorId::Rsi).is_none());
    }

    #[test]
    fn short_series_does_not_abort_other_indicators() {
        let bars = make_bars(&[103.0, 104.0, 105.0]);
        let result = compute_indicators(&bars, &IndicatorRequest::all()).unwrap();

        assert_eq!(result.len(), IndicatorId::ALL.len());
        let sma100 = &result.get(IndicatorId::Sma100).unwrap().series()[0];
        assert_eq!(sma100.len(), 3);
        assert_eq!(sma100.defined_count(), 0);

        let ema = &result.get(IndicatorId::Ema50).unwrap().series()[0];
        assert_eq!(ema.defined_count(), 3);
    }

    #[test]
    fn every_series_is_aligned_with_input_dates() {
        let closes: Vec<f64> = (0..45).map(|i| 50.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let bars = make_bars(&closes);
        let result = compute_indicators(&bars, &IndicatorRequest::all()).unwrap();

        for (id, output) in result.iter() {
            for series in output.series() {
                assert_eq!(series.len(), bars.len(), "{} / {}", id, series.name);
                for (point, bar) in series.values.iter().zip(&bars) {
                    assert_eq!(point.date, bar.date);
                }
            }
        }
    }

    #[test]
    fn sub_series_names() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let result = compute_indicators(&bars, &IndicatorRequest::all()).unwrap();

        let names = |id| -> Vec<String> {
            result
                .get(id)
                .unwrap()
                .series()
                .iter()
                .map(|s| s.name.clone())
                .collect()
        };
        assert_eq!(names(IndicatorId::Sma30), vec!["SMA30"]);
        assert_eq!(names(IndicatorId::Sma100), vec!["SMA100"]);
        assert_eq!(names(IndicatorId::Ema50), vec!["EMA50"]);
        assert_eq!(names(IndicatorId::Rsi), vec!["RSI"]);
        assert_eq!(names(IndicatorId::Macd), vec!["MACD", "Signal Line"]);
        assert_eq!(
            names(IndicatorId::Bollinger),
            vec!["SMA20", "Upper Band", "Lower Band"]
        );
        assert!(result.get(IndicatorId::LinearRegression).unwrap().trend().is_some());
    }

    #[test]
    fn recomputation_is_identical() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 9) as f64).collect();
        let bars = make_bars(&closes);
        let first = compute_indicators(&bars, &IndicatorRequest::all()).unwrap();
        let second = compute_indicators(&bars, &IndicatorRequest::all()).unwrap();
        assert_eq!(first, second);
    }
}
