//! Per-ticker chart payload handed to the rendering side.

use crate::domain::candle::{CandleLabel, classify_candles};
use crate::domain::engine::{EngineError, IndicatorRequest, IndicatorResult, compute_indicators};
use crate::domain::error::StockviewError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::returns::daily_returns;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub code: String,
    pub bars: Vec<OhlcvBar>,
    pub candles: Vec<CandleLabel>,
    pub returns: IndicatorSeries,
    pub indicators: IndicatorResult,
}

impl ChartData {
    pub fn session_count(&self) -> usize {
        self.bars.len()
    }
}

pub fn build_chart(
    code: &str,
    bars: Vec<OhlcvBar>,
    request: &IndicatorRequest,
) -> Result<ChartData, EngineError> {
    let indicators = compute_indicators(&bars, request)?;
    let candles = classify_candles(&bars);
    let returns = daily_returns(&bars);

    Ok(ChartData {
        code: code.to_string(),
        bars,
        candles,
        returns,
        indicators,
    })
}

/// Load every code over the same range and chart it with the same request.
///
/// All codes are fetched before anything is computed; one empty or failing
/// code fails the whole call.
pub fn load_charts(
    port: &dyn DataPort,
    codes: &[String],
    start: NaiveDate,
    end: NaiveDate,
    request: &IndicatorRequest,
) -> Result<Vec<ChartData>, StockviewError> {
    let mut loaded = Vec::with_capacity(codes.len());
    for code in codes {
        let bars = port.fetch_ohlcv(code, start, end)?;
        if bars.is_empty() {
            warn!(%code, %start, %end, "no sessions in range");
            return Err(StockviewError::NoData { code: code.clone() });
        }
        info!(%code, sessions = bars.len(), "loaded price history");
        loaded.push((code, bars));
    }

    loaded
        .into_iter()
        .map(|(code, bars)| build_chart(code, bars, request).map_err(StockviewError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::IndicatorId;

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
    fn build_chart_aligns_all_parts() {
        let bars = make_bars(&[103.0, 104.0, 105.0]);
        let request = IndicatorRequest::new([IndicatorId::Rsi]);
        let chart = build_chart("AAPL", bars, &request).unwrap();

        assert_eq!(chart.code, "AAPL");
        assert_eq!(chart.session_count(), 3);
        assert_eq!(chart.candles, vec![CandleLabel::Gain; 3]);
        assert_eq!(chart.returns.len(), 3);
        assert_eq!(chart.indicators.len(), 1);
    }

    #[test]
    fn build_chart_rejects_empty() {
        let err = build_chart("AAPL", vec![], &IndicatorRequest::default()).unwrap_err();
        assert!(matches!(err, EngineError::Input(_)));
    }
}
