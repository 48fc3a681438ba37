//! Linear regression trend line.
//!
//! Ordinary least squares of close against session index 0..n-1 over the
//! whole series, reported as the fitted values at the first and last session.
//! A single session has no slope: the line is flat at that close.

use crate::domain::indicator::TrendLine;
use crate::domain::ohlcv::OhlcvBar;

/// `(slope, intercept)` of the least-squares line through `(i, values[i])`.
pub fn least_squares(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let (sxy, sxx) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (i, &y)| {
            let dx = i as f64 - x_mean;
            (sxy + dx * (y - y_mean), sxx + dx * dx)
        });

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    Some((slope, y_mean - slope * x_mean))
}

pub fn calculate_trend(bars: &[OhlcvBar]) -> Option<TrendLine> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let (slope, intercept) = least_squares(&closes)?;
    let first = bars.first()?;
    let last = bars.last()?;
    let last_index = (bars.len() - 1) as f64;

    Some(TrendLine {
        start_date: first.date,
        start_value: intercept,
        end_date: last.date,
        end_value: slope * last_index + intercept,
        slope,
        intercept,
    })
}
