//! Shared series checks and alignment helpers.

use crate::domain::error::InputError;
use crate::domain::ohlcv::OhlcvBar;

/// Reject an empty series or one whose dates are not strictly increasing.
pub fn validate_series(bars: &[OhlcvBar]) -> Result<(), InputError> {
    if bars.is_empty() {
        return Err(InputError::EmptySeries);
    }

    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(InputError::UnorderedDates {
                index: i + 1,
                previous: pair[0].date,
                current: pair[1].date,
            });
        }
    }

    Ok(())
}

pub fn closes(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Replace non-finite values with the undefined marker.
pub fn finite_or_none(value: f64) -> Option<f64> {
    if value.is_finite() { Some(value) } else { None }
}
