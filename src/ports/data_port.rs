//! OHLCV data source port trait.

use crate::domain::error::StockviewError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Sessions for `code` dated within `start_date..=end_date`, oldest first.
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, StockviewError>;

    fn list_symbols(&self) -> Result<Vec<String>, StockviewError>;

    /// First date, last date and session count, or `None` when the code has no rows.
    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockviewError>;
}
