//! CSV file data adapter.
//!
//! One file per ticker, `<dir>/<CODE>.csv`, header
//! `date,open,high,low,close,volume`, dates as `YYYY-MM-DD`.

use crate::domain::error::StockviewError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }

    fn read_all(&self, code: &str) -> Result<Vec<OhlcvBar>, StockviewError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| StockviewError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| StockviewError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            bars.push(parse_record(&record, row + 1)?);
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, row: usize) -> Result<&'r str, StockviewError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| StockviewError::Data {
            reason: format!("row {}: missing {} column", row, COLUMNS[idx]),
        })
}

fn number(record: &csv::StringRecord, idx: usize, row: usize) -> Result<f64, StockviewError> {
    field(record, idx, row)?
        .parse()
        .map_err(|e| StockviewError::Data {
            reason: format!("row {}: invalid {} value: {}", row, COLUMNS[idx], e),
        })
}

fn parse_record(record: &csv::StringRecord, row: usize) -> Result<OhlcvBar, StockviewError> {
    let date = NaiveDate::parse_from_str(field(record, 0, row)?, "%Y-%m-%d").map_err(|e| {
        StockviewError::Data {
            reason: format!("row {}: invalid date format: {}", row, e),
        }
    })?;

    Ok(OhlcvBar {
        date,
        open: number(record, 1, row)?,
        high: number(record, 2, row)?,
        low: number(record, 3, row)?,
        close: number(record, 4, row)?,
        volume: number(record, 5, row)?,
    })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, StockviewError> {
        let mut bars = self.read_all(code)?;
        bars.retain(|b| b.date >= start_date && b.date <= end_date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockviewError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StockviewError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| StockviewError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(code) = name_str.strip_suffix(".csv") {
                symbols.push(code.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockviewError> {
        let bars = self.read_all(code)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
