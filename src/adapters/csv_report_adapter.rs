//! CSV chart table writer.
//!
//! One row per (code, session). Indicator columns follow identifier order;
//! undefined cells are left empty. The trend line occupies a single column
//! holding its fitted value on the first and last session only.

use crate::domain::chart::ChartData;
use crate::domain::error::StockviewError;
use crate::domain::indicator::{IndicatorId, IndicatorOutput};
use crate::ports::report_port::ReportPort;
use std::io::Write;

const BASE_COLUMNS: [&str; 9] = [
    "code", "date", "open", "high", "low", "close", "volume", "candle", "returns",
];
const TREND_COLUMN: &str = "Linear Regression";

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

/// (indicator, sub-series name) per indicator column, in output order.
fn indicator_columns(chart: &ChartData) -> Vec<(IndicatorId, String)> {
    chart
        .indicators
        .iter()
        .flat_map(|(id, output)| match output {
            IndicatorOutput::Series(series) => {
                series.iter().map(|s| (id, s.name.clone())).collect::<Vec<_>>()
            }
            IndicatorOutput::Trend(_) => vec![(id, TREND_COLUMN.to_string())],
        })
        .collect()
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn indicator_cell(chart: &ChartData, id: IndicatorId, name: &str, index: usize) -> String {
    let Some(output) = chart.indicators.get(id) else {
        return String::new();
    };
    match output {
        IndicatorOutput::Series(_) => cell(output.sub_series(name).and_then(|s| s.value_at(index))),
        IndicatorOutput::Trend(line) => {
            let last = chart.session_count().saturating_sub(1);
            if index == 0 {
                cell(Some(line.start_value))
            } else if index == last {
                cell(Some(line.end_value))
            } else {
                String::new()
            }
        }
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, charts: &[ChartData], out: &mut dyn Write) -> Result<(), StockviewError> {
        let report_err = |e: csv::Error| StockviewError::Report {
            reason: format!("CSV write failed: {}", e),
        };

        let columns = charts.first().map(indicator_columns).unwrap_or_default();
        let mut wtr = csv::Writer::from_writer(out);

        let header = BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(columns.iter().map(|(_, name)| name.clone()));
        wtr.write_record(header).map_err(report_err)?;

        for chart in charts {
            for (i, bar) in chart.bars.iter().enumerate() {
                let mut record = vec![
                    chart.code.clone(),
                    bar.date.format("%Y-%m-%d").to_string(),
                    bar.open.to_string(),
                    bar.high.to_string(),
                    bar.low.to_string(),
                    bar.close.to_string(),
                    bar.volume.to_string(),
                    chart.candles[i].to_string(),
                    cell(chart.returns.value_at(i)),
                ];
                record.extend(
                    columns
                        .iter()
                        .map(|(id, name)| indicator_cell(chart, *id, name, i)),
                );
                wtr.write_record(&record).map_err(report_err)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}
