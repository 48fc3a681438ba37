//! JSON chart payload writer.
//!
//! Emits an array with one object per chart. Undefined indicator points are
//! `null`; indicator keys are identifier slugs.

use crate::domain::chart::ChartData;
use crate::domain::error::StockviewError;
use crate::ports::report_port::ReportPort;
use std::io::Write;

#[derive(Debug, Default)]
pub struct JsonReportAdapter {
    pretty: bool,
}

impl JsonReportAdapter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, charts: &[ChartData], out: &mut dyn Write) -> Result<(), StockviewError> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *out, charts)
        } else {
            serde_json::to_writer(&mut *out, charts)
        };
        result.map_err(|e| StockviewError::Report {
            reason: format!("JSON encoding failed: {}", e),
        })?;
        writeln!(out)?;
        Ok(())
    }
}
