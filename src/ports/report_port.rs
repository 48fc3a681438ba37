//! Rendering boundary port trait.

use crate::domain::chart::ChartData;
use crate::domain::error::StockviewError;
use std::io::Write;

/// Port for handing computed charts to whatever draws them.
pub trait ReportPort {
    fn write(&self, charts: &[ChartData], out: &mut dyn Write) -> Result<(), StockviewError>;
}
