//! Domain error types.

use chrono::NaiveDate;

/// The OHLCV series handed to the engine is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("empty OHLCV series: at least one session is required")]
    EmptySeries,

    #[error("session {index} dated {current} does not follow {previous}")]
    UnorderedDates {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
}

/// An indicator request names something outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("unknown indicator: {name:?}")]
    UnknownIndicator { name: String },
}

/// Top-level error type for stockview.
#[derive(Debug, thiserror::Error)]
pub enum StockviewError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("data source error: {reason}")]
    Data { reason: String },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockviewError> for std::process::ExitCode {
    fn from(err: &StockviewError) -> Self {
        let code: u8 = match err {
            StockviewError::Io(_) => 1,
            StockviewError::ConfigParse { .. }
            | StockviewError::ConfigMissing { .. }
            | StockviewError::ConfigInvalid { .. } => 2,
            StockviewError::Data { .. } | StockviewError::NoData { .. } => 3,
            StockviewError::Request(_) => 4,
            StockviewError::Input(_) => 5,
            StockviewError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
