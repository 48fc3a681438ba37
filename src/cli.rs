//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::chart::load_charts;
use crate::domain::engine::IndicatorRequest;
use crate::domain::error::StockviewError;
use crate::domain::indicator::IndicatorId;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_START_DATE: &str = "2020-01-01";

#[derive(Parser, Debug)]
#[command(name = "stockview", about = "Technical indicators for daily OHLCV series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute candles and indicators for a ticker (and optional comparison ticker)
    Chart(ChartArgs),
    /// List tickers available in the data directory
    ListSymbols {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show data range for a ticker
    Info {
        #[arg(long)]
        code: String,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the indicators that can be requested
    Indicators,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ChartArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub compare: Option<String>,
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Comma separated indicator labels or slugs, e.g. "30 Day SMA,rsi"
    #[arg(long)]
    pub indicators: Option<String>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Fully resolved settings for one `chart` invocation.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub data_dir: PathBuf,
    pub code: String,
    pub compare: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicators: IndicatorRequest,
    pub format: OutputFormat,
}

impl ChartConfig {
    pub fn codes(&self) -> Vec<String> {
        std::iter::once(self.code.clone())
            .chain(self.compare.clone())
            .collect()
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Chart(args) => run_chart(&args),
        Command::ListSymbols { data_dir, config } => {
            run_list_symbols(data_dir.as_deref(), config.as_deref())
        }
        Command::Info {
            code,
            data_dir,
            config,
        } => run_info(&code, data_dir.as_deref(), config.as_deref()),
        Command::Indicators => run_indicators(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, StockviewError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

fn parse_date(section: &str, key: &str, value: &str) -> Result<NaiveDate, StockviewError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| StockviewError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

/// Merge CLI flags over config values over defaults.
pub fn resolve_chart_config(
    args: &ChartArgs,
    config: Option<&dyn ConfigPort>,
) -> Result<ChartConfig, StockviewError> {
    let lookup = |section: &str, key: &str| config.and_then(|c| c.get_string(section, key));

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| lookup("data", "dir").map(PathBuf::from))
        .ok_or_else(|| StockviewError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;

    let code = args
        .code
        .clone()
        .or_else(|| lookup("chart", "code"))
        .map(|c| c.trim().to_uppercase())
        .ok_or_else(|| StockviewError::ConfigMissing {
            section: "chart".into(),
            key: "code".into(),
        })?;

    let compare = args
        .compare
        .clone()
        .or_else(|| lookup("chart", "compare"))
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty());

    let start_date = match args.start {
        Some(d) => d,
        None => parse_date(
            "chart",
            "start_date",
            &lookup("chart", "start_date").unwrap_or_else(|| DEFAULT_START_DATE.to_string()),
        )?,
    };
    let end_date = match (args.end, lookup("chart", "end_date")) {
        (Some(d), _) => d,
        (None, Some(s)) => parse_date("chart", "end_date", &s)?,
        (None, None) => NaiveDate::MAX,
    };
    if end_date < start_date {
        return Err(StockviewError::ConfigInvalid {
            section: "chart".into(),
            key: "end_date".into(),
            reason: format!("{} is before start date {}", end_date, start_date),
        });
    }

    let indicators = match args.indicators.clone().or_else(|| lookup("chart", "indicators")) {
        Some(list) => IndicatorRequest::parse_list(&list)?,
        None => IndicatorRequest::default(),
    };

    let format = match (args.format, lookup("chart", "format")) {
        (Some(f), _) => f,
        (None, Some(s)) => OutputFormat::from_str(s.trim(), true).map_err(|reason| {
            StockviewError::ConfigInvalid {
                section: "chart".into(),
                key: "format".into(),
                reason,
            }
        })?,
        (None, None) => OutputFormat::default(),
    };

    Ok(ChartConfig {
        data_dir,
        code,
        compare,
        start_date,
        end_date,
        indicators,
        format,
    })
}

fn report_port(format: OutputFormat) -> Box<dyn ReportPort> {
    match format {
        OutputFormat::Json => Box::new(JsonReportAdapter::new(true)),
        OutputFormat::Csv => Box::new(CsvReportAdapter::new()),
    }
}

/// Load, compute and write charts for a resolved config.
pub fn run_chart_pipeline(
    data_port: &dyn DataPort,
    config: &ChartConfig,
    out: &mut dyn Write,
) -> Result<(), StockviewError> {
    let codes = config.codes();
    info!(
        codes = ?codes,
        indicators = config.indicators.len(),
        "building charts"
    );

    let charts = load_charts(
        data_port,
        &codes,
        config.start_date,
        config.end_date,
        &config.indicators,
    )?;

    report_port(config.format).write(&charts, out)
}

fn run_chart(args: &ChartArgs) -> Result<(), StockviewError> {
    let file_config = args.config.as_deref().map(load_config).transpose()?;
    let config = resolve_chart_config(args, file_config.as_ref().map(|c| c as &dyn ConfigPort))?;
    let data_port = CsvAdapter::new(config.data_dir.clone());

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            let mut out = BufWriter::new(file);
            run_chart_pipeline(&data_port, &config, &mut out)?;
            out.flush()?;
            info!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_chart_pipeline(&data_port, &config, &mut out)
        }
    }
}

fn resolve_data_dir(
    data_dir: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<PathBuf, StockviewError> {
    if let Some(dir) = data_dir {
        return Ok(dir.to_path_buf());
    }
    let config = config_path.map(load_config).transpose()?;
    config
        .and_then(|c| c.get_string("data", "dir"))
        .map(PathBuf::from)
        .ok_or_else(|| StockviewError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })
}

fn run_list_symbols(data_dir: Option<&Path>, config: Option<&Path>) -> Result<(), StockviewError> {
    let port = CsvAdapter::new(resolve_data_dir(data_dir, config)?);
    let symbols = port.list_symbols()?;
    let mut out = io::stdout().lock();
    for symbol in &symbols {
        writeln!(out, "{}", symbol)?;
    }
    info!("{} symbols", symbols.len());
    Ok(())
}

fn run_info(code: &str, data_dir: Option<&Path>, config: Option<&Path>) -> Result<(), StockviewError> {
    let port = CsvAdapter::new(resolve_data_dir(data_dir, config)?);
    let code = code.trim().to_uppercase();
    match port.get_data_range(&code)? {
        Some((first, last, count)) => {
            println!("{}: {} sessions from {} to {}", code, count, first, last);
            Ok(())
        }
        None => Err(StockviewError::NoData { code }),
    }
}

fn run_indicators() -> Result<(), StockviewError> {
    write_indicator_list(&mut io::stdout().lock())
}

/// One line per indicator; `-` marks indicators defined from the first session.
pub fn write_indicator_list(out: &mut dyn Write) -> Result<(), StockviewError> {
    for id in IndicatorId::ALL {
        let lookback = match id.lookback() {
            0 | 1 => "-".to_string(),
            n => n.to_string(),
        };
        writeln!(out, "{:<10} {:<24} lookback {}", id.slug(), id.label(), lookback)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_chart_flags() {
        let cli = Cli::try_parse_from([
            "stockview",
            "chart",
            "--data-dir",
            "/tmp/prices",
            "--code",
            "aapl",
            "--start",
            "2023-01-01",
            "--indicators",
            "RSI,MACD",
            "--format",
            "csv",
        ])
        .unwrap();

        match cli.command {
            Command::Chart(args) => {
                assert_eq!(args.code.as_deref(), Some("aapl"));
                assert_eq!(args.start, NaiveDate::from_ymd_opt(2023, 1, 1));
                assert_eq!(args.format, Some(OutputFormat::Csv));
            }
            other => panic!("expected chart command, got {:?}", other),
        }
    }

    #[test]
    fn cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["stockview", "chart", "--start", "01/02/2023"]).is_err());
    }

    #[test]
    fn codes_include_comparison() {
        let args = ChartArgs {
            data_dir: Some("/tmp".into()),
            code: Some("aapl".into()),
            compare: Some("msft".into()),
            ..Default::default()
        };
        let config = resolve_chart_config(&args, None).unwrap();
        assert_eq!(config.codes(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn indicator_list_marks_missing_warmup() {
        let mut out = Vec::new();
        write_indicator_list(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), IndicatorId::ALL.len());
        let line_for = |slug: &str| {
            lines
                .iter()
                .find(|l| l.starts_with(slug))
                .copied()
                .unwrap()
        };
        assert!(line_for("sma30").ends_with("lookback 30"));
        assert!(line_for("rsi").ends_with("lookback 14"));
        assert!(line_for("macd").ends_with("lookback -"));
        assert!(line_for("ema50").ends_with("lookback -"));
        assert!(line_for("linreg").ends_with("lookback -"));
    }
}
