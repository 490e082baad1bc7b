//! Car Dashboard Front End
//!
//! Reads pipe-delimited telemetry records line by line, validates them, and
//! renders accepted readings on stdout. Rejections are logged and skipped.

pub mod config;
pub mod display;

pub use crate::config::{AppConfig, LogFormat, OutputFormat};
pub use crate::display::ConsoleDisplay;

use anyhow::anyhow;
use data_validator::{CarDashboard, DisplayUnit};
use std::collections::BTreeMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Outcome of one input session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: u64,
    pub rejected: u64,
    /// Rejection count per error kind
    pub rejected_by_kind: BTreeMap<&'static str, u64>,
}

/// Initialize logging (written to stderr; stdout carries the display output)
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let level: Level = level
        .parse()
        .map_err(|_| anyhow!("invalid log level {level:?}"))?;

    match format {
        LogFormat::Text => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(true)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .json()
                .with_max_level(level)
                .with_target(true)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

/// Feed every non-blank input line through the dashboard until EOF
pub async fn run<R, D>(input: R, dashboard: &mut CarDashboard<D>) -> anyhow::Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    D: DisplayUnit,
{
    let mut summary = RunSummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match dashboard.process(Some(line)) {
            Ok(reading) => {
                summary.accepted += 1;
                debug!(speed = reading.speed, "Displayed reading");
            }
            Err(err) => {
                summary.rejected += 1;
                *summary.rejected_by_kind.entry(err.kind()).or_default() += 1;
                warn!(kind = err.kind(), input = line, "Rejected reading: {}", err);
            }
        }
    }

    Ok(summary)
}
