//! Car Dashboard - Main Entry Point

use dashboard::{init_logging, run, AppConfig, ConsoleDisplay};
use data_validator::CarDashboard;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.log_level, config.log_format)?;

    info!("=== Car Dashboard v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        transmission = %config.validation.transmission,
        "Reading telemetry records from stdin..."
    );

    let display = ConsoleDisplay::new(std::io::stdout(), config.output);
    let mut dashboard = CarDashboard::try_new(config.validation.clone(), display)?;

    let summary = run(BufReader::new(tokio::io::stdin()), &mut dashboard).await?;

    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        "Input exhausted"
    );
    for (kind, count) in &summary.rejected_by_kind {
        info!(kind = *kind, count = *count, "Rejections by kind");
    }
    let history = serde_json::to_string(dashboard.pipeline().history())?;
    info!(history = %history, "Final history window");

    Ok(())
}
