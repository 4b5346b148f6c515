//! InvestMate - a terminal social network for retail investors.

use anyhow::Context;
use investmate::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a daily file; stdout belongs to the terminal UI
    let log_dir = investmate::config::log_dir().context("Failed to resolve log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "investmate.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "investmate=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    // Load configuration, writing a default file on first run
    match Config::write_default_if_missing(None) {
        Ok(true) => tracing::info!("Wrote default configuration"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "Could not write default configuration"),
    }
    let config = Config::load_or_default().context("Failed to load configuration")?;

    // Run the application
    let mut app = App::new(config).context("Failed to start the terminal UI")?;
    app.run().await?;

    Ok(())
}
