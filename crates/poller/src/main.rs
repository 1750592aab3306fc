use std::time::Duration;

use reviewbot_common::config::AppConfig;
use reviewbot_notifier::TelegramSink;
use reviewbot_poller::poller::HomeworkPoller;
use reviewbot_poller::source::PracticumClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "reviewbot_poller=info,reviewbot_engine=debug,reviewbot_notifier=info".into()
            }),
        )
        .json()
        .init();

    tracing::info!("ReviewBot starting...");

    // Configuration must be complete and valid before the loop starts
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration, shutting down");
            std::process::exit(1);
        }
    };

    let source = PracticumClient::from_config(&config)?;
    let sink = TelegramSink::from_config(&config)?;

    let mut poller = HomeworkPoller::new(
        source,
        sink,
        Duration::from_secs(config.retry_interval_secs),
        config.start_from_date,
    );

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("ReviewBot stopped.");
    Ok(())
}
