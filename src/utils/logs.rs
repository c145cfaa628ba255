use std::str::FromStr;
use tracing::Level;
use crate::core::domain::Configuration;

// JSON lines for CloudWatch; the level comes from the configuration and falls back to INFO.
pub(crate) fn setup_tracing(config: &Configuration) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(config))
        .with_target(false)
        // ANSI color codes show up as garbage in CloudWatch logs.
        .with_ansi(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .json()
        .init();
}

fn log_level(config: &Configuration) -> Level {
    Level::from_str(config.log_level.as_str()).unwrap_or(Level::INFO)
}
