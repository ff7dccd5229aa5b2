use crate::config::AppConfig;
use tracing::info;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Filter for the configured level, e.g. `info` or `quizmatch=debug,tower_http=warn`.
pub fn level_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    })
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `APP_LOG_LEVEL`; colored
/// output is only used in development.
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.telemetry.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(config.environment.colored_logs())
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    info!(
        environment = ?config.environment,
        level = %config.telemetry.log_level,
        dominance_share = config.matcher.dominance_share,
        dominance_margin = config.matcher.dominance_margin,
        "telemetry initialised"
    );
    Ok(())
}
