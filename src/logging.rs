use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::RunConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("logging already initialised: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides `filter`.
pub fn init(filter: &str) -> Result<(), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(env) => env,
        Err(_) => EnvFilter::try_new(filter).map_err(|source| LoggingError::Filter {
            value: filter.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(LoggingError::Subscriber)
}

pub fn init_from_config(config: &RunConfig) -> Result<(), LoggingError> {
    init(&config.log_filter)
}

#[cfg(test)]
#[path = "../tests/src_inline/logging.rs"]
mod tests;
