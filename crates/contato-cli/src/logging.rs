//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Builds the filter: `RUST_LOG` if set, else the configured directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| Error::Logging(format!("invalid filter '{}': {e}", config.filter))),
    }
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    installed.map_err(|e| Error::Logging(e.to_string()))
}
