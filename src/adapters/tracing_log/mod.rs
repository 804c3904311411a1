// Tracing log adapter - Subscriber installation for structured logging

use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so stdout
/// stays free for command output.
pub fn init_logging(level: &str, json: bool) -> Result<(), DomainError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| DomainError::Configuration(format!("Invalid log filter '{}': {}", level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| DomainError::Internal(format!("Failed to install log subscriber: {}", e)))
}
