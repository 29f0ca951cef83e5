//! Tracing subscriber setup driven by [`LoggingConfig`]

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::ConfigError;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Returns an error
/// rather than panicking when a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|_| ConfigError::InvalidValue {
            key: "LOG_LEVEL".to_string(),
            value: config.level.clone(),
        })?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| ConfigError::Logging {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Compact,
        };

        // Another test in this binary may have installed a subscriber already,
        // so only the second call is guaranteed to fail.
        let _ = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(matches!(second, Err(ConfigError::Logging { .. })));
    }
}
