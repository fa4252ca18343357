//! Log output for the command-line tool
//!
//! The library only emits `tracing` events. Installing a subscriber is left
//! to binaries.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::utils::error::{ScheduleError, ScheduleResult};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// Print timestamps in front of every line
    pub with_time: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            with_time: false,
        }
    }
}

impl LoggingConfig {
    /// Level from the CLI's `-q` / `-v` flags
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        };
        Self {
            level: level.to_string(),
            ..Self::default()
        }
    }
}

/// Install a compact stderr subscriber. `RUST_LOG` takes precedence over `config.level`.
pub fn init_logging(config: &LoggingConfig) -> ScheduleResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = Registry::default().with(env_filter);
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let installed = if config.with_time {
        registry.with(layer).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };
    installed.map_err(|e| ScheduleError::config(format!("cannot install logger: {}", e)))?;

    tracing::debug!(level = %config.level, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbosity() {
        assert_eq!(LoggingConfig::from_verbosity(0, false).level, "warn");
        assert_eq!(LoggingConfig::from_verbosity(1, false).level, "info");
        assert_eq!(LoggingConfig::from_verbosity(5, false).level, "trace");
        assert_eq!(LoggingConfig::from_verbosity(3, true).level, "error");
    }
}
