//! Subscriber installation.

pub mod spans;

use sleuth_core::config::ObservabilityConfig;
use sleuth_core::errors::{SleuthError, SleuthResult};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV_VAR: &str = "SLEUTH_LOG";

/// Filter from `SLEUTH_LOG` if set and valid, else the configured level.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global subscriber, writing to stderr.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> SleuthResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| SleuthError::ConfigError(format!("tracing init failed: {e}")))
}
