//! Layered configuration. Every section defaults independently, so a partial
//! TOML file only overrides what it names.

pub mod defaults;
mod embedding_config;
mod observability_config;
mod scoring_config;
mod session_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::ScoringConfig;
pub use session_config::SessionConfig;

use crate::errors::{SleuthError, SleuthResult};

/// Root configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SleuthConfig {
    pub scoring: ScoringConfig,
    pub session: SessionConfig,
    pub embedding: EmbeddingConfig,
    pub observability: ObservabilityConfig,
}

impl SleuthConfig {
    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml(toml_str: &str) -> SleuthResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| SleuthError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> SleuthResult<()> {
        self.scoring.validate()
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: &Path) -> SleuthResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SleuthError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }
}
