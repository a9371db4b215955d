use serde::{Deserialize, Serialize};

use super::defaults;

/// Session controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Questioning stops once the pool has at most this many candidates.
    pub final_stage_pool_size: usize,
    /// Hint inputs that request the remaining-candidate listing instead of a guess.
    /// Compared case-insensitively after trimming.
    pub dont_know_tokens: Vec<String>,
}

impl SessionConfig {
    /// Whether `input` is empty or one of the configured "don't know" tokens.
    pub fn is_dont_know(&self, input: &str) -> bool {
        let normalized = input.trim().to_lowercase();
        normalized.is_empty()
            || self
                .dont_know_tokens
                .iter()
                .any(|t| t.trim().to_lowercase() == normalized)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            final_stage_pool_size: defaults::DEFAULT_FINAL_STAGE_POOL_SIZE,
            dont_know_tokens: defaults::DEFAULT_DONT_KNOW_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}
