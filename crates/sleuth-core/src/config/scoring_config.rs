use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{SleuthError, SleuthResult};

/// Score dynamics and early-guess thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score every candidate starts a session with.
    pub initial_score: f64,
    /// Multiplier for candidates kept by a confirmed categorical value.
    pub match_boost: f64,
    /// Multiplier for candidates kept by an answered alive question.
    pub alive_boost: f64,
    /// Multiplier for candidates kept by a denied categorical value.
    pub exclusion_boost: f64,
    /// Multiplier for non-matching candidates when a confirmed value matches nobody.
    pub contradiction_penalty: f64,
    /// Multiplier applied to a rejected early guess.
    pub rejected_guess_penalty: f64,
    /// Minimum top-score / mean-score ratio before an early guess.
    pub confidence_ratio: f64,
    /// Top score must exceed this before an early guess.
    pub min_guess_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial_score: defaults::DEFAULT_INITIAL_SCORE,
            match_boost: defaults::DEFAULT_MATCH_BOOST,
            alive_boost: defaults::DEFAULT_ALIVE_BOOST,
            exclusion_boost: defaults::DEFAULT_EXCLUSION_BOOST,
            contradiction_penalty: defaults::DEFAULT_CONTRADICTION_PENALTY,
            rejected_guess_penalty: defaults::DEFAULT_REJECTED_GUESS_PENALTY,
            confidence_ratio: defaults::DEFAULT_CONFIDENCE_RATIO,
            min_guess_score: defaults::DEFAULT_MIN_GUESS_SCORE,
        }
    }
}

impl ScoringConfig {
    /// Every multiplier and the initial score must be finite and positive,
    /// otherwise renormalization cannot keep the mean score at 1.
    pub fn validate(&self) -> SleuthResult<()> {
        let fields = [
            ("initial_score", self.initial_score),
            ("match_boost", self.match_boost),
            ("alive_boost", self.alive_boost),
            ("exclusion_boost", self.exclusion_boost),
            ("contradiction_penalty", self.contradiction_penalty),
            ("rejected_guess_penalty", self.rejected_guess_penalty),
            ("confidence_ratio", self.confidence_ratio),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SleuthError::ConfigError(format!(
                    "scoring.{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.min_guess_score.is_finite() {
            return Err(SleuthError::ConfigError(format!(
                "scoring.min_guess_score must be finite, got {}",
                self.min_guess_score
            )));
        }
        Ok(())
    }
}
