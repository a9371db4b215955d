//! ScoringModel: how answers and rejections move scores.

use serde::Serialize;
use sleuth_core::config::ScoringConfig;
use sleuth_core::{Answer, AttributeProbe};
use sleuth_store::{CandidateHandle, CandidatePool, CandidateStore};
use tracing::debug;

use crate::confidence::ConfidenceCheck;

/// What an answer did to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// "Don't know": nothing changed.
    Ignored,
    /// The pool was filtered; `removed` candidates left it.
    Filtered { removed: usize },
    /// A confirmed value matched nobody; non-matching scores were penalized instead.
    Contradiction,
}

/// Divide every score by the pool mean. Returns false (and does nothing)
/// for an empty pool.
pub fn renormalize(pool: &mut CandidatePool) -> bool {
    match pool.mean_score() {
        Some(mean) if mean > 0.0 => {
            pool.scale_all(1.0 / mean);
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringModel {
    config: ScoringConfig,
}

impl ScoringModel {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// A fresh pool over the whole store at the configured initial score.
    pub fn initial_pool(&self, store: &CandidateStore) -> CandidatePool {
        store.initial_pool(self.config.initial_score)
    }

    /// Apply an answer to `probe`.
    pub fn apply(
        &self,
        store: &CandidateStore,
        pool: &mut CandidatePool,
        probe: &AttributeProbe,
        answer: Answer,
    ) -> ApplyOutcome {
        let matches = |h: CandidateHandle| store.get(h).matches(probe);

        let outcome = match (probe, answer) {
            (_, Answer::DontKnow) => return ApplyOutcome::Ignored,
            (AttributeProbe::Alive, answer) => {
                let want_alive = answer == Answer::Yes;
                let removed = pool.retain(|h| store.get(h).alive == want_alive);
                pool.scale_all(self.config.alive_boost);
                ApplyOutcome::Filtered { removed }
            }
            (AttributeProbe::Categorical { .. }, Answer::Yes) => {
                if pool.handles().any(matches) {
                    let removed = pool.retain(matches);
                    pool.scale_all(self.config.match_boost);
                    ApplyOutcome::Filtered { removed }
                } else {
                    pool.scale_where(self.config.contradiction_penalty, |h| !matches(h));
                    ApplyOutcome::Contradiction
                }
            }
            (AttributeProbe::Categorical { .. }, Answer::No) => {
                let removed = pool.retain(|h| !matches(h));
                pool.scale_all(self.config.exclusion_boost);
                ApplyOutcome::Filtered { removed }
            }
        };

        renormalize(pool);
        debug!(
            probe = %probe,
            answer = %answer,
            outcome = ?outcome,
            remaining = pool.len(),
            "answer applied"
        );
        outcome
    }

    /// Compare the top candidate against the mean. `None` for an empty pool.
    pub fn confidence(&self, pool: &CandidatePool) -> Option<ConfidenceCheck> {
        let top = pool.top()?;
        let mean_score = pool.mean_score()?;
        let confidence = top.score / mean_score;
        Some(ConfidenceCheck {
            top: top.handle,
            top_score: top.score,
            mean_score,
            confidence,
            triggered: confidence >= self.config.confidence_ratio
                && top.score > self.config.min_guess_score,
        })
    }

    /// Penalize a rejected early guess and renormalize.
    pub fn reject_guess(&self, pool: &mut CandidatePool, handle: CandidateHandle) {
        pool.scale_where(self.config.rejected_guess_penalty, |h| h == handle);
        renormalize(pool);
    }
}
