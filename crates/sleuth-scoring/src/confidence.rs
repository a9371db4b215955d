//! Early-guess confidence.

use serde::Serialize;
use sleuth_store::CandidateHandle;

/// Result of comparing the best candidate against the pool mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceCheck {
    pub top: CandidateHandle,
    pub top_score: f64,
    pub mean_score: f64,
    /// `top_score / mean_score`.
    pub confidence: f64,
    /// Whether the controller should propose `top` as an early guess.
    pub triggered: bool,
}
