//! # sleuth-scoring
//!
//! Score dynamics for a candidate pool.
//!
//! - `model` — `ScoringModel`: apply answers, penalize rejected guesses
//! - `confidence` — `ConfidenceCheck`: top score relative to the pool mean
//!
//! Every operation that changes scores on a non-empty pool leaves the mean
//! score at exactly 1 (within floating tolerance) before returning.

pub mod confidence;
pub mod model;

pub use confidence::ConfidenceCheck;
pub use model::{renormalize, ApplyOutcome, ScoringModel};
