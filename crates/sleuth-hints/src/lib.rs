//! # sleuth-hints
//!
//! Final-stage matcher. Ranks the non-excluded candidates by cosine similarity
//! between an accumulated free-text hint and each candidate's description.
//!
//! Ranking works on a [`RankingSnapshot`] taken when the hint is submitted, so
//! it can run in the background ([`HintMatcher::spawn_rank`]) while the
//! session moves on; stale results are the caller's to discard.

pub mod matcher;
pub mod snapshot;

pub use matcher::{HintMatcher, HintOutcome, RankTask};
pub use snapshot::{RankingSnapshot, SnapshotEntry};
