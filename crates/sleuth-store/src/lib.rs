//! # sleuth-store
//!
//! Candidate storage for a guessing session.
//!
//! - `store` — `CandidateStore`, the immutable arena of every record in a dataset
//! - `pool` — `CandidatePool`, the live subset of handles with a score each
//!
//! The store is built once and shared (usually behind an `Arc`); each session
//! owns its own pool. Pools never copy records, only handles into the arena.

pub mod pool;
pub mod store;

pub use pool::{CandidatePool, PoolEntry};
pub use store::{CandidateHandle, CandidateStore};
