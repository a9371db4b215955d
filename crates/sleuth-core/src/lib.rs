//! # sleuth-core
//!
//! Foundation crate for the Sleuth guessing engine.
//! Defines the candidate model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod candidate;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod similarity;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use candidate::{Answer, AttributeProbe, CandidateRecord, CategoricalAttribute};
pub use config::SleuthConfig;
pub use errors::{SleuthError, SleuthResult};
