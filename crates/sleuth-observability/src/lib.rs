//! # sleuth-observability
//!
//! Logging for the Sleuth workspace.
//!
//! - `tracing_setup` — subscriber installation (`SLEUTH_LOG`, pretty or JSON) and span macros
//! - `events` — one structured event per session milestone

pub mod events;
pub mod tracing_setup;

pub use tracing_setup::{build_filter, init_tracing, LOG_ENV_VAR};
