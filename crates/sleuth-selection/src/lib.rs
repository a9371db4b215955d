//! # sleuth-selection
//!
//! Picks the next question to ask.
//!
//! ## Modules
//!
//! - `entropy` — Shannon entropy over outcome counts
//! - `asked` — `AskedSet`, the append-only record of questions already asked
//! - `selector` — `QuestionSelector`, probe enumeration and gain ranking

pub mod asked;
pub mod entropy;
pub mod selector;

pub use asked::AskedSet;
pub use entropy::entropy;
pub use selector::{ProbeEvaluation, QuestionSelector};
