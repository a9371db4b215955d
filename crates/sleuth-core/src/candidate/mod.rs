//! The candidate model: records, the attributes questions are asked about,
//! probes, and the user's answers.

mod answer;
mod attribute;
mod probe;
mod record;

pub use answer::Answer;
pub use attribute::CategoricalAttribute;
pub use probe::AttributeProbe;
pub use record::CandidateRecord;
