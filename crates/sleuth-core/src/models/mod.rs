mod candidate_view;
mod degradation_event;

pub use candidate_view::{CandidateView, ListingEntry};
pub use degradation_event::DegradationEvent;
