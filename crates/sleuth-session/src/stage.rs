use std::fmt;

use serde::{Deserialize, Serialize};

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The player confirmed a guess.
    Success,
    /// Every candidate was filtered out or rejected.
    Exhausted,
    /// The player gave up in the final stage and was shown the listing.
    ExhaustedListed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Exhausted => "exhausted",
            Self::ExhaustedListed => "exhausted-listed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse session stage, as reported to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "outcome")]
pub enum Stage {
    NotStarted,
    Questioning,
    GuessConfirm,
    FinalSingleConfirm,
    /// Awaiting a hint, a ranking, or confirmation of a hint match.
    FinalHinting,
    Done(Outcome),
}

impl Stage {
    pub fn is_done(self) -> bool {
        matches!(self, Stage::Done(_))
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Stage::Done(o) => Some(o),
            _ => None,
        }
    }
}

/// Read-only summary returned by `state()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub stage: Stage,
    /// Pool members not yet excluded.
    pub remaining: usize,
    pub questions_asked: usize,
    pub excluded: usize,
    /// Accumulated hint text, empty before the first hint.
    pub hint: String,
    /// Confirmed candidate on success.
    pub winner: Option<String>,
}
