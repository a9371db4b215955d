use std::fmt;

use serde::{Deserialize, Serialize};
use sleuth_core::models::{CandidateView, ListingEntry};
use sleuth_core::AttributeProbe;
use sleuth_hints::RankingSnapshot;

use crate::stage::Outcome;

/// Why a guess is being proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessKind {
    /// Confidence check fired during questioning.
    Early,
    /// Only one candidate is left.
    LastCandidate,
    /// Best match for the accumulated hint.
    HintMatch,
}

/// What the session is waiting for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum Prompt {
    NotStarted,
    Question {
        probe: AttributeProbe,
        text: String,
        remaining: usize,
    },
    ConfirmGuess {
        kind: GuessKind,
        candidate: CandidateView,
    },
    AwaitHint {
        remaining: usize,
        hint_so_far: String,
    },
    /// A hint ticket is out; waiting for `complete_hint` or `cancel_hint`.
    Ranking { ticket_id: u64 },
    Finished { outcome: Outcome },
}

/// Why a hint produced no guess. The session keeps waiting for hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoGuessReason {
    NoCandidates,
    ProviderUnavailable { reason: String },
}

impl fmt::Display for NoGuessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidates => f.write_str("no candidates left to compare"),
            Self::ProviderUnavailable { reason } => {
                write!(f, "embedding provider unavailable: {reason}")
            }
        }
    }
}

/// Result of a hint submission or completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintReply {
    /// The player gave up; remaining candidates by descending score. Session is done.
    Listed { entries: Vec<ListingEntry> },
    /// Best match, awaiting `confirm_guess`.
    Match { candidate: CandidateView },
    NoGuess { reason: NoGuessReason },
    /// The completion belonged to a ticket that is no longer pending.
    Discarded,
}

/// A pending background ranking: the snapshot to rank and the id to complete it with.
#[derive(Debug, Clone, PartialEq)]
pub struct HintTicket {
    pub id: u64,
    pub snapshot: RankingSnapshot,
}

/// Result of `begin_hint`.
#[derive(Debug, Clone, PartialEq)]
pub enum HintSubmission {
    /// The hint asked for the listing; the session is done.
    Listed(Vec<ListingEntry>),
    /// Ranking must be run and reported back through `complete_hint`.
    Pending(HintTicket),
}
