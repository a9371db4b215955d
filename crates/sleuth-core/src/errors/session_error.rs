/// Caller-contract violations against a guessing session.
///
/// These never describe gameplay; a finished or exhausted game is an
/// `Outcome`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{input} is not accepted while the session is awaiting {awaiting}")]
    UnexpectedInput {
        input: &'static str,
        awaiting: &'static str,
    },

    #[error("session already finished: {outcome}")]
    SessionFinished { outcome: String },

    #[error("unknown session: {id}")]
    UnknownSession { id: String },

    #[error("invalid starting pool: {reason}")]
    InvalidPool { reason: String },
}
