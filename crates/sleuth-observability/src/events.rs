//! Structured log events for session milestones.
//!
//! Each function emits a `tracing` event with an `event` name and the
//! session id, so a JSON log can be filtered per session.

/// Log a question being put to the player.
pub fn question_asked(session_id: &str, probe: &str, remaining: usize, gain: f64) {
    tracing::info!(
        event = "question_asked",
        session_id = %session_id,
        probe = %probe,
        remaining = remaining,
        gain = gain,
        "question asked"
    );
}

/// Log an answer applied to the pool.
pub fn answer_applied(session_id: &str, probe: &str, answer: &str, outcome: &str, remaining: usize) {
    tracing::info!(
        event = "answer_applied",
        session_id = %session_id,
        probe = %probe,
        answer = %answer,
        outcome = %outcome,
        remaining = remaining,
        "answer applied"
    );
}

/// Log a proposed guess (early, last candidate, or hint match).
pub fn guess_proposed(session_id: &str, candidate: &str, kind: &str, score: f64) {
    tracing::info!(
        event = "guess_proposed",
        session_id = %session_id,
        candidate = %candidate,
        kind = %kind,
        score = score,
        "guess proposed"
    );
}

/// Log a guess the player rejected.
pub fn guess_rejected(session_id: &str, candidate: &str, kind: &str) {
    tracing::info!(
        event = "guess_rejected",
        session_id = %session_id,
        candidate = %candidate,
        kind = %kind,
        "guess rejected"
    );
}

pub fn final_stage_entered(session_id: &str, remaining: usize, excluded: usize) {
    tracing::info!(
        event = "final_stage_entered",
        session_id = %session_id,
        remaining = remaining,
        excluded = excluded,
        "final stage entered"
    );
}

/// Log a completed hint ranking. `candidate` is `None` when no guess was possible.
pub fn hint_ranked(session_id: &str, hint_len: usize, candidate: Option<&str>, similarity: Option<f64>) {
    match (candidate, similarity) {
        (Some(candidate), Some(similarity)) => tracing::info!(
            event = "hint_ranked",
            session_id = %session_id,
            hint_len = hint_len,
            candidate = %candidate,
            similarity = similarity,
            "hint ranked"
        ),
        _ => tracing::warn!(
            event = "hint_ranked",
            session_id = %session_id,
            hint_len = hint_len,
            "hint ranked without a guess"
        ),
    }
}

/// Log a session reaching its terminal state.
pub fn session_finished(session_id: &str, outcome: &str, questions: usize) {
    tracing::info!(
        event = "session_finished",
        session_id = %session_id,
        outcome = %outcome,
        questions = questions,
        "session finished"
    );
}
