//! SessionManager: concurrent per-session access via DashMap.

use std::sync::Arc;

use dashmap::DashMap;
use sleuth_core::config::SleuthConfig;
use sleuth_core::errors::{SessionError, SleuthResult};
use sleuth_core::traits::IEmbeddingProvider;
use sleuth_core::Answer;
use sleuth_hints::{HintMatcher, HintOutcome, RankTask};
use sleuth_observability::session_span;
use sleuth_store::CandidateStore;

use crate::prompt::{HintReply, HintSubmission, HintTicket, Prompt};
use crate::session::Session;
use crate::stage::SessionStatus;

/// Registry of independent sessions over one shared store.
///
/// Each call holds the map's exclusive guard for that session only, so two
/// calls on the same session are serialized while different sessions proceed
/// in parallel. Sessions share nothing mutable.
pub struct SessionManager {
    store: Arc<CandidateStore>,
    matcher: HintMatcher,
    config: SleuthConfig,
    sessions: Arc<DashMap<String, Session>>,
}

impl SessionManager {
    pub fn new(
        store: Arc<CandidateStore>,
        provider: Arc<dyn IEmbeddingProvider>,
        config: SleuthConfig,
    ) -> Self {
        Self {
            store,
            matcher: HintMatcher::new(provider),
            config,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Create a session (not yet started) and return its id.
    pub fn create_session(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let session = Session::with_id(
            id.clone(),
            Arc::clone(&self.store),
            self.matcher.clone(),
            &self.config,
        );
        self.sessions.insert(id.clone(), session);
        id
    }

    fn with_session<R>(
        &self,
        session_id: &str,
        call: &'static str,
        f: impl FnOnce(&mut Session) -> SleuthResult<R>,
    ) -> SleuthResult<R> {
        let _span = session_span!(session_id, call).entered();
        match self.sessions.get_mut(session_id) {
            Some(mut entry) => f(entry.value_mut()),
            None => Err(SessionError::UnknownSession {
                id: session_id.to_string(),
            }
            .into()),
        }
    }

    pub fn start(&self, session_id: &str) -> SleuthResult<Prompt> {
        self.with_session(session_id, "start", |s| s.start())
    }

    pub fn current_prompt(&self, session_id: &str) -> SleuthResult<Prompt> {
        self.with_session(session_id, "current_prompt", |s| Ok(s.current_prompt()))
    }

    pub fn submit_answer(&self, session_id: &str, answer: Answer) -> SleuthResult<Prompt> {
        self.with_session(session_id, "submit_answer", |s| s.submit_answer(answer))
    }

    pub fn confirm_guess(&self, session_id: &str, correct: bool) -> SleuthResult<Prompt> {
        self.with_session(session_id, "confirm_guess", |s| s.confirm_guess(correct))
    }

    /// Synchronous hint: ranks while holding the session guard.
    pub fn submit_hint(&self, session_id: &str, text: &str) -> SleuthResult<HintReply> {
        self.with_session(session_id, "submit_hint", |s| s.submit_hint(text))
    }

    pub fn state(&self, session_id: &str) -> SleuthResult<SessionStatus> {
        self.with_session(session_id, "state", |s| Ok(s.state()))
    }

    /// Accept a hint; rank the ticket without holding the session guard.
    pub fn begin_hint(&self, session_id: &str, text: &str) -> SleuthResult<HintSubmission> {
        self.with_session(session_id, "begin_hint", |s| s.begin_hint(text))
    }

    pub fn spawn_rank(&self, ticket: &HintTicket) -> RankTask {
        self.matcher.spawn_rank(ticket.snapshot.clone())
    }

    pub fn complete_hint(
        &self,
        session_id: &str,
        ticket_id: u64,
        outcome: HintOutcome,
    ) -> SleuthResult<HintReply> {
        self.with_session(session_id, "complete_hint", |s| s.complete_hint(ticket_id, outcome))
    }

    pub fn cancel_hint(&self, session_id: &str) -> SleuthResult<()> {
        self.with_session(session_id, "cancel_hint", |s| s.cancel_hint())
    }

    /// Discard a session.
    pub fn remove_session(&self, session_id: &str) -> Option<SessionStatus> {
        self.sessions.remove(session_id).map(|(_, s)| s.state())
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}
