//! Session: one guessing game from the first question to a terminal outcome.

use std::collections::HashSet;
use std::sync::Arc;

use sleuth_core::config::{SessionConfig, SleuthConfig};
use sleuth_core::errors::{SessionError, SleuthResult};
use sleuth_core::models::{CandidateView, ListingEntry};
use sleuth_core::traits::IEmbeddingProvider;
use sleuth_core::{Answer, AttributeProbe};
use sleuth_hints::{HintMatcher, HintOutcome, RankTask, RankingSnapshot};
use sleuth_observability::events;
use sleuth_scoring::{renormalize, ApplyOutcome, ScoringModel};
use sleuth_selection::{AskedSet, QuestionSelector};
use sleuth_store::{CandidateHandle, CandidatePool, CandidateStore};
use tracing::debug;

use crate::prompt::{GuessKind, HintReply, HintSubmission, HintTicket, NoGuessReason, Prompt};
use crate::stage::{Outcome, SessionStatus, Stage};

/// Internal position of the state machine. Finer than [`Stage`]: the final
/// hinting stage is split by what it is waiting for.
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    NotStarted,
    Questioning { probe: AttributeProbe },
    GuessConfirm { handle: CandidateHandle },
    SingleConfirm { handle: CandidateHandle },
    Hinting,
    Ranking { ticket_id: u64, previous_hint: String },
    MatchConfirm { handle: CandidateHandle },
    Done(Outcome),
}

impl Phase {
    fn stage(&self) -> Stage {
        match self {
            Phase::NotStarted => Stage::NotStarted,
            Phase::Questioning { .. } => Stage::Questioning,
            Phase::GuessConfirm { .. } => Stage::GuessConfirm,
            Phase::SingleConfirm { .. } => Stage::FinalSingleConfirm,
            Phase::Hinting | Phase::Ranking { .. } | Phase::MatchConfirm { .. } => {
                Stage::FinalHinting
            }
            Phase::Done(outcome) => Stage::Done(*outcome),
        }
    }

    fn awaiting(&self) -> &'static str {
        match self {
            Phase::NotStarted => "start",
            Phase::Questioning { .. } => "an answer",
            Phase::GuessConfirm { .. } | Phase::SingleConfirm { .. } | Phase::MatchConfirm { .. } => {
                "a guess confirmation"
            }
            Phase::Hinting => "a hint",
            Phase::Ranking { .. } => "a hint ranking",
            Phase::Done(_) => "nothing",
        }
    }
}

/// A single guessing session.
///
/// All mutation goes through `start`, `submit_answer`, `submit_hint`,
/// `confirm_guess` and the non-blocking hint calls (`begin_hint`,
/// `complete_hint`, `cancel_hint`). Calls that do not fit the current phase
/// fail with a [`SessionError`] and leave the session untouched.
pub struct Session {
    id: String,
    store: Arc<CandidateStore>,
    matcher: HintMatcher,
    scoring: ScoringModel,
    selector: QuestionSelector,
    config: SessionConfig,
    pool: CandidatePool,
    asked: AskedSet,
    excluded: HashSet<CandidateHandle>,
    hint: String,
    phase: Phase,
    /// Set after a rejected early guess; cleared by the next applied answer.
    skip_confidence: bool,
    next_ticket: u64,
    winner: Option<CandidateHandle>,
}

impl Session {
    /// Create a session over the whole store with a fresh uuid.
    pub fn new(
        store: Arc<CandidateStore>,
        provider: Arc<dyn IEmbeddingProvider>,
        config: &SleuthConfig,
    ) -> Self {
        Self::with_id(
            uuid::Uuid::new_v4().to_string(),
            store,
            HintMatcher::new(provider),
            config,
        )
    }

    pub(crate) fn with_id(
        id: String,
        store: Arc<CandidateStore>,
        matcher: HintMatcher,
        config: &SleuthConfig,
    ) -> Self {
        let scoring = ScoringModel::new(config.scoring.clone());
        let pool = scoring.initial_pool(&store);
        Self {
            id,
            store,
            matcher,
            scoring,
            selector: QuestionSelector::new(),
            config: config.session.clone(),
            pool,
            asked: AskedSet::new(),
            excluded: HashSet::new(),
            hint: String::new(),
            phase: Phase::NotStarted,
            skip_confidence: false,
            next_ticket: 1,
            winner: None,
        }
    }

    /// Replace the starting pool, e.g. to play over a subset of the store or
    /// to resume with known scores.
    ///
    /// Every handle must come from this session's store, at most once, with a
    /// finite positive score. The pool is renormalized to a mean of 1.
    pub fn with_pool(mut self, mut pool: CandidatePool) -> SleuthResult<Self> {
        if self.phase != Phase::NotStarted {
            return Err(self.unexpected("a replacement pool"));
        }

        let mut seen = HashSet::with_capacity(pool.len());
        for entry in pool.entries() {
            let reason = if entry.handle.index() >= self.store.len() {
                format!("handle {} is not in a store of {}", entry.handle.index(), self.store.len())
            } else if !seen.insert(entry.handle) {
                format!("{} appears twice", self.store.get(entry.handle).name)
            } else if !entry.score.is_finite() || entry.score <= 0.0 {
                format!("{} has score {}", self.store.get(entry.handle).name, entry.score)
            } else {
                continue;
            };
            return Err(SessionError::InvalidPool { reason }.into());
        }

        renormalize(&mut pool);
        self.pool = pool;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    // ── Front-end calls ─────────────────────────────────────────────────────

    /// Begin the game and return the first prompt.
    pub fn start(&mut self) -> SleuthResult<Prompt> {
        match self.phase {
            Phase::NotStarted => {
                debug!(session_id = %self.id, candidates = self.pool.len(), "session started");
                Ok(self.advance())
            }
            _ => Err(self.unexpected("start")),
        }
    }

    /// What the session is currently waiting for.
    pub fn current_prompt(&self) -> Prompt {
        match &self.phase {
            Phase::NotStarted => Prompt::NotStarted,
            Phase::Questioning { probe } => Prompt::Question {
                probe: probe.clone(),
                text: probe.question_text(),
                remaining: self.pool.len(),
            },
            Phase::GuessConfirm { handle } => self.confirm_prompt(GuessKind::Early, *handle),
            Phase::SingleConfirm { handle } => {
                self.confirm_prompt(GuessKind::LastCandidate, *handle)
            }
            Phase::MatchConfirm { handle } => self.confirm_prompt(GuessKind::HintMatch, *handle),
            Phase::Hinting => Prompt::AwaitHint {
                remaining: self.remaining(),
                hint_so_far: self.hint.clone(),
            },
            Phase::Ranking { ticket_id, .. } => Prompt::Ranking {
                ticket_id: *ticket_id,
            },
            Phase::Done(outcome) => Prompt::Finished { outcome: *outcome },
        }
    }

    /// Answer the pending question.
    pub fn submit_answer(&mut self, answer: Answer) -> SleuthResult<Prompt> {
        let probe = match &self.phase {
            Phase::Questioning { probe } => probe.clone(),
            _ => return Err(self.unexpected("an answer")),
        };

        let outcome = self
            .scoring
            .apply(&self.store, &mut self.pool, &probe, answer);
        self.asked.insert(probe.clone());
        self.skip_confidence = false;
        events::answer_applied(
            &self.id,
            &probe.to_string(),
            answer.as_str(),
            apply_label(outcome),
            self.pool.len(),
        );

        if self.pool.is_empty() {
            return Ok(self.finish(Outcome::Exhausted));
        }
        Ok(self.advance())
    }

    /// Confirm (`true`) or reject the proposed candidate.
    pub fn confirm_guess(&mut self, correct: bool) -> SleuthResult<Prompt> {
        let (kind, handle) = match self.phase {
            Phase::GuessConfirm { handle } => (GuessKind::Early, handle),
            Phase::SingleConfirm { handle } => (GuessKind::LastCandidate, handle),
            Phase::MatchConfirm { handle } => (GuessKind::HintMatch, handle),
            _ => return Err(self.unexpected("a guess confirmation")),
        };

        if correct {
            self.winner = Some(handle);
            return Ok(self.finish(Outcome::Success));
        }

        events::guess_rejected(&self.id, &self.store.get(handle).name, kind_label(kind));
        match kind {
            GuessKind::Early => {
                self.scoring.reject_guess(&mut self.pool, handle);
                self.skip_confidence = true;
                Ok(self.advance())
            }
            GuessKind::LastCandidate => {
                self.excluded.insert(handle);
                Ok(self.enter_final_stage())
            }
            GuessKind::HintMatch => {
                self.excluded.insert(handle);
                if self.remaining() == 0 {
                    return Ok(self.finish(Outcome::Exhausted));
                }
                self.phase = Phase::Hinting;
                Ok(self.current_prompt())
            }
        }
    }

    /// Submit a hint and rank synchronously on the calling thread.
    ///
    /// An empty hint or a "don't know" token ends the session with the
    /// remaining-candidate listing.
    pub fn submit_hint(&mut self, text: &str) -> SleuthResult<HintReply> {
        match self.begin_hint(text)? {
            HintSubmission::Listed(entries) => Ok(HintReply::Listed { entries }),
            HintSubmission::Pending(ticket) => {
                let outcome = self.matcher.rank(&ticket.snapshot);
                self.complete_hint(ticket.id, outcome)
            }
        }
    }

    /// Coarse stage plus counters.
    pub fn state(&self) -> SessionStatus {
        SessionStatus {
            session_id: self.id.clone(),
            stage: self.phase.stage(),
            remaining: self.remaining(),
            questions_asked: self.asked.len(),
            excluded: self.excluded.len(),
            hint: self.hint.clone(),
            winner: self.winner.map(|h| self.store.get(h).name.clone()),
        }
    }

    // ── Non-blocking hint path ──────────────────────────────────────────────

    /// Accept a hint without ranking it. The returned ticket holds an
    /// immutable snapshot; rank it anywhere and report back with
    /// [`Session::complete_hint`].
    pub fn begin_hint(&mut self, text: &str) -> SleuthResult<HintSubmission> {
        if self.phase != Phase::Hinting {
            return Err(self.unexpected("a hint"));
        }

        if self.config.is_dont_know(text) {
            let entries = self.listing();
            self.finish(Outcome::ExhaustedListed);
            return Ok(HintSubmission::Listed(entries));
        }

        let previous_hint = self.hint.clone();
        let trimmed = text.trim();
        if !self.hint.is_empty() {
            self.hint.push(' ');
        }
        self.hint.push_str(trimmed);

        let ticket_id = self.next_ticket;
        self.next_ticket += 1;
        let snapshot = RankingSnapshot::capture(&self.store, &self.pool, &self.excluded, &self.hint);
        self.phase = Phase::Ranking {
            ticket_id,
            previous_hint,
        };
        debug!(session_id = %self.id, ticket_id, hint = %self.hint, "hint accepted");

        Ok(HintSubmission::Pending(HintTicket {
            id: ticket_id,
            snapshot,
        }))
    }

    /// Rank a ticket's snapshot on tokio's blocking pool.
    pub fn spawn_rank(&self, ticket: &HintTicket) -> RankTask {
        self.matcher.spawn_rank(ticket.snapshot.clone())
    }

    /// Apply a ranking result. A ticket that is no longer pending (cancelled,
    /// superseded, or the session moved on) yields [`HintReply::Discarded`].
    pub fn complete_hint(&mut self, ticket_id: u64, outcome: HintOutcome) -> SleuthResult<HintReply> {
        match &self.phase {
            Phase::Ranking { ticket_id: pending, .. } if *pending == ticket_id => {}
            _ => {
                debug!(session_id = %self.id, ticket_id, "stale hint result discarded");
                return Ok(HintReply::Discarded);
            }
        }

        match outcome {
            HintOutcome::Match {
                handle, similarity, ..
            } if self.pool.contains(handle) && !self.excluded.contains(&handle) => {
                let record = self.store.get(handle);
                events::hint_ranked(
                    &self.id,
                    self.hint.len(),
                    Some(record.name.as_str()),
                    Some(similarity),
                );
                events::guess_proposed(
                    &self.id,
                    &record.name,
                    kind_label(GuessKind::HintMatch),
                    similarity,
                );
                self.phase = Phase::MatchConfirm { handle };
                Ok(HintReply::Match {
                    candidate: self.view(handle),
                })
            }
            HintOutcome::Match { .. } | HintOutcome::NoCandidates => {
                self.no_guess(NoGuessReason::NoCandidates)
            }
            HintOutcome::ProviderUnavailable { reason } => {
                self.no_guess(NoGuessReason::ProviderUnavailable { reason })
            }
        }
    }

    /// Withdraw the pending hint. The accumulated hint reverts to what it
    /// was before the hint was submitted.
    pub fn cancel_hint(&mut self) -> SleuthResult<()> {
        match std::mem::replace(&mut self.phase, Phase::Hinting) {
            Phase::Ranking {
                ticket_id,
                previous_hint,
            } => {
                self.hint = previous_hint;
                debug!(session_id = %self.id, ticket_id, "hint cancelled");
                Ok(())
            }
            other => {
                self.phase = other;
                Err(self.unexpected("a hint cancellation"))
            }
        }
    }

    // ── Transitions ─────────────────────────────────────────────────────────

    /// Questioning entry: confidence check, then the final-stage threshold,
    /// then the selector.
    fn advance(&mut self) -> Prompt {
        if self.pool.is_empty() {
            return self.finish(Outcome::Exhausted);
        }

        if !self.skip_confidence {
            if let Some(check) = self.scoring.confidence(&self.pool) {
                if check.triggered {
                    events::guess_proposed(
                        &self.id,
                        &self.store.get(check.top).name,
                        kind_label(GuessKind::Early),
                        check.top_score,
                    );
                    self.phase = Phase::GuessConfirm { handle: check.top };
                    return self.current_prompt();
                }
            }
        }

        if self.pool.len() <= self.config.final_stage_pool_size {
            return self.enter_final_stage();
        }

        match self.selector.select(&self.store, &self.pool, &self.asked) {
            Some(evaluation) => {
                events::question_asked(
                    &self.id,
                    &evaluation.probe.to_string(),
                    self.pool.len(),
                    evaluation.gain,
                );
                self.phase = Phase::Questioning {
                    probe: evaluation.probe,
                };
                self.current_prompt()
            }
            None => self.enter_final_stage(),
        }
    }

    fn enter_final_stage(&mut self) -> Prompt {
        let remaining = self.pool.without(&self.excluded);
        events::final_stage_entered(&self.id, remaining.len(), self.excluded.len());
        match remaining.as_slice() {
            [] => self.finish(Outcome::Exhausted),
            [only] => {
                events::guess_proposed(
                    &self.id,
                    &self.store.get(only.handle).name,
                    kind_label(GuessKind::LastCandidate),
                    only.score,
                );
                self.phase = Phase::SingleConfirm {
                    handle: only.handle,
                };
                self.current_prompt()
            }
            _ => {
                self.phase = Phase::Hinting;
                self.current_prompt()
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Prompt {
        self.phase = Phase::Done(outcome);
        events::session_finished(&self.id, outcome.as_str(), self.asked.len());
        Prompt::Finished { outcome }
    }

    fn no_guess(&mut self, reason: NoGuessReason) -> SleuthResult<HintReply> {
        events::hint_ranked(&self.id, self.hint.len(), None, None);
        self.phase = Phase::Hinting;
        Ok(HintReply::NoGuess { reason })
    }

    // ── Helpers ─────────────────────────────────────────────────────────────

    fn remaining(&self) -> usize {
        self.pool
            .handles()
            .filter(|h| !self.excluded.contains(h))
            .count()
    }

    fn view(&self, handle: CandidateHandle) -> CandidateView {
        let score = self.pool.score_of(handle).unwrap_or_default();
        CandidateView::new(self.store.get(handle), score)
    }

    fn confirm_prompt(&self, kind: GuessKind, handle: CandidateHandle) -> Prompt {
        Prompt::ConfirmGuess {
            kind,
            candidate: self.view(handle),
        }
    }

    /// Non-excluded pool members by descending score.
    fn listing(&self) -> Vec<ListingEntry> {
        self.pool
            .ranked()
            .into_iter()
            .filter(|e| !self.excluded.contains(&e.handle))
            .map(|e| ListingEntry::new(self.store.get(e.handle), e.score))
            .collect()
    }

    fn unexpected(&self, input: &'static str) -> sleuth_core::SleuthError {
        match self.phase {
            Phase::Done(outcome) => SessionError::SessionFinished {
                outcome: outcome.to_string(),
            },
            _ => SessionError::UnexpectedInput {
                input,
                awaiting: self.phase.awaiting(),
            },
        }
        .into()
    }
}

fn apply_label(outcome: ApplyOutcome) -> &'static str {
    match outcome {
        ApplyOutcome::Ignored => "ignored",
        ApplyOutcome::Filtered { .. } => "filtered",
        ApplyOutcome::Contradiction => "contradiction",
    }
}

fn kind_label(kind: GuessKind) -> &'static str {
    match kind {
        GuessKind::Early => "early",
        GuessKind::LastCandidate => "last_candidate",
        GuessKind::HintMatch => "hint_match",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::CandidateRecord;
    use sleuth_store::PoolEntry;
    use test_fixtures::KeywordProvider;

    fn session(records: Vec<CandidateRecord>) -> Session {
        let store = Arc::new(CandidateStore::from_records(records).unwrap());
        Session::new(
            store,
            Arc::new(KeywordProvider::new(&["x"])),
            &SleuthConfig::default(),
        )
    }

    fn named(names: &[&str]) -> Vec<CandidateRecord> {
        names.iter().map(|n| CandidateRecord::new(*n)).collect()
    }

    #[test]
    fn new_session_is_not_started() {
        let s = session(named(&["a", "b"]));
        assert_eq!(s.current_prompt(), Prompt::NotStarted);
        assert_eq!(s.state().stage, Stage::NotStarted);
    }

    #[test]
    fn small_pool_goes_straight_to_hinting() {
        let mut s = session(named(&["a", "b", "c"]));
        assert!(matches!(s.start().unwrap(), Prompt::AwaitHint { remaining: 3, .. }));
        assert_eq!(s.state().stage, Stage::FinalHinting);
    }

    #[test]
    fn cancel_restores_previous_hint() {
        let mut s = session(named(&["a", "b"]));
        s.start().unwrap();
        s.begin_hint("first").unwrap();
        s.cancel_hint().unwrap();
        assert_eq!(s.state().hint, "");
        assert_eq!(s.phase, Phase::Hinting);
    }

    #[test]
    fn cancel_without_pending_hint_is_usage_error() {
        let mut s = session(named(&["a", "b"]));
        s.start().unwrap();
        assert!(s.cancel_hint().is_err());
        assert_eq!(s.phase, Phase::Hinting);
    }

    #[test]
    fn rejected_early_guess_skips_confidence_once() {
        let records: Vec<_> = (0..5)
            .map(|i| {
                CandidateRecord::new(format!("p{i}")).with_gender(if i < 2 { "M" } else { "F" })
            })
            .collect();
        let s = session(records);
        let handles: Vec<_> = s.store().iter().map(|(h, _)| h).collect();
        let pool = CandidatePool::from_entries(
            handles
                .iter()
                .enumerate()
                .map(|(i, &handle)| PoolEntry {
                    handle,
                    score: if i == 0 { 3.0 } else { 0.5 },
                })
                .collect(),
        );
        let mut s = s.with_pool(pool).unwrap();

        match s.start().unwrap() {
            Prompt::ConfirmGuess { kind, candidate } => {
                assert_eq!(kind, GuessKind::Early);
                assert_eq!(candidate.name, "p0");
            }
            other => panic!("expected early guess, got {other:?}"),
        }

        // Still confident after the 0.5 penalty, but the check is skipped.
        assert!(matches!(s.confirm_guess(false).unwrap(), Prompt::Question { .. }));
        let mean = s.pool().mean_score().unwrap();
        assert!((mean - 1.0).abs() < 1e-9);
    }

    fn entry(handle: CandidateHandle, score: f64) -> PoolEntry {
        PoolEntry { handle, score }
    }

    #[test]
    fn replacement_pool_is_renormalized() {
        let s = session(named(&["a", "b", "c", "d"]));
        let handles: Vec<_> = s.store().iter().map(|(h, _)| h).collect();
        let pool = CandidatePool::from_entries(vec![entry(handles[0], 4.0), entry(handles[2], 2.0)]);

        let s = s.with_pool(pool).unwrap();
        assert_eq!(s.pool().len(), 2);
        assert!((s.pool().mean_score().unwrap() - 1.0).abs() < 1e-9);
        assert!((s.pool().score_of(handles[0]).unwrap() - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let big = CandidateStore::from_records(named(&["a", "b", "c", "d", "e"])).unwrap();
        let foreign = big.handle_of("e").unwrap();

        let s = session(named(&["a", "b"]));
        let err = s
            .with_pool(CandidatePool::from_entries(vec![entry(foreign, 1.0)]))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            sleuth_core::SleuthError::SessionError(SessionError::InvalidPool { .. })
        ));
    }

    #[test]
    fn duplicate_or_non_positive_entries_are_rejected() {
        let s = session(named(&["a", "b"]));
        let a = s.store().handle_of("a").unwrap();
        let b = s.store().handle_of("b").unwrap();
        assert!(s
            .with_pool(CandidatePool::from_entries(vec![entry(a, 1.0), entry(a, 1.0)]))
            .is_err());

        let s = session(named(&["a", "b"]));
        assert!(s
            .with_pool(CandidatePool::from_entries(vec![entry(a, 2.0), entry(b, 0.0)]))
            .is_err());
    }

    #[test]
    fn replacing_pool_after_start_is_usage_error() {
        let mut s = session(named(&["a", "b"]));
        s.start().unwrap();
        let pool = s.pool().clone();
        assert!(s.with_pool(pool).err().unwrap().is_usage_error());
    }
}
