//! Session controller scenarios.

use std::sync::Arc;

use sleuth_core::config::SleuthConfig;
use sleuth_core::errors::{SessionError, SleuthError};
use sleuth_core::traits::IEmbeddingProvider;
use sleuth_core::{Answer, AttributeProbe, CandidateRecord, CategoricalAttribute};
use sleuth_hints::HintOutcome;
use sleuth_session::{
    GuessKind, HintReply, HintSubmission, NoGuessReason, Outcome, Prompt, Session, Stage,
};
use sleuth_store::{CandidatePool, CandidateStore, PoolEntry};
use test_fixtures::{FailingProvider, KeywordProvider, RecordingProvider};

fn session_with(records: Vec<CandidateRecord>, provider: Arc<dyn IEmbeddingProvider>) -> Session {
    let store = Arc::new(CandidateStore::from_records(records).unwrap());
    Session::new(store, provider, &SleuthConfig::default())
}

/// Three candidates: small enough to start in the hinting stage.
fn trio() -> Vec<CandidateRecord> {
    vec![
        CandidateRecord::new("Umm Kulthum").with_description("singer"),
        CandidateRecord::new("Mohamed Salah").with_description("footballer"),
        CandidateRecord::new("Naguib Mahfouz").with_description("novelist"),
    ]
}

/// Five candidates where one gender question isolates the first.
fn one_man_four_women() -> Vec<CandidateRecord> {
    (0..5)
        .map(|i| {
            CandidateRecord::new(format!("p{i}"))
                .with_gender(if i == 0 { "M" } else { "F" })
                .with_country("Egypt")
        })
        .collect()
}

fn matched(reply: HintReply) -> String {
    match reply {
        HintReply::Match { candidate } => candidate.name,
        other => panic!("expected match, got {other:?}"),
    }
}

fn assert_usage_error(err: SleuthError) {
    assert!(err.is_usage_error(), "expected usage error, got {err}");
}

#[test]
fn hints_accumulate_across_rejections() {
    let provider = Arc::new(RecordingProvider::new(&["singer", "footballer", "novelist"]));
    let mut s = session_with(trio(), provider.clone());
    assert!(matches!(s.start().unwrap(), Prompt::AwaitHint { remaining: 3, .. }));

    assert_eq!(matched(s.submit_hint("  singer ").unwrap()), "Umm Kulthum");
    s.confirm_guess(false).unwrap();
    assert_eq!(matched(s.submit_hint("footballer").unwrap()), "Mohamed Salah");
    s.confirm_guess(false).unwrap();
    assert_eq!(matched(s.submit_hint("novelist").unwrap()), "Naguib Mahfouz");

    assert_eq!(
        provider.first_texts(),
        ["singer", "singer footballer", "singer footballer novelist"]
    );
    assert_eq!(s.state().hint, "singer footballer novelist");
}

#[test]
fn second_ranking_uses_exactly_joined_hints() {
    let provider = Arc::new(RecordingProvider::new(&["h1", "h2"]));
    let mut s = session_with(trio(), provider.clone());
    s.start().unwrap();
    s.submit_hint("h1").unwrap();
    s.confirm_guess(false).unwrap();
    s.submit_hint("h2").unwrap();
    assert_eq!(provider.first_texts().last().map(String::as_str), Some("h1 h2"));
}

#[test]
fn rejected_matches_are_never_reproposed() {
    let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["singer"])));
    s.start().unwrap();
    let first = matched(s.submit_hint("singer").unwrap());
    s.confirm_guess(false).unwrap();
    let second = matched(s.submit_hint("singer").unwrap());
    assert_ne!(first, second);
    assert_eq!(s.state().excluded, 1);
}

#[test]
fn rejecting_last_hint_match_exhausts() {
    let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["x"])));
    s.start().unwrap();
    for _ in 0..2 {
        s.submit_hint("x").unwrap();
        assert!(matches!(s.confirm_guess(false).unwrap(), Prompt::AwaitHint { .. }));
    }
    s.submit_hint("x").unwrap();
    assert_eq!(
        s.confirm_guess(false).unwrap(),
        Prompt::Finished {
            outcome: Outcome::Exhausted
        }
    );
}

#[test]
fn confirmed_hint_match_is_success() {
    let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["novelist"])));
    s.start().unwrap();
    assert_eq!(matched(s.submit_hint("a novelist").unwrap()), "Naguib Mahfouz");
    s.confirm_guess(true).unwrap();
    let state = s.state();
    assert_eq!(state.stage, Stage::Done(Outcome::Success));
    assert_eq!(state.winner.as_deref(), Some("Naguib Mahfouz"));
}

#[test]
fn dont_know_lists_remaining_and_finishes() {
    for input in ["", "   ", "idk", "I DONT KNOW", "dont know"] {
        let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["x"])));
        s.start().unwrap();
        match s.submit_hint(input).unwrap() {
            HintReply::Listed { entries } => {
                let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, ["Umm Kulthum", "Mohamed Salah", "Naguib Mahfouz"]);
                assert!(entries.iter().all(|e| e.status() == "Alive"));
            }
            other => panic!("expected listing for {input:?}, got {other:?}"),
        }
        assert_eq!(s.state().stage, Stage::Done(Outcome::ExhaustedListed));
    }
}

#[test]
fn listing_omits_excluded_candidates() {
    let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["singer"])));
    s.start().unwrap();
    s.submit_hint("singer").unwrap();
    s.confirm_guess(false).unwrap();
    match s.submit_hint("idk").unwrap() {
        HintReply::Listed { entries } => {
            assert_eq!(entries.len(), 2);
            assert!(entries.iter().all(|e| e.name != "Umm Kulthum"));
        }
        other => panic!("expected listing, got {other:?}"),
    }
}

#[test]
fn provider_failure_keeps_hinting() {
    let mut s = session_with(trio(), Arc::new(FailingProvider::new()));
    s.start().unwrap();
    match s.submit_hint("anything").unwrap() {
        HintReply::NoGuess {
            reason: NoGuessReason::ProviderUnavailable { .. },
        } => {}
        other => panic!("expected no guess, got {other:?}"),
    }
    assert!(matches!(s.current_prompt(), Prompt::AwaitHint { .. }));
    assert_eq!(s.state().hint, "anything");
}

#[test]
fn single_candidate_goes_to_final_confirm() {
    let mut s = session_with(one_man_four_women(), Arc::new(KeywordProvider::new(&["x"])));
    match s.start().unwrap() {
        Prompt::Question { probe, text, remaining } => {
            assert_eq!(probe, AttributeProbe::categorical(CategoricalAttribute::Gender, "M"));
            assert_eq!(text, "Is the character's gender 'M'?");
            assert_eq!(remaining, 5);
        }
        other => panic!("expected question, got {other:?}"),
    }

    match s.submit_answer(Answer::Yes).unwrap() {
        Prompt::ConfirmGuess { kind, candidate } => {
            assert_eq!(kind, GuessKind::LastCandidate);
            assert_eq!(candidate.name, "p0");
        }
        other => panic!("expected single confirm, got {other:?}"),
    }
    assert_eq!(s.state().stage, Stage::FinalSingleConfirm);

    assert_eq!(
        s.confirm_guess(false).unwrap(),
        Prompt::Finished {
            outcome: Outcome::Exhausted
        }
    );
}

#[test]
fn dont_know_answer_changes_nothing_but_is_asked() {
    let mut s = session_with(one_man_four_women(), Arc::new(KeywordProvider::new(&["x"])));
    s.start().unwrap();
    let before = s.pool().clone();
    let next = s.submit_answer(Answer::DontKnow).unwrap();
    assert_eq!(s.pool(), &before);
    assert_eq!(s.state().questions_asked, 1);
    // gender=F splits the same way and is the only informative probe left.
    match next {
        Prompt::Question { probe, .. } => {
            assert_eq!(probe, AttributeProbe::categorical(CategoricalAttribute::Gender, "F"));
        }
        other => panic!("expected question, got {other:?}"),
    }
    // Nothing left to ask after another "don't know": move to hinting.
    assert!(matches!(
        s.submit_answer(Answer::DontKnow).unwrap(),
        Prompt::AwaitHint { remaining: 5, .. }
    ));
}

#[test]
fn no_answer_narrows_to_hinting() {
    let mut s = session_with(one_man_four_women(), Arc::new(KeywordProvider::new(&["x"])));
    s.start().unwrap();
    // Four women left, nothing splits them.
    assert!(matches!(
        s.submit_answer(Answer::No).unwrap(),
        Prompt::AwaitHint { remaining: 4, .. }
    ));
}

#[test]
fn calls_out_of_turn_are_usage_errors() {
    let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["x"])));
    assert_usage_error(s.submit_answer(Answer::Yes).unwrap_err());
    assert_usage_error(s.submit_hint("x").unwrap_err());

    s.start().unwrap();
    assert_usage_error(s.start().unwrap_err());
    assert_usage_error(s.submit_answer(Answer::No).unwrap_err());
    assert_usage_error(s.confirm_guess(true).unwrap_err());

    s.submit_hint("idk").unwrap();
    match s.submit_hint("more").unwrap_err() {
        SleuthError::SessionError(SessionError::SessionFinished { outcome }) => {
            assert_eq!(outcome, "exhausted-listed");
        }
        other => panic!("expected finished error, got {other}"),
    }
}

#[test]
fn stale_ticket_is_discarded() {
    let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["singer"])));
    s.start().unwrap();
    let ticket = match s.begin_hint("singer").unwrap() {
        HintSubmission::Pending(t) => t,
        other => panic!("expected pending ticket, got {other:?}"),
    };
    assert_eq!(ticket.snapshot.hint, "singer");
    assert_eq!(ticket.snapshot.len(), 3);
    assert_eq!(s.current_prompt(), Prompt::Ranking { ticket_id: ticket.id });
    assert_usage_error(s.submit_hint("again").unwrap_err());

    s.cancel_hint().unwrap();
    let outcome = HintOutcome::NoCandidates;
    assert_eq!(s.complete_hint(ticket.id, outcome).unwrap(), HintReply::Discarded);
    assert!(matches!(s.current_prompt(), Prompt::AwaitHint { .. }));
}

#[tokio::test]
async fn background_ranking_completes_ticket() {
    let mut s = session_with(trio(), Arc::new(KeywordProvider::new(&["footballer"])));
    s.start().unwrap();
    let ticket = match s.begin_hint("footballer").unwrap() {
        HintSubmission::Pending(t) => t,
        other => panic!("expected pending ticket, got {other:?}"),
    };
    let outcome = s.spawn_rank(&ticket).await;
    assert_eq!(matched(s.complete_hint(ticket.id, outcome.clone()).unwrap()), "Mohamed Salah");
    // Reporting the same ticket twice is stale.
    assert_eq!(s.complete_hint(ticket.id, outcome).unwrap(), HintReply::Discarded);
}

#[test]
fn early_guess_follows_answer_and_confirms() {
    // Even indices are men. p0 leads but stays under the 2x ratio until the
    // women, who carry most of the remaining score, are filtered out.
    let records: Vec<_> = (0..8)
        .map(|i| CandidateRecord::new(format!("p{i}")).with_gender(if i % 2 == 0 { "M" } else { "F" }))
        .collect();
    let s = session_with(records, Arc::new(KeywordProvider::new(&["x"])));
    let entries = s
        .store()
        .iter()
        .map(|(handle, record)| PoolEntry {
            handle,
            score: match record.name.as_str() {
                "p0" => 1.9,
                "p2" | "p4" | "p6" => 0.3,
                _ => 1.3,
            },
        })
        .collect();
    let mut s = s.with_pool(CandidatePool::from_entries(entries)).unwrap();

    match s.start().unwrap() {
        Prompt::Question { probe, remaining, .. } => {
            assert_eq!(probe, AttributeProbe::categorical(CategoricalAttribute::Gender, "M"));
            assert_eq!(remaining, 8);
        }
        other => panic!("expected a question, got {other:?}"),
    }

    match s.submit_answer(Answer::Yes).unwrap() {
        Prompt::ConfirmGuess { kind, candidate } => {
            assert_eq!(kind, GuessKind::Early);
            assert_eq!(candidate.name, "p0");
            assert!(candidate.score > 2.0);
        }
        other => panic!("expected an early guess before the next question, got {other:?}"),
    }
    let status = s.state();
    assert_eq!(status.stage, Stage::GuessConfirm);
    assert_eq!(status.remaining, 4);

    assert_eq!(
        s.confirm_guess(true).unwrap(),
        Prompt::Finished { outcome: Outcome::Success }
    );
    let status = s.state();
    assert_eq!(status.stage, Stage::Done(Outcome::Success));
    assert_eq!(status.winner.as_deref(), Some("p0"));
    assert_eq!(status.questions_asked, 1);
}
