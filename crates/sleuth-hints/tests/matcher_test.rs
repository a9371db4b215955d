//! Ranking against the fixture dataset with mock providers.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use sleuth_core::CandidateRecord;
use sleuth_hints::{HintMatcher, HintOutcome, RankingSnapshot};
use sleuth_store::CandidateStore;
use test_fixtures::{load_fixture, FailingProvider, KeywordProvider, RecordingProvider};

#[derive(Deserialize)]
struct HintScenario {
    hint: String,
    keywords: Vec<String>,
    expected: String,
}

fn store() -> CandidateStore {
    CandidateStore::from_records(vec![
        CandidateRecord::new("Umm Kulthum")
            .with_description("Egyptian singer known as the Star of the East"),
        CandidateRecord::new("Naguib Mahfouz")
            .with_description("Egyptian novelist who won the Nobel Prize in Literature"),
        CandidateRecord::new("Mohamed Salah")
            .with_description("Egyptian footballer who plays for Liverpool"),
        CandidateRecord::new("Ahmed Zewail")
            .with_description("Chemist awarded the Nobel Prize in Chemistry"),
        CandidateRecord::new("Faten Hamama").with_description("Egyptian film actress"),
    ])
    .unwrap()
}

fn snapshot(store: &CandidateStore, excluded: &[&str], hint: &str) -> RankingSnapshot {
    let pool = store.initial_pool(1.0);
    let excluded: HashSet<_> = excluded.iter().filter_map(|n| store.handle_of(n)).collect();
    RankingSnapshot::capture(store, &pool, &excluded, hint)
}

fn matched_name(outcome: HintOutcome) -> String {
    match outcome {
        HintOutcome::Match { name, .. } => name,
        other => panic!("expected match, got {other:?}"),
    }
}

#[test]
fn fixture_scenarios_pick_expected_candidate() {
    let scenarios: Vec<HintScenario> = load_fixture("scenarios/hint_scenarios.json");
    let store = store();
    for sc in scenarios {
        let keywords: Vec<&str> = sc.keywords.iter().map(String::as_str).collect();
        let matcher = HintMatcher::new(Arc::new(KeywordProvider::new(&keywords)));
        let outcome = matcher.rank(&snapshot(&store, &[], &sc.hint));
        assert_eq!(matched_name(outcome), sc.expected, "hint: {}", sc.hint);
    }
}

#[test]
fn excluded_candidates_are_never_returned() {
    let store = store();
    let matcher = HintMatcher::new(Arc::new(KeywordProvider::new(&["nobel", "chemistry"])));
    let outcome = matcher.rank(&snapshot(&store, &["Ahmed Zewail"], "nobel chemistry"));
    assert_eq!(matched_name(outcome), "Naguib Mahfouz");
}

#[test]
fn hint_and_descriptions_share_one_batch() {
    let store = store();
    let provider = Arc::new(RecordingProvider::new(&["singer"]));
    let matcher = HintMatcher::new(provider.clone());
    matcher.rank(&snapshot(&store, &["Mohamed Salah"], "a singer"));

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 5);
    assert_eq!(calls[0][0], "a singer");
}

#[test]
fn provider_failure_is_unavailable_not_panic() {
    let store = store();
    let matcher = HintMatcher::new(Arc::new(FailingProvider::new()));
    let outcome = matcher.rank(&snapshot(&store, &[], "anything"));
    assert!(matches!(outcome, HintOutcome::ProviderUnavailable { .. }));
}

#[test]
fn all_excluded_is_no_candidates() {
    let store = store();
    let all: Vec<&str> = store.iter().map(|(_, r)| r.name.as_str()).collect();
    let matcher = HintMatcher::new(Arc::new(KeywordProvider::new(&["x"])));
    assert_eq!(matcher.rank(&snapshot(&store, &all, "x")), HintOutcome::NoCandidates);
}

#[tokio::test]
async fn spawned_rank_resolves_to_same_outcome() {
    let store = store();
    let matcher = HintMatcher::new(Arc::new(KeywordProvider::new(&["liverpool"])));
    let snap = snapshot(&store, &[], "liverpool");
    let expected = matcher.rank(&snap);
    let outcome = matcher.spawn_rank(snap).await;
    assert_eq!(outcome, expected);
    assert!(outcome.is_match());
}
