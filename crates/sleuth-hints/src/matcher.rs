//! Hint ranking over a snapshot, synchronously or on tokio's blocking pool.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use serde::{Deserialize, Serialize};
use sleuth_core::traits::IEmbeddingProvider;
use sleuth_observability::ranking_span;
use sleuth_store::CandidateHandle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::snapshot::RankingSnapshot;

/// Result of one ranking request. None of these is an error: an unavailable
/// provider and an empty candidate set are both recoverable "no guess" cases,
/// reported separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintOutcome {
    Match {
        handle: CandidateHandle,
        name: String,
        similarity: f64,
    },
    NoCandidates,
    ProviderUnavailable {
        reason: String,
    },
}

impl HintOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, HintOutcome::Match { .. })
    }
}

/// Ranks snapshot candidates against the hint with an injected provider.
#[derive(Clone)]
pub struct HintMatcher {
    provider: Arc<dyn IEmbeddingProvider>,
}

impl HintMatcher {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn IEmbeddingProvider> {
        &self.provider
    }

    /// Pick the candidate whose description is most similar to the hint.
    ///
    /// The hint and all descriptions go out as one batch so they share a
    /// vector space. Ties keep the earliest candidate; NaN similarities never win.
    /// A provider error or panic becomes `ProviderUnavailable` (panics can only
    /// be caught when built with `panic = "unwind"`).
    pub fn rank(&self, snapshot: &RankingSnapshot) -> HintOutcome {
        if snapshot.is_empty() {
            return HintOutcome::NoCandidates;
        }
        let _span = ranking_span!(snapshot.len(), self.provider.name()).entered();

        let texts = snapshot.embedding_texts();
        let embedded = panic::catch_unwind(AssertUnwindSafe(|| self.provider.embed_batch(&texts)));
        let vectors = match embedded {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => {
                warn!(provider = self.provider.name(), error = %e, "hint embedding failed");
                return HintOutcome::ProviderUnavailable {
                    reason: e.to_string(),
                };
            }
            Err(_) => {
                warn!(provider = self.provider.name(), "embedding provider panicked");
                return HintOutcome::ProviderUnavailable {
                    reason: format!("embedding provider {} panicked", self.provider.name()),
                };
            }
        };
        if vectors.len() != texts.len() {
            return HintOutcome::ProviderUnavailable {
                reason: format!(
                    "provider returned {} vectors for {} texts",
                    vectors.len(),
                    texts.len()
                ),
            };
        }

        let (hint_vec, description_vecs) = vectors.split_at(1);
        let mut best: Option<(usize, f64)> = None;
        for (i, vec) in description_vecs.iter().enumerate() {
            let sim = self.provider.similarity(&hint_vec[0], vec);
            if sim.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, b)| sim > b) {
                best = Some((i, sim));
            }
        }

        match best {
            Some((i, similarity)) => {
                let entry = &snapshot.entries[i];
                debug!(
                    candidate = %entry.name,
                    similarity,
                    candidates = snapshot.len(),
                    "hint ranked"
                );
                HintOutcome::Match {
                    handle: entry.handle,
                    name: entry.name.clone(),
                    similarity,
                }
            }
            None => HintOutcome::ProviderUnavailable {
                reason: "no comparable embeddings".to_string(),
            },
        }
    }

    /// Run [`HintMatcher::rank`] on the blocking pool. Must be called from
    /// within a tokio runtime.
    pub fn spawn_rank(&self, snapshot: RankingSnapshot) -> RankTask {
        let matcher = self.clone();
        RankTask {
            handle: tokio::task::spawn_blocking(move || matcher.rank(&snapshot)),
        }
    }
}

/// A background ranking request. Await it for the outcome, or cancel it.
///
/// A cancelled or panicked task resolves to `ProviderUnavailable`.
pub struct RankTask {
    handle: JoinHandle<HintOutcome>,
}

impl RankTask {
    /// Abort the task. A ranking already running finishes in the background
    /// but its result is dropped.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for RankTask {
    type Output = HintOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => HintOutcome::ProviderUnavailable {
                reason: "ranking cancelled".to_string(),
            },
            Err(e) => HintOutcome::ProviderUnavailable {
                reason: format!("ranking task failed: {e}"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotEntry;
    use sleuth_core::errors::SleuthResult;
    use sleuth_store::CandidateStore;

    /// Returns the same vector for every text, so every candidate ties.
    struct ConstantProvider;
    impl IEmbeddingProvider for ConstantProvider {
        fn embed(&self, _text: &str) -> SleuthResult<Vec<f32>> {
            Ok(vec![1.0, 1.0])
        }
        fn embed_batch(&self, texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 1.0]).collect())
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn name(&self) -> &str {
            "constant"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct PanickingProvider;
    impl IEmbeddingProvider for PanickingProvider {
        fn embed(&self, _text: &str) -> SleuthResult<Vec<f32>> {
            panic!("model crashed")
        }
        fn embed_batch(&self, _texts: &[String]) -> SleuthResult<Vec<Vec<f32>>> {
            panic!("model crashed")
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn name(&self) -> &str {
            "panicking"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn snapshot(names: &[&str]) -> RankingSnapshot {
        let store = CandidateStore::from_records(
            names
                .iter()
                .map(|n| sleuth_core::CandidateRecord::new(*n).with_description(format!("about {n}")))
                .collect(),
        )
        .unwrap();
        RankingSnapshot {
            hint: "hint".to_string(),
            entries: store
                .iter()
                .map(|(handle, r)| SnapshotEntry {
                    handle,
                    name: r.name.clone(),
                    description: r.description.clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_snapshot_has_no_candidates() {
        let matcher = HintMatcher::new(Arc::new(ConstantProvider));
        assert_eq!(matcher.rank(&snapshot(&[])), HintOutcome::NoCandidates);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let matcher = HintMatcher::new(Arc::new(ConstantProvider));
        match matcher.rank(&snapshot(&["first", "second", "third"])) {
            HintOutcome::Match { name, similarity, .. } => {
                assert_eq!(name, "first");
                assert!((similarity - 1.0).abs() < 1e-9);
            }
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn panicking_provider_is_unavailable() {
        let matcher = HintMatcher::new(Arc::new(PanickingProvider));
        match matcher.rank(&snapshot(&["a", "b"])) {
            HintOutcome::ProviderUnavailable { reason } => assert!(reason.contains("panicking")),
            other => panic!("expected provider unavailable, got {other:?}"),
        }
    }
}
