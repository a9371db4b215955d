use std::collections::HashSet;

use sleuth_store::{CandidateHandle, CandidatePool, CandidateStore};

/// One rankable candidate, copied out of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub handle: CandidateHandle,
    pub name: String,
    pub description: String,
}

/// Immutable input to a ranking request: the accumulated hint and every pool
/// member that has not been excluded, in pool order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingSnapshot {
    pub hint: String,
    pub entries: Vec<SnapshotEntry>,
}

impl RankingSnapshot {
    pub fn capture(
        store: &CandidateStore,
        pool: &CandidatePool,
        excluded: &HashSet<CandidateHandle>,
        hint: impl Into<String>,
    ) -> Self {
        let entries = pool
            .without(excluded)
            .into_iter()
            .map(|entry| {
                let record = store.get(entry.handle);
                SnapshotEntry {
                    handle: entry.handle,
                    name: record.name.clone(),
                    description: record.description.clone(),
                }
            })
            .collect();
        Self {
            hint: hint.into(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Texts for a single embedding batch: the hint first, then every description.
    pub fn embedding_texts(&self) -> Vec<String> {
        std::iter::once(self.hint.clone())
            .chain(self.entries.iter().map(|e| e.description.clone()))
            .collect()
    }
}
