//! CandidateStore: the immutable dataset arena.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sleuth_core::errors::{DatasetError, SleuthResult};
use sleuth_core::CandidateRecord;

use crate::pool::{CandidatePool, PoolEntry};

/// Index of a record inside a [`CandidateStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateHandle(u32);

impl CandidateHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Every record of a dataset, in load order. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    records: Vec<CandidateRecord>,
    by_name: HashMap<String, CandidateHandle>,
}

impl CandidateStore {
    /// Build a store, rejecting duplicate names.
    pub fn from_records(records: Vec<CandidateRecord>) -> SleuthResult<Self> {
        let mut by_name = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let handle = CandidateHandle(i as u32);
            if by_name.insert(record.name.clone(), handle).is_some() {
                return Err(DatasetError::DuplicateName {
                    name: record.name.clone(),
                }
                .into());
            }
        }
        Ok(Self { records, by_name })
    }

    /// Record behind a handle.
    ///
    /// # Panics
    /// Panics if the handle was issued by a different store.
    pub fn get(&self, handle: CandidateHandle) -> &CandidateRecord {
        &self.records[handle.index()]
    }

    /// Look up a handle by the record's unique name.
    pub fn handle_of(&self, name: &str) -> Option<CandidateHandle> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records with their handles, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (CandidateHandle, &CandidateRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (CandidateHandle(i as u32), r))
    }

    /// A pool holding every record at `initial_score`.
    pub fn initial_pool(&self, initial_score: f64) -> CandidatePool {
        CandidatePool::from_entries(
            (0..self.records.len())
                .map(|i| PoolEntry {
                    handle: CandidateHandle(i as u32),
                    score: initial_score,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected() {
        let result = CandidateStore::from_records(vec![
            CandidateRecord::new("a"),
            CandidateRecord::new("b"),
            CandidateRecord::new("a"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn handles_resolve_in_load_order() {
        let store =
            CandidateStore::from_records(vec![CandidateRecord::new("a"), CandidateRecord::new("b")])
                .unwrap();
        let b = store.handle_of("b").unwrap();
        assert_eq!(b.index(), 1);
        assert_eq!(store.get(b).name, "b");
        assert!(store.handle_of("c").is_none());
    }

    #[test]
    fn initial_pool_covers_every_record() {
        let store =
            CandidateStore::from_records(vec![CandidateRecord::new("a"), CandidateRecord::new("b")])
                .unwrap();
        let pool = store.initial_pool(1.0);
        assert_eq!(pool.len(), 2);
        assert!(pool.entries().iter().all(|e| e.score == 1.0));
    }
}
