//! CandidatePool: the live candidate subset with one score per entry.
//!
//! The pool is a pure container: it filters, scales and reports, but never
//! decides how scores should move. Entry order is dataset order and is
//! preserved by every operation, so "first occurrence" tie-breaks are stable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::store::CandidateHandle;

/// A live candidate and its current score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub handle: CandidateHandle,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    entries: Vec<PoolEntry>,
}

impl CandidatePool {
    pub fn from_entries(entries: Vec<PoolEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn handles(&self) -> impl Iterator<Item = CandidateHandle> + '_ {
        self.entries.iter().map(|e| e.handle)
    }

    pub fn contains(&self, handle: CandidateHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn score_of(&self, handle: CandidateHandle) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.score)
    }

    /// Keep only entries for which `keep` returns true. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(CandidateHandle) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| keep(e.handle));
        before - self.entries.len()
    }

    /// Multiply the score of every entry selected by `select` by `factor`.
    pub fn scale_where(&mut self, factor: f64, mut select: impl FnMut(CandidateHandle) -> bool) {
        for entry in self.entries.iter_mut().filter(|e| select(e.handle)) {
            entry.score *= factor;
        }
    }

    /// Multiply every score by `factor`.
    pub fn scale_all(&mut self, factor: f64) {
        self.scale_where(factor, |_| true);
    }

    /// Mean score, `None` for an empty pool.
    pub fn mean_score(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: f64 = self.entries.iter().map(|e| e.score).sum();
        Some(sum / self.entries.len() as f64)
    }

    /// Highest-scoring entry; ties go to the earliest entry.
    pub fn top(&self) -> Option<PoolEntry> {
        self.entries.iter().copied().fold(None, |best, e| match best {
            Some(b) if b.score >= e.score => Some(b),
            _ => Some(e),
        })
    }

    /// Entries whose handle is not in `excluded`, in pool order.
    pub fn without(&self, excluded: &HashSet<CandidateHandle>) -> Vec<PoolEntry> {
        self.entries
            .iter()
            .filter(|e| !excluded.contains(&e.handle))
            .copied()
            .collect()
    }

    /// Entries sorted by descending score; equal scores keep pool order.
    pub fn ranked(&self) -> Vec<PoolEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
        sorted
    }
}
