//! QuestionSelector: enumerate untried probes over the live pool and pick
//! the one with the largest gain.
//!
//! Gain is computed as parent entropy minus the expected entropy of the two
//! branches, where each branch entropy is taken over a single-outcome count
//! vector (`H(a, 0)` and `H(b, 0)`). Those branch entropies are always zero,
//! so the gain always equals the parent entropy and the selector effectively
//! prefers the split closest to 50/50 by raw counts.

use std::collections::HashMap;

use serde::Serialize;
use sleuth_core::{AttributeProbe, CategoricalAttribute};
use sleuth_store::{CandidatePool, CandidateStore};
use tracing::debug;

use crate::asked::AskedSet;
use crate::entropy::entropy;

/// The partition a probe induces on the pool and the resulting gain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeEvaluation {
    pub probe: AttributeProbe,
    /// Candidates on the "yes" side.
    pub match_count: usize,
    /// Candidates on the "no" side.
    pub non_match_count: usize,
    pub parent_entropy: f64,
    pub expected_entropy: f64,
    pub gain: f64,
}

impl ProbeEvaluation {
    fn from_counts(probe: AttributeProbe, match_count: usize, total: usize) -> Self {
        let non_match_count = total - match_count;
        let parent_entropy = entropy(&[match_count, non_match_count]);
        let branch_match = entropy(&[match_count, 0]);
        let branch_non_match = entropy(&[non_match_count, 0]);
        let expected_entropy = if total == 0 {
            0.0
        } else {
            let t = total as f64;
            (match_count as f64 / t) * branch_match + (non_match_count as f64 / t) * branch_non_match
        };
        Self {
            probe,
            match_count,
            non_match_count,
            parent_entropy,
            expected_entropy,
            gain: parent_entropy - expected_entropy,
        }
    }
}

/// Stateless question selector.
#[derive(Debug, Clone, Default)]
pub struct QuestionSelector;

impl QuestionSelector {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a single probe against the pool.
    pub fn evaluate(
        &self,
        store: &CandidateStore,
        pool: &CandidatePool,
        probe: &AttributeProbe,
    ) -> ProbeEvaluation {
        let match_count = pool
            .handles()
            .filter(|&h| store.get(h).matches(probe))
            .count();
        ProbeEvaluation::from_counts(probe.clone(), match_count, pool.len())
    }

    /// Every probe not yet asked, evaluated, in selection order: attributes in
    /// [`CategoricalAttribute::ALL`] order, values in order of first appearance
    /// in the pool, then the alive probe. Blank values are never probed.
    pub fn candidate_probes(
        &self,
        store: &CandidateStore,
        pool: &CandidatePool,
        asked: &AskedSet,
    ) -> Vec<ProbeEvaluation> {
        let total = pool.len();
        let mut evaluations = Vec::new();

        for attribute in CategoricalAttribute::ALL {
            // One pass per attribute: ordered distinct values with counts.
            let mut order: Vec<&str> = Vec::new();
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for handle in pool.handles() {
                let value = store.get(handle).value(attribute);
                if value.trim().is_empty() {
                    continue;
                }
                let count = counts.entry(value).or_insert_with(|| {
                    order.push(value);
                    0
                });
                *count += 1;
            }

            for value in order {
                let probe = AttributeProbe::categorical(attribute, value);
                if asked.contains(&probe) {
                    continue;
                }
                evaluations.push(ProbeEvaluation::from_counts(probe, counts[value], total));
            }
        }

        if !asked.contains(&AttributeProbe::Alive) {
            let alive = pool.handles().filter(|&h| store.get(h).alive).count();
            evaluations.push(ProbeEvaluation::from_counts(AttributeProbe::Alive, alive, total));
        }

        evaluations
    }

    /// The probe with the strictly largest positive gain; earlier probes win
    /// ties. `None` when the pool has at most one candidate or nothing splits it.
    pub fn select(
        &self,
        store: &CandidateStore,
        pool: &CandidatePool,
        asked: &AskedSet,
    ) -> Option<ProbeEvaluation> {
        if pool.len() <= 1 {
            return None;
        }

        let mut best: Option<ProbeEvaluation> = None;
        let mut best_gain = 0.0;
        for evaluation in self.candidate_probes(store, pool, asked) {
            if evaluation.gain > best_gain {
                best_gain = evaluation.gain;
                best = Some(evaluation);
            }
        }

        match &best {
            Some(e) => debug!(
                probe = %e.probe,
                matches = e.match_count,
                non_matches = e.non_match_count,
                gain = e.gain,
                "selected probe"
            ),
            None => debug!(pool = pool.len(), asked = asked.len(), "no informative probe left"),
        }
        best
    }
}
