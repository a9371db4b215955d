//! AskedSet: questions already presented in a session.

use std::collections::HashSet;

use sleuth_core::AttributeProbe;

/// Append-only set of probes. A probe stays asked for the rest of the session.
#[derive(Debug, Clone, Default)]
pub struct AskedSet {
    probes: HashSet<AttributeProbe>,
}

impl AskedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a probe. Returns false if it was already recorded.
    pub fn insert(&mut self, probe: AttributeProbe) -> bool {
        self.probes.insert(probe)
    }

    pub fn contains(&self, probe: &AttributeProbe) -> bool {
        self.probes.contains(probe)
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeProbe> {
        self.probes.iter()
    }
}
