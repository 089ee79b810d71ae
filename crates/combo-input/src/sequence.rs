use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ComboError;
use crate::snapshot::Snapshot;

/// Ordered non-idle snapshots accumulated since the last idle window.
///
/// Equality and hashing look only at the ordered `state` values, so two
/// sequences built from different (equal-shaped) key tables compare equal.
#[derive(Debug, Clone, Default)]
pub struct ComboSequence {
    steps: Vec<Snapshot>,
}

impl ComboSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. Idle snapshots end a sequence and are never part of it.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), ComboError> {
        if snapshot.is_empty() {
            return Err(ComboError::invalid(
                "idle snapshot cannot be part of a combo sequence",
            ));
        }
        self.steps.push(snapshot);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Snapshot] {
        &self.steps
    }

    /// Ordered bitmask of every step.
    pub fn states(&self) -> Vec<u64> {
        self.steps.iter().map(Snapshot::state).collect()
    }

    /// Append a step the caller already checked is non-idle.
    pub(crate) fn push_non_idle(&mut self, snapshot: Snapshot) {
        debug_assert!(!snapshot.is_empty());
        self.steps.push(snapshot);
    }

    pub(crate) fn take(&mut self) -> ComboSequence {
        std::mem::take(self)
    }
}

impl PartialEq for ComboSequence {
    fn eq(&self, other: &Self) -> bool {
        self.steps.len() == other.steps.len()
            && self
                .steps
                .iter()
                .zip(&other.steps)
                .all(|(a, b)| a.equals_by_state(b))
    }
}

impl Eq for ComboSequence {}

impl Hash for ComboSequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.steps.len());
        for step in &self.steps {
            step.state().hash(state);
        }
    }
}

impl fmt::Display for ComboSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        f.write_str("]")
    }
}
