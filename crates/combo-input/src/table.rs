use std::collections::HashMap;

use crate::error::ComboError;
use crate::sequence::ComboSequence;

/// Registered combo bindings: exact ordered state sequences → action.
///
/// Keys are the ordered `u64` states of the steps, hashed structurally.
#[derive(Debug, Clone)]
pub struct ComboTable<A> {
    bindings: HashMap<Vec<u64>, A>,
}

impl<A> Default for ComboTable<A> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<A> ComboTable<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a sequence of step bitmasks to `action`.
    ///
    /// Rejects an empty sequence, any idle (zero) step, and a sequence that is
    /// already bound.
    pub fn register<I>(&mut self, steps: I, action: A) -> Result<(), ComboError>
    where
        I: IntoIterator<Item = u64>,
    {
        let key: Vec<u64> = steps.into_iter().collect();
        if key.is_empty() {
            return Err(ComboError::invalid("combo must have at least one step"));
        }
        if let Some(pos) = key.iter().position(|&s| s == 0) {
            return Err(ComboError::invalid(format!(
                "combo step {pos} is idle; an idle window ends a combo"
            )));
        }
        if self.bindings.contains_key(&key) {
            return Err(ComboError::invalid(format!(
                "combo {key:?} is already bound"
            )));
        }
        self.bindings.insert(key, action);
        Ok(())
    }

    /// Bind an already-built sequence to `action`.
    pub fn register_sequence(
        &mut self,
        sequence: &ComboSequence,
        action: A,
    ) -> Result<(), ComboError> {
        self.register(sequence.states(), action)
    }

    /// Exact ordered lookup. No prefix or fuzzy matching.
    pub fn resolve(&self, sequence: &ComboSequence) -> Option<&A> {
        self.bindings.get(sequence.states().as_slice())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
