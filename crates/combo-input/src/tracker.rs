//! Combo sequence accumulation and resolution.

use log::{debug, info};

use crate::sequence::ComboSequence;
use crate::snapshot::Snapshot;
use crate::table::ComboTable;

/// Receives the outcome of every closed combo sequence.
pub trait ActionDispatcher<A> {
    /// Called with the bound action when a closed sequence matches.
    fn dispatch(&mut self, action: &A);

    /// Called when a closed sequence has no binding. Most sequences end here.
    fn no_match(&mut self, _sequence: &ComboSequence) {}
}

/// Whether a combo is currently being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Sequence is empty.
    Idle,
    /// At least one non-idle window has been seen since the last idle one.
    Accumulating,
}

/// Result of feeding one finalized snapshot to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboEvent<A> {
    /// Non-idle snapshot appended; `len` is the new sequence length.
    Extended { len: usize },
    /// Idle snapshot closed a sequence that is bound to `action`.
    Matched { action: A, sequence: ComboSequence },
    /// Idle snapshot closed a sequence with no binding.
    NoMatch { sequence: ComboSequence },
    /// Idle snapshot while no sequence was open.
    Idle,
}

/// Consumes finalized snapshots in arrival order and resolves closed
/// sequences against its [`ComboTable`].
#[derive(Debug)]
pub struct ComboTracker<A> {
    table: ComboTable<A>,
    sequence: ComboSequence,
}

impl<A: Clone> ComboTracker<A> {
    pub fn new(table: ComboTable<A>) -> Self {
        Self {
            table,
            sequence: ComboSequence::new(),
        }
    }

    /// Feed the next finalized snapshot.
    ///
    /// A non-idle snapshot extends the sequence. An idle one closes it: the
    /// sequence is looked up and then cleared whether or not it matched.
    pub fn feed(&mut self, snapshot: Snapshot) -> ComboEvent<A> {
        if !snapshot.is_empty() {
            self.sequence.push_non_idle(snapshot);
            return ComboEvent::Extended {
                len: self.sequence.len(),
            };
        }

        if self.sequence.is_empty() {
            return ComboEvent::Idle;
        }

        let sequence = self.sequence.take();
        match self.table.resolve(&sequence) {
            Some(action) => {
                info!("combo {sequence} matched");
                ComboEvent::Matched {
                    action: action.clone(),
                    sequence,
                }
            }
            None => {
                debug!("combo {sequence} has no binding");
                ComboEvent::NoMatch { sequence }
            }
        }
    }

    /// Feed a snapshot and forward a closed sequence's outcome to `dispatcher`.
    pub fn feed_and_dispatch(
        &mut self,
        snapshot: Snapshot,
        dispatcher: &mut dyn ActionDispatcher<A>,
    ) -> ComboEvent<A> {
        let event = self.feed(snapshot);
        match &event {
            ComboEvent::Matched { action, .. } => dispatcher.dispatch(action),
            ComboEvent::NoMatch { sequence } => dispatcher.no_match(sequence),
            ComboEvent::Extended { .. } | ComboEvent::Idle => {}
        }
        event
    }

    pub fn state(&self) -> TrackerState {
        if self.sequence.is_empty() {
            TrackerState::Idle
        } else {
            TrackerState::Accumulating
        }
    }

    /// Sequence accumulated so far.
    pub fn sequence(&self) -> &ComboSequence {
        &self.sequence
    }

    pub fn table(&self) -> &ComboTable<A> {
        &self.table
    }
}
