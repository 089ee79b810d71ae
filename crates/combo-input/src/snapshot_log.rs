use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

/// One finalized capture window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Zero-based index of the window since logging started.
    pub window: u64,
    /// Bitmask of the window.
    pub state: u64,
    /// Pressed button names in bit order.
    pub pressed: Vec<String>,
}

/// Recorder for finalized snapshots.
#[derive(Debug, Default)]
pub struct SnapshotLog {
    records: Vec<SnapshotRecord>,
    next_window: u64,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finalized snapshot.
    pub fn record(&mut self, snapshot: &Snapshot) {
        self.records.push(SnapshotRecord {
            window: self.next_window,
            state: snapshot.state(),
            pressed: snapshot.pressed_names().map(str::to_string).collect(),
        });
        self.next_window += 1;
    }

    pub fn records(&self) -> &[SnapshotRecord] {
        &self.records
    }

    /// Take ownership of the records (consumes the log).
    pub fn into_records(self) -> Vec<SnapshotRecord> {
        self.records
    }

    /// Clear all records. Window numbering keeps counting.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
