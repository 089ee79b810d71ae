//! Per-tick button polling and capture-window timing.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use log::warn;

use crate::error::ComboError;
use crate::snapshot::{KeyIndexTable, Snapshot};

/// Platform abstraction for button state queries.
pub trait ButtonProbe {
    /// Returns `true` if `name` went down during the current tick.
    fn is_pressed(&self, name: &str) -> bool;
}

/// Virtual button probe for tests and scripted input.
#[derive(Debug, Default)]
pub struct VirtualButtonProbe {
    pressed: HashSet<String>,
}

impl VirtualButtonProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, name: &str) {
        self.pressed.insert(name.to_string());
    }

    pub fn release(&mut self, name: &str) {
        self.pressed.remove(name);
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    /// Replace the pressed set with `names`.
    pub fn set_pressed<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.pressed.clear();
        self.pressed.extend(names.into_iter().map(str::to_string));
    }
}

impl ButtonProbe for VirtualButtonProbe {
    fn is_pressed(&self, name: &str) -> bool {
        self.pressed.contains(name)
    }
}

/// Samples the monitored buttons once per tick and folds them into the
/// pending snapshot of the current capture window.
///
/// The monitor never resets its own timer: the caller finalizes the window
/// and then calls [`InputMonitor::reset_timer`], keeping the tick ordering
/// under the caller's control.
#[derive(Debug)]
pub struct InputMonitor {
    table: Arc<KeyIndexTable>,
    pending: Snapshot,
    timer: Duration,
    window_length: Duration,
}

impl InputMonitor {
    /// Create a monitor for `buttons` with the given capture window.
    ///
    /// The button order defines the bit layout of every snapshot produced.
    pub fn new<I, S>(buttons: I, window_length: Duration) -> Result<Self, ComboError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if window_length.is_zero() {
            warn!("rejecting input monitor with a zero-length capture window");
            return Err(ComboError::invalid("window length must be positive"));
        }
        let table = KeyIndexTable::new(buttons).inspect_err(|e| {
            warn!("rejecting input monitor: {e}");
        })?;
        Ok(Self::with_table(Arc::new(table), window_length))
    }

    fn with_table(table: Arc<KeyIndexTable>, window_length: Duration) -> Self {
        Self {
            pending: Snapshot::empty(&table),
            table,
            timer: Duration::ZERO,
            window_length,
        }
    }

    /// Poll every monitored button and merge this tick's presses into the
    /// pending snapshot. Call exactly once per tick: a skipped tick drops
    /// presses that only occurred during it.
    pub fn capture_tick(&mut self, probe: &dyn ButtonProbe) -> Result<(), ComboError> {
        let mut tick = Snapshot::empty(&self.table);
        for name in self.table.names() {
            if probe.is_pressed(name) {
                tick.set(name)?;
            }
        }
        self.pending.merge(&tick)
    }

    /// Merge a single named press into the pending snapshot.
    pub fn press(&mut self, name: &str) -> Result<(), ComboError> {
        self.pending.set(name)
    }

    pub fn advance_timer(&mut self, dt: Duration) {
        self.timer += dt;
    }

    /// Strictly greater than the window length: a timer sitting exactly on
    /// the boundary is still accumulating.
    pub fn window_elapsed(&self) -> bool {
        self.timer > self.window_length
    }

    /// Hand out the pending snapshot and start a fresh empty one over the
    /// same key table. The timer is left untouched.
    pub fn finalize_window(&mut self) -> Snapshot {
        std::mem::replace(&mut self.pending, Snapshot::empty(&self.table))
    }

    pub fn reset_timer(&mut self) {
        self.timer = Duration::ZERO;
    }

    pub fn key_table(&self) -> &Arc<KeyIndexTable> {
        &self.table
    }

    pub fn pending(&self) -> &Snapshot {
        &self.pending
    }

    pub fn timer(&self) -> Duration {
        self.timer
    }

    pub fn window_length(&self) -> Duration {
        self.window_length
    }
}
