//! Per-tick orchestration of monitor and tracker.

use std::time::Duration;

use log::debug;

use crate::error::ComboError;
use crate::monitor::{ButtonProbe, InputMonitor};
use crate::snapshot_log::SnapshotLog;
use crate::tracker::{ActionDispatcher, ComboEvent, ComboTracker};

/// Owns one [`InputMonitor`] and one [`ComboTracker`] and runs them in the
/// fixed tick order:
///
/// 1. capture this tick's presses
/// 2. test the window against the timer *before* this tick's advance
/// 3. if elapsed: finalize, feed the tracker, reset the timer
/// 4. advance the timer by `dt`
///
/// Swapping steps 2 and 4 shifts every window boundary by one tick.
#[derive(Debug)]
pub struct ComboDriver<A> {
    monitor: InputMonitor,
    tracker: ComboTracker<A>,
    snapshot_log: Option<SnapshotLog>,
    ticks: u64,
}

impl<A: Clone> ComboDriver<A> {
    pub fn new(monitor: InputMonitor, tracker: ComboTracker<A>) -> Self {
        Self {
            monitor,
            tracker,
            snapshot_log: None,
            ticks: 0,
        }
    }

    /// Run one tick. Returns the tracker event when a window was finalized
    /// during this tick.
    pub fn tick(
        &mut self,
        probe: &dyn ButtonProbe,
        dt: Duration,
        dispatcher: &mut dyn ActionDispatcher<A>,
    ) -> Result<Option<ComboEvent<A>>, ComboError> {
        self.monitor.capture_tick(probe)?;

        let mut event = None;
        if self.monitor.window_elapsed() {
            let snapshot = self.monitor.finalize_window();
            debug!("tick {}: window closed with {snapshot}", self.ticks);
            if let Some(ref mut log) = self.snapshot_log {
                log.record(&snapshot);
            }
            event = Some(self.tracker.feed_and_dispatch(snapshot, dispatcher));
            self.monitor.reset_timer();
        }

        self.monitor.advance_timer(dt);
        self.ticks += 1;
        Ok(event)
    }

    /// Start recording every finalized snapshot.
    pub fn enable_snapshot_log(&mut self) {
        self.snapshot_log = Some(SnapshotLog::new());
    }

    /// Stop recording and return the log.
    pub fn take_snapshot_log(&mut self) -> Option<SnapshotLog> {
        self.snapshot_log.take()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn monitor(&self) -> &InputMonitor {
        &self.monitor
    }

    /// Mutable monitor access for manual presses via [`InputMonitor::press`].
    pub fn monitor_mut(&mut self) -> &mut InputMonitor {
        &mut self.monitor
    }

    pub fn tracker(&self) -> &ComboTracker<A> {
        &self.tracker
    }
}
