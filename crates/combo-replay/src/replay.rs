use anyhow::{Context, Result};
use log::debug;

use combo_input::{
    ActionDispatcher, ComboConfig, ComboSequence, SnapshotRecord, VirtualButtonProbe,
};

use crate::script::InputScript;

/// Everything a replay produced.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// (frame index, action) for every matched combo.
    pub actions: Vec<(usize, String)>,
    /// Closed sequences that had no binding.
    pub misses: usize,
    /// Finalized windows, when snapshot recording was requested.
    pub snapshots: Option<Vec<SnapshotRecord>>,
}

/// Collects dispatched actions against the frame that produced them.
struct ReportDispatcher<'a> {
    report: &'a mut ReplayReport,
    frame: usize,
}

impl ActionDispatcher<String> for ReportDispatcher<'_> {
    fn dispatch(&mut self, action: &String) {
        self.report.actions.push((self.frame, action.clone()));
    }

    fn no_match(&mut self, sequence: &ComboSequence) {
        debug!("frame {}: {sequence} has no binding", self.frame);
        self.report.misses += 1;
    }
}

/// Drive a combo driver built from `config` through every frame of `script`.
pub fn run_replay(
    config: &ComboConfig,
    script: &InputScript,
    record_snapshots: bool,
) -> Result<ReplayReport> {
    let mut driver = config
        .build_driver()
        .context("invalid combo configuration")?;
    if record_snapshots {
        driver.enable_snapshot_log();
    }

    let mut report = ReplayReport::default();
    let mut probe = VirtualButtonProbe::new();
    for (frame, input) in script.frames.iter().enumerate() {
        probe.set_pressed(input.pressed.iter().map(String::as_str));
        let mut dispatcher = ReportDispatcher {
            report: &mut report,
            frame,
        };
        driver
            .tick(&probe, input.dt(), &mut dispatcher)
            .with_context(|| format!("frame {frame}"))?;
    }

    report.snapshots = driver.take_snapshot_log().map(|log| log.into_records());
    Ok(report)
}
