use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::driver::ComboDriver;
use crate::error::ComboError;
use crate::monitor::InputMonitor;
use crate::snapshot::{KeyIndexTable, Snapshot};
use crate::table::ComboTable;
use crate::tracker::ComboTracker;

const COMBO_CONFIG_FILE: &str = "combos.json";

/// One combo binding. Each step lists the buttons pressed in one window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComboBinding {
    pub action: String,
    pub steps: Vec<Vec<String>>,
}

impl ComboBinding {
    pub fn new(action: impl Into<String>, steps: &[&[&str]]) -> Self {
        Self {
            action: action.into(),
            steps: steps
                .iter()
                .map(|step| step.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    /// Step bitmasks over `table`.
    fn step_states(&self, table: &Arc<KeyIndexTable>) -> Result<Vec<u64>, ComboError> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                if step.is_empty() {
                    return Err(ComboError::invalid(format!(
                        "combo {:?}: step {i} has no buttons",
                        self.action
                    )));
                }
                Snapshot::from_names(table, step.iter().map(String::as_str)).map(|s| s.state())
            })
            .collect()
    }
}

/// Monitored buttons, capture window, and combo bindings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComboConfig {
    /// Monitored buttons. The order defines the snapshot bit layout.
    pub buttons: Vec<String>,
    /// Capture window length in milliseconds.
    pub window_ms: u64,
    pub combos: Vec<ComboBinding>,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            buttons: vec![
                "ComboUp".to_string(),
                "ComboDown".to_string(),
                "ComboLeft".to_string(),
                "ComboRight".to_string(),
            ],
            window_ms: 250,
            combos: Vec::new(),
        }
    }
}

impl ComboConfig {
    /// Load configuration from the default file.
    pub fn load() -> Result<Self> {
        Self::load_from(COMBO_CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns the default configuration if the file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read combo config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse combo config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default file.
    pub fn save(&self) -> Result<()> {
        self.save_to(COMBO_CONFIG_FILE)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn window_length(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Validate the configuration and build a ready-to-tick driver.
    pub fn build_driver(&self) -> Result<ComboDriver<String>, ComboError> {
        let monitor = InputMonitor::new(self.buttons.iter().cloned(), self.window_length())?;

        let mut table = ComboTable::new();
        for binding in &self.combos {
            let states = binding.step_states(monitor.key_table())?;
            table.register(states, binding.action.clone())?;
        }

        Ok(ComboDriver::new(monitor, ComboTracker::new(table)))
    }
}
