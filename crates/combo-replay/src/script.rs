use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// One recorded frame: its delta-time and the buttons that went down.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Frame {
    pub dt_ms: u64,
    #[serde(default)]
    pub pressed: Vec<String>,
}

impl Frame {
    pub fn dt(&self) -> Duration {
        Duration::from_millis(self.dt_ms)
    }
}

/// Frame-by-frame input recording fed to the combo driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputScript {
    pub frames: Vec<Frame>,
}

impl InputScript {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read input script {}", path.display()))?;
        let script = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse input script {}", path.display()))?;
        Ok(script)
    }
}
