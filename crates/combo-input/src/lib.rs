//! Input-combo recognition.
//!
//! This crate provides:
//! - [`Snapshot`]: bitmask of the buttons pressed during one capture window
//! - [`InputMonitor`]: per-tick polling through a [`ButtonProbe`] and window timing
//! - [`ComboTracker`]: sequence accumulation and lookup in a [`ComboTable`]
//! - [`ComboDriver`]: the fixed per-tick ordering of monitor and tracker
//! - [`ComboConfig`]: JSON configuration that builds a driver
//! - [`SnapshotLog`]: recording of finalized windows

pub mod config;
pub mod driver;
pub mod error;
pub mod monitor;
pub mod sequence;
pub mod snapshot;
pub mod snapshot_log;
pub mod table;
pub mod tracker;

pub use config::{ComboBinding, ComboConfig};
pub use driver::ComboDriver;
pub use error::ComboError;
pub use monitor::{ButtonProbe, InputMonitor, VirtualButtonProbe};
pub use sequence::ComboSequence;
pub use snapshot::{KeyIndexTable, Snapshot};
pub use snapshot_log::{SnapshotLog, SnapshotRecord};
pub use table::ComboTable;
pub use tracker::{ActionDispatcher, ComboEvent, ComboTracker, TrackerState};
