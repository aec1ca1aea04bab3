//! Host integration backend
//!
//! The host owns the stored display options and the live sensor states.
//! All host calls run on a worker thread so the UI never blocks on them;
//! the two sides talk over crossbeam channels.
//!
//! # Architecture
//!
//! - [`HostCommand`] - Messages sent from UI to worker (load, save, refresh)
//! - [`HostMessage`] - Messages sent from worker to UI (results, snapshots)
//! - [`HostBridge`] - UI-side handle for sending commands and draining messages
//! - [`HostWorker`] - Worker loop driving a [`ConfigHost`]
//!
//! # Hosts
//!
//! - [`FileHost`] - JSON files in a data directory
//! - [`DemoHost`] - In-memory host with drifting values (feature `demo-host`)
//!
//! # Example
//!
//! ```ignore
//! use cyd_panel::backend::{FileHost, HostCommand, HostWorker};
//! use std::time::Duration;
//!
//! let host = FileHost::new("/tmp/cyd-host");
//! let (bridge, handle) = HostWorker::spawn(Box::new(host), Duration::from_secs(5))?;
//!
//! bridge.send_command(HostCommand::Load { entry_id: "default".into() })?;
//! for msg in bridge.drain() {
//!     // apply to the session
//! }
//!
//! bridge.shutdown();
//! handle.join().ok();
//! ```

pub mod bridge;
#[cfg(feature = "demo-host")]
pub mod demo_host;
pub mod file_host;
pub mod worker;

pub use bridge::HostBridge;
#[cfg(feature = "demo-host")]
pub use demo_host::DemoHost;
pub use file_host::FileHost;
pub use worker::HostWorker;

use crate::config::ConfigOptions;
use crate::error::Result;
use crate::types::SensorSnapshot;
use std::sync::Arc;
use std::time::Duration;

/// Storage and sensor source the panel edits against
pub trait ConfigHost: Send {
    /// Stored options of `entry_id`
    fn load_config(&mut self, entry_id: &str) -> Result<ConfigOptions>;

    /// Store `options` for `entry_id`
    fn save_config(&mut self, entry_id: &str, options: &ConfigOptions) -> Result<()>;

    /// Current state of every sensor the host knows
    fn sensor_snapshot(&mut self) -> Result<SensorSnapshot>;

    /// Short name for logs and the status line
    fn describe(&self) -> String {
        "host".to_string()
    }
}

/// Message sent from the UI to the host worker
#[derive(Debug, Clone)]
pub enum HostCommand {
    /// Load the options of an entry
    Load { entry_id: String },
    /// Save the full options bag of an entry
    Save {
        entry_id: String,
        options: Arc<ConfigOptions>,
    },
    /// Fetch a fresh sensor snapshot now
    RefreshSnapshot,
    /// Change how often the snapshot is refreshed
    SetRefreshInterval(Duration),
    /// Stop the worker
    Shutdown,
}

/// Message sent from the host worker to the UI
#[derive(Debug, Clone)]
pub enum HostMessage {
    /// Options loaded
    Loaded {
        entry_id: String,
        options: ConfigOptions,
    },
    /// Loading failed
    LoadFailed { entry_id: String, error: String },
    /// Options saved
    Saved { entry_id: String },
    /// Saving failed
    SaveFailed { entry_id: String, error: String },
    /// Fresh sensor snapshot
    Snapshot(SensorSnapshot),
    /// Snapshot refresh failed
    SnapshotFailed(String),
    /// Worker is shutting down
    Shutdown,
}
