//! # CYD Panel: preview and sensor binding for the CYD solar display
//!
//! A desktop panel for configuring a 320x240 "Cheap Yellow Display" that
//! shows solar, battery, grid, yield and custom sensor values on five
//! pages. The panel edits the display's options, binds sensors to its
//! slots through a searchable picker and previews every page exactly the
//! way the device will draw it.
//!
//! ## Architecture
//!
//! - **Core**: options model, page registry, value resolution, picker and
//!   preview engine. Pure functions over an options bag and a sensor
//!   snapshot, no I/O.
//! - **Device**: the record pushed to the display and its timed page
//!   rotation.
//! - **Backend**: a worker thread driving a [`backend::ConfigHost`] (load and
//!   save options, fetch sensor snapshots).
//! - **Frontend**: eframe/egui tabs for the live preview, the settings form
//!   and help.
//! - **Communication**: crossbeam channels between the UI and the worker.
//!
//! ## Configuration
//!
//! Panel state (entry id, host directory, preferences) is stored in the
//! platform data directory under `dev.openkairo.cyd-panel`:
//!
//! - **Linux**: `~/.local/share/dev.openkairo.cyd-panel/`
//! - **macOS**: `~/Library/Application Support/dev.openkairo.cyd-panel/`
//! - **Windows**: `%APPDATA%\dev.openkairo.cyd-panel\`
//!
//! ## Example
//!
//! ```ignore
//! use cyd_panel::{backend::{FileHost, HostWorker}, config::AppState, frontend::PanelApp};
//! use std::time::Duration;
//!
//! fn main() -> anyhow::Result<()> {
//!     let app_state = AppState::load_or_default();
//!     let host = FileHost::new("/var/lib/cyd");
//!     let (bridge, worker) = HostWorker::spawn(Box::new(host), Duration::from_secs(5))?;
//!
//!     eframe::run_native(
//!         "CYD Panel",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(PanelApp::new(cc, bridge, Some(worker), app_state)))),
//!     )
//!     .map_err(|e| anyhow::anyhow!("{e}"))
//! }
//! ```

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod device;
pub mod error;
pub mod frontend;
pub mod i18n;
pub mod pages;
pub mod picker;
pub mod preview;
pub mod resolver;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use app::PanelApp;
pub use backend::{ConfigHost, FileHost, HostBridge, HostCommand, HostMessage, HostWorker};
pub use config::{AppState, ConfigModel, ConfigOptions, OptionsExt, PageSwitchMode};
pub use device::{DeviceRotation, DisplayPayload};
pub use error::{PanelError, Result};
pub use pages::PageIndex;
pub use picker::EntityPicker;
pub use preview::{PreviewEngine, PreviewState};
pub use resolver::ValueResolver;
pub use session::PanelSession;
pub use types::{ConfigValue, EntityDescriptor, SensorSnapshot, SensorState};
