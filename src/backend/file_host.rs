//! Host backed by JSON files
//!
//! # Layout
//!
//! ```text
//! <dir>/
//!   entries/<entry_id>.json   { "options": { ... } }
//!   states.json               { "sensor.x": { "state": "..", ... }, ... }
//! ```
//!
//! Saving merges the sent options over the stored ones, so keys the panel
//! does not know about survive a save.

use super::ConfigHost;
use crate::config::ConfigOptions;
use crate::error::{PanelError, Result, ResultExt};
use crate::types::SensorSnapshot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the sensor state file
pub const STATES_FILE: &str = "states.json";
/// Directory holding one file per entry
pub const ENTRIES_DIR: &str = "entries";

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntryFile {
    #[serde(default)]
    options: ConfigOptions,
}

/// File-based [`ConfigHost`]
#[derive(Debug, Clone)]
pub struct FileHost {
    dir: PathBuf,
}

impl FileHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of an entry's file; ids that could escape the directory are rejected
    pub fn entry_path(&self, entry_id: &str) -> Result<PathBuf> {
        let valid = !entry_id.is_empty()
            && entry_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
        if !valid {
            return Err(PanelError::Config(format!("Invalid entry id '{}'", entry_id)));
        }
        Ok(self.dir.join(ENTRIES_DIR).join(format!("{}.json", entry_id)))
    }

    pub fn states_path(&self) -> PathBuf {
        self.dir.join(STATES_FILE)
    }

    /// Write a sensor snapshot (used to seed the directory)
    pub fn write_states(&self, snapshot: &SensorSnapshot) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create host directory")?;
        let content = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(self.states_path(), content).context("Failed to write sensor states")
    }

    fn read_entry(&self, path: &Path) -> Result<EntryFile> {
        if !path.exists() {
            return Ok(EntryFile::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(PanelError::from)
            .with_context(|| format!("Malformed entry file {}", path.display()))
    }
}

impl ConfigHost for FileHost {
    fn load_config(&mut self, entry_id: &str) -> Result<ConfigOptions> {
        let path = self.entry_path(entry_id)?;
        Ok(self.read_entry(&path)?.options)
    }

    fn save_config(&mut self, entry_id: &str, options: &ConfigOptions) -> Result<()> {
        let path = self.entry_path(entry_id)?;
        let mut entry = self.read_entry(&path)?;
        entry
            .options
            .extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create entries directory")?;
        }
        let content = serde_json::to_string_pretty(&entry)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn sensor_snapshot(&mut self) -> Result<SensorSnapshot> {
        let path = self.states_path();
        if !path.exists() {
            tracing::debug!("No {} in {}, snapshot is empty", STATES_FILE, self.dir.display());
            return Ok(SensorSnapshot::new());
        }
        let content = std::fs::read_to_string(&path).context("Failed to read sensor states")?;
        serde_json::from_str(&content)
            .map_err(PanelError::from)
            .context("Malformed sensor states")
    }

    fn describe(&self) -> String {
        format!("files in {}", self.dir.display())
    }
}
