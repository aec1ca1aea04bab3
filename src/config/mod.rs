//! Configuration module for the CYD panel
//!
//! Two kinds of configuration live here:
//! - The display options of one entry ([`options`]), owned by the host and
//!   edited through the panel
//! - The panel's own persistent state ([`AppState`]): which entry to edit,
//!   where the file host keeps its data, UI preferences
//!
//! # App Data Location
//!
//! Panel state is stored in the platform-appropriate data directory under
//! `dev.openkairo.cyd-panel`:
//! - **Linux**: `~/.local/share/dev.openkairo.cyd-panel/`
//! - **macOS**: `~/Library/Application Support/dev.openkairo.cyd-panel/`
//! - **Windows**: `%APPDATA%\dev.openkairo.cyd-panel\`
//!
//! # Files
//!
//! - `app_state.json` - Entry id, host directory and UI preferences
//! - `logs/` - Rolling log files
//! - `host/` - Default data directory of the file host

pub mod options;

pub use options::{ConfigModel, ConfigOptions, OptionsExt, PageSwitchMode};

use crate::error::{PanelError, Result};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.openkairo.cyd-panel";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Entry id used when none has been configured yet
pub const DEFAULT_ENTRY_ID: &str = "default";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        PanelError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            PanelError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== App State ====================

/// Persistent panel state
///
/// This is the panel's own state, separate from the display options that
/// the host stores per entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Entry whose options the panel edits; empty disables load/save
    #[serde(default = "default_entry_id")]
    pub entry_id: String,

    /// Data directory of the file host (defaults to `<app data>/host`)
    #[serde(default)]
    pub host_dir: Option<PathBuf>,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

fn default_app_state_version() -> u32 {
    1
}

fn default_entry_id() -> String {
    DEFAULT_ENTRY_ID.to_string()
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            entry_id: default_entry_id(),
            host_dir: None,
            ui_preferences: UiPreferences::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            PanelError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(&path)
    }

    /// Load app state from a specific file, defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PanelError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| PanelError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(&dir.join(APP_STATE_FILE))
    }

    /// Save app state to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PanelError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| PanelError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Entry id, or `None` when load/save should be skipped
    pub fn entry_id(&self) -> Option<&str> {
        let id = self.entry_id.trim();
        (!id.is_empty()).then_some(id)
    }

    /// Directory the file host reads and writes
    pub fn resolved_host_dir(&self) -> Option<PathBuf> {
        self.host_dir
            .clone()
            .or_else(|| app_data_dir().map(|p| p.join("host")))
    }
}

/// UI preferences of the panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Font scale factor
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,

    /// UI language
    #[serde(default)]
    pub language: Language,
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
            language: Language::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_defaults() {
        let state = AppState::default();
        assert_eq!(state.entry_id(), Some(DEFAULT_ENTRY_ID));
        assert!(state.ui_preferences.dark_mode);
        assert_eq!(state.ui_preferences.language, Language::English);
    }

    #[test]
    fn test_blank_entry_id_disables_host() {
        let state = AppState {
            entry_id: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(state.entry_id(), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let state: AppState = serde_json::from_str(r#"{"entry_id": "abc123"}"#).unwrap();
        assert_eq!(state.entry_id(), Some("abc123"));
        assert_eq!(state.version, 1);
        assert_eq!(state.ui_preferences.font_scale, 1.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("cyd-panel-state-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(APP_STATE_FILE);

        let mut state = AppState::default();
        state.entry_id = "entry42".to_string();
        state.ui_preferences.language = Language::German;
        state.save_to(&path).unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded.entry_id, "entry42");
        assert_eq!(loaded.ui_preferences.language, Language::German);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let path = std::env::temp_dir().join("cyd-panel-does-not-exist.json");
        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded.entry_id, DEFAULT_ENTRY_ID);
    }
}
