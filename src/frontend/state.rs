//! Shared state types for the frontend
//!
//! Pages receive `SharedState` via borrowing and return `AppAction`s
//! instead of mutating the session directly.

use crate::config::AppState;
use crate::i18n::Language;
use crate::session::PanelSession;
use crate::types::{ConfigValue, EntityDescriptor};
use std::time::Instant;

/// Top-level tabs of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Live preview of the display
    #[default]
    Dashboard,
    /// Options form with entity pickers
    Settings,
    /// Static help text
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Dashboard, Tab::Settings, Tab::Help]
    }

    /// Translation key of the tab title
    pub fn label_key(&self) -> &'static str {
        match self {
            Tab::Dashboard => "tabs.dashboard",
            Tab::Settings => "tabs.settings",
            Tab::Help => "tabs.help",
        }
    }
}

/// Shared state accessible by all pages (borrowed, not owned).
pub struct SharedState<'a> {
    /// Options, picker, preview and snapshot
    pub session: &'a PanelSession,

    /// Persistent panel state (language, theme, entry id)
    pub app_state: &'a AppState,

    /// Entities offered by every picker, rebuilt once per frame
    pub catalog: &'a [EntityDescriptor],

    /// Frame timestamp
    pub now: Instant,
}

/// Actions that any page can emit
///
/// Pages return `Vec<AppAction>` instead of mutating state directly.
/// The app applies them after the frame is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Navigation
    /// Switch tab
    SelectTab(Tab),
    /// Show preview page `n`
    GoToPage(u8),

    // Entity pickers
    /// Picker field gained focus
    OpenPicker(String),
    /// Search term edited
    TypeSearch { key: String, term: String },
    /// Candidate chosen
    SelectEntity { key: String, entity_id: String },
    /// Binding removed
    ClearEntity(String),
    /// Picker field lost focus
    ClosePicker(String),
    /// Picker field focused again while still open
    KeepPickerOpen(String),

    // Options form
    /// Set any option value
    SetOption { key: String, value: ConfigValue },
    /// Send the options to the host
    Save,
    /// Reload the options from the host
    Reload,
    /// Fetch a fresh sensor snapshot
    RefreshSnapshot,

    // Dialogs
    /// Close the notice dialog
    DismissNotice,

    // Preferences
    /// Change UI language
    SetLanguage(Language),
    /// Toggle dark mode
    SetDarkMode(bool),
}

impl AppAction {
    /// Shorthand for a [`AppAction::SetOption`]
    pub fn set(key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        AppAction::SetOption {
            key: key.into(),
            value: value.into(),
        }
    }
}
