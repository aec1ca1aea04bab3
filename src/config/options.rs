//! Display options bag and its copy-on-write model
//!
//! The options of one display entry are a flat, open-ended key/value bag
//! ([`ConfigOptions`]). The panel never edits it in place: every change
//! produces a new bag behind a fresh `Arc`, so views can tell that
//! something changed by comparing pointers or the version stamp.
//!
//! # Keys
//!
//! | Key | Meaning | Default |
//! |---|---|---|
//! | `enable_page1` .. `enable_page5` | page enabled | `true` |
//! | `show_kw` | power in kW instead of W | `false` |
//! | `page_switch_mode` | `auto`, `touch` or `both` | `auto` |
//! | `update_interval` | push interval in seconds (min 1) | `5` |
//! | `page_interval` | rotation interval in seconds (min 5) | `10` |
//! | `{metric}_entity` | bound sensor id | unbound |
//! | `{metric}_name` | user label for custom slots | slot default |

use crate::types::ConfigValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Flat options bag of one display entry
pub type ConfigOptions = BTreeMap<String, ConfigValue>;

pub const SHOW_KW: &str = "show_kw";
pub const PAGE_SWITCH_MODE: &str = "page_switch_mode";
pub const UPDATE_INTERVAL: &str = "update_interval";
pub const PAGE_INTERVAL: &str = "page_interval";
pub const GRID_IMPORT_ENTITY: &str = "grid_import_entity";
pub const GRID_EXPORT_ENTITY: &str = "grid_export_entity";

/// Default push interval in seconds
pub const DEFAULT_UPDATE_INTERVAL: u32 = 5;
/// Smallest accepted push interval in seconds
pub const MIN_UPDATE_INTERVAL: u32 = 1;
/// Default page rotation interval in seconds
pub const DEFAULT_PAGE_INTERVAL: u32 = 10;
/// Smallest accepted page rotation interval in seconds
pub const MIN_PAGE_INTERVAL: u32 = 5;

/// How the physical display switches pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSwitchMode {
    /// The host rotates pages on a timer
    #[default]
    Auto,
    /// Pages only change by tapping the display
    Touch,
    /// Timer rotation with touch override
    Both,
}

impl PageSwitchMode {
    /// Stored string value
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSwitchMode::Auto => "auto",
            PageSwitchMode::Touch => "touch",
            PageSwitchMode::Both => "both",
        }
    }

    /// Parse a stored value, unknown strings map to `None`
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(PageSwitchMode::Auto),
            "touch" => Some(PageSwitchMode::Touch),
            "both" => Some(PageSwitchMode::Both),
            _ => None,
        }
    }

    /// All modes in display order
    pub fn all() -> &'static [PageSwitchMode] {
        &[PageSwitchMode::Auto, PageSwitchMode::Touch, PageSwitchMode::Both]
    }

    /// Whether the host advances pages on a timer in this mode
    pub fn rotates(&self) -> bool {
        !matches!(self, PageSwitchMode::Touch)
    }
}

/// Read helpers shared by everything that consumes an options bag
pub trait OptionsExt {
    /// Non-empty text stored under `key`
    fn text(&self, key: &str) -> Option<&str>;

    /// Sensor id bound to `key`, `None` when unbound or empty
    fn binding(&self, key: &str) -> Option<&str> {
        self.text(key)
    }

    /// `true` unless the key holds an explicit `false`
    fn flag_default_on(&self, key: &str) -> bool;

    /// `true` only if the key holds an explicit `true`
    fn flag_default_off(&self, key: &str) -> bool;

    /// Whether power values are shown in kW
    fn show_kw(&self) -> bool {
        self.flag_default_off(SHOW_KW)
    }

    /// Configured page switch mode
    fn page_switch_mode(&self) -> PageSwitchMode;

    /// Push interval in seconds, never below the minimum
    fn update_interval(&self) -> u32;

    /// Page rotation interval in seconds, never below the minimum
    fn page_interval(&self) -> u32;
}

impl OptionsExt for ConfigOptions {
    fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(ConfigValue::as_str)
            .filter(|s| !s.is_empty())
    }

    fn flag_default_on(&self, key: &str) -> bool {
        !matches!(self.get(key), Some(ConfigValue::Bool(false)))
    }

    fn flag_default_off(&self, key: &str) -> bool {
        matches!(self.get(key), Some(ConfigValue::Bool(true)))
    }

    fn page_switch_mode(&self) -> PageSwitchMode {
        self.text(PAGE_SWITCH_MODE)
            .and_then(PageSwitchMode::from_str_opt)
            .unwrap_or_default()
    }

    fn update_interval(&self) -> u32 {
        interval_seconds(self, UPDATE_INTERVAL, DEFAULT_UPDATE_INTERVAL, MIN_UPDATE_INTERVAL)
    }

    fn page_interval(&self) -> u32 {
        interval_seconds(self, PAGE_INTERVAL, DEFAULT_PAGE_INTERVAL, MIN_PAGE_INTERVAL)
    }
}

fn interval_seconds(options: &ConfigOptions, key: &str, default: u32, min: u32) -> u32 {
    match options.get(key).and_then(ConfigValue::coerce_number) {
        // 0 behaves like "unset", matching `value || default` in the form
        Some(v) if v >= 1.0 => (v.floor() as u32).max(min),
        _ => default,
    }
}

/// Version-stamped, copy-on-write holder of the current options
///
/// Clones are cheap and share the same bag until one of them is mutated.
#[derive(Debug, Clone, Default)]
pub struct ConfigModel {
    options: Arc<ConfigOptions>,
    version: u64,
}

impl ConfigModel {
    /// Create a model from hydrated options
    pub fn new(options: ConfigOptions) -> Self {
        Self {
            options: Arc::new(options),
            version: 0,
        }
    }

    /// Current options
    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// Shared handle to the current options (for handing to the host)
    pub fn shared(&self) -> Arc<ConfigOptions> {
        Arc::clone(&self.options)
    }

    /// Monotonic change counter
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether `other` still points at the very same options bag
    pub fn same_options(&self, other: &Arc<ConfigOptions>) -> bool {
        Arc::ptr_eq(&self.options, other)
    }

    /// Replace the value under `key`, producing a new bag
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let mut next = ConfigOptions::clone(&self.options);
        next.insert(key.into(), value.into());
        self.commit(next);
    }

    /// Remove `key`, producing a new bag
    pub fn remove(&mut self, key: &str) {
        let mut next = ConfigOptions::clone(&self.options);
        next.remove(key);
        self.commit(next);
    }

    /// Swap in an entirely new bag (after a load)
    pub fn replace_all(&mut self, options: ConfigOptions) {
        self.commit(options);
    }

    fn commit(&mut self, next: ConfigOptions) {
        self.options = Arc::new(next);
        self.version += 1;
    }
}
