//! Panel session: everything the UI edits, without the UI
//!
//! [`PanelSession`] owns the options being edited, the picker state, the
//! preview page and the latest sensor snapshot. The frontend feeds it
//! [`AppAction`]s and host messages; the session answers with the
//! [`HostCommand`]s to forward to the worker. Nothing in here touches egui,
//! so the whole interaction flow is testable headless.

use crate::backend::{HostCommand, HostMessage};
use crate::config::{ConfigModel, ConfigOptions, OptionsExt};
use crate::device::{DeviceRotation, DisplayPayload, RotationStatus};
use crate::frontend::state::{AppAction, Tab};
use crate::picker::EntityPicker;
use crate::preview::{PreviewEngine, PreviewState};
use crate::types::SensorSnapshot;
use rust_i18n::t;
use std::time::{Duration, Instant};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking message shown until the user dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Headless state of the panel
pub struct PanelSession {
    entry_id: Option<String>,
    config: ConfigModel,
    picker: EntityPicker,
    preview: PreviewEngine,
    rotation: DeviceRotation,
    device_status: Option<RotationStatus>,
    snapshot: SensorSnapshot,
    snapshot_revision: u64,
    active_tab: Tab,
    notice: Option<Notice>,
    refresh_interval: u32,
    host_online: bool,
    /// Set once the host delivered options for the entry
    hydrated: bool,
}

impl PanelSession {
    /// New session editing `entry_id` (`None` disables load and save)
    pub fn new(entry_id: Option<String>) -> Self {
        let config = ConfigModel::default();
        let refresh_interval = config.options().update_interval();
        Self {
            entry_id: entry_id.filter(|id| !id.trim().is_empty()),
            config,
            picker: EntityPicker::new(),
            preview: PreviewEngine::new(),
            rotation: DeviceRotation::new(),
            device_status: None,
            snapshot: SensorSnapshot::new(),
            snapshot_revision: 0,
            active_tab: Tab::default(),
            notice: None,
            refresh_interval,
            host_online: true,
            hydrated: false,
        }
    }

    /// Commands to issue once the worker is running
    pub fn start(&mut self) -> Vec<HostCommand> {
        match &self.entry_id {
            Some(entry_id) => vec![HostCommand::Load {
                entry_id: entry_id.clone(),
            }],
            None => {
                tracing::warn!("No entry id configured, options will not be loaded");
                Vec::new()
            }
        }
    }

    // ---- accessors ----

    pub fn entry_id(&self) -> Option<&str> {
        self.entry_id.as_deref()
    }

    pub fn config(&self) -> &ConfigModel {
        &self.config
    }

    pub fn options(&self) -> &ConfigOptions {
        self.config.options()
    }

    pub fn picker(&self) -> &EntityPicker {
        &self.picker
    }

    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    /// Bumped whenever a new snapshot arrives
    pub fn snapshot_revision(&self) -> u64 {
        self.snapshot_revision
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn host_online(&self) -> bool {
        self.host_online
    }

    /// Preview derived from the current state
    pub fn preview(&self) -> PreviewState {
        self.preview.render(self.config.options(), &self.snapshot)
    }

    /// Rotation state after the last [`tick`](Self::tick)
    pub fn device_status(&self) -> Option<RotationStatus> {
        self.device_status
    }

    /// Record the display would receive right now
    pub fn payload(&self) -> Option<DisplayPayload> {
        self.device_status
            .map(|status| DisplayPayload::build(self.config.options(), &self.snapshot, status))
    }

    /// Earliest moment the session needs another tick
    pub fn next_deadline(&self) -> Option<Instant> {
        self.picker.next_deadline()
    }

    /// Time until the display's next page switch
    pub fn until_next_rotation(&self, now: Instant) -> Option<Duration> {
        self.rotation.until_next(self.config.options(), now)
    }

    // ---- events ----

    /// Advance timers: deferred picker closes and display rotation
    pub fn tick(&mut self, now: Instant) {
        let closed = self.picker.tick(now);
        if !closed.is_empty() {
            tracing::trace!("Closed picker(s) {:?}", closed);
        }
        self.device_status = Some(self.rotation.tick(self.config.options(), now));
    }

    /// Apply one user action
    pub fn apply(&mut self, action: AppAction, now: Instant) -> Vec<HostCommand> {
        match action {
            AppAction::SelectTab(tab) => {
                self.active_tab = tab;
            }
            AppAction::GoToPage(n) => {
                if let Err(e) = self.preview.go_to(n) {
                    tracing::warn!("Ignoring page change: {}", e);
                }
            }
            AppAction::OpenPicker(key) => self.picker.open(&key),
            AppAction::TypeSearch { key, term } => self.picker.type_term(&key, term),
            AppAction::SelectEntity { key, entity_id } => {
                self.picker.select(&mut self.config, &key, &entity_id);
            }
            AppAction::ClearEntity(key) => self.picker.clear(&mut self.config, &key),
            AppAction::ClosePicker(key) => self.picker.request_close(&key, now),
            AppAction::KeepPickerOpen(key) => self.picker.cancel_close(&key),
            AppAction::SetOption { key, value } => {
                self.config.set(key, value);
            }
            AppAction::Save => return self.save(),
            AppAction::Reload => return self.start(),
            AppAction::RefreshSnapshot => return vec![HostCommand::RefreshSnapshot],
            AppAction::DismissNotice => self.notice = None,
            // UI preferences are handled by the app
            AppAction::SetLanguage(_) | AppAction::SetDarkMode(_) => {}
        }
        self.sync_refresh_interval()
    }

    /// Apply one message from the host worker
    pub fn handle_message(&mut self, msg: HostMessage) -> Vec<HostCommand> {
        match msg {
            HostMessage::Loaded { entry_id, options } => {
                if self.entry_id.as_deref() != Some(entry_id.as_str()) {
                    tracing::debug!("Ignoring options of stale entry {}", entry_id);
                    return Vec::new();
                }
                self.config.replace_all(options);
                self.hydrated = true;
            }
            HostMessage::LoadFailed { entry_id, error } => {
                if self.entry_id.as_deref() != Some(entry_id.as_str()) {
                    tracing::debug!("Ignoring load failure of stale entry {}", entry_id);
                    return Vec::new();
                }
                if self.hydrated {
                    // Failed reload, the edits in memory stay
                    tracing::warn!(
                        "Reloading {} failed, keeping current options: {}",
                        entry_id,
                        error
                    );
                } else {
                    tracing::warn!("Loading {} failed, starting empty: {}", entry_id, error);
                    self.config.replace_all(ConfigOptions::new());
                }
            }
            HostMessage::Saved { .. } => {
                self.notice = Some(Notice {
                    kind: NoticeKind::Info,
                    message: t!("notice.saved").to_string(),
                });
            }
            HostMessage::SaveFailed { error, .. } => {
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: t!("notice.save_failed", error = error).to_string(),
                });
            }
            HostMessage::Snapshot(snapshot) => {
                self.snapshot = snapshot;
                self.snapshot_revision += 1;
            }
            HostMessage::SnapshotFailed(error) => {
                tracing::debug!("Keeping previous snapshot: {}", error);
            }
            HostMessage::Shutdown => {
                self.host_online = false;
            }
        }
        self.sync_refresh_interval()
    }

    fn save(&mut self) -> Vec<HostCommand> {
        match &self.entry_id {
            Some(entry_id) => vec![HostCommand::Save {
                entry_id: entry_id.clone(),
                options: self.config.shared(),
            }],
            None => {
                tracing::warn!("No entry id configured, save skipped");
                Vec::new()
            }
        }
    }

    /// Tell the worker when `update_interval` changed
    fn sync_refresh_interval(&mut self) -> Vec<HostCommand> {
        let interval = self.config.options().update_interval();
        if interval == self.refresh_interval {
            return Vec::new();
        }
        self.refresh_interval = interval;
        vec![HostCommand::SetRefreshInterval(Duration::from_secs(
            u64::from(interval),
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::UPDATE_INTERVAL;
    use crate::preview::PageView;
    use crate::types::{ConfigValue, SensorState};

    fn loaded(session: &mut PanelSession, options: ConfigOptions) {
        session.handle_message(HostMessage::Loaded {
            entry_id: "e1".into(),
            options,
        });
    }

    #[test]
    fn test_start_requests_load() {
        let mut session = PanelSession::new(Some("e1".into()));
        let cmds = session.start();
        assert!(matches!(&cmds[..], [HostCommand::Load { entry_id }] if entry_id == "e1"));

        let mut anonymous = PanelSession::new(Some("  ".into()));
        assert!(anonymous.start().is_empty());
        assert!(anonymous.apply(AppAction::Save, Instant::now()).is_empty());
    }

    #[test]
    fn test_load_and_stale_entry() {
        let mut session = PanelSession::new(Some("e1".into()));
        let mut options = ConfigOptions::new();
        options.insert("show_kw".into(), ConfigValue::Bool(true));
        loaded(&mut session, options);
        assert!(session.options().show_kw());

        session.handle_message(HostMessage::Loaded {
            entry_id: "other".into(),
            options: ConfigOptions::new(),
        });
        assert!(session.options().show_kw());
    }

    #[test]
    fn test_load_failure_starts_empty_without_notice() {
        let mut session = PanelSession::new(Some("e1".into()));
        session.apply(
            AppAction::SetOption {
                key: "x".into(),
                value: "y".into(),
            },
            Instant::now(),
        );
        session.handle_message(HostMessage::LoadFailed {
            entry_id: "e1".into(),
            error: "boom".into(),
        });
        assert!(session.options().is_empty());
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_failed_reload_keeps_edits() {
        let mut session = PanelSession::new(Some("e1".into()));
        loaded(&mut session, ConfigOptions::new());
        let now = Instant::now();
        session.apply(
            AppAction::SelectEntity {
                key: "solar_entity".into(),
                entity_id: "sensor.pv".into(),
            },
            now,
        );

        let cmds = session.apply(AppAction::Reload, now);
        assert!(matches!(&cmds[..], [HostCommand::Load { entry_id }] if entry_id == "e1"));
        session.handle_message(HostMessage::LoadFailed {
            entry_id: "e1".into(),
            error: "timeout".into(),
        });

        assert_eq!(session.options().binding("solar_entity"), Some("sensor.pv"));
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_load_failure_of_other_entry_ignored() {
        let mut session = PanelSession::new(Some("e1".into()));
        session.apply(
            AppAction::SetOption {
                key: "show_kw".into(),
                value: ConfigValue::Bool(true),
            },
            Instant::now(),
        );
        session.handle_message(HostMessage::LoadFailed {
            entry_id: "other".into(),
            error: "boom".into(),
        });
        assert!(session.options().show_kw());
    }

    #[test]
    fn test_save_sends_current_options_and_notices() {
        let mut session = PanelSession::new(Some("e1".into()));
        let now = Instant::now();
        session.apply(
            AppAction::SelectEntity {
                key: "solar_entity".into(),
                entity_id: "sensor.pv".into(),
            },
            now,
        );

        let cmds = session.apply(AppAction::Save, now);
        match &cmds[..] {
            [HostCommand::Save { entry_id, options }] => {
                assert_eq!(entry_id, "e1");
                assert!(session.config().same_options(options));
            }
            other => panic!("unexpected commands {:?}", other),
        }

        session.handle_message(HostMessage::Saved {
            entry_id: "e1".into(),
        });
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Info);

        session.handle_message(HostMessage::SaveFailed {
            entry_id: "e1".into(),
            error: "denied".into(),
        });
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Error);
        assert_eq!(session.options().binding("solar_entity"), Some("sensor.pv"));

        session.apply(AppAction::DismissNotice, now);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_update_interval_change_reaches_worker() {
        let mut session = PanelSession::new(Some("e1".into()));
        let cmds = session.apply(
            AppAction::SetOption {
                key: UPDATE_INTERVAL.into(),
                value: ConfigValue::Number(30.0),
            },
            Instant::now(),
        );
        assert!(matches!(
            &cmds[..],
            [HostCommand::SetRefreshInterval(d)] if *d == Duration::from_secs(30)
        ));

        let again = session.apply(
            AppAction::SetOption {
                key: UPDATE_INTERVAL.into(),
                value: ConfigValue::from("30"),
            },
            Instant::now(),
        );
        assert!(again.is_empty());
    }

    #[test]
    fn test_snapshot_feeds_preview() {
        let mut session = PanelSession::new(Some("e1".into()));
        let mut options = ConfigOptions::new();
        options.insert("solar_entity".into(), "sensor.pv".into());
        loaded(&mut session, options);

        let mut snap = SensorSnapshot::new();
        snap.insert("sensor.pv".into(), SensorState::new("1234"));
        session.handle_message(HostMessage::Snapshot(snap));
        assert_eq!(session.snapshot_revision(), 1);

        match session.preview().view {
            PageView::Core(core) => assert_eq!(core.solar.value, "1234"),
            PageView::Metrics(_) => panic!("expected core page"),
        }
    }

    #[test]
    fn test_picker_close_via_tick() {
        let mut session = PanelSession::new(None);
        let t0 = Instant::now();
        session.apply(AppAction::OpenPicker("grid_entity".into()), t0);
        session.apply(AppAction::ClosePicker("grid_entity".into()), t0);
        assert_eq!(session.next_deadline(), Some(t0 + crate::picker::CLOSE_GRACE));

        session.tick(t0 + Duration::from_millis(50));
        assert!(session.picker().is_open("grid_entity"));
        session.tick(t0 + Duration::from_millis(300));
        assert!(!session.picker().is_open("grid_entity"));
        assert!(session.payload().is_some());
    }

    #[test]
    fn test_tabs_and_pages() {
        let mut session = PanelSession::new(None);
        let now = Instant::now();
        session.apply(AppAction::SelectTab(Tab::Settings), now);
        assert_eq!(session.active_tab(), Tab::Settings);

        session.apply(AppAction::GoToPage(9), now);
        assert_eq!(session.preview().active_page.get(), 1);
        session.apply(AppAction::GoToPage(5), now);
        assert_eq!(session.preview().active_page.get(), 5);
    }

    #[test]
    fn test_worker_shutdown_marks_offline() {
        let mut session = PanelSession::new(None);
        assert!(session.host_online());
        session.handle_message(HostMessage::Shutdown);
        assert!(!session.host_online());
    }
}
