//! Frontend module for egui UI
//!
//! The frontend owns the [`PanelSession`] and talks to the host worker
//! through a [`HostBridge`]. Every frame it drains the worker's messages,
//! advances the session timers, renders the active tab and applies the
//! actions the pages returned.
//!
//! # Main Types
//!
//! - [`PanelApp`] - Main application state implementing [`eframe::App`]
//! - [`SharedState`] - Borrowed view handed to every page
//! - [`AppAction`] - Everything a page can ask for
//!
//! # Submodules
//!
//! - `pages` - Dashboard, settings and help tabs
//! - `dialogs` - Notice and preferences windows
//! - `picker_widget` - Searchable entity picker
//! - `widgets` - Preview tiles, SOC bar, status dots

pub mod dialogs;
pub mod pages;
pub mod picker_widget;
pub mod state;
pub mod widgets;

pub use state::{AppAction, SharedState, Tab};
pub use widgets::*;

use dialogs::{
    show_dialog, NoticeAction, NoticeDialog, NoticeState, PreferencesAction, PreferencesDialog,
    PreferencesState,
};
use pages::{
    InfoPage, InfoPageState, OverviewPage, OverviewPageState, Page, SettingsPage,
    SettingsPageState,
};

use crate::backend::{HostBridge, HostCommand};
use crate::catalog::{EntityCatalog, DEFAULT_DOMAINS};
use crate::config::{AppState, UiPreferences};
use crate::session::PanelSession;
use crate::types::EntityDescriptor;
use rust_i18n::t;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Slowest repaint while idle, keeps the clock and countdown moving
const IDLE_REPAINT: Duration = Duration::from_secs(1);

/// Main application state of the panel
pub struct PanelApp {
    // === Communication ===
    bridge: HostBridge,
    worker: Option<JoinHandle<()>>,

    // === Shared State ===
    session: PanelSession,
    app_state: AppState,
    /// Catalog built from the snapshot, with the revision it was built from
    catalog: Vec<EntityDescriptor>,
    catalog_revision: Option<u64>,

    // === Page states ===
    overview_state: OverviewPageState,
    settings_state: SettingsPageState,
    info_state: InfoPageState,

    // === Dialogs ===
    notice_open: bool,
    notice_state: NoticeState,
    preferences_open: bool,
    preferences_state: PreferencesState,
}

impl PanelApp {
    /// Create the app around a running host worker
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        bridge: HostBridge,
        worker: Option<JoinHandle<()>>,
        app_state: AppState,
    ) -> Self {
        apply_preferences(&cc.egui_ctx, &app_state.ui_preferences);

        let mut session = PanelSession::new(app_state.entry_id().map(str::to_string));
        for cmd in session.start() {
            if let Err(e) = bridge.send_command(cmd) {
                tracing::warn!("{}", e);
            }
        }

        Self {
            bridge,
            worker,
            session,
            app_state,
            catalog: Vec::new(),
            catalog_revision: None,
            overview_state: OverviewPageState::default(),
            settings_state: SettingsPageState::default(),
            info_state: InfoPageState,
            notice_open: false,
            notice_state: NoticeState,
            preferences_open: false,
            preferences_state: PreferencesState::default(),
        }
    }

    /// Read-only access to the session
    pub fn session(&self) -> &PanelSession {
        &self.session
    }

    fn forward(&self, commands: Vec<HostCommand>) {
        for cmd in commands {
            tracing::debug!("-> host: {:?}", cmd);
            if let Err(e) = self.bridge.send_command(cmd) {
                tracing::warn!("{}", e);
            }
        }
    }

    fn process_host_messages(&mut self) -> bool {
        let messages = self.bridge.drain();
        let had_messages = !messages.is_empty();

        for msg in messages {
            let commands = self.session.handle_message(msg);
            self.forward(commands);
        }

        if self.session.notice().is_some() {
            self.notice_open = true;
        }

        had_messages
    }

    fn refresh_catalog(&mut self) {
        let revision = self.session.snapshot_revision();
        if self.catalog_revision != Some(revision) {
            self.catalog = EntityCatalog::list(self.session.snapshot(), &DEFAULT_DOMAINS);
            self.catalog_revision = Some(revision);
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: AppAction, now: Instant) {
        match action {
            AppAction::SetLanguage(language) => {
                self.app_state.ui_preferences.language = language;
                self.preferences_changed(ctx);
            }
            AppAction::SetDarkMode(dark) => {
                self.app_state.ui_preferences.dark_mode = dark;
                self.preferences_changed(ctx);
            }
            other => {
                let commands = self.session.apply(other, now);
                self.forward(commands);
            }
        }
    }

    fn preferences_changed(&mut self, ctx: &egui::Context) {
        apply_preferences(ctx, &self.app_state.ui_preferences);
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let active = self.session.active_tab();

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                for tab in Tab::all() {
                    if ui.selectable_label(active == *tab, t!(tab.label_key())).clicked() {
                        actions.push(AppAction::SelectTab(*tab));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(t!("preferences.open")).clicked() {
                        self.preferences_state =
                            PreferencesState::from_preferences(&self.app_state.ui_preferences);
                        self.preferences_open = true;
                    }

                    let dark = self.app_state.ui_preferences.dark_mode;
                    let icon = if dark { "☀" } else { "🌙" };
                    if ui.button(icon).clicked() {
                        actions.push(AppAction::SetDarkMode(!dark));
                    }

                    let current = self.app_state.ui_preferences.language;
                    for lang in crate::i18n::Language::all() {
                        if ui
                            .selectable_label(current == *lang, lang.code().to_uppercase())
                            .on_hover_text(lang.display_name())
                            .clicked()
                        {
                            actions.push(AppAction::SetLanguage(*lang));
                        }
                    }
                });
            });
        });

        actions
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();

        if let Some(notice) = self.session.notice().cloned() {
            if let Some(NoticeAction::Dismiss) = show_dialog::<NoticeDialog>(
                ctx,
                &mut self.notice_open,
                &mut self.notice_state,
                &notice,
            ) {
                actions.push(AppAction::DismissNotice);
            }
            // Closed through the window's X
            if !self.notice_open && actions.is_empty() {
                actions.push(AppAction::DismissNotice);
            }
        }

        if let Some(PreferencesAction::Apply(prefs)) = show_dialog::<PreferencesDialog>(
            ctx,
            &mut self.preferences_open,
            &mut self.preferences_state,
            (),
        ) {
            prefs.apply_to(&mut self.app_state.ui_preferences);
            self.preferences_changed(ctx);
        }

        actions
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let had_messages = self.process_host_messages();
        self.session.tick(now);
        self.refresh_catalog();

        let mut actions = self.render_top_bar(ctx);

        {
            let shared = SharedState {
                session: &self.session,
                app_state: &self.app_state,
                catalog: &self.catalog,
                now,
            };

            let page_actions = match self.session.active_tab() {
                Tab::Dashboard => OverviewPage::render(&mut self.overview_state, &shared, ctx),
                Tab::Settings => SettingsPage::render(&mut self.settings_state, &shared, ctx),
                Tab::Help => InfoPage::render(&mut self.info_state, &shared, ctx),
            };
            actions.extend(page_actions);
        }

        actions.extend(self.render_dialogs(ctx));

        let had_actions = !actions.is_empty();
        for action in actions {
            self.handle_action(ctx, action, now);
        }

        if had_messages || had_actions {
            ctx.request_repaint();
        } else {
            let wait = self
                .session
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(now))
                .map_or(IDLE_REPAINT, |left| left.min(IDLE_REPAINT));
            ctx.request_repaint_after(wait);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.bridge.shutdown();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::warn!("Host worker panicked during shutdown");
            }
        }

        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}

/// Apply theme, font scale and language
fn apply_preferences(ctx: &egui::Context, prefs: &UiPreferences) {
    if prefs.dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
    ctx.set_zoom_factor(prefs.font_scale.clamp(0.5, 2.0));
    crate::i18n::set_language(prefs.language);
}
