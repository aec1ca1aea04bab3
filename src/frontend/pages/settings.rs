//! Settings page - display options and sensor bindings
//!
//! This page provides configuration for:
//! - Units and page switching (mode, push and rotation intervals)
//! - Enabling each of the five pages
//! - Binding a sensor to every slot through the entity picker
//! - Names of the custom and mining slots
//!
//! Every edit goes straight into the session's options; nothing reaches
//! the host until Save is pressed.

use egui::{Context, RichText, Ui};
use rust_i18n::t;

use super::Page;
use crate::config::options::{
    GRID_EXPORT_ENTITY, GRID_IMPORT_ENTITY, MIN_PAGE_INTERVAL, MIN_UPDATE_INTERVAL,
    PAGE_INTERVAL, PAGE_SWITCH_MODE, SHOW_KW, UPDATE_INTERVAL,
};
use crate::config::{ConfigOptions, OptionsExt, PageSwitchMode};
use crate::frontend::picker_widget::entity_picker;
use crate::frontend::state::{AppAction, SharedState};
use crate::pages::{PageDefinition, PageIndex, PageKind, SlotDefinition, SlotLabel};
use crate::types::ConfigValue;

/// State specific to the Settings page
#[derive(Default)]
pub struct SettingsPageState {
    /// Only show the bindings of enabled pages
    pub hide_disabled: bool,
}

pub struct SettingsPage;

impl Page for SettingsPage {
    type State = SettingsPageState;

    fn render(state: &mut Self::State, shared: &SharedState<'_>, ctx: &Context) -> Vec<AppAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::bottom("settings_actions").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let can_save = shared.session.entry_id().is_some();
                if ui
                    .add_enabled(can_save, egui::Button::new(t!("settings.save")))
                    .clicked()
                {
                    actions.push(AppAction::Save);
                }
                if ui
                    .add_enabled(can_save, egui::Button::new(t!("settings.reload")))
                    .clicked()
                {
                    actions.push(AppAction::Reload);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match shared.session.entry_id() {
                        Some(id) => ui.label(RichText::new(id).monospace().weak()),
                        None => ui.label(RichText::new(t!("settings.no_entry")).weak()),
                    };
                });
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(t!("settings.title"));
                ui.separator();

                Self::render_display_section(shared.session.options(), ui, &mut actions);
                ui.separator();

                ui.checkbox(&mut state.hide_disabled, t!("settings.hide_disabled"));
                ui.add_space(4.0);

                for index in PageIndex::all() {
                    let page = index.definition();
                    if state.hide_disabled && !page.is_enabled(shared.session.options()) {
                        continue;
                    }
                    Self::render_page_section(page, shared, ui, &mut actions);
                }
            });
        });

        actions
    }
}

impl SettingsPage {
    fn render_display_section(options: &ConfigOptions, ui: &mut Ui, actions: &mut Vec<AppAction>) {
        ui.label(RichText::new(t!("settings.display")).strong());
        ui.add_space(4.0);

        let mode = options.page_switch_mode();

        egui::Grid::new("display_settings_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label(format!("{}:", t!("settings.show_kw")));
                let mut show_kw = options.show_kw();
                if ui.checkbox(&mut show_kw, "").changed() {
                    actions.push(AppAction::set(SHOW_KW, show_kw));
                }
                ui.end_row();

                ui.label(format!("{}:", t!("settings.page_switch_mode")));
                let mut selected = mode;
                egui::ComboBox::from_id_salt("page_switch_mode")
                    .selected_text(t!(mode_key(mode)))
                    .show_ui(ui, |ui| {
                        for candidate in PageSwitchMode::all() {
                            ui.selectable_value(&mut selected, *candidate, t!(mode_key(*candidate)));
                        }
                    });
                if selected != mode {
                    actions.push(AppAction::set(PAGE_SWITCH_MODE, selected.as_str()));
                }
                ui.end_row();

                ui.label(format!("{}:", t!("settings.update_interval")));
                let mut update = options.update_interval();
                let response = ui.add(
                    egui::DragValue::new(&mut update)
                        .range(MIN_UPDATE_INTERVAL..=3600)
                        .suffix(" s"),
                );
                if response.changed() {
                    actions.push(AppAction::set(UPDATE_INTERVAL, f64::from(update)));
                }
                ui.end_row();

                ui.label(format!("{}:", t!("settings.page_interval")));
                let mut interval = options.page_interval();
                let response = ui.add_enabled(
                    mode.rotates(),
                    egui::DragValue::new(&mut interval)
                        .range(MIN_PAGE_INTERVAL..=3600)
                        .suffix(" s"),
                );
                if response.changed() {
                    actions.push(AppAction::set(PAGE_INTERVAL, f64::from(interval)));
                }
                ui.end_row();
            });

        if mode == PageSwitchMode::Both {
            ui.label(RichText::new(t!("settings.both_hint")).small().weak());
        }
    }

    fn render_page_section(
        page: &'static PageDefinition,
        shared: &SharedState<'_>,
        ui: &mut Ui,
        actions: &mut Vec<AppAction>,
    ) {
        let options = shared.session.options();
        let enabled = page.is_enabled(options);
        let title = format!(
            "{} {}: {}",
            t!("settings.page"),
            page.index,
            t!(kind_key(page.kind))
        );

        egui::CollapsingHeader::new(title)
            .id_salt(("settings_page", page.index.get()))
            .default_open(page.index == PageIndex::FIRST)
            .show(ui, |ui| {
                let mut on = enabled;
                if ui.checkbox(&mut on, t!("settings.enable_page")).changed() {
                    actions.push(AppAction::set(page.index.enable_key(), on));
                }
                ui.add_space(4.0);

                for slot in page.slots {
                    Self::render_slot(slot, enabled, shared, ui, actions);
                }

                if page.kind == PageKind::Core {
                    ui.add_space(4.0);
                    ui.label(RichText::new(t!("settings.grid_split")).small().weak());
                    let label = t!("settings.grid_import_entity");
                    actions.extend(entity_picker(ui, shared, GRID_IMPORT_ENTITY, &label));
                    let label = t!("settings.grid_export_entity");
                    actions.extend(entity_picker(ui, shared, GRID_EXPORT_ENTITY, &label));
                }
            });
    }

    fn render_slot(
        slot: &'static SlotDefinition,
        page_enabled: bool,
        shared: &SharedState<'_>,
        ui: &mut Ui,
        actions: &mut Vec<AppAction>,
    ) {
        let options = shared.session.options();

        let label = match slot.label {
            SlotLabel::Fixed(key) => t!(key).to_string(),
            SlotLabel::Named { .. } => slot.custom_name(options).unwrap_or_default().to_string(),
        };

        egui::Frame::new()
            .inner_margin(egui::Margin::symmetric(0, 4))
            .show(ui, |ui| {
                if let (Some(name_key), true) = (slot.name_key(), page_enabled) {
                    ui.horizontal(|ui| {
                        ui.label(format!("{}:", t!("settings.slot_name")));
                        let mut name = options
                            .get(name_key)
                            .and_then(ConfigValue::as_str)
                            .unwrap_or_default()
                            .to_string();
                        let hint = slot.default_name().unwrap_or_default();
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut name)
                                .hint_text(hint)
                                .id_salt(("slot_name", name_key))
                                .desired_width(180.0),
                        );
                        if response.changed() {
                            actions.push(AppAction::set(name_key, name));
                        }
                    });
                }

                let caption = format!("{} ({})", label, slot.unit);
                actions.extend(entity_picker(ui, shared, slot.entity_key, &caption));
            });
    }
}

/// Translation key of a page switch mode
fn mode_key(mode: PageSwitchMode) -> &'static str {
    match mode {
        PageSwitchMode::Auto => "settings.mode_auto",
        PageSwitchMode::Touch => "settings.mode_touch",
        PageSwitchMode::Both => "settings.mode_both",
    }
}

/// Translation key of a page layout family
fn kind_key(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Core => "settings.kind_core",
        PageKind::Yield => "settings.kind_yield",
        PageKind::Custom => "settings.kind_custom",
        PageKind::Mining => "settings.kind_mining",
    }
}
