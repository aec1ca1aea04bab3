//! Searchable entity picker rendered with egui
//!
//! The text field doubles as the search box. Focus opens the picker,
//! typing filters it and losing focus schedules the deferred close, so a
//! press on a candidate still selects it. Candidates react to the pointer
//! going down rather than to a full click for the same reason.

use super::state::{AppAction, SharedState};
use super::widgets::hex_color;
use crate::config::OptionsExt;
use crate::picker::{self, filter_candidates, PickerCandidates};
use egui::{Color32, RichText, Ui};
use rust_i18n::t;

/// Highlight colour of the bound candidate and the chip
const BOUND_ACCENT: u32 = 0xb26ef7;

/// Render the picker bound to options key `key`
pub fn entity_picker(
    ui: &mut Ui,
    shared: &SharedState<'_>,
    key: &str,
    label: &str,
) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let session = shared.session;
    let bound = session.options().binding(key);
    let is_open = session.picker().is_open(key);

    ui.label(label);

    let hint = picker::placeholder(bound, shared.catalog)
        .unwrap_or_else(|| t!("picker.choose").to_string());
    let mut term = session.picker().term(key).unwrap_or_default().to_string();

    let response = ui.add(
        egui::TextEdit::singleline(&mut term)
            .hint_text(hint)
            .id_salt(("picker", key))
            .desired_width(f32::INFINITY),
    );

    if response.gained_focus() {
        let key = key.to_string();
        actions.push(if is_open {
            AppAction::KeepPickerOpen(key)
        } else {
            AppAction::OpenPicker(key)
        });
    }
    if response.changed() {
        actions.push(AppAction::TypeSearch {
            key: key.to_string(),
            term: term.clone(),
        });
    }
    if response.lost_focus() {
        actions.push(AppAction::ClosePicker(key.to_string()));
    }

    if is_open {
        let filtered = filter_candidates(shared.catalog.to_vec(), &term);
        egui::Frame::popup(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt(("picker_list", key))
                .max_height(220.0)
                .show(ui, |ui| match filtered {
                    PickerCandidates::Matches(list) => {
                        for entry in list {
                            let selected = bound == Some(entry.id.as_str());
                            let text = if selected {
                                RichText::new(&entry.display_name).color(hex_color(BOUND_ACCENT))
                            } else {
                                RichText::new(&entry.display_name)
                            };
                            let item = ui.selectable_label(selected, text);
                            if item.is_pointer_button_down_on() || item.clicked() {
                                actions.push(AppAction::SelectEntity {
                                    key: key.to_string(),
                                    entity_id: entry.id.clone(),
                                });
                            }
                        }
                    }
                    PickerCandidates::NoResults => {
                        ui.label(RichText::new(t!("picker.no_results")).italics().weak());
                    }
                });
        });
    }

    if let Some((name, id)) = picker::chip(bound, shared.catalog) {
        ui.horizontal(|ui| {
            egui::Frame::new()
                .fill(Color32::from_rgba_unmultiplied(0xb2, 0x6e, 0xf7, 0x22))
                .inner_margin(4.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(name).strong());
                        ui.label(RichText::new(id).monospace().small().weak());
                    });
                });
            if ui
                .small_button("✕")
                .on_hover_text(t!("picker.clear").to_string())
                .clicked()
            {
                actions.push(AppAction::ClearEntity(key.to_string()));
            }
        });
    }

    actions
}
