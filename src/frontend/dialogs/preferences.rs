//! Preferences dialog
//!
//! Panel-wide appearance: language, dark mode and font scale. These live in
//! the local app state, never in the display options.

use egui::Ui;
use rust_i18n::t;

use crate::config::UiPreferences;
use crate::frontend::dialogs::{Dialog, DialogAction, DialogState, DialogWindowConfig};
use crate::i18n::Language;

/// State for the preferences dialog
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesState {
    pub dark_mode: bool,
    pub font_scale: f32,
    pub language: Language,
}

impl Default for PreferencesState {
    fn default() -> Self {
        Self::from_preferences(&UiPreferences::default())
    }
}

impl PreferencesState {
    pub fn from_preferences(prefs: &UiPreferences) -> Self {
        Self {
            dark_mode: prefs.dark_mode,
            font_scale: prefs.font_scale,
            language: prefs.language,
        }
    }

    /// Write the edited values back
    pub fn apply_to(&self, prefs: &mut UiPreferences) {
        prefs.dark_mode = self.dark_mode;
        prefs.font_scale = self.font_scale;
        prefs.language = self.language;
    }
}

impl DialogState for PreferencesState {}

/// Actions produced by the preferences dialog
#[derive(Debug, Clone)]
pub enum PreferencesAction {
    Apply(PreferencesState),
}

pub struct PreferencesDialog;

impl Dialog for PreferencesDialog {
    type State = PreferencesState;
    type Action = PreferencesAction;
    type Context<'a> = ();

    fn title(_state: &Self::State) -> String {
        t!("preferences.title").to_string()
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig {
            default_width: 360.0,
            ..Default::default()
        }
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        egui::Grid::new("prefs_appearance_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label(format!("{}:", t!("preferences.language")));
                egui::ComboBox::from_id_salt("language_selector")
                    .selected_text(state.language.display_name())
                    .show_ui(ui, |ui| {
                        for lang in Language::all() {
                            ui.selectable_value(&mut state.language, *lang, lang.display_name());
                        }
                    });
                ui.end_row();

                ui.label(format!("{}:", t!("preferences.dark_mode")));
                ui.checkbox(&mut state.dark_mode, "");
                ui.end_row();

                ui.label(format!("{}:", t!("preferences.font_scale")));
                ui.add(egui::Slider::new(&mut state.font_scale, 0.5..=2.0).step_by(0.1));
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button(t!("dialog.apply")).clicked() {
                return DialogAction::CloseWithAction(PreferencesAction::Apply(state.clone()));
            }
            if ui.button(t!("dialog.cancel")).clicked() {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}
