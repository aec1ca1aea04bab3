//! Help page - how the panel and the display work together

use egui::{Context, RichText, Ui};
use rust_i18n::t;

use super::Page;
use crate::frontend::state::{AppAction, SharedState, Tab};

#[derive(Default)]
pub struct InfoPageState;

pub struct InfoPage;

/// (heading key, body key) of every help section, in order
const SECTIONS: [(&str, &str); 5] = [
    ("help.pickers_title", "help.pickers_body"),
    ("help.pages_title", "help.pages_body"),
    ("help.modes_title", "help.modes_body"),
    ("help.touch_title", "help.touch_body"),
    ("help.units_title", "help.units_body"),
];

impl Page for InfoPage {
    type State = InfoPageState;

    fn render(_state: &mut Self::State, _shared: &SharedState<'_>, ctx: &Context) -> Vec<AppAction> {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(t!("help.title"));
                ui.separator();

                for (title, body) in SECTIONS {
                    section(ui, title, body);
                }

                ui.add_space(12.0);
                if ui.button(t!("help.open_settings")).clicked() {
                    actions.push(AppAction::SelectTab(Tab::Settings));
                }
            });
        });

        actions
    }
}

fn section(ui: &mut Ui, title: &str, body: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(t!(title)).strong());
    ui.label(t!(body));
}
