//! Notice dialog
//!
//! Shows the outcome of a save (success or the host's error) until the
//! user acknowledges it.

use egui::{Color32, RichText, Ui};
use rust_i18n::t;

use crate::frontend::dialogs::{Dialog, DialogAction, DialogState, DialogWindowConfig};
use crate::session::{Notice, NoticeKind};

#[derive(Debug, Default)]
pub struct NoticeState;

impl DialogState for NoticeState {}

#[derive(Debug, Clone, PartialEq)]
pub enum NoticeAction {
    Dismiss,
}

pub struct NoticeDialog;

impl Dialog for NoticeDialog {
    type State = NoticeState;
    type Action = NoticeAction;
    type Context<'a> = &'a Notice;

    fn title(_state: &Self::State) -> String {
        t!("notice.title").to_string()
    }

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::centered_modal(320.0)
    }

    fn render(
        _state: &mut Self::State,
        notice: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        let color = match notice.kind {
            NoticeKind::Info => ui.visuals().text_color(),
            NoticeKind::Error => Color32::from_rgb(0xe7, 0x4c, 0x3c),
        };
        ui.label(RichText::new(&notice.message).color(color));
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            if ui.button(t!("dialog.ok")).clicked() {
                DialogAction::CloseWithAction(NoticeAction::Dismiss)
            } else {
                DialogAction::None
            }
        })
        .inner
    }
}
