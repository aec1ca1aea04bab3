//! Page modules for the frontend
//!
//! One page per tab. Each page implements the [`Page`] trait, reading the
//! session through [`SharedState`] and returning actions instead of
//! mutating it.

mod info;
mod overview;
mod settings;

pub use info::{InfoPage, InfoPageState};
pub use overview::{OverviewPage, OverviewPageState};
pub use settings::{SettingsPage, SettingsPageState};

use crate::frontend::state::{AppAction, SharedState};
use egui::Context;

/// Trait for page components
///
/// ```ignore
/// pub struct MyPage;
///
/// impl Page for MyPage {
///     type State = ();
///
///     fn render(_: &mut (), shared: &SharedState<'_>, ctx: &Context) -> Vec<AppAction> {
///         let mut actions = Vec::new();
///         egui::CentralPanel::default().show(ctx, |ui| {
///             if ui.button("Save").clicked() {
///                 actions.push(AppAction::Save);
///             }
///         });
///         actions
///     }
/// }
/// ```
pub trait Page {
    /// Page-specific UI state, owned by the app and kept across frames
    type State: Default;

    /// Render the page and return the actions to apply after the frame
    fn render(state: &mut Self::State, shared: &SharedState<'_>, ctx: &Context) -> Vec<AppAction>;
}
