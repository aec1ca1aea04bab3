//! Dialog trait system
//!
//! Each dialog implements [`Dialog`], which bundles its state, the action it
//! produces and how it renders. [`show_dialog`] runs the shared window
//! lifecycle around it.

mod notice;
mod preferences;

pub use notice::{NoticeAction, NoticeDialog, NoticeState};
pub use preferences::{PreferencesAction, PreferencesDialog, PreferencesState};

use egui::{Align2, Context, Ui};

/// Actions that a dialog can return after rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogAction<A> {
    /// Keep the dialog open, no action needed
    #[default]
    None,
    /// Close the dialog without performing any action
    Close,
    /// Close the dialog and perform the specified action
    CloseWithAction(A),
    /// Keep the dialog open but perform the specified action
    Action(A),
}

impl<A> DialogAction<A> {
    /// Check if the action indicates the dialog should close
    pub fn should_close(&self) -> bool {
        matches!(self, DialogAction::Close | DialogAction::CloseWithAction(_))
    }

    /// Extract the action if present
    pub fn into_action(self) -> Option<A> {
        match self {
            DialogAction::CloseWithAction(a) | DialogAction::Action(a) => Some(a),
            _ => None,
        }
    }
}

/// Dialog state with a reset hook, called when the window closes
pub trait DialogState: Default {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Window appearance of a dialog
#[derive(Debug, Clone)]
pub struct DialogWindowConfig {
    pub default_width: f32,
    pub resizable: bool,
    pub collapsible: bool,
    /// Optional anchor position (alignment and offset)
    pub anchor: Option<(Align2, [f32; 2])>,
}

impl Default for DialogWindowConfig {
    fn default() -> Self {
        Self {
            default_width: 400.0,
            resizable: true,
            collapsible: false,
            anchor: None,
        }
    }
}

impl DialogWindowConfig {
    /// Centered, fixed-size dialog
    pub fn centered_modal(width: f32) -> Self {
        Self {
            default_width: width,
            resizable: false,
            collapsible: false,
            anchor: Some((Align2::CENTER_CENTER, [0.0, 0.0])),
        }
    }
}

/// Main dialog trait
///
/// ```ignore
/// pub struct ConfirmDialog;
///
/// impl Dialog for ConfirmDialog {
///     type State = ();
///     type Action = bool;
///     type Context<'a> = &'a str;
///
///     fn title(_state: &()) -> String { "Confirm".into() }
///
///     fn render(_: &mut (), question: &str, ui: &mut Ui) -> DialogAction<bool> {
///         ui.label(question);
///         if ui.button("Yes").clicked() {
///             return DialogAction::CloseWithAction(true);
///         }
///         DialogAction::None
///     }
/// }
/// ```
pub trait Dialog {
    /// The state type for this dialog
    type State: DialogState;

    /// The action type this dialog can produce
    type Action;

    /// The context type needed to render this dialog
    type Context<'a>;

    /// Window title, already translated
    fn title(state: &Self::State) -> String;

    fn window_config() -> DialogWindowConfig {
        DialogWindowConfig::default()
    }

    /// Render the dialog content and report what should happen next
    fn render(
        state: &mut Self::State,
        ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action>;
}

/// Show a dialog using the Dialog trait
///
/// Renders only while `is_open` is set. Closing clears `is_open` and
/// resets the state.
///
/// Returns `Some(action)` if the dialog produced an action, `None` otherwise.
pub fn show_dialog<D: Dialog>(
    ctx: &Context,
    is_open: &mut bool,
    state: &mut D::State,
    dialog_ctx: D::Context<'_>,
) -> Option<D::Action> {
    if !*is_open {
        return None;
    }

    let config = D::window_config();
    let mut outcome = DialogAction::None;

    let mut window = egui::Window::new(D::title(state))
        .collapsible(config.collapsible)
        .resizable(config.resizable)
        .default_width(config.default_width);

    if let Some((align, offset)) = config.anchor {
        window = window.anchor(align, offset);
    }

    let mut window_open = true;
    window.open(&mut window_open).show(ctx, |ui| {
        outcome = D::render(state, dialog_ctx, ui);
    });

    let should_close = outcome.should_close() || !window_open;
    let action = outcome.into_action();

    if should_close {
        *is_open = false;
        state.reset();
    }

    action
}
