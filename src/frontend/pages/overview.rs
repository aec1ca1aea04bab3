//! Dashboard page - live preview of the display
//!
//! Draws the 320x240 screen the way the device lays it out, the page
//! buttons for every enabled page and a side panel with what the physical
//! display currently receives.

use egui::{Color32, Context, RichText, Ui};
use rust_i18n::t;

use super::Page;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::widgets::{hex_color, MetricTile, PageDots, SocBar, StatusIndicator};
use crate::preview::{CoreView, MetricTile as TileData, PageView, PreviewState, TileLabel};

/// Screen size of the display in points
const SCREEN_SIZE: egui::Vec2 = egui::vec2(320.0, 240.0);

const SCREEN_BG: Color32 = Color32::from_rgb(0x0d, 0x0d, 0x0d);
const BEZEL: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);

#[derive(Default)]
pub struct OverviewPageState {
    /// Show the push record as JSON
    pub show_payload: bool,
}

pub struct OverviewPage;

impl Page for OverviewPage {
    type State = OverviewPageState;

    fn render(state: &mut Self::State, shared: &SharedState<'_>, ctx: &Context) -> Vec<AppAction> {
        let mut actions = Vec::new();
        let preview = shared.session.preview();

        egui::SidePanel::right("device_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                Self::render_device_panel(state, shared, ui, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(t!("overview.title"));
            ui.label(RichText::new(t!("overview.subtitle")).weak());
            ui.add_space(12.0);

            ui.vertical_centered(|ui| {
                Self::render_screen(&preview, ui);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    for nav in &preview.navigation {
                        let label = format!("P{}", nav.page);
                        if ui.selectable_label(nav.active, label).clicked() {
                            actions.push(AppAction::GoToPage(nav.page.get()));
                        }
                    }
                });
            });
        });

        actions
    }
}

impl OverviewPage {
    fn render_screen(preview: &PreviewState, ui: &mut Ui) {
        egui::Frame::new()
            .fill(BEZEL)
            .inner_margin(10.0)
            .corner_radius(8.0)
            .show(ui, |ui| {
                egui::Frame::new()
                    .fill(SCREEN_BG)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.set_min_size(SCREEN_SIZE);
                        ui.set_max_width(SCREEN_SIZE.x);

                        ui.horizontal(|ui| {
                            ui.label(RichText::new(t!("overview.screen_title")).strong());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(chrono::Local::now().format("%H:%M").to_string());
                            });
                        });
                        ui.separator();

                        match &preview.view {
                            PageView::Core(core) => Self::render_core(core, ui),
                            PageView::Metrics(tiles) => Self::render_tiles(tiles, ui),
                        }

                        ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                            ui.add(PageDots::new(preview.navigation.iter().map(|n| n.active)));
                        });
                    });
            });
    }

    fn render_core(core: &CoreView, ui: &mut Ui) {
        let quadrant = |ui: &mut Ui, label: String, accent: u32, body: &dyn Fn(&mut Ui)| {
            egui::Frame::new()
                .fill(Color32::from_rgb(0x1a, 0x1a, 0x1a))
                .inner_margin(6.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.set_width(140.0);
                    ui.label(RichText::new(label).small().color(hex_color(accent)));
                    body(ui);
                });
        };

        egui::Grid::new("core_quadrants")
            .num_columns(2)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                quadrant(ui, t!("preview.solar").to_string(), 0xfdd835, &|ui| {
                    ui.label(RichText::new(core.solar.to_string()).heading());
                });
                quadrant(ui, t!("preview.house").to_string(), 0x3498db, &|ui| {
                    ui.label(RichText::new(core.house.to_string()).heading());
                });
                ui.end_row();

                quadrant(ui, t!("preview.battery").to_string(), 0x4caf50, &|ui| {
                    let color = hex_color(core.soc.level.color());
                    ui.label(RichText::new(core.soc.text()).heading().color(color));
                    ui.add(SocBar::new(core.soc.fill, color).with_width(120.0));
                    ui.label(RichText::new(core.battery.to_string()).small());
                });
                let grid_accent = match core.grid.direction {
                    crate::preview::GridDirection::Export => 0x4caf50,
                    crate::preview::GridDirection::Import => 0xe74c3c,
                };
                quadrant(ui, t!(core.grid.direction.label_key()).to_string(), grid_accent, &|ui| {
                    ui.label(RichText::new(core.grid.magnitude.to_string()).heading());
                });
                ui.end_row();
            });
    }

    fn render_tiles(tiles: &[TileData], ui: &mut Ui) {
        egui::Grid::new("metric_tiles")
            .num_columns(2)
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for (i, tile) in tiles.iter().enumerate() {
                    let label = match &tile.label {
                        TileLabel::Key(key) => t!(*key).to_string(),
                        TileLabel::Text(text) => text.clone(),
                    };
                    ui.add(MetricTile::new(label, tile.text(), hex_color(tile.accent)));
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }

    fn render_device_panel(
        state: &mut OverviewPageState,
        shared: &SharedState<'_>,
        ui: &mut Ui,
        actions: &mut Vec<AppAction>,
    ) {
        let session = shared.session;

        ui.heading(t!("device.heading"));
        ui.add_space(4.0);

        if session.host_online() {
            ui.add(StatusIndicator::new(Color32::GREEN, t!("device.host_online")));
        } else {
            ui.add(StatusIndicator::new(Color32::GRAY, t!("device.host_offline")));
        }
        ui.label(t!("device.sensors", count = session.snapshot().len()));
        if ui.button(t!("device.refresh")).clicked() {
            actions.push(AppAction::RefreshSnapshot);
        }
        ui.separator();

        match session.device_status() {
            Some(status) => {
                ui.label(t!(
                    "device.page",
                    page = status.page_num,
                    idx = status.page_idx,
                    total = status.page_total
                ));
                match session.until_next_rotation(shared.now) {
                    Some(left) => {
                        ui.label(t!("device.next_switch", seconds = left.as_secs()));
                    }
                    None => {
                        ui.label(t!("device.touch_only"));
                    }
                }
            }
            None => {
                ui.label(RichText::new(t!("device.waiting")).weak());
            }
        }

        ui.add_space(8.0);
        ui.checkbox(&mut state.show_payload, t!("device.show_payload"));
        if state.show_payload {
            match session.payload().map(|p| p.to_pretty_json()) {
                Some(Ok(json)) => {
                    egui::ScrollArea::vertical()
                        .id_salt("payload_json")
                        .show(ui, |ui| {
                            ui.label(RichText::new(json).monospace().small());
                        });
                }
                Some(Err(e)) => {
                    ui.colored_label(Color32::RED, e.to_string());
                }
                None => {}
            }
        }
    }
}
