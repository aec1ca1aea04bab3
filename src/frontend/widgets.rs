//! Custom widgets for the panel UI
//!
//! # Widgets
//!
//! - [`StatusIndicator`] - Colored status dot with label (host online, offline)
//! - [`MetricTile`] - Accent-bordered label/value tile of the preview screen
//! - [`SocBar`] - Battery charge bar coloured by SOC level
//! - [`PageDots`] - Page indicator dots of the preview footer

use egui::{Color32, Response, RichText, Sense, Ui, Widget};

/// Convert a `0xRRGGBB` colour
pub fn hex_color(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// A widget that displays a colored status indicator
pub struct StatusIndicator {
    color: Color32,
    label: String,
    tooltip: Option<String>,
}

impl StatusIndicator {
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for StatusIndicator {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui
            .horizontal(|ui| {
                ui.colored_label(self.color, "●");
                ui.label(&self.label);
            })
            .response;

        match self.tooltip {
            Some(tooltip) => response.on_hover_text(tooltip),
            None => response,
        }
    }
}

/// Label/value tile with a coloured left border
pub struct MetricTile {
    label: String,
    value: String,
    accent: Color32,
    width: f32,
}

impl MetricTile {
    pub fn new(label: impl Into<String>, value: impl Into<String>, accent: Color32) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            accent,
            width: 140.0,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl Widget for MetricTile {
    fn ui(self, ui: &mut Ui) -> Response {
        egui::Frame::new()
            .fill(Color32::from_rgb(0x1e, 0x1e, 0x1e))
            .inner_margin(6.0)
            .outer_margin(2.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.set_width(self.width);
                ui.horizontal(|ui| {
                    let (bar, _) = ui.allocate_exact_size(egui::vec2(4.0, 30.0), Sense::hover());
                    ui.painter().rect_filled(bar, 1.0, self.accent);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(self.label.to_uppercase()).small().color(self.accent));
                        ui.label(RichText::new(self.value).strong().color(Color32::WHITE));
                    });
                });
            })
            .response
    }
}

/// Battery bar, `fill` in `0.0..=1.0`
pub struct SocBar {
    fill: f32,
    color: Color32,
    width: f32,
}

impl SocBar {
    pub fn new(fill: f32, color: Color32) -> Self {
        Self {
            fill: fill.clamp(0.0, 1.0),
            color,
            width: 100.0,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl Widget for SocBar {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(self.width, 8.0), Sense::hover());
        let painter = ui.painter();
        painter.rect_filled(rect, 3.0, Color32::from_gray(0x33));
        let mut filled = rect;
        filled.set_width(rect.width() * self.fill);
        painter.rect_filled(filled, 3.0, self.color);
        response
    }
}

/// Indicator dots, one per enabled page
pub struct PageDots {
    /// `true` marks the active page
    dots: Vec<bool>,
}

impl PageDots {
    pub fn new(dots: impl IntoIterator<Item = bool>) -> Self {
        Self {
            dots: dots.into_iter().collect(),
        }
    }
}

impl Widget for PageDots {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            for active in self.dots {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), Sense::hover());
                let color = if active {
                    Color32::from_rgb(0xfd, 0xd8, 0x35)
                } else {
                    Color32::from_gray(0x55)
                };
                ui.painter().circle_filled(rect.center(), 3.0, color);
            }
        })
        .response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(0x00f3ff), Color32::from_rgb(0x00, 0xf3, 0xff));
        assert_eq!(hex_color(0xef5350), Color32::from_rgb(0xef, 0x53, 0x50));
    }
}
