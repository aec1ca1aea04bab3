//! Preview engine for the display pages
//!
//! [`PreviewEngine`] only remembers which page is active. Everything else
//! in a [`PreviewState`] is derived from the current options and the live
//! snapshot each time [`PreviewEngine::render`] is called.

use crate::config::{ConfigOptions, OptionsExt};
use crate::error::Result;
use crate::pages::{
    self, PageIndex, PageKind, SlotDefinition, SlotLabel, BATTERY_ENTITY, BATTERY_SOC_ENTITY,
    GRID_ENTITY, HOUSE_ENTITY, SOLAR_ENTITY,
};
use crate::resolver::ValueResolver;
use crate::types::SensorSnapshot;
use std::fmt;

/// SOC at or below this level is critical
pub const SOC_ALERT_MAX: f64 = 20.0;
/// SOC at or below this level is low
pub const SOC_WARNING_MAX: f64 = 50.0;

/// Unit of a formatted power value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUnit {
    W,
    KW,
}

impl PowerUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUnit::W => "W",
            PowerUnit::KW => "kW",
        }
    }
}

impl fmt::Display for PowerUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power value formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerText {
    pub value: String,
    pub unit: PowerUnit,
}

impl fmt::Display for PowerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Format watts according to the `show_kw` policy
///
/// kW: divided by 1000 with two decimals, exact halves rounding away from
/// zero. W: rounded to the nearest integer, halves rounding up.
pub fn format_power(watts: f64, show_kw: bool) -> PowerText {
    if show_kw {
        let text = format!("{:.2}", round_two_decimals(watts / 1000.0));
        let value = if text == "-0.00" { "0.00".to_string() } else { text };
        PowerText {
            value,
            unit: PowerUnit::KW,
        }
    } else {
        let rounded = (watts + 0.5).floor();
        // (-0.4 + 0.5).floor() is 0, but -0.5 rounds to -0.0
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        PowerText {
            value: format!("{}", rounded),
            unit: PowerUnit::W,
        }
    }
}

/// `{:.2}` alone would send exact ties such as 1.125 to the even digit
fn round_two_decimals(value: f64) -> f64 {
    let hundredths = value * 100.0;
    if hundredths.fract().abs() == 0.5 {
        hundredths.round() / 100.0
    } else {
        value
    }
}

/// Direction of the grid flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDirection {
    /// Drawing from the grid (value >= 0)
    Import,
    /// Feeding into the grid (value < 0)
    Export,
}

impl GridDirection {
    pub fn from_watts(watts: f64) -> Self {
        if watts < 0.0 {
            GridDirection::Export
        } else {
            GridDirection::Import
        }
    }

    /// Translation key of the quadrant label
    pub fn label_key(&self) -> &'static str {
        match self {
            GridDirection::Import => "preview.grid_import",
            GridDirection::Export => "preview.grid_export",
        }
    }
}

/// Battery charge band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocLevel {
    Alert,
    Warning,
    Nominal,
}

impl SocLevel {
    pub fn from_percent(soc: f64) -> Self {
        if soc <= SOC_ALERT_MAX {
            SocLevel::Alert
        } else if soc <= SOC_WARNING_MAX {
            SocLevel::Warning
        } else {
            SocLevel::Nominal
        }
    }

    /// Bar colour as `0xRRGGBB`
    pub fn color(&self) -> u32 {
        match self {
            SocLevel::Alert => 0xef5350,
            SocLevel::Warning => 0xff9800,
            SocLevel::Nominal => 0x4caf50,
        }
    }
}

/// Battery quadrant
#[derive(Debug, Clone, PartialEq)]
pub struct SocView {
    pub percent: f64,
    pub level: SocLevel,
    /// Bar fill in `0.0..=1.0`
    pub fill: f32,
}

impl SocView {
    pub fn new(percent: f64) -> Self {
        Self {
            percent,
            level: SocLevel::from_percent(percent),
            fill: (percent.clamp(0.0, 100.0) / 100.0) as f32,
        }
    }

    pub fn text(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Grid quadrant
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub direction: GridDirection,
    /// Absolute value, formatted by the power policy
    pub magnitude: PowerText,
}

/// Page 1: the four power quadrants
#[derive(Debug, Clone, PartialEq)]
pub struct CoreView {
    pub solar: PowerText,
    pub house: PowerText,
    pub battery: PowerText,
    pub soc: SocView,
    pub grid: GridView,
}

/// Label of a metric tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileLabel {
    /// Translation key
    Key(&'static str),
    /// User or default name, shown verbatim
    Text(String),
}

/// One tile of a metric page
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub entity_key: &'static str,
    pub label: TileLabel,
    pub value: f64,
    pub unit: &'static str,
    pub accent: u32,
}

impl MetricTile {
    /// `"{value} {unit}"` with shortest float formatting
    pub fn text(&self) -> String {
        format!("{} {}", self.value, self.unit)
    }
}

/// Content of the active page
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Core(CoreView),
    Metrics(Vec<MetricTile>),
}

/// One navigation button / indicator dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub page: PageIndex,
    pub active: bool,
}

/// Everything the preview screen draws, derived per frame
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    pub active_page: PageIndex,
    pub kind: PageKind,
    pub view: PageView,
    /// Enabled pages only
    pub navigation: Vec<NavEntry>,
}

/// Active page plus derivation of the preview
#[derive(Debug, Clone, Default)]
pub struct PreviewEngine {
    active_page: PageIndex,
}

impl PreviewEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_page(&self) -> PageIndex {
        self.active_page
    }

    /// Switch to page `n`; disabled pages are allowed
    ///
    /// Out-of-range numbers are rejected and leave the active page alone.
    pub fn go_to(&mut self, n: u8) -> Result<PageIndex> {
        let page = PageIndex::new(n)?;
        self.active_page = page;
        tracing::debug!("Preview page -> {}", page);
        Ok(page)
    }

    /// Derive the preview of the active page
    pub fn render(&self, options: &ConfigOptions, snapshot: &SensorSnapshot) -> PreviewState {
        let definition = self.active_page.definition();
        let view = match definition.kind {
            PageKind::Core => PageView::Core(core_view(options, snapshot)),
            _ => PageView::Metrics(metric_tiles(definition.kind, definition.slots, options, snapshot)),
        };

        let navigation = pages::enabled_pages(options)
            .into_iter()
            .map(|page| NavEntry {
                page,
                active: page == self.active_page,
            })
            .collect();

        PreviewState {
            active_page: self.active_page,
            kind: definition.kind,
            view,
            navigation,
        }
    }
}

fn resolve_slot(slot: &SlotDefinition, options: &ConfigOptions, snapshot: &SensorSnapshot) -> f64 {
    ValueResolver::resolve(snapshot, slot.binding(options), slot.fallback)
}

fn resolve_core(key: &str, options: &ConfigOptions, snapshot: &SensorSnapshot) -> f64 {
    match pages::core_slot(key) {
        Some(slot) => resolve_slot(slot, options, snapshot),
        None => 0.0,
    }
}

fn core_view(options: &ConfigOptions, snapshot: &SensorSnapshot) -> CoreView {
    let show_kw = options.show_kw();
    let grid = resolve_core(GRID_ENTITY, options, snapshot);

    CoreView {
        solar: format_power(resolve_core(SOLAR_ENTITY, options, snapshot), show_kw),
        house: format_power(resolve_core(HOUSE_ENTITY, options, snapshot), show_kw),
        battery: format_power(resolve_core(BATTERY_ENTITY, options, snapshot), show_kw),
        soc: SocView::new(resolve_core(BATTERY_SOC_ENTITY, options, snapshot)),
        grid: GridView {
            direction: GridDirection::from_watts(grid),
            magnitude: format_power(grid.abs(), show_kw),
        },
    }
}

fn metric_tiles(
    kind: PageKind,
    slots: &'static [SlotDefinition],
    options: &ConfigOptions,
    snapshot: &SensorSnapshot,
) -> Vec<MetricTile> {
    slots
        .iter()
        .filter(|slot| !kind.omits_unbound() || slot.binding(options).is_some())
        .map(|slot| MetricTile {
            entity_key: slot.entity_key,
            label: match slot.label {
                SlotLabel::Fixed(key) => TileLabel::Key(key),
                SlotLabel::Named { .. } => {
                    TileLabel::Text(slot.custom_name(options).unwrap_or_default().to_string())
                }
            },
            value: resolve_slot(slot, options, snapshot),
            unit: slot.unit,
            accent: slot.accent,
        })
        .collect()
}
