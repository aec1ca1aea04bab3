//! Static registry of the five display pages
//!
//! Every page is enabled unless its `enable_pageN` key holds an explicit
//! `false`. Slot definitions carry the compiled-in fallback shown while a
//! slot is unbound or its sensor has no usable value.

use crate::config::{ConfigOptions, OptionsExt};
use crate::error::{PanelError, Result};

/// Number of pages the display knows
pub const PAGE_COUNT: u8 = 5;

/// 1-based page number, always within `1..=PAGE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(u8);

impl PageIndex {
    pub const FIRST: PageIndex = PageIndex(1);

    /// Validate a raw page number
    pub fn new(n: u8) -> Result<Self> {
        if (1..=PAGE_COUNT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(PanelError::InvalidPage(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All page numbers in order
    pub fn all() -> impl Iterator<Item = PageIndex> {
        (1..=PAGE_COUNT).map(PageIndex)
    }

    /// Options key that toggles this page
    pub fn enable_key(self) -> String {
        format!("enable_page{}", self.0)
    }

    /// Static definition of this page
    pub fn definition(self) -> &'static PageDefinition {
        &PAGES[usize::from(self.0 - 1)]
    }
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for PageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout family of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Solar, house, battery, SOC and grid quadrants
    Core,
    /// Four yield statistics, always shown
    Yield,
    /// Up to four user-named sensors, unbound slots omitted
    Custom,
    /// Up to four mining sensors, unbound slots omitted
    Mining,
}

impl PageKind {
    /// Whether unbound slots are left out of the page
    pub fn omits_unbound(self) -> bool {
        matches!(self, PageKind::Custom | PageKind::Mining)
    }
}

/// Label of a slot: fixed translation key or user-editable name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLabel {
    /// Translation key of a fixed label
    Fixed(&'static str),
    /// Options key holding a user name, with its default
    Named {
        name_key: &'static str,
        default_name: &'static str,
    },
}

/// One metric slot of a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotDefinition {
    /// Options key holding the bound sensor id
    pub entity_key: &'static str,
    pub label: SlotLabel,
    /// Value shown while unbound or unusable
    pub fallback: f64,
    pub unit: &'static str,
    /// Label colour as `0xRRGGBB`
    pub accent: u32,
}

impl SlotDefinition {
    /// Options key of the user name, if the slot has one
    pub fn name_key(&self) -> Option<&'static str> {
        match self.label {
            SlotLabel::Named { name_key, .. } => Some(name_key),
            SlotLabel::Fixed(_) => None,
        }
    }

    /// Name used while the user has not set one
    pub fn default_name(&self) -> Option<&'static str> {
        match self.label {
            SlotLabel::Named { default_name, .. } => Some(default_name),
            SlotLabel::Fixed(_) => None,
        }
    }

    /// Configured name, or the slot default when unset or blank
    ///
    /// `None` for slots with a fixed, translated label.
    pub fn custom_name<'a>(&self, options: &'a ConfigOptions) -> Option<&'a str> {
        match self.label {
            SlotLabel::Named {
                name_key,
                default_name,
            } => Some(options.text(name_key).unwrap_or(default_name)),
            SlotLabel::Fixed(_) => None,
        }
    }

    /// Bound sensor id, `None` when unbound
    pub fn binding<'a>(&self, options: &'a ConfigOptions) -> Option<&'a str> {
        options.binding(self.entity_key)
    }
}

/// Static description of one page
#[derive(Debug)]
pub struct PageDefinition {
    pub index: PageIndex,
    pub kind: PageKind,
    pub slots: &'static [SlotDefinition],
}

impl PageDefinition {
    pub fn is_enabled(&self, options: &ConfigOptions) -> bool {
        is_enabled(options, self.index)
    }
}

pub const ACCENT_YIELD: u32 = 0xfdd835;
pub const ACCENT_MINING: u32 = 0xff9800;
pub const CUSTOM_ACCENTS: [u32; 4] = [0x00f3ff, 0x00ff73, 0xb026ff, 0xff003c];

pub const SOLAR_ENTITY: &str = "solar_entity";
pub const HOUSE_ENTITY: &str = "house_entity";
pub const BATTERY_ENTITY: &str = "battery_entity";
pub const BATTERY_SOC_ENTITY: &str = "battery_soc_entity";
pub const GRID_ENTITY: &str = "grid_entity";

const fn fixed(
    entity_key: &'static str,
    label: &'static str,
    fallback: f64,
    unit: &'static str,
    accent: u32,
) -> SlotDefinition {
    SlotDefinition {
        entity_key,
        label: SlotLabel::Fixed(label),
        fallback,
        unit,
        accent,
    }
}

const fn named(
    entity_key: &'static str,
    name_key: &'static str,
    default_name: &'static str,
    fallback: f64,
    unit: &'static str,
    accent: u32,
) -> SlotDefinition {
    SlotDefinition {
        entity_key,
        label: SlotLabel::Named {
            name_key,
            default_name,
        },
        fallback,
        unit,
        accent,
    }
}

const CORE_SLOTS: [SlotDefinition; 5] = [
    fixed(SOLAR_ENTITY, "preview.solar", 4500.0, "W", 0xfdd835),
    fixed(HOUSE_ENTITY, "preview.house", 2800.0, "W", 0x3498db),
    fixed(BATTERY_ENTITY, "preview.battery", 500.0, "W", 0x4caf50),
    fixed(BATTERY_SOC_ENTITY, "preview.battery_soc", 85.0, "%", 0x4caf50),
    fixed(GRID_ENTITY, "preview.grid_import", -1200.0, "W", 0xe74c3c),
];

const YIELD_SLOTS: [SlotDefinition; 4] = [
    fixed("yield_today_entity", "preview.yield_today", 12.4, "kWh", ACCENT_YIELD),
    fixed("yield_month_entity", "preview.yield_month", 114.2, "kWh", ACCENT_YIELD),
    fixed("yield_year_entity", "preview.yield_year", 1054.8, "kWh", ACCENT_YIELD),
    fixed("yield_total_entity", "preview.yield_total", 3450.5, "kWh", ACCENT_YIELD),
];

const CUSTOM_A_SLOTS: [SlotDefinition; 4] = [
    named("custom1_entity", "custom1_name", "Custom 1", 21.5, "°C", CUSTOM_ACCENTS[0]),
    named("custom2_entity", "custom2_name", "Custom 2", 48.0, "%", CUSTOM_ACCENTS[1]),
    named("custom3_entity", "custom3_name", "Custom 3", 1120.0, "kWh", CUSTOM_ACCENTS[2]),
    named("custom4_entity", "custom4_name", "Custom 4", 1.0, "bar", CUSTOM_ACCENTS[3]),
];

const CUSTOM_B_SLOTS: [SlotDefinition; 4] = [
    named("custom5_entity", "custom5_name", "Custom 5", 21.5, "°C", CUSTOM_ACCENTS[0]),
    named("custom6_entity", "custom6_name", "Custom 6", 48.0, "%", CUSTOM_ACCENTS[1]),
    named("custom7_entity", "custom7_name", "Custom 7", 1120.0, "kWh", CUSTOM_ACCENTS[2]),
    named("custom8_entity", "custom8_name", "Custom 8", 1.0, "bar", CUSTOM_ACCENTS[3]),
];

const MINING_SLOTS: [SlotDefinition; 4] = [
    named("mining1_entity", "mining1_name", "Mining 1", 120.0, "TH/s", ACCENT_MINING),
    named("mining2_entity", "mining2_name", "Mining 2", 65.0, "°C", ACCENT_MINING),
    named("mining3_entity", "mining3_name", "Mining 3", 3500.0, "W", ACCENT_MINING),
    named("mining4_entity", "mining4_name", "Mining 4", 1.0, "BTC", ACCENT_MINING),
];

/// The five pages in display order
pub static PAGES: [PageDefinition; 5] = [
    PageDefinition {
        index: PageIndex(1),
        kind: PageKind::Core,
        slots: &CORE_SLOTS,
    },
    PageDefinition {
        index: PageIndex(2),
        kind: PageKind::Yield,
        slots: &YIELD_SLOTS,
    },
    PageDefinition {
        index: PageIndex(3),
        kind: PageKind::Custom,
        slots: &CUSTOM_A_SLOTS,
    },
    PageDefinition {
        index: PageIndex(4),
        kind: PageKind::Custom,
        slots: &CUSTOM_B_SLOTS,
    },
    PageDefinition {
        index: PageIndex(5),
        kind: PageKind::Mining,
        slots: &MINING_SLOTS,
    },
];

/// Slot of the core page bound to `entity_key`
pub fn core_slot(entity_key: &str) -> Option<&'static SlotDefinition> {
    PAGES[0].slots.iter().find(|s| s.entity_key == entity_key)
}

/// Named slots in device order: custom 1-8, then mining 1-4
pub fn named_slots() -> impl Iterator<Item = &'static SlotDefinition> {
    PAGES[2..].iter().flat_map(|page| page.slots.iter())
}

/// Whether page `index` is enabled; only an explicit `false` disables it
pub fn is_enabled(options: &ConfigOptions, index: PageIndex) -> bool {
    options.flag_default_on(&index.enable_key())
}

/// Enabled pages in ascending order (may be empty)
pub fn enabled_pages(options: &ConfigOptions) -> Vec<PageIndex> {
    PageIndex::all()
        .filter(|&index| is_enabled(options, index))
        .collect()
}
