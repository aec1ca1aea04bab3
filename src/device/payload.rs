//! Push record sent to the display

use super::rotation::RotationStatus;
use crate::config::options::{GRID_EXPORT_ENTITY, GRID_IMPORT_ENTITY};
use crate::config::{ConfigOptions, OptionsExt};
use crate::pages::{self, SlotLabel};
use crate::types::{ConfigValue, SensorSnapshot};
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat record the display firmware consumes
///
/// Numbers are rounded to one decimal and sent as `0.0` when the sensor is
/// unbound or has no usable value. The twelve `cN_n`/`cN_v` pairs carry the
/// custom (1-8) and mining (9-12) labels and values as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPayload {
    pub solar: f64,
    pub grid: f64,
    pub house: f64,
    pub bat_w: f64,
    pub bat_soc: f64,
    pub val_yield: f64,
    pub val_yield_month: f64,
    pub val_yield_year: f64,
    pub val_yield_total: f64,
    pub grid_in: f64,
    pub grid_out: f64,
    pub page_num: u8,
    pub page_idx: usize,
    pub page_total: usize,
    pub show_kw: bool,
    #[serde(flatten)]
    pub slots: BTreeMap<String, String>,
}

impl DisplayPayload {
    /// Build the record from the current options, snapshot and rotation
    pub fn build(
        options: &ConfigOptions,
        snapshot: &SensorSnapshot,
        rotation: RotationStatus,
    ) -> Self {
        let number = |key: &str| numeric_value(snapshot, options.binding(key)).unwrap_or(0.0);

        let mut slots = BTreeMap::new();
        for (i, slot) in pages::named_slots().enumerate() {
            let n = i + 1;
            let name = match slot.label {
                SlotLabel::Named {
                    name_key,
                    default_name,
                } => stored_name(options, name_key).unwrap_or(default_name).to_string(),
                SlotLabel::Fixed(key) => key.to_string(),
            };
            let value = slot_text(snapshot, options.binding(slot.entity_key));
            slots.insert(format!("c{}_n", n), non_empty(name));
            slots.insert(format!("c{}_v", n), non_empty(value));
        }

        Self {
            solar: number(pages::SOLAR_ENTITY),
            grid: number(pages::GRID_ENTITY),
            house: number(pages::HOUSE_ENTITY),
            bat_w: number(pages::BATTERY_ENTITY),
            bat_soc: number(pages::BATTERY_SOC_ENTITY),
            val_yield: number("yield_today_entity"),
            val_yield_month: number("yield_month_entity"),
            val_yield_year: number("yield_year_entity"),
            val_yield_total: number("yield_total_entity"),
            grid_in: number(GRID_IMPORT_ENTITY),
            grid_out: number(GRID_EXPORT_ENTITY),
            page_num: rotation.page_num.get(),
            page_idx: rotation.page_idx,
            page_total: rotation.page_total,
            show_kw: options.show_kw(),
            slots,
        }
    }

    /// Pretty JSON for the dashboard
    pub fn to_pretty_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Stored name, even when blank; `None` only if the key is absent
fn stored_name<'a>(options: &'a ConfigOptions, key: &str) -> Option<&'a str> {
    options.get(key).and_then(ConfigValue::as_str)
}

/// Strictly parsed state rounded to one decimal
fn numeric_value(snapshot: &SensorSnapshot, entity_id: Option<&str>) -> Option<f64> {
    let state = snapshot.get(entity_id?)?;
    if state.is_unusable() {
        return None;
    }
    let value = state.state.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(round_one_decimal(value))
}

/// Round the exact binary value to one decimal, ties to even
///
/// Matches the host coordinator, so 0.25 goes to 0.2 and 0.75 to 0.8.
fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// `"{state} {unit}"`, `"--"` when unusable, blank when unbound
fn slot_text(snapshot: &SensorSnapshot, entity_id: Option<&str>) -> String {
    let Some(id) = entity_id else {
        return String::new();
    };
    match snapshot.get(id) {
        Some(state) if !state.is_unusable() => {
            format!("{} {}", state.state, state.unit.as_deref().unwrap_or(""))
                .trim()
                .to_string()
        }
        _ => "--".to_string(),
    }
}

/// The firmware cannot take empty strings
fn non_empty(text: String) -> String {
    if text.is_empty() {
        " ".to_string()
    } else {
        text
    }
}
