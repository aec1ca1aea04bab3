//! Integration tests for the preview and the display record
//!
//! These tests run the options bag and a realistic snapshot through:
//! - Preview derivation for every page kind
//! - The push record and its text slots
//! - Page rotation feeding the record

mod common;

use common::builders::{household_snapshot, OptionsBuilder};
use common::assert_float_eq;
use cyd_panel::device::{DeviceRotation, DisplayPayload};
use cyd_panel::pages::PageKind;
use cyd_panel::preview::{GridDirection, PageView, PowerUnit, SocLevel, TileLabel};
use cyd_panel::{ConfigOptions, PageIndex, PreviewEngine, SensorSnapshot};
use std::time::{Duration, Instant};

fn bound_options() -> OptionsBuilder {
    OptionsBuilder::new()
        .bind("solar_entity", "sensor.pv_power")
        .bind("house_entity", "sensor.house_load")
        .bind("battery_entity", "sensor.battery_power")
        .bind("battery_soc_entity", "sensor.battery_soc")
        .bind("grid_entity", "sensor.grid_power")
        .bind("yield_today_entity", "sensor.yield_today")
}

#[test]
fn test_core_page_with_live_values() {
    let options = bound_options().build();
    let preview = PreviewEngine::new().render(&options, &household_snapshot());

    let PageView::Core(core) = preview.view else {
        panic!("page 1 must render the core view");
    };
    assert_eq!(core.solar.to_string(), "3210 W");
    assert_eq!(core.house.to_string(), "1450 W");
    assert_eq!(core.battery.to_string(), "-250 W");
    assert_eq!(core.soc.level, SocLevel::Alert);
    assert_eq!(core.soc.text(), "18%");
    assert_eq!(core.grid.direction, GridDirection::Export);
    assert_eq!(core.grid.magnitude.to_string(), "1511 W");
}

#[test]
fn test_core_page_in_kw() {
    let options = bound_options().set("show_kw", true).build();
    let preview = PreviewEngine::new().render(&options, &household_snapshot());

    let PageView::Core(core) = preview.view else {
        panic!("page 1 must render the core view");
    };
    assert_eq!(core.solar.unit, PowerUnit::KW);
    assert_eq!(core.solar.value, "3.21");
    assert_eq!(core.grid.magnitude.value, "1.51");
}

#[test]
fn test_unbound_core_page_uses_sample_values() {
    let preview = PreviewEngine::new().render(&ConfigOptions::new(), &SensorSnapshot::new());

    let PageView::Core(core) = preview.view else {
        panic!("page 1 must render the core view");
    };
    assert_eq!(core.solar.to_string(), "4500 W");
    assert_eq!(core.soc.level, SocLevel::Nominal);
    // The grid sample is negative, so the quadrant shows an export
    assert_eq!(core.grid.direction, GridDirection::Export);
    assert_eq!(core.grid.magnitude.to_string(), "1200 W");
}

#[test]
fn test_yield_page_always_shows_four_tiles() {
    let options = bound_options().build();
    let mut engine = PreviewEngine::new();
    engine.go_to(2).unwrap();

    let preview = engine.render(&options, &household_snapshot());
    assert_eq!(preview.kind, PageKind::Yield);
    let PageView::Metrics(tiles) = preview.view else {
        panic!("page 2 must render tiles");
    };
    assert_eq!(tiles.len(), 4);
    assert_float_eq(tiles[0].value, 12.37, 1e-9);
    assert_eq!(tiles[0].label, TileLabel::Key("preview.yield_today"));
    // Unbound counters keep their samples
    assert_float_eq(tiles[3].value, 3450.5, 1e-9);
}

#[test]
fn test_custom_page_omits_unbound_slots() {
    let options = OptionsBuilder::new()
        .bind("custom1_entity", "sensor.boiler_temp")
        .set("custom1_name", "Boiler")
        .build();
    let mut engine = PreviewEngine::new();
    engine.go_to(3).unwrap();

    let PageView::Metrics(tiles) = engine.render(&options, &household_snapshot()).view else {
        panic!("page 3 must render tiles");
    };
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].label, TileLabel::Text("Boiler".into()));
    assert_eq!(tiles[0].text(), "54.5 °C");
}

#[test]
fn test_unavailable_mining_sensor_falls_back() {
    let options = OptionsBuilder::new()
        .bind("mining1_entity", "sensor.hashrate")
        .build();
    let mut engine = PreviewEngine::new();
    engine.go_to(5).unwrap();

    let PageView::Metrics(tiles) = engine.render(&options, &household_snapshot()).view else {
        panic!("page 5 must render tiles");
    };
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].label, TileLabel::Text("Mining 1".into()));
    assert_float_eq(tiles[0].value, 120.0, 1e-9);
}

#[test]
fn test_navigation_lists_enabled_pages_only() {
    let options = OptionsBuilder::new()
        .disable_page(2)
        .disable_page(4)
        .build();
    let mut engine = PreviewEngine::new();
    // A disabled page can still be previewed
    engine.go_to(4).unwrap();

    let preview = engine.render(&options, &SensorSnapshot::new());
    let pages: Vec<u8> = preview.navigation.iter().map(|n| n.page.get()).collect();
    assert_eq!(pages, vec![1, 3, 5]);
    assert!(preview.navigation.iter().all(|n| !n.active));
    assert_eq!(preview.active_page.get(), 4);

    assert!(engine.go_to(9).is_err());
    assert_eq!(engine.active_page().get(), 4);
}

#[test]
fn test_payload_from_live_values() {
    let options = bound_options()
        .bind("custom1_entity", "sensor.boiler_temp")
        .set("custom1_name", "Boiler")
        .set("custom3_name", "")
        .bind("mining1_entity", "sensor.hashrate")
        .build();
    let mut rotation = DeviceRotation::new();
    let status = rotation.tick(&options, Instant::now());

    let payload = DisplayPayload::build(&options, &household_snapshot(), status);
    assert_float_eq(payload.solar, 3210.4, 1e-9);
    assert_float_eq(payload.grid, -1510.6, 1e-9);
    assert_float_eq(payload.bat_soc, 18.0, 1e-9);
    assert_float_eq(payload.val_yield, 12.4, 1e-9);
    // Unbound numbers are sent as zero, not as samples
    assert_float_eq(payload.val_yield_total, 0.0, 1e-9);
    assert_float_eq(payload.grid_in, 0.0, 1e-9);

    assert_eq!(payload.slots["c1_n"], "Boiler");
    assert_eq!(payload.slots["c1_v"], "54.5 °C");
    assert_eq!(payload.slots["c2_n"], "Custom 2");
    assert_eq!(payload.slots["c2_v"], " ");
    // A blank stored name is kept and sent as a single space
    assert_eq!(payload.slots["c3_n"], " ");
    assert_eq!(payload.slots["c9_n"], "Mining 1");
    assert_eq!(payload.slots["c9_v"], "--");
    assert_eq!(payload.slots.len(), 24);

    assert_eq!(payload.page_num, 1);
    assert_eq!(payload.page_total, 5);
    assert!(!payload.show_kw);
}

#[test]
fn test_payload_json_is_flat() {
    let options = ConfigOptions::new();
    let status = DeviceRotation::new().tick(&options, Instant::now());
    let payload = DisplayPayload::build(&options, &SensorSnapshot::new(), status);

    let json: serde_json::Value = serde_json::from_str(&payload.to_pretty_json().unwrap()).unwrap();
    assert_eq!(json["page_num"], 1);
    assert_eq!(json["c12_n"], "Mining 4");
    assert!(json.get("slots").is_none());
}

#[test]
fn test_rotation_walks_enabled_pages() {
    let options = OptionsBuilder::new()
        .disable_page(2)
        .disable_page(3)
        .set("page_interval", 5.0)
        .build();
    let mut rotation = DeviceRotation::new();
    let t0 = Instant::now();

    let first = rotation.tick(&options, t0);
    assert_eq!(first.page_num, PageIndex::FIRST);
    assert_eq!(first.page_total, 3);

    let pages: Vec<u8> = (1..=3)
        .map(|i| rotation.tick(&options, t0 + Duration::from_secs(5 * i)).page_num.get())
        .collect();
    assert_eq!(pages, vec![4, 5, 1]);
}
