//! In-memory host with synthetic sensors
//!
//! Useful for trying the panel without any data directory. Power sensors
//! follow slow sine waves so the preview visibly changes between refreshes.

use super::ConfigHost;
use crate::config::ConfigOptions;
use crate::error::Result;
use crate::types::{SensorSnapshot, SensorState};
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::time::Instant;

/// (id, friendly name, unit, base, amplitude, period in seconds)
const DEMO_SENSORS: &[(&str, &str, &str, f64, f64, f64)] = &[
    ("sensor.pv_power", "PV Power", "W", 3800.0, 1200.0, 120.0),
    ("sensor.house_load", "House Load", "W", 1900.0, 600.0, 45.0),
    ("sensor.grid_power", "Grid Power", "W", -900.0, 1400.0, 90.0),
    ("sensor.battery_power", "Battery Power", "W", 400.0, 800.0, 60.0),
    ("sensor.battery_soc", "Battery SOC", "%", 55.0, 40.0, 300.0),
    ("sensor.pv_yield_today", "Yield Today", "kWh", 14.2, 0.0, 1.0),
    ("sensor.pv_yield_month", "Yield Month", "kWh", 231.7, 0.0, 1.0),
    ("sensor.pv_yield_year", "Yield Year", "kWh", 2710.3, 0.0, 1.0),
    ("sensor.pv_yield_total", "Yield Total", "kWh", 9120.9, 0.0, 1.0),
    ("sensor.living_room_temp", "Living Room", "°C", 21.0, 1.5, 600.0),
    ("sensor.miner_hashrate", "Miner Hashrate", "TH/s", 110.0, 8.0, 30.0),
    ("input_number.export_limit", "Export Limit", "W", 6000.0, 0.0, 1.0),
];

/// [`ConfigHost`] keeping everything in memory
#[derive(Debug, Clone)]
pub struct DemoHost {
    entries: HashMap<String, ConfigOptions>,
    started: Instant,
}

impl Default for DemoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoHost {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            started: Instant::now(),
        }
    }

    /// Snapshot as it looks `elapsed_secs` after start
    pub fn snapshot_at(elapsed_secs: f64) -> SensorSnapshot {
        let mut snapshot: SensorSnapshot = DEMO_SENSORS
            .iter()
            .map(|&(id, name, unit, base, amplitude, period)| {
                let value = base + amplitude * (TAU * elapsed_secs / period).sin();
                (
                    id.to_string(),
                    SensorState::new(format!("{:.1}", value))
                        .with_friendly_name(name)
                        .with_unit(unit),
                )
            })
            .collect();
        snapshot.insert(
            "sensor.offline_meter".to_string(),
            SensorState::new("unavailable").with_friendly_name("Offline Meter"),
        );
        snapshot
    }
}

impl ConfigHost for DemoHost {
    fn load_config(&mut self, entry_id: &str) -> Result<ConfigOptions> {
        Ok(self.entries.get(entry_id).cloned().unwrap_or_default())
    }

    fn save_config(&mut self, entry_id: &str, options: &ConfigOptions) -> Result<()> {
        let stored = self.entries.entry(entry_id.to_string()).or_default();
        stored.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    fn sensor_snapshot(&mut self) -> Result<SensorSnapshot> {
        Ok(Self::snapshot_at(self.started.elapsed().as_secs_f64()))
    }

    fn describe(&self) -> String {
        "demo".to_string()
    }
}
