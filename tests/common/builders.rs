//! Test data builders for snapshots and options

use cyd_panel::{ConfigOptions, ConfigValue, SensorSnapshot, SensorState};

/// Builder for sensor snapshots
#[derive(Default)]
pub struct SnapshotBuilder {
    snapshot: SensorSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensor with a state and no attributes
    pub fn sensor(mut self, id: &str, state: &str) -> Self {
        self.snapshot.insert(id.to_string(), SensorState::new(state));
        self
    }

    /// Sensor with friendly name and unit
    pub fn named(mut self, id: &str, name: &str, state: &str, unit: &str) -> Self {
        self.snapshot.insert(
            id.to_string(),
            SensorState::new(state)
                .with_friendly_name(name)
                .with_unit(unit),
        );
        self
    }

    pub fn build(self) -> SensorSnapshot {
        self.snapshot
    }
}

/// A small household: PV, house, battery, grid and two yield counters
pub fn household_snapshot() -> SensorSnapshot {
    SnapshotBuilder::new()
        .named("sensor.pv_power", "PV Power", "3210.4", "W")
        .named("sensor.house_load", "House Load", "1450", "W")
        .named("sensor.battery_power", "Battery Power", "-250", "W")
        .named("sensor.battery_soc", "Battery SOC", "18", "%")
        .named("sensor.grid_power", "Grid Power", "-1510.6", "W")
        .named("sensor.yield_today", "Yield Today", "12.37", "kWh")
        .named("sensor.boiler_temp", "Boiler", "54.5", "°C")
        .named("sensor.hashrate", "Hashrate", "unavailable", "TH/s")
        .named("input_number.target", "Target", "21", "°C")
        .named("switch.pump", "Pump", "on", "")
        .build()
}

/// Builder for options bags
#[derive(Default)]
pub struct OptionsBuilder {
    options: ConfigOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn bind(self, key: &str, entity_id: &str) -> Self {
        self.set(key, entity_id)
    }

    pub fn disable_page(self, n: u8) -> Self {
        self.set(&format!("enable_page{}", n), false)
    }

    pub fn build(self) -> ConfigOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let options = OptionsBuilder::new()
            .bind("solar_entity", "sensor.pv_power")
            .disable_page(2)
            .build();
        assert_eq!(options.len(), 2);
        assert_eq!(household_snapshot().len(), 10);
    }
}
