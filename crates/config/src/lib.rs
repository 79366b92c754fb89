// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default schema version for YAML configs
fn default_schema_version() -> String {
    "1.0".to_string()
}

/// Minimum interval between two simulated DHT22 inside readings.
pub const DHT22_MIN_INTERVAL_MS: u64 = 2000;

fn default_temperature() -> f64 {
    25.0
}

fn default_outside_temperature() -> f64 {
    30.0
}

fn default_humidity() -> f64 {
    50.0
}

fn default_dimensions() -> Vec<f64> {
    vec![10.0, 10.0, 2.0]
}

fn default_heater_power() -> f64 {
    1000.0
}

fn default_cooler_power() -> f64 {
    2000.0
}

fn default_light_level_lux() -> f64 {
    10_000.0
}

fn default_comm_port() -> i32 {
    3
}

fn default_poll_interval_ms() -> u64 {
    DHT22_MIN_INTERVAL_MS
}

/// Physical description of the simulated room.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoomConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_outside_temperature")]
    pub outside_temperature: f64,
    #[serde(default = "default_humidity")]
    pub humidity: f64,
    /// `[width, length, height]` in meters.
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<f64>,
    #[serde(default = "default_heater_power")]
    pub heater_power: f64,
    #[serde(default = "default_cooler_power")]
    pub cooler_power: f64,
    #[serde(default = "default_light_level_lux")]
    pub light_level_lux: f64,
    /// Seed for the per-instance sensor bias. Unset means OS entropy.
    #[serde(default)]
    pub sensor_seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            outside_temperature: default_outside_temperature(),
            humidity: default_humidity(),
            dimensions: default_dimensions(),
            heater_power: default_heater_power(),
            cooler_power: default_cooler_power(),
            light_level_lux: default_light_level_lux(),
            sensor_seed: None,
        }
    }
}

impl RoomConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.len() != 3 {
            anyhow::bail!(
                "Room 'dimensions' must have exactly 3 entries (width, length, height), got {}",
                self.dimensions.len()
            );
        }
        if self.dimensions.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            anyhow::bail!("Room 'dimensions' must all be positive");
        }
        // Written so that NaN fails every range check.
        if !(0.0..=100.0).contains(&self.humidity) {
            anyhow::bail!("Room 'humidity' must be between 0 and 100");
        }
        if !(self.light_level_lux > 0.0 && self.light_level_lux <= 100_000.0) {
            anyhow::bail!("Room 'light_level_lux' must be in (0, 100000]");
        }
        if !(self.heater_power >= 0.0 && self.cooler_power >= 0.0) {
            anyhow::bail!("Room 'heater_power' and 'cooler_power' must be non-negative");
        }
        Ok(())
    }
}

/// Virtual board wiring. Pins use the Firmata-style `type:number:MODE` form,
/// e.g. `d:7:DHT22_1` or `a:0:LDR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    #[serde(default = "default_comm_port")]
    pub comm_port: i32,
    #[serde(default)]
    pub pins: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            comm_port: default_comm_port(),
            pins: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThermostatConfig {
    pub target: f64,
    pub threshold: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunLimits {
    pub steps: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Band the final inside reading has to land in for the run to pass.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExpectConfig {
    pub min_temperature: f64,
    pub max_temperature: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioManifest {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub name: String,
    #[serde(default)]
    pub room: RoomConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub thermostat: Option<ThermostatConfig>,
    pub run: RunLimits,
    #[serde(default)]
    pub expect: Option<ExpectConfig>,
}

impl ScenarioManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario at {:?}", path.as_ref()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Scenario Manifest YAML")?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != "1.0" {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '1.0'",
                self.schema_version
            );
        }

        if self.name.trim().is_empty() {
            anyhow::bail!("Scenario 'name' cannot be empty");
        }

        self.room.validate().context("Invalid 'room' section")?;

        if let Some(thermostat) = &self.thermostat {
            if !(thermostat.threshold > 0.0) {
                anyhow::bail!("Thermostat 'threshold' must be greater than zero");
            }
        }

        if self.run.steps == 0 {
            anyhow::bail!("Limit 'steps' must be greater than zero");
        }
        if self.run.poll_interval_ms == 0 {
            anyhow::bail!("Limit 'poll_interval_ms' must be greater than zero");
        }
        if self.run.poll_interval_ms < DHT22_MIN_INTERVAL_MS {
            tracing::warn!(
                "poll_interval_ms {} is below the DHT22 minimum of {} ms; inside readings will repeat",
                self.run.poll_interval_ms,
                DHT22_MIN_INTERVAL_MS
            );
        }

        if let Some(expect) = &self.expect {
            if expect.min_temperature > expect.max_temperature {
                anyhow::bail!("Expectation 'min_temperature' exceeds 'max_temperature'");
            }
        }

        Ok(())
    }
}
