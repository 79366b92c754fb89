// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// Raw internal state of a room, without sensor clamping or bias.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub temperature: f64,
    pub outside_temperature: f64,
    pub humidity: f64,
    pub light_level_lux: f64,
    pub sensor_offset: f64,
    pub heater_active: bool,
    pub cooler_active: bool,
    pub sunscreen_active: bool,
    pub heater_power: f64,
    pub cooler_power: f64,
    pub room_volume: f64,
    pub surface_area: f64,
    pub air_density: f64,
    pub specific_heat: f64,
}

impl RoomSnapshot {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
