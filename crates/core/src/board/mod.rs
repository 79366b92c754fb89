// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Virtual climate-control board: pin modes, the pin table and the
//! controller that routes pin traffic to a [`crate::RoomModel`].

pub mod controller;
pub mod ldr;
pub mod pins;

use crate::{SimResult, SimulationError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Digital pins 0..=53.
pub const DIGITAL_PIN_COUNT: usize = 54;
/// Analog pins 0..=16.
pub const ANALOG_PIN_COUNT: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinType {
    Digital,
    Analog,
}

impl TryFrom<i32> for PinType {
    type Error = SimulationError;

    fn try_from(code: i32) -> SimResult<Self> {
        match code {
            0 => Ok(Self::Digital),
            1 => Ok(Self::Analog),
            _ => Err(SimulationError::invalid(
                "Invalid pin type. Expected 0 (digital) or 1 (analog).",
            )),
        }
    }
}

/// Mode of a digital pin. Discriminants are the wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DigitalMode {
    #[default]
    Empty = 0,
    /// DHT22 inside the room.
    #[serde(rename = "DHT22_1")]
    Dht22Inside = 1,
    /// DHT22 outside the room.
    #[serde(rename = "DHT22_2")]
    Dht22Outside = 2,
    RelayHeater = 3,
    RelayCooler = 4,
    RelaySunscreen = 5,
}

impl DigitalMode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// What the pin is wired to, which decides the legal operations.
    pub fn role(self) -> DigitalRole {
        match self {
            Self::Empty => DigitalRole::Io,
            Self::Dht22Inside => DigitalRole::Sensor(Dht22Site::Inside),
            Self::Dht22Outside => DigitalRole::Sensor(Dht22Site::Outside),
            Self::RelayHeater => DigitalRole::Relay(Actuator::Heater),
            Self::RelayCooler => DigitalRole::Relay(Actuator::Cooler),
            Self::RelaySunscreen => DigitalRole::Relay(Actuator::Sunscreen),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::Dht22Inside => "DHT22_1",
            Self::Dht22Outside => "DHT22_2",
            Self::RelayHeater => "RELAY_HEATER",
            Self::RelayCooler => "RELAY_COOLER",
            Self::RelaySunscreen => "RELAY_SUNSCREEN",
        }
    }
}

impl TryFrom<i32> for DigitalMode {
    type Error = SimulationError;

    fn try_from(code: i32) -> SimResult<Self> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Dht22Inside),
            2 => Ok(Self::Dht22Outside),
            3 => Ok(Self::RelayHeater),
            4 => Ok(Self::RelayCooler),
            5 => Ok(Self::RelaySunscreen),
            _ => Err(SimulationError::invalid(
                "Invalid pin mode. Expected a value between 0 and 5.",
            )),
        }
    }
}

impl fmt::Display for DigitalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode of an analog pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalogMode {
    /// Generic input, nothing wired.
    #[default]
    Empty = 0,
    Ldr = 6,
}

impl AnalogMode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::Ldr => "LDR",
        }
    }
}

impl TryFrom<i32> for AnalogMode {
    type Error = SimulationError;

    fn try_from(code: i32) -> SimResult<Self> {
        match code {
            0 => Ok(Self::Empty),
            6 => Ok(Self::Ldr),
            _ => Err(SimulationError::invalid(
                "Invalid pin mode. Expected one of the following 0 or 6.",
            )),
        }
    }
}

impl fmt::Display for AnalogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mode for either pin bank, as named in pin definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Digital(DigitalMode),
    Analog(AnalogMode),
}

impl PinMode {
    pub fn code(self) -> i32 {
        match self {
            Self::Digital(mode) => mode.code(),
            Self::Analog(mode) => mode.code(),
        }
    }
}

impl FromStr for PinMode {
    type Err = SimulationError;

    fn from_str(value: &str) -> SimResult<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            // EMPTY is shared by both banks; the code is 0 either way.
            "EMPTY" => Ok(Self::Digital(DigitalMode::Empty)),
            "DHT22_1" | "DHT22_TEMP_IN" => Ok(Self::Digital(DigitalMode::Dht22Inside)),
            "DHT22_2" | "DHT22_TEMP_OUT" => Ok(Self::Digital(DigitalMode::Dht22Outside)),
            "RELAY_HEATER" => Ok(Self::Digital(DigitalMode::RelayHeater)),
            "RELAY_COOLER" => Ok(Self::Digital(DigitalMode::RelayCooler)),
            "RELAY_SUNSCREEN" => Ok(Self::Digital(DigitalMode::RelaySunscreen)),
            "LDR" => Ok(Self::Analog(AnalogMode::Ldr)),
            _ => Err(SimulationError::invalid("pinMode not in correct format")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dht22Site {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actuator {
    Heater,
    Cooler,
    Sunscreen,
}

/// Capability a digital pin has in its current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitalRole {
    /// Plain latched I/O; readable and writable.
    Io,
    /// Read-only sensor input.
    Sensor(Dht22Site),
    /// Actuator output mirrored through the room.
    Relay(Actuator),
}

/// Value returned by a pin read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PinData {
    Level(bool),
    /// `[temperature, humidity]` from a DHT22.
    Climate([f64; 2]),
    /// 10-bit ADC count.
    Analog(u16),
}

impl PinData {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Level(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_climate(&self) -> Option<[f64; 2]> {
        match self {
            Self::Climate(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_analog(&self) -> Option<u16> {
        match self {
            Self::Analog(v) => Some(*v),
            _ => None,
        }
    }
}
