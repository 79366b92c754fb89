// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Firmata-style host facade over [`VirtualController`].
//!
//! Pins are declared with the `type:number:MODE` strings a Firmata host
//! passes to `get_pin`, e.g. `d:7:DHT22_1` or `a:0:LDR`.

use crate::board::controller::VirtualController;
use crate::board::pins::PinTable;
use crate::board::{AnalogMode, DigitalMode, PinData, PinMode, PinType};
use crate::physics::room::RoomModel;
use crate::{SimResult, SimulationError};
use std::fmt;
use std::str::FromStr;

/// One parsed `type:number:MODE` pin declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDefinition {
    pub pin_type: PinType,
    pub pin: i32,
    pub mode: PinMode,
}

impl PinDefinition {
    pub fn digital(pin: i32, mode: DigitalMode) -> Self {
        Self {
            pin_type: PinType::Digital,
            pin,
            mode: PinMode::Digital(mode),
        }
    }

    pub fn analog(pin: i32, mode: AnalogMode) -> Self {
        Self {
            pin_type: PinType::Analog,
            pin,
            mode: PinMode::Analog(mode),
        }
    }

    pub fn type_code(&self) -> i32 {
        match self.pin_type {
            PinType::Digital => 0,
            PinType::Analog => 1,
        }
    }
}

impl FromStr for PinDefinition {
    type Err = SimulationError;

    fn from_str(value: &str) -> SimResult<Self> {
        let parts: Vec<&str> = value.trim().split(':').collect();
        let [kind, number, mode] = parts.as_slice() else {
            return Err(SimulationError::invalid("pinDef not in correct format"));
        };

        let pin_type = match kind.trim() {
            "d" | "D" => PinType::Digital,
            "a" | "A" => PinType::Analog,
            _ => return Err(SimulationError::invalid("pinType not in correct format")),
        };

        let pin: i32 = number
            .trim()
            .parse()
            .map_err(|_| SimulationError::invalid("Invalid pin number"))?;
        match pin_type {
            PinType::Digital => PinTable::digital_index(pin)?,
            PinType::Analog => PinTable::analog_index(pin)?,
        };

        // EMPTY parses as digital; it is valid on either bank.
        let mode = match (pin_type, mode.parse::<PinMode>()?) {
            (PinType::Digital, m @ PinMode::Digital(_)) => m,
            (PinType::Analog, PinMode::Digital(DigitalMode::Empty)) => {
                PinMode::Analog(AnalogMode::Empty)
            }
            (PinType::Analog, m @ PinMode::Analog(_)) => m,
            _ => return Err(SimulationError::invalid("pinMode not in correct format")),
        };

        Ok(Self {
            pin_type,
            pin,
            mode,
        })
    }
}

impl fmt::Display for PinDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.pin_type {
            PinType::Digital => 'd',
            PinType::Analog => 'a',
        };
        let mode = match self.mode {
            PinMode::Digital(m) => m.name(),
            PinMode::Analog(m) => m.name(),
        };
        write!(f, "{}:{}:{}", kind, self.pin, mode)
    }
}

/// Board as a Firmata host sees it: opened on a port, pins declared by
/// string, then plain digital and analog reads and writes.
#[derive(Debug)]
pub struct FirmataBoard<'r> {
    port: i32,
    controller: VirtualController<'r>,
}

impl<'r> FirmataBoard<'r> {
    /// `port` is the port the host expects; the board itself always sits on
    /// the default comm port.
    pub fn new(port: i32, room: &'r mut RoomModel) -> Self {
        Self {
            port,
            controller: VirtualController::with_default_port(room),
        }
    }

    /// True when the board answers on the port the host asked for.
    pub fn begin(&self) -> bool {
        let connected = self.controller.comm_port() == self.port;
        if connected {
            tracing::info!(port = self.port, "board connected");
        } else {
            tracing::warn!(
                expected = self.port,
                actual = self.controller.comm_port(),
                "board not connected to port"
            );
        }
        connected
    }

    pub fn set_pin_mode(&mut self, definition: &str) -> SimResult<PinDefinition> {
        let def: PinDefinition = definition.parse()?;
        self.apply(&def)?;
        Ok(def)
    }

    pub fn apply(&mut self, def: &PinDefinition) -> SimResult<()> {
        self.controller
            .set_pin_mode(def.type_code(), def.pin, def.mode.code())
    }

    pub fn digital_read(&mut self, pin: i32) -> SimResult<PinData> {
        self.controller.get_pin_data(0, pin)
    }

    pub fn digital_write(&mut self, pin: i32, value: bool) -> SimResult<()> {
        self.controller.set_digital_pin(pin, value)
    }

    pub fn analog_read(&mut self, pin: i32) -> SimResult<u16> {
        match self.controller.get_pin_data(1, pin)? {
            PinData::Analog(count) => Ok(count),
            other => Err(SimulationError::invalid(format!(
                "Analog pin {} returned non-analog data {:?}.",
                pin, other
            ))),
        }
    }

    pub fn controller(&self) -> &VirtualController<'r> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut VirtualController<'r> {
        &mut self.controller
    }

    pub fn room(&self) -> &RoomModel {
        self.controller.room()
    }

    pub fn room_mut(&mut self) -> &mut RoomModel {
        self.controller.room_mut()
    }
}
