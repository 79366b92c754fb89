// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use super::ldr::LdrCircuit;
use super::pins::PinTable;
use super::{Actuator, AnalogMode, DigitalMode, DigitalRole, Dht22Site, PinData, PinType};
use crate::physics::room::RoomModel;
use crate::{SimResult, SimulationError};

/// Comm port used when the host does not pick one.
pub const DEFAULT_COMM_PORT: i32 = 3;

/// Virtual microcontroller wired to a single room.
///
/// The controller borrows the room for its whole lifetime; relay pins write
/// straight through to the room's actuators and read them back from there.
#[derive(Debug)]
pub struct VirtualController<'r> {
    comm_port: i32,
    room: &'r mut RoomModel,
    pins: PinTable,
    ldr: LdrCircuit,
}

impl<'r> VirtualController<'r> {
    pub fn new(comm_port: i32, room: &'r mut RoomModel) -> Self {
        Self {
            comm_port,
            room,
            pins: PinTable::new(),
            ldr: LdrCircuit::default(),
        }
    }

    pub fn with_default_port(room: &'r mut RoomModel) -> Self {
        Self::new(DEFAULT_COMM_PORT, room)
    }

    pub fn comm_port(&self) -> i32 {
        self.comm_port
    }

    pub fn room(&self) -> &RoomModel {
        &*self.room
    }

    pub fn room_mut(&mut self) -> &mut RoomModel {
        &mut *self.room
    }

    pub fn pins(&self) -> &PinTable {
        &self.pins
    }

    pub fn set_pin_mode(&mut self, pin_type: i32, pin_num: i32, pin_mode: i32) -> SimResult<()> {
        match PinType::try_from(pin_type)? {
            PinType::Digital => {
                PinTable::digital_index(pin_num)?;
                let mode = DigitalMode::try_from(pin_mode)?;
                self.configure_digital(pin_num, mode)
            }
            PinType::Analog => {
                PinTable::analog_index(pin_num)?;
                let mode = AnalogMode::try_from(pin_mode)?;
                self.configure_analog(pin_num, mode)
            }
        }
    }

    pub fn configure_digital(&mut self, pin_num: i32, mode: DigitalMode) -> SimResult<()> {
        self.pins.set_digital_mode(pin_num, mode)?;
        tracing::debug!(pin = pin_num, %mode, "digital pin mode set");
        Ok(())
    }

    pub fn configure_analog(&mut self, pin_num: i32, mode: AnalogMode) -> SimResult<()> {
        self.pins.set_analog_mode(pin_num, mode)?;
        tracing::debug!(pin = pin_num, %mode, "analog pin mode set");
        Ok(())
    }

    pub fn set_digital_pin(&mut self, pin_num: i32, state: bool) -> SimResult<()> {
        let mode = self.pins.digital(pin_num)?.mode;
        match mode.role() {
            DigitalRole::Io => self.pins.latch(pin_num, state),
            DigitalRole::Relay(actuator) => {
                self.write_relay(actuator, state);
                Ok(())
            }
            DigitalRole::Sensor(_) => Err(SimulationError::invalid(format!(
                "Invalid pin mode. Pin {} is {}; expected one of 0, 3, 4, 5 for a write.",
                pin_num, mode
            ))),
        }
    }

    pub fn get_pin_data(&mut self, pin_type: i32, pin_num: i32) -> SimResult<PinData> {
        match PinType::try_from(pin_type)? {
            PinType::Digital => self.read_digital(pin_num),
            PinType::Analog => self.read_analog(pin_num),
        }
    }

    /// Like [`Self::get_pin_data`], with a mode code from the caller.
    ///
    /// The code only has to be legal for the pin bank; the read itself
    /// follows the mode the pin is configured in. Analog pins still have
    /// to be configured as LDR.
    pub fn get_pin_data_as(
        &mut self,
        pin_type: i32,
        pin_num: i32,
        pin_mode: i32,
    ) -> SimResult<PinData> {
        match PinType::try_from(pin_type)? {
            PinType::Digital => {
                DigitalMode::try_from(pin_mode)?;
                self.read_digital(pin_num)
            }
            PinType::Analog => {
                AnalogMode::try_from(pin_mode)?;
                self.read_analog(pin_num)
            }
        }
    }

    fn read_digital(&mut self, pin_num: i32) -> SimResult<PinData> {
        let pin = *self.pins.digital(pin_num)?;
        let data = match pin.mode.role() {
            DigitalRole::Io => PinData::Level(pin.latched()),
            DigitalRole::Sensor(Dht22Site::Inside) => PinData::Climate(self.read_dht22_inside()),
            DigitalRole::Sensor(Dht22Site::Outside) => {
                PinData::Climate(self.read_dht22_outside())
            }
            DigitalRole::Relay(actuator) => PinData::Level(self.read_relay(actuator)),
        };
        tracing::trace!(pin = pin_num, mode = %pin.mode, ?data, "digital read");
        Ok(data)
    }

    fn read_analog(&mut self, pin_num: i32) -> SimResult<PinData> {
        match self.pins.analog(pin_num)? {
            AnalogMode::Ldr => Ok(PinData::Analog(self.read_ldr())),
            AnalogMode::Empty => Err(SimulationError::invalid(format!(
                "Invalid pin mode. Analog pin {} is not configured as LDR (6).",
                pin_num
            ))),
        }
    }

    /// `[inside temperature, humidity]`. The temperature read is rate-limited
    /// by the room.
    pub fn read_dht22_inside(&mut self) -> [f64; 2] {
        [self.room.temperature(), self.room.humidity()]
    }

    /// `[outside temperature, humidity]`.
    pub fn read_dht22_outside(&self) -> [f64; 2] {
        [self.room.outside_temperature(), self.room.humidity()]
    }

    pub fn read_ldr(&self) -> u16 {
        self.ldr.adc_reading(self.room.light_level_lux())
    }

    pub fn write_relay_heater(&mut self, state: bool) {
        self.write_relay(Actuator::Heater, state);
    }

    pub fn read_relay_heater(&self) -> bool {
        self.read_relay(Actuator::Heater)
    }

    pub fn write_relay_cooler(&mut self, state: bool) {
        self.write_relay(Actuator::Cooler, state);
    }

    pub fn read_relay_cooler(&self) -> bool {
        self.read_relay(Actuator::Cooler)
    }

    pub fn write_relay_sunscreen(&mut self, state: bool) {
        self.write_relay(Actuator::Sunscreen, state);
    }

    pub fn read_relay_sunscreen(&self) -> bool {
        self.read_relay(Actuator::Sunscreen)
    }

    fn write_relay(&mut self, actuator: Actuator, state: bool) {
        match actuator {
            Actuator::Heater => self.room.activate_heater(state),
            Actuator::Cooler => self.room.activate_cooler(state),
            Actuator::Sunscreen => self.room.activate_sunscreen(state),
        }
        tracing::debug!(?actuator, state, "relay write");
    }

    fn read_relay(&self, actuator: Actuator) -> bool {
        match actuator {
            Actuator::Heater => self.room.is_heater_active(),
            Actuator::Cooler => self.room.is_cooler_active(),
            Actuator::Sunscreen => self.room.is_sunscreen_active(),
        }
    }
}
