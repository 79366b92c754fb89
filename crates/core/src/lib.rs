// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod board;
pub mod clock;
pub mod control;
pub mod firmata;
pub mod physics;
pub mod snapshot;

pub use board::controller::VirtualController;
pub use board::{AnalogMode, DigitalMode, PinData, PinMode, PinType};
pub use clock::{Clock, ManualClock, SystemClock};
pub use control::{RelayCommand, Thermostat, ThermostatPins};
pub use firmata::{FirmataBoard, PinDefinition};
pub use physics::room::RoomModel;
pub use physics::PhysicalModel;
pub use snapshot::RoomSnapshot;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SimulationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimulationError::InvalidArgument(msg.into())
    }
}

pub type SimResult<T> = Result<T, SimulationError>;
