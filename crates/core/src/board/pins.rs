// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use super::{AnalogMode, DigitalMode, ANALOG_PIN_COUNT, DIGITAL_PIN_COUNT};
use crate::{SimResult, SimulationError};

/// One digital pin: its mode tag plus the level latched while in `EMPTY`.
///
/// The latch survives mode changes. Relay levels are never stored here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitalPin {
    pub mode: DigitalMode,
    latch: bool,
}

impl DigitalPin {
    pub fn latched(&self) -> bool {
        self.latch
    }
}

/// Fixed-size pin table. Never resized after construction.
#[derive(Debug, Clone)]
pub struct PinTable {
    digital: [DigitalPin; DIGITAL_PIN_COUNT],
    analog: [AnalogMode; ANALOG_PIN_COUNT],
}

impl Default for PinTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PinTable {
    pub fn new() -> Self {
        Self {
            digital: [DigitalPin::default(); DIGITAL_PIN_COUNT],
            analog: [AnalogMode::Empty; ANALOG_PIN_COUNT],
        }
    }

    pub fn digital_index(pin: i32) -> SimResult<usize> {
        usize::try_from(pin)
            .ok()
            .filter(|idx| *idx < DIGITAL_PIN_COUNT)
            .ok_or_else(|| {
                SimulationError::invalid("Invalid pin number. Expected a value between 0 and 53.")
            })
    }

    pub fn analog_index(pin: i32) -> SimResult<usize> {
        usize::try_from(pin)
            .ok()
            .filter(|idx| *idx < ANALOG_PIN_COUNT)
            .ok_or_else(|| {
                SimulationError::invalid("Invalid pin number. Expected a value between 0 and 16.")
            })
    }

    pub fn digital(&self, pin: i32) -> SimResult<&DigitalPin> {
        Ok(&self.digital[Self::digital_index(pin)?])
    }

    pub fn analog(&self, pin: i32) -> SimResult<AnalogMode> {
        Ok(self.analog[Self::analog_index(pin)?])
    }

    pub fn set_digital_mode(&mut self, pin: i32, mode: DigitalMode) -> SimResult<()> {
        let idx = Self::digital_index(pin)?;
        self.digital[idx].mode = mode;
        Ok(())
    }

    pub fn set_analog_mode(&mut self, pin: i32, mode: AnalogMode) -> SimResult<()> {
        let idx = Self::analog_index(pin)?;
        self.analog[idx] = mode;
        Ok(())
    }

    /// Latch a level on an `EMPTY` digital pin.
    pub fn latch(&mut self, pin: i32, level: bool) -> SimResult<()> {
        let idx = Self::digital_index(pin)?;
        let entry = &mut self.digital[idx];
        if entry.mode != DigitalMode::Empty {
            return Err(SimulationError::invalid(format!(
                "Pin {} is {}; only EMPTY pins latch a level.",
                pin, entry.mode
            )));
        }
        entry.latch = level;
        Ok(())
    }

    /// Digital pins whose mode is not `EMPTY`, in pin order.
    pub fn configured_digital(&self) -> impl Iterator<Item = (usize, DigitalMode)> + '_ {
        self.digital
            .iter()
            .enumerate()
            .filter(|(_, p)| p.mode != DigitalMode::Empty)
            .map(|(idx, p)| (idx, p.mode))
    }

    /// Analog pins configured as `LDR`, in pin order.
    pub fn configured_analog(&self) -> impl Iterator<Item = (usize, AnalogMode)> + '_ {
        self.analog
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, mode)| *mode != AnalogMode::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = PinTable::new();
        for pin in 0..54 {
            let entry = table.digital(pin).unwrap();
            assert_eq!(entry.mode, DigitalMode::Empty);
            assert!(!entry.latched());
        }
        for pin in 0..17 {
            assert_eq!(table.analog(pin).unwrap(), AnalogMode::Empty);
        }
    }

    #[test]
    fn test_index_bounds() {
        assert!(PinTable::digital_index(-1).is_err());
        assert!(PinTable::digital_index(54).is_err());
        assert_eq!(PinTable::digital_index(53).unwrap(), 53);
        assert!(PinTable::analog_index(17).is_err());
        assert_eq!(PinTable::analog_index(16).unwrap(), 16);
    }

    #[test]
    fn test_latch_survives_mode_change() {
        let mut table = PinTable::new();
        table.latch(12, true).unwrap();
        table.set_digital_mode(12, DigitalMode::RelayHeater).unwrap();
        assert!(table.latch(12, false).is_err());
        table.set_digital_mode(12, DigitalMode::Empty).unwrap();
        assert!(table.digital(12).unwrap().latched());
    }

    #[test]
    fn test_configured_iterators() {
        let mut table = PinTable::new();
        table.set_digital_mode(8, DigitalMode::Dht22Outside).unwrap();
        table.set_digital_mode(7, DigitalMode::Dht22Inside).unwrap();
        table.set_analog_mode(0, AnalogMode::Ldr).unwrap();

        let digital: Vec<_> = table.configured_digital().collect();
        assert_eq!(
            digital,
            vec![(7, DigitalMode::Dht22Inside), (8, DigitalMode::Dht22Outside)]
        );
        let analog: Vec<_> = table.configured_analog().collect();
        assert_eq!(analog, vec![(0, AnalogMode::Ldr)]);
    }
}
