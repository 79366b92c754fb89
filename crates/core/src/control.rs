// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Two-relay hysteresis thermostat driving a [`VirtualController`].

use crate::board::controller::VirtualController;
use crate::board::{DigitalMode, PinData};
use crate::{SimResult, SimulationError};
use roomsim_config::ThermostatConfig;
use serde::Serialize;

/// Relay levels the thermostat wants after one control cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelayCommand {
    pub heater: bool,
    pub cooler: bool,
}

impl RelayCommand {
    pub const OFF: Self = Self {
        heater: false,
        cooler: false,
    };
}

/// Digital pins a thermostat cycle reads from and writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermostatPins {
    pub inside: i32,
    pub outside: i32,
    pub heater: i32,
    pub cooler: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermostat {
    target: f64,
    threshold: f64,
}

impl Thermostat {
    pub fn new(target: f64, threshold: f64) -> SimResult<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(SimulationError::invalid(
                "Invalid thermostat threshold. Expected a positive value.",
            ));
        }
        if !target.is_finite() {
            return Err(SimulationError::invalid(
                "Invalid thermostat target. Expected a finite value.",
            ));
        }
        Ok(Self { target, threshold })
    }

    pub fn from_config(config: &ThermostatConfig) -> SimResult<Self> {
        Self::new(config.target, config.threshold)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Next relay levels for the given readings and current relay states.
    ///
    /// Heating only starts when the outside is colder than the room and
    /// cooling only when it is warmer. A running actuator is switched off
    /// once the room is back within half a threshold of the target.
    pub fn decide(
        &self,
        inside: f64,
        outside: f64,
        heater_on: bool,
        cooler_on: bool,
    ) -> RelayCommand {
        let low = self.target - self.threshold;
        let high = self.target + self.threshold;
        let half = self.threshold / 2.0;

        if inside < low && outside < inside {
            RelayCommand {
                heater: true,
                cooler: false,
            }
        } else if inside > high && outside > inside {
            RelayCommand {
                heater: false,
                cooler: true,
            }
        } else if heater_on && inside >= self.target - half {
            RelayCommand::OFF
        } else if cooler_on && inside <= self.target + half {
            RelayCommand::OFF
        } else {
            RelayCommand {
                heater: heater_on,
                cooler: cooler_on,
            }
        }
    }

    /// One control cycle through the board's pins.
    ///
    /// Every pin must already be configured in the matching mode; the
    /// relays are only written when the decision changes their level.
    pub fn poll(
        &self,
        board: &mut VirtualController<'_>,
        pins: ThermostatPins,
    ) -> SimResult<RelayCommand> {
        let inside = climate(board, pins.inside, DigitalMode::Dht22Inside)?[0];
        let outside = climate(board, pins.outside, DigitalMode::Dht22Outside)?[0];
        let heater_on = level(board, pins.heater, DigitalMode::RelayHeater)?;
        let cooler_on = level(board, pins.cooler, DigitalMode::RelayCooler)?;

        let command = self.decide(inside, outside, heater_on, cooler_on);
        if command.heater != heater_on {
            board.set_digital_pin(pins.heater, command.heater)?;
        }
        if command.cooler != cooler_on {
            board.set_digital_pin(pins.cooler, command.cooler)?;
        }

        tracing::debug!(
            inside,
            outside,
            heater = command.heater,
            cooler = command.cooler,
            "thermostat cycle"
        );
        Ok(command)
    }
}

fn expect_mode(board: &VirtualController<'_>, pin: i32, mode: DigitalMode) -> SimResult<()> {
    let actual = board.pins().digital(pin)?.mode;
    if actual != mode {
        return Err(SimulationError::invalid(format!(
            "Invalid pin mode. Pin {} is {}, thermostat needs {}.",
            pin, actual, mode
        )));
    }
    Ok(())
}

fn climate(
    board: &mut VirtualController<'_>,
    pin: i32,
    mode: DigitalMode,
) -> SimResult<[f64; 2]> {
    expect_mode(board, pin, mode)?;
    match board.get_pin_data(0, pin)? {
        PinData::Climate(pair) => Ok(pair),
        other => Err(unexpected(pin, other)),
    }
}

fn level(board: &mut VirtualController<'_>, pin: i32, mode: DigitalMode) -> SimResult<bool> {
    expect_mode(board, pin, mode)?;
    match board.get_pin_data(0, pin)? {
        PinData::Level(v) => Ok(v),
        other => Err(unexpected(pin, other)),
    }
}

fn unexpected(pin: i32, data: PinData) -> SimulationError {
    SimulationError::invalid(format!("Pin {} returned unexpected data {:?}.", pin, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::physics::room::RoomModel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use roomsim_config::RoomConfig;
    use std::time::Duration;

    const PINS: ThermostatPins = ThermostatPins {
        inside: 7,
        outside: 8,
        heater: 30,
        cooler: 32,
    };

    fn wire(board: &mut VirtualController<'_>) {
        board.set_pin_mode(0, PINS.inside, 1).unwrap();
        board.set_pin_mode(0, PINS.outside, 2).unwrap();
        board.set_pin_mode(0, PINS.heater, 3).unwrap();
        board.set_pin_mode(0, PINS.cooler, 4).unwrap();
    }

    #[test]
    fn test_threshold_must_be_positive() {
        assert!(Thermostat::new(22.0, 0.0).is_err());
        assert!(Thermostat::new(22.0, -1.0).is_err());
        assert!(Thermostat::new(f64::NAN, 1.0).is_err());
        assert!(Thermostat::new(22.0, 0.5).is_ok());
    }

    #[test]
    fn test_heats_only_when_outside_is_colder() {
        let t = Thermostat::new(22.0, 1.0).unwrap();
        assert_eq!(
            t.decide(18.0, 10.0, false, false),
            RelayCommand {
                heater: true,
                cooler: false
            }
        );
        assert_eq!(t.decide(18.0, 25.0, false, false), RelayCommand::OFF);
    }

    #[test]
    fn test_cools_only_when_outside_is_warmer() {
        let t = Thermostat::new(22.0, 1.0).unwrap();
        assert_eq!(
            t.decide(26.0, 30.0, false, false),
            RelayCommand {
                heater: false,
                cooler: true
            }
        );
        assert_eq!(t.decide(26.0, 20.0, false, false), RelayCommand::OFF);
    }

    #[test]
    fn test_heater_switches_off_inside_half_band() {
        let t = Thermostat::new(22.0, 1.0).unwrap();
        let on = RelayCommand {
            heater: true,
            cooler: false,
        };
        // Between target - threshold and target - threshold/2 the heater stays on.
        assert_eq!(t.decide(21.2, 10.0, true, false), on);
        assert_eq!(t.decide(21.5, 10.0, true, false), RelayCommand::OFF);
        assert_eq!(t.decide(23.0, 10.0, true, false), RelayCommand::OFF);
    }

    #[test]
    fn test_cooler_switches_off_inside_half_band() {
        let t = Thermostat::new(24.0, 1.0).unwrap();
        let on = RelayCommand {
            heater: false,
            cooler: true,
        };
        assert_eq!(t.decide(24.8, 35.0, false, true), on);
        assert_eq!(t.decide(24.5, 35.0, false, true), RelayCommand::OFF);
    }

    #[test]
    fn test_idle_in_band() {
        let t = Thermostat::new(22.0, 1.0).unwrap();
        assert_eq!(t.decide(22.0, 10.0, false, false), RelayCommand::OFF);
    }

    #[test]
    fn test_poll_drives_relays() {
        let clock = ManualClock::new();
        let mut room = RoomModel::with_parts(
            &RoomConfig {
                temperature: 16.0,
                outside_temperature: 10.0,
                heater_power: 5000.0,
                ..Default::default()
            },
            Box::new(clock.clone()),
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();
        let thermostat = Thermostat::new(22.0, 1.0).unwrap();

        let mut board = VirtualController::with_default_port(&mut room);
        wire(&mut board);

        let first = thermostat.poll(&mut board, PINS).unwrap();
        assert!(first.heater);
        assert!(board.read_relay_heater());

        let mut switched_off = false;
        for _ in 0..2000 {
            clock.advance(Duration::from_secs(2));
            let cmd = thermostat.poll(&mut board, PINS).unwrap();
            if !cmd.heater {
                switched_off = true;
                break;
            }
        }
        assert!(switched_off);
        assert!(!board.read_relay_heater());
        assert!(!board.read_relay_cooler());
    }

    #[test]
    fn test_poll_requires_configured_pins() {
        let mut room = RoomModel::with_parts(
            &RoomConfig::default(),
            Box::new(ManualClock::new()),
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();
        let thermostat = Thermostat::new(22.0, 1.0).unwrap();
        let mut board = VirtualController::with_default_port(&mut room);
        assert!(thermostat.poll(&mut board, PINS).is_err());

        wire(&mut board);
        board.set_pin_mode(0, PINS.cooler, 5).unwrap();
        let err = thermostat.poll(&mut board, PINS).unwrap_err().to_string();
        assert!(err.contains("RELAY_SUNSCREEN"), "{err}");
        assert!(err.contains("RELAY_COOLER"), "{err}");

        board.set_pin_mode(0, PINS.inside, 0).unwrap();
        board.set_pin_mode(0, PINS.cooler, 4).unwrap();
        let err = thermostat.poll(&mut board, PINS).unwrap_err().to_string();
        assert!(err.contains("DHT22_1"), "{err}");
    }
}
