// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use roomsim_config::{ExpectConfig, ScenarioManifest};
use roomsim_core::board::{AnalogMode, DigitalMode, PinMode};
use roomsim_core::{
    Clock, ManualClock, PinDefinition, RoomModel, RoomSnapshot, Thermostat, ThermostatPins,
    VirtualController,
};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

pub const RESULT_SCHEMA_VERSION: &str = "1.0";

/// Readings taken through the board's configured pins after one step.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepRecord {
    pub step: u64,
    pub elapsed_s: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inside: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    pub heater: bool,
    pub cooler: bool,
    pub sunscreen: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldr: Option<u16>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pass,
    Fail,
    /// No expectation configured; the run only has to complete.
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub result_schema_version: String,
    pub scenario: String,
    pub status: RunStatus,
    pub steps: u64,
    pub elapsed_s: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_inside: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_inside: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_inside: Option<f64>,
    pub heater_on_steps: u64,
    pub cooler_on_steps: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect: Option<ExpectConfig>,
    pub room: RoomSnapshot,
}

#[derive(Debug)]
pub struct RunReport {
    pub records: Vec<StepRecord>,
    pub summary: RunSummary,
}

/// Scenario resolved into a room and a parsed wiring, ready to run.
#[derive(Debug)]
pub struct PreparedScenario {
    manifest: ScenarioManifest,
    room: RoomModel,
    clock: ManualClock,
    pins: Vec<PinDefinition>,
    thermostat: Option<(Thermostat, ThermostatPins)>,
}

impl PreparedScenario {
    /// Everything that can fail here is a configuration problem.
    pub fn new(manifest: ScenarioManifest) -> Result<Self> {
        let clock = ManualClock::new();
        let room = RoomModel::from_config_with_clock(&manifest.room, Box::new(clock.clone()))
            .context("Invalid 'room' section")?;

        let pins = manifest
            .board
            .pins
            .iter()
            .map(|def| {
                def.parse::<PinDefinition>()
                    .with_context(|| format!("Invalid pin definition '{}'", def))
            })
            .collect::<Result<Vec<_>>>()?;
        reject_duplicate_pins(&pins)?;

        let thermostat = match &manifest.thermostat {
            Some(config) => {
                let thermostat =
                    Thermostat::from_config(config).context("Invalid 'thermostat' section")?;
                Some((thermostat, thermostat_pins(&pins)?))
            }
            None => None,
        };

        if manifest.expect.is_some() && find_digital(&pins, DigitalMode::Dht22Inside).is_none() {
            anyhow::bail!("'expect' needs a DHT22_1 pin to read the inside temperature from");
        }

        Ok(Self {
            manifest,
            room,
            clock,
            pins,
            thermostat,
        })
    }

    pub fn manifest(&self) -> &ScenarioManifest {
        &self.manifest
    }

    pub fn pins(&self) -> &[PinDefinition] {
        &self.pins
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        self.room.snapshot()
    }

    /// Step the scenario, handing each record to `on_step` as it is taken.
    pub fn run(
        mut self,
        steps: u64,
        mut on_step: impl FnMut(&StepRecord) -> Result<()>,
    ) -> Result<RunReport> {
        let interval = Duration::from_millis(self.manifest.run.poll_interval_ms);
        let mut board = VirtualController::new(self.manifest.board.comm_port, &mut self.room);
        for def in &self.pins {
            board
                .set_pin_mode(def.type_code(), def.pin, def.mode.code())
                .with_context(|| format!("Failed to configure pin '{}'", def))?;
        }

        let mut records = Vec::with_capacity(usize::try_from(steps).unwrap_or(0));
        let mut heater_on_steps = 0;
        let mut cooler_on_steps = 0;

        for step in 1..=steps {
            self.clock.advance(interval);
            if let Some((thermostat, pins)) = &self.thermostat {
                thermostat
                    .poll(&mut board, *pins)
                    .with_context(|| format!("Thermostat cycle failed at step {}", step))?;
            }

            let record = sample(&mut board, step, self.clock.now().as_secs_f64())
                .with_context(|| format!("Pin read failed at step {}", step))?;
            if record.heater {
                heater_on_steps += 1;
            }
            if record.cooler {
                cooler_on_steps += 1;
            }
            tracing::debug!(
                step,
                inside = ?record.inside,
                heater = record.heater,
                cooler = record.cooler,
                "step"
            );
            on_step(&record)?;
            records.push(record);
        }
        drop(board);

        let insides = records.iter().filter_map(|r| r.inside);
        let min_inside = insides.clone().reduce(f64::min);
        let max_inside = insides.reduce(f64::max);
        let final_inside = records.last().and_then(|r| r.inside);

        let status = match (&self.manifest.expect, final_inside) {
            (Some(expect), Some(t)) => {
                if (expect.min_temperature..=expect.max_temperature).contains(&t) {
                    RunStatus::Pass
                } else {
                    RunStatus::Fail
                }
            }
            (Some(_), None) => RunStatus::Fail,
            (None, _) => RunStatus::Completed,
        };

        let summary = RunSummary {
            result_schema_version: RESULT_SCHEMA_VERSION.to_string(),
            scenario: self.manifest.name.clone(),
            status,
            steps,
            elapsed_s: self.clock.now().as_secs_f64(),
            final_inside,
            min_inside,
            max_inside,
            heater_on_steps,
            cooler_on_steps,
            expect: self.manifest.expect,
            room: self.room.snapshot(),
        };
        Ok(RunReport { records, summary })
    }
}

/// Each pin may be declared once; a later declaration would silently
/// rewire a pin the thermostat or the records were resolved against.
fn reject_duplicate_pins(pins: &[PinDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for def in pins {
        if !seen.insert((def.pin_type, def.pin)) {
            anyhow::bail!(
                "Pin definition '{}' reuses a pin already declared in 'board.pins'",
                def
            );
        }
    }
    Ok(())
}

fn find_digital(pins: &[PinDefinition], mode: DigitalMode) -> Option<i32> {
    pins.iter()
        .find(|def| def.mode == PinMode::Digital(mode))
        .map(|def| def.pin)
}

fn thermostat_pins(pins: &[PinDefinition]) -> Result<ThermostatPins> {
    let require = |mode: DigitalMode| {
        find_digital(pins, mode)
            .with_context(|| format!("Thermostat needs a {} pin in 'board.pins'", mode))
    };
    Ok(ThermostatPins {
        inside: require(DigitalMode::Dht22Inside)?,
        outside: require(DigitalMode::Dht22Outside)?,
        heater: require(DigitalMode::RelayHeater)?,
        cooler: require(DigitalMode::RelayCooler)?,
    })
}

/// Read every configured sensor pin once. The first pin of each kind wins.
fn sample(board: &mut VirtualController<'_>, step: u64, elapsed_s: f64) -> Result<StepRecord> {
    let mut record = StepRecord {
        step,
        elapsed_s,
        inside: None,
        outside: None,
        humidity: None,
        heater: board.read_relay_heater(),
        cooler: board.read_relay_cooler(),
        sunscreen: board.read_relay_sunscreen(),
        ldr: None,
    };

    let digital: Vec<_> = board.pins().configured_digital().collect();
    for (pin, mode) in digital {
        let slot = match mode {
            DigitalMode::Dht22Inside => &mut record.inside,
            DigitalMode::Dht22Outside => &mut record.outside,
            _ => continue,
        };
        if slot.is_some() {
            continue;
        }
        let [temperature, humidity] = board
            .get_pin_data(0, pin as i32)?
            .as_climate()
            .context("DHT22 pin returned no climate pair")?;
        *slot = Some(temperature);
        record.humidity.get_or_insert(humidity);
    }

    let analog: Vec<_> = board.pins().configured_analog().collect();
    if let Some((pin, _)) = analog.into_iter().find(|(_, mode)| *mode == AnalogMode::Ldr) {
        record.ldr = board.get_pin_data(1, pin as i32)?.as_analog();
    }

    Ok(record)
}
