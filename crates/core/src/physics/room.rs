// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use super::{
    PhysicalModel, AIR_DENSITY, MIN_READ_INTERVAL_SECS, SENSOR_MAX_C, SENSOR_MIN_C,
    SENSOR_OFFSET_SPAN, SPECIFIC_HEAT, WALL_CONDUCTIVITY, WALL_THICKNESS,
};
use crate::clock::{Clock, SystemClock};
use crate::snapshot::RoomSnapshot;
use crate::{SimResult, SimulationError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roomsim_config::RoomConfig;
use std::time::Duration;

const MAX_LIGHT_LEVEL_LUX: f64 = 100_000.0;

/// A single room with a heater, a cooler and a sunscreen.
///
/// Inside temperature is integrated lazily: every call to
/// [`RoomModel::temperature`] that comes at least two seconds after the
/// previous integration advances the model by the elapsed time. Readings are
/// clamped to the DHT22 range and carry a fixed per-instance sensor bias.
#[derive(Debug)]
pub struct RoomModel {
    temperature: f64,
    outside_temperature: f64,
    humidity: f64,
    light_level_lux: f64,
    sensor_offset: f64,

    heater_active: bool,
    cooler_active: bool,
    sunscreen_active: bool,
    heater_power: f64,
    cooler_power: f64,

    // Fixed at construction.
    room_volume: f64,
    surface_area: f64,

    clock: Box<dyn Clock>,
    last_update: Duration,
}

impl RoomModel {
    /// Build a room with default actuator powers, a wall clock and an
    /// OS-seeded sensor bias.
    pub fn new(
        temperature: f64,
        outside_temperature: f64,
        humidity: f64,
        dimensions: &[f64],
    ) -> SimResult<Self> {
        let config = RoomConfig {
            temperature,
            outside_temperature,
            humidity,
            dimensions: dimensions.to_vec(),
            ..Default::default()
        };
        Self::from_config(&config)
    }

    /// Build a room from a scenario section, using the wall clock.
    ///
    /// `sensor_seed` makes the sensor bias reproducible; without it the bias
    /// comes from OS entropy.
    pub fn from_config(config: &RoomConfig) -> SimResult<Self> {
        Self::from_config_with_clock(config, Box::new(SystemClock::new()))
    }

    pub fn from_config_with_clock(config: &RoomConfig, clock: Box<dyn Clock>) -> SimResult<Self> {
        match config.sensor_seed {
            Some(seed) => Self::with_parts(config, clock, &mut StdRng::seed_from_u64(seed)),
            None => Self::with_parts(config, clock, &mut rand::thread_rng()),
        }
    }

    /// Build a room with an injected clock and random source.
    pub fn with_parts<R: Rng>(
        config: &RoomConfig,
        clock: Box<dyn Clock>,
        rng: &mut R,
    ) -> SimResult<Self> {
        let [width, length, height] = match config.dimensions.as_slice() {
            [w, l, h] => [*w, *l, *h],
            other => {
                return Err(SimulationError::invalid(format!(
                    "Invalid room dimensions. Expected 3 (width, length, height), got {}.",
                    other.len()
                )))
            }
        };
        if [width, length, height]
            .iter()
            .any(|d| !d.is_finite() || *d <= 0.0)
        {
            return Err(SimulationError::invalid(
                "Invalid room dimensions. Width, length and height must be positive.",
            ));
        }

        let sensor_offset = rng.gen_range(-SENSOR_OFFSET_SPAN..=SENSOR_OFFSET_SPAN);
        let last_update = clock.now();

        let mut room = Self {
            temperature: config.temperature,
            outside_temperature: config.outside_temperature,
            humidity: 0.0,
            light_level_lux: MAX_LIGHT_LEVEL_LUX,
            sensor_offset,
            heater_active: false,
            cooler_active: false,
            sunscreen_active: false,
            heater_power: 0.0,
            cooler_power: 0.0,
            room_volume: width * length * height,
            surface_area: 2.0 * (width * height + length * height),
            clock,
            last_update,
        };
        room.set_humidity(config.humidity)?;
        room.set_light_level_lux(config.light_level_lux)?;
        room.set_heater_power(config.heater_power)?;
        room.set_cooler_power(config.cooler_power)?;

        tracing::debug!(
            volume = room.room_volume,
            surface = room.surface_area,
            offset = room.sensor_offset,
            "room model created"
        );
        Ok(room)
    }

    fn sensor_reading(&self, value: f64) -> f64 {
        value.clamp(SENSOR_MIN_C, SENSOR_MAX_C) + self.sensor_offset
    }

    /// Inside temperature as the DHT22 would report it.
    pub fn temperature(&mut self) -> f64 {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_update).as_secs_f64();
        if elapsed < MIN_READ_INTERVAL_SECS {
            return self.sensor_reading(self.temperature);
        }

        self.last_update = now;
        self.step(elapsed);
        self.sensor_reading(self.temperature)
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    /// Outside temperature as the DHT22 would report it. Not simulated.
    pub fn outside_temperature(&self) -> f64 {
        self.sensor_reading(self.outside_temperature)
    }

    pub fn set_outside_temperature(&mut self, temperature: f64) {
        self.outside_temperature = temperature;
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn set_humidity(&mut self, humidity: f64) -> SimResult<()> {
        if !(0.0..=100.0).contains(&humidity) {
            return Err(SimulationError::invalid(
                "Invalid humidity value. Expected a value between 0 and 100.",
            ));
        }
        self.humidity = humidity;
        Ok(())
    }

    pub fn light_level_lux(&self) -> f64 {
        self.light_level_lux
    }

    pub fn set_light_level_lux(&mut self, lux: f64) -> SimResult<()> {
        if !(lux > 0.0 && lux <= MAX_LIGHT_LEVEL_LUX) {
            return Err(SimulationError::invalid(
                "Invalid light level. Expected a value above 0 and at most 100000 lux.",
            ));
        }
        self.light_level_lux = lux;
        Ok(())
    }

    pub fn is_heater_active(&self) -> bool {
        self.heater_active
    }

    pub fn activate_heater(&mut self, active: bool) {
        self.heater_active = active;
    }

    pub fn is_cooler_active(&self) -> bool {
        self.cooler_active
    }

    pub fn activate_cooler(&mut self, active: bool) {
        self.cooler_active = active;
    }

    pub fn is_sunscreen_active(&self) -> bool {
        self.sunscreen_active
    }

    pub fn activate_sunscreen(&mut self, active: bool) {
        self.sunscreen_active = active;
    }

    pub fn heater_power(&self) -> f64 {
        self.heater_power
    }

    pub fn set_heater_power(&mut self, power: f64) -> SimResult<()> {
        if power.is_nan() || power < 0.0 {
            return Err(SimulationError::invalid(
                "Invalid heater power value. Expected a non-negative value.",
            ));
        }
        self.heater_power = power;
        Ok(())
    }

    pub fn cooler_power(&self) -> f64 {
        self.cooler_power
    }

    pub fn set_cooler_power(&mut self, power: f64) -> SimResult<()> {
        if power.is_nan() || power < 0.0 {
            return Err(SimulationError::invalid(
                "Invalid cooler power value. Expected a non-negative value.",
            ));
        }
        self.cooler_power = power;
        Ok(())
    }

    pub fn sensor_offset(&self) -> f64 {
        self.sensor_offset
    }

    pub fn room_volume(&self) -> f64 {
        self.room_volume
    }

    pub fn surface_area(&self) -> f64 {
        self.surface_area
    }

    fn thermal_mass(&self) -> f64 {
        self.room_volume * AIR_DENSITY * SPECIFIC_HEAT
    }

    /// Temperature change in Kelvin over `delta_time` seconds given the
    /// current actuator states and the conductive exchange through the walls.
    pub fn calculate_temp_delta(&self, delta_time: f64) -> f64 {
        let heater = if self.heater_active { self.heater_power } else { 0.0 };
        let cooler = if self.cooler_active { self.cooler_power } else { 0.0 };

        let internal = delta_time * (heater - cooler) / self.thermal_mass();
        let external = self.calculate_heat_exchange() * delta_time / self.thermal_mass();
        internal + external
    }

    /// Conductive heat flow through the walls in watts. Positive when the
    /// room gains heat from outside.
    pub fn calculate_heat_exchange(&self) -> f64 {
        let diff = self.temperature - self.outside_temperature;
        -(self.surface_area * WALL_CONDUCTIVITY * diff) / WALL_THICKNESS
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            temperature: self.temperature,
            outside_temperature: self.outside_temperature,
            humidity: self.humidity,
            light_level_lux: self.light_level_lux,
            sensor_offset: self.sensor_offset,
            heater_active: self.heater_active,
            cooler_active: self.cooler_active,
            sunscreen_active: self.sunscreen_active,
            heater_power: self.heater_power,
            cooler_power: self.cooler_power,
            room_volume: self.room_volume,
            surface_area: self.surface_area,
            air_density: AIR_DENSITY,
            specific_heat: SPECIFIC_HEAT,
        }
    }
}

impl PhysicalModel for RoomModel {
    fn step(&mut self, dt_seconds: f64) {
        let delta = self.calculate_temp_delta(dt_seconds);
        self.temperature += delta;
        tracing::trace!(
            dt = dt_seconds,
            delta,
            temperature = self.temperature,
            "room integrated"
        );
    }
}
