// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod room;

/// Density of air in kg/m^3.
pub const AIR_DENSITY: f64 = 1.225;
/// Specific heat of air at constant volume in J/(kg*K).
pub const SPECIFIC_HEAT: f64 = 700.0;
/// Thermal conductivity of insulated brick in W/(m*K).
pub const WALL_CONDUCTIVITY: f64 = 0.18;
/// Brick wall thickness in m.
pub const WALL_THICKNESS: f64 = 0.3;

/// DHT22 measurement range in degrees Celsius.
pub const SENSOR_MIN_C: f64 = -40.0;
pub const SENSOR_MAX_C: f64 = 80.0;

/// Minimum wall-clock interval between two integrating temperature reads.
pub const MIN_READ_INTERVAL_SECS: f64 = 2.0;

/// Half-width of the uniform sensor bias distribution.
pub const SENSOR_OFFSET_SPAN: f64 = 0.5;

/// Interface for physical environmental models.
pub trait PhysicalModel: Send {
    /// Advance the physical state by a time step in seconds.
    fn step(&mut self, dt_seconds: f64);
}
