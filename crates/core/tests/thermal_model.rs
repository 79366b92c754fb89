// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use rand::rngs::StdRng;
use rand::SeedableRng;
use roomsim_config::RoomConfig;
use roomsim_core::{ManualClock, RoomModel};
use std::time::Duration;

fn reference_room(seed: u64) -> (RoomModel, ManualClock) {
    let clock = ManualClock::new();
    let room = RoomModel::with_parts(
        &RoomConfig {
            temperature: 25.0,
            outside_temperature: 30.0,
            humidity: 20.0,
            dimensions: vec![10.0, 10.0, 2.0],
            ..Default::default()
        },
        Box::new(clock.clone()),
        &mut StdRng::seed_from_u64(seed),
    )
    .unwrap();
    (room, clock)
}

#[test]
fn test_reference_geometry() {
    let (room, _) = reference_room(1);
    assert_eq!(room.room_volume(), 200.0);
    assert_eq!(room.surface_area(), 80.0);
}

#[test]
fn test_reference_heat_exchange_and_delta() {
    let (mut room, _) = reference_room(1);
    assert!((room.calculate_heat_exchange() - 240.0).abs() < 1e-9);

    room.activate_heater(true);
    let delta = room.calculate_temp_delta(1000.0);
    assert!((delta - 1.3994169).abs() < 1e-6, "delta {delta}");
}

#[test]
fn test_heater_only_delta_at_equilibrium() {
    let (mut room, _) = reference_room(1);
    room.set_outside_temperature(25.0);
    assert_eq!(room.calculate_heat_exchange(), 0.0);

    room.activate_heater(true);
    let delta = room.calculate_temp_delta(1.0);
    assert!((delta - 0.00583).abs() < 1e-5, "delta {delta}");
}

#[test]
fn test_heating_raises_reading_over_time() {
    let (mut room, clock) = reference_room(2);
    room.activate_heater(true);
    let start = room.temperature();

    let mut last = start;
    for _ in 0..30 {
        clock.advance(Duration::from_secs(60));
        let now = room.temperature();
        assert!(now > last);
        last = now;
    }
    assert!(last - start > 2.0);
}

#[test]
fn test_reads_inside_two_seconds_do_not_integrate() {
    let (mut room, clock) = reference_room(2);
    room.activate_heater(true);
    let first = room.temperature();
    for _ in 0..3 {
        clock.advance(Duration::from_millis(600));
        assert_eq!(room.temperature(), first);
    }
    clock.advance(Duration::from_millis(600));
    assert!(room.temperature() > first);
}

#[test]
fn test_same_seed_same_offset() {
    let (a, _) = reference_room(42);
    let (b, _) = reference_room(42);
    assert_eq!(a.sensor_offset(), b.sensor_offset());
    assert!(a.sensor_offset().abs() <= 0.5);
}

#[test]
fn test_config_seed_is_reproducible() {
    let config = RoomConfig {
        sensor_seed: Some(99),
        ..Default::default()
    };
    let a = RoomModel::from_config(&config).unwrap();
    let b = RoomModel::from_config(&config).unwrap();
    assert_eq!(a.sensor_offset(), b.sensor_offset());
}

#[test]
fn test_snapshot_serializes() {
    let (room, _) = reference_room(3);
    let json = room.snapshot().to_json();
    assert_eq!(json["room_volume"], 200.0);
    assert_eq!(json["heater_active"], false);
    assert_eq!(json["air_density"], 1.225);
}
