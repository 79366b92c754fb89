// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use roomsim_config::RoomConfig;
use roomsim_core::{ManualClock, RoomModel, Thermostat, ThermostatPins, VirtualController};
use std::time::Duration;

fn room(clock: &ManualClock) -> RoomModel {
    RoomModel::with_parts(
        &RoomConfig::default(),
        Box::new(clock.clone()),
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap()
}

fn bench_temperature_read(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut room = room(&clock);
    room.activate_heater(true);

    c.bench_function("room_temperature_integrating_read", |b| {
        b.iter(|| {
            clock.advance(Duration::from_secs(2));
            black_box(room.temperature())
        })
    });
}

fn bench_thermostat_cycle(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut room = room(&clock);
    let mut board = VirtualController::new(3, &mut room);
    for (pin, mode) in [(7, 1), (8, 2), (30, 3), (32, 4)] {
        board.set_pin_mode(0, pin, mode).unwrap();
    }
    let thermostat = Thermostat::new(22.0, 1.0).unwrap();
    let pins = ThermostatPins {
        inside: 7,
        outside: 8,
        heater: 30,
        cooler: 32,
    };

    c.bench_function("thermostat_poll", |b| {
        b.iter(|| {
            clock.advance(Duration::from_secs(2));
            black_box(thermostat.poll(&mut board, pins).unwrap())
        })
    });
}

fn bench_ldr(c: &mut Criterion) {
    let clock = ManualClock::new();
    let mut room = room(&clock);
    let mut board = VirtualController::new(3, &mut room);
    board.set_pin_mode(1, 0, 6).unwrap();

    c.bench_function("ldr_read", |b| b.iter(|| black_box(board.read_ldr())));
}

criterion_group!(benches, bench_temperature_read, bench_thermostat_cycle, bench_ldr);
criterion_main!(benches);
