use rand::rngs::StdRng;
use rand::SeedableRng;
use roomsim_config::RoomConfig;
use roomsim_core::{
    FirmataBoard, ManualClock, PinData, RoomModel, Thermostat, ThermostatPins, VirtualController,
};
use std::time::Duration;

fn room(clock: &ManualClock, config: RoomConfig) -> RoomModel {
    RoomModel::with_parts(&config, Box::new(clock.clone()), &mut StdRng::seed_from_u64(17))
        .unwrap()
}

#[test]
fn test_relay_writes_reach_room_after_board_drops() {
    let clock = ManualClock::new();
    let mut room = room(&clock, RoomConfig::default());
    {
        let mut board = VirtualController::new(3, &mut room);
        board.set_pin_mode(0, 30, 3).unwrap();
        board.set_pin_mode(0, 32, 4).unwrap();
        board.set_pin_mode(0, 34, 5).unwrap();
        board.set_digital_pin(30, true).unwrap();
        board.set_digital_pin(34, true).unwrap();
    }
    assert!(room.is_heater_active());
    assert!(!room.is_cooler_active());
    assert!(room.is_sunscreen_active());
}

#[test]
fn test_invalid_arguments_leave_table_untouched() {
    let clock = ManualClock::new();
    let mut room = room(&clock, RoomConfig::default());
    let mut board = VirtualController::new(3, &mut room);

    assert!(board.set_pin_mode(0, 60, 1).is_err());
    assert!(board.set_pin_mode(0, 7, 9).is_err());
    assert!(board.set_pin_mode(1, 0, 3).is_err());
    assert_eq!(board.pins().configured_digital().count(), 0);
    assert_eq!(board.pins().configured_analog().count(), 0);
}

#[test]
fn test_ldr_reading_stays_in_adc_range() {
    let clock = ManualClock::new();
    let mut room = room(&clock, RoomConfig::default());
    let mut board = VirtualController::new(3, &mut room);
    board.set_pin_mode(1, 0, 6).unwrap();

    for lux in [0.001, 1.0, 42.0, 999.0, 50_000.0, 100_000.0] {
        board.room_mut().set_light_level_lux(lux).unwrap();
        let count = board.get_pin_data(1, 0).unwrap().as_analog().unwrap();
        assert!(count <= 1023, "lux {lux} gave {count}");
    }
    assert!(board.room_mut().set_light_level_lux(0.0).is_err());
    assert!(board.room_mut().set_light_level_lux(100_001.0).is_err());
}

#[test]
fn test_inside_sensor_rises_with_heater_on() {
    let clock = ManualClock::new();
    let mut room = room(&clock, RoomConfig::default());
    let mut board = VirtualController::new(3, &mut room);
    board.set_pin_mode(0, 7, 1).unwrap();
    board.set_pin_mode(0, 30, 3).unwrap();
    board.set_digital_pin(30, true).unwrap();

    let before = board.get_pin_data(0, 7).unwrap().as_climate().unwrap()[0];
    clock.advance(Duration::from_secs(120));
    let after = board.get_pin_data(0, 7).unwrap().as_climate().unwrap()[0];
    assert!(after > before);
}

#[test]
fn test_firmata_scenario_heats_into_band() {
    let clock = ManualClock::new();
    let mut room = room(
        &clock,
        RoomConfig {
            temperature: 16.0,
            outside_temperature: 12.0,
            humidity: 45.0,
            dimensions: vec![4.0, 5.0, 2.5],
            heater_power: 3000.0,
            ..Default::default()
        },
    );
    let thermostat = Thermostat::new(22.0, 1.0).unwrap();
    let pins = ThermostatPins {
        inside: 7,
        outside: 8,
        heater: 30,
        cooler: 32,
    };

    let mut board = FirmataBoard::new(3, &mut room);
    assert!(board.begin());
    for def in ["d:7:DHT22_1", "d:8:DHT22_2", "d:30:RELAY_HEATER", "d:32:RELAY_COOLER"] {
        board.set_pin_mode(def).unwrap();
    }

    for _ in 0..600 {
        clock.advance(Duration::from_secs(2));
        thermostat.poll(board.controller_mut(), pins).unwrap();
    }

    let inside = match board.digital_read(7).unwrap() {
        PinData::Climate([t, _]) => t,
        other => panic!("unexpected {other:?}"),
    };
    assert!((19.5..=24.5).contains(&inside), "inside {inside}");
    assert!(!board.room().is_cooler_active());
}
