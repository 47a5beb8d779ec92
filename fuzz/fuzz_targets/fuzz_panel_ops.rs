//! Fuzz target: `SecurityService` operation sequences
//!
//! Decodes each byte pair into one panel operation (arm, toggle a sensor,
//! classify a frame) and checks the invariants that must hold after every
//! step, whatever came before.
//!
//! cargo fuzz run fuzz_panel_ops

#![no_main]

use catpoint::adapters::classifier::ScoredImageClassifier;
use catpoint::adapters::memory::InMemoryRepository;
use catpoint::app::ports::SecurityRepository;
use catpoint::{AlarmStatus, ArmingStatus, SecurityService, Sensor, SensorType};
use libfuzzer_sys::fuzz_target;

const SENSORS: [(&str, SensorType); 3] = [
    ("front", SensorType::Door),
    ("bedroom", SensorType::Window),
    ("hall", SensorType::Motion),
];

fuzz_target!(|data: &[u8]| {
    let mut repo = InMemoryRepository::new();
    for (name, kind) in SENSORS {
        repo.add_sensor(Sensor::new(name, kind));
    }
    let mut service =
        SecurityService::new(repo, ScoredImageClassifier::new(|score: &u8| f32::from(*score)));

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0], pair[1]);
        match op % 3 {
            0 => {
                let status = ArmingStatus::ALL[usize::from(arg) % 3];
                service.set_arming_status(status);
                if status == ArmingStatus::Disarmed {
                    assert_eq!(service.alarm_status(), AlarmStatus::NoAlarm);
                } else {
                    assert!(service.sensors().iter().all(|s| !s.is_active()));
                }
            }
            1 => {
                let (name, kind) = SENSORS[usize::from(arg) % SENSORS.len()];
                let probe = Sensor::new(name, kind);
                let mut sensor = service.sensors().get(&probe).cloned().unwrap_or(probe);
                let before = service.alarm_status();
                service.change_sensor_activation_status(&mut sensor, arg & 0x80 != 0);
                let after = service.alarm_status();
                if before == AlarmStatus::Alarm || service.arming_status() == ArmingStatus::Disarmed {
                    assert_eq!(before, after);
                }
            }
            _ => {
                let score = arg % 101;
                service.process_image(&score);
                assert_eq!(service.repository().cat_detected(), f32::from(score) > 50.0);
            }
        }
    }
});
