//! Rule-by-rule tests of the SecurityService against recording fakes.

use catpoint::AlarmStatus::{Alarm, NoAlarm, PendingAlarm};
use catpoint::app::events::StatusEvent;
use catpoint::{AlarmStatus, ArmingStatus};

use crate::mock_ports::{
    RecordingRepository, RepoCall, StubClassifier, active, door, motion, service_with_listener,
};

// ── Sensor activation ─────────────────────────────────────────

#[test]
fn armed_and_sensor_activated_goes_pending() {
    for arming in ArmingStatus::ARMED {
        let repo = RecordingRepository::new(arming, NoAlarm).with_sensors([door(), motion()]);
        let (mut service, listener) = service_with_listener(repo, StubClassifier::default());

        let mut sensor = door();
        service.change_sensor_activation_status(&mut sensor, true);

        assert_eq!(service.repository().alarm_writes(), vec![PendingAlarm], "{arming}");
        assert_eq!(listener.count(StatusEvent::AlarmStatusChanged(PendingAlarm)), 1);
        assert!(sensor.is_active());
    }
}

#[test]
fn armed_and_pending_then_activation_goes_alarm() {
    for arming in ArmingStatus::ARMED {
        let repo = RecordingRepository::new(arming, PendingAlarm).with_sensors([door()]);
        let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

        service.change_sensor_activation_status(&mut door(), true);

        assert_eq!(service.repository().alarm_writes(), vec![Alarm], "{arming}");
    }
}

#[test]
fn disarmed_system_ignores_activation() {
    let repo = RecordingRepository::new(ArmingStatus::Disarmed, NoAlarm).with_sensors([door()]);
    let (mut service, listener) = service_with_listener(repo, StubClassifier::default());

    service.change_sensor_activation_status(&mut door(), true);

    assert!(service.repository().alarm_writes().is_empty());
    assert_eq!(listener.total(), 0);
    assert_eq!(service.repository().sensor_updates(), 1);
}

#[test]
fn pending_and_all_sensors_inactive_returns_to_no_alarm() {
    for arming in ArmingStatus::ARMED {
        let repo = RecordingRepository::new(arming, PendingAlarm)
            .with_sensors([active(door()), active(motion())]);
        let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

        let mut d = active(door());
        service.change_sensor_activation_status(&mut d, false);
        assert!(
            service.repository().alarm_writes().is_empty(),
            "motion still active, must stay pending"
        );

        let mut m = active(motion());
        service.change_sensor_activation_status(&mut m, false);
        assert_eq!(service.repository().alarm_writes(), vec![NoAlarm]);
        assert_eq!(service.alarm_status(), NoAlarm);
    }
}

#[test]
fn deactivating_sensor_unknown_to_repository_clears_pending() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedAway, PendingAlarm);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

    service.change_sensor_activation_status(&mut active(door()), false);

    assert_eq!(service.repository().alarm_writes(), vec![NoAlarm]);
}

#[test]
fn alarm_is_not_touched_by_sensor_changes() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedHome, Alarm).with_sensors([door()]);
    let (mut service, listener) = service_with_listener(repo, StubClassifier::default());

    let mut sensor = door();
    service.change_sensor_activation_status(&mut sensor, true);
    service.change_sensor_activation_status(&mut sensor, false);

    assert!(service.repository().alarm_writes().is_empty());
    assert_eq!(listener.total(), 0);
    assert_eq!(service.alarm_status(), Alarm);
}

#[test]
fn same_sensor_activated_twice_only_escalates_once() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedAway, NoAlarm).with_sensors([door()]);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

    let mut sensor = door();
    service.change_sensor_activation_status(&mut sensor, true);
    service.change_sensor_activation_status(&mut sensor, true);

    assert_eq!(service.repository().alarm_writes(), vec![PendingAlarm]);
    assert_eq!(service.repository().sensor_updates(), 2);
}

#[test]
fn different_sensor_activated_while_pending_goes_alarm() {
    let repo =
        RecordingRepository::new(ArmingStatus::ArmedAway, NoAlarm).with_sensors([door(), motion()]);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

    service.change_sensor_activation_status(&mut motion(), true);
    assert_eq!(service.alarm_status(), PendingAlarm);

    service.change_sensor_activation_status(&mut door(), true);

    assert_eq!(service.repository().alarm_writes_of(Alarm), 1);
    assert_eq!(service.alarm_status(), Alarm);
}

#[test]
fn deactivating_inactive_sensor_changes_nothing() {
    for current in AlarmStatus::ALL {
        let repo = RecordingRepository::new(ArmingStatus::ArmedHome, current).with_sensors([door()]);
        let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

        service.change_sensor_activation_status(&mut door(), false);

        assert!(service.repository().alarm_writes().is_empty(), "{current}");
        assert_eq!(service.repository().sensor_updates(), 1);
    }
}

#[test]
fn sensor_is_persisted_exactly_once_per_call() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedHome, NoAlarm).with_sensors([door()]);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

    service.change_sensor_activation_status(&mut door(), true);

    let updates: Vec<_> = service
        .repository()
        .calls
        .iter()
        .filter(|c| matches!(c, RepoCall::UpdateSensor { .. }))
        .cloned()
        .collect();
    assert_eq!(
        updates,
        vec![RepoCall::UpdateSensor {
            sensor: door(),
            active: true
        }]
    );
}

// ── Camera ────────────────────────────────────────────────────

#[test]
fn cat_while_armed_home_raises_alarm() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedHome, NoAlarm);
    let (mut service, listener) = service_with_listener(repo, StubClassifier::answering(true));

    service.process_image(&"kitchen.png".to_string());

    let repo = service.repository();
    assert_eq!(repo.alarm_writes(), vec![Alarm]);
    assert_eq!(repo.cat_writes(), vec![true]);
    assert_eq!(listener.count(StatusEvent::CatDetected(true)), 1);
}

#[test]
fn classifier_receives_image_and_fixed_threshold() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedAway, NoAlarm);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::answering(false));

    service.process_image(&"porch.jpg".to_string());

    assert_eq!(
        service.classifier().requests,
        vec![("porch.jpg".to_string(), 50.0)]
    );
}

#[test]
fn no_cat_and_no_active_sensor_forces_no_alarm() {
    for current in AlarmStatus::ALL {
        let repo = RecordingRepository::new(ArmingStatus::ArmedHome, current).with_sensors([door()]);
        let (mut service, listener) = service_with_listener(repo, StubClassifier::answering(false));

        service.process_image(&String::new());

        assert_eq!(service.repository().alarm_writes(), vec![NoAlarm], "{current}");
        assert_eq!(service.repository().cat_writes(), vec![false]);
        assert_eq!(listener.count(StatusEvent::CatDetected(false)), 1);
    }
}

#[test]
fn no_cat_with_active_sensor_leaves_status() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedAway, PendingAlarm)
        .with_sensors([active(door())]);
    let (mut service, listener) = service_with_listener(repo, StubClassifier::answering(false));

    service.process_image(&String::new());

    assert!(service.repository().alarm_writes().is_empty());
    assert_eq!(service.alarm_status(), PendingAlarm);
    assert_eq!(listener.count(StatusEvent::CatDetected(false)), 1);
}

#[test]
fn cat_while_armed_away_without_sensors_is_no_alarm() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedAway, PendingAlarm);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::answering(true));

    service.process_image(&String::new());

    assert_eq!(service.repository().alarm_writes(), vec![NoAlarm]);
    assert_eq!(service.repository().cat_writes(), vec![true]);
}

#[test]
fn cat_rule_runs_before_flag_is_persisted() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedHome, NoAlarm);
    let (mut service, listener) = service_with_listener(repo, StubClassifier::answering(true));

    service.process_image(&String::new());

    let repo = service.repository();
    let alarm_at = repo
        .position(|c| *c == RepoCall::SetAlarmStatus(Alarm))
        .unwrap();
    let cat_at = repo
        .position(|c| *c == RepoCall::SetCatDetected(true))
        .unwrap();
    assert!(alarm_at < cat_at);
    assert_eq!(
        *listener.events.borrow(),
        vec![
            StatusEvent::AlarmStatusChanged(Alarm),
            StatusEvent::CatDetected(true)
        ]
    );
}

// ── Arming ────────────────────────────────────────────────────

#[test]
fn disarm_forces_no_alarm_once() {
    for current in AlarmStatus::ALL {
        let repo = RecordingRepository::new(ArmingStatus::ArmedAway, current)
            .with_sensors([active(door())])
            .with_cat_detected(true);
        let (mut service, listener) = service_with_listener(repo, StubClassifier::default());

        service.set_arming_status(ArmingStatus::Disarmed);

        let repo = service.repository();
        assert_eq!(repo.alarm_writes(), vec![NoAlarm], "{current}");
        assert_eq!(repo.arming_writes(), vec![ArmingStatus::Disarmed]);
        assert_eq!(repo.sensor_updates(), 0, "disarming leaves sensors alone");
        assert_eq!(listener.count(StatusEvent::SensorStatusChanged), 0);
    }
}

#[test]
fn arming_resets_all_sensors_with_one_notification() {
    for arming in ArmingStatus::ARMED {
        let repo = RecordingRepository::new(ArmingStatus::Disarmed, NoAlarm)
            .with_sensors([active(door()), motion()])
            .with_cat_detected(true);
        let (mut service, listener) = service_with_listener(repo, StubClassifier::default());

        service.set_arming_status(arming);

        assert!(service.sensors().iter().all(|s| !s.is_active()));
        assert_eq!(service.repository().sensor_updates(), 2);
        assert_eq!(listener.count(StatusEvent::SensorStatusChanged), 1);
        assert_eq!(service.repository().arming_writes(), vec![arming]);
    }
}

#[test]
fn arming_from_disarmed_with_cat_raises_alarm_before_arming_write() {
    for arming in ArmingStatus::ARMED {
        let repo = RecordingRepository::new(ArmingStatus::Disarmed, NoAlarm).with_cat_detected(true);
        let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

        service.set_arming_status(arming);

        let repo = service.repository();
        assert_eq!(repo.alarm_writes(), vec![Alarm]);
        let alarm_at = repo
            .position(|c| *c == RepoCall::SetAlarmStatus(Alarm))
            .unwrap();
        let arming_at = repo
            .position(|c| *c == RepoCall::SetArmingStatus(arming))
            .unwrap();
        assert!(alarm_at < arming_at);
    }
}

#[test]
fn rearming_with_cat_does_not_raise_alarm() {
    let repo = RecordingRepository::new(ArmingStatus::ArmedAway, NoAlarm).with_cat_detected(true);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

    service.set_arming_status(ArmingStatus::ArmedHome);

    assert!(service.repository().alarm_writes().is_empty());
    assert_eq!(service.arming_status(), ArmingStatus::ArmedHome);
}

#[test]
fn arming_without_cat_leaves_alarm_untouched() {
    let repo = RecordingRepository::new(ArmingStatus::Disarmed, NoAlarm).with_sensors([door()]);
    let (mut service, _listener) = service_with_listener(repo, StubClassifier::default());

    service.set_arming_status(ArmingStatus::ArmedAway);

    assert!(service.repository().alarm_writes().is_empty());
}

// ── Pass-throughs ─────────────────────────────────────────────

#[test]
fn add_and_remove_sensor_pass_through() {
    let repo = RecordingRepository::new(ArmingStatus::Disarmed, NoAlarm);
    let (mut service, listener) = service_with_listener(repo, StubClassifier::default());

    service.add_sensor(door());
    service.add_sensor(door());
    assert_eq!(service.sensors().len(), 1);

    service.remove_sensor(&door());
    assert!(service.sensors().is_empty());

    let calls = &service.repository().calls;
    assert_eq!(
        calls,
        &vec![
            RepoCall::AddSensor(door()),
            RepoCall::AddSensor(door()),
            RepoCall::RemoveSensor(door()),
        ]
    );
    assert_eq!(listener.total(), 0);
}

#[test]
fn set_alarm_status_persists_then_notifies_all() {
    let repo = RecordingRepository::new(ArmingStatus::Disarmed, NoAlarm);
    let (mut service, first) = service_with_listener(repo, StubClassifier::default());
    let second = std::rc::Rc::new(crate::mock_ports::RecordingListener::default());
    service.add_status_listener(second.clone());

    service.set_alarm_status(PendingAlarm);

    assert_eq!(service.repository().alarm_writes(), vec![PendingAlarm]);
    assert_eq!(first.count(StatusEvent::AlarmStatusChanged(PendingAlarm)), 1);
    assert_eq!(second.count(StatusEvent::AlarmStatusChanged(PendingAlarm)), 1);
}
