//! Catpoint host harness.
//!
//! Wires the alarm engine to the in-process adapters and replays a short
//! panel session, logging every state change.  Pass a JSON config file as
//! the first argument to override the defaults; set `RUST_LOG=debug` to see
//! sensor updates and classifier verdicts.

use std::rc::Rc;

use anyhow::{Context, Result};
use log::info;

use catpoint::adapters::classifier::ScoredImageClassifier;
use catpoint::adapters::log_listener::LogStatusListener;
use catpoint::adapters::memory::InMemoryRepository;
use catpoint::app::commands::{CommandOutcome, SecurityCommand};
use catpoint::config::SecurityConfig;
use catpoint::{ArmingStatus, SecurityService, Sensor, SensorType};

/// A camera frame as the harness models it: a label for the log and the
/// confidence a cat is in it.
#[derive(Debug, Clone)]
struct CameraFrame {
    label: &'static str,
    cat_score: f32,
}

fn load_config() -> Result<SecurityConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config = SecurityConfig::from_json(&json)
                .with_context(|| format!("loading config {path}"))?;
            info!("Config loaded from {}", path);
            Ok(config)
        }
        None => Ok(SecurityConfig::default()),
    }
}

fn session() -> Vec<SecurityCommand<CameraFrame>> {
    use SecurityCommand::{AddSensor, ChangeSensorActivation, ProcessImage, SetArmingStatus};

    vec![
        AddSensor(Sensor::new("Front door", SensorType::Door)),
        AddSensor(Sensor::new("Living room", SensorType::Motion)),
        AddSensor(Sensor::new("Kitchen", SensorType::Window)),
        SetArmingStatus(ArmingStatus::ArmedAway),
        ChangeSensorActivation {
            name: "Front door".into(),
            sensor_type: SensorType::Door,
            active: true,
        },
        ChangeSensorActivation {
            name: "Living room".into(),
            sensor_type: SensorType::Motion,
            active: true,
        },
        ChangeSensorActivation {
            name: "Front door".into(),
            sensor_type: SensorType::Door,
            active: false,
        },
        ChangeSensorActivation {
            name: "Living room".into(),
            sensor_type: SensorType::Motion,
            active: false,
        },
        SetArmingStatus(ArmingStatus::Disarmed),
        ProcessImage(CameraFrame {
            label: "porch",
            cat_score: 91.0,
        }),
        SetArmingStatus(ArmingStatus::ArmedHome),
    ]
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Catpoint v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let repository = InMemoryRepository::from_config(&config);
    let classifier = ScoredImageClassifier::new(|frame: &CameraFrame| {
        info!("Camera frame '{}'", frame.label);
        frame.cat_score
    });
    let mut service = SecurityService::with_config(repository, classifier, &config)?;
    service.add_status_listener(Rc::new(LogStatusListener::new()));

    for cmd in session() {
        if service.handle_command(cmd) == CommandOutcome::UnknownSensor {
            log::warn!("Command skipped");
        }
    }

    info!(
        "Session done: {} / {}",
        service.arming_status(),
        service.alarm_status()
    );
    info!("Final state:\n{}", service.repository().to_json()?);
    Ok(())
}
