//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (control panel,
//! scripted scenarios, camera feed) that the
//! [`SecurityService`](super::service::SecurityService) interprets and acts
//! upon via [`handle_command`](super::service::SecurityService::handle_command).

use crate::fsm::ArmingStatus;
use crate::sensor::{Sensor, SensorType};

/// Commands that external adapters can send into the engine.
/// `I` is the classifier's image type.
#[derive(Debug, Clone)]
pub enum SecurityCommand<I> {
    /// Change the arming status.
    SetArmingStatus(ArmingStatus),

    /// Flip a known sensor, identified by name and type, to `active`.
    ChangeSensorActivation {
        name: String,
        sensor_type: SensorType,
        active: bool,
    },

    /// Register a new sensor.
    AddSensor(Sensor),

    /// Forget a sensor.
    RemoveSensor(Sensor),

    /// Classify a camera image.
    ProcessImage(I),
}

/// What a command did, for callers that want to log or display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The command referred to a sensor the repository does not know.
    UnknownSensor,
}
