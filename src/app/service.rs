//! Security service: the hexagonal core.
//!
//! [`SecurityService`] owns the repository and classifier adapters and the
//! set of status listeners.  Every public operation gathers its inputs from
//! the repository, asks [`fsm::transition`](crate::fsm::transition) what the
//! alarm status should do, then performs the writes and notifications.
//!
//! ```text
//!  ImageClassifier ──▶ ┌──────────────────────────┐ ──▶ StatusListener ×N
//!                      │     SecurityService      │
//!  SecurityRepository ◀│  arming · sensors · cat  │
//!                      └──────────────────────────┘
//! ```
//!
//! The service is synchronous and holds listeners as `Rc` handles, so it is
//! confined to one thread.  Hosts that share it wrap the whole service in a
//! single lock: operations are read-modify-write sequences on the repository.

use std::collections::BTreeSet;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::config::{DEFAULT_CAT_CONFIDENCE_THRESHOLD, SecurityConfig};
use crate::error::ConfigError;
use crate::fsm::{AlarmEvent, AlarmStatus, ArmingStatus, Transition, transition};
use crate::sensor::{self, Sensor};

use super::commands::{CommandOutcome, SecurityCommand};
use super::events::StatusEvent;
use super::ports::{ImageClassifier, SecurityRepository, StatusListener};

/// The alarm engine.
pub struct SecurityService<R, C> {
    repository: R,
    classifier: C,
    listeners: Vec<Rc<dyn StatusListener>>,
    cat_confidence_threshold: f32,
}

impl<R, C> SecurityService<R, C>
where
    R: SecurityRepository,
    C: ImageClassifier,
{
    /// Build the service with the default 50% classifier threshold.
    pub fn new(repository: R, classifier: C) -> Self {
        Self {
            repository,
            classifier,
            listeners: Vec::new(),
            cat_confidence_threshold: DEFAULT_CAT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Build the service from a configuration, rejecting invalid values.
    pub fn with_config(
        repository: R,
        classifier: C,
        config: &SecurityConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut service = Self::new(repository, classifier);
        service.cat_confidence_threshold = config.cat_confidence_threshold;
        Ok(service)
    }

    // ── Arming ────────────────────────────────────────────────

    /// Change the arming status.
    ///
    /// Disarming always writes `NO_ALARM`.  Arming from `DISARMED` while the
    /// last image showed a cat writes `ALARM`.  Any arming resets every
    /// sensor to inactive and sends one batched `sensor_status_changed`.
    pub fn set_arming_status(&mut self, status: ArmingStatus) {
        let previous = self.repository.arming_status();
        let event = AlarmEvent::ArmingChanged {
            previous,
            requested: status,
            cat_detected: self.repository.cat_detected(),
        };
        self.apply(transition(self.repository.alarm_status(), event));

        if status.is_armed() {
            for mut sensor in self.repository.sensors() {
                sensor.set_active(false);
                self.repository.update_sensor(&sensor);
            }
            self.broadcast(StatusEvent::SensorStatusChanged);
        }

        self.repository.set_arming_status(status);
        info!("Arming status: {} -> {}", previous, status);
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Set `sensor` to `active` and update the alarm status if the flag
    /// actually flipped.  The sensor is persisted on every call.
    pub fn change_sensor_activation_status(&mut self, sensor: &mut Sensor, active: bool) {
        let was_active = sensor.is_active();
        sensor.set_active(active);

        if was_active != active {
            let event = if active {
                AlarmEvent::SensorActivated {
                    arming: self.repository.arming_status(),
                }
            } else {
                AlarmEvent::SensorDeactivated {
                    any_sensor_active: self.any_sensor_active_with(sensor),
                }
            };
            self.apply(transition(self.repository.alarm_status(), event));
        }

        self.repository.update_sensor(sensor);
        debug!("Sensor updated: {}", sensor);
    }

    // ── Camera ────────────────────────────────────────────────

    /// Classify a camera image and apply the cat rule.
    pub fn process_image(&mut self, image: &C::Image) {
        let cat = self
            .classifier
            .image_contains_cat(image, self.cat_confidence_threshold);
        debug!(
            "Classifier verdict: cat={} (threshold {:.1}%)",
            cat, self.cat_confidence_threshold
        );
        self.cat_detected(cat);
    }

    /// Rule is evaluated against the sensor set as it stands before the
    /// verdict is persisted; listeners hear the verdict last.
    fn cat_detected(&mut self, cat: bool) {
        let event = AlarmEvent::CatVerdict {
            cat,
            arming: self.repository.arming_status(),
            any_sensor_active: sensor::any_active(&self.repository.sensors()),
        };
        self.apply(transition(self.repository.alarm_status(), event));

        self.repository.set_cat_detected(cat);
        self.broadcast(StatusEvent::CatDetected(cat));
    }

    // ── Alarm status ──────────────────────────────────────────

    /// Persist `status` and notify every listener.  All rule-driven alarm
    /// changes go through here.
    pub fn set_alarm_status(&mut self, status: AlarmStatus) {
        let previous = self.repository.alarm_status();
        self.repository.set_alarm_status(status);
        info!("Alarm status: {} -> {}", previous, status);
        self.broadcast(StatusEvent::AlarmStatusChanged(status));
    }

    // ── Listeners ─────────────────────────────────────────────

    /// Register a listener.  Registering the same handle twice is a no-op.
    pub fn add_status_listener(&mut self, listener: Rc<dyn StatusListener>) {
        if self.listeners.iter().any(|l| same_listener(l, &listener)) {
            return;
        }
        self.listeners.push(listener);
        debug!("Status listener added ({} registered)", self.listeners.len());
    }

    pub fn remove_status_listener(&mut self, listener: &Rc<dyn StatusListener>) {
        self.listeners.retain(|l| !same_listener(l, listener));
        debug!("Status listener removed ({} registered)", self.listeners.len());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(&mut self, cmd: SecurityCommand<C::Image>) -> CommandOutcome {
        match cmd {
            SecurityCommand::SetArmingStatus(status) => self.set_arming_status(status),
            SecurityCommand::ChangeSensorActivation {
                name,
                sensor_type,
                active,
            } => {
                let probe = Sensor::new(name, sensor_type);
                let Some(mut sensor) = self.repository.sensors().get(&probe).cloned() else {
                    warn!("Ignoring activation for unknown sensor {}", probe);
                    return CommandOutcome::UnknownSensor;
                };
                self.change_sensor_activation_status(&mut sensor, active);
            }
            SecurityCommand::AddSensor(sensor) => self.add_sensor(sensor),
            SecurityCommand::RemoveSensor(sensor) => self.remove_sensor(&sensor),
            SecurityCommand::ProcessImage(image) => self.process_image(&image),
        }
        CommandOutcome::Applied
    }

    // ── Queries and pass-throughs ─────────────────────────────

    pub fn alarm_status(&self) -> AlarmStatus {
        self.repository.alarm_status()
    }

    pub fn arming_status(&self) -> ArmingStatus {
        self.repository.arming_status()
    }

    pub fn sensors(&self) -> BTreeSet<Sensor> {
        self.repository.sensors()
    }

    pub fn add_sensor(&mut self, sensor: Sensor) {
        self.repository.add_sensor(sensor);
    }

    pub fn remove_sensor(&mut self, sensor: &Sensor) {
        self.repository.remove_sensor(sensor);
    }

    /// Threshold passed to the classifier on every image.
    pub fn cat_confidence_threshold(&self) -> f32 {
        self.cat_confidence_threshold
    }

    /// Read-only view of the injected repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply(&mut self, t: Transition) {
        if let Transition::Set(status) = t {
            self.set_alarm_status(status);
        }
    }

    fn broadcast(&self, event: StatusEvent) {
        for listener in &self.listeners {
            event.deliver(&**listener);
        }
    }

    /// Whether any sensor is active once `changed` (not yet persisted) is
    /// taken at its new value.
    fn any_sensor_active_with(&self, changed: &Sensor) -> bool {
        changed.is_active()
            || self
                .repository
                .sensors()
                .iter()
                .filter(|s| !s.same_identity(changed))
                .any(Sensor::is_active)
    }
}

/// Identity comparison on the data pointer only; vtable addresses are not
/// stable across codegen units.
fn same_listener(a: &Rc<dyn StatusListener>, b: &Rc<dyn StatusListener>) -> bool {
    Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}
