//! In-memory repository adapter.
//!
//! Implements [`SecurityRepository`] over plain fields.  The whole state can
//! be captured as a [`RepositorySnapshot`] and written out as JSON, which is
//! how a host keeps the panel state across restarts without the engine
//! knowing anything about storage.

use std::collections::BTreeSet;

use log::info;
use serde::{Deserialize, Serialize};

use crate::app::ports::SecurityRepository;
use crate::config::SecurityConfig;
use crate::error::SnapshotError;
use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensor::Sensor;

/// Serializable copy of everything the repository holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySnapshot {
    pub alarm_status: AlarmStatus,
    pub arming_status: ArmingStatus,
    pub cat_detected: bool,
    pub sensors: Vec<Sensor>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    cat_detected: bool,
    sensors: BTreeSet<Sensor>,
}

impl InMemoryRepository {
    /// Empty, disarmed, quiet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the initial statuses from configuration.
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            alarm_status: config.initial_alarm_status,
            arming_status: config.initial_arming_status,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> RepositorySnapshot {
        RepositorySnapshot {
            alarm_status: self.alarm_status,
            arming_status: self.arming_status,
            cat_detected: self.cat_detected,
            sensors: self.sensors.iter().cloned().collect(),
        }
    }

    /// Rebuild from a snapshot.  Duplicate sensors collapse, last one wins.
    pub fn restore(snapshot: RepositorySnapshot) -> Self {
        let mut sensors = BTreeSet::new();
        for sensor in snapshot.sensors {
            sensors.replace(sensor);
        }
        Self {
            alarm_status: snapshot.alarm_status,
            arming_status: snapshot.arming_status,
            cat_detected: snapshot.cat_detected,
            sensors,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(SnapshotError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: RepositorySnapshot =
            serde_json::from_str(json).map_err(SnapshotError::Decode)?;
        info!(
            "Repository restored: {} sensors, {} / {}",
            snapshot.sensors.len(),
            snapshot.arming_status,
            snapshot.alarm_status
        );
        Ok(Self::restore(snapshot))
    }
}

impl SecurityRepository for InMemoryRepository {
    fn alarm_status(&self) -> AlarmStatus {
        self.alarm_status
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) {
        self.alarm_status = status;
    }

    fn arming_status(&self) -> ArmingStatus {
        self.arming_status
    }

    fn set_arming_status(&mut self, status: ArmingStatus) {
        self.arming_status = status;
    }

    fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    fn set_cat_detected(&mut self, cat: bool) {
        self.cat_detected = cat;
    }

    fn sensors(&self) -> BTreeSet<Sensor> {
        self.sensors.clone()
    }

    fn add_sensor(&mut self, sensor: Sensor) {
        self.sensors.insert(sensor);
    }

    fn remove_sensor(&mut self, sensor: &Sensor) {
        self.sensors.remove(sensor);
    }

    fn update_sensor(&mut self, sensor: &Sensor) {
        self.sensors.replace(sensor.clone());
    }
}
