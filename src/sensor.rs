//! Sensor data entity.
//!
//! A [`Sensor`] is a named, typed boolean input.  Its identity is the pair
//! `(name, sensor_type)`; the `active` flag is state, not identity, so two
//! values describing the same physical sensor compare equal regardless of
//! whether one of them has been toggled.  Repositories key their sensor set
//! on this identity, which makes duplicates collapse.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Kind of physical input a sensor is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => write!(f, "door"),
            Self::Window => write!(f, "window"),
            Self::Motion => write!(f, "motion"),
        }
    }
}

/// A door, window or motion sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// New sensors start inactive.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// `true` if `other` refers to the same physical sensor.
    pub fn same_identity(&self, other: &Sensor) -> bool {
        self.sensor_type == other.sensor_type && self.name == other.name
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.name,
            self.sensor_type,
            if self.active { "active" } else { "inactive" }
        )
    }
}

// Equality, hashing and ordering all ignore `active`.

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sensor_type.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
    }
}

/// `true` if any sensor in the collection is currently active.
pub fn any_active<'a>(sensors: impl IntoIterator<Item = &'a Sensor>) -> bool {
    sensors.into_iter().any(Sensor::is_active)
}
