//! Outbound status events.
//!
//! The [`SecurityService`](super::service::SecurityService) describes every
//! listener notification as a [`StatusEvent`] and fans it out through one
//! path, [`StatusEvent::deliver`].

use crate::fsm::AlarmStatus;

use super::ports::StatusListener;

/// Notifications sent to every registered [`StatusListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// The alarm status was written (possibly to the same value).
    AlarmStatusChanged(AlarmStatus),

    /// Sensors were reset or otherwise changed in bulk.
    SensorStatusChanged,

    /// Verdict of the latest processed camera image.
    CatDetected(bool),
}

impl StatusEvent {
    /// Invoke the listener method matching this event.
    pub fn deliver(self, listener: &dyn StatusListener) {
        match self {
            Self::AlarmStatusChanged(status) => listener.notify(status),
            Self::SensorStatusChanged => listener.sensor_status_changed(),
            Self::CatDetected(cat) => listener.cat_detected(cat),
        }
    }
}
