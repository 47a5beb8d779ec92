//! Pure alarm transition rules.
//!
//! Each rule receives the current [`AlarmStatus`] plus the inputs it needs,
//! already read by the caller, and answers with a [`Transition`].  A
//! `Transition::Set` is a *write*: the service persists it and notifies
//! listeners even when the target equals the current status (disarming an
//! already quiet system still produces exactly one `NO_ALARM` write).
//! `Transition::Stay` means no write at all.

use super::{AlarmStatus, ArmingStatus};

/// An input to the alarm state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEvent {
    /// A sensor flipped from inactive to active.
    SensorActivated { arming: ArmingStatus },

    /// A sensor flipped from active to inactive.  `any_sensor_active`
    /// reflects the sensor set *after* the flip.
    SensorDeactivated { any_sensor_active: bool },

    /// The camera classifier produced a verdict.  `any_sensor_active` is the
    /// sensor state at the time the image was processed.
    CatVerdict {
        cat: bool,
        arming: ArmingStatus,
        any_sensor_active: bool,
    },

    /// The arming status is being changed from `previous` to `requested`.
    /// `cat_detected` is the last persisted classifier verdict.
    ArmingChanged {
        previous: ArmingStatus,
        requested: ArmingStatus,
        cat_detected: bool,
    },
}

/// Outcome of applying an [`AlarmEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Leave the alarm status untouched; nothing is written.
    Stay,
    /// Write this alarm status.
    Set(AlarmStatus),
}

impl Transition {
    /// Alarm status after the transition is applied to `current`.
    pub fn resolve(self, current: AlarmStatus) -> AlarmStatus {
        match self {
            Self::Stay => current,
            Self::Set(next) => next,
        }
    }

    pub fn is_write(self) -> bool {
        matches!(self, Self::Set(_))
    }
}

/// Decide what an event does to the alarm status.
pub fn transition(current: AlarmStatus, event: AlarmEvent) -> Transition {
    match event {
        AlarmEvent::SensorActivated { arming } => {
            if !arming.is_armed() {
                return Transition::Stay;
            }
            match current {
                AlarmStatus::NoAlarm => Transition::Set(AlarmStatus::PendingAlarm),
                AlarmStatus::PendingAlarm => Transition::Set(AlarmStatus::Alarm),
                AlarmStatus::Alarm => Transition::Stay,
            }
        }

        AlarmEvent::SensorDeactivated { any_sensor_active } => {
            if current == AlarmStatus::PendingAlarm && !any_sensor_active {
                Transition::Set(AlarmStatus::NoAlarm)
            } else {
                Transition::Stay
            }
        }

        // A cat alone only matters when armed-home; without a cat (or when
        // away) a quiet sensor set clears whatever was raised.
        AlarmEvent::CatVerdict {
            cat,
            arming,
            any_sensor_active,
        } => {
            if cat && arming == ArmingStatus::ArmedHome {
                Transition::Set(AlarmStatus::Alarm)
            } else if !any_sensor_active {
                Transition::Set(AlarmStatus::NoAlarm)
            } else {
                Transition::Stay
            }
        }

        AlarmEvent::ArmingChanged {
            previous,
            requested,
            cat_detected,
        } => {
            if requested == ArmingStatus::Disarmed {
                Transition::Set(AlarmStatus::NoAlarm)
            } else if previous == ArmingStatus::Disarmed && cat_detected {
                Transition::Set(AlarmStatus::Alarm)
            } else {
                Transition::Stay
            }
        }
    }
}

/// Alarm status that results from applying `event` in state `current`.
pub fn next_alarm_status(current: AlarmStatus, event: AlarmEvent) -> AlarmStatus {
    transition(current, event).resolve(current)
}
