//! Alarm state machine.
//!
//! ```text
//!                sensor activated (armed)        sensor activated (armed)
//!   NO_ALARM ─────────────────────────▶ PENDING_ALARM ─────────────────▶ ALARM
//!      ▲                                     │
//!      └────────[all sensors inactive]───────┘
//!
//!   any ──[disarm]──────────────────────▶ NO_ALARM
//!   any ──[cat + ARMED_HOME]────────────▶ ALARM
//!   any ──[no cat, no active sensor]────▶ NO_ALARM
//!   any ──[arm from DISARMED, cat seen]─▶ ALARM
//! ```
//!
//! The transition rules live in [`rules`] as a pure function over
//! [`AlarmEvent`]s.  They take every input as an argument and touch no
//! repository, so they can be exercised without any adapter at all.  The
//! [`SecurityService`](crate::app::service::SecurityService) gathers the
//! inputs, asks the rules what to do, and performs the writes.

pub mod rules;

use core::fmt;

use serde::{Deserialize, Serialize};

pub use rules::{AlarmEvent, Transition, next_alarm_status, transition};

// ---------------------------------------------------------------------------
// Alarm status
// ---------------------------------------------------------------------------

/// Current alert severity.  Variants are declared in ascending severity so
/// the derived `Ord` can be used for reasoning ("at least pending").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    pub const ALL: [AlarmStatus; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];

    /// Short human-readable description, as a panel display would show it.
    pub fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAlarm => write!(f, "NO_ALARM"),
            Self::PendingAlarm => write!(f, "PENDING_ALARM"),
            Self::Alarm => write!(f, "ALARM"),
        }
    }
}

// ---------------------------------------------------------------------------
// Arming status
// ---------------------------------------------------------------------------

/// Whether, and how, the system is monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub const ALL: [ArmingStatus; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    /// The two armed variants.
    pub const ARMED: [ArmingStatus; 2] = [Self::ArmedHome, Self::ArmedAway];

    pub fn is_armed(self) -> bool {
        self != Self::Disarmed
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarmed => write!(f, "DISARMED"),
            Self::ArmedHome => write!(f, "ARMED_HOME"),
            Self::ArmedAway => write!(f, "ARMED_AWAY"),
        }
    }
}
