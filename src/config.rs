//! Security panel configuration.
//!
//! Values can be supplied as JSON by the host application; anything missing
//! falls back to [`SecurityConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fsm::{AlarmStatus, ArmingStatus};

/// Confidence threshold (percent) handed to the image classifier.
pub const DEFAULT_CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Core panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Minimum classifier confidence (0-100%) for an image to count as a cat
    pub cat_confidence_threshold: f32,
    /// Arming status a fresh repository starts in
    pub initial_arming_status: ArmingStatus,
    /// Alarm status a fresh repository starts in
    pub initial_alarm_status: AlarmStatus,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cat_confidence_threshold: DEFAULT_CAT_CONFIDENCE_THRESHOLD,
            initial_arming_status: ArmingStatus::Disarmed,
            initial_alarm_status: AlarmStatus::NoAlarm,
        }
    }
}

impl SecurityConfig {
    /// Reject out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.cat_confidence_threshold) {
            return Err(ConfigError::ValidationFailed(
                "cat_confidence_threshold must be 0.0–100.0",
            ));
        }
        if self.initial_arming_status == ArmingStatus::Disarmed
            && self.initial_alarm_status != AlarmStatus::NoAlarm
        {
            return Err(ConfigError::ValidationFailed(
                "a disarmed panel must start with NO_ALARM",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}
