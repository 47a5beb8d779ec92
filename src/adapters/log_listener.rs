//! Log-based status listener adapter.
//!
//! Implements [`StatusListener`] by writing every notification to the `log`
//! facade.  A display panel or push-notification adapter would implement
//! the same trait.

use log::{info, warn};

use crate::app::ports::StatusListener;
use crate::fsm::AlarmStatus;

/// Adapter that logs every status notification.
#[derive(Debug, Default)]
pub struct LogStatusListener;

impl LogStatusListener {
    pub fn new() -> Self {
        Self
    }
}

impl StatusListener for LogStatusListener {
    fn notify(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!("ALARM | {} ({})", status, status.description()),
            _ => info!("ALARM | {} ({})", status, status.description()),
        }
    }

    fn sensor_status_changed(&self) {
        info!("SENSORS | status changed");
    }

    fn cat_detected(&self, cat: bool) {
        if cat {
            info!("CAMERA | cat detected");
        } else {
            info!("CAMERA | no cat");
        }
    }
}
