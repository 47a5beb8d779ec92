//! Catpoint security panel library.
//!
//! The alarm engine ([`app::service::SecurityService`]) decides the alarm
//! status from arming changes, sensor activity and camera cat detection.
//! Storage, classification and status displays are reached through the
//! port traits in [`app::ports`]; [`adapters`] provides in-process
//! implementations of each.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod sensor;

pub use app::service::SecurityService;
pub use error::{Error, Result};
pub use fsm::{AlarmStatus, ArmingStatus};
pub use sensor::{Sensor, SensorType};
