//! Application core: the security panel's decision engine, zero I/O.
//!
//! This module contains the business rules for the Catpoint panel:
//! arming, sensor activation and camera-driven cat detection.  All
//! interaction with storage, the camera and displays happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! with fake adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
