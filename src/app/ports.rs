//! Port traits: the hexagonal boundary between the alarm engine and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (storage, camera classifier, status displays) implement
//! these traits.  The [`SecurityService`](super::service::SecurityService)
//! owns its repository and classifier through generics and keeps listeners
//! as shared handles, so the domain core never touches storage or UI code.
//!
//! Every port call is infallible from the engine's point of view.  If an
//! adapter can fail (disk full, display gone) it deals with that itself;
//! the engine neither retries nor rolls back.

use std::collections::BTreeSet;

use crate::fsm::{AlarmStatus, ArmingStatus};
use crate::sensor::Sensor;

// ───────────────────────────────────────────────────────────────
// Repository port (driven adapter: domain ↔ persistent state)
// ───────────────────────────────────────────────────────────────

/// Authoritative store of the panel state.
///
/// The engine never caches anything read from here; each operation re-reads
/// what it needs.  Sensors are keyed by identity (`name`, `type`), see
/// [`Sensor`].
pub trait SecurityRepository {
    fn alarm_status(&self) -> AlarmStatus;

    fn set_alarm_status(&mut self, status: AlarmStatus);

    fn arming_status(&self) -> ArmingStatus;

    fn set_arming_status(&mut self, status: ArmingStatus);

    /// Last classifier verdict.
    fn cat_detected(&self) -> bool;

    fn set_cat_detected(&mut self, cat: bool);

    /// Snapshot of every known sensor.
    fn sensors(&self) -> BTreeSet<Sensor>;

    fn add_sensor(&mut self, sensor: Sensor);

    fn remove_sensor(&mut self, sensor: &Sensor);

    /// Upsert by identity: replaces the stored sensor with the same
    /// `(name, type)` or inserts it if absent.
    fn update_sensor(&mut self, sensor: &Sensor);
}

// ───────────────────────────────────────────────────────────────
// Image classifier port (driven adapter: camera → domain)
// ───────────────────────────────────────────────────────────────

/// Decides whether a camera image shows a cat.
///
/// The image representation belongs to the adapter; the engine only passes
/// it through.
pub trait ImageClassifier {
    type Image;

    /// `confidence_threshold` is a percentage (0–100).  Returns `true` when
    /// the classifier is at least that confident a cat is present.
    fn image_contains_cat(&mut self, image: &Self::Image, confidence_threshold: f32) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Status listener port (driven adapter: domain → displays / logs)
// ───────────────────────────────────────────────────────────────

/// Observer of panel state changes.  Fire-and-forget: no return value, no
/// error channel.  Methods take `&self` because the service holds listeners
/// as shared handles; implementations needing state use interior mutability.
pub trait StatusListener {
    /// The alarm status was written.
    fn notify(&self, status: AlarmStatus);

    /// One or more sensors changed state.
    fn sensor_status_changed(&self);

    /// A camera image was classified.
    fn cat_detected(&self, cat: bool);
}
