//! Calendar timestamp handle.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::{NodeId, ValueError};

/// A mutable point in time, shared by handle.
///
/// The only contract of a timestamp is the instant it carries; the cloner
/// treats it as an atom and builds a new handle with the same instant.
#[derive(Clone)]
pub struct Timestamp(Rc<Cell<DateTime<Utc>>>);

impl Timestamp {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(Rc::new(Cell::new(instant)))
    }

    /// Builds a timestamp from milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TimestampOutOfRange`] if `millis` is outside the
    /// range chrono can represent.
    pub fn from_millis(millis: i64) -> Result<Self, ValueError> {
        DateTime::from_timestamp_millis(millis)
            .map(Self::new)
            .ok_or(ValueError::TimestampOutOfRange(millis))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0.get()
    }

    pub fn set_instant(&self, instant: DateTime<Utc>) {
        self.0.set(instant);
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.0.get().timestamp_millis()
    }

    /// Returns `true` when both handles point at the same timestamp.
    pub fn ptr_eq(&self, other: &Timestamp) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::of(&self.0)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.instant().to_rfc3339())
    }
}
