//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical record rendered as a map pin and detail view.
//! - Provide the draft shape filled in by the creation form.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `Coordinate` carries no range checks; `is_valid()` is advisory.
//! - A valid event has a non-nil id and a non-blank title.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every event.
pub type EventId = Uuid;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Value of an untouched creation form before any fix is applied.
    pub const ORIGIN: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns whether both components are finite and inside WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5},{:.5})", self.latitude, self.longitude)
    }
}

/// Validation errors for event invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    NilId,
    BlankTitle,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "event id must not be nil"),
            Self::BlankTitle => write!(f, "event title must not be blank"),
        }
    }
}

impl Error for EventValidationError {}

/// User-created record shown as a map pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned at creation, never reassigned.
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// Human-readable place label.
    pub location: String,
    /// Unix epoch milliseconds.
    pub date_epoch_ms: i64,
    pub coordinates: Coordinate,
}

impl Event {
    /// Creates an event with a generated id, dated now, with an empty
    /// location label.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        coordinates: Coordinate,
    ) -> Self {
        Self::build(Uuid::new_v4(), title.into(), description.into(), coordinates)
    }

    /// Creates an event with a caller-provided id.
    ///
    /// Used by import and test paths where identity already exists.
    ///
    /// # Errors
    /// - `EventValidationError::NilId` when `id` is nil.
    pub fn with_id(
        id: EventId,
        title: impl Into<String>,
        description: impl Into<String>,
        coordinates: Coordinate,
    ) -> Result<Self, EventValidationError> {
        if id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        Ok(Self::build(id, title.into(), description.into(), coordinates))
    }

    fn build(id: EventId, title: String, description: String, coordinates: Coordinate) -> Self {
        Self {
            id,
            title,
            description,
            location: String::new(),
            date_epoch_ms: now_epoch_ms(),
            coordinates,
        }
    }

    /// Checks identity and title invariants.
    ///
    /// Coordinates are not range-checked here.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_nil() {
            return Err(EventValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(EventValidationError::BlankTitle);
        }
        Ok(())
    }
}

/// Form input for the creation flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    /// `None` means "now" at the moment the draft is turned into an event.
    pub date_epoch_ms: Option<i64>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            date_epoch_ms: None,
        }
    }

    pub fn on_date(mut self, date_epoch_ms: i64) -> Self {
        self.date_epoch_ms = Some(date_epoch_ms);
        self
    }
}

/// Current wall clock in epoch milliseconds. Clamps to 0 before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
