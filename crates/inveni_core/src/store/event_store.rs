//! In-memory event store with synchronous change notification.
//!
//! # Responsibility
//! - Own the ordered event collection and the map focus coordinate.
//! - Derive the projections the map and list views render from.
//! - Notify subscribers after every successful mutation.
//!
//! # Invariants
//! - Events are append-only; insertion order is creation order.
//! - No two stored events share an id.
//! - A rejected `add_event` leaves state untouched and notifies nobody.
//! - Subscribers run on the caller's thread, after the mutation completes.

use crate::model::event::{Coordinate, Event, EventId, EventValidationError};
use crate::subscription::{ListenerSet, SubscriptionToken};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Marker identifier shared by every event pin.
pub const EVENT_PIN_MARKER: &str = "PinEvento";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(EventValidationError),
    DuplicateId(EventId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "event already stored: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<EventValidationError> for StoreError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Mutation delivered to store subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    EventAdded { event_id: EventId, index: usize },
}

/// One pin on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapAnnotation {
    pub event_id: EventId,
    pub title: String,
    pub coordinate: Coordinate,
}

type StoreListener = dyn FnMut(&StoreChange, &EventStore);

/// Ordered, append-only event collection.
///
/// Construct one per session and hand it to every consumer explicitly.
#[derive(Default)]
pub struct EventStore {
    events: Vec<Event>,
    focus_coordinate: Option<Coordinate>,
    listeners: ListenerSet<StoreListener>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one event and moves the focus coordinate onto it.
    ///
    /// # Errors
    /// - `StoreError::Validation` when `event.validate()` fails.
    /// - `StoreError::DuplicateId` when an event with the same id is stored.
    pub fn add_event(&mut self, event: Event) -> StoreResult<EventId> {
        if let Err(err) = event.validate() {
            warn!(
                "event=event_add module=store status=rejected reason=validation error={}",
                err
            );
            return Err(err.into());
        }
        if self.get_event(event.id).is_some() {
            warn!(
                "event=event_add module=store status=rejected reason=duplicate_id event_id={}",
                event.id
            );
            return Err(StoreError::DuplicateId(event.id));
        }

        let event_id = event.id;
        let index = self.events.len();
        self.focus_coordinate = Some(event.coordinates);
        info!(
            "event=event_add module=store status=ok event_id={} index={} focus={}",
            event_id, index, event.coordinates
        );
        self.events.push(event);

        self.notify(StoreChange::EventAdded { event_id, index });
        Ok(event_id)
    }

    /// Returns the full ordered sequence.
    ///
    /// The slice is a consistent snapshot for as long as it is borrowed;
    /// use `subscribe` to observe later mutations.
    pub fn list_events(&self) -> &[Event] {
        &self.events
    }

    /// Pairs every title with the shared pin marker, in store order.
    pub fn names_and_marker_styles(&self) -> Vec<(String, &'static str)> {
        self.events
            .iter()
            .map(|event| (event.title.clone(), EVENT_PIN_MARKER))
            .collect()
    }

    /// Pins for the map surface, in store order.
    pub fn map_annotations(&self) -> Vec<MapAnnotation> {
        self.events
            .iter()
            .map(|event| MapAnnotation {
                event_id: event.id,
                title: event.title.clone(),
                coordinate: event.coordinates,
            })
            .collect()
    }

    pub fn focus_coordinate(&self) -> Option<Coordinate> {
        self.focus_coordinate
    }

    /// Where the map should start: the newest event, else `fallback`.
    pub fn initial_map_center(&self, fallback: Coordinate) -> Coordinate {
        self.events
            .last()
            .map(|event| event.coordinates)
            .unwrap_or(fallback)
    }

    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Registers a listener invoked after each successful mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionToken
    where
        F: FnMut(&StoreChange, &EventStore) + 'static,
    {
        let token = self.listeners.insert(Box::new(listener));
        debug!(
            "event=subscribe module=store status=ok token={} listeners={}",
            token,
            self.listeners.len()
        );
        token
    }

    /// Removes a listener. Returns `false` for unknown or already removed tokens.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let removed = self.listeners.remove(token);
        debug!(
            "event=unsubscribe module=store status={} token={}",
            if removed { "ok" } else { "unknown_token" },
            token
        );
        removed
    }

    fn notify(&mut self, change: StoreChange) {
        // Listeners get `&EventStore`, so the table is detached while they run.
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.values_mut() {
            listener(&change, self);
        }
        self.listeners = listeners;
    }
}
