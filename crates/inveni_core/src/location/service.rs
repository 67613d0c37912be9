//! Platform location collaborator contract and message channel.
//!
//! # Responsibility
//! - Define what the core asks of the platform location service.
//! - Carry asynchronous results back to the owning thread as messages.
//!
//! # Invariants
//! - Platform adapters never touch provider state directly; they post.
//! - `LocationSender` is `Send + Clone` and may be used from any thread.

use crate::model::event::Coordinate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver, Sender};

/// Authorization state reported by (or requested from) the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Requested,
    Granted,
    Denied,
}

/// Location failures surfaced to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The user or system refused location access.
    Denied,
    /// The platform reported a failure for a fix request.
    Unavailable(String),
    /// No fix and no failure arrived within the configured timeout.
    Timeout,
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied => write!(f, "location access denied"),
            Self::Unavailable(reason) => write!(f, "location unavailable: {reason}"),
            Self::Timeout => write!(f, "timed out waiting for a location fix"),
        }
    }
}

impl Error for LocationError {}

/// Message posted by a platform adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationMessage {
    AuthorizationChanged(AuthorizationStatus),
    FixDelivered(Coordinate),
    FixFailed(LocationError),
}

/// Requests the core issues to the platform. Both calls are fire-and-forget;
/// results come back through the `LocationSender` handed to the adapter.
pub trait LocationService {
    fn request_authorization(&mut self);
    fn request_one_shot_fix(&mut self);
}

/// Cloneable posting handle for platform adapters.
#[derive(Debug, Clone)]
pub struct LocationSender {
    tx: Sender<LocationMessage>,
}

impl LocationSender {
    /// Posts one message. Returns `false` when the provider is gone.
    pub fn post(&self, message: LocationMessage) -> bool {
        self.tx.send(message).is_ok()
    }

    pub fn deliver_fix(&self, coordinate: Coordinate) -> bool {
        self.post(LocationMessage::FixDelivered(coordinate))
    }

    pub fn fail_fix(&self, error: LocationError) -> bool {
        self.post(LocationMessage::FixFailed(error))
    }

    pub fn authorization_changed(&self, status: AuthorizationStatus) -> bool {
        self.post(LocationMessage::AuthorizationChanged(status))
    }
}

/// Receiving end, owned by `LocationProvider`.
#[derive(Debug)]
pub struct LocationInbox {
    pub(crate) rx: Receiver<LocationMessage>,
}

/// Creates a connected sender/inbox pair.
pub fn location_channel() -> (LocationSender, LocationInbox) {
    let (tx, rx) = mpsc::channel();
    (LocationSender { tx }, LocationInbox { rx })
}
