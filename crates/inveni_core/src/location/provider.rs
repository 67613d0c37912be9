//! Last-known device location, fed by queued platform messages.
//!
//! # Responsibility
//! - Forward authorization and one-shot fix requests to the platform.
//! - Apply queued results on the owning thread and notify subscribers.
//! - Turn a fix request that never resolves into `LocationError::Timeout`.
//!
//! # Invariants
//! - `current_location` is last-write-wins; no history is kept.
//! - Once a fix is known the phase stays `HasFix`.
//! - Requests never block; nothing is retried.

use crate::location::service::{
    AuthorizationStatus, LocationError, LocationInbox, LocationMessage, LocationService,
};
use crate::model::event::Coordinate;
use crate::subscription::{ListenerSet, SubscriptionToken};
use log::{debug, info, warn};
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

/// Coarse provider state as seen by the creation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPhase {
    Unauthorized,
    AwaitingFix,
    HasFix,
}

/// Notification delivered to location subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Authorization(AuthorizationStatus),
    Fix(Coordinate),
    Error(LocationError),
}

type LocationListener = dyn FnMut(&LocationUpdate);

pub struct LocationProvider<S: LocationService> {
    service: S,
    inbox: LocationInbox,
    fix_timeout: Duration,
    current_location: Option<Coordinate>,
    authorization: AuthorizationStatus,
    pending_fix_since: Option<Instant>,
    last_error: Option<LocationError>,
    listeners: ListenerSet<LocationListener>,
}

impl<S: LocationService> LocationProvider<S> {
    pub fn new(service: S, inbox: LocationInbox, fix_timeout: Duration) -> Self {
        Self {
            service,
            inbox,
            fix_timeout,
            current_location: None,
            authorization: AuthorizationStatus::NotDetermined,
            pending_fix_since: None,
            last_error: None,
            listeners: ListenerSet::default(),
        }
    }

    /// Asks the platform for location permission.
    ///
    /// A denial arrives later as a message; until then (and forever, if the
    /// platform stays silent) `current_location` remains `None`.
    pub fn request_authorization(&mut self) {
        if self.authorization == AuthorizationStatus::NotDetermined {
            self.authorization = AuthorizationStatus::Requested;
        }
        debug!(
            "event=location_auth_request module=location status=ok authorization={:?}",
            self.authorization
        );
        self.service.request_authorization();
    }

    /// Asks the platform for one fix and starts the timeout clock at `now`.
    ///
    /// `now` must come from the same clock later passed to `pump`. After a
    /// denial the request is still forwarded but no timer is armed, so
    /// `last_error` stays `Denied`.
    pub fn request_current_location(&mut self, now: Instant) {
        if self.authorization == AuthorizationStatus::Denied {
            debug!(
                "event=location_fix_request module=location status=skipped_timer reason=denied"
            );
        } else {
            self.pending_fix_since = Some(now);
            debug!("event=location_fix_request module=location status=ok");
        }
        self.service.request_one_shot_fix();
    }

    pub fn current_location(&self) -> Option<Coordinate> {
        self.current_location
    }

    pub fn authorization(&self) -> AuthorizationStatus {
        self.authorization
    }

    pub fn last_error(&self) -> Option<&LocationError> {
        self.last_error.as_ref()
    }

    pub fn is_fix_pending(&self) -> bool {
        self.pending_fix_since.is_some()
    }

    pub fn phase(&self) -> ProviderPhase {
        if self.current_location.is_some() {
            ProviderPhase::HasFix
        } else if self.authorization == AuthorizationStatus::Granted {
            ProviderPhase::AwaitingFix
        } else {
            ProviderPhase::Unauthorized
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Applies every queued message in order, then checks the fix timeout.
    ///
    /// Returns the number of messages applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        loop {
            match self.inbox.rx.try_recv() {
                Ok(message) => {
                    self.apply(message);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if let Some(started) = self.pending_fix_since {
            if now.saturating_duration_since(started) >= self.fix_timeout {
                self.pending_fix_since = None;
                warn!(
                    "event=location_fix module=location status=error error=timeout timeout_ms={}",
                    self.fix_timeout.as_millis()
                );
                self.record_error(LocationError::Timeout);
            }
        }

        applied
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionToken
    where
        F: FnMut(&LocationUpdate) + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.listeners.remove(token)
    }

    fn apply(&mut self, message: LocationMessage) {
        match message {
            LocationMessage::AuthorizationChanged(status) => {
                self.authorization = status;
                info!(
                    "event=location_auth module=location status=ok authorization={:?}",
                    status
                );
                self.notify(&LocationUpdate::Authorization(status));
                if status == AuthorizationStatus::Denied {
                    self.pending_fix_since = None;
                    self.record_error(LocationError::Denied);
                }
            }
            LocationMessage::FixDelivered(coordinate) => {
                self.pending_fix_since = None;
                self.current_location = Some(coordinate);
                self.last_error = None;
                info!(
                    "event=location_fix module=location status=ok coordinate={}",
                    coordinate
                );
                self.notify(&LocationUpdate::Fix(coordinate));
            }
            LocationMessage::FixFailed(error) => {
                self.pending_fix_since = None;
                warn!(
                    "event=location_fix module=location status=error error={}",
                    error
                );
                self.record_error(error);
            }
        }
    }

    fn record_error(&mut self, error: LocationError) {
        self.last_error = Some(error.clone());
        self.notify(&LocationUpdate::Error(error));
    }

    fn notify(&mut self, update: &LocationUpdate) {
        for listener in self.listeners.values_mut() {
            listener(update);
        }
    }
}
