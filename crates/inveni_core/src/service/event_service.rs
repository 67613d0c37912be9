//! Event creation use-case service.
//!
//! # Responsibility
//! - Run the "new event" flow: request a fix, then save the form.
//! - Own the session's store and location provider on one thread.
//!
//! # Invariants
//! - Events only enter the store through `EventStore::add_event`.
//! - A missing fix never blocks saving; the event keeps `Coordinate::ORIGIN`.

use crate::config::{ConfigError, CoreConfig};
use crate::location::provider::LocationProvider;
use crate::location::service::{LocationInbox, LocationService};
use crate::model::event::{Coordinate, Event, EventDraft, EventId};
use crate::store::event_store::{EventStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Place label attached to events created from the device fix.
pub const CURRENT_LOCATION_LABEL: &str = "Current location";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Session-level wrapper around the store and location provider.
pub struct EventService<L: LocationService> {
    store: EventStore,
    location: LocationProvider<L>,
    default_center: Coordinate,
}

impl<L: LocationService> EventService<L> {
    /// Builds a session from a config.
    ///
    /// # Errors
    /// - Any `ConfigError` from `CoreConfig::validate`; hand-built configs get
    ///   the same checks as parsed ones.
    pub fn new(
        service: L,
        inbox: LocationInbox,
        config: &CoreConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: EventStore::new(),
            location: LocationProvider::new(service, inbox, config.fix_timeout()),
            default_center: config.default_center,
        })
    }

    /// Opening the creation form: ask for permission and one fix.
    ///
    /// `now` starts the fix timeout and must share a clock with `pump_location`.
    pub fn begin_creation(&mut self, now: Instant) {
        self.location.request_authorization();
        self.location.request_current_location(now);
    }

    /// Applies queued location messages. See `LocationProvider::pump`.
    pub fn pump_location(&mut self, now: Instant) -> usize {
        self.location.pump(now)
    }

    /// Saves the form as a new event.
    ///
    /// # Contract
    /// - With a known fix: `coordinates = fix`, `location = CURRENT_LOCATION_LABEL`.
    /// - Without one: `coordinates = Coordinate::ORIGIN`, empty location.
    /// - `date_epoch_ms = None` in the draft means now.
    pub fn create_event(&mut self, draft: EventDraft) -> ServiceResult<EventId> {
        let mut event = Event::new(draft.title, draft.description, Coordinate::ORIGIN);
        if let Some(date) = draft.date_epoch_ms {
            event.date_epoch_ms = date;
        }

        match self.location.current_location() {
            Some(fix) => {
                event.coordinates = fix;
                event.location = CURRENT_LOCATION_LABEL.to_string();
            }
            None => {
                warn!(
                    "event=event_create module=service status=degraded reason=no_fix phase={:?}",
                    self.location.phase()
                );
            }
        }

        let id = self.store.add_event(event)?;
        info!(
            "event=event_create module=service status=ok event_id={} total={}",
            id,
            self.store.len()
        );
        Ok(id)
    }

    /// Where the map opens: newest event, else the configured default.
    pub fn map_center(&self) -> Coordinate {
        self.store.initial_map_center(self.default_center)
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EventStore {
        &mut self.store
    }

    pub fn location(&self) -> &LocationProvider<L> {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut LocationProvider<L> {
        &mut self.location
    }
}

#[cfg(test)]
mod tests {
    use super::{EventService, ServiceError, CURRENT_LOCATION_LABEL};
    use crate::config::{ConfigError, CoreConfig, DEFAULT_MAP_CENTER};
    use crate::location::service::location_channel;
    use crate::location::simulated::SimulatedLocationService;
    use crate::model::event::{Coordinate, EventDraft, EventValidationError};
    use crate::store::event_store::StoreError;
    use std::time::Instant;

    #[test]
    fn save_without_fix_keeps_origin() {
        let (sender, inbox) = location_channel();
        let mut service = EventService::new(
            SimulatedLocationService::denied(sender),
            inbox,
            &CoreConfig::default(),
        )
        .expect("default config is valid");
        service.begin_creation(Instant::now());
        service.pump_location(Instant::now());

        let id = service
            .create_event(EventDraft::new("Picnic", "bring food"))
            .expect("save should succeed without fix");
        let event = service.store().get_event(id).expect("event stored");
        assert_eq!(event.coordinates, Coordinate::ORIGIN);
        assert!(event.location.is_empty());
    }

    #[test]
    fn save_with_fix_uses_fix_and_label() {
        let (sender, inbox) = location_channel();
        let location =
            SimulatedLocationService::granted(sender).with_fix(Coordinate::new(45.46, 9.19));
        let mut service = EventService::new(location, inbox, &CoreConfig::default())
            .expect("default config is valid");
        service.begin_creation(Instant::now());
        service.pump_location(Instant::now());

        let id = service
            .create_event(EventDraft::new("Aperitivo", "").on_date(1_700_000_000_000))
            .expect("save should succeed");
        let event = service.store().get_event(id).expect("event stored");
        assert_eq!(event.coordinates, Coordinate::new(45.46, 9.19));
        assert_eq!(event.location, CURRENT_LOCATION_LABEL);
        assert_eq!(event.date_epoch_ms, 1_700_000_000_000);
        assert_eq!(service.map_center(), Coordinate::new(45.46, 9.19));
    }

    #[test]
    fn blank_title_is_reported_as_store_error() {
        let (sender, inbox) = location_channel();
        let mut service = EventService::new(
            SimulatedLocationService::granted(sender),
            inbox,
            &CoreConfig::default(),
        )
        .expect("default config is valid");
        let err = service
            .create_event(EventDraft::new("   ", ""))
            .expect_err("blank title must fail");
        assert_eq!(
            err,
            ServiceError::Store(StoreError::Validation(EventValidationError::BlankTitle))
        );
        assert_eq!(service.map_center(), DEFAULT_MAP_CENTER);
    }

    #[test]
    fn hand_built_invalid_config_is_rejected() {
        let (sender, inbox) = location_channel();
        let config = CoreConfig {
            fix_timeout_ms: 0,
            ..CoreConfig::default()
        };
        let result = EventService::new(SimulatedLocationService::granted(sender), inbox, &config);
        assert_eq!(result.err(), Some(ConfigError::InvalidFixTimeout));

        let (sender, inbox) = location_channel();
        let config = CoreConfig {
            default_center: Coordinate::new(0.0, 200.0),
            ..CoreConfig::default()
        };
        let result = EventService::new(SimulatedLocationService::granted(sender), inbox, &config);
        assert!(matches!(
            result.err(),
            Some(ConfigError::InvalidDefaultCenter(_))
        ));
    }
}
