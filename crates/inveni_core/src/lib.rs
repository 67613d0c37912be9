//! Core domain logic for Inveni, the map of user-created events.
//! This crate is the single source of truth for event and location state.

pub mod config;
pub mod location;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod subscription;

pub use config::{ConfigError, CoreConfig, DEFAULT_MAP_CENTER};
pub use location::provider::{LocationProvider, LocationUpdate, ProviderPhase};
pub use location::service::{
    location_channel, AuthorizationStatus, LocationError, LocationInbox, LocationMessage,
    LocationSender, LocationService,
};
pub use location::simulated::SimulatedLocationService;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::event::{Coordinate, Event, EventDraft, EventId, EventValidationError};
pub use service::event_service::{
    EventService, ServiceError, ServiceResult, CURRENT_LOCATION_LABEL,
};
pub use store::event_store::{
    EventStore, MapAnnotation, StoreChange, StoreError, StoreResult, EVENT_PIN_MARKER,
};
pub use subscription::SubscriptionToken;

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
