//! Domain model for map events.
//!
//! # Responsibility
//! - Define canonical data structures used by the store and creation flow.
//!
//! # Invariants
//! - Every event is identified by a stable `EventId`.
//! - Events are append-only; there is no tombstone or delete state.

pub mod event;
