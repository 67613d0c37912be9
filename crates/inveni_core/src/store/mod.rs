//! Session-scoped state owned by the main thread.
//!
//! # Responsibility
//! - Hold the event collection every view renders from.
//! - Expose explicit subscribe/unsubscribe in place of ambient observation.
//!
//! # Invariants
//! - No global instance; the owner passes the store to its consumers.
//! - Nothing is persisted; state ends with the process.

pub mod event_store;
