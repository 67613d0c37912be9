//! Device location access.
//!
//! # Responsibility
//! - Model the platform location service as a request/message contract.
//! - Keep the last known fix for the creation flow.
//!
//! # Invariants
//! - Cross-thread delivery happens only through `LocationSender`.
//! - Provider state is mutated only on the owning thread, inside `pump`.

pub mod provider;
pub mod service;
pub mod simulated;
