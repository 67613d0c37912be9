//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and location calls into use-case level APIs.
//! - Keep rendering layers decoupled from provider details.

pub mod event_service;
