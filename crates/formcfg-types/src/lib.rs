//! Shared types, store traits, and core utilities for the form configuration engine.
//!
//! This crate contains the foundational types that are shared between the
//! resolution services and every store implementation. Keeping them in a
//! separate crate lets store adapters compile independently of the services.

pub mod error;
pub mod field;
pub mod form_store;
pub mod locale;
pub mod prelude;
pub mod types;

// vim: ts=4
