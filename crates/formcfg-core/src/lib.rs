//! Layered field configuration engine.
//!
//! Produces the effective description of every field of a dynamic form for a
//! (form type, tenant, locale) triple by merging the global field catalog, the
//! tenant's override rows, and per-locale translations. Override mutations are
//! checked against the core-field and required-enabled rules before anything
//! is written.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod catalog;
pub mod guard;
pub mod locale;
pub mod mutator;
pub mod prelude;
pub mod resolver;
mod timeout;

pub use app::{App, AppBuilder, AppBuilderOpts, AppState};
pub use catalog::FieldCatalog;
pub use guard::InvariantGuard;
pub use locale::{LocaleRegistry, default_locale_for_country};
pub use mutator::BatchMutator;
pub use resolver::ConfigResolver;

// vim: ts=4
