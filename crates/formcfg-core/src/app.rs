//! App state and builder
//!
//! The store handle and one instance of every service, constructed once and
//! shared as [`App`].

use std::sync::Arc;
use std::time::Duration;

use formcfg_types::form_store::FormStore;

use crate::catalog::FieldCatalog;
use crate::locale::{DEFAULT_LOCALE, LocaleRegistry};
use crate::mutator::BatchMutator;
use crate::prelude::*;
use crate::resolver::ConfigResolver;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	/// Deadline of every store-backed operation
	pub store_timeout: Duration,
	/// Locale used when neither the request nor the tenant names one
	pub default_locale: Box<str>,
}

#[derive(Debug)]
pub struct AppState {
	pub opts: AppBuilderOpts,
	pub store: Arc<dyn FormStore>,

	pub catalog: FieldCatalog,
	pub resolver: ConfigResolver,
	pub mutator: BatchMutator,
	pub locales: LocaleRegistry,
}

pub type App = Arc<AppState>;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	store: Option<Arc<dyn FormStore>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed (tests, embedding binaries)
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				store_timeout: DEFAULT_STORE_TIMEOUT,
				default_locale: DEFAULT_LOCALE.into(),
			},
			store: None,
		}
	}

	// Opts
	pub fn store_timeout(&mut self, store_timeout: Duration) -> &mut Self {
		self.opts.store_timeout = store_timeout;
		self
	}
	pub fn default_locale(&mut self, default_locale: impl Into<Box<str>>) -> &mut Self {
		self.opts.default_locale = default_locale.into();
		self
	}

	// Adapters
	pub fn store(&mut self, store: Arc<dyn FormStore>) -> &mut Self {
		self.store = Some(store);
		self
	}

	pub fn build(self) -> FcResult<App> {
		let Some(store) = self.store else {
			error!("FATAL: No form store configured");
			return Err(Error::ConfigError("no form store configured".into()));
		};
		if self.opts.store_timeout.is_zero() {
			return Err(Error::ConfigError("store timeout must be positive".into()));
		}
		if self.opts.default_locale.trim().is_empty() {
			return Err(Error::ConfigError("default locale must not be empty".into()));
		}

		let timeout = self.opts.store_timeout;
		let locales = LocaleRegistry::new(store.clone(), timeout, &self.opts.default_locale);
		let state = AppState {
			catalog: FieldCatalog::new(store.clone(), timeout),
			resolver: ConfigResolver::new(store.clone(), timeout, locales.clone()),
			mutator: BatchMutator::new(store.clone(), timeout),
			locales,
			store,
			opts: self.opts,
		};
		info!(
			version = VERSION,
			timeout = ?state.opts.store_timeout,
			default_locale = %state.opts.default_locale,
			"Form configuration engine ready"
		);

		Ok(Arc::new(state))
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
