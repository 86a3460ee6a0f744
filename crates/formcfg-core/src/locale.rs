//! Locale registry and translation management
//!
//! Every locale code coming from a caller is checked against the registry
//! before it is used to read translations or written to tenant state.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use formcfg_types::form_store::FormStore;
use formcfg_types::locale::{
	FieldTranslation, FieldTranslationData, Locale, Translation, TranslationData,
};

use crate::catalog::require_field;
use crate::prelude::*;
use crate::timeout::timed;

pub const DEFAULT_LOCALE: &str = "en-US";

/// Default locale of a country, `en-US` for unknown countries
pub fn default_locale_for_country(country: &str) -> &'static str {
	match country {
		"Canada" => "en-CA",
		"USA" => "en-US",
		"Morocco" => "ar-MA",
		"France" => "fr-FR",
		_ => DEFAULT_LOCALE,
	}
}

/// Read a locale and fail unless it exists and is active
pub(crate) async fn require_active(store: &dyn FormStore, code: &str) -> FcResult<Locale> {
	match store.read_locale(code).await? {
		Some(locale) if locale.is_active => Ok(locale),
		_ => {
			debug!(locale = %code, "Unsupported locale");
			Err(Error::UnsupportedLocale(code.into()))
		}
	}
}

fn require_text(what: &str, value: &str) -> FcResult<()> {
	if value.trim().is_empty() {
		return Err(Error::ValidationError(format!("{} must not be empty", what)));
	}
	Ok(())
}

#[derive(Debug, Clone)]
pub struct LocaleRegistry {
	store: Arc<dyn FormStore>,
	timeout: Duration,
	default_locale: Box<str>,
}

impl LocaleRegistry {
	pub fn new(store: Arc<dyn FormStore>, timeout: Duration, default_locale: &str) -> Self {
		Self { store, timeout, default_locale: default_locale.into() }
	}

	/// Copy of the registry whose operations run under `timeout`
	pub fn with_timeout(&self, timeout: Duration) -> Self {
		Self { timeout, ..self.clone() }
	}

	pub fn default_locale(&self) -> &str {
		&self.default_locale
	}

	pub async fn is_active(&self, code: &str) -> FcResult<bool> {
		timed(self.timeout, "is_active", async {
			Ok::<_, Error>(self.store.read_locale(code).await?.is_some_and(|l| l.is_active))
		})
		.await
	}

	/// List active locales ordered by code
	pub async fn list_active(&self) -> FcResult<Vec<Locale>> {
		timed(self.timeout, "list_locales", self.store.list_locales(true)).await
	}

	pub async fn require_active(&self, code: &str) -> FcResult<Locale> {
		timed(self.timeout, "require_active", require_active(self.store.as_ref(), code)).await
	}

	/// Pick the locale to render a tenant's form in
	///
	/// An explicitly requested locale must be active. Otherwise the tenant's
	/// preferred locale is used if still active, then the configured default.
	/// Returns `None` only if even the default locale is inactive.
	pub async fn pick_locale(
		&self,
		tn_id: TnId,
		explicit: Option<&str>,
	) -> FcResult<Option<Box<str>>> {
		timed(self.timeout, "pick_locale", self.pick_locale_inner(tn_id, explicit)).await
	}

	pub(crate) async fn pick_locale_inner(
		&self,
		tn_id: TnId,
		explicit: Option<&str>,
	) -> FcResult<Option<Box<str>>> {
		if let Some(code) = explicit {
			return Ok(Some(require_active(self.store.as_ref(), code).await?.code));
		}

		if let Some(preferred) = self.store.read_tenant_locale(tn_id).await? {
			match self.store.read_locale(&preferred).await? {
				Some(locale) if locale.is_active => return Ok(Some(locale.code)),
				_ => warn!(tn_id = %tn_id, locale = %preferred, "Preferred locale is no longer active"),
			}
		}

		match self.store.read_locale(&self.default_locale).await? {
			Some(locale) if locale.is_active => Ok(Some(locale.code)),
			_ => {
				warn!(locale = %self.default_locale, "Default locale is not active");
				Ok(None)
			}
		}
	}

	/// Store the preferred locale of a tenant
	pub async fn set_preferred_locale(&self, tn_id: TnId, code: &str) -> FcResult<()> {
		timed(self.timeout, "set_preferred_locale", async {
			let locale = require_active(self.store.as_ref(), code).await?;
			self.store.update_tenant_locale(tn_id, &locale.code).await?;
			info!(tn_id = %tn_id, locale = %locale.code, "Preferred locale updated");
			Ok::<_, Error>(())
		})
		.await
	}

	// Generic translations
	//**********************

	pub async fn get_translation(&self, key: &str, locale: &str) -> FcResult<Translation> {
		timed(self.timeout, "get_translation", async {
			require_active(self.store.as_ref(), locale).await?;
			self.store.read_translation(key, locale).await?.ok_or(Error::NotFound)
		})
		.await
	}

	/// Map of translation key to content for one locale
	pub async fn list_translations(
		&self,
		locale: &str,
		context: Option<&str>,
	) -> FcResult<BTreeMap<Box<str>, Box<str>>> {
		timed(self.timeout, "list_translations", async {
			require_active(self.store.as_ref(), locale).await?;
			self.store.list_translations(locale, context).await
		})
		.await
	}

	pub async fn upsert_translation(&self, data: &TranslationData) -> FcResult<Translation> {
		timed(self.timeout, "upsert_translation", async {
			require_text("translation_key", &data.translation_key)?;
			require_text("content", &data.content)?;
			require_active(self.store.as_ref(), &data.locale).await?;

			let tr = self.store.upsert_translation(data).await?;
			info!(key = %tr.translation_key, locale = %tr.locale, "Translation saved");
			Ok::<_, Error>(tr)
		})
		.await
	}

	// Field translations
	//********************

	/// Translations of every active field for one locale
	pub async fn list_field_translations(&self, locale: &str) -> FcResult<Vec<FieldTranslation>> {
		timed(self.timeout, "list_field_translations", async {
			require_active(self.store.as_ref(), locale).await?;
			self.store.list_locale_field_translations(locale).await
		})
		.await
	}

	pub async fn upsert_field_translation(
		&self,
		data: &FieldTranslationData,
	) -> FcResult<FieldTranslation> {
		timed(self.timeout, "upsert_field_translation", async {
			require_text("display_name", &data.display_name)?;
			require_active(self.store.as_ref(), &data.locale).await?;
			require_field(self.store.as_ref(), data.field_id).await?;

			let tr = self.store.upsert_field_translation(data).await?;
			info!(field_id = %tr.field_id, locale = %tr.locale, "Field translation saved");
			Ok::<_, Error>(tr)
		})
		.await
	}
}


// vim: ts=4
