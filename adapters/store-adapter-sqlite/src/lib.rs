//! SQLite-backed form configuration store
//!
//! Holds the field catalog, tenant override rows, the locale registry, and
//! translations in one database file (`formcfg.db`) under the given directory.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use formcfg_types::field::{FieldDefinition, FieldOverride, FormType, OverrideData};
use formcfg_types::form_store::{FormStore, FormStoreTx};
use formcfg_types::locale::{
	FieldTranslation, FieldTranslationData, Locale, Translation, TranslationData,
};
use formcfg_types::prelude::*;

mod catalog;
mod field_override;
mod locale;
mod schema;
mod seed;
mod translation;
mod tx;
mod utils;

const DB_FILE: &str = "formcfg.db";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct FormStoreSqlite {
	db: SqlitePool,
}

impl FormStoreSqlite {
	/// Open (or create) the store database under `dir` and initialize its schema
	pub async fn new(dir: impl AsRef<Path>) -> FcResult<Self> {
		let dir = dir.as_ref();
		tokio::fs::create_dir_all(dir).await.map_err(|err| {
			error!("Cannot create database directory {}: {}", dir.display(), err);
			Error::ConfigError(format!("cannot create database directory: {}", dir.display()))
		})?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.join(DB_FILE))
			.create_if_missing(true)
			.foreign_keys(true)
			.busy_timeout(BUSY_TIMEOUT)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;
		info!("Form store opened at {}", dir.join(DB_FILE).display());

		Ok(Self { db })
	}
}

#[async_trait]
impl FormStore for FormStoreSqlite {
	// Catalog
	//*********
	async fn list_form_types(&self) -> FcResult<Vec<FormType>> {
		catalog::list_form_types(&self.db).await
	}

	async fn read_form_type(&self, name: &str) -> FcResult<Option<FormType>> {
		catalog::read_form_type(&self.db, name).await
	}

	async fn list_field_definitions(
		&self,
		form_type_id: FormTypeId,
	) -> FcResult<Vec<FieldDefinition>> {
		catalog::list_field_definitions(&self.db, form_type_id).await
	}

	async fn list_all_field_definitions(&self) -> FcResult<Vec<FieldDefinition>> {
		catalog::list_all_field_definitions(&self.db).await
	}

	async fn read_field_definition(&self, field_id: FieldId) -> FcResult<Option<FieldDefinition>> {
		catalog::read_field_definition(&self.db, field_id).await
	}

	// Tenant overrides
	//******************
	async fn list_overrides(
		&self,
		tn_id: TnId,
		form_type_id: FormTypeId,
	) -> FcResult<Vec<FieldOverride>> {
		field_override::list(&self.db, tn_id, form_type_id).await
	}

	async fn read_override(
		&self,
		tn_id: TnId,
		field_id: FieldId,
	) -> FcResult<Option<FieldOverride>> {
		field_override::read(&self.db, tn_id, field_id).await
	}

	async fn upsert_override(&self, tn_id: TnId, data: &OverrideData) -> FcResult<()> {
		field_override::upsert(&self.db, tn_id, data).await
	}

	async fn delete_overrides(&self, tn_id: TnId, form_type_id: FormTypeId) -> FcResult<u64> {
		field_override::delete_for_form(&self.db, tn_id, form_type_id).await
	}

	async fn begin(&self) -> FcResult<Box<dyn FormStoreTx>> {
		// Write lock up front: a deferred transaction that reads first cannot
		// wait for the lock later and fails with SQLITE_BUSY instead
		let tx = self.db.begin_with("BEGIN IMMEDIATE").await.map_err(utils::db_err)?;
		Ok(Box::new(tx::SqliteTx::new(tx)))
	}

	// Locales
	//*********
	async fn list_locales(&self, active_only: bool) -> FcResult<Vec<Locale>> {
		locale::list(&self.db, active_only).await
	}

	async fn read_locale(&self, code: &str) -> FcResult<Option<Locale>> {
		locale::read(&self.db, code).await
	}

	async fn read_tenant_locale(&self, tn_id: TnId) -> FcResult<Option<Box<str>>> {
		locale::read_tenant_locale(&self.db, tn_id).await
	}

	async fn update_tenant_locale(&self, tn_id: TnId, code: &str) -> FcResult<()> {
		locale::update_tenant_locale(&self.db, tn_id, code).await
	}

	// Translations
	//**************
	async fn list_field_translations(
		&self,
		form_type_id: FormTypeId,
		locale: &str,
	) -> FcResult<Vec<FieldTranslation>> {
		translation::list_field_translations(&self.db, form_type_id, locale).await
	}

	async fn list_locale_field_translations(&self, locale: &str) -> FcResult<Vec<FieldTranslation>> {
		translation::list_locale_field_translations(&self.db, locale).await
	}

	async fn upsert_field_translation(
		&self,
		data: &FieldTranslationData,
	) -> FcResult<FieldTranslation> {
		translation::upsert_field_translation(&self.db, data).await
	}

	async fn read_translation(&self, key: &str, locale: &str) -> FcResult<Option<Translation>> {
		translation::read(&self.db, key, locale).await
	}

	async fn list_translations(
		&self,
		locale: &str,
		context: Option<&str>,
	) -> FcResult<BTreeMap<Box<str>, Box<str>>> {
		translation::list(&self.db, locale, context).await
	}

	async fn upsert_translation(&self, data: &TranslationData) -> FcResult<Translation> {
		translation::upsert(&self.db, data).await
	}
}


// vim: ts=4
