//! Store interface consumed by the resolution services.
//!
//! The services never issue queries themselves. They read catalog, override,
//! and translation rows through [`FormStore`] and merge them in memory; multi-row
//! mutations go through a [`FormStoreTx`] obtained from [`FormStore::begin`].
//!
//! Every read of catalog data returns active rows only: inactive form types and
//! field definitions behave exactly like missing ones.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::field::{FieldDefinition, FieldOverride, FormType, OverrideData};
use crate::locale::{
	FieldTranslation, FieldTranslationData, Locale, Translation, TranslationData,
};
use crate::prelude::*;

#[async_trait]
pub trait FormStore: Debug + Send + Sync {
	// Catalog
	//*********

	/// List active form types ordered by name
	async fn list_form_types(&self) -> FcResult<Vec<FormType>>;

	/// Read an active form type by its unique name
	async fn read_form_type(&self, name: &str) -> FcResult<Option<FormType>>;

	/// List active field definitions of a form type ordered by (sort_order, id)
	async fn list_field_definitions(
		&self,
		form_type_id: FormTypeId,
	) -> FcResult<Vec<FieldDefinition>>;

	/// List every active field definition of every active form type
	async fn list_all_field_definitions(&self) -> FcResult<Vec<FieldDefinition>>;

	/// Read an active field definition belonging to an active form type
	async fn read_field_definition(&self, field_id: FieldId) -> FcResult<Option<FieldDefinition>>;

	// Tenant overrides
	//******************

	/// List the tenant's override rows for the fields of a form type
	async fn list_overrides(
		&self,
		tn_id: TnId,
		form_type_id: FormTypeId,
	) -> FcResult<Vec<FieldOverride>>;

	async fn read_override(&self, tn_id: TnId, field_id: FieldId)
	-> FcResult<Option<FieldOverride>>;

	/// Insert or replace one override row in a single statement
	async fn upsert_override(&self, tn_id: TnId, data: &OverrideData) -> FcResult<()>;

	/// Delete every override row of the tenant for the fields of a form type
	///
	/// Returns the number of deleted rows.
	async fn delete_overrides(&self, tn_id: TnId, form_type_id: FormTypeId) -> FcResult<u64>;

	/// Open a write transaction
	///
	/// The write lock is taken when the transaction starts, so concurrent
	/// writers queue instead of failing on a later lock upgrade.
	async fn begin(&self) -> FcResult<Box<dyn FormStoreTx>>;

	// Locales
	//*********

	/// List locales ordered by code, optionally only the active ones
	async fn list_locales(&self, active_only: bool) -> FcResult<Vec<Locale>>;

	async fn read_locale(&self, code: &str) -> FcResult<Option<Locale>>;

	async fn read_tenant_locale(&self, tn_id: TnId) -> FcResult<Option<Box<str>>>;

	async fn update_tenant_locale(&self, tn_id: TnId, code: &str) -> FcResult<()>;

	// Translations
	//**************

	/// List translations of the fields of a form type for one locale
	async fn list_field_translations(
		&self,
		form_type_id: FormTypeId,
		locale: &str,
	) -> FcResult<Vec<FieldTranslation>>;

	/// List translations of every active field for one locale, ordered by field id
	async fn list_locale_field_translations(&self, locale: &str) -> FcResult<Vec<FieldTranslation>>;

	async fn upsert_field_translation(
		&self,
		data: &FieldTranslationData,
	) -> FcResult<FieldTranslation>;

	async fn read_translation(&self, key: &str, locale: &str) -> FcResult<Option<Translation>>;

	/// List translation key to content for one locale, optionally filtered by context
	async fn list_translations(
		&self,
		locale: &str,
		context: Option<&str>,
	) -> FcResult<BTreeMap<Box<str>, Box<str>>>;

	async fn upsert_translation(&self, data: &TranslationData) -> FcResult<Translation>;
}

/// An open store transaction
///
/// Dropping the transaction without calling [`FormStoreTx::commit`] rolls it back.
#[async_trait]
pub trait FormStoreTx: Send {
	async fn read_field_definition(
		&mut self,
		field_id: FieldId,
	) -> FcResult<Option<FieldDefinition>>;

	async fn read_override(
		&mut self,
		tn_id: TnId,
		field_id: FieldId,
	) -> FcResult<Option<FieldOverride>>;

	async fn upsert_override(&mut self, tn_id: TnId, data: &OverrideData) -> FcResult<()>;

	/// Insert an override row unless one already exists
	///
	/// Returns true if a row was inserted.
	async fn insert_default_override(&mut self, tn_id: TnId, data: &OverrideData)
	-> FcResult<bool>;

	async fn commit(self: Box<Self>) -> FcResult<()>;
}

// vim: ts=4
