//! Field catalog: form types and their global field definitions
//!
//! Read-only from the point of view of tenants. Rows are created by seeding.

use std::sync::Arc;
use std::time::Duration;

use formcfg_types::field::{FieldDefinition, FormType};
use formcfg_types::form_store::FormStore;

use crate::prelude::*;
use crate::timeout::timed;

/// Read an active form type by name
pub(crate) async fn require_form_type(store: &dyn FormStore, name: &str) -> FcResult<FormType> {
	store.read_form_type(name).await?.ok_or_else(|| Error::FormTypeNotFound(name.into()))
}

/// Read an active field definition
pub(crate) async fn require_field(
	store: &dyn FormStore,
	field_id: FieldId,
) -> FcResult<FieldDefinition> {
	store.read_field_definition(field_id).await?.ok_or(Error::FieldNotFound(field_id))
}

#[derive(Debug, Clone)]
pub struct FieldCatalog {
	store: Arc<dyn FormStore>,
	timeout: Duration,
}

impl FieldCatalog {
	pub fn new(store: Arc<dyn FormStore>, timeout: Duration) -> Self {
		Self { store, timeout }
	}

	/// Copy of the catalog whose operations run under `timeout`
	pub fn with_timeout(&self, timeout: Duration) -> Self {
		Self { timeout, ..self.clone() }
	}

	/// List active form types ordered by name
	pub async fn list_form_types(&self) -> FcResult<Vec<FormType>> {
		timed(self.timeout, "list_form_types", self.store.list_form_types()).await
	}

	pub async fn read_form_type(&self, name: &str) -> FcResult<FormType> {
		timed(self.timeout, "read_form_type", require_form_type(self.store.as_ref(), name)).await
	}

	/// List the catalog definitions of a form type without any tenant merge
	pub async fn list_fields(&self, form_type: &str) -> FcResult<Vec<FieldDefinition>> {
		timed(self.timeout, "list_fields", async {
			let ft = require_form_type(self.store.as_ref(), form_type).await?;
			self.store.list_field_definitions(ft.id).await
		})
		.await
	}

	pub async fn read_field(&self, field_id: FieldId) -> FcResult<FieldDefinition> {
		timed(self.timeout, "read_field", require_field(self.store.as_ref(), field_id)).await
	}
}

// vim: ts=4
