//! Store transaction
//!
//! Wraps an owned sqlx transaction. Dropping it without commit rolls back.

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};

use formcfg_types::field::{FieldDefinition, FieldOverride, OverrideData};
use formcfg_types::form_store::FormStoreTx;
use formcfg_types::prelude::*;

use crate::utils::*;
use crate::{catalog, field_override};

pub(crate) struct SqliteTx {
	tx: Transaction<'static, Sqlite>,
}

impl SqliteTx {
	pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
		Self { tx }
	}
}

#[async_trait]
impl FormStoreTx for SqliteTx {
	async fn read_field_definition(
		&mut self,
		field_id: FieldId,
	) -> FcResult<Option<FieldDefinition>> {
		catalog::read_field_definition(&mut *self.tx, field_id).await
	}

	async fn read_override(
		&mut self,
		tn_id: TnId,
		field_id: FieldId,
	) -> FcResult<Option<FieldOverride>> {
		field_override::read(&mut *self.tx, tn_id, field_id).await
	}

	async fn upsert_override(&mut self, tn_id: TnId, data: &OverrideData) -> FcResult<()> {
		field_override::upsert(&mut *self.tx, tn_id, data).await
	}

	async fn insert_default_override(
		&mut self,
		tn_id: TnId,
		data: &OverrideData,
	) -> FcResult<bool> {
		field_override::insert_default(&mut *self.tx, tn_id, data).await
	}

	async fn commit(self: Box<Self>) -> FcResult<()> {
		self.tx.commit().await.map_err(db_err)
	}
}

// vim: ts=4
