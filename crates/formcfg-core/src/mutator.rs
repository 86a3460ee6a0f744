//! Tenant override mutations
//!
//! Single-field updates are one upsert statement. Batch updates, reorders, and
//! default initialization run in one transaction: every item is checked before
//! the first write, and any failure drops the transaction, rolling it back.

use std::sync::Arc;
use std::time::Duration;

use formcfg_types::field::{
	FieldDefinition, FieldOrder, FieldOverride, FieldPatch, FieldState, FieldUpdate, OverrideData,
	ValidationRules,
};
use formcfg_types::form_store::FormStore;

use crate::catalog::{require_field, require_form_type};
use crate::guard::InvariantGuard;
use crate::prelude::*;
use crate::timeout::timed;

/// Empty labels mean "use the catalog display name"
fn normalize_label(label: Option<Box<str>>) -> Option<Box<str>> {
	label.filter(|l| !l.trim().is_empty())
}

/// Override values to start from: the existing row, or pure catalog defaults
fn base_override(def: &FieldDefinition, current: Option<&FieldOverride>) -> OverrideData {
	match current {
		Some(ovr) => OverrideData::from_override(ovr),
		None => OverrideData {
			field_id: def.id,
			is_enabled: true,
			is_required: def.default_required,
			custom_label: None,
			custom_validation: ValidationRules::new(),
			sort_order: None,
		},
	}
}

/// Override row produced by a partial update, after the guard accepted `state`
fn patched_override(
	def: &FieldDefinition,
	current: Option<&FieldOverride>,
	state: FieldState,
	patch: FieldPatch,
) -> OverrideData {
	let base = base_override(def, current);
	OverrideData {
		field_id: def.id,
		is_enabled: state.is_enabled,
		is_required: state.is_required,
		custom_label: normalize_label(patch.custom_label.apply(base.custom_label)),
		custom_validation: patch
			.custom_validation
			.apply(Some(base.custom_validation))
			.unwrap_or_default(),
		sort_order: patch.sort_order.apply(base.sort_order),
	}
}

#[derive(Debug, Clone)]
pub struct BatchMutator {
	store: Arc<dyn FormStore>,
	timeout: Duration,
}

impl BatchMutator {
	pub fn new(store: Arc<dyn FormStore>, timeout: Duration) -> Self {
		Self { store, timeout }
	}

	/// Copy of the mutator whose operations run under `timeout`
	pub fn with_timeout(&self, timeout: Duration) -> Self {
		Self { timeout, ..self.clone() }
	}

	/// Partially update the override of one field
	///
	/// Unspecified enabled/required flags keep their current effective value.
	pub async fn apply_single(&self, tn_id: TnId, field_id: FieldId, patch: FieldPatch) -> FcResult<()> {
		timed(self.timeout, "update_field", async {
			let def = require_field(self.store.as_ref(), field_id).await?;
			let current = self.store.read_override(tn_id, field_id).await?;

			let effective = FieldState::effective(&def, current.as_ref()).normalized(def.is_core);
			let state = InvariantGuard::validate(&def, effective, patch.is_enabled, patch.is_required)?;

			let data = patched_override(&def, current.as_ref(), state, patch);
			self.store.upsert_override(tn_id, &data).await?;

			info!(
				tn_id = %tn_id,
				field = %def.name,
				is_enabled = data.is_enabled,
				is_required = data.is_required,
				"Field configuration updated"
			);
			Ok::<_, Error>(())
		})
		.await
	}

	/// Replace the overrides of several fields of one form, all or nothing
	///
	/// Items carry the complete desired state and are checked as given, not as
	/// deltas. A field outside the form type fails the whole batch.
	pub async fn apply_batch(
		&self,
		tn_id: TnId,
		form_type: &str,
		updates: &[FieldUpdate],
	) -> FcResult<()> {
		if updates.is_empty() {
			return Err(Error::ValidationError("no fields to update".into()));
		}

		timed(self.timeout, "update_fields_batch", async {
			let ft = require_form_type(self.store.as_ref(), form_type).await?;
			let mut tx = self.store.begin().await?;

			let mut rows = Vec::with_capacity(updates.len());
			for upd in updates {
				let def = match tx.read_field_definition(upd.field_id).await? {
					Some(def) if def.form_type_id == ft.id => def,
					_ => return Err(Error::FieldNotFound(upd.field_id)),
				};
				let state = InvariantGuard::check(
					&def,
					FieldState { is_enabled: upd.is_enabled, is_required: upd.is_required },
				)?;
				rows.push(OverrideData {
					field_id: def.id,
					is_enabled: state.is_enabled,
					is_required: state.is_required,
					custom_label: normalize_label(upd.custom_label.clone()),
					custom_validation: upd.custom_validation.clone(),
					sort_order: upd.sort_order,
				});
			}

			for row in &rows {
				tx.upsert_override(tn_id, row).await?;
			}
			tx.commit().await?;

			info!(tn_id = %tn_id, form_type = %ft.name, count = rows.len(), "Field configurations updated");
			Ok::<_, Error>(())
		})
		.await
	}

	/// Change the sort order of several fields without touching their other settings
	///
	/// A field without an override row gets one carrying its current effective
	/// enabled/required state.
	pub async fn update_field_orders(&self, tn_id: TnId, orders: &[FieldOrder]) -> FcResult<()> {
		if orders.is_empty() {
			return Err(Error::ValidationError("no field orders to update".into()));
		}

		timed(self.timeout, "update_field_orders", async {
			let mut tx = self.store.begin().await?;

			let mut rows = Vec::with_capacity(orders.len());
			for order in orders {
				let def = tx
					.read_field_definition(order.field_id)
					.await?
					.ok_or(Error::FieldNotFound(order.field_id))?;
				let current = tx.read_override(tn_id, def.id).await?;

				let state = FieldState::effective(&def, current.as_ref()).normalized(def.is_core);
				let mut row = base_override(&def, current.as_ref());
				row.is_enabled = state.is_enabled;
				row.is_required = state.is_required;
				row.sort_order = Some(order.sort_order);
				rows.push(row);
			}

			for row in &rows {
				tx.upsert_override(tn_id, row).await?;
			}
			tx.commit().await?;

			info!(tn_id = %tn_id, count = rows.len(), "Field order updated");
			Ok::<_, Error>(())
		})
		.await
	}

	/// Delete every override of a tenant for one form type
	///
	/// Returns the number of removed rows; resetting twice is not an error.
	pub async fn reset_form(&self, tn_id: TnId, form_type: &str) -> FcResult<u64> {
		timed(self.timeout, "reset_form", async {
			let ft = require_form_type(self.store.as_ref(), form_type).await?;
			let count = self.store.delete_overrides(tn_id, ft.id).await?;
			info!(tn_id = %tn_id, form_type = %ft.name, count, "Form configuration reset");
			Ok::<_, Error>(count)
		})
		.await
	}

	/// Materialize catalog defaults as override rows for a new tenant
	///
	/// Existing rows are kept. Returns the number of inserted rows.
	pub async fn initialize_tenant_defaults(&self, tn_id: TnId) -> FcResult<u64> {
		timed(self.timeout, "initialize_tenant_defaults", async {
			let definitions = self.store.list_all_field_definitions().await?;
			let mut tx = self.store.begin().await?;

			let mut inserted: u64 = 0;
			for def in &definitions {
				let mut row = base_override(def, None);
				row.sort_order = Some(def.sort_order);
				if tx.insert_default_override(tn_id, &row).await? {
					inserted += 1;
				}
			}
			tx.commit().await?;

			info!(tn_id = %tn_id, inserted, "Tenant default configuration created");
			Ok::<_, Error>(inserted)
		})
		.await
	}
}


// vim: ts=4
