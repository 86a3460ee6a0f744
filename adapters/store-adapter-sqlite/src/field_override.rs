//! Tenant override rows
//!
//! At most one row per (tenant, field). Writes are single-statement upserts.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

use formcfg_types::field::{FieldOverride, OverrideData};
use formcfg_types::prelude::*;

use crate::utils::*;

fn override_from_row(row: SqliteRow) -> Result<FieldOverride, sqlx::Error> {
	Ok(FieldOverride {
		tn_id: TnId(row.try_get("tn_id")?),
		field_id: FieldId(row.try_get("field_id")?),
		is_enabled: row.try_get("is_enabled")?,
		is_required: row.try_get("is_required")?,
		custom_label: row.try_get::<Option<String>, _>("custom_label")?.map(Into::into),
		custom_validation: parse_rules(
			"custom_validation",
			row.try_get::<Option<String>, _>("custom_validation")?.as_deref(),
		),
		sort_order: row.try_get("sort_order")?,
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

/// List override rows of a tenant for the fields of one form type
pub(crate) async fn list<'e>(
	db: impl SqliteExecutor<'e>,
	tn_id: TnId,
	form_type_id: FormTypeId,
) -> FcResult<Vec<FieldOverride>> {
	let rows = sqlx::query(
		"SELECT fo.tn_id, fo.field_id, fo.is_enabled, fo.is_required, fo.custom_label,
			fo.custom_validation, fo.sort_order, fo.updated_at
		FROM field_overrides fo
		JOIN field_definitions fd ON fd.field_id = fo.field_id
		WHERE fo.tn_id = ? AND fd.form_type_id = ?",
	)
	.bind(tn_id.0)
	.bind(form_type_id.0)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.into_iter().map(override_from_row))
}

pub(crate) async fn read<'e>(
	db: impl SqliteExecutor<'e>,
	tn_id: TnId,
	field_id: FieldId,
) -> FcResult<Option<FieldOverride>> {
	let row = sqlx::query(
		"SELECT tn_id, field_id, is_enabled, is_required, custom_label, custom_validation,
			sort_order, updated_at
		FROM field_overrides WHERE tn_id = ? AND field_id = ?",
	)
	.bind(tn_id.0)
	.bind(field_id.0)
	.fetch_optional(db)
	.await;

	map_opt(row, override_from_row)
}

/// Insert or replace the override row of one field
pub(crate) async fn upsert<'e>(
	db: impl SqliteExecutor<'e>,
	tn_id: TnId,
	data: &OverrideData,
) -> FcResult<()> {
	let validation = rules_json(&data.custom_validation)?;
	sqlx::query(
		"INSERT INTO field_overrides (tn_id, field_id, is_enabled, is_required, custom_label,
			custom_validation, sort_order)
		VALUES (?, ?, ?, ?, ?, ?, ?)
		ON CONFLICT (tn_id, field_id) DO UPDATE SET
			is_enabled = excluded.is_enabled,
			is_required = excluded.is_required,
			custom_label = excluded.custom_label,
			custom_validation = excluded.custom_validation,
			sort_order = excluded.sort_order,
			updated_at = unixepoch()",
	)
	.bind(tn_id.0)
	.bind(data.field_id.0)
	.bind(data.is_enabled)
	.bind(data.is_required)
	.bind(data.custom_label.as_deref())
	.bind(validation)
	.bind(data.sort_order)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

/// Insert an override row unless the tenant already has one for the field
pub(crate) async fn insert_default<'e>(
	db: impl SqliteExecutor<'e>,
	tn_id: TnId,
	data: &OverrideData,
) -> FcResult<bool> {
	let validation = rules_json(&data.custom_validation)?;
	let res = sqlx::query(
		"INSERT INTO field_overrides (tn_id, field_id, is_enabled, is_required, custom_label,
			custom_validation, sort_order)
		VALUES (?, ?, ?, ?, ?, ?, ?)
		ON CONFLICT (tn_id, field_id) DO NOTHING",
	)
	.bind(tn_id.0)
	.bind(data.field_id.0)
	.bind(data.is_enabled)
	.bind(data.is_required)
	.bind(data.custom_label.as_deref())
	.bind(validation)
	.bind(data.sort_order)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(res.rows_affected() > 0)
}

/// Delete every override row of a tenant scoped to one form type
pub(crate) async fn delete_for_form<'e>(
	db: impl SqliteExecutor<'e>,
	tn_id: TnId,
	form_type_id: FormTypeId,
) -> FcResult<u64> {
	let res = sqlx::query(
		"DELETE FROM field_overrides
		WHERE tn_id = ? AND field_id IN (
			SELECT field_id FROM field_definitions WHERE form_type_id = ?
		)",
	)
	.bind(tn_id.0)
	.bind(form_type_id.0)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(res.rows_affected())
}

// vim: ts=4
