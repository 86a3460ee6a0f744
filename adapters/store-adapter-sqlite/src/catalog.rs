//! Field catalog queries
//!
//! Form types and their global field definitions. Only active rows are returned.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

use formcfg_types::field::{FieldDefinition, FieldType, FormType};
use formcfg_types::prelude::*;

use crate::utils::*;

const FIELD_COLUMNS: &str = "fd.field_id, fd.form_type_id, fd.name, fd.display_name, fd.field_type,
	fd.default_required, fd.is_core, fd.validation_rules, fd.options, fd.sort_order, fd.category,
	fd.description, fd.placeholder, fd.is_active, fd.updated_at";

fn form_type_from_row(row: SqliteRow) -> Result<FormType, sqlx::Error> {
	Ok(FormType {
		id: FormTypeId(row.try_get("form_type_id")?),
		name: row.try_get::<String, _>("name")?.into(),
		display_name: row.try_get::<String, _>("display_name")?.into(),
		description: row.try_get::<Option<String>, _>("description")?.map(Into::into),
		is_active: row.try_get("is_active")?,
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

pub(crate) fn field_from_row(row: SqliteRow) -> Result<FieldDefinition, sqlx::Error> {
	let field_type: String = row.try_get("field_type")?;
	let field_type = field_type
		.parse::<FieldType>()
		.map_err(|err| sqlx::Error::Decode(err.to_string().into()))?;

	Ok(FieldDefinition {
		id: FieldId(row.try_get("field_id")?),
		form_type_id: FormTypeId(row.try_get("form_type_id")?),
		name: row.try_get::<String, _>("name")?.into(),
		display_name: row.try_get::<String, _>("display_name")?.into(),
		field_type,
		default_required: row.try_get("default_required")?,
		is_core: row.try_get("is_core")?,
		validation_rules: parse_rules(
			"validation_rules",
			row.try_get::<Option<String>, _>("validation_rules")?.as_deref(),
		),
		options: parse_options(row.try_get::<Option<String>, _>("options")?.as_deref()),
		sort_order: row.try_get("sort_order")?,
		category: row.try_get::<Option<String>, _>("category")?.map(Into::into),
		description: row.try_get::<Option<String>, _>("description")?.map(Into::into),
		placeholder: row.try_get::<Option<String>, _>("placeholder")?.map(Into::into),
		is_active: row.try_get("is_active")?,
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

/// List active form types ordered by name
pub(crate) async fn list_form_types<'e>(db: impl SqliteExecutor<'e>) -> FcResult<Vec<FormType>> {
	let rows = sqlx::query(
		"SELECT form_type_id, name, display_name, description, is_active, updated_at
		FROM form_types WHERE is_active ORDER BY name",
	)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.into_iter().map(form_type_from_row))
}

pub(crate) async fn read_form_type<'e>(
	db: impl SqliteExecutor<'e>,
	name: &str,
) -> FcResult<Option<FormType>> {
	let row = sqlx::query(
		"SELECT form_type_id, name, display_name, description, is_active, updated_at
		FROM form_types WHERE name = ? AND is_active",
	)
	.bind(name)
	.fetch_optional(db)
	.await;

	map_opt(row, form_type_from_row)
}

/// List active fields of a form type in presentation order
pub(crate) async fn list_field_definitions<'e>(
	db: impl SqliteExecutor<'e>,
	form_type_id: FormTypeId,
) -> FcResult<Vec<FieldDefinition>> {
	let rows = sqlx::query(&format!(
		"SELECT {} FROM field_definitions fd
		WHERE fd.form_type_id = ? AND fd.is_active
		ORDER BY fd.sort_order, fd.field_id",
		FIELD_COLUMNS
	))
	.bind(form_type_id.0)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.into_iter().map(field_from_row))
}

pub(crate) async fn list_all_field_definitions<'e>(
	db: impl SqliteExecutor<'e>,
) -> FcResult<Vec<FieldDefinition>> {
	let rows = sqlx::query(&format!(
		"SELECT {} FROM field_definitions fd
		JOIN form_types ft ON ft.form_type_id = fd.form_type_id
		WHERE fd.is_active AND ft.is_active
		ORDER BY ft.name, fd.sort_order, fd.field_id",
		FIELD_COLUMNS
	))
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.into_iter().map(field_from_row))
}

/// Read an active field whose form type is active too
pub(crate) async fn read_field_definition<'e>(
	db: impl SqliteExecutor<'e>,
	field_id: FieldId,
) -> FcResult<Option<FieldDefinition>> {
	let row = sqlx::query(&format!(
		"SELECT {} FROM field_definitions fd
		JOIN form_types ft ON ft.form_type_id = fd.form_type_id
		WHERE fd.field_id = ? AND fd.is_active AND ft.is_active",
		FIELD_COLUMNS
	))
	.bind(field_id.0)
	.fetch_optional(db)
	.await;

	map_opt(row, field_from_row)
}

// vim: ts=4
