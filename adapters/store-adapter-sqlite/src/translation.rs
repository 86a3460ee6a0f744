//! Generic UI translations and per-field translations

use std::collections::BTreeMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use formcfg_types::locale::{FieldTranslation, FieldTranslationData, Translation, TranslationData};
use formcfg_types::prelude::*;

use crate::utils::*;

fn translation_from_row(row: SqliteRow) -> Result<Translation, sqlx::Error> {
	Ok(Translation {
		translation_key: row.try_get::<String, _>("translation_key")?.into(),
		locale: row.try_get::<String, _>("locale")?.into(),
		content: row.try_get::<String, _>("content")?.into(),
		context: row.try_get::<Option<String>, _>("context")?.map(Into::into),
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

fn field_translation_from_row(row: SqliteRow) -> Result<FieldTranslation, sqlx::Error> {
	Ok(FieldTranslation {
		field_id: FieldId(row.try_get("field_id")?),
		locale: row.try_get::<String, _>("locale")?.into(),
		display_name: row.try_get::<String, _>("display_name")?.into(),
		description: row.try_get::<Option<String>, _>("description")?.map(Into::into),
		placeholder: row.try_get::<Option<String>, _>("placeholder")?.map(Into::into),
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

// Field translations
//********************

/// List translations of the active fields of a form type for one locale
pub(crate) async fn list_field_translations(
	db: &SqlitePool,
	form_type_id: FormTypeId,
	locale: &str,
) -> FcResult<Vec<FieldTranslation>> {
	let rows = sqlx::query(
		"SELECT ft.field_id, ft.locale, ft.display_name, ft.description, ft.placeholder,
			ft.updated_at
		FROM field_translations ft
		JOIN field_definitions fd ON fd.field_id = ft.field_id
		WHERE fd.form_type_id = ? AND fd.is_active AND ft.locale = ?",
	)
	.bind(form_type_id.0)
	.bind(locale)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.into_iter().map(field_translation_from_row))
}

/// List translations of every active field for one locale, ordered by field
pub(crate) async fn list_locale_field_translations(
	db: &SqlitePool,
	locale: &str,
) -> FcResult<Vec<FieldTranslation>> {
	let rows = sqlx::query(
		"SELECT ft.field_id, ft.locale, ft.display_name, ft.description, ft.placeholder,
			ft.updated_at
		FROM field_translations ft
		JOIN field_definitions fd ON fd.field_id = ft.field_id
		JOIN form_types t ON t.form_type_id = fd.form_type_id
		WHERE ft.locale = ? AND fd.is_active AND t.is_active
		ORDER BY ft.field_id",
	)
	.bind(locale)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.into_iter().map(field_translation_from_row))
}

pub(crate) async fn upsert_field_translation(
	db: &SqlitePool,
	data: &FieldTranslationData,
) -> FcResult<FieldTranslation> {
	let row = sqlx::query(
		"INSERT INTO field_translations (field_id, locale, display_name, description, placeholder)
		VALUES (?, ?, ?, ?, ?)
		ON CONFLICT (field_id, locale) DO UPDATE SET
			display_name = excluded.display_name,
			description = excluded.description,
			placeholder = excluded.placeholder,
			updated_at = unixepoch()
		RETURNING field_id, locale, display_name, description, placeholder, updated_at",
	)
	.bind(data.field_id.0)
	.bind(data.locale.as_ref())
	.bind(data.display_name.as_ref())
	.bind(data.description.as_deref())
	.bind(data.placeholder.as_deref())
	.fetch_one(db)
	.await
	.map_err(db_err)?;

	field_translation_from_row(row).map_err(db_err)
}

// Generic translations
//**********************

pub(crate) async fn read(db: &SqlitePool, key: &str, locale: &str) -> FcResult<Option<Translation>> {
	let row = sqlx::query(
		"SELECT translation_key, locale, content, context, updated_at
		FROM translations WHERE translation_key = ? AND locale = ?",
	)
	.bind(key)
	.bind(locale)
	.fetch_optional(db)
	.await;

	map_opt(row, translation_from_row)
}

/// List key to content for one locale, optionally filtered by context
pub(crate) async fn list(
	db: &SqlitePool,
	locale: &str,
	context: Option<&str>,
) -> FcResult<BTreeMap<Box<str>, Box<str>>> {
	let rows = sqlx::query(
		"SELECT translation_key, content FROM translations
		WHERE locale = ?1 AND (?2 IS NULL OR context = ?2)",
	)
	.bind(locale)
	.bind(context)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	let pairs = collect_res(rows.into_iter().map(|row| {
		let key: String = row.try_get("translation_key")?;
		let content: String = row.try_get("content")?;
		Ok((key.into_boxed_str(), content.into_boxed_str()))
	}))?;

	Ok(pairs.into_iter().collect())
}

pub(crate) async fn upsert(db: &SqlitePool, data: &TranslationData) -> FcResult<Translation> {
	let row = sqlx::query(
		"INSERT INTO translations (translation_key, locale, content, context)
		VALUES (?, ?, ?, ?)
		ON CONFLICT (translation_key, locale) DO UPDATE SET
			content = excluded.content,
			context = excluded.context,
			updated_at = unixepoch()
		RETURNING translation_key, locale, content, context, updated_at",
	)
	.bind(data.translation_key.as_ref())
	.bind(data.locale.as_ref())
	.bind(data.content.as_ref())
	.bind(data.context.as_deref())
	.fetch_one(db)
	.await
	.map_err(db_err)?;

	translation_from_row(row).map_err(db_err)
}

// vim: ts=4
