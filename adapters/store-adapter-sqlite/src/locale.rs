//! Locale registry and tenant locale preferences

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use formcfg_types::locale::Locale;
use formcfg_types::prelude::*;

use crate::utils::*;

fn locale_from_row(row: SqliteRow) -> Result<Locale, sqlx::Error> {
	Ok(Locale {
		code: row.try_get::<String, _>("code")?.into(),
		language_name: row.try_get::<String, _>("language_name")?.into(),
		native_name: row.try_get::<String, _>("native_name")?.into(),
		country_code: row.try_get::<Option<String>, _>("country_code")?.map(Into::into),
		is_active: row.try_get("is_active")?,
	})
}

pub(crate) async fn list(db: &SqlitePool, active_only: bool) -> FcResult<Vec<Locale>> {
	let rows = sqlx::query(
		"SELECT code, language_name, native_name, country_code, is_active
		FROM locales WHERE is_active OR NOT ? ORDER BY code",
	)
	.bind(active_only)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	collect_res(rows.into_iter().map(locale_from_row))
}

pub(crate) async fn read(db: &SqlitePool, code: &str) -> FcResult<Option<Locale>> {
	let row = sqlx::query(
		"SELECT code, language_name, native_name, country_code, is_active
		FROM locales WHERE code = ?",
	)
	.bind(code)
	.fetch_optional(db)
	.await;

	map_opt(row, locale_from_row)
}

/// Read the preferred locale of a tenant
pub(crate) async fn read_tenant_locale(db: &SqlitePool, tn_id: TnId) -> FcResult<Option<Box<str>>> {
	let row = sqlx::query("SELECT locale FROM tenant_locales WHERE tn_id = ?")
		.bind(tn_id.0)
		.fetch_optional(db)
		.await;

	map_opt(row, |row| Ok(row.try_get::<String, _>("locale")?.into()))
}

pub(crate) async fn update_tenant_locale(db: &SqlitePool, tn_id: TnId, code: &str) -> FcResult<()> {
	sqlx::query(
		"INSERT INTO tenant_locales (tn_id, locale) VALUES (?, ?)
		ON CONFLICT (tn_id) DO UPDATE SET locale = excluded.locale, updated_at = unixepoch()",
	)
	.bind(tn_id.0)
	.bind(code)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

// vim: ts=4
