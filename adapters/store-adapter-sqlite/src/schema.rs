//! Database schema initialization
//!
//! Creates tables and indexes, then seeds the catalog and the locale registry.

use sqlx::SqlitePool;

use crate::seed;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Catalog
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS form_types (
		form_type_id integer NOT NULL,
		name text NOT NULL UNIQUE,
		display_name text NOT NULL,
		description text,
		is_active boolean NOT NULL DEFAULT 1,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(form_type_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS field_definitions (
		field_id integer NOT NULL,
		form_type_id integer NOT NULL REFERENCES form_types(form_type_id),
		name text NOT NULL,
		display_name text NOT NULL,
		field_type text NOT NULL CHECK (field_type IN ('text', 'email', 'phone', 'number',
			'date', 'datetime', 'select', 'textarea', 'checkbox')),
		default_required boolean NOT NULL DEFAULT 0,
		is_core boolean NOT NULL DEFAULT 0,		-- core fields can never be disabled
		validation_rules json DEFAULT '{}',
		options json DEFAULT '[]',			-- for select fields
		sort_order integer NOT NULL DEFAULT 0,
		category text,
		description text,
		placeholder text,
		is_active boolean NOT NULL DEFAULT 1,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(field_id),
		UNIQUE(form_type_id, name)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_field_definitions_form_type ON field_definitions(form_type_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Tenant overrides
	//******************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS field_overrides (
		tn_id integer NOT NULL,
		field_id integer NOT NULL,
		is_enabled boolean NOT NULL DEFAULT 1,
		is_required boolean NOT NULL DEFAULT 0,
		custom_label text,				-- NULL: use catalog display name
		custom_validation json DEFAULT '{}',
		sort_order integer,				-- NULL: use catalog sort order
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(tn_id, field_id)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_field_overrides_field ON field_overrides(field_id)")
		.execute(&mut *tx)
		.await?;

	// Locales
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS locales (
		code text NOT NULL,
		language_name text NOT NULL,
		native_name text NOT NULL,
		country_code char(2),
		is_active boolean NOT NULL DEFAULT 1,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(code)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS tenant_locales (
		tn_id integer NOT NULL,
		locale text NOT NULL REFERENCES locales(code),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(tn_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Translations
	//**************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS translations (
		translation_key text NOT NULL,
		locale text NOT NULL REFERENCES locales(code),
		content text NOT NULL,
		context text,					-- form_field, validation_message, ui_text, ...
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(translation_key, locale)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_translations_locale ON translations(locale)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS field_translations (
		field_id integer NOT NULL REFERENCES field_definitions(field_id) ON DELETE CASCADE,
		locale text NOT NULL REFERENCES locales(code),
		display_name text NOT NULL,
		description text,
		placeholder text,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(field_id, locale)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_field_translations_locale ON field_translations(locale)",
	)
	.execute(&mut *tx)
	.await?;

	seed::seed_catalog(&mut tx).await?;
	seed::seed_locales(&mut tx).await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
