//! Shared helpers for service tests
//!
//! Every test gets its own SQLite store in a temporary directory. The TempDir
//! is returned alongside the app so cleanup happens when it is dropped.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use formcfg_core::App;
use formcfg_core::AppBuilder;
use formcfg_store_adapter_sqlite::FormStoreSqlite;
use formcfg_types::types::FieldId;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tempfile::TempDir;

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

pub async fn create_test_app() -> (App, TempDir) {
	create_test_app_with_timeout(Duration::from_secs(5)).await
}

pub async fn create_test_app_with_timeout(timeout: Duration) -> (App, TempDir) {
	setup_test_logging();
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = FormStoreSqlite::new(temp_dir.path()).await.expect("Failed to create store");

	let mut builder = AppBuilder::new();
	builder.store(Arc::new(store)).store_timeout(timeout);
	let app = builder.build().expect("Failed to build app");

	(app, temp_dir)
}

/// Id of a seeded field
pub async fn field_id(app: &App, form_type: &str, name: &str) -> FieldId {
	app.catalog
		.list_fields(form_type)
		.await
		.expect("Failed to list fields")
		.into_iter()
		.find(|f| f.name.as_ref() == name)
		.map(|f| f.id)
		.expect("Unknown seeded field")
}

/// Separate connection to the store database, for simulating drift or lock contention
pub async fn raw_connection(temp_dir: &TempDir) -> SqliteConnection {
	let opts = SqliteConnectOptions::new().filename(temp_dir.path().join("formcfg.db"));
	SqliteConnection::connect_with(&opts).await.expect("Failed to open raw connection")
}

pub async fn raw_execute(temp_dir: &TempDir, sql: &str) {
	let mut conn = raw_connection(temp_dir).await;
	sqlx::query(sql).execute(&mut conn).await.expect("Raw statement failed");
	conn.close().await.expect("Failed to close raw connection");
}

// vim: ts=4
