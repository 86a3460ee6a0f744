//! `formcfg` command line tool
//!
//! Opens the SQLite store and runs one engine operation per invocation,
//! printing the result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;

use formcfg_core::{App, AppBuilder, default_locale_for_country};
use formcfg_store_adapter_sqlite::FormStoreSqlite;
use formcfg_types::field::{FieldOrder, FieldPatch, FieldUpdate};
use formcfg_types::locale::{FieldTranslationData, TranslationData};
use formcfg_types::prelude::*;

#[derive(Parser)]
#[command(name = "formcfg", version, about = "Layered form field configuration")]
struct Cli {
	/// Directory holding the store database
	#[arg(long, env = "FORMCFG_DB_DIR", default_value = "./data")]
	db_dir: PathBuf,
	/// Deadline of every store call in milliseconds
	#[arg(long, env = "FORMCFG_STORE_TIMEOUT_MS", default_value_t = 5000)]
	store_timeout_ms: u64,
	#[arg(long, env = "FORMCFG_DEFAULT_LOCALE", default_value = "en-US")]
	default_locale: String,
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// List active form types
	FormTypes,
	/// List the catalog fields of a form type
	Fields { form_type: String },
	/// List active locales
	Locales,
	/// Print the effective form of a tenant
	Resolve {
		form_type: String,
		#[arg(long)]
		tenant: u32,
		#[arg(long)]
		locale: Option<String>,
		/// Without --locale, use the tenant's preferred locale or the default
		#[arg(long)]
		localized: bool,
	},
	/// Partially update one field, e.g. '{"is_required": false}'
	UpdateField {
		#[arg(long)]
		tenant: u32,
		field_id: i64,
		patch: String,
	},
	/// Replace the settings of several fields of a form, all or nothing
	UpdateFields {
		form_type: String,
		#[arg(long)]
		tenant: u32,
		/// JSON array of field updates
		updates: String,
	},
	/// Change field sort orders
	Reorder {
		#[arg(long)]
		tenant: u32,
		/// JSON array of `{"field_id": .., "sort_order": ..}`
		orders: String,
	},
	/// Drop every override of a tenant for a form type
	Reset {
		form_type: String,
		#[arg(long)]
		tenant: u32,
	},
	/// Create default override rows for a new tenant
	InitDefaults {
		#[arg(long)]
		tenant: u32,
	},
	/// Store the preferred locale of a tenant
	SetLocale {
		#[arg(long)]
		tenant: u32,
		#[arg(required_unless_present = "country")]
		locale: Option<String>,
		/// Derive the locale from the tenant's country
		#[arg(long, conflicts_with = "locale")]
		country: Option<String>,
	},
	/// List generic UI translations of a locale
	Translations {
		locale: String,
		#[arg(long)]
		context: Option<String>,
	},
	/// Create or replace a generic UI translation
	Translate {
		key: String,
		locale: String,
		content: String,
		#[arg(long)]
		context: Option<String>,
	},
	/// List field translations of a locale
	FieldTranslations { locale: String },
	/// Create or replace the translation of one field
	TranslateField {
		field_id: i64,
		locale: String,
		display_name: String,
		#[arg(long)]
		description: Option<String>,
		#[arg(long)]
		placeholder: Option<String>,
	},
}

fn parse_json<T: DeserializeOwned>(what: &str, input: &str) -> FcResult<T> {
	serde_json::from_str(input).map_err(|err| Error::ValidationError(format!("{}: {}", what, err)))
}

fn print<T: Serialize>(value: &T) -> FcResult<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

async fn open(cli: &Cli) -> FcResult<App> {
	let mut builder = AppBuilder::new();
	let store = FormStoreSqlite::new(&cli.db_dir).await?;
	builder
		.store(Arc::new(store))
		.store_timeout(Duration::from_millis(cli.store_timeout_ms))
		.default_locale(cli.default_locale.as_str());
	builder.build()
}

async fn run(cli: Cli) -> FcResult<()> {
	let app = open(&cli).await?;

	match cli.command {
		Command::FormTypes => print(&app.catalog.list_form_types().await?),
		Command::Fields { form_type } => print(&app.catalog.list_fields(&form_type).await?),
		Command::Locales => print(&app.locales.list_active().await?),
		Command::Resolve { form_type, tenant, locale, localized } => {
			let form = if localized {
				app.resolver.resolve_localized(&form_type, TnId(tenant), locale.as_deref()).await?
			} else {
				app.resolver.resolve(&form_type, TnId(tenant), locale.as_deref()).await?
			};
			print(&form)
		}
		Command::UpdateField { tenant, field_id, patch } => {
			let patch: FieldPatch = parse_json("patch", &patch)?;
			app.mutator.apply_single(TnId(tenant), FieldId(field_id), patch).await?;
			let field = app.catalog.read_field(FieldId(field_id)).await?;
			print(&serde_json::json!({ "updated": field.name }))
		}
		Command::UpdateFields { form_type, tenant, updates } => {
			let updates: Vec<FieldUpdate> = parse_json("updates", &updates)?;
			app.mutator.apply_batch(TnId(tenant), &form_type, &updates).await?;
			print(&serde_json::json!({ "updated": updates.len() }))
		}
		Command::Reorder { tenant, orders } => {
			let orders: Vec<FieldOrder> = parse_json("orders", &orders)?;
			app.mutator.update_field_orders(TnId(tenant), &orders).await?;
			print(&serde_json::json!({ "updated": orders.len() }))
		}
		Command::Reset { form_type, tenant } => {
			let removed = app.mutator.reset_form(TnId(tenant), &form_type).await?;
			print(&serde_json::json!({ "removed": removed }))
		}
		Command::InitDefaults { tenant } => {
			let inserted = app.mutator.initialize_tenant_defaults(TnId(tenant)).await?;
			print(&serde_json::json!({ "inserted": inserted }))
		}
		Command::SetLocale { tenant, locale, country } => {
			let code = match (locale, country) {
				(Some(code), _) => code,
				(None, country) => default_locale_for_country(country.as_deref().unwrap_or_default()).into(),
			};
			app.locales.set_preferred_locale(TnId(tenant), &code).await?;
			print(&serde_json::json!({ "locale": code }))
		}
		Command::Translations { locale, context } => {
			print(&app.locales.list_translations(&locale, context.as_deref()).await?)
		}
		Command::Translate { key, locale, content, context } => {
			let data = TranslationData {
				translation_key: key.into(),
				locale: locale.into(),
				content: content.into(),
				context: context.map(Into::into),
			};
			print(&app.locales.upsert_translation(&data).await?)
		}
		Command::FieldTranslations { locale } => {
			print(&app.locales.list_field_translations(&locale).await?)
		}
		Command::TranslateField { field_id, locale, display_name, description, placeholder } => {
			let data = FieldTranslationData {
				field_id: FieldId(field_id),
				locale: locale.into(),
				display_name: display_name.into(),
				description: description.map(Into::into),
				placeholder: placeholder.map(Into::into),
			};
			print(&app.locales.upsert_field_translation(&data).await?)
		}
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let cli = Cli::parse();

	match run(cli).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!(code = err.code(), "{}", err);
			eprintln!("{}", serde_json::json!({ "error": err.code(), "message": err.to_string() }));
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
