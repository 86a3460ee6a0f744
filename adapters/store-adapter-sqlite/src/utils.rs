//! Shared utilities for SQLite adapter
//!
//! Helper functions and error mapping utilities used across all domain modules.

use formcfg_types::field::ValidationRules;
use formcfg_types::prelude::*;

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a sqlx error to the store failure error
pub(crate) fn db_err(err: sqlx::Error) -> Error {
	inspect(&err);
	Error::DbError
}

/// Map an optional row through a row decoder, translating SQL errors
pub(crate) fn map_opt<R, T, F>(row: Result<Option<R>, sqlx::Error>, f: F) -> FcResult<Option<T>>
where
	F: FnOnce(R) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(Some(row)) => f(row).map(Some).map_err(db_err),
		Ok(None) => Ok(None),
		Err(err) => Err(db_err(err)),
	}
}

/// Collect an iterator of decoded rows, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> FcResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Parse a JSON object column, falling back to an empty map on malformed data
pub(crate) fn parse_rules(column: &str, value: Option<&str>) -> ValidationRules {
	match value {
		None | Some("") => ValidationRules::new(),
		Some(json) => serde_json::from_str(json).unwrap_or_else(|err| {
			warn!("Malformed {} JSON ignored: {}", column, err);
			ValidationRules::new()
		}),
	}
}

/// Parse a JSON string array column, falling back to an empty list on malformed data
pub(crate) fn parse_options(value: Option<&str>) -> Vec<Box<str>> {
	match value {
		None | Some("") => Vec::new(),
		Some(json) => serde_json::from_str(json).unwrap_or_else(|err| {
			warn!("Malformed options JSON ignored: {}", err);
			Vec::new()
		}),
	}
}

/// Serialize validation rules for storage
pub(crate) fn rules_json(rules: &ValidationRules) -> FcResult<String> {
	Ok(serde_json::to_string(rules)?)
}


// vim: ts=4
