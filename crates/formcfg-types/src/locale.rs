//! Locale registry and translation types.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;

/// A supported locale (e.g. `en-US`)
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
	pub code: Box<str>,
	pub language_name: Box<str>,
	pub native_name: Box<str>,
	pub country_code: Option<Box<str>>,
	pub is_active: bool,
}

/// Generic UI string, independent of fields
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
	pub translation_key: Box<str>,
	pub locale: Box<str>,
	pub content: Box<str>,
	pub context: Option<Box<str>>,
	pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationData {
	pub translation_key: Box<str>,
	pub locale: Box<str>,
	pub content: Box<str>,
	#[serde(default)]
	pub context: Option<Box<str>>,
}

/// Localized display text of one field
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldTranslation {
	pub field_id: FieldId,
	pub locale: Box<str>,
	pub display_name: Box<str>,
	pub description: Option<Box<str>>,
	pub placeholder: Option<Box<str>>,
	pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldTranslationData {
	pub field_id: FieldId,
	pub locale: Box<str>,
	pub display_name: Box<str>,
	#[serde(default)]
	pub description: Option<Box<str>>,
	#[serde(default)]
	pub placeholder: Option<Box<str>>,
}

// vim: ts=4
