//! Field catalog, tenant override, and effective descriptor types.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::prelude::*;

/// Validation rule name to constraint mapping (e.g. `"max_length": 100`)
pub type ValidationRules = BTreeMap<String, serde_json::Value>;

/// Input widget type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	Text,
	Email,
	Phone,
	Number,
	Date,
	Datetime,
	Select,
	Textarea,
	Checkbox,
}

impl FieldType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Text => "text",
			FieldType::Email => "email",
			FieldType::Phone => "phone",
			FieldType::Number => "number",
			FieldType::Date => "date",
			FieldType::Datetime => "datetime",
			FieldType::Select => "select",
			FieldType::Textarea => "textarea",
			FieldType::Checkbox => "checkbox",
		}
	}
}

impl FromStr for FieldType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"text" => FieldType::Text,
			"email" => FieldType::Email,
			"phone" => FieldType::Phone,
			"number" => FieldType::Number,
			"date" => FieldType::Date,
			"datetime" => FieldType::Datetime,
			"select" => FieldType::Select,
			"textarea" => FieldType::Textarea,
			"checkbox" => FieldType::Checkbox,
			other => return Err(Error::ValidationError(format!("unknown field type: {}", other))),
		})
	}
}

impl std::fmt::Display for FieldType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

// Catalog //
//*********//

/// A form type (`patient`, `appointment`)
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormType {
	pub id: FormTypeId,
	pub name: Box<str>,
	pub display_name: Box<str>,
	pub description: Option<Box<str>>,
	pub is_active: bool,
	pub updated_at: Timestamp,
}

/// Global, tenant-independent field definition
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
	pub id: FieldId,
	pub form_type_id: FormTypeId,
	pub name: Box<str>,
	pub display_name: Box<str>,
	pub field_type: FieldType,
	pub default_required: bool,
	/// Core fields can never be disabled
	pub is_core: bool,
	pub validation_rules: ValidationRules,
	pub options: Vec<Box<str>>,
	pub sort_order: i32,
	pub category: Option<Box<str>>,
	pub description: Option<Box<str>>,
	pub placeholder: Option<Box<str>>,
	pub is_active: bool,
	pub updated_at: Timestamp,
}

// Overrides //
//***********//

/// Per-tenant override row of one field
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOverride {
	pub tn_id: TnId,
	pub field_id: FieldId,
	pub is_enabled: bool,
	pub is_required: bool,
	/// `None` means "use the catalog display name"
	pub custom_label: Option<Box<str>>,
	pub custom_validation: ValidationRules,
	/// `None` means "use the catalog sort order"
	pub sort_order: Option<i32>,
	pub updated_at: Timestamp,
}

/// Values written by an override upsert
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideData {
	pub field_id: FieldId,
	pub is_enabled: bool,
	pub is_required: bool,
	pub custom_label: Option<Box<str>>,
	pub custom_validation: ValidationRules,
	pub sort_order: Option<i32>,
}

impl OverrideData {
	/// Override values carried over from an existing row
	pub fn from_override(ovr: &FieldOverride) -> Self {
		OverrideData {
			field_id: ovr.field_id,
			is_enabled: ovr.is_enabled,
			is_required: ovr.is_required,
			custom_label: ovr.custom_label.clone(),
			custom_validation: ovr.custom_validation.clone(),
			sort_order: ovr.sort_order,
		}
	}
}

/// Effective enabled/required pair of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
	pub is_enabled: bool,
	pub is_required: bool,
}

impl FieldState {
	/// State of a field given its catalog definition and optional override row
	pub fn effective(def: &FieldDefinition, ovr: Option<&FieldOverride>) -> Self {
		match ovr {
			Some(ovr) => FieldState { is_enabled: ovr.is_enabled, is_required: ovr.is_required },
			None => FieldState { is_enabled: true, is_required: def.default_required },
		}
	}

	/// Force core => enabled and required => enabled
	pub fn normalized(self, is_core: bool) -> Self {
		let is_enabled = self.is_enabled || is_core;
		FieldState { is_enabled, is_required: self.is_required && is_enabled }
	}
}

// Effective output //
//******************//

/// Effective description of one field after merging all layers
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
	pub field_id: FieldId,
	pub name: Box<str>,
	pub display_name: Box<str>,
	pub custom_label: Option<Box<str>>,
	pub field_type: FieldType,
	pub is_enabled: bool,
	pub is_required: bool,
	pub is_core: bool,
	pub validation_rules: ValidationRules,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub custom_validation: ValidationRules,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<Box<str>>,
	pub sort_order: i32,
	pub category: Option<Box<str>>,
	pub description: Option<Box<str>>,
	pub placeholder: Option<Box<str>>,
}

impl FieldDescriptor {
	/// Label to render: the tenant's custom label, else the (translated) display name
	pub fn label(&self) -> &str {
		self.custom_label.as_deref().unwrap_or(&self.display_name)
	}
}

/// Effective configuration of a whole form for one tenant
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormMetadata {
	pub form_type: Box<str>,
	pub display_name: Box<str>,
	pub description: Option<Box<str>>,
	pub tn_id: TnId,
	pub locale: Option<Box<str>>,
	pub fields: Vec<FieldDescriptor>,
	/// Latest modification across the rows that contributed to this result
	pub last_modified: Timestamp,
}

impl FormMetadata {
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name.as_ref() == name)
	}
}

// Requests //
//**********//

/// Partial update of one field override
///
/// Unspecified enabled/required keep their current effective values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldPatch {
	#[serde(default)]
	pub is_enabled: Option<bool>,
	#[serde(default)]
	pub is_required: Option<bool>,
	#[serde(default)]
	pub custom_label: Patch<Box<str>>,
	#[serde(default)]
	pub custom_validation: Patch<ValidationRules>,
	#[serde(default)]
	pub sort_order: Patch<i32>,
}

/// Full desired state of one field in a batch update
#[derive(Debug, Clone, Deserialize)]
pub struct FieldUpdate {
	pub field_id: FieldId,
	pub is_enabled: bool,
	pub is_required: bool,
	#[serde(default)]
	pub custom_label: Option<Box<str>>,
	#[serde(default)]
	pub custom_validation: ValidationRules,
	#[serde(default)]
	pub sort_order: Option<i32>,
}

/// New sort order of one field
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldOrder {
	pub field_id: FieldId,
	pub sort_order: i32,
}

/// Query parameters accepted when reading an effective form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormQuery {
	pub locale: Option<Box<str>>,
}


// vim: ts=4
