//! Effective form resolution
//!
//! Layers, from least to most specific: catalog definition, tenant override,
//! field translation. The store only delivers rows; the merge itself is the
//! pure [`merge`] function below.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use formcfg_types::field::{
	FieldDefinition, FieldDescriptor, FieldOverride, FieldState, FieldType, FormMetadata, FormType,
	ValidationRules,
};
use formcfg_types::form_store::FormStore;
use formcfg_types::locale::FieldTranslation;

use crate::catalog::require_form_type;
use crate::locale::{LocaleRegistry, require_active};
use crate::prelude::*;
use crate::timeout::timed;

/// Field names always rendered as a select, whatever the catalog says
const SELECT_FIELDS: [&str; 2] = ["city", "country"];

/// Display type of a field after the platform-wide select rule
pub fn display_type(name: &str, stored: FieldType) -> FieldType {
	if SELECT_FIELDS.contains(&name) { FieldType::Select } else { stored }
}

/// Merge catalog, override, and translation rows into the effective form
///
/// Overrides and translations are matched to definitions by field id; rows
/// matching no definition are ignored.
pub fn merge(
	form_type: &FormType,
	tn_id: TnId,
	locale: Option<&str>,
	definitions: Vec<FieldDefinition>,
	overrides: Vec<FieldOverride>,
	translations: Vec<FieldTranslation>,
) -> FormMetadata {
	let mut overrides: HashMap<FieldId, FieldOverride> =
		overrides.into_iter().map(|ovr| (ovr.field_id, ovr)).collect();
	let mut translations: HashMap<FieldId, FieldTranslation> =
		translations.into_iter().map(|tr| (tr.field_id, tr)).collect();

	let mut last_modified = Timestamp::default();
	let mut fields = Vec::with_capacity(definitions.len());

	for def in definitions {
		let ovr = overrides.remove(&def.id);
		let tr = translations.remove(&def.id);

		last_modified = last_modified.max(def.updated_at);
		if let Some(ovr) = &ovr {
			last_modified = last_modified.max(ovr.updated_at);
		}
		if let Some(tr) = &tr {
			last_modified = last_modified.max(tr.updated_at);
		}

		fields.push(describe(tn_id, def, ovr, tr));
	}

	if !overrides.is_empty() {
		debug!(tn_id = %tn_id, count = overrides.len(), "Ignored overrides of inactive fields");
	}

	fields.sort_by_key(|f| (f.sort_order, f.field_id));

	FormMetadata {
		form_type: form_type.name.clone(),
		display_name: form_type.display_name.clone(),
		description: form_type.description.clone(),
		tn_id,
		locale: locale.map(Into::into),
		fields,
		last_modified,
	}
}

fn describe(
	tn_id: TnId,
	def: FieldDefinition,
	ovr: Option<FieldOverride>,
	tr: Option<FieldTranslation>,
) -> FieldDescriptor {
	let raw = FieldState::effective(&def, ovr.as_ref());
	let state = raw.normalized(def.is_core);
	if state != raw {
		warn!(
			tn_id = %tn_id,
			field = %def.name,
			stored = ?raw,
			effective = ?state,
			"Corrected inconsistent override state"
		);
	}

	let (custom_label, custom_validation, sort_order) = match ovr {
		Some(ovr) => (
			ovr.custom_label.filter(|l| !l.trim().is_empty()),
			ovr.custom_validation,
			ovr.sort_order.unwrap_or(def.sort_order),
		),
		None => (None, ValidationRules::new(), def.sort_order),
	};

	let (display_name, description, placeholder) = match tr {
		Some(tr) => (
			tr.display_name,
			tr.description.or(def.description),
			tr.placeholder.or(def.placeholder),
		),
		None => (def.display_name, def.description, def.placeholder),
	};

	FieldDescriptor {
		field_id: def.id,
		field_type: display_type(&def.name, def.field_type),
		name: def.name,
		display_name,
		custom_label,
		is_enabled: state.is_enabled,
		is_required: state.is_required,
		is_core: def.is_core,
		validation_rules: def.validation_rules,
		custom_validation,
		options: def.options,
		sort_order,
		category: def.category,
		description,
		placeholder,
	}
}

#[derive(Debug, Clone)]
pub struct ConfigResolver {
	store: Arc<dyn FormStore>,
	timeout: Duration,
	locales: LocaleRegistry,
}

impl ConfigResolver {
	pub fn new(store: Arc<dyn FormStore>, timeout: Duration, locales: LocaleRegistry) -> Self {
		Self { store, timeout, locales }
	}

	/// Copy of the resolver whose operations run under `timeout`
	pub fn with_timeout(&self, timeout: Duration) -> Self {
		Self { timeout, locales: self.locales.with_timeout(timeout), store: self.store.clone() }
	}

	/// Effective form of a tenant, optionally translated
	///
	/// A given locale must be active; it is checked before any field data is read.
	pub async fn resolve(
		&self,
		form_type: &str,
		tn_id: TnId,
		locale: Option<&str>,
	) -> FcResult<FormMetadata> {
		timed(self.timeout, "resolve", async {
			let locale = match locale {
				Some(code) => Some(require_active(self.store.as_ref(), code).await?.code),
				None => None,
			};
			self.resolve_inner(form_type, tn_id, locale.as_deref()).await
		})
		.await
	}

	/// Effective form rendered in the best available locale
	///
	/// Uses the given locale, else the tenant's preferred one, else the default.
	pub async fn resolve_localized(
		&self,
		form_type: &str,
		tn_id: TnId,
		locale: Option<&str>,
	) -> FcResult<FormMetadata> {
		timed(self.timeout, "resolve_localized", async {
			let locale = self.locales.pick_locale_inner(tn_id, locale).await?;
			self.resolve_inner(form_type, tn_id, locale.as_deref()).await
		})
		.await
	}

	async fn resolve_inner(
		&self,
		form_type: &str,
		tn_id: TnId,
		locale: Option<&str>,
	) -> FcResult<FormMetadata> {
		let ft = require_form_type(self.store.as_ref(), form_type).await?;
		let definitions = self.store.list_field_definitions(ft.id).await?;
		let overrides = self.store.list_overrides(tn_id, ft.id).await?;
		let translations = match locale {
			Some(code) => self.store.list_field_translations(ft.id, code).await?,
			None => Vec::new(),
		};

		let form = merge(&ft, tn_id, locale, definitions, overrides, translations);
		debug!(
			form_type = %ft.name,
			tn_id = %tn_id,
			locale = ?locale,
			fields = form.fields.len(),
			"Resolved form"
		);
		Ok(form)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn form_type() -> FormType {
		FormType {
			id: FormTypeId(1),
			name: "patient".into(),
			display_name: "Patient Registration".into(),
			description: None,
			is_active: true,
			updated_at: Timestamp(100),
		}
	}

	fn def(id: i64, name: &str, sort_order: i32) -> FieldDefinition {
		FieldDefinition {
			id: FieldId(id),
			form_type_id: FormTypeId(1),
			name: name.into(),
			display_name: name.to_uppercase().into(),
			field_type: FieldType::Text,
			default_required: false,
			is_core: false,
			validation_rules: ValidationRules::new(),
			options: Vec::new(),
			sort_order,
			category: None,
			description: Some("catalog description".into()),
			placeholder: Some("catalog placeholder".into()),
			is_active: true,
			updated_at: Timestamp(10),
		}
	}

	fn ovr(id: i64, is_enabled: bool, is_required: bool) -> FieldOverride {
		FieldOverride {
			tn_id: TnId(1),
			field_id: FieldId(id),
			is_enabled,
			is_required,
			custom_label: None,
			custom_validation: ValidationRules::new(),
			sort_order: None,
			updated_at: Timestamp(20),
		}
	}

	#[test]
	fn test_defaults_without_override() {
		let mut gender = def(4, "gender", 4);
		gender.default_required = true;

		let form = merge(&form_type(), TnId(1), None, vec![gender], vec![], vec![]);
		let field = &form.fields[0];
		assert!(field.is_enabled);
		assert!(field.is_required);
		assert_eq!(field.sort_order, 4);
		assert_eq!(field.custom_label, None);
		assert!(field.custom_validation.is_empty());
		assert_eq!(form.last_modified, Timestamp(10));
	}

	#[test]
	fn test_override_applies() {
		let mut o = ovr(2, false, false);
		o.custom_label = Some("Surname".into());
		o.sort_order = Some(9);
		o.custom_validation.insert("max_length".into(), serde_json::json!(20));

		let form =
			merge(&form_type(), TnId(1), None, vec![def(1, "a", 1), def(2, "b", 2)], vec![o], vec![]);
		let b = form.field("b").unwrap();
		assert!(!b.is_enabled);
		assert_eq!(b.label(), "Surname");
		assert_eq!(b.sort_order, 9);
		assert_eq!(b.custom_validation.len(), 1);
		assert_eq!(form.last_modified, Timestamp(20));
	}

	#[test]
	fn test_order_with_ties_by_field_id() {
		let defs = vec![def(1, "a", 1), def(2, "b", 2), def(3, "c", 3)];
		let mut o1 = ovr(1, true, false);
		o1.sort_order = Some(3);
		let mut o2 = ovr(2, true, false);
		o2.sort_order = Some(1);
		let mut o3 = ovr(3, true, false);
		o3.sort_order = Some(1);

		let form = merge(&form_type(), TnId(1), None, defs, vec![o3, o1, o2], vec![]);
		let ids: Vec<i64> = form.fields.iter().map(|f| f.field_id.0).collect();
		assert_eq!(ids, [2, 3, 1]);
	}

	#[test]
	fn test_drift_is_corrected() {
		let mut first_name = def(1, "first_name", 1);
		first_name.is_core = true;
		let defs = vec![first_name, def(2, "gender", 2)];

		let form =
			merge(&form_type(), TnId(1), None, defs, vec![ovr(1, false, false), ovr(2, false, true)], vec![]);
		assert!(form.fields[0].is_enabled);
		assert!(!form.fields[1].is_enabled);
		assert!(!form.fields[1].is_required);
	}

	#[test]
	fn test_orphan_override_ignored() {
		let form = merge(&form_type(), TnId(1), None, vec![def(1, "a", 1)], vec![ovr(99, false, false)], vec![]);
		assert_eq!(form.fields.len(), 1);
		assert!(form.fields[0].is_enabled);
	}

	#[test]
	fn test_translation_overrides_display_text_only() {
		let mut d = def(1, "first_name", 1);
		d.default_required = true;
		let tr = FieldTranslation {
			field_id: FieldId(1),
			locale: "fr-CA".into(),
			display_name: "Prénom".into(),
			description: None,
			placeholder: Some("Entrez le prénom".into()),
			updated_at: Timestamp(30),
		};

		let form = merge(&form_type(), TnId(1), Some("fr-CA"), vec![d], vec![], vec![tr]);
		let f = &form.fields[0];
		assert_eq!(f.display_name.as_ref(), "Prénom");
		assert_eq!(f.placeholder.as_deref(), Some("Entrez le prénom"));
		assert_eq!(f.description.as_deref(), Some("catalog description"));
		assert!(f.is_required);
		assert_eq!(form.locale.as_deref(), Some("fr-CA"));
		assert_eq!(form.last_modified, Timestamp(30));
	}

	#[test]
	fn test_city_and_country_are_select() {
		assert_eq!(display_type("city", FieldType::Text), FieldType::Select);
		assert_eq!(display_type("country", FieldType::Text), FieldType::Select);
		assert_eq!(display_type("state", FieldType::Text), FieldType::Text);

		let form = merge(&form_type(), TnId(1), None, vec![def(1, "city", 1)], vec![], vec![]);
		assert_eq!(form.fields[0].field_type, FieldType::Select);
	}

	#[test]
	fn test_empty_custom_label_falls_back() {
		let mut o = ovr(1, true, false);
		o.custom_label = Some("".into());
		let form = merge(&form_type(), TnId(1), None, vec![def(1, "a", 1)], vec![o], vec![]);
		assert_eq!(form.fields[0].custom_label, None);
		assert_eq!(form.fields[0].label(), "A");
	}
}

// vim: ts=4
