//! Effective form resolution tests

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{create_test_app, field_id, raw_execute};
use formcfg_types::error::Error;
use formcfg_types::field::{FieldOrder, FieldPatch, FieldType};
use formcfg_types::types::{Patch, Timestamp, TnId};

#[tokio::test]
async fn test_defaults_without_override() {
	let (app, _temp) = create_test_app().await;

	let form = app.resolver.resolve("patient", TnId(1), None).await.unwrap();
	assert_eq!(form.form_type.as_ref(), "patient");
	assert_eq!(form.display_name.as_ref(), "Patient Registration");
	assert_eq!(form.fields.len(), 26);
	assert_eq!(form.locale, None);

	let gender = form.field("gender").unwrap();
	assert!(gender.is_enabled);
	assert!(gender.is_required);
	assert_eq!(gender.sort_order, 4);
	assert_eq!(gender.custom_label, None);

	let email = form.field("email").unwrap();
	assert!(email.is_enabled);
	assert!(!email.is_required);
	assert!(form.last_modified > Timestamp(0));
}

#[tokio::test]
async fn test_unknown_form_type() {
	let (app, _temp) = create_test_app().await;

	let res = app.resolver.resolve("invoice", TnId(1), None).await;
	assert!(matches!(res, Err(Error::FormTypeNotFound(name)) if name.as_ref() == "invoice"));
}

#[tokio::test]
async fn test_inactive_form_type_not_found() {
	let (app, temp) = create_test_app().await;
	raw_execute(&temp, "UPDATE form_types SET is_active = 0 WHERE name = 'appointment'").await;

	let res = app.resolver.resolve("appointment", TnId(1), None).await;
	assert!(res.is_err_and(|err| err.is_not_found()));

	let form_types = app.catalog.list_form_types().await.unwrap();
	assert_eq!(form_types.len(), 1);
}

#[tokio::test]
async fn test_order_follows_overrides() {
	let (app, _temp) = create_test_app().await;
	let tn_id = TnId(1);
	let first_name = field_id(&app, "appointment", "appointment_date").await;
	let second = field_id(&app, "appointment", "appointment_time").await;
	let third = field_id(&app, "appointment", "doctor").await;

	let orders = [
		FieldOrder { field_id: first_name, sort_order: 30 },
		FieldOrder { field_id: second, sort_order: 10 },
		FieldOrder { field_id: third, sort_order: 20 },
	];
	app.mutator.update_field_orders(tn_id, &orders).await.unwrap();

	let form = app.resolver.resolve("appointment", tn_id, None).await.unwrap();
	let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_ref()).collect();
	assert_eq!(
		names,
		["appointment_type", "reason", "notes", "appointment_time", "doctor", "appointment_date"]
	);
}

#[tokio::test]
async fn test_sort_ties_broken_by_field_id() {
	let (app, _temp) = create_test_app().await;
	let tn_id = TnId(1);
	let reason = field_id(&app, "appointment", "reason").await;
	let notes = field_id(&app, "appointment", "notes").await;
	assert!(reason < notes);

	let orders = [
		FieldOrder { field_id: notes, sort_order: 0 },
		FieldOrder { field_id: reason, sort_order: 0 },
	];
	app.mutator.update_field_orders(tn_id, &orders).await.unwrap();

	let form = app.resolver.resolve("appointment", tn_id, None).await.unwrap();
	assert_eq!(form.fields[0].field_id, reason);
	assert_eq!(form.fields[1].field_id, notes);
}

#[tokio::test]
async fn test_city_and_country_always_select() {
	let (app, temp) = create_test_app().await;
	raw_execute(
		&temp,
		"UPDATE field_definitions SET field_type = 'text' WHERE name IN ('city', 'country', 'state')",
	)
	.await;

	let form = app.resolver.resolve("patient", TnId(1), None).await.unwrap();
	assert_eq!(form.field("city").unwrap().field_type, FieldType::Select);
	assert_eq!(form.field("country").unwrap().field_type, FieldType::Select);
	assert_eq!(form.field("state").unwrap().field_type, FieldType::Text);
}

#[tokio::test]
async fn test_override_of_inactive_field_is_ignored() {
	let (app, temp) = create_test_app().await;
	let tn_id = TnId(1);
	let occupation = field_id(&app, "patient", "occupation").await;

	let patch = FieldPatch { is_required: Some(true), ..FieldPatch::default() };
	app.mutator.apply_single(tn_id, occupation, patch).await.unwrap();
	raw_execute(&temp, "UPDATE field_definitions SET is_active = 0 WHERE name = 'occupation'").await;

	let form = app.resolver.resolve("patient", tn_id, None).await.unwrap();
	assert_eq!(form.fields.len(), 25);
	assert!(form.field("occupation").is_none());
}

#[tokio::test]
async fn test_inconsistent_rows_are_corrected() {
	let (app, temp) = create_test_app().await;
	let tn_id = TnId(9);
	let first_name = field_id(&app, "patient", "first_name").await;
	let gender = field_id(&app, "patient", "gender").await;

	// Written behind the guard's back
	raw_execute(
		&temp,
		&format!(
			"INSERT INTO field_overrides (tn_id, field_id, is_enabled, is_required)
			VALUES (9, {}, 0, 1), (9, {}, 0, 1)",
			first_name.0, gender.0
		),
	)
	.await;

	let form = app.resolver.resolve("patient", tn_id, None).await.unwrap();
	let first_name = form.field("first_name").unwrap();
	assert!(first_name.is_enabled);
	assert!(first_name.is_required);
	let gender = form.field("gender").unwrap();
	assert!(!gender.is_enabled);
	assert!(!gender.is_required);
}

#[tokio::test]
async fn test_custom_label_and_validation() {
	let (app, _temp) = create_test_app().await;
	let tn_id = TnId(1);
	let email = field_id(&app, "patient", "email").await;

	let mut rules = formcfg_types::field::ValidationRules::new();
	rules.insert("max_length".into(), serde_json::json!(64));
	let patch = FieldPatch {
		custom_label: Patch::Value("E-mail".into()),
		custom_validation: Patch::Value(rules),
		..FieldPatch::default()
	};
	app.mutator.apply_single(tn_id, email, patch).await.unwrap();

	let form = app.resolver.resolve("patient", tn_id, None).await.unwrap();
	let email = form.field("email").unwrap();
	assert_eq!(email.label(), "E-mail");
	assert_eq!(email.display_name.as_ref(), "Email Address");
	assert_eq!(email.custom_validation.get("max_length"), Some(&serde_json::json!(64)));
	assert!(email.validation_rules.is_empty());
}

#[tokio::test]
async fn test_tenants_are_isolated() {
	let (app, _temp) = create_test_app().await;
	let gender = field_id(&app, "patient", "gender").await;

	let patch = FieldPatch { is_enabled: Some(false), is_required: Some(false), ..FieldPatch::default() };
	app.mutator.apply_single(TnId(1), gender, patch).await.unwrap();

	let (one, two) = tokio::join!(
		app.resolver.resolve("patient", TnId(1), None),
		app.resolver.resolve("patient", TnId(2), None),
	);
	assert!(!one.unwrap().field("gender").unwrap().is_enabled);
	assert!(two.unwrap().field("gender").unwrap().is_enabled);
}

// vim: ts=4
