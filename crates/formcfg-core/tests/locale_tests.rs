//! Locale registry, translation overlay, and locale fallback tests

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{create_test_app, field_id, raw_execute};
use formcfg_types::error::Error;
use formcfg_types::locale::{FieldTranslationData, TranslationData};
use formcfg_types::types::{FieldId, TnId};

fn field_translation(field_id: FieldId, locale: &str, display_name: &str) -> FieldTranslationData {
	FieldTranslationData {
		field_id,
		locale: locale.into(),
		display_name: display_name.into(),
		description: None,
		placeholder: None,
	}
}

fn translation(key: &str, locale: &str, content: &str, context: Option<&str>) -> TranslationData {
	TranslationData {
		translation_key: key.into(),
		locale: locale.into(),
		content: content.into(),
		context: context.map(Into::into),
	}
}

// Registry
//**********

#[tokio::test]
async fn test_seeded_locales_are_active() {
	let (app, _temp) = create_test_app().await;

	let locales = app.locales.list_active().await.unwrap();
	let codes: Vec<&str> = locales.iter().map(|l| l.code.as_ref()).collect();
	assert_eq!(codes, ["ar-MA", "en-CA", "en-US", "fr-CA", "fr-FR"]);

	assert!(app.locales.is_active("fr-CA").await.unwrap());
	assert!(!app.locales.is_active("xx-YY").await.unwrap());
	assert_eq!(app.locales.default_locale(), "en-US");
}

#[tokio::test]
async fn test_unsupported_locale() {
	let (app, temp) = create_test_app().await;

	let res = app.resolver.resolve("patient", TnId(1), Some("xx-YY")).await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(code)) if code.as_ref() == "xx-YY"));

	// Locale is checked before the form type
	let res = app.resolver.resolve("invoice", TnId(1), Some("xx-YY")).await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));

	raw_execute(&temp, "UPDATE locales SET is_active = 0 WHERE code = 'fr-FR'").await;
	let res = app.resolver.resolve("patient", TnId(1), Some("fr-FR")).await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));
	assert_eq!(app.locales.list_active().await.unwrap().len(), 4);
}

// Field translations
//********************

#[tokio::test]
async fn test_translation_overlays_display_text() {
	let (app, _temp) = create_test_app().await;
	let tn_id = TnId(1);
	let email = field_id(&app, "patient", "email").await;
	let gender = field_id(&app, "patient", "gender").await;

	let mut data = field_translation(email, "fr-CA", "Adresse courriel");
	data.placeholder = Some("patient@exemple.ca".into());
	let saved = app.locales.upsert_field_translation(&data).await.unwrap();
	assert_eq!(saved.display_name.as_ref(), "Adresse courriel");

	let form = app.resolver.resolve("patient", tn_id, Some("fr-CA")).await.unwrap();
	assert_eq!(form.locale.as_deref(), Some("fr-CA"));
	let field = form.field("email").unwrap();
	assert_eq!(field.display_name.as_ref(), "Adresse courriel");
	assert_eq!(field.placeholder.as_deref(), Some("patient@exemple.ca"));
	// Untranslated parts keep the catalog text
	assert_eq!(field.description.as_deref(), Some("Patient email address"));
	assert_eq!(form.field("gender").unwrap().display_name.as_ref(), "Gender");

	// Translations never change enabled/required
	let plain = app.resolver.resolve("patient", tn_id, None).await.unwrap();
	for (a, b) in plain.fields.iter().zip(form.fields.iter()) {
		assert_eq!(a.field_id, b.field_id);
		assert_eq!((a.is_enabled, a.is_required), (b.is_enabled, b.is_required));
	}
	assert_eq!(plain.field("email").unwrap().display_name.as_ref(), "Email Address");

	// Replacing the translation
	let data = field_translation(gender, "fr-CA", "Sexe");
	app.locales.upsert_field_translation(&data).await.unwrap();
	let data = field_translation(gender, "fr-CA", "Genre");
	app.locales.upsert_field_translation(&data).await.unwrap();
	let form = app.resolver.resolve("patient", tn_id, Some("fr-CA")).await.unwrap();
	assert_eq!(form.field("gender").unwrap().display_name.as_ref(), "Genre");
}

#[tokio::test]
async fn test_custom_label_wins_over_translation() {
	let (app, _temp) = create_test_app().await;
	let tn_id = TnId(1);
	let phone = field_id(&app, "patient", "phone").await;

	app.locales
		.upsert_field_translation(&field_translation(phone, "fr-CA", "Téléphone"))
		.await
		.unwrap();
	let patch = formcfg_types::field::FieldPatch {
		custom_label: formcfg_types::types::Patch::Value("Cell".into()),
		..Default::default()
	};
	app.mutator.apply_single(tn_id, phone, patch).await.unwrap();

	let form = app.resolver.resolve("patient", tn_id, Some("fr-CA")).await.unwrap();
	let field = form.field("phone").unwrap();
	assert_eq!(field.display_name.as_ref(), "Téléphone");
	assert_eq!(field.label(), "Cell");
}

#[tokio::test]
async fn test_field_translation_errors() {
	let (app, _temp) = create_test_app().await;
	let email = field_id(&app, "patient", "email").await;

	let res = app.locales.upsert_field_translation(&field_translation(email, "xx-YY", "Mail")).await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));

	let res =
		app.locales.upsert_field_translation(&field_translation(FieldId(4242), "fr-CA", "Mail")).await;
	assert!(matches!(res, Err(Error::FieldNotFound(FieldId(4242)))));

	let res = app.locales.upsert_field_translation(&field_translation(email, "fr-CA", " ")).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));

	let form = app.resolver.resolve("patient", TnId(1), Some("fr-CA")).await.unwrap();
	assert_eq!(form.field("email").unwrap().display_name.as_ref(), "Email Address");
}

#[tokio::test]
async fn test_field_translations_for_locale() {
	let (app, temp) = create_test_app().await;
	let email = field_id(&app, "patient", "email").await;
	let occupation = field_id(&app, "patient", "occupation").await;
	let notes = field_id(&app, "appointment", "notes").await;

	for (field, name) in [(notes, "Notes"), (email, "Courriel"), (occupation, "Profession")] {
		app.locales.upsert_field_translation(&field_translation(field, "fr-FR", name)).await.unwrap();
	}
	raw_execute(&temp, "UPDATE field_definitions SET is_active = 0 WHERE name = 'occupation'").await;

	let rows = app.locales.list_field_translations("fr-FR").await.unwrap();
	let ids: Vec<FieldId> = rows.iter().map(|r| r.field_id).collect();
	assert_eq!(ids, [email, notes]);
	assert!(app.locales.list_field_translations("en-CA").await.unwrap().is_empty());

	let res = app.locales.list_field_translations("xx-YY").await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));
}

// Preferred locale
//******************

#[tokio::test]
async fn test_localized_fallback_chain() {
	let (app, temp) = create_test_app().await;
	let tn_id = TnId(5);
	let email = field_id(&app, "patient", "email").await;
	app.locales
		.upsert_field_translation(&field_translation(email, "fr-CA", "Adresse courriel"))
		.await
		.unwrap();

	// No preference: default locale
	let form = app.resolver.resolve_localized("patient", tn_id, None).await.unwrap();
	assert_eq!(form.locale.as_deref(), Some("en-US"));
	assert_eq!(form.field("email").unwrap().display_name.as_ref(), "Email Address");

	app.locales.set_preferred_locale(tn_id, "fr-CA").await.unwrap();
	let form = app.resolver.resolve_localized("patient", tn_id, None).await.unwrap();
	assert_eq!(form.locale.as_deref(), Some("fr-CA"));
	assert_eq!(form.field("email").unwrap().display_name.as_ref(), "Adresse courriel");

	// Explicit locale wins over the preference
	let form = app.resolver.resolve_localized("patient", tn_id, Some("en-CA")).await.unwrap();
	assert_eq!(form.locale.as_deref(), Some("en-CA"));
	let res = app.resolver.resolve_localized("patient", tn_id, Some("xx-YY")).await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));

	// Deactivated preference falls back to the default
	raw_execute(&temp, "UPDATE locales SET is_active = 0 WHERE code = 'fr-CA'").await;
	let form = app.resolver.resolve_localized("patient", tn_id, None).await.unwrap();
	assert_eq!(form.locale.as_deref(), Some("en-US"));
	assert_eq!(app.locales.pick_locale(TnId(6), None).await.unwrap().as_deref(), Some("en-US"));
}

#[tokio::test]
async fn test_set_preferred_locale_rejects_unknown() {
	let (app, _temp) = create_test_app().await;
	let tn_id = TnId(5);

	app.locales.set_preferred_locale(tn_id, "ar-MA").await.unwrap();
	let res = app.locales.set_preferred_locale(tn_id, "xx-YY").await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));

	assert_eq!(app.locales.pick_locale(tn_id, None).await.unwrap().as_deref(), Some("ar-MA"));
}

// Generic translations
//**********************

#[tokio::test]
async fn test_generic_translations() {
	let (app, _temp) = create_test_app().await;

	app.locales
		.upsert_translation(&translation("button.save", "fr-CA", "Enregistrer", Some("ui")))
		.await
		.unwrap();
	app.locales
		.upsert_translation(&translation("button.cancel", "fr-CA", "Annuler", Some("ui")))
		.await
		.unwrap();
	app.locales
		.upsert_translation(&translation("error.required", "fr-CA", "Champ obligatoire", Some("validation")))
		.await
		.unwrap();

	let tr = app.locales.get_translation("button.save", "fr-CA").await.unwrap();
	assert_eq!(tr.content.as_ref(), "Enregistrer");
	assert_eq!(tr.context.as_deref(), Some("ui"));

	let ui = app.locales.list_translations("fr-CA", Some("ui")).await.unwrap();
	assert_eq!(ui.len(), 2);
	assert_eq!(ui.get("button.cancel").map(|s| &**s), Some("Annuler"));
	let all = app.locales.list_translations("fr-CA", None).await.unwrap();
	assert_eq!(all.len(), 3);

	let res = app.locales.get_translation("button.save", "en-US").await;
	assert!(matches!(res, Err(Error::NotFound)));
	let res = app.locales.get_translation("button.save", "xx-YY").await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));
}

#[tokio::test]
async fn test_translation_errors() {
	let (app, _temp) = create_test_app().await;

	let res = app.locales.upsert_translation(&translation("", "fr-CA", "Enregistrer", None)).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
	let res = app.locales.upsert_translation(&translation("button.save", "fr-CA", "", None)).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
	let res = app.locales.upsert_translation(&translation("button.save", "xx-YY", "Save", None)).await;
	assert!(matches!(res, Err(Error::UnsupportedLocale(_))));

	assert!(app.locales.list_translations("fr-CA", None).await.unwrap().is_empty());
}

// vim: ts=4
