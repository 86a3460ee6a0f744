//! Seed data for the field catalog and the locale registry
//!
//! Inserts are idempotent: existing rows are left untouched.

use sqlx::{Sqlite, Transaction};

struct SeedField {
	name: &'static str,
	display_name: &'static str,
	field_type: &'static str,
	required: bool,
	core: bool,
	category: &'static str,
	description: &'static str,
	placeholder: &'static str,
	sort_order: i32,
}

const fn field(
	name: &'static str,
	display_name: &'static str,
	field_type: &'static str,
	(required, core): (bool, bool),
	category: &'static str,
	description: &'static str,
	placeholder: &'static str,
	sort_order: i32,
) -> SeedField {
	SeedField {
		name,
		display_name,
		field_type,
		required,
		core,
		category,
		description,
		placeholder,
		sort_order,
	}
}

const FORM_TYPES: &[(&str, &str, &str)] = &[
	("patient", "Patient Registration", "Patient registration and profile management form"),
	("appointment", "Appointment Booking", "Appointment scheduling and management form"),
];

const PERSONAL: &str = "Personal Information";
const CONTACT: &str = "Contact Information";
const INSURANCE: &str = "Insurance Information";
const EMERGENCY: &str = "Emergency Contact";
const MEDICAL: &str = "Medical Information";
const APPOINTMENT: &str = "Appointment Details";

const REQUIRED_CORE: (bool, bool) = (true, true);
const REQUIRED: (bool, bool) = (true, false);
const OPTIONAL: (bool, bool) = (false, false);

#[rustfmt::skip]
const PATIENT_FIELDS: &[SeedField] = &[
	field("first_name", "First Name", "text", REQUIRED_CORE, PERSONAL, "Patient first name", "Enter first name", 1),
	field("last_name", "Last Name", "text", REQUIRED_CORE, PERSONAL, "Patient last name", "Enter last name", 2),
	field("date_of_birth", "Date of Birth", "date", REQUIRED_CORE, PERSONAL, "Patient date of birth", "YYYY-MM-DD", 3),
	field("gender", "Gender", "select", REQUIRED, PERSONAL, "Patient gender", "", 4),
	field("email", "Email Address", "email", OPTIONAL, CONTACT, "Patient email address", "patient@example.com", 5),
	field("phone", "Phone Number", "phone", REQUIRED, CONTACT, "Patient phone number", "+1 (xxx) xxx-xxxx", 6),
	field("address", "Address", "textarea", REQUIRED, CONTACT, "Patient address", "Street address", 7),
	field("country", "Country", "select", REQUIRED, CONTACT, "Patient country", "", 8),
	field("state", "State/Province", "select", OPTIONAL, CONTACT, "Patient state or province", "State/Province", 9),
	field("city", "City", "select", REQUIRED, CONTACT, "Patient city", "Enter city", 10),
	field("postal_code", "Postal Code", "text", REQUIRED, CONTACT, "Patient postal code", "Postal/ZIP code", 11),
	field("nationality", "Nationality", "text", OPTIONAL, PERSONAL, "Patient nationality", "Enter nationality", 12),
	field("preferred_language", "Preferred Language", "select", OPTIONAL, PERSONAL, "Patient preferred language", "", 13),
	field("marital_status", "Marital Status", "select", OPTIONAL, PERSONAL, "Patient marital status", "", 14),
	field("occupation", "Occupation", "text", OPTIONAL, PERSONAL, "Patient occupation", "Enter occupation", 15),
	field("insurance", "Insurance Type", "select", OPTIONAL, INSURANCE, "Patient insurance type", "", 16),
	field("policy_number", "Policy Number", "text", OPTIONAL, INSURANCE, "Insurance policy number", "Enter policy number", 17),
	field("insurance_provider", "Insurance Provider", "text", OPTIONAL, INSURANCE, "Insurance provider name", "Enter provider", 18),
	field("national_id", "National ID", "text", OPTIONAL, PERSONAL, "National identification number", "Enter national ID", 19),
	field("emergency_contact_name", "Emergency Contact Name", "text", OPTIONAL, EMERGENCY, "Emergency contact full name", "Enter contact name", 20),
	field("emergency_contact_relationship", "Emergency Contact Relationship", "text", OPTIONAL, EMERGENCY, "Relationship to patient", "Enter relationship", 21),
	field("emergency_contact_phone", "Emergency Contact Phone", "phone", OPTIONAL, EMERGENCY, "Emergency contact phone number", "+1 (xxx) xxx-xxxx", 22),
	field("medical_history", "Medical History", "textarea", OPTIONAL, MEDICAL, "Patient medical history", "Enter medical history", 23),
	field("allergies", "Allergies", "textarea", OPTIONAL, MEDICAL, "Patient allergies", "Enter allergies", 24),
	field("medications", "Current Medications", "textarea", OPTIONAL, MEDICAL, "Current medications", "Enter current medications", 25),
	field("blood_type", "Blood Type", "select", OPTIONAL, MEDICAL, "Patient blood type", "", 26),
];

#[rustfmt::skip]
const APPOINTMENT_FIELDS: &[SeedField] = &[
	field("appointment_date", "Appointment Date", "date", REQUIRED_CORE, APPOINTMENT, "Date of appointment", "YYYY-MM-DD", 1),
	field("appointment_time", "Appointment Time", "datetime", REQUIRED_CORE, APPOINTMENT, "Time of appointment", "HH:MM", 2),
	field("doctor", "Doctor", "select", REQUIRED_CORE, APPOINTMENT, "Attending physician", "", 3),
	field("appointment_type", "Appointment Type", "select", REQUIRED, APPOINTMENT, "Type of appointment", "", 4),
	field("reason", "Reason for Visit", "textarea", OPTIONAL, APPOINTMENT, "Reason for the appointment", "Enter reason for visit", 5),
	field("notes", "Additional Notes", "textarea", OPTIONAL, APPOINTMENT, "Any additional notes", "Enter additional notes", 6),
];

/// (code, language name, native name, country code)
const LOCALES: &[(&str, &str, &str, &str)] = &[
	("en-US", "English (United States)", "English (United States)", "US"),
	("en-CA", "English (Canada)", "English (Canada)", "CA"),
	("fr-CA", "French (Canada)", "Français (Canada)", "CA"),
	("fr-FR", "French (France)", "Français (France)", "FR"),
	("ar-MA", "Arabic (Morocco)", "العربية (المغرب)", "MA"),
];

pub(crate) async fn seed_catalog(tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
	for (name, display_name, description) in FORM_TYPES {
		sqlx::query(
			"INSERT OR IGNORE INTO form_types (name, display_name, description) VALUES (?, ?, ?)",
		)
		.bind(name)
		.bind(display_name)
		.bind(description)
		.execute(&mut **tx)
		.await?;
	}

	for (form_type, fields) in [("patient", PATIENT_FIELDS), ("appointment", APPOINTMENT_FIELDS)] {
		for fld in fields {
			sqlx::query(
				"INSERT OR IGNORE INTO field_definitions (form_type_id, name, display_name,
				field_type, default_required, is_core, category, description, placeholder, sort_order)
				SELECT form_type_id, ?, ?, ?, ?, ?, ?, ?, ?, ? FROM form_types WHERE name = ?",
			)
			.bind(fld.name)
			.bind(fld.display_name)
			.bind(fld.field_type)
			.bind(fld.required)
			.bind(fld.core)
			.bind(fld.category)
			.bind(fld.description)
			.bind(Some(fld.placeholder).filter(|p| !p.is_empty()))
			.bind(fld.sort_order)
			.bind(form_type)
			.execute(&mut **tx)
			.await?;
		}
	}

	Ok(())
}

pub(crate) async fn seed_locales(tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
	for (code, language_name, native_name, country_code) in LOCALES {
		sqlx::query(
			"INSERT OR IGNORE INTO locales (code, language_name, native_name, country_code)
			VALUES (?, ?, ?, ?)",
		)
		.bind(code)
		.bind(language_name)
		.bind(native_name)
		.bind(country_code)
		.execute(&mut **tx)
		.await?;
	}

	Ok(())
}

// vim: ts=4
