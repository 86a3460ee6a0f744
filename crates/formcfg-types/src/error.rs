//! Error type shared by the store adapters and the resolution services.

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::types::FieldId;

pub type FcResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Generic missing row, as reported by store adapters
	NotFound,
	/// Form type unknown or inactive
	FormTypeNotFound(Box<str>),
	/// Field definition unknown, inactive, or outside the requested form
	FieldNotFound(FieldId),

	// Invariant violations (caller errors, never retried)
	/// Attempt to disable a core field
	CoreFieldProtected(Box<str>),
	/// Attempt to require a field that would be disabled
	RequiredNeedsEnabled(Box<str>),

	/// Locale code unknown or inactive
	UnsupportedLocale(Box<str>),
	/// Malformed request
	ValidationError(String),

	/// Store or transaction failure
	DbError,
	/// Store call exceeded its deadline
	Timeout,
	ConfigError(String),
	Internal(String),
}

impl Error {
	/// True for every member of the not-found family
	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::NotFound | Error::FormTypeNotFound(_) | Error::FieldNotFound(_))
	}

	pub fn is_invariant_violation(&self) -> bool {
		matches!(self, Error::CoreFieldProtected(_) | Error::RequiredNeedsEnabled(_))
	}

	/// HTTP status equivalent used at the request boundary
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::NotFound | Error::FormTypeNotFound(_) | Error::FieldNotFound(_) => {
				StatusCode::NOT_FOUND
			}
			Error::CoreFieldProtected(_)
			| Error::RequiredNeedsEnabled(_)
			| Error::UnsupportedLocale(_)
			| Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::Timeout => StatusCode::GATEWAY_TIMEOUT,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// Short machine-readable error code
	pub fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "NOT_FOUND",
			Error::FormTypeNotFound(_) => "FORM_TYPE_NOT_FOUND",
			Error::FieldNotFound(_) => "FIELD_NOT_FOUND",
			Error::CoreFieldProtected(_) => "CORE_FIELD_PROTECTED",
			Error::RequiredNeedsEnabled(_) => "REQUIRED_NEEDS_ENABLED",
			Error::UnsupportedLocale(_) => "UNSUPPORTED_LOCALE",
			Error::ValidationError(_) => "VALIDATION_ERROR",
			Error::DbError => "STORE_FAILURE",
			Error::Timeout => "TIMEOUT",
			Error::ConfigError(_) => "CONFIG_ERROR",
			Error::Internal(_) => "INTERNAL",
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::FormTypeNotFound(name) => write!(f, "form type '{}' not found", name),
			Error::FieldNotFound(field_id) => write!(f, "field with ID {} not found", field_id),
			Error::CoreFieldProtected(name) => write!(f, "cannot disable core field: {}", name),
			Error::RequiredNeedsEnabled(name) => {
				write!(f, "cannot require a disabled field: {}", name)
			}
			Error::UnsupportedLocale(code) => write!(f, "unsupported locale: {}", code),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::DbError => write!(f, "store failure"),
			Error::Timeout => write!(f, "store call timed out"),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Internal(format!("json: {}", err))
	}
}

#[derive(serde::Serialize)]
struct ErrorBody {
	error: &'static str,
	message: String,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status_code();
		// Store internals are not leaked to callers
		let message = match &self {
			Error::DbError | Error::Internal(_) => "internal error".to_string(),
			err => err.to_string(),
		};
		(status, Json(ErrorBody { error: self.code(), message })).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_not_found_family() {
		assert!(Error::NotFound.is_not_found());
		assert!(Error::FormTypeNotFound("patient".into()).is_not_found());
		assert!(Error::FieldNotFound(FieldId(7)).is_not_found());
		assert!(!Error::DbError.is_not_found());
	}

	#[test]
	fn test_status_codes() {
		assert_eq!(Error::FormTypeNotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
		assert_eq!(
			Error::CoreFieldProtected("first_name".into()).status_code(),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(Error::UnsupportedLocale("xx-YY".into()).status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(Error::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
		assert_eq!(Error::DbError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_invariant_messages() {
		let err = Error::RequiredNeedsEnabled("gender".into());
		assert!(err.is_invariant_violation());
		assert_eq!(err.to_string(), "cannot require a disabled field: gender");
	}
}

// vim: ts=4
