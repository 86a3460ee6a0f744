//! Override mutation checks
//!
//! A core field can never be disabled, and a field cannot be required while it
//! is disabled. Every override write passes through [`InvariantGuard`] first.

use formcfg_types::field::{FieldDefinition, FieldState};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantGuard;

impl InvariantGuard {
	/// Apply the requested deltas onto the current effective state and check the result
	///
	/// Unspecified values keep their current effective value. Returns the fully
	/// resolved pair, which is what the caller must persist.
	pub fn validate(
		field: &FieldDefinition,
		current: FieldState,
		is_enabled: Option<bool>,
		is_required: Option<bool>,
	) -> FcResult<FieldState> {
		let proposed = FieldState {
			is_enabled: is_enabled.unwrap_or(current.is_enabled),
			is_required: is_required.unwrap_or(current.is_required),
		};
		Self::check(field, proposed)
	}

	/// Check a complete desired state
	pub fn check(field: &FieldDefinition, proposed: FieldState) -> FcResult<FieldState> {
		if field.is_core && !proposed.is_enabled {
			warn!(field_id = %field.id, field = %field.name, "Rejected: core field cannot be disabled");
			return Err(Error::CoreFieldProtected(field.name.clone()));
		}
		if proposed.is_required && !proposed.is_enabled {
			warn!(field_id = %field.id, field = %field.name, "Rejected: disabled field cannot be required");
			return Err(Error::RequiredNeedsEnabled(field.name.clone()));
		}
		Ok(proposed)
	}
}


// vim: ts=4
