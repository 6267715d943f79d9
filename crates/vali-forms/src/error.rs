//! Controller errors
//!
//! Validation problems are never errors; they are reported through the
//! `fieldErrors` / `formErrors` members of the published state. The only
//! failure a handler can return is a field name that does not fit the shape
//! of the values it is applied to.

use vali_core::PathError;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Invalid field '{field}': {source}")]
	Path {
		field: String,
		#[source]
		source: PathError,
	},
}

impl FormError {
	pub(crate) fn path(field: &str, source: PathError) -> Self {
		Self::Path {
			field: field.to_string(),
			source,
		}
	}

	/// The field name that was rejected.
	pub fn field(&self) -> &str {
		match self {
			Self::Path { field, .. } => field,
		}
	}
}

pub type FormResult<T> = Result<T, FormError>;
