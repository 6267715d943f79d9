//! # vali
//!
//! A headless form state controller.
//!
//! vali keeps the live state of a user-editable form: the raw string values
//! typed so far, which fields have been blurred, and the validation errors
//! the schema reports for the current values. A renderer feeds it change,
//! blur and submit events and redraws from the published [`FormState`].
//!
//! ## Crates
//!
//! - [`core`]: `FieldTree`, `FieldPath`, the error tree and `FormState`
//! - [`validators`]: the `Validator` contract and the declarative `Schema`
//! - [`forms`]: `FormController`, the pure transitions and `FormSettings`
//!
//! ## Feature Flags
//!
//! - `schema` (default) - Built-in declarative schema
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//! use vali::prelude::*;
//!
//! let schema: Schema = Schema::object()
//!     .field("email", Schema::string().email())
//!     .field("password", Schema::string().min(8))
//!     .into();
//! let mut form = FormController::new(Arc::new(schema), Arc::new(FormState::new()));
//!
//! form.on_change(&FieldEvent::new("email", "john@example")).unwrap();
//! form.on_blur(&FieldEvent::new("email", "john@example")).unwrap();
//!
//! let state = form.state();
//! assert!(state.is_touched("email"));
//! assert_eq!(state.field_messages("email"), ["Invalid email"]);
//! assert_eq!(state.field_messages("password"), ["Required"]);
//! ```

pub mod core;
pub mod forms;
pub mod validators;

pub use vali_core::{FieldErrors, FieldPath, FieldTree, FormState, Touched, Values};
pub use vali_forms::{FieldEvent, FormController, FormError, FormResult, FormSettings};
#[cfg(feature = "schema")]
pub use vali_validators::Schema;
pub use vali_validators::{ValidationOutcome, Validator};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::{
		FieldEvent, FieldPath, FieldTree, FormController, FormError, FormResult, FormSettings,
		FormState, ValidationOutcome, Validator,
	};
	#[cfg(feature = "schema")]
	pub use vali_validators::schema::*;
	pub use vali_validators::{Issue, validator_fn};
}
