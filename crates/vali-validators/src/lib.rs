//! Validator contract for vali
//!
//! A form controller never inspects a schema directly. It hands the current
//! values tree to a [`Validator`] and receives a [`ValidationOutcome`]: either
//! success, or a [`FormattedError`] tree that decomposes into form-level
//! messages and per-field messages.
//!
//! The `schema` feature (enabled by default) adds [`Schema`], a declarative
//! validator for string, object and array shapes.
//!
//! ## Example
//!
//! ```
//! use vali_validators::{Issue, ValidationOutcome, Validator, validator_fn};
//!
//! let validator = validator_fn(|values| match values {
//!     Some(_) => ValidationOutcome::Success,
//!     None => ValidationOutcome::from_issues([Issue::root("Required")]),
//! });
//!
//! assert!(!validator.validate(None).is_success());
//! ```

pub mod outcome;
#[cfg(feature = "schema")]
pub mod schema;

pub use outcome::{FormattedError, Issue, ValidationOutcome};
#[cfg(feature = "schema")]
pub use schema::{ArraySchema, ObjectSchema, Schema, StringSchema};

use std::sync::Arc;
use vali_core::Values;

/// Validates a values tree.
///
/// `values` is `None` when the form holds no values at all. Implementations
/// must be pure: the same input always yields the same outcome.
pub trait Validator {
	fn validate(&self, values: Option<&Values>) -> ValidationOutcome;
}

impl<V: Validator + ?Sized> Validator for &V {
	fn validate(&self, values: Option<&Values>) -> ValidationOutcome {
		(**self).validate(values)
	}
}

impl<V: Validator + ?Sized> Validator for Box<V> {
	fn validate(&self, values: Option<&Values>) -> ValidationOutcome {
		(**self).validate(values)
	}
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
	fn validate(&self, values: Option<&Values>) -> ValidationOutcome {
		(**self).validate(values)
	}
}

/// Adapts a closure into a [`Validator`].
pub struct ValidatorFn<F>(F);

impl<F> Validator for ValidatorFn<F>
where
	F: Fn(Option<&Values>) -> ValidationOutcome,
{
	fn validate(&self, values: Option<&Values>) -> ValidationOutcome {
		(self.0)(values)
	}
}

impl<F> std::fmt::Debug for ValidatorFn<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("ValidatorFn")
	}
}

/// Wraps `f` as a [`Validator`].
pub fn validator_fn<F>(f: F) -> ValidatorFn<F>
where
	F: Fn(Option<&Values>) -> ValidationOutcome,
{
	ValidatorFn(f)
}

/// Re-export commonly used types
pub mod prelude {
	pub use crate::outcome::*;
	#[cfg(feature = "schema")]
	pub use crate::schema::*;
	pub use crate::{Validator, ValidatorFn, validator_fn};
}
