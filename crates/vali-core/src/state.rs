//! Form state snapshots
//!
//! [`FormState`] is the single record a form controller publishes to its
//! renderer. Every member is optional: an absent member means "never
//! populated", which is different from an empty one. A server can hand over
//! a snapshot in JSON with the same camelCase member names:
//!
//! ```
//! use vali_core::state::FormState;
//!
//! let state: FormState = serde_json::from_str(r#"{
//!     "values": { "name": "John" },
//!     "formErrors": [],
//!     "fieldErrors": { "name": { "_errors": ["first name must include w"] } },
//!     "isSubmitted": true
//! }"#).unwrap();
//!
//! assert!(state.is_submitted());
//! assert_eq!(state.value("name"), Some("John"));
//! assert_eq!(state.field_messages("name"), ["first name must include w"]);
//! assert!(state.touched.is_none());
//! ```

use crate::error_tree::{self, FieldErrors};
use crate::path::FieldPath;
use crate::tree::FieldTree;
use serde::{Deserialize, Serialize};

/// Raw field values; every leaf is the string captured from the input.
pub type Values = FieldTree<String>;

/// Touched flags; a leaf exists once its field has been blurred.
pub type Touched = FieldTree<bool>;

/// Snapshot of a form's values, interaction flags and validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub values: Option<Values>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub touched: Option<Touched>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub field_errors: Option<FieldErrors>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub form_errors: Option<Vec<String>>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_submitted: Option<bool>,
}

impl FormState {
	/// An empty snapshot, equivalent to `{}`.
	pub fn new() -> Self {
		Self::default()
	}

	/// The raw value of the field named `path`.
	pub fn value(&self, path: &str) -> Option<&str> {
		self.values
			.as_ref()
			.and_then(|values| values.leaf_at(path))
			.map(String::as_str)
	}

	/// Whether the field named `path` has been blurred.
	pub fn is_touched(&self, path: &str) -> bool {
		self.touched
			.as_ref()
			.and_then(|touched| touched.leaf_at(path))
			.copied()
			.unwrap_or(false)
	}

	/// Messages attached to the field named `path`; empty when there are none.
	pub fn field_messages(&self, path: &str) -> &[String] {
		let Ok(path) = FieldPath::parse(path) else {
			return &[];
		};
		self.field_errors
			.as_ref()
			.and_then(|errors| error_tree::lookup(errors, &path))
			.map(|node| node.errors.as_slice())
			.unwrap_or(&[])
	}

	/// Form-level messages; empty when none were recorded.
	pub fn form_messages(&self) -> &[String] {
		self.form_errors.as_deref().unwrap_or(&[])
	}

	pub fn is_submitted(&self) -> bool {
		self.is_submitted.unwrap_or(false)
	}

	/// `true` once a validation pass has run and reported nothing.
	pub fn is_valid(&self) -> bool {
		match (&self.form_errors, &self.field_errors) {
			(Some(form_errors), Some(field_errors)) => {
				form_errors.is_empty() && field_errors.values().all(|node| node.is_clean())
			}
			_ => false,
		}
	}
}
