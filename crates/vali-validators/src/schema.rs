//! Built-in declarative schema
//!
//! [`Schema`] describes the expected shape of a values tree and validates it
//! into [`Issue`]s. Every leaf of a form is a raw string, so the shapes are
//! strings, objects of named fields and arrays of items, each of which may be
//! made optional.
//!
//! ## Example
//!
//! ```
//! use vali_validators::{Schema, Validator};
//!
//! let schema: Schema = Schema::object()
//!     .field("name", Schema::string().min(5))
//!     .field(
//!         "address",
//!         Schema::object()
//!             .field("line1", Schema::string())
//!             .field("line2", Schema::string().optional()),
//!     )
//!     .into();
//!
//! let (form_errors, field_errors) = schema.validate(None).into_errors();
//! assert_eq!(form_errors, vec!["Required"]);
//! assert!(field_errors.is_empty());
//! ```

mod array;
mod object;
mod string;

pub use array::ArraySchema;
pub use object::ObjectSchema;
pub use string::StringSchema;

use crate::{Issue, ValidationOutcome, Validator};
use vali_core::{FieldTree, Values};

/// Message reported when a required node is absent.
pub const REQUIRED_MESSAGE: &str = "Required";

/// A node of a declarative schema.
#[derive(Debug, Clone)]
pub enum Schema {
	String(StringSchema),
	Object(ObjectSchema),
	Array(ArraySchema),
	/// Accepts an absent value, otherwise defers to the inner schema
	Optional(Box<Schema>),
}

impl Schema {
	pub fn string() -> StringSchema {
		StringSchema::new()
	}

	pub fn object() -> ObjectSchema {
		ObjectSchema::new()
	}

	pub fn array(item: impl Into<Schema>) -> ArraySchema {
		ArraySchema::new(item)
	}

	/// Wraps this schema so that an absent value is accepted.
	pub fn optional(self) -> Schema {
		match self {
			optional @ Schema::Optional(_) => optional,
			other => Schema::Optional(Box::new(other)),
		}
	}

	/// Validates `value` and returns every issue found, in schema order.
	pub fn check(&self, value: Option<&Values>) -> Vec<Issue> {
		let mut issues = Vec::new();
		self.collect(value, &mut Vec::new(), &mut issues);
		issues
	}

	pub(crate) fn collect(
		&self,
		value: Option<&Values>,
		path: &mut Vec<String>,
		issues: &mut Vec<Issue>,
	) {
		match self {
			Schema::String(schema) => schema.collect(value, path, issues),
			Schema::Object(schema) => schema.collect(value, path, issues),
			Schema::Array(schema) => schema.collect(value, path, issues),
			Schema::Optional(inner) => {
				if value.is_some() {
					inner.collect(value, path, issues);
				}
			}
		}
	}
}

impl Validator for Schema {
	fn validate(&self, values: Option<&Values>) -> ValidationOutcome {
		let issues = self.check(values);
		tracing::trace!(issues = issues.len(), "schema validation finished");
		ValidationOutcome::from_issues(issues)
	}
}

impl From<StringSchema> for Schema {
	fn from(schema: StringSchema) -> Self {
		Schema::String(schema)
	}
}

impl From<ObjectSchema> for Schema {
	fn from(schema: ObjectSchema) -> Self {
		Schema::Object(schema)
	}
}

impl From<ArraySchema> for Schema {
	fn from(schema: ArraySchema) -> Self {
		Schema::Array(schema)
	}
}

/// JSON-style type name of a present node.
fn received(value: &Values) -> &'static str {
	match value {
		FieldTree::Leaf(_) => "string",
		FieldTree::List(_) => "array",
		FieldTree::Map(_) => "object",
	}
}

fn invalid_type(expected: &str, value: &Values) -> String {
	format!("Expected {}, received {}", expected, received(value))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn values(json: serde_json::Value) -> Values {
		serde_json::from_value(json).unwrap()
	}

	fn signup() -> Schema {
		Schema::object()
			.field("name", Schema::string().min(5))
			.field(
				"address",
				Schema::object()
					.field("line1", Schema::string())
					.field("line2", Schema::string().optional()),
			)
			.into()
	}

	#[rstest]
	fn test_undefined_root_is_form_level_required() {
		// Act
		let issues = signup().check(None);

		// Assert
		assert_eq!(issues, vec![Issue::root(REQUIRED_MESSAGE)]);
	}

	#[rstest]
	fn test_empty_object_reports_each_required_field() {
		// Act
		let issues = signup().check(Some(&Values::empty_map()));

		// Assert
		assert_eq!(
			issues,
			vec![
				Issue::at(["name"], REQUIRED_MESSAGE),
				Issue::at(["address"], REQUIRED_MESSAGE),
			]
		);
	}

	#[rstest]
	fn test_nested_field_issues_carry_full_path() {
		// Arrange
		let input = values(json!({ "name": "Johnny", "address": {} }));

		// Act
		let issues = signup().check(Some(&input));

		// Assert
		assert_eq!(issues, vec![Issue::at(["address", "line1"], REQUIRED_MESSAGE)]);
	}

	#[rstest]
	fn test_valid_input_succeeds() {
		// Arrange
		let input = values(json!({ "name": "Johnny", "address": { "line1": "1 Main Street" } }));

		// Act
		let outcome = signup().validate(Some(&input));

		// Assert
		assert!(outcome.is_success());
	}

	#[rstest]
	#[case(json!({ "name": { "first": "J" }, "address": { "line1": "x" } }), vec!["name"], "Expected string, received object")]
	#[case(json!({ "name": "Johnny", "address": "x" }), vec!["address"], "Expected object, received string")]
	#[case(json!({ "name": "Johnny", "address": ["x"] }), vec!["address"], "Expected object, received array")]
	fn test_invalid_types(
		#[case] input: serde_json::Value,
		#[case] path: Vec<&str>,
		#[case] message: &str,
	) {
		// Act
		let issues = signup().check(Some(&values(input)));

		// Assert
		assert_eq!(issues, vec![Issue::at(path, message)]);
	}

	#[rstest]
	fn test_optional_is_idempotent() {
		let schema = Schema::from(Schema::string()).optional().optional();
		let Schema::Optional(inner) = schema else {
			panic!("expected optional");
		};
		assert!(matches!(*inner, Schema::String(_)));
	}
}
