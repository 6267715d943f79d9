//! Object rules

use super::{REQUIRED_MESSAGE, Schema, invalid_type};
use crate::Issue;
use std::fmt;
use std::sync::Arc;
use vali_core::{FieldTree, Values};

type Predicate = Arc<dyn Fn(&Values) -> bool + Send + Sync>;

/// Cross-field check run against the whole object node.
#[derive(Clone)]
struct Refinement {
	check: Predicate,
	/// Target below the object node; empty for the object itself
	path: Vec<String>,
	message: String,
}

/// Named fields plus cross-field refinements.
///
/// Fields are validated in declaration order. Keys present in the input but
/// not declared are ignored. Refinements run only when every declared field
/// passed, so cross-field messages never pile up on top of field messages.
///
/// # Examples
///
/// ```
/// use vali_validators::{Schema, Validator};
/// use vali_core::Values;
///
/// let schema = Schema::object()
///     .field("password", Schema::string().min(8))
///     .field("confirm", Schema::string())
///     .refine_at(
///         ["confirm"],
///         |values| values.child("password") == values.child("confirm"),
///         "Passwords do not match",
///     );
///
/// let values: Values =
///     serde_json::from_str(r#"{"password":"hunter2hunter2","confirm":"hunter3"}"#).unwrap();
/// let (form_errors, field_errors) = schema.validate(Some(&values)).into_errors();
/// assert!(form_errors.is_empty());
/// assert_eq!(field_errors["confirm"].errors, vec!["Passwords do not match"]);
/// ```
#[derive(Clone, Default)]
pub struct ObjectSchema {
	fields: Vec<(String, Schema)>,
	refinements: Vec<Refinement>,
}

impl ObjectSchema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a field; declaring the same name again replaces its schema.
	pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
		let name = name.into();
		let schema = schema.into();
		match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = schema,
			None => self.fields.push((name, schema)),
		}
		self
	}

	/// Adds a check whose failure is reported on the object node itself.
	///
	/// For the root object this is a form-level message.
	pub fn refine<F>(self, check: F, message: impl Into<String>) -> Self
	where
		F: Fn(&Values) -> bool + Send + Sync + 'static,
	{
		self.refine_at(Vec::<String>::new(), check, message)
	}

	/// Adds a check whose failure is reported on the node at `path`, relative
	/// to this object.
	pub fn refine_at<I, S, F>(mut self, path: I, check: F, message: impl Into<String>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
		F: Fn(&Values) -> bool + Send + Sync + 'static,
	{
		self.refinements.push(Refinement {
			check: Arc::new(check),
			path: path.into_iter().map(Into::into).collect(),
			message: message.into(),
		});
		self
	}

	/// Declared field names, in order.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|(name, _)| name.as_str())
	}

	pub fn get(&self, name: &str) -> Option<&Schema> {
		self.fields
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, schema)| schema)
	}

	/// Shorthand for wrapping this schema in [`Schema::Optional`].
	pub fn optional(self) -> Schema {
		Schema::from(self).optional()
	}

	pub(crate) fn collect(
		&self,
		value: Option<&Values>,
		path: &mut Vec<String>,
		issues: &mut Vec<Issue>,
	) {
		let node = match value {
			None => {
				issues.push(Issue::at(path.clone(), REQUIRED_MESSAGE));
				return;
			}
			Some(node @ FieldTree::Map(_)) => node,
			Some(other) => {
				issues.push(Issue::at(path.clone(), invalid_type("object", other)));
				return;
			}
		};

		let before = issues.len();
		for (name, schema) in &self.fields {
			path.push(name.clone());
			schema.collect(node.child(name), path, issues);
			path.pop();
		}

		if issues.len() > before {
			return;
		}
		for refinement in &self.refinements {
			if !(refinement.check)(node) {
				let target = path.iter().chain(&refinement.path).cloned();
				issues.push(Issue::at(target, refinement.message.clone()));
			}
		}
	}
}

impl crate::Validator for ObjectSchema {
	fn validate(&self, values: Option<&Values>) -> crate::ValidationOutcome {
		let mut issues = Vec::new();
		self.collect(values, &mut Vec::new(), &mut issues);
		tracing::trace!(issues = issues.len(), "object schema validation finished");
		crate::ValidationOutcome::from_issues(issues)
	}
}

impl fmt::Debug for ObjectSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectSchema")
			.field("fields", &self.fields)
			.field("refinements", &self.refinements.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Validator;
	use rstest::rstest;
	use serde_json::json;

	fn values(json: serde_json::Value) -> Values {
		serde_json::from_value(json).unwrap()
	}

	fn passwords() -> ObjectSchema {
		ObjectSchema::new()
			.field("password", Schema::string().min(4))
			.field("confirm", Schema::string())
			.refine(
				|values| values.child("password") == values.child("confirm"),
				"Passwords do not match",
			)
	}

	#[rstest]
	fn test_root_refinement_is_form_level() {
		// Arrange
		let input = values(json!({ "password": "abcd", "confirm": "abce" }));

		// Act
		let (form_errors, field_errors) = passwords().validate(Some(&input)).into_errors();

		// Assert
		assert_eq!(form_errors, vec!["Passwords do not match"]);
		assert!(field_errors.is_empty());
	}

	#[rstest]
	fn test_refinement_skipped_while_fields_fail() {
		// Arrange
		let input = values(json!({ "password": "ab", "confirm": "abce" }));

		// Act
		let issues = {
			let mut issues = Vec::new();
			passwords().collect(Some(&input), &mut Vec::new(), &mut issues);
			issues
		};

		// Assert
		assert_eq!(
			issues,
			vec![Issue::at(["password"], "String must contain at least 4 character(s)")]
		);
	}

	#[rstest]
	fn test_nested_refinement_targets_relative_path() {
		// Arrange
		let schema: Schema = ObjectSchema::new()
			.field(
				"account",
				ObjectSchema::new()
					.field("password", Schema::string())
					.field("confirm", Schema::string())
					.refine_at(
						["confirm"],
						|values| values.child("password") == values.child("confirm"),
						"Passwords do not match",
					),
			)
			.into();
		let input = values(json!({ "account": { "password": "a", "confirm": "b" } }));

		// Act
		let issues = schema.check(Some(&input));

		// Assert
		assert_eq!(
			issues,
			vec![Issue::at(["account", "confirm"], "Passwords do not match")]
		);
	}

	#[rstest]
	fn test_undeclared_keys_are_ignored() {
		// Arrange
		let schema = ObjectSchema::new().field("name", Schema::string());
		let input = values(json!({ "name": "John", "nickname": { "deep": "x" } }));

		// Act & Assert
		assert!(schema.validate(Some(&input)).is_success());
	}

	#[rstest]
	fn test_redeclared_field_replaces_schema() {
		// Arrange
		let schema = ObjectSchema::new()
			.field("name", Schema::string().min(10))
			.field("name", Schema::string())
			.field("email", Schema::string());

		// Act & Assert
		assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["name", "email"]);
		assert!(
			schema
				.validate(Some(&values(json!({ "name": "Jo", "email": "x" }))))
				.is_success()
		);
		assert!(schema.get("email").is_some());
		assert!(schema.get("phone").is_none());
	}
}
