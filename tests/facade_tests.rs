//! Facade integration tests
//!
//! Exercise the re-exported surface with a hand-written validator in place
//! of the built-in schema.

use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use vali::prelude::*;
use vali::validators::FormattedError;

fn signup_validator() -> Arc<dyn Validator> {
	Arc::new(validator_fn(|values: Option<&vali::Values>| {
		let Some(values) = values else {
			return ValidationOutcome::from_issues([Issue::root("Required")]);
		};
		let mut issues = Vec::new();
		match values.leaf_at("username") {
			None => issues.push(Issue::at(["username"], "Required")),
			Some(name) if name.contains(' ') => {
				issues.push(Issue::at(["username"], "No spaces allowed"))
			}
			Some(_) => {}
		}
		if values.leaf_at("terms").map(String::as_str) != Some("on") {
			issues.push(Issue::root("Terms must be accepted"));
		}
		ValidationOutcome::from_issues(issues)
	}))
}

#[rstest]
fn test_custom_validator_drives_controller() {
	// Arrange
	let mut form: FormController =
		FormController::new(signup_validator(), Arc::new(FormState::new()));

	// Act
	form.on_change(&FieldEvent::new("username", "john doe")).unwrap();
	let state = form.on_submit(&FieldEvent::submit());

	// Assert
	assert_eq!(
		serde_json::to_value(state).unwrap(),
		json!({
			"values": { "username": "john doe" },
			"fieldErrors": { "username": { "_errors": ["No spaces allowed"] } },
			"formErrors": ["Terms must be accepted"],
			"isSubmitted": true
		})
	);
}

#[rstest]
fn test_form_level_errors_clear_once_fixed() {
	// Arrange
	let mut form: FormController =
		FormController::new(signup_validator(), Arc::new(FormState::new()));
	form.on_change(&FieldEvent::new("username", "john")).unwrap();

	// Act
	let state = form.on_change(&FieldEvent::new("terms", "on")).unwrap();

	// Assert
	assert!(state.is_valid());
	assert_eq!(state.form_errors, Some(vec![]));
}

#[rstest]
fn test_formatted_error_round_trips_server_json() {
	// Arrange
	let server = json!({
		"_errors": ["Terms must be accepted"],
		"username": { "_errors": ["Already taken"] }
	});

	// Act
	let error: FormattedError = serde_json::from_value(server).unwrap();
	let (form_errors, field_errors) = error.decompose();

	// Assert
	assert_eq!(form_errors, vec!["Terms must be accepted"]);
	assert_eq!(field_errors["username"].errors, vec!["Already taken"]);
}

#[rstest]
fn test_settings_loaded_from_toml() {
	// Arrange
	let settings = FormSettings::from_toml_str("max_list_index = 1").unwrap();
	let schema: Schema = Schema::object()
		.field("phones", Schema::array(Schema::string()))
		.into();
	let mut form =
		FormController::with_settings(Arc::new(schema), Arc::new(FormState::new()), settings);

	// Act
	let result = form.on_change(&FieldEvent::new("phones[2]", "555"));

	// Assert
	let Err(error) = result else {
		panic!("index above the configured maximum must be rejected");
	};
	assert_eq!(error.field(), "phones[2]");
	assert!(form.state().values.is_none());
}
