//! Form state controller behaviour tests
//!
//! Drives a `FormController` the way a renderer would and checks the
//! published snapshots.

use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;
use vali_core::FormState;
use vali_forms::{FieldEvent, FormController, apply_submit};
use vali_validators::Schema;

#[fixture]
fn schema() -> Arc<Schema> {
	Arc::new(
		Schema::object()
			.field("name", Schema::string().min(5))
			.field(
				"address",
				Schema::object()
					.field("line1", Schema::string())
					.field("line2", Schema::string().optional()),
			)
			.into(),
	)
}

fn snapshot(state: &FormState) -> serde_json::Value {
	serde_json::to_value(state).unwrap()
}

fn server(json: serde_json::Value) -> Arc<FormState> {
	Arc::new(serde_json::from_value(json).unwrap())
}

#[rstest]
fn test_empty_server_state_reports_form_level_required(schema: Arc<Schema>) {
	// Act
	let form = FormController::new(schema, Arc::new(FormState::new()));

	// Assert
	assert_eq!(
		snapshot(form.state()),
		json!({ "formErrors": ["Required"], "fieldErrors": {} })
	);
}

#[rstest]
fn test_submitted_server_state_passes_through(schema: Arc<Schema>) {
	// Arrange
	let submitted = server(json!({
		"values": { "name": "John" },
		"formErrors": [],
		"fieldErrors": { "name": { "_errors": ["first name must include w"] } },
		"isSubmitted": true
	}));

	// Act
	let form = FormController::new(schema, Arc::clone(&submitted));

	// Assert
	assert_eq!(form.state(), submitted.as_ref());
}

#[rstest]
fn test_change_sets_value_without_touching(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(schema, Arc::new(FormState::new()));

	// Act
	let state = form.on_change(&FieldEvent::new("name", "John")).unwrap();

	// Assert
	assert_eq!(state.value("name"), Some("John"));
	assert!(state.touched.is_none());
	assert!(!state.is_touched("name"));
}

#[rstest]
fn test_change_runs_validation(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(schema, Arc::new(FormState::new()));

	// Act
	let state = form.on_change(&FieldEvent::new("name", "John")).unwrap();

	// Assert
	assert!(state.form_messages().is_empty());
	assert_eq!(
		state.field_messages("name"),
		["String must contain at least 5 character(s)"]
	);
	assert_eq!(state.value("name"), Some("John"));
}

#[rstest]
fn test_only_blur_marks_touched(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(schema, Arc::new(FormState::new()));
	form.on_change(&FieldEvent::new("name", "John")).unwrap();
	let touched_before_blur = form.state().is_touched("name");

	// Act
	let state = form.on_blur(&FieldEvent::new("name", "John")).unwrap();

	// Assert
	assert!(!touched_before_blur);
	assert_eq!(snapshot(state)["touched"], json!({ "name": true }));
}

#[rstest]
fn test_nested_change_keeps_sibling_value(schema: Arc<Schema>) {
	// Arrange
	let initial = server(json!({ "values": { "address": { "line2": "Flat 2" } } }));
	let mut form = FormController::new(schema, initial);

	// Act
	let state = form
		.on_change(&FieldEvent::new("address.line1", "1 Main Street"))
		.unwrap();

	// Assert
	assert_eq!(
		snapshot(state)["values"],
		json!({ "address": { "line1": "1 Main Street", "line2": "Flat 2" } })
	);
}

#[rstest]
fn test_submit_validates_untouched_form(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(schema, Arc::new(FormState::new()));

	// Act
	let state = form.on_submit(&FieldEvent::submit());

	// Assert
	assert_eq!(
		snapshot(state),
		json!({
			"formErrors": [],
			"fieldErrors": {
				"name": { "_errors": ["Required"] },
				"address": { "_errors": ["Required"] }
			},
			"isSubmitted": true
		})
	);
}

#[rstest]
fn test_submit_twice_on_valid_form_is_stable(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(Arc::clone(&schema), Arc::new(FormState::new()));
	form.on_change(&FieldEvent::new("name", "Johnny")).unwrap();
	form.on_change(&FieldEvent::new("address.line1", "1 Main Street")).unwrap();
	let first = form.on_submit(&FieldEvent::submit()).clone();

	// Act
	let second = apply_submit(&first, schema.as_ref());

	// Assert
	assert_eq!(second, first);
	assert!(second.is_submitted());
	assert!(second.is_valid());
}

#[rstest]
#[case(FormState::new())]
#[case(serde_json::from_value(json!({ "values": { "name": "John" }, "touched": { "name": true } })).unwrap())]
fn test_blur_without_name_is_noop(schema: Arc<Schema>, #[case] initial: FormState) {
	// Arrange
	let mut form = FormController::new(schema, Arc::new(initial));
	let before = form.state().clone();

	// Act
	let after = form.on_blur(&FieldEvent::new("", "anything")).unwrap();

	// Assert
	assert_eq!(after, &before);
}

#[rstest]
fn test_unsubmitted_server_update_keeps_local_edits(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(Arc::clone(&schema), Arc::new(FormState::new()));
	form.on_blur(&FieldEvent::new("name", "John")).unwrap();
	let update = server(json!({ "values": { "name": "Server value" } }));

	// Act
	let ran = form.sync(update, schema);

	// Assert
	assert!(ran);
	assert_eq!(form.state().value("name"), Some("John"));
	assert!(form.state().is_touched("name"));
	assert!(!form.state().is_submitted());
}

#[rstest]
fn test_submitted_server_update_overrides_local_edits(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(Arc::clone(&schema), Arc::new(FormState::new()));
	form.on_blur(&FieldEvent::new("name", "Johnny")).unwrap();
	let result = server(json!({
		"values": { "name": "Johnny" },
		"formErrors": ["Name already taken"],
		"fieldErrors": {},
		"isSubmitted": true
	}));

	// Act
	form.sync(Arc::clone(&result), schema);

	// Assert
	assert_eq!(form.state(), result.as_ref());
	assert!(form.state().touched.is_none());
}

#[rstest]
fn test_schema_change_refreshes_errors_for_current_values(schema: Arc<Schema>) {
	// Arrange
	let initial = Arc::new(FormState::new());
	let mut form = FormController::new(schema, Arc::clone(&initial));
	form.on_change(&FieldEvent::new("name", "Johnny")).unwrap();
	form.on_change(&FieldEvent::new("address.line1", "1 Main Street")).unwrap();
	let stricter: Arc<Schema> = Arc::new(
		Schema::object()
			.field(
				"name",
				Schema::string()
					.min(5)
					.includes("w")
					.with_message("first name must include w"),
			)
			.field("address", Schema::object().field("line1", Schema::string()))
			.into(),
	);

	// Act
	let ran = form.sync(initial, Arc::clone(&stricter));

	// Assert
	assert!(ran);
	assert_eq!(form.state().field_messages("name"), ["first name must include w"]);
	assert_eq!(form.state().value("name"), Some("Johnny"));
	assert!(Arc::ptr_eq(form.schema(), &stricter));
}

#[rstest]
fn test_repeated_sync_with_same_references_is_skipped(schema: Arc<Schema>) {
	// Arrange
	let initial = Arc::new(FormState::new());
	let mut form = FormController::new(Arc::clone(&schema), Arc::clone(&initial));
	form.on_change(&FieldEvent::new("name", "Jo")).unwrap();
	let before = form.state().clone();

	// Act
	let ran = form.sync(initial, schema);

	// Assert
	assert!(!ran);
	assert_eq!(form.state(), &before);
}

#[rstest]
fn test_events_apply_in_dispatch_order(schema: Arc<Schema>) {
	// Arrange
	let mut form = FormController::new(schema, Arc::new(FormState::new()));

	// Act
	form.on_change(&FieldEvent::new("name", "J")).unwrap();
	form.on_change(&FieldEvent::new("name", "Johnny")).unwrap();
	form.on_blur(&FieldEvent::new("name", "Johnny")).unwrap();
	form.on_change(&FieldEvent::new("name", "Jo")).unwrap();

	// Assert
	let state = form.into_state();
	assert_eq!(state.value("name"), Some("Jo"));
	assert!(state.is_touched("name"));
	assert_eq!(
		state.field_messages("name"),
		["String must contain at least 5 character(s)"]
	);
}

#[rstest]
fn test_list_fields_by_index() {
	// Arrange
	let tags: Arc<Schema> = Arc::new(
		Schema::object()
			.field("tags", Schema::array(Schema::string().min(2)).min_items(1))
			.into(),
	);
	let mut form = FormController::new(tags, Arc::new(FormState::new()));

	// Act
	form.on_change(&FieldEvent::new("tags[1]", "x")).unwrap();

	// Assert
	let state = form.state();
	assert_eq!(snapshot(state)["values"], json!({ "tags": [null, "x"] }));
	assert_eq!(state.field_messages("tags.0"), ["Required"]);
	assert_eq!(
		state.field_messages("tags.1"),
		["String must contain at least 2 character(s)"]
	);
}
