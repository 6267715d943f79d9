//! Merge/validate engine
//!
//! Pure state transitions. Each function takes the current snapshot and
//! returns the next one; the input is never modified, and a failed path
//! assignment leaves nothing half-applied.
//!
//! ```text
//! change(path, raw) ──▶ values.set(path, raw) ──▶ validate ──▶ fieldErrors / formErrors
//! blur(path, raw)   ──▶ values.set + touched.set(path, true) ──▶ validate ──▶ ...
//! submit            ──▶ validate(values or {}) ──▶ isSubmitted = true
//! ```

use crate::error::{FormError, FormResult};
use tracing::{debug, warn};
use vali_core::{FieldPath, FieldTree, FormState, PathLimits, PathResult};
use vali_validators::Validator;

/// Stores `raw_value` at `path` and revalidates.
///
/// `touched` is carried over unchanged.
///
/// # Examples
///
/// ```
/// use vali_core::FormState;
/// use vali_forms::engine::apply_field_change;
/// use vali_validators::Schema;
///
/// let schema: Schema = Schema::object().field("name", Schema::string().min(5)).into();
/// let next = apply_field_change(&FormState::new(), &schema, "name", "John").unwrap();
///
/// assert_eq!(next.value("name"), Some("John"));
/// assert!(next.form_messages().is_empty());
/// assert_eq!(next.field_messages("name"), ["String must contain at least 5 character(s)"]);
/// assert!(!next.is_touched("name"));
/// ```
pub fn apply_field_change<V>(
	state: &FormState,
	validator: &V,
	path: &str,
	raw_value: impl Into<String>,
) -> FormResult<FormState>
where
	V: Validator + ?Sized,
{
	merge_field(state, validator, path, raw_value.into(), false, PathLimits::default())
}

/// Stores `raw_value` at `path`, marks the field touched and revalidates.
///
/// An empty `path` (a blur fired by an element without a name) returns the
/// input snapshot unchanged.
pub fn apply_field_blur<V>(
	state: &FormState,
	validator: &V,
	path: &str,
	raw_value: impl Into<String>,
) -> FormResult<FormState>
where
	V: Validator + ?Sized,
{
	if path.is_empty() {
		return Ok(state.clone());
	}
	merge_field(state, validator, path, raw_value.into(), true, PathLimits::default())
}

/// Validates the current values and marks the form submitted.
///
/// Absent values are validated as an empty object, the same starting point
/// field edits merge into, so required fields report on themselves rather
/// than on the whole form. The values member itself is left as it was.
pub fn apply_submit<V>(state: &FormState, validator: &V) -> FormState
where
	V: Validator + ?Sized,
{
	let empty = FieldTree::empty_map();
	let values = state.values.as_ref().unwrap_or(&empty);
	let mut next = with_validation(state.clone(), validator, Some(values));
	next.is_submitted = Some(true);
	debug!(form_errors = next.form_messages().len(), "form submitted");
	next
}

/// Refreshes `fieldErrors` / `formErrors` against the current values.
///
/// Values, touched flags and the submitted flag are kept. Absent values are
/// passed to the validator as absent.
pub fn revalidate<V>(state: &FormState, validator: &V) -> FormState
where
	V: Validator + ?Sized,
{
	with_validation(state.clone(), validator, state.values.as_ref())
}

pub(crate) fn merge_field<V>(
	state: &FormState,
	validator: &V,
	path: &str,
	raw_value: String,
	mark_touched: bool,
	limits: PathLimits,
) -> FormResult<FormState>
where
	V: Validator + ?Sized,
{
	let field_path = FieldPath::parse(path).map_err(|source| {
		warn!(field = path, error = %source, "rejected field name");
		FormError::path(path, source)
	})?;

	let assigned = assign(state.values.as_ref(), &field_path, raw_value, limits)
		.and_then(|values| {
			let touched = if mark_touched {
				Some(assign(state.touched.as_ref(), &field_path, true, limits)?)
			} else {
				state.touched.clone()
			};
			Ok((values, touched))
		});
	let (values, touched) = assigned.map_err(|source| {
		warn!(field = path, error = %source, "field name does not fit the form shape");
		FormError::path(path, source)
	})?;

	let next = FormState {
		touched,
		..state.clone()
	};
	let mut next = with_validation(next, validator, Some(&values));
	next.values = Some(values);

	debug!(
		field = path,
		touched = mark_touched,
		form_errors = next.form_messages().len(),
		field_errors = next.field_messages(path).len(),
		"field merged"
	);
	Ok(next)
}

fn assign<L>(
	tree: Option<&FieldTree<L>>,
	path: &FieldPath,
	leaf: L,
	limits: PathLimits,
) -> PathResult<FieldTree<L>> {
	match tree {
		Some(tree) => tree.set_bounded(path, leaf, limits),
		None => FieldTree::empty_map().set_bounded(path, leaf, limits),
	}
}

fn with_validation<V>(
	mut state: FormState,
	validator: &V,
	values: Option<&FieldTree<String>>,
) -> FormState
where
	V: Validator + ?Sized,
{
	let (form_errors, field_errors) = validator.validate(values).into_errors();
	state.form_errors = Some(form_errors);
	state.field_errors = Some(field_errors);
	state
}
