//! Form state controller
//!
//! [`FormController`] owns one [`FormState`] and is the boundary a renderer
//! talks to. The renderer forwards input events to [`FormController::on_change`],
//! [`FormController::on_blur`] and [`FormController::on_submit`], calls
//! [`FormController::sync`] after every render with the server snapshot and
//! schema it rendered with, and reads the published snapshot through
//! [`FormController::state`] or a [`FormController::subscribe`] listener.
//!
//! Handlers run synchronously in call order; nothing is queued or coalesced.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use vali_core::FormState;
//! use vali_forms::{FieldEvent, FormController};
//! use vali_validators::Schema;
//!
//! let schema: Schema = Schema::object()
//!     .field("name", Schema::string().min(5))
//!     .field("address", Schema::object().field("line1", Schema::string()))
//!     .into();
//! let mut form = FormController::new(Arc::new(schema), Arc::new(FormState::new()));
//! assert_eq!(form.state().form_messages(), ["Required"]);
//!
//! form.on_change(&FieldEvent::new("name", "John")).unwrap();
//! form.on_blur(&FieldEvent::new("name", "John")).unwrap();
//! form.on_change(&FieldEvent::new("address.line1", "1 Main Street")).unwrap();
//!
//! let state = form.state();
//! assert!(state.is_touched("name"));
//! assert_eq!(state.value("address.line1"), Some("1 Main Street"));
//! assert_eq!(state.field_messages("name"), ["String must contain at least 5 character(s)"]);
//! ```

use crate::engine::{apply_submit, merge_field};
use crate::error::FormResult;
use crate::reconciler::Reconciler;
use crate::settings::FormSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use vali_core::FormState;
use vali_validators::Validator;

/// The event-like object a renderer hands to a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent {
	/// Dotted path of the field; may be empty
	pub name: String,
	/// Raw input value
	pub value: String,
}

impl FieldEvent {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}

	/// An event without field identity, as fired by a form's submit.
	pub fn submit() -> Self {
		Self::default()
	}
}

/// Handle returned by [`FormController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormState)>;

/// Holds a form's state and applies renderer events to it.
///
/// `V` defaults to `dyn Validator`, so controllers over different schema
/// types can share one type.
pub struct FormController<V: Validator + ?Sized = dyn Validator> {
	state: FormState,
	schema: Arc<V>,
	server_state: Arc<FormState>,
	reconciler: Reconciler<V>,
	settings: FormSettings,
	listeners: Vec<(SubscriptionId, Listener)>,
	next_subscription: u64,
}

impl<V: Validator + ?Sized> FormController<V> {
	/// Creates a controller from a schema and a server snapshot, using
	/// default [`FormSettings`].
	pub fn new(schema: Arc<V>, server_state: Arc<FormState>) -> Self {
		Self::with_settings(schema, server_state, FormSettings::default())
	}

	/// Creates a controller with explicit settings.
	///
	/// The initial state is a copy of `server_state`. With
	/// `revalidate_on_mount` the reconciliation pass runs immediately, so a
	/// fresh form already reports what its schema requires.
	pub fn with_settings(
		schema: Arc<V>,
		server_state: Arc<FormState>,
		settings: FormSettings,
	) -> Self {
		let mut reconciler = Reconciler::new();
		let initial = (*server_state).clone();
		let state = if settings.revalidate_on_mount {
			reconciler
				.run(&initial, &server_state, &schema)
				.unwrap_or(initial)
		} else {
			reconciler.observe(&server_state, &schema);
			initial
		};

		Self {
			state,
			schema,
			server_state,
			reconciler,
			settings,
			listeners: Vec::new(),
			next_subscription: 0,
		}
	}

	/// Handles a change event: stores the raw value and revalidates.
	///
	/// # Errors
	///
	/// Returns [`FormError::Path`](crate::FormError::Path) when the field name
	/// is malformed or does not fit the current values. The state is left as
	/// it was and nothing is published.
	pub fn on_change(&mut self, event: &FieldEvent) -> FormResult<&FormState> {
		let next = merge_field(
			&self.state,
			self.schema.as_ref(),
			&event.name,
			event.value.clone(),
			false,
			self.settings.path_limits(),
		)?;
		self.publish(next);
		Ok(&self.state)
	}

	/// Handles a blur event: stores the raw value, marks the field touched and
	/// revalidates.
	///
	/// An event with an empty name leaves the state alone and publishes
	/// nothing.
	///
	/// # Errors
	///
	/// Same as [`FormController::on_change`].
	pub fn on_blur(&mut self, event: &FieldEvent) -> FormResult<&FormState> {
		if event.name.is_empty() {
			trace!("blur without a field name ignored");
			return Ok(&self.state);
		}
		let next = merge_field(
			&self.state,
			self.schema.as_ref(),
			&event.name,
			event.value.clone(),
			true,
			self.settings.path_limits(),
		)?;
		self.publish(next);
		Ok(&self.state)
	}

	/// Handles a submit event. The event's name and value are ignored.
	pub fn on_submit(&mut self, _event: &FieldEvent) -> &FormState {
		let next = apply_submit(&self.state, self.schema.as_ref());
		self.publish(next);
		&self.state
	}

	/// Post-render hook: reconciles against the server snapshot and schema
	/// the host rendered with.
	///
	/// Returns `true` when a pass ran, which happens only if either reference
	/// differs from the previous call.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use vali_core::FormState;
	/// use vali_forms::FormController;
	/// use vali_validators::Schema;
	///
	/// let schema = Arc::new(Schema::from(Schema::object().field("name", Schema::string())));
	/// let server = Arc::new(FormState::new());
	/// let mut form = FormController::new(Arc::clone(&schema), Arc::clone(&server));
	///
	/// assert!(!form.sync(Arc::clone(&server), Arc::clone(&schema)));
	///
	/// let submitted: FormState = serde_json::from_str(r#"{"isSubmitted":true}"#).unwrap();
	/// assert!(form.sync(Arc::new(submitted.clone()), schema));
	/// assert_eq!(form.state(), &submitted);
	/// ```
	pub fn sync(&mut self, server_state: Arc<FormState>, schema: Arc<V>) -> bool {
		let Some(next) = self.reconciler.run(&self.state, &server_state, &schema) else {
			return false;
		};
		self.server_state = server_state;
		self.schema = schema;
		self.publish(next);
		true
	}

	/// Registers a listener called with every newly published snapshot.
	pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
	where
		F: FnMut(&FormState) + 'static,
	{
		let id = SubscriptionId(self.next_subscription);
		self.next_subscription += 1;
		self.listeners.push((id, Box::new(listener)));
		id
	}

	/// Removes a listener; returns whether it was registered.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(existing, _)| *existing != id);
		self.listeners.len() != before
	}

	pub fn state(&self) -> &FormState {
		&self.state
	}

	pub fn schema(&self) -> &Arc<V> {
		&self.schema
	}

	/// The server snapshot of the last reconciliation.
	pub fn server_state(&self) -> &Arc<FormState> {
		&self.server_state
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn into_state(self) -> FormState {
		self.state
	}

	fn publish(&mut self, next: FormState) {
		self.state = next;
		debug!(listeners = self.listeners.len(), "publishing form state");
		for (_, listener) in &mut self.listeners {
			listener(&self.state);
		}
	}
}

impl<V: Validator + ?Sized> fmt::Debug for FormController<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormController")
			.field("state", &self.state)
			.field("server_state", &self.server_state)
			.field("settings", &self.settings)
			.field("listeners", &self.listeners.len())
			.finish_non_exhaustive()
	}
}
