//! Lifecycle reconciliation
//!
//! A host re-renders with a (possibly new) server snapshot and a (possibly
//! new) schema. [`reconcile`] folds them into the local state:
//!
//! - a server snapshot that is already submitted replaces the local state
//!   verbatim, errors included
//! - otherwise the local values are validated again with the given schema and
//!   only the error members are refreshed
//!
//! [`Reconciler`] decides *when* that pass runs. It remembers the last server
//! snapshot and schema it saw by pointer and runs the pass once per distinct
//! pair of references, never on deep equality.

use crate::engine::revalidate;
use std::sync::Arc;
use tracing::debug;
use vali_core::FormState;
use vali_validators::Validator;

/// Folds a server snapshot into the local state.
///
/// # Arguments
///
/// * `local` - The state the controller currently holds
/// * `server` - The externally supplied snapshot
/// * `validator` - The schema to validate the local values with
///
/// # Examples
///
/// ```
/// use vali_core::FormState;
/// use vali_forms::reconcile;
/// use vali_validators::Schema;
///
/// let schema: Schema = Schema::object().field("name", Schema::string()).into();
///
/// let fresh = reconcile(&FormState::new(), &FormState::new(), &schema);
/// assert_eq!(fresh.form_messages(), ["Required"]);
///
/// let server: FormState = serde_json::from_str(r#"{"isSubmitted":true}"#).unwrap();
/// assert_eq!(reconcile(&fresh, &server, &schema), server);
/// ```
pub fn reconcile<V>(local: &FormState, server: &FormState, validator: &V) -> FormState
where
	V: Validator + ?Sized,
{
	if server.is_submitted() {
		debug!("submitted server state replaces local state");
		return server.clone();
	}
	revalidate(local, validator)
}

/// Reference-tracking trigger for [`reconcile`].
#[derive(Debug)]
pub struct Reconciler<V: ?Sized> {
	server: Option<Arc<FormState>>,
	schema: Option<Arc<V>>,
}

impl<V: ?Sized> Default for Reconciler<V> {
	fn default() -> Self {
		Self {
			server: None,
			schema: None,
		}
	}
}

impl<V: ?Sized> Reconciler<V> {
	/// A reconciler that has seen nothing yet; its first [`run`](Self::run)
	/// always performs a pass.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether `server` or `schema` differs by reference from the last pair
	/// observed.
	pub fn needs_pass(&self, server: &Arc<FormState>, schema: &Arc<V>) -> bool {
		let same_server = self
			.server
			.as_ref()
			.is_some_and(|seen| Arc::ptr_eq(seen, server));
		let same_schema = self
			.schema
			.as_ref()
			.is_some_and(|seen| Arc::ptr_eq(seen, schema));
		!(same_server && same_schema)
	}

	/// Records `server` and `schema` as seen without running a pass.
	pub fn observe(&mut self, server: &Arc<FormState>, schema: &Arc<V>) {
		self.server = Some(Arc::clone(server));
		self.schema = Some(Arc::clone(schema));
	}
}

impl<V: Validator + ?Sized> Reconciler<V> {
	/// Runs [`reconcile`] if either reference changed since the last call.
	///
	/// Returns the reconciled state, or `None` when both references are the
	/// ones already seen.
	pub fn run(
		&mut self,
		local: &FormState,
		server: &Arc<FormState>,
		schema: &Arc<V>,
	) -> Option<FormState> {
		if !self.needs_pass(server, schema) {
			return None;
		}
		self.observe(server, schema);
		Some(reconcile(local, server, schema.as_ref()))
	}
}
