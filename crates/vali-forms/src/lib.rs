//! Form state controller for vali
//!
//! This crate keeps a form's [`FormState`](vali_core::FormState) in step with
//! three sources of change: field edits, field blurs and an externally
//! supplied server snapshot.
//!
//! ## Layers
//!
//! - [`engine`]: pure transitions (`apply_field_change`, `apply_field_blur`,
//!   `apply_submit`, `revalidate`) that deep-assign a raw value, run the
//!   validator and split its result into form-level and field-level errors
//! - [`reconciler`]: folds a server snapshot into the local state, once per
//!   distinct server/schema reference
//! - [`controller`]: the stateful boundary a renderer drives, with snapshot
//!   listeners
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use vali_core::FormState;
//! use vali_forms::{FieldEvent, FormController};
//! use vali_validators::Schema;
//!
//! let schema: Schema = Schema::object().field("name", Schema::string().min(5)).into();
//! let mut form = FormController::new(Arc::new(schema), Arc::new(FormState::new()));
//!
//! let state = form.on_submit(&FieldEvent::submit());
//! assert!(state.is_submitted());
//! assert!(state.form_messages().is_empty());
//! assert_eq!(state.field_messages("name"), ["Required"]);
//! ```

pub mod controller;
pub mod engine;
pub mod error;
pub mod reconciler;
pub mod settings;

pub use controller::{FieldEvent, FormController, SubscriptionId};
pub use engine::{apply_field_blur, apply_field_change, apply_submit, revalidate};
pub use error::{FormError, FormResult};
pub use reconciler::{Reconciler, reconcile};
pub use settings::{FormSettings, SettingsError};
