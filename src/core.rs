//! Field trees, paths and state snapshots.
//!
//! # Examples
//!
//! ```
//! use vali::core::{FieldPath, FormState};
//!
//! let path = FieldPath::parse("items[0].title").unwrap();
//! assert_eq!(path.to_string(), "items.0.title");
//! assert!(FormState::new().values.is_none());
//! ```

pub use vali_core::*;
