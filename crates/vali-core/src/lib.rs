//! Core data types for vali
//!
//! This crate provides the building blocks shared by the validator contract
//! and the form controller:
//! - [`FieldPath`]: parsing of renderer field names (`address.line1`, `items[0].title`)
//! - [`FieldTree`]: a persistent, sparse tree mirroring the schema shape
//! - [`ErrorNode`] / [`FieldErrors`]: validation error trees
//! - [`FormState`]: the snapshot a form controller publishes

pub mod error_tree;
pub mod path;
pub mod state;
pub mod tree;

pub use error_tree::{ERRORS_KEY, ErrorNode, FieldErrors};
pub use path::{
	DEFAULT_MAX_DEPTH, DEFAULT_MAX_LIST_INDEX, FieldPath, PathError, PathLimits, PathResult,
	PathSegment,
};
pub use state::{FormState, Touched, Values};
pub use tree::FieldTree;
