//! Validation error trees
//!
//! A failed validation is reported as a tree that follows the shape of the
//! validated values. Every node carries its own ordered message list under
//! the `_errors` key, next to the nodes of its children:
//!
//! ```json
//! {
//!   "_errors": ["Passwords do not match"],
//!   "name": { "_errors": ["String must contain at least 5 character(s)"] },
//!   "address": { "_errors": [], "line1": { "_errors": ["Required"] } }
//! }
//! ```
//!
//! The root list holds form-level messages. [`FieldErrors`] is the root with
//! that list removed, which is what a [`FormState`](crate::state::FormState)
//! keeps as its per-field errors.

use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which every error node stores its own messages.
pub const ERRORS_KEY: &str = "_errors";

/// Per-field errors: the children of a root [`ErrorNode`].
pub type FieldErrors = BTreeMap<String, ErrorNode>;

/// One node of a validation error tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNode {
	/// Messages attached to this exact node
	#[serde(rename = "_errors", default)]
	pub errors: Vec<String>,

	/// Nested nodes keyed by path segment
	#[serde(flatten)]
	pub children: BTreeMap<String, ErrorNode>,
}

impl ErrorNode {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `message` to the node at `path`, creating intermediate nodes
	/// with empty message lists.
	///
	/// An empty `path` targets this node.
	///
	/// # Examples
	///
	/// ```
	/// use vali_core::error_tree::ErrorNode;
	///
	/// let mut root = ErrorNode::new();
	/// root.insert(["address", "line1"], "Required");
	/// root.insert(Vec::<String>::new(), "Passwords do not match");
	///
	/// assert_eq!(root.errors, vec!["Passwords do not match"]);
	/// assert!(root.children["address"].errors.is_empty());
	/// assert_eq!(root.children["address"].children["line1"].errors, vec!["Required"]);
	/// ```
	pub fn insert<I, S>(&mut self, path: I, message: impl Into<String>)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let node = path
			.into_iter()
			.fold(self, |node, segment| node.children.entry(segment.into()).or_default());
		node.errors.push(message.into());
	}

	/// The node at `path`, if any.
	pub fn node(&self, path: &FieldPath) -> Option<&ErrorNode> {
		path.segments()
			.iter()
			.try_fold(self, |node, segment| node.children.get(segment.key()))
	}

	/// Messages of the node at `path`; empty when the node does not exist.
	pub fn messages_at(&self, path: &FieldPath) -> &[String] {
		self.node(path)
			.map(|node| node.errors.as_slice())
			.unwrap_or(&[])
	}

	/// `true` when no message exists anywhere in this subtree.
	pub fn is_clean(&self) -> bool {
		self.errors.is_empty() && self.children.values().all(ErrorNode::is_clean)
	}

	/// Total number of messages in this subtree.
	pub fn message_count(&self) -> usize {
		self.errors.len()
			+ self
				.children
				.values()
				.map(ErrorNode::message_count)
				.sum::<usize>()
	}

	/// Splits the root into its own messages and its children.
	pub fn into_parts(self) -> (Vec<String>, FieldErrors) {
		(self.errors, self.children)
	}
}

/// The error node at `path` within per-field errors.
pub fn lookup<'a>(errors: &'a FieldErrors, path: &FieldPath) -> Option<&'a ErrorNode> {
	let (first, rest) = path.segments().split_first()?;
	rest.iter()
		.try_fold(errors.get(first.key())?, |node, segment| {
			node.children.get(segment.key())
		})
}
