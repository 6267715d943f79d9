//! Validation outcomes
//!
//! Validators report problems as [`Issue`]s: a message plus the path of the
//! node it belongs to. [`FormattedError`] folds a list of issues into an
//! [`ErrorNode`] tree, the same way every node of the tree keeps its own
//! `_errors` list.

use serde::{Deserialize, Serialize};
use vali_core::{ErrorNode, FieldErrors};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
	/// Segments of the offending node; empty for form-level problems
	pub path: Vec<String>,
	/// Human readable message
	pub message: String,
}

impl Issue {
	/// A form-level issue.
	pub fn root(message: impl Into<String>) -> Self {
		Self {
			path: Vec::new(),
			message: message.into(),
		}
	}

	/// An issue attached to the node at `path`.
	pub fn at<I, S>(path: I, message: impl Into<String>) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			path: path.into_iter().map(Into::into).collect(),
			message: message.into(),
		}
	}

	pub fn is_form_level(&self) -> bool {
		self.path.is_empty()
	}
}

/// The error tree of a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedError {
	root: ErrorNode,
}

impl FormattedError {
	/// Folds `issues` into a tree, keeping their order within each node.
	///
	/// # Examples
	///
	/// ```
	/// use vali_validators::{FormattedError, Issue};
	///
	/// let error = FormattedError::from_issues([
	///     Issue::root("Passwords do not match"),
	///     Issue::at(["name"], "Required"),
	/// ]);
	///
	/// assert_eq!(error.form_errors(), ["Passwords do not match"]);
	/// let (form_errors, field_errors) = error.decompose();
	/// assert_eq!(form_errors, vec!["Passwords do not match"]);
	/// assert_eq!(field_errors["name"].errors, vec!["Required"]);
	/// ```
	pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
		let mut root = ErrorNode::new();
		for issue in issues {
			root.insert(issue.path, issue.message);
		}
		Self { root }
	}

	/// Wraps an already formatted tree.
	pub fn from_tree(root: ErrorNode) -> Self {
		Self { root }
	}

	pub fn root(&self) -> &ErrorNode {
		&self.root
	}

	/// Form-level messages.
	pub fn form_errors(&self) -> &[String] {
		&self.root.errors
	}

	/// Splits the tree into form-level messages and per-field errors.
	///
	/// The form-level list is removed from the tree rather than kept as a
	/// field under an empty key.
	pub fn decompose(self) -> (Vec<String>, FieldErrors) {
		self.root.into_parts()
	}
}

/// Result of running a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
	Success,
	Failure(FormattedError),
}

impl ValidationOutcome {
	/// `Success` for an empty issue list, `Failure` otherwise.
	pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
		let mut issues = issues.into_iter().peekable();
		if issues.peek().is_none() {
			Self::Success
		} else {
			Self::Failure(FormattedError::from_issues(issues))
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success)
	}

	/// Form-level and per-field errors; both empty on success.
	pub fn into_errors(self) -> (Vec<String>, FieldErrors) {
		match self {
			Self::Success => (Vec::new(), FieldErrors::new()),
			Self::Failure(error) => error.decompose(),
		}
	}
}
