//! String rules

use super::{REQUIRED_MESSAGE, invalid_type};
use crate::Issue;
use regex::Regex;
use std::sync::LazyLock;
use vali_core::{FieldTree, Values};

// Local part of letters, digits and `_'+-.`, not starting with a dot; a
// domain of hyphenated labels ending in an alphabetic TLD.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

#[derive(Debug, Clone)]
enum Rule {
	Min(usize),
	Max(usize),
	Length(usize),
	Includes(String),
	StartsWith(String),
	EndsWith(String),
	Email,
	Regex(Regex),
}

impl Rule {
	/// Default message when `text` violates the rule.
	fn violation(&self, text: &str, length: usize) -> Option<String> {
		match self {
			Rule::Min(min) if length < *min => Some(format!(
				"String must contain at least {} character(s)",
				min
			)),
			Rule::Max(max) if length > *max => Some(format!(
				"String must contain at most {} character(s)",
				max
			)),
			Rule::Length(exact) if length != *exact => Some(format!(
				"String must contain exactly {} character(s)",
				exact
			)),
			Rule::Includes(needle) if !text.contains(needle.as_str()) => {
				Some(format!("Invalid input: must include \"{}\"", needle))
			}
			Rule::StartsWith(prefix) if !text.starts_with(prefix.as_str()) => {
				Some(format!("Invalid input: must start with \"{}\"", prefix))
			}
			Rule::EndsWith(suffix) if !text.ends_with(suffix.as_str()) => {
				Some(format!("Invalid input: must end with \"{}\"", suffix))
			}
			Rule::Email if !is_email(text) => Some("Invalid email".to_string()),
			Rule::Regex(regex) if !regex.is_match(text) => Some("Invalid".to_string()),
			_ => None,
		}
	}
}

fn is_email(text: &str) -> bool {
	!text.starts_with('.') && !text.contains("..") && EMAIL_REGEX.is_match(text)
}

#[derive(Debug, Clone)]
struct Check {
	rule: Rule,
	message: Option<String>,
}

/// Rules for a string leaf.
///
/// Every failing rule is reported, in the order the rules were added.
/// Lengths count Unicode scalar values.
///
/// # Examples
///
/// ```
/// use vali_validators::Schema;
///
/// let schema = Schema::string()
///     .min(5)
///     .includes("w")
///     .with_message("first name must include w");
///
/// let messages: Vec<_> = schema
///     .check_str("John")
///     .into_iter()
///     .map(|issue| issue.message)
///     .collect();
/// assert_eq!(
///     messages,
///     vec!["String must contain at least 5 character(s)", "first name must include w"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
	checks: Vec<Check>,
}

impl StringSchema {
	pub fn new() -> Self {
		Self::default()
	}

	fn rule(mut self, rule: Rule) -> Self {
		self.checks.push(Check {
			rule,
			message: None,
		});
		self
	}

	/// Minimum number of characters.
	pub fn min(self, min: usize) -> Self {
		self.rule(Rule::Min(min))
	}

	/// Maximum number of characters.
	pub fn max(self, max: usize) -> Self {
		self.rule(Rule::Max(max))
	}

	/// Exact number of characters.
	pub fn length(self, exact: usize) -> Self {
		self.rule(Rule::Length(exact))
	}

	/// At least one character.
	pub fn non_empty(self) -> Self {
		self.min(1)
	}

	pub fn includes(self, needle: impl Into<String>) -> Self {
		self.rule(Rule::Includes(needle.into()))
	}

	pub fn starts_with(self, prefix: impl Into<String>) -> Self {
		self.rule(Rule::StartsWith(prefix.into()))
	}

	pub fn ends_with(self, suffix: impl Into<String>) -> Self {
		self.rule(Rule::EndsWith(suffix.into()))
	}

	pub fn email(self) -> Self {
		self.rule(Rule::Email)
	}

	/// Requires a match of `pattern`.
	///
	/// # Examples
	///
	/// ```
	/// use vali_validators::Schema;
	///
	/// let postcode = Schema::string().regex(r"^\d{5}$").unwrap();
	/// assert!(postcode.check_str("12345").is_empty());
	/// assert_eq!(postcode.check_str("1234")[0].message, "Invalid");
	/// ```
	pub fn regex(self, pattern: &str) -> Result<Self, regex::Error> {
		Ok(self.rule(Rule::Regex(Regex::new(pattern)?)))
	}

	/// Replaces the message of the most recently added rule.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		if let Some(check) = self.checks.last_mut() {
			check.message = Some(message.into());
		}
		self
	}

	/// Shorthand for wrapping this schema in [`Schema::Optional`](super::Schema::Optional).
	pub fn optional(self) -> super::Schema {
		super::Schema::from(self).optional()
	}

	/// Validates a bare string, reporting issues at the root.
	pub fn check_str(&self, text: &str) -> Vec<Issue> {
		let mut issues = Vec::new();
		self.check_text(text, &[], &mut issues);
		issues
	}

	pub(crate) fn collect(&self, value: Option<&Values>, path: &[String], issues: &mut Vec<Issue>) {
		match value {
			None => issues.push(Issue::at(path.to_vec(), REQUIRED_MESSAGE)),
			Some(FieldTree::Leaf(text)) => self.check_text(text, path, issues),
			Some(other) => issues.push(Issue::at(path.to_vec(), invalid_type("string", other))),
		}
	}

	fn check_text(&self, text: &str, path: &[String], issues: &mut Vec<Issue>) {
		let length = text.chars().count();
		for check in &self.checks {
			if let Some(default_message) = check.rule.violation(text, length) {
				let message = check.message.clone().unwrap_or(default_message);
				issues.push(Issue::at(path.to_vec(), message));
			}
		}
	}
}
