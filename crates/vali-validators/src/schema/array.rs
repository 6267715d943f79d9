//! Array rules

use super::{REQUIRED_MESSAGE, Schema, invalid_type};
use crate::Issue;
use vali_core::{FieldTree, Values};

#[derive(Debug, Clone, Copy)]
enum Bound {
	Min(usize),
	Max(usize),
}

#[derive(Debug, Clone)]
struct SizeCheck {
	bound: Bound,
	message: Option<String>,
}

/// A list whose items all follow one schema.
///
/// Size rules are reported on the list node, item issues on `list.<index>`.
/// Holes left by sparse assignment validate as absent items.
///
/// # Examples
///
/// ```
/// use vali_validators::{Issue, Schema};
///
/// let schema: Schema = Schema::object()
///     .field("tags", Schema::array(Schema::string().min(2)).min_items(1))
///     .into();
///
/// let values = serde_json::from_str(r#"{"tags":["ok",null,"x"]}"#).unwrap();
/// assert_eq!(
///     schema.check(Some(&values)),
///     vec![
///         Issue::at(["tags", "1"], "Required"),
///         Issue::at(["tags", "2"], "String must contain at least 2 character(s)"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ArraySchema {
	item: Box<Schema>,
	checks: Vec<SizeCheck>,
}

impl ArraySchema {
	pub fn new(item: impl Into<Schema>) -> Self {
		Self {
			item: Box::new(item.into()),
			checks: Vec::new(),
		}
	}

	fn bound(mut self, bound: Bound) -> Self {
		self.checks.push(SizeCheck {
			bound,
			message: None,
		});
		self
	}

	pub fn min_items(self, min: usize) -> Self {
		self.bound(Bound::Min(min))
	}

	pub fn max_items(self, max: usize) -> Self {
		self.bound(Bound::Max(max))
	}

	/// Replaces the message of the most recently added size rule.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		if let Some(check) = self.checks.last_mut() {
			check.message = Some(message.into());
		}
		self
	}

	pub fn item(&self) -> &Schema {
		&self.item
	}

	/// Shorthand for wrapping this schema in [`Schema::Optional`].
	pub fn optional(self) -> Schema {
		Schema::from(self).optional()
	}

	pub(crate) fn collect(
		&self,
		value: Option<&Values>,
		path: &mut Vec<String>,
		issues: &mut Vec<Issue>,
	) {
		let items = match value {
			None => {
				issues.push(Issue::at(path.clone(), REQUIRED_MESSAGE));
				return;
			}
			Some(FieldTree::List(items)) => items,
			Some(other) => {
				issues.push(Issue::at(path.clone(), invalid_type("array", other)));
				return;
			}
		};

		let len = items.len();
		for check in &self.checks {
			let violation = match check.bound {
				Bound::Min(min) if len < min => {
					Some(format!("Array must contain at least {} element(s)", min))
				}
				Bound::Max(max) if len > max => {
					Some(format!("Array must contain at most {} element(s)", max))
				}
				_ => None,
			};
			if let Some(default_message) = violation {
				let message = check.message.clone().unwrap_or(default_message);
				issues.push(Issue::at(path.clone(), message));
			}
		}

		for (index, item) in items.iter().enumerate() {
			path.push(index.to_string());
			self.item.collect(item.as_deref(), path, issues);
			path.pop();
		}
	}
}
