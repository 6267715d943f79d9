//! Field path parsing
//!
//! Renderers identify a form field by the `name` attribute bound to it, such as
//! `name`, `address.line1` or `items[0].title`. [`FieldPath`] turns that
//! identifier into a list of [`PathSegment`]s that the tree operations walk.
//!
//! ## Syntax
//!
//! - Dotted keys: `address.line1`
//! - Dotted indices: `items.0.title`
//! - Bracket indices: `items[0].title`, `matrix[1][2]`
//!
//! A segment made of a canonical non-negative integer (`0`, `1`, `42`, but not
//! `01`) is an *index candidate*. When a container has to be created for it,
//! that container is a list; when the existing container is a map, the segment
//! is used as a plain string key.

use std::fmt;

/// Default upper bound for list indices accepted by tree assignment.
///
/// Renderers pass raw field names, so a name like `items.4294967295` must not
/// be able to allocate an arbitrarily large list.
pub const DEFAULT_MAX_LIST_INDEX: usize = 1024;

/// Default upper bound for the number of segments an assignment may walk.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Errors raised while parsing a field path or applying it to a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
	#[error("Field path is empty")]
	Empty,
	#[error("Field path '{path}' contains an empty segment")]
	EmptySegment { path: String },
	#[error("Field path '{path}' has a malformed index bracket")]
	MalformedBracket { path: String },
	#[error("Index {index} at '{at}' exceeds the maximum list index {max}")]
	IndexTooLarge { at: String, index: usize, max: usize },
	#[error("Field path has {depth} segments, more than the maximum depth {max}")]
	TooDeep { depth: usize, max: usize },
	#[error("Cannot descend into the leaf at '{at}'")]
	ThroughLeaf { at: String },
	#[error("Cannot assign a leaf over the container at '{at}'")]
	OverContainer { at: String },
	#[error("Segment '{segment}' is not a valid index for the list at '{at}'")]
	NotAnIndex { at: String, segment: String },
}

pub type PathResult<T> = Result<T, PathError>;

/// Bounds applied when a path is assigned into a tree.
///
/// # Examples
///
/// ```
/// use vali_core::path::{FieldPath, PathError, PathLimits};
///
/// let limits = PathLimits::new().with_max_depth(2);
/// let path = FieldPath::parse("a.b.c").unwrap();
/// assert_eq!(
///     limits.check_depth(&path),
///     Err(PathError::TooDeep { depth: 3, max: 2 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLimits {
	/// Largest list index a segment may address
	pub max_list_index: usize,
	/// Largest number of segments a path may have
	pub max_depth: usize,
}

impl Default for PathLimits {
	fn default() -> Self {
		Self {
			max_list_index: DEFAULT_MAX_LIST_INDEX,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl PathLimits {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_list_index(mut self, max_list_index: usize) -> Self {
		self.max_list_index = max_list_index;
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Rejects paths with more segments than `max_depth`.
	pub fn check_depth(&self, path: &FieldPath) -> PathResult<()> {
		if path.len() > self.max_depth {
			return Err(PathError::TooDeep {
				depth: path.len(),
				max: self.max_depth,
			});
		}
		Ok(())
	}

	pub(crate) fn check_index(
		&self,
		path: &FieldPath,
		depth: usize,
		index: usize,
	) -> PathResult<()> {
		if index > self.max_list_index {
			return Err(PathError::IndexTooLarge {
				at: path.prefix(depth),
				index,
				max: self.max_list_index,
			});
		}
		Ok(())
	}
}

/// A single step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
	key: String,
	index: Option<usize>,
}

impl PathSegment {
	/// Creates a segment, detecting whether it can address a list slot.
	///
	/// # Examples
	///
	/// ```
	/// use vali_core::path::PathSegment;
	///
	/// assert_eq!(PathSegment::new("3").index(), Some(3));
	/// assert_eq!(PathSegment::new("03").index(), None);
	/// assert_eq!(PathSegment::new("line1").index(), None);
	/// ```
	pub fn new(key: impl Into<String>) -> Self {
		let key = key.into();
		let index = canonical_index(&key);
		Self { key, index }
	}

	/// The segment as a map key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The segment as a list index, when it is a canonical integer.
	pub fn index(&self) -> Option<usize> {
		self.index
	}
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.key)
	}
}

fn canonical_index(key: &str) -> Option<usize> {
	let mut chars = key.chars();
	match chars.next() {
		Some('0') if key.len() == 1 => Some(0),
		Some('1'..='9') if chars.all(|c| c.is_ascii_digit()) => key.parse().ok(),
		_ => None,
	}
}

/// A parsed, non-empty field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
	segments: Vec<PathSegment>,
}

impl FieldPath {
	/// Parses a renderer field name into a path.
	///
	/// # Examples
	///
	/// ```
	/// use vali_core::path::FieldPath;
	///
	/// let path = FieldPath::parse("items[2].title").unwrap();
	/// assert_eq!(path.len(), 3);
	/// assert_eq!(path.to_string(), "items.2.title");
	///
	/// assert!(FieldPath::parse("").is_err());
	/// assert!(FieldPath::parse("address..line1").is_err());
	/// ```
	pub fn parse(raw: &str) -> PathResult<Self> {
		if raw.is_empty() {
			return Err(PathError::Empty);
		}

		let empty_segment = || PathError::EmptySegment {
			path: raw.to_string(),
		};
		let malformed = || PathError::MalformedBracket {
			path: raw.to_string(),
		};

		let mut segments = Vec::new();
		let mut current = String::new();
		let mut after_bracket = false;
		let mut chars = raw.chars().peekable();

		while let Some(c) = chars.next() {
			match c {
				'.' => {
					if current.is_empty() && !after_bracket {
						return Err(empty_segment());
					}
					if !current.is_empty() {
						segments.push(PathSegment::new(std::mem::take(&mut current)));
					}
					match chars.peek() {
						None => return Err(empty_segment()),
						Some('[') => return Err(malformed()),
						Some(_) => {}
					}
					after_bracket = false;
				}
				'[' => {
					if !current.is_empty() {
						segments.push(PathSegment::new(std::mem::take(&mut current)));
					}
					let mut digits = String::new();
					loop {
						match chars.next() {
							Some(']') => break,
							Some(d) => digits.push(d),
							None => return Err(malformed()),
						}
					}
					let segment = PathSegment::new(digits);
					if segment.index().is_none() {
						return Err(malformed());
					}
					segments.push(segment);
					if !matches!(chars.peek(), None | Some('.') | Some('[')) {
						return Err(malformed());
					}
					after_bracket = true;
				}
				']' => return Err(malformed()),
				_ => current.push(c),
			}
		}

		if !current.is_empty() {
			segments.push(PathSegment::new(current));
		}

		Ok(Self { segments })
	}

	/// Builds a path from already split segments.
	///
	/// Returns `None` when `segments` is empty.
	pub fn from_segments<I, S>(segments: I) -> Option<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let segments: Vec<_> = segments.into_iter().map(PathSegment::new).collect();
		(!segments.is_empty()).then_some(Self { segments })
	}

	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Always `false`; parsed paths hold at least one segment.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Dotted rendering of the first `depth` segments, used in error reports.
	pub fn prefix(&self, depth: usize) -> String {
		self.segments[..depth.min(self.segments.len())]
			.iter()
			.map(PathSegment::key)
			.collect::<Vec<_>>()
			.join(".")
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.prefix(self.segments.len()))
	}
}

impl std::str::FromStr for FieldPath {
	type Err = PathError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
