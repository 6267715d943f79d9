//! Generic field tree
//!
//! [`FieldTree`] mirrors the shape of a form schema: maps for objects, lists
//! for arrays and leaves for scalar fields. The same type carries every
//! per-field tree of a [`FormState`](crate::state::FormState): raw string
//! values (`FieldTree<String>`) and touched flags (`FieldTree<bool>`).
//!
//! Trees are persistent. [`FieldTree::set`] returns a new tree in which only
//! the nodes along the assigned path are rebuilt; all other branches are the
//! same `Arc` allocations as in the input tree.
//!
//! ## JSON shape
//!
//! ```
//! use vali_core::tree::FieldTree;
//!
//! let values: FieldTree<String> =
//!     serde_json::from_str(r#"{"address":{"line1":"1 Main Street"},"tags":["a",null,"c"]}"#).unwrap();
//! assert_eq!(values.leaf_at("address.line1").map(String::as_str), Some("1 Main Street"));
//! assert_eq!(values.leaf_at("tags.2").map(String::as_str), Some("c"));
//! assert!(values.leaf_at("tags.1").is_none());
//! ```

use crate::path::{FieldPath, PathError, PathLimits, PathResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A sparse tree of leaves addressed by [`FieldPath`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldTree<L> {
	/// A scalar field
	Leaf(L),
	/// An array; `None` marks a hole left by assigning past the end
	List(Vec<Option<Arc<FieldTree<L>>>>),
	/// An object keyed by field name
	Map(BTreeMap<String, Arc<FieldTree<L>>>),
}

impl<L> Default for FieldTree<L> {
	fn default() -> Self {
		Self::Map(BTreeMap::new())
	}
}

impl<L> FieldTree<L> {
	/// An empty object node.
	pub fn empty_map() -> Self {
		Self::default()
	}

	pub fn is_leaf(&self) -> bool {
		matches!(self, Self::Leaf(_))
	}

	/// `true` for containers without any children.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Leaf(_) => false,
			Self::List(items) => items.is_empty(),
			Self::Map(entries) => entries.is_empty(),
		}
	}

	pub fn as_leaf(&self) -> Option<&L> {
		match self {
			Self::Leaf(leaf) => Some(leaf),
			_ => None,
		}
	}

	/// Direct child lookup by a single key.
	///
	/// Lists are addressed with decimal keys.
	pub fn child(&self, key: &str) -> Option<&FieldTree<L>> {
		match self {
			Self::Map(entries) => entries.get(key).map(Arc::as_ref),
			Self::List(items) => key
				.parse::<usize>()
				.ok()
				.and_then(|index| items.get(index))
				.and_then(Option::as_deref),
			Self::Leaf(_) => None,
		}
	}

	/// Looks up the node at `path`.
	pub fn get(&self, path: &FieldPath) -> Option<&FieldTree<L>> {
		path.segments()
			.iter()
			.try_fold(self, |node, segment| match node {
				Self::Map(entries) => entries.get(segment.key()).map(Arc::as_ref),
				Self::List(items) => segment
					.index()
					.and_then(|index| items.get(index))
					.and_then(Option::as_deref),
				Self::Leaf(_) => None,
			})
	}

	/// Looks up the leaf at `path`.
	pub fn leaf(&self, path: &FieldPath) -> Option<&L> {
		self.get(path).and_then(FieldTree::as_leaf)
	}

	/// Looks up the leaf at a raw field name; unparsable names yield `None`.
	pub fn leaf_at(&self, raw_path: &str) -> Option<&L> {
		FieldPath::parse(raw_path)
			.ok()
			.and_then(|path| self.leaf(&path))
	}

	/// All leaves in depth-first order, paired with their dotted path.
	///
	/// # Examples
	///
	/// ```
	/// use vali_core::tree::FieldTree;
	///
	/// let touched: FieldTree<bool> =
	///     serde_json::from_str(r#"{"name":true,"address":{"line1":true}}"#).unwrap();
	/// let paths: Vec<_> = touched.leaves().into_iter().map(|(path, _)| path).collect();
	/// assert_eq!(paths, vec!["address.line1", "name"]);
	/// ```
	pub fn leaves(&self) -> Vec<(String, &L)> {
		let mut out = Vec::new();
		collect_leaves(self, &mut String::new(), &mut out);
		out
	}

	/// Returns a new tree with `leaf` stored at `path`.
	///
	/// Missing containers are created on the way: a list when the segment is
	/// an index candidate, a map otherwise. The default [`PathLimits`] apply;
	/// see [`FieldTree::set_bounded`].
	///
	/// # Examples
	///
	/// ```
	/// use vali_core::path::FieldPath;
	/// use vali_core::tree::FieldTree;
	///
	/// let path = FieldPath::parse("address.line1").unwrap();
	/// let values = FieldTree::empty_map().set(&path, "1 Main Street".to_string()).unwrap();
	/// assert_eq!(values.leaf(&path).map(String::as_str), Some("1 Main Street"));
	/// ```
	pub fn set(&self, path: &FieldPath, leaf: L) -> PathResult<Self> {
		self.set_bounded(path, leaf, PathLimits::default())
	}

	/// [`FieldTree::set`] with explicit bounds.
	///
	/// The path depth is checked before any node is visited.
	pub fn set_bounded(&self, path: &FieldPath, leaf: L, limits: PathLimits) -> PathResult<Self> {
		limits.check_depth(path)?;
		assign(Some(self), path, 0, leaf, &limits)
	}
}

fn collect_leaves<'a, L>(
	node: &'a FieldTree<L>,
	prefix: &mut String,
	out: &mut Vec<(String, &'a L)>,
) {
	let children: Vec<(String, &'a FieldTree<L>)> = match node {
		FieldTree::Leaf(leaf) => {
			out.push((prefix.clone(), leaf));
			return;
		}
		FieldTree::List(items) => items
			.iter()
			.enumerate()
			.filter_map(|(index, item)| item.as_deref().map(|child| (index.to_string(), child)))
			.collect(),
		FieldTree::Map(entries) => entries
			.iter()
			.map(|(key, child)| (key.clone(), child.as_ref()))
			.collect(),
	};

	for (key, child) in children {
		let len = prefix.len();
		if !prefix.is_empty() {
			prefix.push('.');
		}
		prefix.push_str(&key);
		collect_leaves(child, prefix, out);
		prefix.truncate(len);
	}
}

fn assign<L>(
	node: Option<&FieldTree<L>>,
	path: &FieldPath,
	depth: usize,
	leaf: L,
	limits: &PathLimits,
) -> PathResult<FieldTree<L>> {
	let Some(segment) = path.segments().get(depth) else {
		return match node {
			Some(FieldTree::List(_) | FieldTree::Map(_)) => Err(PathError::OverContainer {
				at: path.prefix(depth),
			}),
			_ => Ok(FieldTree::Leaf(leaf)),
		};
	};

	match node {
		Some(FieldTree::Leaf(_)) => Err(PathError::ThroughLeaf {
			at: path.prefix(depth),
		}),
		Some(FieldTree::Map(entries)) => {
			let existing = entries.get(segment.key()).map(Arc::as_ref);
			let child = assign(existing, path, depth + 1, leaf, limits)?;
			let mut entries = entries.clone();
			entries.insert(segment.key().to_string(), Arc::new(child));
			Ok(FieldTree::Map(entries))
		}
		Some(FieldTree::List(items)) => {
			let index = segment.index().ok_or_else(|| PathError::NotAnIndex {
				at: path.prefix(depth),
				segment: segment.key().to_string(),
			})?;
			limits.check_index(path, depth, index)?;
			let existing = items.get(index).and_then(Option::as_deref);
			let child = assign(existing, path, depth + 1, leaf, limits)?;
			let mut items = items.clone();
			if index >= items.len() {
				items.resize(index + 1, None);
			}
			items[index] = Some(Arc::new(child));
			Ok(FieldTree::List(items))
		}
		None => match segment.index() {
			Some(index) => {
				limits.check_index(path, depth, index)?;
				let child = assign(None, path, depth + 1, leaf, limits)?;
				let mut items = vec![None; index + 1];
				items[index] = Some(Arc::new(child));
				Ok(FieldTree::List(items))
			}
			None => {
				let child = assign(None, path, depth + 1, leaf, limits)?;
				Ok(FieldTree::Map(BTreeMap::from([(
					segment.key().to_string(),
					Arc::new(child),
				)])))
			}
		},
	}
}
