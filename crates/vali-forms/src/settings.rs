//! Controller settings
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```
//! use vali_forms::FormSettings;
//!
//! let settings = FormSettings::from_toml_str("max_list_index = 50").unwrap();
//! assert_eq!(settings.max_list_index, 50);
//! assert_eq!(settings.max_depth, 64);
//! assert!(settings.revalidate_on_mount);
//! ```

use serde::{Deserialize, Serialize};
use vali_core::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_LIST_INDEX, PathLimits};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Invalid form settings: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("max_list_index must be greater than zero")]
	ZeroListIndex,
	#[error("max_depth must be greater than zero")]
	ZeroDepth,
}

/// Behaviour knobs of a [`FormController`](crate::FormController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Largest list index a field name may address
	pub max_list_index: usize,

	/// Largest number of segments a field name may have
	pub max_depth: usize,

	/// Run the reconciliation pass when the controller is created, so the
	/// first published snapshot already carries errors for the initial values
	pub revalidate_on_mount: bool,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			max_list_index: DEFAULT_MAX_LIST_INDEX,
			max_depth: DEFAULT_MAX_DEPTH,
			revalidate_on_mount: true,
		}
	}
}

impl FormSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from TOML; missing keys keep their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn with_max_list_index(mut self, max_list_index: usize) -> Self {
		self.max_list_index = max_list_index;
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn with_revalidate_on_mount(mut self, enabled: bool) -> Self {
		self.revalidate_on_mount = enabled;
		self
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.max_list_index == 0 {
			return Err(SettingsError::ZeroListIndex);
		}
		if self.max_depth == 0 {
			return Err(SettingsError::ZeroDepth);
		}
		Ok(())
	}

	/// Bounds applied to field names before they are assigned.
	pub fn path_limits(&self) -> PathLimits {
		PathLimits::new()
			.with_max_list_index(self.max_list_index)
			.with_max_depth(self.max_depth)
	}
}
