//! Form controller, transitions and settings.

pub use vali_forms::*;
