//! Validator contract and the built-in schema.
//!
//! [`Schema`] is only present with the `schema` feature.

pub use vali_validators::*;
