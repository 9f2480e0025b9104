//! Query-language-to-predicate translation seam.
//!
//! The store never parses filter expressions itself; it hands the string to
//! a pluggable compiler and applies the returned predicate to each record's
//! JSON projection.

use serde_json::Value;
use std::fmt::Debug;

use crate::error::SdResult;

/// A compiled filter, ready to apply to a record
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

pub trait FilterCompiler: Debug + Send + Sync {
	fn compile(&self, expression: &str) -> SdResult<Predicate>;
}

// vim: ts=4
