//! JSON input boundary.
//!
//! The external parser hands the declaration tree over as a self-describing
//! JSON document: every node object carries a `reflection` field naming its
//! variant, with camelCase field names. This module decodes such documents
//! into the node model; it performs no file discovery or I/O.

use crate::node::{ModuleNode, SourceSetNode};
use serde_json::Value;

/// Failure to decode a declaration document.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("malformed declaration document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a whole compilation unit from JSON text.
pub fn source_set_from_str(text: &str) -> Result<SourceSetNode, JsonError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a whole compilation unit from an already-parsed JSON value.
pub fn source_set_from_value(value: Value) -> Result<SourceSetNode, JsonError> {
    Ok(serde_json::from_value(value)?)
}

/// Decode a single document root from JSON text.
pub fn module_from_str(text: &str) -> Result<ModuleNode, JsonError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a single document root from an already-parsed JSON value.
pub fn module_from_value(value: Value) -> Result<ModuleNode, JsonError> {
    Ok(serde_json::from_value(value)?)
}
