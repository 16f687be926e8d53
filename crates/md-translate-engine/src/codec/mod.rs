//! # Tagged-Variant Codec
//!
//! Converts a [`Document`] to and from JSON objects discriminated by a
//! `block_type` field. Used for the on-disk translation cache.
//!
//! - Every node is an object: `block_type`, the node's own fields, then
//!   `children` for containers.
//! - `ListItemBlock` adds `nested_children`, a zero- or one-element array
//!   holding its sub-list.
//! - `decode(encode(doc)) == doc` for every document.

mod decode;
mod encode;
pub mod tags;

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::model::Document;

pub use decode::decode;
pub use encode::encode;
pub use tags::{DISCRIMINANT, Tag};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown block type {0:?}")]
    UnknownVariant(String),
    #[error("malformed {kind} node: {reason}")]
    MalformedNode { kind: String, reason: String },
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Pretty-printed JSON text of the encoded document.
pub fn to_json_string(doc: &Document) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&encode(doc))?)
}

pub fn from_json_str(json: &str) -> Result<Document, CodecError> {
    let value: Value = read_json(json)?;
    decode(&value)
}

/// Deserializes JSON text without serde_json's nesting limit of 128.
///
/// Encoded trees are deeper than the tree itself (each list level costs four
/// JSON levels), so parser output within [`crate::parsing::MAX_NESTING`] can
/// exceed that limit.
pub fn read_json<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}
