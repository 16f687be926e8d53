//! # Markdown Tree Model
//!
//! Owned, recursive tree produced by the parser and consumed by the renderer,
//! codec and translation pass.
//!
//! - **`translatable`**: `Translatable` leaf text with its one-shot translation slot
//! - **`block`**: the closed `Block` sum type and its payload structs
//! - **`document`**: the `Document` root with traversal and counting helpers
//!
//! Ownership is strictly parent to child. Setting a translation is the only
//! mutation after parsing.

pub mod block;
pub mod document;
pub mod translatable;

pub use block::{Block, CodeBlock, ImageBlock, LinkBlock, ListBlock, ListItemBlock, TextBlock};
pub use document::Document;
pub use translatable::{ModelError, Translatable};
