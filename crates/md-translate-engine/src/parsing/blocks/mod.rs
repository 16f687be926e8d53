//! # Block Parsing
//!
//! Two-phase block parsing.
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` from local facts only (fence, separator, heading, quote,
//!    list marker, html, text, blank).
//! 2. **Block Construction** (`builder`, `list`): a `BlockBuilder` walks the
//!    classified lines and emits [`Block`](crate::model::Block)s. Quote and
//!    list item content is stripped and handed to nested builders.
//!
//! ## Key Invariants
//!
//! - Quotes and lists nest up to [`MAX_NESTING`](crate::parsing::MAX_NESTING)
//!   levels; deeper markers stay literal text
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - Every input produces a tree; unsupported syntax degrades to paragraphs

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod list;

pub use builder::{BlockBuilder, Scope};
pub use classify::{LineClass, MarkdownLineClassifier};
pub use list::ListBuilder;
