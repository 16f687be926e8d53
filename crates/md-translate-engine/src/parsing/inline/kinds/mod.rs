//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! - **`CodeSpan`**: `TICK`, raw zone that suppresses other parsing
//! - **`Emphasis`**: `*` / `_` runs with flanking rules
//! - **`Link`**: `[`, `]`, `(`, `)` and the `![` image opener
//!
//! The parser calls these constants; it never hardcodes a delimiter.

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use link::{Link, LinkParts, parse_link};
