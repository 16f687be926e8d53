//! # Inline Parsing
//!
//! Cursor-based inline parsing with explicit raw zones.
//!
//! Inline parsing is separate from block parsing and runs over the text of
//! inline-eligible blocks (paragraphs, headings, list item text, link text).
//!
//! ## Modules
//!
//! - **`kinds`**: inline types with owned delimiters (CodeSpan, Emphasis, Link)
//! - **`cursor`**: `Cursor` for byte-by-byte scanning
//! - **`parser`**: `parse_inline()` main entry point with `try_parse_*` helpers
//!
//! ## Precedence
//!
//! Escapes, then hard line breaks, then code spans (raw zones: `` `*x*` `` is
//! a single code span), then images, links and finally strong/emphasis.

pub mod cursor;
pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
