pub mod blocks;
pub mod inline;
pub mod snapshot;

use crate::model::Document;

use blocks::{BlockBuilder, Scope};

/// Deepest nesting the parser builds for block quotes, lists, and
/// links/emphasis. Anything deeper is kept as literal text, which keeps
/// parsing, rendering and the cache codec within a small, fixed stack.
pub const MAX_NESTING: usize = 32;

/// Parses markdown source into a [`Document`]. Never fails: input that
/// matches no construct is kept as literal paragraph text.
pub fn parse_document(source: &str) -> Document {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let lines: Vec<&str> = source.lines().collect();
    Document::new(BlockBuilder::new(&lines, Scope::Document).build())
}
