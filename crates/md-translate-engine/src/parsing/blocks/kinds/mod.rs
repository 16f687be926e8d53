//! # Block Kinds
//!
//! Block-specific types that own their syntax delimiters. Classifier and
//! builder code calls into these; it never hardcodes `>` or a fence string.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod html;
pub mod list;
pub mod paragraph;
pub mod separator;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceOpen};
pub use heading::Heading;
pub use html::Html;
pub use list::ListMarker;
pub use paragraph::Paragraph;
pub use separator::Separator;

/// Column width of a whitespace prefix; a tab counts as one full indent unit.
pub fn indent_width(prefix: &str) -> usize {
    prefix
        .chars()
        .map(|c| if c == '\t' { ListMarker::INDENT_UNIT } else { 1 })
        .sum()
}

/// Leading indentation of `line` as (columns, bytes).
pub fn leading_indent(line: &str) -> (usize, usize) {
    let bytes = line.len() - line.trim_start_matches([' ', '\t']).len();
    (indent_width(&line[..bytes]), bytes)
}

/// Removes up to `columns` columns of leading whitespace without splitting a tab.
pub fn dedent(line: &str, columns: usize) -> &str {
    let mut used = 0;
    let mut bytes = 0;
    for c in line.chars() {
        let width = match c {
            ' ' => 1,
            '\t' => ListMarker::INDENT_UNIT,
            _ => break,
        };
        if used + width > columns {
            break;
        }
        used += width;
        bytes += 1;
    }
    &line[bytes..]
}
