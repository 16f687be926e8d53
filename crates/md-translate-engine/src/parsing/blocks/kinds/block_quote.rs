use super::leading_indent;

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Whether `line` opens (or continues) a block quote.
    pub fn matches(line: &str) -> bool {
        Self::strip_one(line).is_some()
    }

    /// Strips exactly one level of quoting.
    ///
    /// Accepts up to three spaces before the `>` and removes one optional
    /// space after it. Deeper levels stay in the returned content so that the
    /// block phase can recurse on them.
    pub fn strip_one(line: &str) -> Option<&str> {
        let (width, bytes) = leading_indent(line);
        if width > 3 {
            return None;
        }
        let rest = line[bytes..].strip_prefix(Self::PREFIX)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }
}
