use super::leading_indent;

/// ATX heading (`#` to `######`).
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    /// Returns the level and the heading text with any closing hashes removed.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let (indent, bytes) = leading_indent(line);
        if indent > 3 {
            return None;
        }
        let rest = &line[bytes..];
        let hashes = rest.chars().take_while(|c| *c == Self::MARKER).count();
        let level = u8::try_from(hashes).ok().filter(|l| (1..=Self::MAX_LEVEL).contains(l))?;
        let after = &rest[hashes..];
        if !(after.is_empty() || after.starts_with([' ', '\t'])) {
            return None;
        }
        Some((level, Self::strip_closing(after.trim())))
    }

    fn strip_closing(text: &str) -> &str {
        let without = text.trim_end_matches(Self::MARKER);
        if without.is_empty() {
            return without;
        }
        if without.len() != text.len() && without.ends_with([' ', '\t']) {
            return without.trim_end();
        }
        text
    }
}
