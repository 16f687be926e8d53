use super::leading_indent;

/// Raw HTML passthrough block. Runs until the next blank line.
pub struct Html;

impl Html {
    pub const OPEN: char = '<';

    pub fn opens(line: &str) -> bool {
        let (indent, bytes) = leading_indent(line);
        if indent > 3 {
            return false;
        }
        let Some(rest) = line[bytes..].strip_prefix(Self::OPEN) else {
            return false;
        };
        rest.starts_with(['/', '!', '?']) || rest.starts_with(|c: char| c.is_ascii_alphabetic())
    }
}
