use super::leading_indent;

/// Thematic break: three or more `-`, `*` or `_`, optionally spaced.
pub struct Separator;

impl Separator {
    pub const MARKERS: [char; 3] = ['-', '*', '_'];
    pub const MIN_RUN: usize = 3;

    pub fn matches(line: &str) -> bool {
        let (indent, bytes) = leading_indent(line);
        if indent > 3 {
            return false;
        }
        let rest = line[bytes..].trim_end();
        let Some(marker) = rest.chars().next().filter(|c| Self::MARKERS.contains(c)) else {
            return false;
        };
        let mut count = 0;
        for c in rest.chars() {
            if c == marker {
                count += 1;
            } else if c != ' ' && c != '\t' {
                return false;
            }
        }
        count >= Self::MIN_RUN
    }
}
