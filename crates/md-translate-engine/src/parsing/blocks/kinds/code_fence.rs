use super::leading_indent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn marker(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }
}

/// An opening fence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpen<'a> {
    pub kind: FenceKind,
    /// Length of the marker run; the closing fence must be at least this long.
    pub len: usize,
    /// Columns of indentation before the opening fence, removed from content lines.
    pub indent: usize,
    pub info: &'a str,
}

impl FenceOpen<'_> {
    /// First word of the info string.
    pub fn language(&self) -> Option<String> {
        self.info.split_whitespace().next().map(str::to_owned)
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    pub fn open(line: &str) -> Option<FenceOpen<'_>> {
        let (indent, bytes) = leading_indent(line);
        if indent > 3 {
            return None;
        }
        let rest = &line[bytes..];
        let kind = if rest.starts_with(Self::BACKTICKS) {
            FenceKind::Backticks
        } else if rest.starts_with(Self::TILDES) {
            FenceKind::Tildes
        } else {
            return None;
        };
        let len = rest.chars().take_while(|c| *c == kind.marker()).count();
        let info = rest[len..].trim();
        // A backtick in the info string means this is an inline code span.
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceOpen {
            kind,
            len,
            indent,
            info,
        })
    }

    pub fn closes(open: &FenceOpen<'_>, line: &str) -> bool {
        let (indent, bytes) = leading_indent(line);
        if indent > 3 {
            return false;
        }
        let rest = line[bytes..].trim_end();
        let len = rest.chars().take_while(|c| *c == open.kind.marker()).count();
        len >= open.len && len == rest.len()
    }

    /// Removes up to the opening fence's indentation from a content line.
    pub fn dedent<'a>(open: &FenceOpen<'_>, line: &'a str) -> &'a str {
        let skip = line
            .bytes()
            .take(open.indent)
            .take_while(|b| *b == b' ')
            .count();
        &line[skip..]
    }
}
