use crate::model::Block;

/// Strong/emphasis delimiter runs.
///
/// A run of one delimiter is emphasis, two is strong, three is emphasis
/// wrapping strong. Longer runs are literal text.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const MAX_RUN: usize = 3;

    pub fn is_delimiter(b: u8) -> bool {
        b == Self::STAR || b == Self::UNDERSCORE
    }

    /// Whether the run of `len` delimiters at `at` may open emphasis.
    pub fn can_open(s: &str, at: usize, len: usize) -> bool {
        let run = Flanking::of(s, at, len);
        match s.as_bytes()[at] {
            Self::UNDERSCORE => run.left && (!run.right || is_punctuation(run.prev)),
            _ => run.left,
        }
    }

    /// Whether the run of `len` delimiters at `at` may close emphasis.
    pub fn can_close(s: &str, at: usize, len: usize) -> bool {
        let run = Flanking::of(s, at, len);
        match s.as_bytes()[at] {
            Self::UNDERSCORE => run.right && (!run.left || is_punctuation(run.next)),
            _ => run.right,
        }
    }

    /// Wraps parsed inner content according to the run length.
    pub fn wrap(len: usize, children: Vec<Block>) -> Block {
        match len {
            1 => Block::emphasis(children),
            2 => Block::strong(children),
            _ => Block::emphasis(vec![Block::strong(children)]),
        }
    }
}

/// Left/right flanking facts for one delimiter run. String boundaries count
/// as whitespace.
struct Flanking {
    prev: char,
    next: char,
    left: bool,
    right: bool,
}

impl Flanking {
    fn of(s: &str, at: usize, len: usize) -> Self {
        let prev = s[..at].chars().next_back().unwrap_or(' ');
        let next = s[at + len..].chars().next().unwrap_or(' ');
        let left = !next.is_whitespace()
            && (!is_punctuation(next) || prev.is_whitespace() || is_punctuation(prev));
        let right = !prev.is_whitespace()
            && (!is_punctuation(prev) || next.is_whitespace() || is_punctuation(next));
        Self {
            prev,
            next,
            left,
            right,
        }
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace() && !c.is_control())
}
