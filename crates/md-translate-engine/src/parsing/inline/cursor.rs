/// A cursor for byte-by-byte inline parsing.
///
/// All delimiters the inline parser looks for are ASCII, so the cursor only
/// ever stops on byte positions that are also `char` boundaries when it is
/// used to slice `s`.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Peeks `n` bytes ahead of the current position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances past the current character, whatever its UTF-8 width.
    pub fn bump_char(&mut self) {
        let width = self.s[self.i..].chars().next().map_or(1, char::len_utf8);
        self.i += width;
    }

    /// Length of the run of `b` starting at the current position.
    pub fn run_len(&self, b: u8) -> usize {
        run_len(self.s, self.i, b)
    }
}

/// Length of the run of byte `b` in `s` starting at `at`.
pub fn run_len(s: &str, at: usize, b: u8) -> usize {
    s.as_bytes()
        .get(at..)
        .map_or(0, |rest| rest.iter().take_while(|&&c| c == b).count())
}
