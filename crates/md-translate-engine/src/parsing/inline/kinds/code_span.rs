use crate::parsing::inline::cursor::run_len;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Finds a closing run of exactly `len` backticks at or after `from`.
    ///
    /// Returns the byte index where the closing run starts.
    pub fn find_close(s: &str, from: usize, len: usize) -> Option<usize> {
        let bytes = s.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            if bytes[i] == Self::TICK {
                let run = run_len(s, i, Self::TICK);
                if run == len {
                    return Some(i);
                }
                i += run;
            } else {
                i += 1;
            }
        }
        None
    }

    /// Strips one space of padding from both ends when both are present and
    /// the content is not made of spaces only.
    pub fn strip_padding(content: &str) -> &str {
        if content.len() >= 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.trim().is_empty()
        {
            &content[1..content.len() - 1]
        } else {
            content
        }
    }
}
