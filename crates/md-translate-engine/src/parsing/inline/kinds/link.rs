use crate::parsing::inline::cursor::run_len;

use super::CodeSpan;

/// Inline links `[text](url "title")` and images `![alt](src "title")`.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE: &'static [u8; 2] = b"![";
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const ESCAPE: u8 = b'\\';
}

/// The pieces of a parsed link; `text` is the raw label source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParts<'a> {
    pub text: &'a str,
    pub url: String,
    pub title: Option<String>,
    /// Byte index just past the closing `)`.
    pub end: usize,
}

/// Parses a link whose `[` sits at `at`.
///
/// Returns `None` unless the whole `[..](..)` form is present; the caller
/// then treats the bracket as literal text.
pub fn parse_link(s: &str, at: usize) -> Option<LinkParts<'_>> {
    let bytes = s.as_bytes();
    if bytes.get(at) != Some(&Link::OPEN) {
        return None;
    }
    let label_end = find_label_end(s, at + 1)?;
    let mut i = label_end + 1;
    if bytes.get(i) != Some(&Link::DEST_OPEN) {
        return None;
    }
    i = skip_whitespace(bytes, i + 1);

    let (url, after_url) = parse_destination(s, i)?;
    let after_space = skip_whitespace(bytes, after_url);

    let (title, after_title) = match bytes.get(after_space) {
        Some(b'"' | b'\'') if after_space > after_url => {
            let (title, end) = parse_title(s, after_space)?;
            (Some(title), skip_whitespace(bytes, end))
        }
        _ => (None, after_space),
    };
    if bytes.get(after_title) != Some(&Link::DEST_CLOSE) {
        return None;
    }
    Some(LinkParts {
        text: &s[at + 1..label_end],
        url,
        title,
        end: after_title + 1,
    })
}

/// Finds the `]` matching the label opened just before `from`, honouring
/// nested brackets, escapes and code spans.
fn find_label_end(s: &str, from: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut i = from;
    loop {
        match *bytes.get(i)? {
            Link::ESCAPE => i += 2,
            CodeSpan::TICK => {
                let run = run_len(s, i, CodeSpan::TICK);
                i = match CodeSpan::find_close(s, i + run, run) {
                    Some(close) => close + run,
                    None => i + run,
                };
            }
            Link::OPEN => {
                depth += 1;
                i += 1;
            }
            Link::CLOSE if depth == 0 => return Some(i),
            Link::CLOSE => {
                depth -= 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
}

fn parse_destination(s: &str, from: usize) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    if bytes.get(from) == Some(&b'<') {
        let mut i = from + 1;
        loop {
            match *bytes.get(i)? {
                b'>' => return Some((unescape(&s[from + 1..i]), i + 1)),
                b'\n' | b'<' => return None,
                Link::ESCAPE => i += 2,
                _ => i += 1,
            }
        }
    }

    let mut depth = 0usize;
    let mut i = from;
    loop {
        match bytes.get(i).copied() {
            None => return None,
            Some(Link::ESCAPE) if bytes.get(i + 1).is_some_and(u8::is_ascii_punctuation) => i += 2,
            Some(Link::DEST_OPEN) => {
                depth += 1;
                i += 1;
            }
            Some(Link::DEST_CLOSE) if depth == 0 => break,
            Some(Link::DEST_CLOSE) => {
                depth -= 1;
                i += 1;
            }
            Some(b) if b.is_ascii_whitespace() => break,
            Some(b) if b.is_ascii_control() => return None,
            Some(_) => i += 1,
        }
    }
    Some((unescape(&s[from..i]), i))
}

fn parse_title(s: &str, from: usize) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    let quote = *bytes.get(from)?;
    let mut i = from + 1;
    loop {
        match *bytes.get(i)? {
            Link::ESCAPE => i += 2,
            b if b == quote => return Some((unescape(&s[from + 1..i]), i + 1)),
            _ => i += 1,
        }
    }
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

/// Resolves backslash escapes of ASCII punctuation.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("[text](https://example.com)", "text", "https://example.com", None)]
    #[case("[a](b \"Title\")", "a", "b", Some("Title"))]
    #[case("[a](b 'single')", "a", "b", Some("single"))]
    #[case("[a](<with space>)", "a", "with space", None)]
    #[case("[a](wiki/Foo_(bar))", "a", "wiki/Foo_(bar)", None)]
    #[case("[a [nested] b](u)", "a [nested] b", "u", None)]
    #[case("[](empty)", "", "empty", None)]
    #[case("[a]()", "a", "", None)]
    #[case("[a](u \"say \\\"hi\\\"\")", "a", "u", Some("say \"hi\""))]
    fn links(
        #[case] src: &str,
        #[case] text: &str,
        #[case] url: &str,
        #[case] title: Option<&str>,
    ) {
        let parts = parse_link(src, 0).unwrap();
        assert_eq!(parts.text, text);
        assert_eq!(parts.url, url);
        assert_eq!(parts.title.as_deref(), title);
        assert_eq!(parts.end, src.len());
    }

    #[rstest]
    #[case("[text]")]
    #[case("[text] (u)")]
    #[case("[text](u")]
    #[case("[text(u)")]
    #[case("[a](b\"no space\")")]
    fn not_links(#[case] src: &str) {
        assert_eq!(parse_link(src, 0), None);
    }

    #[test]
    fn bracket_inside_code_span_is_ignored() {
        let parts = parse_link("[`]` code](u)", 0).unwrap();
        assert_eq!(parts.text, "`]` code");
    }
}
