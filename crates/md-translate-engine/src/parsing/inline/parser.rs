use crate::model::{Block, ImageBlock, LinkBlock, Translatable};
use crate::parsing::MAX_NESTING;

use super::{
    cursor::{Cursor, run_len},
    kinds::{CodeSpan, Emphasis, Link, parse_link},
};

const ESCAPE: u8 = b'\\';
const SPACE: u8 = b' ';
const NEWLINE: u8 = b'\n';

/// Parses inline content into a sequence of inline [`Block`]s.
///
/// Constructs are tried at each position in priority order: escape, hard
/// line break, code span, image, link, strong/emphasis. Anything that does
/// not form a complete construct stays literal and is merged into the
/// surrounding text.
pub fn parse_inline(s: &str) -> Vec<Block> {
    parse_nested(s, 0)
}

/// Links and strong/emphasis below [`MAX_NESTING`] levels are kept as
/// literal text.
fn parse_nested(s: &str, depth: usize) -> Vec<Block> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;
    let nests = depth < MAX_NESTING;
    let closers = if nests {
        Closers::new(s)
    } else {
        Closers::default()
    };

    // Helper to flush accumulated text as a Text node
    fn flush_text(out: &mut Vec<Block>, s: &str, start: usize, end: usize) {
        if end > start {
            out.push(Block::text(&s[start..end]));
        }
    }

    while let Some(b) = cur.peek() {
        let start = cur.i;
        let node = match b {
            ESCAPE => try_parse_escape(&mut cur),
            SPACE => try_parse_line_break(&mut cur),
            CodeSpan::TICK => try_parse_code_span(&mut cur),
            b'!' => try_parse_image(&mut cur),
            Link::OPEN if nests => try_parse_link(&mut cur, depth),
            b if nests && Emphasis::is_delimiter(b) => try_parse_emphasis(&mut cur, &closers, depth),
            _ => None,
        };
        match node {
            Some(node) => {
                flush_text(&mut out, s, text_start, start);
                out.push(node);
                text_start = cur.i;
            }
            // Nothing matched and nothing was consumed: plain character.
            None if cur.i == start => cur.bump_char(),
            // A literal delimiter run was consumed as text.
            None => {}
        }
    }

    flush_text(&mut out, s, text_start, cur.i);
    out
}

/// `\` before ASCII punctuation yields that character as its own text run;
/// `\` before a newline is a hard line break.
fn try_parse_escape(cur: &mut Cursor<'_>) -> Option<Block> {
    let next = cur.peek_at(1)?;
    if next == NEWLINE {
        cur.bump_n(2);
        return Some(Block::LineBreak);
    }
    if next.is_ascii_punctuation() {
        cur.bump_n(2);
        return Some(Block::text(char::from(next).to_string()));
    }
    None
}

/// Two or more spaces followed by a newline.
fn try_parse_line_break(cur: &mut Cursor<'_>) -> Option<Block> {
    let run = cur.run_len(SPACE);
    if run >= 2 && cur.peek_at(run) == Some(NEWLINE) {
        cur.bump_n(run + 1);
        return Some(Block::LineBreak);
    }
    cur.bump_n(run);
    None
}

/// A backtick run closed by a run of the same length. An unclosed run is
/// consumed whole as literal text so a shorter run inside it is never tried.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<Block> {
    let open = cur.run_len(CodeSpan::TICK);
    let inner_start = cur.i + open;
    let Some(close) = CodeSpan::find_close(cur.s, inner_start, open) else {
        cur.bump_n(open);
        return None;
    };
    let code = CodeSpan::strip_padding(&cur.s[inner_start..close]);
    cur.i = close + open;
    Some(Block::code_span(code))
}

fn try_parse_image(cur: &mut Cursor<'_>) -> Option<Block> {
    if !cur.starts_with(Link::IMAGE) {
        return None;
    }
    let parts = parse_link(cur.s, cur.i + 1)?;
    cur.i = parts.end;
    Some(Block::Image(ImageBlock::new(parts.url, parts.text, parts.title)))
}

fn try_parse_link(cur: &mut Cursor<'_>, depth: usize) -> Option<Block> {
    let parts = parse_link(cur.s, cur.i)?;
    cur.i = parts.end;
    Some(Block::Link(LinkBlock {
        url: parts.url,
        title: parts.title.map(Translatable::new),
        children: parse_nested(parts.text, depth + 1),
    }))
}

/// Emphasis or strong, depending on the opening run length.
///
/// The closer must be a run of the same character and length that can close.
/// Runs that cannot open, are too long or have no closer are consumed whole
/// as literal text.
fn try_parse_emphasis(cur: &mut Cursor<'_>, closers: &Closers, depth: usize) -> Option<Block> {
    let s = cur.s;
    let at = cur.i;
    let len = cur.run_len(s.as_bytes()[at]);
    cur.bump_n(len);

    let close = closers.get(at)?;
    cur.i = close + len;
    Some(Emphasis::wrap(len, parse_nested(&s[at + len..close], depth + 1)))
}

/// Closing run of every delimiter run that can open, by byte position.
///
/// Filled right to left: a search that meets a nested opener jumps straight
/// past that opener's known closer, so each run is searched exactly once.
#[derive(Default)]
struct Closers(Vec<Option<usize>>);

impl Closers {
    fn new(s: &str) -> Self {
        let bytes = s.as_bytes();
        if !bytes.iter().copied().any(Emphasis::is_delimiter) {
            return Self::default();
        }
        let mut closers = vec![None; bytes.len()];
        for at in (0..bytes.len()).rev() {
            let delim = bytes[at];
            if !Emphasis::is_delimiter(delim) {
                continue;
            }
            let len = run_len(s, at, delim);
            if len <= Emphasis::MAX_RUN && Emphasis::can_open(s, at, len) {
                let close = find_emphasis_closer(s, at + len, delim, len, &closers);
                closers[at] = close;
            }
        }
        Self(closers)
    }

    fn get(&self, at: usize) -> Option<usize> {
        self.0.get(at).copied().flatten()
    }
}

/// Searches for the run closing a `len`-long `delim` opener, skipping escapes,
/// code spans and complete nested emphasis. `closers` must already hold the
/// result for every position after `from`.
fn find_emphasis_closer(
    s: &str,
    from: usize,
    delim: u8,
    len: usize,
    closers: &[Option<usize>],
) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = from;
    while let Some(&b) = bytes.get(i) {
        match b {
            ESCAPE => i += 2,
            CodeSpan::TICK => {
                let run = run_len(s, i, CodeSpan::TICK);
                i = match CodeSpan::find_close(s, i + run, run) {
                    Some(close) => close + run,
                    None => i + run,
                };
            }
            b if Emphasis::is_delimiter(b) => {
                let run = run_len(s, i, b);
                if b == delim && run == len && Emphasis::can_close(s, i, run) {
                    return Some(i);
                }
                i = match closers.get(i).copied().flatten() {
                    Some(close) => close + run,
                    None => i + run,
                };
            }
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn link_depth(blocks: &[Block]) -> usize {
        blocks
            .iter()
            .map(|block| match block {
                Block::Link(link) => 1 + link_depth(&link.children),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world"), vec![Block::text("hello world")]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_inline(""), vec![]);
    }

    #[test]
    fn strong_in_sentence() {
        assert_eq!(
            parse_inline("I just love **bold text**."),
            vec![
                Block::text("I just love "),
                Block::strong(vec![Block::text("bold text")]),
                Block::text("."),
            ]
        );
    }

    #[test]
    fn escape_splits_text() {
        assert_eq!(
            parse_inline("1968\\. A great year!"),
            vec![
                Block::text("1968"),
                Block::text("."),
                Block::text(" A great year!"),
            ]
        );
    }

    #[test]
    fn backslash_before_letter_is_literal() {
        assert_eq!(parse_inline("C:\\dir"), vec![Block::text("C:\\dir")]);
    }

    #[test]
    fn hard_line_breaks() {
        assert_eq!(
            parse_inline("one  \ntwo\\\nthree"),
            vec![
                Block::text("one"),
                Block::LineBreak,
                Block::text("two"),
                Block::LineBreak,
                Block::text("three"),
            ]
        );
    }

    #[test]
    fn single_trailing_space_is_soft_break() {
        assert_eq!(parse_inline("one \ntwo"), vec![Block::text("one \ntwo")]);
    }

    #[test]
    fn code_span_suppresses_emphasis() {
        assert_eq!(
            parse_inline("`*not em*`"),
            vec![Block::code_span("*not em*")]
        );
    }

    #[test]
    fn double_backtick_code_span() {
        assert_eq!(
            parse_inline("``Use `code` in your Markdown file.``"),
            vec![Block::code_span("Use `code` in your Markdown file.")]
        );
    }

    #[test]
    fn unclosed_code_span_becomes_text() {
        assert_eq!(
            parse_inline("`unclosed code"),
            vec![Block::text("`unclosed code")]
        );
    }

    #[test]
    fn strong_wrapping_emphasis() {
        assert_eq!(
            parse_inline("**_x_**"),
            vec![Block::strong(vec![Block::emphasis(vec![Block::text("x")])])]
        );
        assert_eq!(
            parse_inline("*__x__*"),
            vec![Block::emphasis(vec![Block::strong(vec![Block::text("x")])])]
        );
    }

    #[test]
    fn triple_run_is_emphasis_around_strong() {
        assert_eq!(
            parse_inline("***both***"),
            vec![Block::emphasis(vec![Block::strong(vec![Block::text("both")])])]
        );
    }

    #[test]
    fn unmatched_delimiters_are_literal() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![Block::text("2 * 3 = 6")]);
        assert_eq!(parse_inline("**open"), vec![Block::text("**open")]);
        assert_eq!(parse_inline("snake_case_name"), vec![Block::text("snake_case_name")]);
    }

    #[test]
    fn nested_run_is_skipped_while_searching() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![Block::emphasis(vec![
                Block::text("a "),
                Block::strong(vec![Block::text("b")]),
                Block::text(" c"),
            ])]
        );
    }

    #[test]
    fn link_with_inline_text() {
        assert_eq!(
            parse_inline("see [the **docs**](https://docs.rs \"Docs\")!"),
            vec![
                Block::text("see "),
                Block::Link(LinkBlock {
                    url: "https://docs.rs".into(),
                    title: Some(Translatable::new("Docs")),
                    children: vec![
                        Block::text("the "),
                        Block::strong(vec![Block::text("docs")]),
                    ],
                }),
                Block::text("!"),
            ]
        );
    }

    #[test]
    fn image() {
        assert_eq!(
            parse_inline("![A cat](cat.png \"Kitty\")"),
            vec![Block::Image(ImageBlock::new(
                "cat.png",
                "A cat",
                Some("Kitty".into())
            ))]
        );
    }

    #[test]
    fn bang_without_image_is_text() {
        assert_eq!(parse_inline("Wow! [x]"), vec![Block::text("Wow! [x]")]);
    }

    #[rstest]
    #[case("*a ")]
    #[case("_a ")]
    fn unmatched_openers_parse_in_linear_passes(#[case] unit: &str) {
        let source = unit.repeat(500);
        let started = Instant::now();

        let blocks = parse_inline(&source);

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(blocks, vec![Block::text(source.as_str())]);
    }

    #[test]
    fn closer_search_still_skips_nested_runs_after_failures() {
        assert_eq!(
            parse_inline("*a *b **c** d*"),
            vec![
                Block::text("*a "),
                Block::emphasis(vec![
                    Block::text("b "),
                    Block::strong(vec![Block::text("c")]),
                    Block::text(" d"),
                ]),
            ]
        );
    }

    #[test]
    fn link_nesting_is_capped() {
        let depth = 20_000;
        let source = format!("{}x{}", "[".repeat(depth), "](u)".repeat(depth));

        let blocks = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || parse_inline(&source))
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(link_depth(&blocks), MAX_NESTING);
    }

    #[test]
    fn emphasis_below_the_cap_stays_literal() {
        let source = format!("{}x{}", "[".repeat(MAX_NESTING), "](u)".repeat(MAX_NESTING));
        let wrapped = format!("{}*y*{}", &source[..MAX_NESTING], &source[MAX_NESTING..]);

        let blocks = parse_inline(&wrapped);

        let mut inner = blocks.as_slice();
        while let [Block::Link(link)] = inner {
            inner = &link.children;
        }
        assert_eq!(inner, [Block::text("*y*x")]);
    }
}
