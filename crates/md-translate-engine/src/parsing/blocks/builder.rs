use crate::{
    model::{Block, CodeBlock},
    parsing::{MAX_NESTING, inline::parse_inline},
};

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    kinds::{BlockQuote, CodeFence, FenceOpen, Paragraph},
    list::ListBuilder,
};

/// Where a builder runs. Inside quotes, blank lines between blocks are kept
/// as [`Block::Newline`] so the quote renders back with its `>` spacer lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Document,
    Quote,
}

/// Block phase state machine over a slice of lines.
///
/// Quote content and list item content are handed to fresh builders on
/// sub-slices. Quotes nested deeper than [`MAX_NESTING`] become paragraphs.
pub struct BlockBuilder<'a, 's> {
    lines: &'s [&'a str],
    pos: usize,
    scope: Scope,
    depth: usize,
    classifier: MarkdownLineClassifier,
    pending_blank: bool,
    out: Vec<Block>,
}

impl<'a, 's> BlockBuilder<'a, 's> {
    pub fn new(lines: &'s [&'a str], scope: Scope) -> Self {
        Self::at_depth(lines, scope, 0)
    }

    fn at_depth(lines: &'s [&'a str], scope: Scope, depth: usize) -> Self {
        Self {
            lines,
            pos: 0,
            scope,
            depth,
            classifier: MarkdownLineClassifier,
            pending_blank: false,
            out: vec![],
        }
    }

    pub fn build(mut self) -> Vec<Block> {
        while let Some(&line) = self.lines.get(self.pos) {
            match self.classifier.classify(line) {
                LineClass::Blank => {
                    self.pending_blank = !self.out.is_empty();
                    self.pos += 1;
                }
                LineClass::Fence(open) => {
                    let block = self.fenced_code(open);
                    self.emit(block);
                }
                LineClass::Separator => {
                    self.pos += 1;
                    self.emit(Block::Separator);
                }
                LineClass::Heading { level, text } => {
                    self.pos += 1;
                    self.emit(Block::heading(level, parse_inline(text)));
                }
                LineClass::Quote => {
                    let block = self.quote();
                    self.emit(block);
                }
                LineClass::ListItem(marker) => {
                    let (list, consumed) = ListBuilder::new(&self.lines[self.pos..], 1).build(marker);
                    self.pos += consumed;
                    self.emit(Block::List(list));
                }
                LineClass::Html => {
                    let block = self.html();
                    self.emit(block);
                }
                LineClass::Text => {
                    let block = self.paragraph();
                    self.emit(block);
                }
            }
        }
        self.out
    }

    fn emit(&mut self, block: Block) {
        if self.pending_blank && self.scope == Scope::Quote {
            self.out.push(Block::Newline);
        }
        self.pending_blank = false;
        self.out.push(block);
    }

    /// Unterminated fences run to the end of input.
    fn fenced_code(&mut self, open: FenceOpen<'a>) -> Block {
        self.pos += 1;
        let mut code = String::new();
        while let Some(&line) = self.lines.get(self.pos) {
            self.pos += 1;
            if CodeFence::closes(&open, line) {
                break;
            }
            code.push_str(CodeFence::dedent(&open, line));
            code.push('\n');
        }
        Block::Code(CodeBlock {
            language: open.language(),
            code,
        })
    }

    fn quote(&mut self) -> Block {
        let start = self.pos;
        let mut inner = vec![];
        while let Some(stripped) = self
            .lines
            .get(self.pos)
            .and_then(|&line| BlockQuote::strip_one(line))
        {
            inner.push(stripped);
            self.pos += 1;
        }
        if self.depth >= MAX_NESTING {
            let text = Paragraph::join_lines(self.lines[start..self.pos].iter().copied());
            return Block::paragraph(parse_inline(&text));
        }
        Block::quote(BlockBuilder::at_depth(&inner, Scope::Quote, self.depth + 1).build())
    }

    fn html(&mut self) -> Block {
        let start = self.pos;
        while let Some(line) = self.lines.get(self.pos) {
            if line.trim().is_empty() {
                break;
            }
            self.pos += 1;
        }
        Block::Html {
            code: self.lines[start..self.pos].join("\n"),
        }
    }

    /// Consecutive text lines; any block opener or a blank line ends the paragraph.
    fn paragraph(&mut self) -> Block {
        let start = self.pos;
        self.pos += 1;
        while let Some(&line) = self.lines.get(self.pos) {
            if self.classifier.classify(line) != LineClass::Text {
                break;
            }
            self.pos += 1;
        }
        let text = Paragraph::join_lines(self.lines[start..self.pos].iter().copied());
        Block::paragraph(parse_inline(&text))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ListBlock, ListItemBlock};

    fn build(src: &str) -> Vec<Block> {
        let lines: Vec<&str> = src.lines().collect();
        BlockBuilder::new(&lines, Scope::Document).build()
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(
            build("first line\n  second line\n\nthird"),
            vec![
                Block::paragraph(vec![Block::text("first line\nsecond line")]),
                Block::paragraph(vec![Block::text("third")]),
            ]
        );
    }

    #[test]
    fn heading_interrupts_paragraph() {
        assert_eq!(
            build("text\n# Title"),
            vec![
                Block::paragraph(vec![Block::text("text")]),
                Block::heading(1, vec![Block::text("Title")]),
            ]
        );
    }

    #[test]
    fn fenced_code_keeps_lines_verbatim() {
        assert_eq!(
            build("```python\ndef f():\n    return 1\n```\nafter"),
            vec![
                Block::Code(CodeBlock {
                    language: Some("python".into()),
                    code: "def f():\n    return 1\n".into(),
                }),
                Block::paragraph(vec![Block::text("after")]),
            ]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        assert_eq!(
            build("~~~\n# not a heading\n"),
            vec![Block::Code(CodeBlock {
                language: None,
                code: "# not a heading\n".into(),
            })]
        );
    }

    #[test]
    fn quote_blank_lines_become_newlines() {
        assert_eq!(
            build("> first\n>\n> second"),
            vec![Block::quote(vec![
                Block::paragraph(vec![Block::text("first")]),
                Block::Newline,
                Block::paragraph(vec![Block::text("second")]),
            ])]
        );
    }

    #[test]
    fn nested_quotes() {
        assert_eq!(
            build("> outer\n>\n> > inner"),
            vec![Block::quote(vec![
                Block::paragraph(vec![Block::text("outer")]),
                Block::Newline,
                Block::quote(vec![Block::paragraph(vec![Block::text("inner")])]),
            ])]
        );
    }

    #[test]
    fn list_inside_quote_starts_at_level_one() {
        assert_eq!(
            build("> - a\n> - b"),
            vec![Block::quote(vec![Block::List(ListBlock::bullet(
                1,
                vec![
                    ListItemBlock::new(1, vec![Block::text("a")]),
                    ListItemBlock::new(1, vec![Block::text("b")]),
                ]
            ))])]
        );
    }

    #[test]
    fn html_runs_to_blank_line() {
        assert_eq!(
            build("<div>\n  <b>x</b>\n</div>\n\ntext"),
            vec![
                Block::Html {
                    code: "<div>\n  <b>x</b>\n</div>".into()
                },
                Block::paragraph(vec![Block::text("text")]),
            ]
        );
    }

    #[test]
    fn top_level_blank_lines_produce_nothing() {
        assert_eq!(
            build("\n\n---\n\n\n"),
            vec![Block::Separator]
        );
    }

    fn quote_depth(blocks: &[Block]) -> usize {
        match blocks {
            [Block::Quote { children }] => 1 + quote_depth(children),
            _ => 0,
        }
    }

    #[test]
    fn quotes_deeper_than_the_cap_stay_text() {
        let source = format!("{}deep", "> ".repeat(20_000));

        let blocks = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || build(&source))
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(quote_depth(&blocks), MAX_NESTING);
        let mut inner = blocks.as_slice();
        while let [Block::Quote { children }] = inner {
            inner = children;
        }
        let [Block::Paragraph { children }] = inner else {
            panic!("expected a paragraph below the last quote, got {inner:?}");
        };
        let [Block::Text(text)] = children.as_slice() else {
            panic!("expected one text run, got {children:?}");
        };
        assert!(text.text.original().starts_with("> > "));
        assert!(text.text.original().ends_with("> deep"));
    }
}
