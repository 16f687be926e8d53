use super::kinds::{BlockQuote, CodeFence, FenceOpen, Heading, Html, ListMarker, Separator};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    Blank,
    Fence(FenceOpen<'a>),
    Separator,
    Heading { level: u8, text: &'a str },
    Quote,
    ListItem(ListMarker<'a>),
    Html,
    Text,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line, checking openers in priority order: fence,
    /// separator, heading, quote, list item, html.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        if let Some(open) = CodeFence::open(line) {
            return LineClass::Fence(open);
        }
        if Separator::matches(line) {
            return LineClass::Separator;
        }
        if let Some((level, text)) = Heading::parse(line) {
            return LineClass::Heading { level, text };
        }
        if BlockQuote::matches(line) {
            return LineClass::Quote;
        }
        if let Some(marker) = ListMarker::parse(line) {
            return LineClass::ListItem(marker);
        }
        if Html::opens(line) {
            return LineClass::Html;
        }
        LineClass::Text
    }
}
