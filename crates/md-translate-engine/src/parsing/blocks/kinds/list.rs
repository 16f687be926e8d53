use std::sync::OnceLock;

use regex::Regex;

use super::indent_width;

/// A list item marker line: `- text`, `* text`, `+ text` or `12. text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker<'a> {
    /// Indentation of the marker in columns (tabs count as [`ListMarker::INDENT_UNIT`]).
    pub indent: usize,
    /// Item number for ordered markers.
    pub number: Option<u64>,
    pub text: &'a str,
}

impl<'a> ListMarker<'a> {
    /// Width of one nesting step when rendering and dedenting nested content.
    pub const INDENT_UNIT: usize = 4;
    /// Extra indentation that makes a line belong to the item above it.
    pub const NESTING_THRESHOLD: usize = 2;

    pub fn parse(line: &'a str) -> Option<Self> {
        static MARKER: OnceLock<Regex> = OnceLock::new();
        let re = MARKER.get_or_init(|| {
            Regex::new(
                r"^(?P<indent>[ \t]*)(?:(?P<bullet>[-*+])|(?P<number>\d{1,9})\.)(?:[ \t]+(?P<text>.*)|$)",
            )
            .expect("Invalid list marker regex")
        });

        let caps = re.captures(line)?;
        let indent = caps.name("indent").map_or(0, |m| indent_width(m.as_str()));
        let number = match caps.name("number") {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };
        let text = caps.name("text").map_or("", |m| m.as_str());
        Some(Self {
            indent,
            number,
            text,
        })
    }

    pub fn ordered(&self) -> bool {
        self.number.is_some()
    }
}
