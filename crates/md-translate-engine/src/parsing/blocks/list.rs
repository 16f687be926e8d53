use crate::{
    model::{ListBlock, ListItemBlock},
    parsing::{MAX_NESTING, inline::parse_inline},
};

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    kinds::{ListMarker, Paragraph, dedent, leading_indent},
};

/// Lines collected for one item before it is turned into a [`ListItemBlock`].
struct ItemDraft<'a> {
    /// Marker text plus continuation lines.
    text: Vec<&'a str>,
    /// Deeper-indented lines, already dedented by one unit.
    content: Vec<&'a str>,
}

impl<'a> ItemDraft<'a> {
    fn new(first: &'a str) -> Self {
        Self {
            text: vec![first],
            content: vec![],
        }
    }
}

/// Builds one list starting at the first line of `lines`.
///
/// Items continue while markers of the same kind (ordered or bullet) appear
/// at the list's indentation, including across blank lines. Lines indented at
/// least [`ListMarker::NESTING_THRESHOLD`] columns deeper than the markers
/// belong to the current item and are parsed again one level down, up to
/// level [`MAX_NESTING`]; below that they are item text.
pub struct ListBuilder<'a, 's> {
    lines: &'s [&'a str],
    level: usize,
    classifier: MarkdownLineClassifier,
}

impl<'a, 's> ListBuilder<'a, 's> {
    pub fn new(lines: &'s [&'a str], level: usize) -> Self {
        Self {
            lines,
            level,
            classifier: MarkdownLineClassifier,
        }
    }

    /// Returns the list and the number of lines it consumed (always at least one).
    pub fn build(self, first: ListMarker<'a>) -> (ListBlock, usize) {
        let base = first.indent;
        let ordered = first.ordered();
        let mut items = vec![];
        let mut draft = ItemDraft::new(first.text);
        let mut pos = 1;
        let mut prev_blank = false;

        while let Some(&line) = self.lines.get(pos) {
            let class = self.classifier.classify(line);

            if class == LineClass::Blank {
                let next = self.lines[pos..]
                    .iter()
                    .find(|l| !l.trim().is_empty());
                match next {
                    Some(next) if self.continues_after_blank(next, base, ordered) => {
                        draft.content.push("");
                        prev_blank = true;
                        pos += 1;
                        continue;
                    }
                    _ => break,
                }
            }

            let (indent, _) = leading_indent(line);
            if indent >= base + ListMarker::NESTING_THRESHOLD {
                draft.content.push(dedent(line, base + ListMarker::INDENT_UNIT));
            } else if let LineClass::ListItem(marker) = class {
                if marker.ordered() != ordered {
                    break;
                }
                items.push(self.finish(draft));
                draft = ItemDraft::new(marker.text);
            } else if !prev_blank && class == LineClass::Text {
                // Lazy continuation of whatever the item ended with.
                if draft.content.is_empty() {
                    draft.text.push(line);
                } else {
                    draft.content.push(line);
                }
            } else {
                break;
            }
            prev_blank = false;
            pos += 1;
        }
        items.push(self.finish(draft));

        let list = ListBlock {
            ordered,
            start: first.number,
            level: self.level,
            items,
        };
        (list, pos)
    }

    fn continues_after_blank(&self, next: &str, base: usize, ordered: bool) -> bool {
        if leading_indent(next).0 >= base + ListMarker::NESTING_THRESHOLD {
            return true;
        }
        matches!(
            self.classifier.classify(next),
            LineClass::ListItem(marker) if marker.ordered() == ordered
        )
    }

    fn finish(&self, draft: ItemDraft<'a>) -> ListItemBlock {
        let ItemDraft { mut text, content } = draft;

        let mut rest = content.as_slice();
        while let [head @ .., last] = rest
            && last.trim().is_empty()
        {
            rest = head;
        }

        // Indented lines before the first nested marker continue the item text.
        let split = rest
            .iter()
            .position(|line| self.is_marker(line))
            .unwrap_or(rest.len());
        text.extend_from_slice(&rest[..split]);
        rest = &rest[split..];

        let mut nested: Option<ListBlock> = None;
        while let Some(&line) = rest.first() {
            match self.classifier.classify(line) {
                LineClass::ListItem(marker) if self.nests() => {
                    let (list, used) = ListBuilder::new(rest, self.level + 1).build(marker);
                    rest = &rest[used..];
                    match &mut nested {
                        Some(existing) => existing.items.extend(list.items),
                        None => nested = Some(list),
                    }
                }
                LineClass::Blank => rest = &rest[1..],
                _ => {
                    text.push(line);
                    rest = &rest[1..];
                }
            }
        }

        let source = Paragraph::join_lines(text);
        ListItemBlock {
            level: self.level,
            children: parse_inline(&source),
            nested: nested.map(Box::new),
        }
    }

    fn nests(&self) -> bool {
        self.level < MAX_NESTING
    }

    fn is_marker(&self, line: &str) -> bool {
        self.nests() && matches!(self.classifier.classify(line), LineClass::ListItem(_))
    }
}
