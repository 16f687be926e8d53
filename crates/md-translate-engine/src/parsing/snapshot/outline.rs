use std::fmt::Write;

use crate::model::{Block, Document, ListBlock, Translatable};

/// One line per node, children indented by two spaces.
///
/// Text is shown quoted; a stored translation follows as `=> "..."`.
pub fn outline(doc: &Document) -> String {
    let mut out = String::new();
    for block in &doc.children {
        outline_block(&mut out, block, 0);
    }
    out
}

fn line(out: &mut String, depth: usize, text: impl AsRef<str>) {
    let _ = writeln!(out, "{:indent$}{}", "", text.as_ref(), indent = depth * 2);
}

fn leaf(label: &str, leaf: &Translatable) -> String {
    match leaf.translated() {
        Some(translated) => format!("{label} {:?} => {translated:?}", leaf.original()),
        None => format!("{label} {:?}", leaf.original()),
    }
}

fn outline_block(out: &mut String, block: &Block, depth: usize) {
    let label = match block {
        Block::Paragraph { .. } => "Paragraph".to_string(),
        Block::Heading { level, .. } => format!("Heading({level})"),
        Block::List(list) => return outline_list(out, list, depth),
        Block::Quote { .. } => "Quote".to_string(),
        Block::Code(code) => format!(
            "Code({}) {:?}",
            code.language.as_deref().unwrap_or("-"),
            code.code
        ),
        Block::CodeSpan { code } => format!("CodeSpan {code:?}"),
        Block::Html { code } => format!("Html {code:?}"),
        Block::Separator => "Separator".to_string(),
        Block::LineBreak => "LineBreak".to_string(),
        Block::Newline => "Newline".to_string(),
        Block::Text(text) => {
            let mut label = leaf("Text", &text.text);
            if text.strong {
                label.push_str(" +strong");
            }
            if text.emphasis {
                label.push_str(" +emphasis");
            }
            label
        }
        Block::Strong { .. } => "Strong".to_string(),
        Block::Emphasis { .. } => "Emphasis".to_string(),
        Block::Link(link) => match &link.title {
            Some(title) => format!("Link {:?} {}", link.url, leaf("title", title)),
            None => format!("Link {:?}", link.url),
        },
        Block::Image(image) => format!("Image {:?} {}", image.src, leaf("alt", &image.alt)),
    };
    line(out, depth, label);
    for child in block.children() {
        outline_block(out, child, depth + 1);
    }
}

fn outline_list(out: &mut String, list: &ListBlock, depth: usize) {
    let kind = match list.start {
        Some(start) if list.ordered => format!("ordered from {start}"),
        _ => "bullet".to_string(),
    };
    line(out, depth, format!("List({kind}, level {})", list.level));
    for item in &list.items {
        line(out, depth + 1, "Item");
        for child in &item.children {
            outline_block(out, child, depth + 2);
        }
        if let Some(nested) = &item.nested {
            outline_list(out, nested, depth + 2);
        }
    }
}
