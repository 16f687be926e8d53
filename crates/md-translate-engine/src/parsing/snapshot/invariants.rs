use crate::model::{Block, Document, ListBlock};

/// Panics if `doc` breaks a structural invariant of parser output.
pub fn check(doc: &Document) {
    for block in &doc.children {
        check_block(block, false);
    }
}

fn check_block(block: &Block, in_quote: bool) {
    match block {
        Block::Heading { level, .. } => {
            assert!((1..=6).contains(level), "heading level out of range: {level}");
        }
        Block::List(list) => check_list(list, in_quote),
        Block::Newline => assert!(in_quote, "newline marker outside a block quote"),
        Block::Text(text) => assert!(
            !text.text.original().is_empty(),
            "empty text run"
        ),
        _ => {}
    }
    let in_quote = in_quote || matches!(block, Block::Quote { .. });
    for child in block.children() {
        check_block(child, in_quote);
    }
}

fn check_list(list: &ListBlock, in_quote: bool) {
    assert!(list.level >= 1, "list level must start at 1");
    assert_eq!(
        list.ordered,
        list.start.is_some(),
        "ordered lists and only ordered lists carry a start number"
    );
    for item in &list.items {
        assert_eq!(item.level, list.level, "item level differs from its list");
        for child in &item.children {
            check_block(child, in_quote);
        }
        if let Some(nested) = &item.nested {
            assert_eq!(nested.level, list.level + 1, "nested list level");
            check_list(nested, in_quote);
        }
    }
}
