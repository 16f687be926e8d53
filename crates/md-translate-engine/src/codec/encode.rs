use serde_json::{Map, Value};

use crate::model::{Block, Document, ListBlock, ListItemBlock, Translatable};

use super::tags::{DISCRIMINANT, Tag};

/// Encodes a document depth-first into tagged JSON objects.
pub fn encode(doc: &Document) -> Value {
    let mut node = open(Tag::Document);
    node.insert("children".into(), encode_all(&doc.children));
    Value::Object(node)
}

fn open(tag: Tag) -> Map<String, Value> {
    let mut node = Map::new();
    node.insert(DISCRIMINANT.into(), Value::from(tag.as_str()));
    node
}

fn encode_all(blocks: &[Block]) -> Value {
    Value::Array(blocks.iter().map(encode_block).collect())
}

fn encode_block(block: &Block) -> Value {
    let node = match block {
        Block::Paragraph { children } => container(Tag::Paragraph, children),
        Block::Heading { level, children } => {
            let mut node = open(Tag::Heading);
            node.insert("level".into(), Value::from(*level));
            node.insert("children".into(), encode_all(children));
            node
        }
        Block::List(list) => encode_list(list),
        Block::Quote { children } => container(Tag::Quote, children),
        Block::Code(code) => {
            let mut node = open(Tag::Code);
            node.insert("language".into(), Value::from(code.language.clone()));
            node.insert("code".into(), Value::from(code.code.as_str()));
            node
        }
        Block::CodeSpan { code } => {
            let mut node = open(Tag::CodeSpan);
            node.insert("code".into(), Value::from(code.as_str()));
            node
        }
        Block::Html { code } => {
            let mut node = open(Tag::Html);
            node.insert("code".into(), Value::from(code.as_str()));
            node
        }
        Block::Separator => open(Tag::Separator),
        Block::LineBreak => open(Tag::LineBreak),
        Block::Newline => open(Tag::Newline),
        Block::Text(text) => {
            let mut node = open(Tag::Text);
            node.insert("text".into(), Value::from(text.text.original()));
            node.insert(
                "translated_text".into(),
                Value::from(text.text.translated().map(str::to_owned)),
            );
            node.insert("strong".into(), Value::from(text.strong));
            node.insert("emphasis".into(), Value::from(text.emphasis));
            node
        }
        Block::Strong { children } => container(Tag::Strong, children),
        Block::Emphasis { children } => container(Tag::Emphasis, children),
        Block::Link(link) => {
            let mut node = open(Tag::Link);
            node.insert("url".into(), Value::from(link.url.as_str()));
            let title = link.title.as_ref();
            node.insert(
                "title".into(),
                Value::from(title.map(|title| title.original().to_owned())),
            );
            node.insert(
                "translated_title".into(),
                Value::from(title.and_then(Translatable::translated).map(str::to_owned)),
            );
            node.insert("children".into(), encode_all(&link.children));
            node
        }
        Block::Image(image) => {
            let mut node = open(Tag::Image);
            node.insert("src".into(), Value::from(image.src.as_str()));
            node.insert("alt".into(), Value::from(image.alt.original()));
            node.insert(
                "translated_alt".into(),
                Value::from(image.alt.translated().map(str::to_owned)),
            );
            node.insert("title".into(), Value::from(image.title.clone()));
            node
        }
    };
    Value::Object(node)
}

fn container(tag: Tag, children: &[Block]) -> Map<String, Value> {
    let mut node = open(tag);
    node.insert("children".into(), encode_all(children));
    node
}

fn encode_list(list: &ListBlock) -> Map<String, Value> {
    let mut node = open(Tag::List);
    node.insert("ordered".into(), Value::from(list.ordered));
    node.insert("start".into(), Value::from(list.start));
    node.insert("level".into(), Value::from(list.level));
    node.insert(
        "children".into(),
        Value::Array(list.items.iter().map(encode_item).collect()),
    );
    node
}

fn encode_item(item: &ListItemBlock) -> Value {
    let mut node = open(Tag::ListItem);
    node.insert("level".into(), Value::from(item.level));
    node.insert("children".into(), encode_all(&item.children));
    let nested = item
        .nested
        .as_deref()
        .map(|list| Value::Object(encode_list(list)));
    node.insert(
        "nested_children".into(),
        Value::Array(nested.into_iter().collect()),
    );
    Value::Object(node)
}
