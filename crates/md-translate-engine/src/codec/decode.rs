use serde_json::{Map, Value};

use crate::model::{
    Block, CodeBlock, Document, ImageBlock, LinkBlock, ListBlock, ListItemBlock, TextBlock,
    Translatable,
};

use super::{
    CodecError,
    tags::{DISCRIMINANT, Tag},
};

/// Decodes a tagged JSON tree produced by [`super::encode`].
pub fn decode(value: &Value) -> Result<Document, CodecError> {
    let node = Node::read(value)?;
    match node.tag {
        Tag::Document => Ok(Document::new(node.children()?)),
        other => Err(node.malformed(format!(
            "expected a Document at the root, found {}",
            other.as_str()
        ))),
    }
}

/// A tagged JSON object with typed field accessors.
struct Node<'a> {
    tag: Tag,
    fields: &'a Map<String, Value>,
}

impl<'a> Node<'a> {
    fn read(value: &'a Value) -> Result<Self, CodecError> {
        let fields = value.as_object().ok_or_else(|| CodecError::MalformedNode {
            kind: "<unknown>".into(),
            reason: format!("expected an object, found {}", json_type(value)),
        })?;
        let name = fields
            .get(DISCRIMINANT)
            .and_then(Value::as_str)
            .ok_or_else(|| CodecError::MalformedNode {
                kind: "<unknown>".into(),
                reason: format!("missing string field `{DISCRIMINANT}`"),
            })?;
        let tag = Tag::from_name(name).ok_or_else(|| CodecError::UnknownVariant(name.into()))?;
        Ok(Self { tag, fields })
    }

    fn malformed(&self, reason: impl Into<String>) -> CodecError {
        CodecError::MalformedNode {
            kind: self.tag.as_str().into(),
            reason: reason.into(),
        }
    }

    fn field(&self, key: &str) -> Result<&'a Value, CodecError> {
        self.fields
            .get(key)
            .ok_or_else(|| self.malformed(format!("missing field `{key}`")))
    }

    fn string(&self, key: &str) -> Result<String, CodecError> {
        self.field(key)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.malformed(format!("field `{key}` must be a string")))
    }

    /// Absent and `null` both decode to `None`.
    fn opt_string(&self, key: &str) -> Result<Option<String>, CodecError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.malformed(format!("field `{key}` must be a string or null"))),
        }
    }

    fn boolean(&self, key: &str) -> Result<bool, CodecError> {
        self.field(key)?
            .as_bool()
            .ok_or_else(|| self.malformed(format!("field `{key}` must be a boolean")))
    }

    fn unsigned(&self, key: &str) -> Result<u64, CodecError> {
        self.field(key)?
            .as_u64()
            .ok_or_else(|| self.malformed(format!("field `{key}` must be a non-negative integer")))
    }

    fn opt_unsigned(&self, key: &str) -> Result<Option<u64>, CodecError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                self.malformed(format!("field `{key}` must be a non-negative integer or null"))
            }),
        }
    }

    fn level(&self) -> Result<usize, CodecError> {
        let level = self.unsigned("level")?;
        usize::try_from(level)
            .ok()
            .filter(|level| *level >= 1)
            .ok_or_else(|| self.malformed(format!("list level {level} is out of range")))
    }

    fn array(&self, key: &str) -> Result<&'a Vec<Value>, CodecError> {
        self.field(key)?
            .as_array()
            .ok_or_else(|| self.malformed(format!("field `{key}` must be an array")))
    }

    fn children(&self) -> Result<Vec<Block>, CodecError> {
        self.array("children")?.iter().map(decode_block).collect()
    }
}

fn decode_block(value: &Value) -> Result<Block, CodecError> {
    let node = Node::read(value)?;
    let block = match node.tag {
        Tag::Document => return Err(node.malformed("a Document can only appear at the root")),
        Tag::ListItem => return Err(node.malformed("a ListItemBlock must sit inside a ListBlock")),
        Tag::Paragraph => Block::Paragraph {
            children: node.children()?,
        },
        Tag::Heading => {
            let level = node.unsigned("level")?;
            let level = u8::try_from(level)
                .ok()
                .filter(|level| (1..=6).contains(level))
                .ok_or_else(|| node.malformed(format!("heading level {level} is outside 1-6")))?;
            Block::Heading {
                level,
                children: node.children()?,
            }
        }
        Tag::List => Block::List(decode_list(&node)?),
        Tag::Quote => Block::Quote {
            children: node.children()?,
        },
        Tag::Code => Block::Code(CodeBlock {
            language: node.opt_string("language")?,
            code: node.string("code")?,
        }),
        Tag::CodeSpan => Block::CodeSpan {
            code: node.string("code")?,
        },
        Tag::Html => Block::Html {
            code: node.string("code")?,
        },
        Tag::Separator => Block::Separator,
        Tag::LineBreak => Block::LineBreak,
        Tag::Newline => Block::Newline,
        Tag::Text => Block::Text(TextBlock {
            text: Translatable::with_translation(
                node.string("text")?,
                node.opt_string("translated_text")?,
            ),
            strong: node.boolean("strong")?,
            emphasis: node.boolean("emphasis")?,
        }),
        Tag::Strong => Block::Strong {
            children: node.children()?,
        },
        Tag::Emphasis => Block::Emphasis {
            children: node.children()?,
        },
        Tag::Link => Block::Link(LinkBlock {
            url: node.string("url")?,
            title: decode_title(&node)?,
            children: node.children()?,
        }),
        Tag::Image => Block::Image(ImageBlock {
            src: node.string("src")?,
            alt: Translatable::with_translation(
                node.string("alt")?,
                node.opt_string("translated_alt")?,
            ),
            title: node.opt_string("title")?,
        }),
    };
    Ok(block)
}

fn decode_title(node: &Node<'_>) -> Result<Option<Translatable>, CodecError> {
    let translated = node.opt_string("translated_title")?;
    match node.opt_string("title")? {
        Some(title) => Ok(Some(Translatable::with_translation(title, translated))),
        None if translated.is_some() => Err(node.malformed("`translated_title` without a `title`")),
        None => Ok(None),
    }
}

fn decode_list(node: &Node<'_>) -> Result<ListBlock, CodecError> {
    let ordered = node.boolean("ordered")?;
    let start = node.opt_unsigned("start")?;
    let level = node.level()?;
    let items = node
        .array("children")?
        .iter()
        .map(|value| {
            let item = Node::read(value)?;
            match item.tag {
                Tag::ListItem => decode_item(&item),
                other => Err(node.malformed(format!(
                    "children must be ListItemBlock, found {}",
                    other.as_str()
                ))),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ListBlock {
        ordered,
        start,
        level,
        items,
    })
}

fn decode_item(node: &Node<'_>) -> Result<ListItemBlock, CodecError> {
    let level = node.level()?;
    let children = node.children()?;
    let nested = match node.fields.get("nested_children") {
        None | Some(Value::Null) => None,
        Some(Value::Array(slot)) => match slot.as_slice() {
            [] => None,
            [value] => {
                let inner = Node::read(value)?;
                match inner.tag {
                    Tag::List => Some(Box::new(decode_list(&inner)?)),
                    other => {
                        return Err(node.malformed(format!(
                            "nested_children must hold a ListBlock, found {}",
                            other.as_str()
                        )));
                    }
                }
            }
            _ => {
                return Err(node.malformed(format!(
                    "nested_children holds {} entries, at most one is allowed",
                    slot.len()
                )));
            }
        },
        Some(_) => return Err(node.malformed("field `nested_children` must be an array")),
    };
    Ok(ListItemBlock {
        level,
        children,
        nested,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
