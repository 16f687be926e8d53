/// Discriminant key written into every encoded node.
pub const DISCRIMINANT: &str = "block_type";

/// Every kind name the codec knows about.
///
/// Decoding matches on this enum exhaustively, so adding a node kind forces
/// both directions of the codec to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Document,
    Paragraph,
    Heading,
    List,
    ListItem,
    Quote,
    Code,
    CodeSpan,
    Html,
    Separator,
    LineBreak,
    Newline,
    Text,
    Strong,
    Emphasis,
    Link,
    Image,
}

impl Tag {
    pub const ALL: [Tag; 17] = [
        Tag::Document,
        Tag::Paragraph,
        Tag::Heading,
        Tag::List,
        Tag::ListItem,
        Tag::Quote,
        Tag::Code,
        Tag::CodeSpan,
        Tag::Html,
        Tag::Separator,
        Tag::LineBreak,
        Tag::Newline,
        Tag::Text,
        Tag::Strong,
        Tag::Emphasis,
        Tag::Link,
        Tag::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Document => "Document",
            Tag::Paragraph => "Paragraph",
            Tag::Heading => "HeadingBlock",
            Tag::List => "ListBlock",
            Tag::ListItem => "ListItemBlock",
            Tag::Quote => "BlockQuote",
            Tag::Code => "CodeBlock",
            Tag::CodeSpan => "CodeSpanBlock",
            Tag::Html => "HtmlBlock",
            Tag::Separator => "SeparatorBlock",
            Tag::LineBreak => "LineBreakBlock",
            Tag::Newline => "NewlineBlock",
            Tag::Text => "TextBlock",
            Tag::Strong => "StrongTextBlock",
            Tag::Emphasis => "EmphasisTextBlock",
            Tag::Link => "LinkBlock",
            Tag::Image => "ImageBlock",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.as_str() == name)
    }
}
