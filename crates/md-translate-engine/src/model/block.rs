use super::translatable::Translatable;

/// A node of the markdown tree.
///
/// Block-level kinds (paragraphs, headings, lists, quotes, code, html,
/// separators) and inline kinds (text runs, strong/emphasis, links, images,
/// code spans, breaks) share one closed type so that containers can hold
/// whichever children the parser produced for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph { children: Vec<Block> },
    Heading { level: u8, children: Vec<Block> },
    List(ListBlock),
    Quote { children: Vec<Block> },
    Code(CodeBlock),
    CodeSpan { code: String },
    Html { code: String },
    Separator,
    LineBreak,
    Newline,
    Text(TextBlock),
    Strong { children: Vec<Block> },
    Emphasis { children: Vec<Block> },
    Link(LinkBlock),
    Image(ImageBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock {
    pub ordered: bool,
    /// Number of the first item; `None` for bullet lists.
    pub start: Option<u64>,
    /// 1 for a top-level list, incremented for each nesting step.
    pub level: usize,
    pub items: Vec<ListItemBlock>,
}

/// One list entry: inline text plus an optional sub-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemBlock {
    pub level: usize,
    pub children: Vec<Block>,
    pub nested: Option<Box<ListBlock>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub text: Translatable,
    pub strong: bool,
    pub emphasis: bool,
}

/// Link text is translated through its children; the title is a leaf of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBlock {
    pub url: String,
    pub title: Option<Translatable>,
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    pub src: String,
    pub alt: Translatable,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Text(TextBlock::new(text))
    }

    pub fn paragraph(children: Vec<Block>) -> Self {
        Block::Paragraph { children }
    }

    pub fn heading(level: u8, children: Vec<Block>) -> Self {
        Block::Heading { level, children }
    }

    pub fn quote(children: Vec<Block>) -> Self {
        Block::Quote { children }
    }

    pub fn strong(children: Vec<Block>) -> Self {
        Block::Strong { children }
    }

    pub fn emphasis(children: Vec<Block>) -> Self {
        Block::Emphasis { children }
    }

    pub fn code_span(code: impl Into<String>) -> Self {
        Block::CodeSpan { code: code.into() }
    }

    /// Whether this node's own translatable text is still waiting for a translation.
    ///
    /// Containers answer `false`, their leaves are visited separately. A link
    /// answers for its title only.
    pub fn needs_translation(&self) -> bool {
        match self {
            Block::Text(text) => text.text.needs_translation(),
            Block::Image(image) => image.alt.needs_translation(),
            Block::Link(link) => link.title.as_ref().is_some_and(Translatable::needs_translation),
            _ => false,
        }
    }

    /// The translatable payload of a leaf, if this node has one.
    pub fn translatable(&self) -> Option<&Translatable> {
        match self {
            Block::Text(text) => Some(&text.text),
            Block::Image(image) => Some(&image.alt),
            _ => None,
        }
    }

    pub fn translatable_mut(&mut self) -> Option<&mut Translatable> {
        match self {
            Block::Text(text) => Some(&mut text.text),
            Block::Image(image) => Some(&mut image.alt),
            _ => None,
        }
    }

    /// Direct inline/block children. List items are reached through [`ListBlock`].
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Paragraph { children }
            | Block::Heading { children, .. }
            | Block::Quote { children }
            | Block::Strong { children }
            | Block::Emphasis { children } => children,
            Block::Link(link) => &link.children,
            _ => &[],
        }
    }

    /// Visits every translatable leaf below (and including) this node in document order.
    pub fn for_each_translatable<'a>(&'a self, visit: &mut impl FnMut(&'a Translatable)) {
        if let Some(leaf) = self.translatable() {
            visit(leaf);
            return;
        }
        if let Block::List(list) = self {
            list.for_each_translatable(visit);
            return;
        }
        for child in self.children() {
            child.for_each_translatable(visit);
        }
        if let Block::Link(LinkBlock {
            title: Some(title), ..
        }) = self
        {
            visit(title);
        }
    }

    /// Mutable, fallible counterpart of [`Block::for_each_translatable`].
    ///
    /// Stops at the first error; leaves visited before it keep their changes.
    pub fn try_for_each_translatable_mut<E>(
        &mut self,
        visit: &mut impl FnMut(&mut Translatable) -> Result<(), E>,
    ) -> Result<(), E> {
        match self {
            Block::Text(text) => visit(&mut text.text),
            Block::Image(image) => visit(&mut image.alt),
            Block::List(list) => list.try_for_each_translatable_mut(visit),
            Block::Link(LinkBlock {
                title, children, ..
            }) => {
                for child in children {
                    child.try_for_each_translatable_mut(visit)?;
                }
                match title {
                    Some(title) => visit(title),
                    None => Ok(()),
                }
            }
            Block::Paragraph { children }
            | Block::Heading { children, .. }
            | Block::Quote { children }
            | Block::Strong { children }
            | Block::Emphasis { children } => {
                for child in children {
                    child.try_for_each_translatable_mut(visit)?;
                }
                Ok(())
            }
            Block::Code(_)
            | Block::CodeSpan { .. }
            | Block::Html { .. }
            | Block::Separator
            | Block::LineBreak
            | Block::Newline => Ok(()),
        }
    }
}

impl ListBlock {
    pub fn bullet(level: usize, items: Vec<ListItemBlock>) -> Self {
        Self {
            ordered: false,
            start: None,
            level,
            items,
        }
    }

    pub fn ordered(start: u64, level: usize, items: Vec<ListItemBlock>) -> Self {
        Self {
            ordered: true,
            start: Some(start),
            level,
            items,
        }
    }

    pub fn for_each_translatable<'a>(&'a self, visit: &mut impl FnMut(&'a Translatable)) {
        for item in &self.items {
            for child in &item.children {
                child.for_each_translatable(visit);
            }
            if let Some(nested) = &item.nested {
                nested.for_each_translatable(visit);
            }
        }
    }

    pub fn try_for_each_translatable_mut<E>(
        &mut self,
        visit: &mut impl FnMut(&mut Translatable) -> Result<(), E>,
    ) -> Result<(), E> {
        for item in &mut self.items {
            for child in &mut item.children {
                child.try_for_each_translatable_mut(visit)?;
            }
            if let Some(nested) = &mut item.nested {
                nested.try_for_each_translatable_mut(visit)?;
            }
        }
        Ok(())
    }
}

impl ListItemBlock {
    pub fn new(level: usize, children: Vec<Block>) -> Self {
        Self {
            level,
            children,
            nested: None,
        }
    }

    pub fn with_nested(mut self, nested: ListBlock) -> Self {
        self.nested = Some(Box::new(nested));
        self
    }
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Translatable::new(text),
            strong: false,
            emphasis: false,
        }
    }
}

impl ImageBlock {
    pub fn new(src: impl Into<String>, alt: impl Into<String>, title: Option<String>) -> Self {
        Self {
            src: src.into(),
            alt: Translatable::new(alt),
            title,
        }
    }
}
