use crate::model::{Block, ImageBlock, LinkBlock, TextBlock};

/// Delimiter character of the enclosing strong/emphasis, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    None,
    Star,
    Underscore,
}

pub fn render_inline(children: &[Block], parent: Parent) -> String {
    let last = children.len().saturating_sub(1);
    let is_text = |i: Option<usize>| {
        i.and_then(|i| children.get(i))
            .is_some_and(|block| matches!(block, Block::Text(_)))
    };
    children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            // Next to a `*` delimiter, a nested `*` run would merge with it
            // (`***x***`), so the child switches to `_`.
            let edge = i == 0 || i == last;
            let delim = if parent == Parent::Star && edge {
                Parent::Underscore
            } else {
                Parent::Star
            };
            let beside_text = is_text(i.checked_sub(1)) || is_text(Some(i + 1));
            render_node(child, delim, beside_text)
        })
        .collect()
}

fn render_node(block: &Block, delim: Parent, beside_text: bool) -> String {
    match block {
        Block::Text(text) => render_text(text, beside_text),
        Block::Strong { children } => wrap(children, delim, 2),
        Block::Emphasis { children } => wrap(children, delim, 1),
        Block::CodeSpan { code } => render_code_span(code),
        Block::Link(link) => render_link(link),
        Block::Image(image) => render_image(image),
        Block::LineBreak => "  \n".to_string(),
        other => other.render(),
    }
}

fn wrap(children: &[Block], delim: Parent, len: usize) -> String {
    let marker = match delim {
        Parent::Underscore => "_",
        _ => "*",
    }
    .repeat(len);
    let inner_parent = match delim {
        Parent::Underscore => Parent::Underscore,
        _ => Parent::Star,
    };
    format!("{marker}{}{marker}", render_inline(children, inner_parent))
}

fn render_text(text: &TextBlock, beside_text: bool) -> String {
    let marker = match (text.strong, text.emphasis) {
        (true, true) => "***",
        (true, false) => "**",
        (false, true) => "*",
        (false, false) => "",
    };
    text.text
        .render_with(|content| format!("{marker}{}{marker}", escape_single(content, beside_text)))
}

/// Characters that can start or end a construct when they stand alone.
const SYNTAX: &str = "\\`*_[]()!<>#-+=|~";

/// A lone punctuation run is escaped only when a re-parse would otherwise
/// change it: it would merge into a neighbouring text run, or it is syntax.
fn escape_single(content: &str, beside_text: bool) -> String {
    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_punctuation() && (beside_text || SYNTAX.contains(c)) => {
            format!("\\{c}")
        }
        _ => content.to_string(),
    }
}

fn render_code_span(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let ticks = "`".repeat(longest + 1);
    let pad = code.starts_with('`')
        || code.ends_with('`')
        || (code.len() >= 2
            && code.starts_with(' ')
            && code.ends_with(' ')
            && !code.trim().is_empty());
    if pad {
        format!("{ticks} {code} {ticks}")
    } else {
        format!("{ticks}{code}{ticks}")
    }
}

/// A translated title renders a second link carrying it, like image alt text.
fn render_link(link: &LinkBlock) -> String {
    let text = render_inline(&link.children, Parent::None);
    match &link.title {
        Some(title) => {
            title.render_with(|title| format!("[{text}]({})", destination(&link.url, Some(title))))
        }
        None => format!("[{text}]({})", destination(&link.url, None)),
    }
}

fn render_image(image: &ImageBlock) -> String {
    let target = destination(&image.src, image.title.as_deref());
    image.alt.render_with(|alt| format!("![{alt}]({target})"))
}

fn destination(url: &str, title: Option<&str>) -> String {
    let balanced = url.chars().fold(Some(0usize), |depth, c| match c {
        '(' => depth.map(|d| d + 1),
        ')' => depth.and_then(|d| d.checked_sub(1)),
        _ => depth,
    }) == Some(0);
    let url = if balanced && !url.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
        url.to_string()
    } else {
        format!("<{url}>")
    };
    match title {
        Some(title) => {
            let escaped = title.replace('\\', "\\\\").replace('"', "\\\"");
            format!("{url} \"{escaped}\"")
        }
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::model::Translatable;

    fn render(children: Vec<Block>) -> String {
        render_inline(&children, Parent::None)
    }

    #[test]
    fn strong_and_emphasis() {
        assert_eq!(
            render(vec![
                Block::text("I just love "),
                Block::strong(vec![Block::text("bold text")]),
                Block::text("."),
            ]),
            "I just love **bold text**."
        );
    }

    #[rstest]
    #[case::after_construct(vec![Block::strong(vec![Block::text("plan")]), Block::text(".")], "**plan**.")]
    #[case::alone(vec![Block::text("?")], "?")]
    #[case::beside_text(vec![Block::text("1968"), Block::text("."), Block::text(" A")], "1968\\. A")]
    #[case::syntax_after_construct(vec![Block::code_span("x"), Block::text("*")], "`x`\\*")]
    #[case::syntax_alone(vec![Block::text("#")], "\\#")]
    fn lone_punctuation(#[case] children: Vec<Block>, #[case] expected: &str) {
        assert_eq!(render(children), expected);
    }

    #[rstest]
    #[case::strong_in_emphasis(
        Block::emphasis(vec![Block::strong(vec![Block::text("x")])]),
        "*__x__*"
    )]
    #[case::emphasis_in_strong(
        Block::strong(vec![Block::emphasis(vec![Block::text("x")])]),
        "**_x_**"
    )]
    #[case::inner_run_stays_star(
        Block::strong(vec![
            Block::text("a"),
            Block::emphasis(vec![Block::text("b")]),
            Block::text("c"),
        ]),
        "**a*b*c**"
    )]
    #[case::three_levels(
        Block::emphasis(vec![Block::strong(vec![Block::emphasis(vec![Block::text("x")])])]),
        "*__*x*__*"
    )]
    fn nesting_keeps_order(#[case] block: Block, #[case] expected: &str) {
        assert_eq!(render(vec![block]), expected);
    }

    #[test]
    fn text_flags() {
        let mut text = TextBlock::new("bold");
        text.strong = true;
        assert_eq!(render(vec![Block::Text(text)]), "**bold**");
    }

    #[rstest]
    #[case("code", "`code`")]
    #[case("Use `code` here", "``Use `code` here``")]
    #[case("`tick", "`` `tick ``")]
    #[case(" padded ", "`  padded  `")]
    fn code_spans(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(render_code_span(code), expected);
    }

    #[rstest]
    #[case("https://example.com", None, "https://example.com")]
    #[case("a b", None, "<a b>")]
    #[case("wiki/Foo_(bar)", None, "wiki/Foo_(bar)")]
    #[case("u", Some("Say \"hi\""), "u \"Say \\\"hi\\\"\"")]
    fn destinations(#[case] url: &str, #[case] title: Option<&str>, #[case] expected: &str) {
        assert_eq!(destination(url, title), expected);
    }

    #[test]
    fn link() {
        assert_eq!(
            render(vec![Block::Link(LinkBlock {
                url: "u".into(),
                title: None,
                children: vec![Block::text("go "), Block::code_span("x")],
            })]),
            "[go `x`](u)"
        );
    }

    #[test]
    fn translated_link_title_renders_second_link() {
        let mut title = Translatable::new("Inicio");
        title.set_translation("Home").unwrap();
        let link = Block::Link(LinkBlock {
            url: "/".into(),
            title: Some(title),
            children: vec![Block::text("casa")],
        });
        assert_eq!(
            render(vec![link]),
            "[casa](/ \"Inicio\")\n\n[casa](/ \"Home\")"
        );
    }

    #[test]
    fn line_break() {
        assert_eq!(
            render(vec![Block::text("a"), Block::LineBreak, Block::text("b")]),
            "a  \nb"
        );
    }
}
