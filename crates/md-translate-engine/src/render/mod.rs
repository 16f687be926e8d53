//! # Markdown Rendering
//!
//! Inverse of [`crate::parsing`]: turns a tree back into markdown text.
//! Rendering is total and deterministic. For trees produced by the parser
//! (without translations), parsing the rendered text yields the same tree.

mod inline;
mod list;

use crate::model::{Block, CodeBlock, Document};

use inline::{Parent, render_inline};
use list::render_list;

/// Separator between top-level blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

impl Document {
    pub fn render(&self) -> String {
        self.children
            .iter()
            .map(Block::render)
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }
}

impl Block {
    pub fn render(&self) -> String {
        match self {
            Block::Paragraph { children } => render_inline(children, Parent::None),
            Block::Heading { level, children } => {
                let hashes = "#".repeat(usize::from(*level));
                let text = render_inline(children, Parent::None);
                if text.is_empty() {
                    hashes
                } else {
                    format!("{hashes} {text}")
                }
            }
            Block::List(list) => render_list(list),
            Block::Quote { children } => render_quote(children),
            Block::Code(code) => render_code(code),
            Block::Html { code } => code.clone(),
            Block::Separator => "---".to_string(),
            Block::Newline => String::new(),
            inline => render_inline(std::slice::from_ref(inline), Parent::None),
        }
    }
}

fn render_quote(children: &[Block]) -> String {
    let inner = children
        .iter()
        .map(Block::render)
        .collect::<Vec<_>>()
        .join("\n");
    inner
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_code(code: &CodeBlock) -> String {
    let fence = code_fence_for(&code.code);
    let language = code.language.as_deref().unwrap_or("");
    let newline = if code.code.is_empty() || code.code.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    format!("{fence}{language}\n{}{newline}{fence}", code.code)
}

/// Backticks unless the code itself holds a backtick fence line; tildes then,
/// or a longer backtick run if tildes are taken as well.
fn code_fence_for(code: &str) -> String {
    let fence_runs = |marker: char| {
        code.lines()
            .map(|line| line.trim_start().chars().take_while(|c| *c == marker).count())
            .max()
            .unwrap_or(0)
    };
    let backticks = fence_runs('`');
    if backticks < 3 {
        return "```".to_string();
    }
    if fence_runs('~') < 3 {
        return "~~~".to_string();
    }
    "`".repeat(backticks + 1)
}
