use crate::{model::ListBlock, parsing::blocks::kinds::ListMarker};

use super::inline::{Parent, render_inline};

const BULLET: &str = "-";

/// Renders items one per line. Continuation lines and nested lists are
/// indented by one unit; blank lines stay empty.
pub fn render_list(list: &ListBlock) -> String {
    let indent = " ".repeat(ListMarker::INDENT_UNIT);
    let start = list.start.unwrap_or(1);
    let mut lines = vec![];

    for (offset, item) in (0u64..).zip(&list.items) {
        let marker = if list.ordered {
            format!("{}.", start.saturating_add(offset))
        } else {
            BULLET.to_string()
        };

        let body = render_inline(&item.children, Parent::None);
        let mut body_lines = body.split('\n');
        match body_lines.next() {
            Some(first) if !first.is_empty() => lines.push(format!("{marker} {first}")),
            _ => lines.push(marker),
        }
        lines.extend(body_lines.map(|line| indent_line(&indent, line)));

        if let Some(nested) = &item.nested {
            let nested = render_list(nested);
            lines.extend(nested.split('\n').map(|line| indent_line(&indent, line)));
        }
    }
    lines.join("\n")
}

fn indent_line(indent: &str, line: &str) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{indent}{line}")
    }
}
