/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the default block when no other
/// opener matches. Inline parsing is applied to the joined content.
pub struct Paragraph;

impl Paragraph {
    /// Joins paragraph lines into inline source: each line loses its leading
    /// whitespace, trailing whitespace of the last line is dropped.
    pub fn join_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> String {
        let joined = lines
            .into_iter()
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .join("\n");
        joined.trim_end().to_string()
    }
}
