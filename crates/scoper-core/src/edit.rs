//! Text rewrites addressed by source spans

use mago_span::Span;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("Edit span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}

/// Replace the text under `span` with `replacement`.
///
/// A zero-width span inserts at `span.start`.
#[derive(Debug, Clone)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
    /// What the edit does, for logs and reports
    pub message: String,
}

impl Edit {
    pub fn new(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            message: message.into(),
        }
    }

    /// Insert `text` where `span` starts.
    pub fn insert_before(span: Span, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Span::new(span.file_id, span.start, span.start), text, message)
    }

    /// Insert `text` where `span` ends.
    pub fn insert_after(span: Span, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Span::new(span.file_id, span.end, span.end), text, message)
    }

    pub fn start_offset(&self) -> usize {
        self.span.start.offset as usize
    }

    pub fn end_offset(&self) -> usize {
        self.span.end.offset as usize
    }

    pub fn is_insertion(&self) -> bool {
        self.start_offset() == self.end_offset()
    }
}

/// Build the rewritten text in one forward pass.
///
/// Text outside the edited spans is copied as is. Edits may be given in any
/// order; an insertion at the offset where a replacement starts is written
/// before the replacement.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.start_offset(), edit.end_offset()));

    let extra: usize = ordered.iter().map(|edit| edit.replacement.len()).sum();
    let mut output = String::with_capacity(source.len() + extra);
    let mut cursor = 0;

    for edit in ordered {
        let (start, end) = (edit.start_offset(), edit.end_offset());
        if start > end || end > source.len() || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return Err(EditError::SpanOutOfBounds {
                start,
                end,
                len: source.len(),
            });
        }
        if start < cursor {
            return Err(EditError::OverlappingEdits(start));
        }

        output.push_str(&source[cursor..start]);
        output.push_str(&edit.replacement);
        cursor = end;
    }

    output.push_str(&source[cursor..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mago_database::file::FileId;
    use mago_span::Position;

    fn span(start: u32, end: u32) -> Span {
        Span::new(FileId::zero(), Position::new(start), Position::new(end))
    }

    #[test]
    fn test_replacement_keeps_surroundings() {
        let source = "new Foo\\Bar();";
        let edit = Edit::new(span(4, 11), "\\Scoped\\Foo\\Bar", "prefix class");

        assert_eq!(apply_edits(source, &[edit]).unwrap(), "new \\Scoped\\Foo\\Bar();");
    }

    #[test]
    fn test_edits_in_any_order() {
        let source = "new A(); new B();";
        let edits = vec![
            Edit::new(span(13, 14), "\\P\\B", "second"),
            Edit::new(span(4, 5), "\\P\\A", "first"),
        ];

        assert_eq!(apply_edits(source, &edits).unwrap(), "new \\P\\A(); new \\P\\B();");
    }

    #[test]
    fn test_insertion_before_replacement_at_same_offset() {
        let source = "<?php\nA;";
        let edits = vec![
            Edit::new(span(6, 7), "\\B", "replace"),
            Edit::insert_before(span(6, 7), "namespace P;\n", "insert"),
        ];

        assert_eq!(apply_edits(source, &edits).unwrap(), "<?php\nnamespace P;\n\\B;");
    }

    #[test]
    fn test_insert_after() {
        let source = "class A {}";
        let edit = Edit::insert_after(span(0, 10), "\nalias();", "alias");
        assert!(edit.is_insertion());

        assert_eq!(apply_edits(source, &[edit]).unwrap(), "class A {}\nalias();");
    }

    #[test]
    fn test_no_edits() {
        assert_eq!(apply_edits("unchanged", &[]).unwrap(), "unchanged");
    }

    #[test]
    fn test_out_of_bounds() {
        let edit = Edit::new(span(0, 100), "replacement", "oob");
        let result = apply_edits("short", &[edit]);
        assert!(matches!(result, Err(EditError::SpanOutOfBounds { end: 100, len: 5, .. })));
    }

    #[test]
    fn test_overlapping() {
        let edits = vec![
            Edit::new(span(0, 7), "X", "whole"),
            Edit::new(span(4, 7), "Y", "tail"),
        ];
        let result = apply_edits("Foo\\Bar", &edits);
        assert!(matches!(result, Err(EditError::OverlappingEdits(4))));
    }
}
