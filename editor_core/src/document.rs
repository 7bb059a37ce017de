//! Document buffer

use std::ops::Range;

/// Whole-document text buffer.
///
/// Unlike a line array, the document keeps its exact bytes, including
/// trailing newlines and `\r\n` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Text inside `range`, `None` when the range is invalid
    pub fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.text.get(range)
    }

    /// Replaces `range` with `insert`.
    ///
    /// The range must lie on character boundaries; callers validate it first.
    pub fn replace(&mut self, range: Range<usize>, insert: &str) {
        self.text.replace_range(range, insert);
    }

    /// Replaces the whole document
    pub fn replace_all(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let document = Document::new();
        assert!(document.is_empty());
        assert_eq!(document.line_count(), 1);
    }

    #[test]
    fn test_preserves_exact_text() {
        let document = Document::from_text("SELECT 1;\r\n\n");
        assert_eq!(document.as_str(), "SELECT 1;\r\n\n");
        assert_eq!(document.line_count(), 3);
    }

    #[test]
    fn test_replace_range() {
        let mut document = Document::from_text("SELECT a FROM t");
        document.replace(7..8, "id, name");
        assert_eq!(document.as_str(), "SELECT id, name FROM t");
    }

    #[test]
    fn test_slice_rejects_split_char() {
        let document = Document::from_text("é");
        assert_eq!(document.slice(0..1), None);
        assert_eq!(document.slice(0..2), Some("é"));
    }

    #[test]
    fn test_replace_all() {
        let mut document = Document::from_text("old");
        document.replace_all("new text");
        assert_eq!(document.as_str(), "new text");
    }
}
