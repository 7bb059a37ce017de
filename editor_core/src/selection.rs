//! Selection type and offset validation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Selection as byte offsets into the document.
///
/// `anchor` is where the selection started, `head` where it ends (the caret).
/// Either may be the larger one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

/// Invalid selection offsets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("offset {offset} is past the end of the document ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

impl Selection {
    pub const fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Empty selection (caret) at `offset`
    pub const fn cursor(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn range(&self) -> Range<usize> {
        self.from()..self.to()
    }

    /// Checks both ends against `text`
    pub fn validate(&self, text: &str) -> Result<(), SelectionError> {
        for offset in [self.anchor, self.head] {
            if offset > text.len() {
                return Err(SelectionError::OutOfBounds {
                    offset,
                    len: text.len(),
                });
            }
            if !text.is_char_boundary(offset) {
                return Err(SelectionError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_empty() {
        let caret = Selection::cursor(4);
        assert!(caret.is_empty());
        assert_eq!(caret.range(), 4..4);
    }

    #[test]
    fn test_backward_selection_range() {
        let selection = Selection::new(9, 2);
        assert!(!selection.is_empty());
        assert_eq!(selection.from(), 2);
        assert_eq!(selection.to(), 9);
    }

    #[test]
    fn test_validate_bounds() {
        let text = "SELECT";
        assert!(Selection::new(0, 6).validate(text).is_ok());
        assert_eq!(
            Selection::new(0, 7).validate(text),
            Err(SelectionError::OutOfBounds { offset: 7, len: 6 })
        );
    }

    #[test]
    fn test_validate_char_boundary() {
        let text = "naïve";
        // 'ï' spans bytes 2..4
        assert_eq!(
            Selection::cursor(3).validate(text),
            Err(SelectionError::NotCharBoundary { offset: 3 })
        );
        assert!(Selection::cursor(4).validate(text).is_ok());
    }
}
