//! # Classified Spans
//!
//! Defines the styled spans produced by classifying JSON-like text.
use serde::Serialize;
use std::fmt::Display;
use std::ops::Range;

/// The styling class assigned to a lexical token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Object key, i.e. a quoted string followed by a colon
    Key,

    /// Value without any ASCII digit
    String,

    /// Value containing at least one ASCII digit
    Number,

    /// `true`, `false` or `null`, only produced when literal recognition is
    /// enabled on the [`Tokenizer`](crate::tokenizer::Tokenizer)
    Literal,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Literal => write!(f, "literal"),
        }
    }
}

/// A classified region of the scanned text.
///
/// `start` is a byte offset into the whole buffer handed to
/// [`classify`](crate::tokenizer::classify), not into the line the token was
/// found on.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Span {
    /// Byte offset of the first byte of the token
    pub start: usize,
    /// Length of the token in bytes
    pub length: usize,
    /// Styling class of the token
    pub category: Category,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, length: usize, category: Category) -> Self {
        Self {
            start,
            length,
            category,
        }
    }

    /// Byte offset one past the last byte of the token.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    /// The `[start, end)` byte range covered by the span.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns the covered slice of `text`, or `None` if the span does not
    /// fit `text` (e.g. it was produced from a different buffer).
    #[must_use]
    pub fn text<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.range())
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}..{}]", self.category, self.start, self.end())
    }
}
