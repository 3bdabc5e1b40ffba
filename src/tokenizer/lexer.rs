//! # JSON Span Lexer
//!
//! Scans JSON-like text for lexical atoms (quoted strings, keys, numbers and
//! the `true`/`false`/`null` keywords) and classifies each one for styling.
//! The scan is purely lexical: nothing is validated and malformed input simply
//! yields whatever atoms happen to match.
use regex::{Match, Matches, Regex};
use std::iter::FusedIterator;
use std::str::Split;
use std::sync::LazyLock;

use crate::tokenizer::{Category, Span};

/// Separator used to split the input into independently scanned lines.
///
/// Only the two-byte `\r\n` sequence splits lines. Text that uses bare `\n`
/// is scanned as a single line, so e.g. a quoted string and a colon on the
/// next `\n`-terminated line still form a key.
pub const LINE_SEPARATOR: &str = "\r\n";

/// Grammar of the lexical atoms, tried left to right at each position:
/// a quoted string with an optional trailing (whitespace and) colon, a keyword
/// literal as a whole word, or a number.
static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#""(?:\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(?:\s*:)?"#,
        r"|\b(?:true|false|null)\b",
        r"|-?\d+(?:\.\d*)?(?:[eE][+\-]?\d+)?",
    ))
    .expect("span pattern is a valid regex")
});

/// Classifies JSON-like text into styled [`Span`]s.
///
/// The default tokenizer buckets every non-key match by digit presence alone:
/// `true`, `false` and `null` come out as [`Category::String`]. Use
/// [`Tokenizer::with_literals`] to classify them as [`Category::Literal`]
/// instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    literals: bool,
}

impl Tokenizer {
    /// Creates a tokenizer with the default classification rules.
    #[must_use]
    pub const fn new() -> Self {
        Self { literals: false }
    }

    /// Enables or disables recognition of `true`, `false` and `null` as
    /// [`Category::Literal`].
    #[must_use]
    pub const fn with_literals(mut self, enabled: bool) -> Self {
        self.literals = enabled;
        self
    }

    /// Whether keyword literals are classified as [`Category::Literal`].
    #[must_use]
    pub const fn recognizes_literals(&self) -> bool {
        self.literals
    }

    /// Returns a lazy iterator over the spans of `text`, in ascending `start`
    /// order. Each call starts a fresh scan.
    #[must_use]
    pub fn classify<'t>(&self, text: &'t str) -> Spans<'t> {
        Spans {
            tokenizer: *self,
            lines: text.split(LINE_SEPARATOR),
            line_start: 0,
            next_line_start: 0,
            matches: None,
        }
    }

    /// Classifies a single match found at `line_start`, returning `None` for
    /// empty or whitespace-only matches.
    fn classify_match(&self, m: &Match<'_>, line_start: usize) -> Option<Span> {
        let text = m.as_str();
        if text.trim().is_empty() {
            return None;
        }

        let start = line_start + m.start();
        if text.ends_with(':') {
            // the colon is not part of the key, whitespace before it is
            return Some(Span::new(start, text.len() - 1, Category::Key));
        }

        let keyword = matches!(text, "true" | "false" | "null");
        let category = if self.literals && keyword {
            Category::Literal
        } else if text.bytes().any(|b| b.is_ascii_digit()) {
            Category::Number
        } else {
            Category::String
        };

        Some(Span::new(start, text.len(), category))
    }
}

/// Lazy sequence of [`Span`]s over a borrowed text buffer.
///
/// Created by [`Tokenizer::classify`] or [`classify`].
#[derive(Debug)]
pub struct Spans<'t> {
    tokenizer: Tokenizer,
    lines: Split<'t, &'static str>,
    /// Absolute offset of the line currently being scanned
    line_start: usize,
    /// Absolute offset of the line after it
    next_line_start: usize,
    matches: Option<Matches<'static, 't>>,
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            if let Some(m) = self.matches.as_mut().and_then(Iterator::next) {
                match self.tokenizer.classify_match(&m, self.line_start) {
                    Some(span) => return Some(span),
                    None => continue,
                }
            }

            let line = self.lines.next()?;
            self.line_start = self.next_line_start;
            self.next_line_start += line.len() + LINE_SEPARATOR.len();
            log::trace!(
                "scanning line at byte {} ({} bytes)",
                self.line_start,
                line.len()
            );
            self.matches = Some(PATTERN.find_iter(line));
        }
    }
}

impl FusedIterator for Spans<'_> {}

/// Classifies `text` with the default [`Tokenizer`].
///
/// # Examples
///
/// ```rust
/// use jsonhl::tokenizer::{classify, Category, Span};
///
/// let spans: Vec<Span> = classify(r#"{"a": 1}"#).collect();
/// assert_eq!(
///     spans,
///     vec![Span::new(1, 3, Category::Key), Span::new(6, 1, Category::Number)]
/// );
/// ```
#[must_use]
pub fn classify(text: &str) -> Spans<'_> {
    Tokenizer::new().classify(text)
}
