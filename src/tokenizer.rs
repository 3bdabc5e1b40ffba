//! # Tokenizer
//!
//! Classifies JSON-like text into a lazy sequence of styled spans that any
//! renderer can paint.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{LINE_SEPARATOR, Spans, Tokenizer, classify};
pub use token::{Category, Span};
