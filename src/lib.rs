/*!
# `jsonhl` Library

Lexical syntax highlighting for JSON text: classify tokens into styled spans
and paint them onto a terminal.
*/

pub mod palette;
pub mod render;
pub mod tokenizer;

// Re-exports
pub use palette::{Color, Palette};
pub use tokenizer::{Category, Span, Tokenizer, classify};
