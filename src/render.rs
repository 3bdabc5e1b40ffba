//! Painting classified spans onto a terminal.

use anyhow::Context as _;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::palette::Palette;
use crate::tokenizer::{Category, Span, Tokenizer};

// ==============================================================================
// Highlighted Output
// ==============================================================================

/// Write `text` to `writer`, painting each classified span with its palette
/// color. Text outside any span is written unstyled, or with the palette's
/// foreground when `canvas` is set. With `canvas`, every segment also gets the
/// palette's background.
///
/// With `colorize` unset the output is byte-for-byte `text`. Silently returns
/// `Ok(())` on broken pipe so that piping to tools like `less` or `head` exits
/// cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_highlighted<W: Write>(
    writer: &mut W,
    text: &str,
    tokenizer: Tokenizer,
    palette: &Palette,
    colorize: bool,
    canvas: bool,
) -> anyhow::Result<()> {
    let painter = Painter {
        palette,
        colorize,
        canvas,
    };

    let result = (|| -> io::Result<()> {
        let mut cursor = 0;
        let mut painted = 0usize;
        for span in tokenizer.classify(text) {
            painter.write_segment(writer, &text[cursor..span.start], None)?;
            painter.write_segment(
                writer,
                &text[span.range()],
                Some(span.category),
            )?;
            cursor = span.end();
            painted += 1;
        }
        painter.write_segment(writer, &text[cursor..], None)?;
        log::debug!("painted {painted} spans over {} bytes", text.len());
        writer.flush()
    })();

    ignore_broken_pipe(result).context("write highlighted JSON to stdout")
}

/// Styles individual segments of the highlighted text.
struct Painter<'p> {
    palette: &'p Palette,
    colorize: bool,
    canvas: bool,
}

impl Painter<'_> {
    fn write_segment<W: Write>(
        &self,
        writer: &mut W,
        segment: &str,
        category: Option<Category>,
    ) -> io::Result<()> {
        if segment.is_empty() {
            return Ok(());
        }
        if !self.colorize {
            return writer.write_all(segment.as_bytes());
        }

        let foreground = match category {
            Some(category) => Some(self.palette.color_for(category)),
            None if self.canvas => Some(self.palette.foreground),
            None => None,
        };

        let mut styled = segment.normal();
        if let Some(fg) = foreground {
            styled = styled.truecolor(fg.r, fg.g, fg.b);
        }
        if self.canvas {
            let bg = self.palette.background;
            styled = styled.on_truecolor(bg.r, bg.g, bg.b);
        }
        write!(writer, "{styled}")
    }
}

// ==============================================================================
// Span Listing
// ==============================================================================

/// A span together with the text it covers, as written by [`write_spans`].
#[derive(Serialize)]
struct SpanRecord<'a> {
    #[serde(flatten)]
    span: Span,
    text: &'a str,
}

/// Write one JSON object per classified span of `text` to `writer`, e.g.
/// `{"start":1,"length":3,"category":"key","text":"\"a\""}`.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_spans<W: Write>(
    writer: &mut W,
    text: &str,
    tokenizer: Tokenizer,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        for span in tokenizer.classify(text) {
            let record = SpanRecord {
                span,
                text: &text[span.range()],
            };
            serde_json::to_writer(&mut *writer, &record)?;
            writeln!(writer)?;
        }
        writer.flush()
    })();

    ignore_broken_pipe(result).context("write spans to stdout")
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::Regex;

    const DOCUMENT: &str = concat!(
        "{\r\n  \"name\": \"Ada\",\r\n",
        "  \"age\": 36,\r\n  \"admin\": true\r\n}\r\n",
    );

    fn render(tokenizer: Tokenizer, colorize: bool, canvas: bool) -> String {
        let mut out = Vec::new();
        write_highlighted(
            &mut out,
            DOCUMENT,
            tokenizer,
            &Palette::default(),
            colorize,
            canvas,
        )
        .expect("write to Vec cannot fail");
        String::from_utf8(out).expect("valid UTF-8 output")
    }

    #[test]
    fn test_plain_output_is_verbatim() {
        assert_eq!(render(Tokenizer::new(), false, false), DOCUMENT);
        assert_eq!(render(Tokenizer::new(), false, true), DOCUMENT);
    }

    #[test]
    fn test_colored_output_preserves_text() {
        let ansi = Regex::new(r"\x1b\[[0-9;]*m").expect("valid regex");
        for canvas in [false, true] {
            let tokenizer = Tokenizer::new().with_literals(true);
            let output = render(tokenizer, true, canvas);
            assert_eq!(ansi.replace_all(&output, ""), DOCUMENT);
        }
    }

    proptest! {
        #[test]
        fn test_generated_plain_output_is_verbatim(
            text in r#"(?:["\\:{}\[\], 0-9a-z.é-]|\r\n|\n|true){0,64}"#,
        ) {
            let mut out = Vec::new();
            write_highlighted(
                &mut out,
                &text,
                Tokenizer::new(),
                &Palette::default(),
                false,
                true,
            )
            .expect("write to Vec cannot fail");
            prop_assert_eq!(out, text.into_bytes());
        }
    }

    #[test]
    fn test_write_spans() {
        let mut out = Vec::new();
        write_spans(&mut out, r#"{"a": [1, null]}"#, Tokenizer::new())
            .expect("write to Vec cannot fail");
        let output = String::from_utf8(out).expect("valid UTF-8 output");

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"start":1,"length":3,"category":"key","text":"\"a\""}"#,
                r#"{"start":7,"length":1,"category":"number","text":"1"}"#,
                r#"{"start":10,"length":4,"category":"string","text":"null"}"#,
            ]
        );
    }

    #[test]
    fn test_write_spans_empty() {
        let mut out = Vec::new();
        write_spans(&mut out, "  ", Tokenizer::new())
            .expect("write to Vec cannot fail");
        assert!(out.is_empty());
    }

    #[test]
    fn test_broken_pipe_is_ignored() {
        struct ClosedPipe;

        impl Write for ClosedPipe {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let palette = Palette::default();
        assert!(
            write_highlighted(
                &mut ClosedPipe,
                DOCUMENT,
                Tokenizer::new(),
                &palette,
                false,
                false
            )
            .is_ok()
        );
        assert!(
            write_spans(&mut ClosedPipe, DOCUMENT, Tokenizer::new()).is_ok()
        );
    }
}
