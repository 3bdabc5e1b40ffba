/*!
# Palette

Caller-supplied colors for painting classified spans.

Colors are written as `#`-prefixed hex strings in any of the `#RGB`, `#ARGB`,
`#RRGGBB` or `#AARRGGBB` forms. A [`Palette`] maps each
[`Category`] to one of its colors and can be loaded from a JSON file holding
any subset of its fields:

```rust
use jsonhl::{Category, Color, Palette};

let palette = Palette::from_json(r##"{"key": "#FF0000", "literal": "#0F0"}"##)
    .expect("valid palette");
assert_eq!(palette.color_for(Category::Key), Color::rgb(0xFF, 0, 0));
assert_eq!(palette.color_for(Category::Literal), Color::rgb(0, 0xFF, 0));
assert_eq!(palette.number, Palette::default().number);
```
*/
use anyhow::Context as _;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::tokenizer::Category;

/// A 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Alpha channel, carried for round-tripping but never painted
    pub a: u8,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Creates a color from all four channels.
    #[must_use]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Creates a fully opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }
}

/// Represents errors that can occur while parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    MissingHash,
    /// The number of hex digits is not 3, 4, 6 or 8.
    InvalidLength(usize),
    /// A character is not a hex digit.
    InvalidDigit(char),
}

impl Error for ColorParseError {}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::InvalidLength(len) => write!(
                f,
                "expected 3, 4, 6 or 8 hex digits, found {len}"
            ),
            Self::InvalidDigit(c) => write!(f, "invalid hex digit: {c:?}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        let nibbles = digits
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .and_then(|d| u8::try_from(d).ok())
                    .ok_or(ColorParseError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let channel = |hi: u8, lo: u8| (hi << 4) | lo;
        let color = match *nibbles.as_slice() {
            [r, g, b] => Self::rgb(channel(r, r), channel(g, g), channel(b, b)),
            [a, r, g, b] => Self::argb(
                channel(a, a),
                channel(r, r),
                channel(g, g),
                channel(b, b),
            ),
            [r1, r0, g1, g0, b1, b0] => {
                Self::rgb(channel(r1, r0), channel(g1, g0), channel(b1, b0))
            }
            [a1, a0, r1, r0, g1, g0, b1, b0] => Self::argb(
                channel(a1, a0),
                channel(r1, r0),
                channel(g1, g0),
                channel(b1, b0),
            ),
            _ => return Err(ColorParseError::InvalidLength(nibbles.len())),
        };

        Ok(color)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

/// Colors used to paint each [`Category`], plus the canvas colors for
/// unclassified text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Color of object keys
    pub key: Color,
    /// Color of string values
    pub string: Color,
    /// Color of numeric values
    pub number: Color,
    /// Color of `true`/`false`/`null`; falls back to `string` when unset
    pub literal: Option<Color>,
    /// Color of unclassified text when painting the canvas
    pub foreground: Color,
    /// Background color when painting the canvas
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            key: Color::rgb(0x7C, 0xDC, 0xFE),
            string: Color::rgb(0xC3, 0x70, 0x3C),
            number: Color::rgb(0xB5, 0xCE, 0xA8),
            literal: None,
            foreground: Color::rgb(0xFF, 0xFF, 0xFF),
            background: Color::rgb(0x1E, 0x1E, 0x1E),
        }
    }
}

impl Palette {
    /// Returns the color used to paint spans of `category`.
    #[must_use]
    pub fn color_for(&self, category: Category) -> Color {
        match category {
            Category::Key => self.key,
            Category::String => self.string,
            Category::Number => self.number,
            Category::Literal => self.literal.unwrap_or(self.string),
        }
    }

    /// Parses a palette from a JSON object. Missing fields keep their default
    /// colors.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an object of known palette fields
    /// holding valid hex colors.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("parse palette JSON")?;
        if !value.is_object() {
            anyhow::bail!("palette must be a JSON object");
        }
        Self::deserialize(value).context("parse palette JSON")
    }

    /// Loads a palette from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid
    /// palette.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| {
            format!("failed to read palette {}", path.display())
        })?;
        let palette = Self::from_json(&json).with_context(|| {
            format!("invalid palette {}", path.display())
        })?;
        log::debug!("loaded palette from {}", path.display());
        Ok(palette)
    }
}
