//! UTF-16 code unit decoding with line/column tracking.
//!
//! [§ 3.3 Preprocessing the input stream](https://www.w3.org/TR/css-syntax-3/#input-preprocessing)
//! is applied on the fly: CR LF, CR and FF become LF, and NUL becomes U+FFFD.

use quill_common::SourceLocation;
use thiserror::Error;

/// A code unit sequence that does not form a code point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed Codepoint sequence - invalid low surrogate at {location}")]
pub struct MalformedCodepoint {
    /// Where the offending high surrogate was read.
    pub location: SourceLocation,
}

/// Reads code points from a stream of UTF-16 code units.
///
/// Keeps a 1-based line and column: the column advances once per code point,
/// a `\n` moves to the next line and resets the column to 1.
pub struct CodepointReader<I: Iterator<Item = u16>> {
    units: I,
    /// One code unit read ahead (CR lookahead, surrogate checks).
    pending: Option<u16>,
    line: usize,
    column: usize,
}

impl<I: Iterator<Item = u16>> CodepointReader<I> {
    /// Create a reader over `units`.
    pub fn new(units: impl IntoIterator<Item = u16, IntoIter = I>) -> Self {
        Self {
            units: units.into_iter(),
            pending: None,
            line: 1,
            column: 1,
        }
    }

    /// The position of the next code point to be read.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn next_unit(&mut self) -> Option<u16> {
        self.pending.take().or_else(|| self.units.next())
    }

    /// Read the next preprocessed code point; `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedCodepoint`] if a high surrogate is not followed by a low surrogate.
    pub fn read(&mut self) -> Result<Option<char>, MalformedCodepoint> {
        let Some(unit) = self.next_unit() else {
            return Ok(None);
        };

        let c = if (0xD800..0xDC00).contains(&unit) {
            let low = self.next_unit();
            match low {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let value = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    char::from_u32(value).unwrap_or('\u{FFFD}')
                }
                _ => {
                    return Err(MalformedCodepoint {
                        location: self.location(),
                    });
                }
            }
        } else {
            match unit {
                0x0D => {
                    // CR LF collapses into a single LF
                    match self.next_unit() {
                        Some(0x0A) | None => {}
                        Some(other) => self.pending = Some(other),
                    }
                    '\n'
                }
                0x0C => '\n',
                0x00 => '\u{FFFD}',
                // A lone low surrogate cannot be represented; replace it
                _ => char::from_u32(u32::from(unit)).unwrap_or('\u{FFFD}'),
            }
        };

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Ok(Some(c))
    }
}

impl<'a> CodepointReader<std::str::EncodeUtf16<'a>> {
    /// Create a reader over the UTF-16 encoding of `text`.
    #[must_use]
    pub fn for_text(text: &'a str) -> Self {
        Self::new(text.encode_utf16())
    }
}
