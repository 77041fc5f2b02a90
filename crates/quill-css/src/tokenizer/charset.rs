//! Charset determination and byte decoding.
//!
//! [§ 3.2 The input byte stream](https://www.w3.org/TR/css-syntax-3/#input-byte-stream)
//! lets a stylesheet name its own encoding with an `@charset "name";` rule at
//! byte offset 0. Only that exact prefix is honoured; anything else falls back
//! to the encoding the caller supplied.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use super::codepoint::MalformedCodepoint;

/// The literal a self-declared encoding must start with.
const CHARSET_PREFIX: &[u8] = b"@charset \"";

/// How many leading bytes are inspected for an `@charset` rule.
const MAX_HEADER: usize = 1024;

/// The UTF-8 byte order mark.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Byte encodings the decoder understands.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Charset {
    /// UTF-8; invalid sequences decode to U+FFFD.
    #[default]
    #[strum(serialize = "UTF-8")]
    Utf8,
    /// 7-bit ASCII; bytes above 0x7F decode to U+FFFD.
    #[strum(serialize = "US-ASCII")]
    UsAscii,
    /// Latin-1; every byte maps to the code point of the same value.
    #[strum(serialize = "ISO-8859-1")]
    Iso88591,
}

impl Charset {
    /// Look up a charset by one of its registered names (case-insensitive).
    ///
    /// `utf-16be` and `utf-16le` resolve to UTF-8: a stylesheet that could
    /// declare them in ASCII bytes cannot actually be UTF-16 encoded.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "unicode-1-1-utf-8" | "utf-16be" | "utf-16le" => Some(Self::Utf8),
            "us-ascii" | "ascii" | "iso646-us" | "ansi_x3.4-1968" => Some(Self::UsAscii),
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "l1" | "windows-1252"
            | "cp1252" => Some(Self::Iso88591),
            _ => None,
        }
    }

    /// Decode `bytes` into text.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { '\u{FFFD}' })
                .collect(),
            Self::Iso88591 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Failure to determine the encoding of a byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharsetError {
    /// `@charset "` without a closing quote in the inspected window.
    #[error("Unexpected end of @charset declaration")]
    UnexpectedEnd,
    /// The declared name is not a supported charset.
    #[error("Unsupported charset '{0}' provided")]
    Unsupported(String),
}

/// Failure to turn raw input into code points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The charset could not be determined.
    #[error(transparent)]
    Charset(#[from] CharsetError),
    /// A UTF-16 surrogate pair was broken.
    #[error(transparent)]
    Malformed(#[from] MalformedCodepoint),
}

/// Strip a leading UTF-8 byte order mark, if present.
#[must_use]
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Determine the charset of `bytes`.
///
/// At most the first 1024 bytes are inspected. When at least 12 bytes are
/// available and they start (ASCII case-insensitively) with `@charset "`, the
/// name up to the closing quote is looked up. Otherwise `fallback` is returned.
///
/// # Errors
///
/// Returns [`CharsetError::UnexpectedEnd`] when the closing quote is missing
/// from the window, and [`CharsetError::Unsupported`] for an unknown name.
pub fn detect_charset(bytes: &[u8], fallback: Charset) -> Result<Charset, CharsetError> {
    let header = &bytes[..bytes.len().min(MAX_HEADER)];
    if header.len() < 12 || !header[..CHARSET_PREFIX.len()].eq_ignore_ascii_case(CHARSET_PREFIX) {
        return Ok(fallback);
    }

    let rest = &header[CHARSET_PREFIX.len()..];
    let Some(end) = rest.iter().position(|&b| b == b'"') else {
        return Err(CharsetError::UnexpectedEnd);
    };

    let name: String = rest[..end].iter().map(|&b| char::from(b)).collect();
    let charset = Charset::from_name(&name).ok_or(CharsetError::Unsupported(name))?;
    tracing::debug!(%charset, "charset declared by @charset rule");
    Ok(charset)
}

/// Strip any BOM, determine the charset and decode `bytes` into text.
///
/// # Errors
///
/// Propagates [`detect_charset`] failures.
pub fn decode_bytes(bytes: &[u8], fallback: Charset) -> Result<String, CharsetError> {
    let bytes = strip_bom(bytes);
    let charset = detect_charset(bytes, fallback)?;
    Ok(charset.decode(bytes))
}
