//! CSS tokenizer module.
//!
//! Bytes become text in [`charset`], text becomes code points with source
//! positions in [`codepoint`], and code points become tokens in [`tokenizer`],
//! which dispatches on the [`start_type`] classification of each token's
//! first code point.

/// Charset detection and byte decoding per [§ 3.2](https://www.w3.org/TR/css-syntax-3/#input-byte-stream).
pub mod charset;
/// UTF-16 code unit decoding and input preprocessing per [§ 3.3](https://www.w3.org/TR/css-syntax-3/#input-preprocessing).
pub mod codepoint;
/// First-character classification.
pub mod start_type;
/// CSS token types per [CSS Syntax Level 3 § 4](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod token;
/// CSS tokenizer implementation.
pub mod tokenizer;

pub use charset::{Charset, CharsetError, DecodeError, decode_bytes, detect_charset, strip_bom};
pub use codepoint::{CodepointReader, MalformedCodepoint};
pub use start_type::TokenStartType;
pub use token::{CSSToken, HashType, NumericType, Token};
pub use tokenizer::CSSTokenizer;
