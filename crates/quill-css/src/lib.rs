//! CSS tokenizer, parser, domain model and writer for the Quill toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Charset handling and tokenization** ([CSS Syntax Level 3 § 3-4](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - `@charset` detection, BOM stripping, fallback charsets
//!   - All token types: ident, function, at-keyword, hash, string, url, number, dimension, etc.
//!
//! - **Grammar parsing** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - A generic [`quill_tree::ParseTree`] for stylesheets and declaration lists
//!   - Recoverable errors reported through an injected error handler
//!
//! - **Conversion** into a typed domain model
//!   - Style rules, selectors, declarations, value and `calc()` expressions
//!   - `@import`, `@namespace`, `@media`, `@page`, `@font-face`, `@keyframes`,
//!     `@viewport`, `@supports`, `@layer` and unknown at-rules
//!
//! - **Serialization** back to CSS text, pretty or optimized, checked against
//!   a target CSS level
//!
//! - **Media queries**, **property validation**, shorthand splitting and
//!   vendor-prefixed value expansion
//!
//! # Example
//!
//! ```
//! use quill_css::{CssReader, CssWriter, ReaderSettings, WriterSettings};
//!
//! let reader = CssReader::new(ReaderSettings::default());
//! let parsed = reader.read_from_string("h1 { color: red }").unwrap();
//! assert_eq!(parsed.value.style_rules().count(), 1);
//!
//! let writer = CssWriter::new(WriterSettings::default().with_optimized_output(true));
//! assert_eq!(writer.write_stylesheet(&parsed.value).unwrap(), "h1{color:red}");
//! ```

/// The domain model.
pub mod decl;
/// Parse tree to domain model conversion.
pub mod handler;
/// Media types, media features and media lists.
pub mod media;
/// CSS grammar parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Known properties: value grammars, customizers, shorthands, units and vendor prefixes.
pub mod property;
/// The decode, parse and convert pipeline in one call.
pub mod reader;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Number, color, string and URL helpers.
pub mod utils;
/// Serialization back to CSS text.
pub mod writer;

// Re-exports for convenience
pub use decl::{CascadingStyleSheet, Declaration, DeclarationList, Expression, Selector, StyleRule, TopLevelRule};
pub use handler::{ConvertError, ConverterSettings, CssConverter};
pub use media::{MediaList, Medium};
pub use parser::{CSSParser, ErrorAction, ParseError, ParseIssue, ParserSettings};
pub use quill_common::CssVersion;
pub use reader::{CssReader, Parsed, ReadError, ReaderSettings};
pub use tokenizer::{CSSToken, CSSTokenizer, Charset};
pub use writer::{CssWritable, CssWriter, WriteError, WriterSettings};
