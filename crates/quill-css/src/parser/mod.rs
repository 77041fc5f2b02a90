//! CSS grammar parser.
//!
//! Turns the token stream into a [`quill_tree::ParseTree`]. Syntax errors
//! are reported through [`ParserSettings`] and recovered from by skipping
//! to the next statement or block boundary.

/// Parser entry points and shared helpers.
pub mod css_parser;
/// Reported problems and parse failures.
pub mod issue;
/// Parser options and hooks.
pub mod settings;

mod at_rule;
mod selector;
mod value;

pub use css_parser::{CSSParser, ParseOutcome};
pub use issue::{ErrorAction, ParseError, ParseIssue, Severity};
pub use settings::{ErrorHandler, ParserSettings, TraceScope, TraceSink};
