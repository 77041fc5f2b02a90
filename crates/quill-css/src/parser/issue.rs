//! Problems found while parsing.

use core::fmt;

use quill_common::SourceLocation;
use strum_macros::Display;
use thiserror::Error;

use crate::tokenizer::DecodeError;

/// How serious a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Input was accepted but something was dropped or looked suspicious.
    Warning,
    /// Input did not match the grammar and was skipped.
    Error,
}

/// What the parser should do after reporting an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorAction {
    /// Skip to the next recovery point and keep parsing.
    #[default]
    Continue,
    /// Stop parsing with this issue as the failure.
    Abort,
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Where the offending token starts.
    pub location: SourceLocation,
    /// How serious the problem is.
    pub severity: Severity,
    /// Human readable description.
    pub message: String,
}

impl ParseIssue {
    /// Create an error-level issue.
    #[must_use]
    pub fn error(location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            location,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    #[must_use]
    pub fn warning(location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            location,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Returns `true` for [`Severity::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.location, self.severity, self.message)
    }
}

/// A parse that could not run to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Strict mode without an error handler stopped at the first error.
    #[error("syntax error {0}")]
    Syntax(ParseIssue),
    /// The error handler asked to stop.
    #[error("parse aborted by error handler {0}")]
    Aborted(ParseIssue),
    /// The input could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Why a grammar production stopped early.
///
/// A `Syntax` interrupt is recoverable by the enclosing rule or declaration
/// list; a `Fatal` one unwinds the whole parse.
#[derive(Debug)]
pub(crate) enum Interrupt {
    Syntax(ParseIssue),
    Fatal(ParseError),
}

impl From<ParseError> for Interrupt {
    fn from(error: ParseError) -> Self {
        Self::Fatal(error)
    }
}

/// Result of a single grammar production.
pub(crate) type PResult<T> = Result<T, Interrupt>;
