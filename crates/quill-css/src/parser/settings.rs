//! Parser configuration.

use core::fmt;

use quill_common::CssVersion;

use super::issue::{ErrorAction, ParseIssue};

/// Receives every reported issue, in document order, and decides whether
/// parsing continues.
pub type ErrorHandler = Box<dyn FnMut(&ParseIssue) -> ErrorAction>;

/// Which side of a grammar production a trace event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceScope {
    /// The production was entered.
    Open,
    /// The production returned, successfully or not.
    Close,
}

/// Receives scope events for the main grammar productions together with
/// the nesting depth. Purely diagnostic.
pub type TraceSink = Box<dyn FnMut(TraceScope, &'static str, usize)>;

/// Options for a single parse.
pub struct ParserSettings {
    /// The CSS level whose grammar is applied.
    pub version: CssVersion,
    /// Accept constructs browsers tolerate even though the targeted level
    /// forbids them, e.g. `@media` nesting or CSS 3 at-rules in CSS 2.1.
    pub browser_compliant_mode: bool,
    /// Keep `*prop` and `_prop` hacks instead of dropping them.
    pub keep_deprecated_properties: bool,
    /// Without an error handler, stop at the first error instead of
    /// recovering.
    pub strict: bool,
    /// Custom error handler.
    pub error_handler: Option<ErrorHandler>,
    /// Custom trace sink.
    pub trace: Option<TraceSink>,
}

impl ParserSettings {
    /// Settings for `version` with everything else at its default.
    #[must_use]
    pub fn new(version: CssVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Set browser compliant mode.
    #[must_use]
    pub const fn with_browser_compliant_mode(mut self, enabled: bool) -> Self {
        self.browser_compliant_mode = enabled;
        self
    }

    /// Keep or drop deprecated property hacks.
    #[must_use]
    pub const fn with_keep_deprecated_properties(mut self, enabled: bool) -> Self {
        self.keep_deprecated_properties = enabled;
        self
    }

    /// Set strict mode.
    #[must_use]
    pub const fn with_strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Install an error handler.
    #[must_use]
    pub fn with_error_handler(
        mut self,
        handler: impl FnMut(&ParseIssue) -> ErrorAction + 'static,
    ) -> Self {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// Install a trace sink.
    #[must_use]
    pub fn with_trace(mut self, sink: impl FnMut(TraceScope, &'static str, usize) + 'static) -> Self {
        self.trace = Some(Box::new(sink));
        self
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            version: CssVersion::LATEST,
            browser_compliant_mode: false,
            keep_deprecated_properties: false,
            strict: false,
            error_handler: None,
            trace: None,
        }
    }
}

impl fmt::Debug for ParserSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserSettings")
            .field("version", &self.version)
            .field("browser_compliant_mode", &self.browser_compliant_mode)
            .field("keep_deprecated_properties", &self.keep_deprecated_properties)
            .field("strict", &self.strict)
            .field("error_handler", &self.error_handler.is_some())
            .field("trace", &self.trace.is_some())
            .finish()
    }
}
