//! One-call reading: decode, tokenize, parse and convert.
//!
//! [`CssReader`] wires the pipeline together from a single [`ReaderSettings`]
//! value. Hooks installed on the reader are shared by every read it performs.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use quill_common::CssVersion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decl::{CascadingStyleSheet, DeclarationList};
use crate::handler::{ConvertError, ConverterSettings, CssConverter};
use crate::parser::{CSSParser, ErrorAction, ParseError, ParseIssue, ParserSettings, TraceScope};
use crate::tokenizer::{Charset, DecodeError, decode_bytes};

/// Options for every stage of a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReaderSettings {
    /// The CSS level whose grammar is applied.
    pub version: CssVersion,
    /// Charset for byte input without a BOM or leading `@charset` rule.
    pub fallback_charset: Charset,
    /// Accept constructs browsers tolerate beyond the targeted level.
    pub browser_compliant_mode: bool,
    /// Keep `*prop` and `_prop` hacks.
    pub keep_deprecated_properties: bool,
    /// Copy source locations onto the domain objects.
    pub use_source_location: bool,
    /// Stop at the first syntax error and at unmappable parse nodes.
    pub strict: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            version: CssVersion::LATEST,
            fallback_charset: Charset::Utf8,
            browser_compliant_mode: false,
            keep_deprecated_properties: false,
            use_source_location: true,
            strict: false,
        }
    }
}

impl ReaderSettings {
    /// Default settings for `version`.
    #[must_use]
    pub fn new(version: CssVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Load settings from JSON; absent fields keep their default.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input or for JSON
    /// that is not an object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("settings must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Set the target CSS level.
    #[must_use]
    pub const fn with_version(mut self, version: CssVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the fallback charset.
    #[must_use]
    pub const fn with_fallback_charset(mut self, charset: Charset) -> Self {
        self.fallback_charset = charset;
        self
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

    /// Set source location copying.
    #[must_use]
    pub const fn with_use_source_location(mut self, enabled: bool) -> Self {
        self.use_source_location = enabled;
        self
    }

    /// Set strict mode.
    #[must_use]
    pub const fn with_strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }
}

/// A read that could not produce a domain object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// The input bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Parsing stopped.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parse tree could not be converted.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A domain object together with the issues recovered from while parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    /// The converted object, possibly missing the parts that were skipped.
    pub value: T,
    /// Every issue reported by the parser, in document order.
    pub issues: Vec<ParseIssue>,
}

impl<T> Parsed<T> {
    /// Returns `true` if an error-level issue was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ParseIssue::is_error)
    }
}

type SharedErrorHandler = Rc<RefCell<dyn FnMut(&ParseIssue) -> ErrorAction>>;
type SharedInterpretHook = Rc<RefCell<dyn FnMut(&str)>>;
type SharedTraceSink = Rc<RefCell<dyn FnMut(TraceScope, &'static str, usize)>>;

/// Reads stylesheets and declaration lists.
#[derive(Default)]
pub struct CssReader {
    settings: ReaderSettings,
    error_handler: Option<SharedErrorHandler>,
    interpret_error_hook: Option<SharedInterpretHook>,
    trace: Option<SharedTraceSink>,
}

impl CssReader {
    /// Create a reader without hooks.
    #[must_use]
    pub fn new(settings: ReaderSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Install a parser error handler.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl FnMut(&ParseIssue) -> ErrorAction + 'static) -> Self {
        self.error_handler = Some(Rc::new(RefCell::new(handler)));
        self
    }

    /// Install a converter interpret-error hook.
    #[must_use]
    pub fn with_interpret_error_hook(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.interpret_error_hook = Some(Rc::new(RefCell::new(hook)));
        self
    }

    /// Install a parser trace sink.
    #[must_use]
    pub fn with_trace(mut self, sink: impl FnMut(TraceScope, &'static str, usize) + 'static) -> Self {
        self.trace = Some(Rc::new(RefCell::new(sink)));
        self
    }

    /// The options in use.
    #[must_use]
    pub const fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Read a stylesheet from text.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Parse`] when parsing stops and
    /// [`ReadError::Convert`] when conversion fails.
    pub fn read_from_string(&self, css: &str) -> Result<Parsed<CascadingStyleSheet>, ReadError> {
        self.read_stylesheet(CSSParser::from_text(css, self.parser_settings()))
    }

    /// Read a stylesheet from bytes, honouring a BOM or leading `@charset`
    /// rule and using the fallback charset otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Decode`] for an unsupported or unterminated
    /// `@charset`, otherwise as [`CssReader::read_from_string`].
    pub fn read_from_bytes(&self, bytes: &[u8]) -> Result<Parsed<CascadingStyleSheet>, ReadError> {
        let text = decode_bytes(bytes, self.settings.fallback_charset).map_err(DecodeError::from)?;
        self.read_from_string(&text)
    }

    /// Read a stylesheet from UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Decode`] for a broken surrogate pair, otherwise
    /// as [`CssReader::read_from_string`].
    pub fn read_from_utf16(&self, units: &[u16]) -> Result<Parsed<CascadingStyleSheet>, ReadError> {
        let parser = CSSParser::from_utf16(units, self.parser_settings()).map_err(|error| match error {
            ParseError::Decode(decode) => ReadError::Decode(decode),
            other => ReadError::Parse(other),
        })?;
        self.read_stylesheet(parser)
    }

    /// Read the content of a `style` attribute.
    ///
    /// # Errors
    ///
    /// As [`CssReader::read_from_string`].
    pub fn read_declaration_list(&self, css: &str) -> Result<Parsed<DeclarationList>, ReadError> {
        let outcome = CSSParser::from_text(css, self.parser_settings()).parse_declaration_list()?;
        let value = self
            .converter()
            .convert_declaration_list(&outcome.tree, self.settings.version)?;
        Ok(Parsed {
            value,
            issues: outcome.issues,
        })
    }

    /// Returns `true` if `css` parses without any error-level issue.
    ///
    /// Installed hooks are not invoked.
    #[must_use]
    pub fn is_valid_css(&self, css: &str) -> bool {
        let settings = ParserSettings::new(self.settings.version)
            .with_browser_compliant_mode(self.settings.browser_compliant_mode)
            .with_keep_deprecated_properties(self.settings.keep_deprecated_properties)
            .with_strict(true);
        CSSParser::from_text(css, settings)
            .parse_stylesheet()
            .is_ok_and(|outcome| !outcome.issues.iter().any(ParseIssue::is_error))
    }

    fn read_stylesheet(&self, parser: CSSParser) -> Result<Parsed<CascadingStyleSheet>, ReadError> {
        let outcome = parser.parse_stylesheet()?;
        let value = self.converter().convert_stylesheet(&outcome.tree, self.settings.version)?;
        if !outcome.issues.is_empty() {
            tracing::debug!(issues = outcome.issues.len(), "stylesheet read with recovered issues");
        }
        Ok(Parsed {
            value,
            issues: outcome.issues,
        })
    }

    fn parser_settings(&self) -> ParserSettings {
        let mut settings = ParserSettings::new(self.settings.version)
            .with_browser_compliant_mode(self.settings.browser_compliant_mode)
            .with_keep_deprecated_properties(self.settings.keep_deprecated_properties)
            .with_strict(self.settings.strict);
        if let Some(handler) = &self.error_handler {
            let handler = Rc::clone(handler);
            settings = settings.with_error_handler(move |issue| (*handler.borrow_mut())(issue));
        }
        if let Some(trace) = &self.trace {
            let trace = Rc::clone(trace);
            settings = settings.with_trace(move |scope, name, depth| (*trace.borrow_mut())(scope, name, depth));
        }
        settings
    }

    fn converter(&self) -> CssConverter {
        let settings = ConverterSettings::default()
            .with_use_source_location(self.settings.use_source_location)
            .with_strict(self.settings.strict);
        let converter = CssConverter::new(settings);
        match &self.interpret_error_hook {
            Some(hook) => {
                let hook = Rc::clone(hook);
                converter.with_interpret_error_hook(move |message| (*hook.borrow_mut())(message))
            }
            None => converter,
        }
    }
}

impl fmt::Debug for CssReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssReader")
            .field("settings", &self.settings)
            .field("error_handler", &self.error_handler.is_some())
            .field("interpret_error_hook", &self.interpret_error_hook.is_some())
            .field("trace", &self.trace.is_some())
            .finish()
    }
}
