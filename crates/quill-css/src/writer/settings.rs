//! Serialization options.

use quill_common::{CssVersion, VersionedObject};
use serde::{Deserialize, Serialize};

use super::error::WriteError;

/// How a domain object is turned back into CSS text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct WriterSettings {
    /// The CSS level the output must be valid for.
    pub version: CssVersion,
    /// Drop newlines, indentation and optional separators.
    pub optimized_output: bool,
    /// Drop rules that would have no effect, such as empty style rules.
    pub remove_unnecessary_code: bool,
    /// Line separator in pretty output.
    pub newline: String,
    /// One level of indentation in pretty output.
    pub indent: String,
    /// Always quote `url(...)` contents.
    pub quote_urls: bool,
    /// Emit `@namespace` rules.
    pub write_namespace_rules: bool,
    /// Emit `@font-face` rules.
    pub write_font_face_rules: bool,
    /// Emit `@keyframes` rules.
    pub write_keyframes_rules: bool,
    /// Emit `@media` rules.
    pub write_media_rules: bool,
    /// Emit `@page` rules.
    pub write_page_rules: bool,
    /// Emit `@viewport` rules.
    pub write_viewport_rules: bool,
    /// Emit `@supports` rules.
    pub write_supports_rules: bool,
    /// Emit `@layer` rules.
    pub write_layer_rules: bool,
    /// Emit unrecognized at-rules.
    pub write_unknown_rules: bool,
    /// Charset named in a leading `@charset` rule, if any.
    pub content_charset: Option<String>,
    /// Text of a comment written before everything else.
    pub header_text: Option<String>,
    /// Text of a comment written after everything else.
    pub footer_text: Option<String>,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            version: CssVersion::LATEST,
            optimized_output: false,
            remove_unnecessary_code: false,
            newline: "\n".to_string(),
            indent: "  ".to_string(),
            quote_urls: false,
            write_namespace_rules: true,
            write_font_face_rules: true,
            write_keyframes_rules: true,
            write_media_rules: true,
            write_page_rules: true,
            write_viewport_rules: true,
            write_supports_rules: true,
            write_layer_rules: true,
            write_unknown_rules: true,
            content_charset: None,
            header_text: None,
            footer_text: None,
        }
    }
}

impl WriterSettings {
    /// Default settings for `version`.
    #[must_use]
    pub fn new(version: CssVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Settings for the most compact output: optimized, with empty rules removed.
    #[must_use]
    pub fn optimized(version: CssVersion) -> Self {
        Self::new(version)
            .with_optimized_output(true)
            .with_remove_unnecessary_code(true)
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

    /// Set optimized output.
    #[must_use]
    pub const fn with_optimized_output(mut self, enabled: bool) -> Self {
        self.optimized_output = enabled;
        self
    }

    /// Set removal of unnecessary code.
    #[must_use]
    pub const fn with_remove_unnecessary_code(mut self, enabled: bool) -> Self {
        self.remove_unnecessary_code = enabled;
        self
    }

    /// Set the line separator.
    #[must_use]
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Set one level of indentation.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set URL quoting.
    #[must_use]
    pub const fn with_quote_urls(mut self, enabled: bool) -> Self {
        self.quote_urls = enabled;
        self
    }

    /// Emit or suppress `@namespace` rules.
    #[must_use]
    pub const fn with_write_namespace_rules(mut self, enabled: bool) -> Self {
        self.write_namespace_rules = enabled;
        self
    }

    /// Emit or suppress `@font-face` rules.
    #[must_use]
    pub const fn with_write_font_face_rules(mut self, enabled: bool) -> Self {
        self.write_font_face_rules = enabled;
        self
    }

    /// Emit or suppress `@keyframes` rules.
    #[must_use]
    pub const fn with_write_keyframes_rules(mut self, enabled: bool) -> Self {
        self.write_keyframes_rules = enabled;
        self
    }

    /// Emit or suppress `@media` rules.
    #[must_use]
    pub const fn with_write_media_rules(mut self, enabled: bool) -> Self {
        self.write_media_rules = enabled;
        self
    }

    /// Emit or suppress `@page` rules.
    #[must_use]
    pub const fn with_write_page_rules(mut self, enabled: bool) -> Self {
        self.write_page_rules = enabled;
        self
    }

    /// Emit or suppress `@viewport` rules.
    #[must_use]
    pub const fn with_write_viewport_rules(mut self, enabled: bool) -> Self {
        self.write_viewport_rules = enabled;
        self
    }

    /// Emit or suppress `@supports` rules.
    #[must_use]
    pub const fn with_write_supports_rules(mut self, enabled: bool) -> Self {
        self.write_supports_rules = enabled;
        self
    }

    /// Emit or suppress `@layer` rules.
    #[must_use]
    pub const fn with_write_layer_rules(mut self, enabled: bool) -> Self {
        self.write_layer_rules = enabled;
        self
    }

    /// Emit or suppress unrecognized at-rules.
    #[must_use]
    pub const fn with_write_unknown_rules(mut self, enabled: bool) -> Self {
        self.write_unknown_rules = enabled;
        self
    }

    /// Emit `@charset "name";` first.
    #[must_use]
    pub fn with_content_charset(mut self, charset: impl Into<String>) -> Self {
        self.content_charset = Some(charset.into());
        self
    }

    /// Emit a header comment.
    #[must_use]
    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = Some(text.into());
        self
    }

    /// Emit a footer comment.
    #[must_use]
    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = Some(text.into());
        self
    }

    /// The line separator, or nothing in optimized mode.
    #[must_use]
    pub fn newline(&self) -> &str {
        if self.optimized_output { "" } else { &self.newline }
    }

    /// `level` levels of indentation, or nothing in optimized mode.
    #[must_use]
    pub fn indent(&self, level: usize) -> String {
        if self.optimized_output {
            String::new()
        } else {
            self.indent.repeat(level)
        }
    }

    /// Fail unless `object` can be written at the target level.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::VersionRequirement`] naming `construct`.
    pub fn check_version(&self, construct: &str, object: &impl VersionedObject) -> Result<(), WriteError> {
        let required = object.min_version();
        if self.version.satisfies(required) {
            Ok(())
        } else {
            Err(WriteError::VersionRequirement {
                construct: construct.to_string(),
                required,
                requested: self.version,
            })
        }
    }
}
