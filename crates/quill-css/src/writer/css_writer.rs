//! Whole-stylesheet output.

use core::fmt;

use super::error::WriteError;
use super::settings::WriterSettings;
use super::writable::CssWritable;
use crate::decl::CascadingStyleSheet;

/// Writes stylesheets and single domain objects as CSS text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssWriter {
    settings: WriterSettings,
}

impl CssWriter {
    /// Create a writer.
    #[must_use]
    pub const fn new(settings: WriterSettings) -> Self {
        Self { settings }
    }

    /// The options in use.
    #[must_use]
    pub const fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    /// Mutable access to the options.
    pub const fn settings_mut(&mut self) -> &mut WriterSettings {
        &mut self.settings
    }

    /// Render `sheet` with the configured header, charset and footer.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::VersionRequirement`] if any rule needs a newer
    /// CSS level than the settings allow.
    pub fn write_stylesheet(&self, sheet: &CascadingStyleSheet) -> Result<String, WriteError> {
        let mut out = String::new();
        self.write_to(sheet, &mut out)?;
        Ok(out)
    }

    /// Render `sheet` into `out`.
    ///
    /// Nothing is written if a rule fails its version check.
    ///
    /// # Errors
    ///
    /// See [`CssWriter::write_stylesheet`]; also fails when `out` does.
    pub fn write_to(&self, sheet: &CascadingStyleSheet, out: &mut impl fmt::Write) -> Result<(), WriteError> {
        let settings = &self.settings;
        let nl = settings.newline();
        let body = sheet.as_css_string(settings, 0)?;

        if let Some(header) = &settings.header_text {
            write_comment(out, header, &settings.newline)?;
        }
        if let Some(charset) = &settings.content_charset {
            write!(out, "@charset \"{charset}\";{nl}")?;
        }
        out.write_str(&body)?;
        if let Some(footer) = &settings.footer_text {
            write_comment(out, footer, &settings.newline)?;
        }
        tracing::debug!(bytes = body.len(), optimized = settings.optimized_output, "wrote stylesheet");
        Ok(())
    }

    /// Render a single domain object at indentation level 0.
    ///
    /// # Errors
    ///
    /// Propagates the object's [`WriteError`].
    pub fn write_object(&self, object: &impl CssWritable) -> Result<String, WriteError> {
        object.as_css_string(&self.settings, 0)
    }
}

/// `/*`, one ` * line` per line of `text`, ` */`. Comments keep their line
/// breaks in optimized output too.
fn write_comment(out: &mut impl fmt::Write, text: &str, nl: &str) -> fmt::Result {
    write!(out, "/*{nl}")?;
    for line in text.lines() {
        write!(out, " * {line}{nl}")?;
    }
    write!(out, " */{nl}")
}
