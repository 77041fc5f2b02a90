//! The serialization seam implemented by every domain object.

use super::error::WriteError;
use super::settings::WriterSettings;

/// Something that can be written back as CSS text.
pub trait CssWritable {
    /// Render `self` as CSS.
    ///
    /// `indent_level` is the nesting depth of the enclosing block, used
    /// for indentation in pretty output.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::VersionRequirement`] when `self` uses a
    /// construct newer than `settings.version`.
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError>;

    /// Returns `true` if `self` is followed by `;` inside a block.
    /// Nested blocks end with their own `}`.
    fn needs_terminator(&self) -> bool {
        true
    }
}

impl<T: CssWritable + ?Sized> CssWritable for &T {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        (**self).as_css_string(settings, indent_level)
    }

    fn needs_terminator(&self) -> bool {
        (**self).needs_terminator()
    }
}

impl<T: CssWritable + ?Sized> CssWritable for Box<T> {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        (**self).as_css_string(settings, indent_level)
    }

    fn needs_terminator(&self) -> bool {
        (**self).needs_terminator()
    }
}
