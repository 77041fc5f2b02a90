//! A single `property: value` pair.

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use super::expression::Expression;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// The suffix marking an important declaration.
pub const IMPORTANT_SUFFIX: &str = " !important";

/// `property: expression !important`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    property: String,
    expression: Expression,
    important: bool,
    pub(crate) location: LocationSlot,
}

impl Declaration {
    /// Create a declaration. The property name is trimmed and lowercased,
    /// except for custom properties (`--name`), which are case-sensitive.
    #[must_use]
    pub fn new(property: impl AsRef<str>, expression: Expression, important: bool) -> Self {
        Self {
            property: normalize_property(property.as_ref()),
            expression,
            important,
            location: LocationSlot::NONE,
        }
    }

    /// The property name.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Rename the property.
    pub fn set_property(&mut self, property: impl AsRef<str>) {
        self.property = normalize_property(property.as_ref());
    }

    /// Returns `true` for a `--custom` property.
    #[must_use]
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with("--")
    }

    /// Returns `true` if the property is `name`, ignoring ASCII case.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        if self.is_custom_property() {
            self.property == name.trim()
        } else {
            self.property.eq_ignore_ascii_case(name.trim())
        }
    }

    /// The value.
    #[must_use]
    pub const fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Mutable access to the value.
    pub const fn expression_mut(&mut self) -> &mut Expression {
        &mut self.expression
    }

    /// Replace the value.
    pub fn set_expression(&mut self, expression: Expression) {
        self.expression = expression;
    }

    /// Returns `true` for `!important`.
    #[must_use]
    pub const fn is_important(&self) -> bool {
        self.important
    }

    /// Set or clear `!important`.
    pub const fn set_important(&mut self, important: bool) {
        self.important = important;
    }
}

fn normalize_property(property: &str) -> String {
    let property = property.trim();
    if property.starts_with("--") {
        property.to_string()
    } else {
        property.to_ascii_lowercase()
    }
}

impl VersionedObject for Declaration {
    fn min_version(&self) -> CssVersion {
        if self.is_custom_property() {
            CssVersion::Css30
        } else {
            self.expression.min_version()
        }
    }
}

impl CssWritable for Declaration {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        if self.is_custom_property() {
            settings.check_version("custom property", self)?;
        }
        let mut out = format!("{}:{}", self.property, self.expression.as_css_string(settings, indent_level)?);
        if self.important {
            out.push_str(IMPORTANT_SUFFIX);
        }
        Ok(out)
    }
}
