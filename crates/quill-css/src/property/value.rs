//! A single `property:value` pair ready for output.

use quill_common::{CssVersion, VersionedObject, warn_once};

use super::registry::Property;
use super::vendor::VendorPrefix;
use crate::decl::{Declaration, Expression, IMPORTANT_SUFFIX};
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// A property name with its raw value text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssValue {
    name: String,
    value: String,
    important: bool,
    min_version: CssVersion,
}

impl CssValue {
    /// A value for `property`. Values that do not match the property's
    /// grammar are kept, but a warning is logged once per distinct value.
    #[must_use]
    pub fn new(property: &Property, value: &str, important: bool) -> Self {
        let value = value.trim();
        if !property.is_valid_value(value) {
            warn_once(
                "CSS",
                &format!("invalid value '{value}' for property '{}'", property.name()),
            );
        }
        Self::with_name(property, property.name(), value, important)
    }

    /// A value written under `name` instead of the property's own name.
    #[must_use]
    pub fn with_name(property: &Property, name: impl Into<String>, value: impl Into<String>, important: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into().trim().to_string(),
            important,
            min_version: property.min_version(),
        }
    }

    /// A value for the vendor prefixed variant of `property`.
    #[must_use]
    pub fn prefixed(property: &Property, vendor: VendorPrefix, value: &str, important: bool) -> Self {
        Self::with_name(property, vendor.apply(property.name()), value, important)
    }

    /// The property name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` for `!important` values.
    #[must_use]
    pub const fn is_important(&self) -> bool {
        self.important
    }

    /// The value as a declaration with a single verbatim term.
    #[must_use]
    pub fn to_declaration(&self) -> Declaration {
        Declaration::new(&self.name, Expression::simple(self.value.clone()), self.important)
    }
}

impl VersionedObject for CssValue {
    fn min_version(&self) -> CssVersion {
        self.min_version
    }
}

impl CssWritable for CssValue {
    fn as_css_string(&self, settings: &WriterSettings, _indent_level: usize) -> Result<String, WriteError> {
        settings.check_version(&format!("property '{}'", self.name), self)?;
        let important = if self.important && !self.value.is_empty() {
            IMPORTANT_SUFFIX
        } else {
            ""
        };
        Ok(format!("{}:{}{important};", self.name, self.value))
    }
}
