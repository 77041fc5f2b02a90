//! Converter options.

use serde::{Deserialize, Serialize};

/// Receives non-fatal interpretation problems, such as an unknown medium.
pub type InterpretErrorHook = Box<dyn FnMut(&str)>;

/// Options for converting a parse tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Copy node source areas onto the domain objects.
    pub use_source_location: bool,
    /// Fail on nodes without a domain mapping instead of skipping them.
    pub strict: bool,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            use_source_location: true,
            strict: false,
        }
    }
}

impl ConverterSettings {
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

/// The hook used when none is installed.
#[must_use]
pub fn default_interpret_error_hook() -> InterpretErrorHook {
    Box::new(|message| tracing::warn!(target: "quill_css::handler", "{message}"))
}
