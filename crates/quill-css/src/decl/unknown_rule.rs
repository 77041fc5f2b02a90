//! At-rules without a dedicated model, kept verbatim.

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use crate::writer::{CssWritable, WriteError, WriterSettings};

/// `@name parameters;` or `@name parameters { body }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRule {
    declaration: String,
    parameter_list: String,
    body: Option<String>,
    pub(crate) location: LocationSlot,
}

impl UnknownRule {
    /// A rule introduced by `declaration`, e.g. `@font-feature-values`.
    #[must_use]
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            parameter_list: String::new(),
            body: None,
            location: LocationSlot::NONE,
        }
    }

    /// The at-keyword as written.
    #[must_use]
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// The text between the keyword and the body.
    #[must_use]
    pub fn parameter_list(&self) -> &str {
        &self.parameter_list
    }

    /// Replace the parameter text.
    pub fn set_parameter_list(&mut self, parameters: impl Into<String>) {
        self.parameter_list = parameters.into().trim().to_string();
    }

    /// The text between the braces, or `None` for a `;` terminated rule.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: Option<String>) {
        self.body = body.map(|b| b.trim().to_string());
    }
}

impl VersionedObject for UnknownRule {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css10
    }
}

impl CssWritable for UnknownRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        if !settings.write_unknown_rules {
            return Ok(String::new());
        }
        let optimized = settings.optimized_output;
        let mut out = self.declaration.clone();
        if !self.parameter_list.is_empty() {
            out.push(' ');
            out.push_str(&self.parameter_list);
        }
        match self.body.as_deref() {
            None => out.push(';'),
            Some("") => out.push_str(if optimized { "{}" } else { " {}" }),
            Some(body) => {
                out.push_str(if optimized { "{" } else { " {" });
                out.push_str(settings.newline());
                out.push_str(&settings.indent(indent_level + 1));
                out.push_str(body);
                out.push_str(settings.newline());
                out.push_str(&settings.indent(indent_level));
                out.push('}');
            }
        }
        out.push_str(settings.newline());
        Ok(out)
    }
}
