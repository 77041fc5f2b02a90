//! [CSS 2.1 § 4.1.7 Rule sets](https://www.w3.org/TR/CSS21/syndata.html#rule-sets)

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use super::container::DeclarationContainer;
use super::declaration::Declaration;
use super::list::CssList;
use super::selector::Selector;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// `selectors { declarations }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRule {
    selectors: CssList<Selector>,
    declarations: DeclarationContainer,
    pub(crate) location: LocationSlot,
}

impl StyleRule {
    /// A rule without selectors or declarations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selectors.
    #[must_use]
    pub const fn selectors(&self) -> &CssList<Selector> {
        &self.selectors
    }

    /// Mutable access to the selectors.
    pub const fn selectors_mut(&mut self) -> &mut CssList<Selector> {
        &mut self.selectors
    }

    /// Append a selector.
    pub fn add_selector(&mut self, selector: Selector) {
        self.selectors.add(selector);
    }

    /// The declarations.
    #[must_use]
    pub const fn declarations(&self) -> &DeclarationContainer {
        &self.declarations
    }

    /// Mutable access to the declarations.
    pub const fn declarations_mut(&mut self) -> &mut DeclarationContainer {
        &mut self.declarations
    }

    /// Append a declaration.
    pub fn add_declaration(&mut self, declaration: Declaration) {
        self.declarations.add(declaration);
    }

    /// Returns `true` if there is at least one declaration.
    #[must_use]
    pub fn has_declarations(&self) -> bool {
        self.declarations.has_declarations()
    }

    /// The selectors separated by `,`. Pretty output puts each one on its
    /// own line.
    ///
    /// # Errors
    ///
    /// Fails if a selector needs a newer CSS level than requested.
    pub fn selectors_as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        let separator = if settings.optimized_output {
            ",".to_string()
        } else {
            format!(",{}{}", settings.newline(), settings.indent(indent_level))
        };
        let selectors = self
            .selectors
            .iter()
            .map(|selector| selector.as_css_string(settings, indent_level))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(selectors.join(&separator))
    }
}

impl VersionedObject for StyleRule {
    fn min_version(&self) -> CssVersion {
        self.selectors
            .iter()
            .map(VersionedObject::min_version)
            .chain(core::iter::once(self.declarations.min_version()))
            .max()
            .unwrap_or(CssVersion::Css10)
    }
}

impl CssWritable for StyleRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        if settings.remove_unnecessary_code && !self.has_declarations() {
            return Ok(String::new());
        }
        let mut out = self.selectors_as_css_string(settings, indent_level)?;
        out.push_str(&self.declarations.as_css_string(settings, indent_level)?);
        out.push_str(settings.newline());
        Ok(out)
    }
}
