//! [CSS Paged Media § 3](https://www.w3.org/TR/css-page-3/#at-page-rule)

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use super::container::{DeclarationContainer, write_block};
use super::declaration::Declaration;
use super::list::CssList;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// A margin box such as `@top-left { declarations }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMarginBlock {
    margin_symbol: String,
    declarations: DeclarationContainer,
    pub(crate) location: LocationSlot,
}

impl PageMarginBlock {
    /// An empty margin box; `margin_symbol` includes the `@`.
    #[must_use]
    pub fn new(margin_symbol: impl Into<String>) -> Self {
        Self {
            margin_symbol: margin_symbol.into(),
            declarations: DeclarationContainer::new(),
            location: LocationSlot::NONE,
        }
    }

    /// The margin symbol, e.g. `@top-left`.
    #[must_use]
    pub fn margin_symbol(&self) -> &str {
        &self.margin_symbol
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
}

impl VersionedObject for PageMarginBlock {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for PageMarginBlock {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        settings.check_version(&self.margin_symbol, self)?;
        if settings.remove_unnecessary_code && !self.declarations.has_declarations() {
            return Ok(String::new());
        }
        Ok(format!(
            "{}{}",
            self.margin_symbol,
            self.declarations.as_css_string(settings, indent_level)?
        ))
    }
}

/// A member of a page rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMember {
    /// A declaration for the page box.
    Declaration(Declaration),
    /// A margin box.
    MarginBlock(PageMarginBlock),
}

impl VersionedObject for PageMember {
    fn min_version(&self) -> CssVersion {
        match self {
            Self::Declaration(declaration) => declaration.min_version(),
            Self::MarginBlock(block) => block.min_version(),
        }
    }
}

impl CssWritable for PageMember {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        match self {
            Self::Declaration(declaration) => declaration.as_css_string(settings, indent_level),
            Self::MarginBlock(block) => block.as_css_string(settings, indent_level),
        }
    }

    fn needs_terminator(&self) -> bool {
        matches!(self, Self::Declaration(_))
    }
}

impl From<Declaration> for PageMember {
    fn from(declaration: Declaration) -> Self {
        Self::Declaration(declaration)
    }
}

impl From<PageMarginBlock> for PageMember {
    fn from(block: PageMarginBlock) -> Self {
        Self::MarginBlock(block)
    }
}

/// `@page :first { declarations and margin boxes }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRule {
    selectors: CssList<String>,
    members: CssList<PageMember>,
    pub(crate) location: LocationSlot,
}

impl PageRule {
    /// An empty rule for all pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule for the given page selectors, e.g. `[":first"]`.
    #[must_use]
    pub fn with_selectors<S: Into<String>>(selectors: impl IntoIterator<Item = S>) -> Self {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// The page selectors.
    #[must_use]
    pub const fn selectors(&self) -> &CssList<String> {
        &self.selectors
    }

    /// Mutable access to the page selectors.
    pub const fn selectors_mut(&mut self) -> &mut CssList<String> {
        &mut self.selectors
    }

    /// The body members.
    #[must_use]
    pub const fn members(&self) -> &CssList<PageMember> {
        &self.members
    }

    /// Mutable access to the body members.
    pub const fn members_mut(&mut self) -> &mut CssList<PageMember> {
        &mut self.members
    }

    /// Append a declaration or margin box.
    pub fn add_member(&mut self, member: impl Into<PageMember>) {
        self.members.add(member.into());
    }
}

impl VersionedObject for PageRule {
    fn min_version(&self) -> CssVersion {
        self.members
            .iter()
            .map(VersionedObject::min_version)
            .max()
            .unwrap_or(CssVersion::Css21)
            .max(CssVersion::Css21)
    }
}

impl CssWritable for PageRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        if !settings.write_page_rules || (settings.remove_unnecessary_code && self.members.is_empty()) {
            return Ok(String::new());
        }
        let mut out = String::from("@page");
        if self.selectors.has_any() {
            out.push(' ');
            out.push_str(&self.selectors.join(if settings.optimized_output { "," } else { ", " }));
        }
        out.push_str(&write_block(&self.members, settings, indent_level)?);
        out.push_str(settings.newline());
        Ok(out)
    }
}
