//! [CSS Animations § 3](https://www.w3.org/TR/css-animations-1/#keyframes)

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use super::container::DeclarationContainer;
use super::declaration::Declaration;
use super::list::CssList;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// One keyframe: `from, 50% { declarations }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyframesBlock {
    selectors: CssList<String>,
    declarations: DeclarationContainer,
    pub(crate) location: LocationSlot,
}

impl KeyframesBlock {
    /// A keyframe for the given selectors, e.g. `["from", "50%"]`.
    #[must_use]
    pub fn new<S: Into<String>>(selectors: impl IntoIterator<Item = S>) -> Self {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations: DeclarationContainer::new(),
            location: LocationSlot::NONE,
        }
    }

    /// The keyframe selectors.
    #[must_use]
    pub const fn selectors(&self) -> &CssList<String> {
        &self.selectors
    }

    /// Mutable access to the keyframe selectors.
    pub const fn selectors_mut(&mut self) -> &mut CssList<String> {
        &mut self.selectors
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

impl CssWritable for KeyframesBlock {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        if settings.remove_unnecessary_code && !self.declarations.has_declarations() {
            return Ok(String::new());
        }
        let separator = if settings.optimized_output { "," } else { ", " };
        let mut out = self.selectors.join(separator);
        out.push_str(&self.declarations.as_css_string(settings, indent_level)?);
        Ok(out)
    }
}

/// `@keyframes name { blocks }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframesRule {
    declaration: String,
    animation_name: String,
    blocks: CssList<KeyframesBlock>,
    pub(crate) location: LocationSlot,
}

impl KeyframesRule {
    /// An empty rule. `declaration` is the at-keyword as written, e.g.
    /// `@-webkit-keyframes`.
    #[must_use]
    pub fn new(declaration: impl Into<String>, animation_name: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            animation_name: animation_name.into(),
            blocks: CssList::new(),
            location: LocationSlot::NONE,
        }
    }

    /// The at-keyword as written.
    #[must_use]
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// The animation name.
    #[must_use]
    pub fn animation_name(&self) -> &str {
        &self.animation_name
    }

    /// The keyframes.
    #[must_use]
    pub const fn blocks(&self) -> &CssList<KeyframesBlock> {
        &self.blocks
    }

    /// Mutable access to the keyframes.
    pub const fn blocks_mut(&mut self) -> &mut CssList<KeyframesBlock> {
        &mut self.blocks
    }

    /// Append a keyframe.
    pub fn add_block(&mut self, block: KeyframesBlock) {
        self.blocks.add(block);
    }
}

impl VersionedObject for KeyframesRule {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for KeyframesRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        settings.check_version("@keyframes", self)?;
        if !settings.write_keyframes_rules || (settings.remove_unnecessary_code && self.blocks.is_empty()) {
            return Ok(String::new());
        }
        let mut out = format!("{} {}", self.declaration, self.animation_name);
        out.push_str(if settings.optimized_output { "{" } else { " {" });
        out.push_str(settings.newline());
        for block in &self.blocks {
            let css = block.as_css_string(settings, indent_level + 1)?;
            if css.is_empty() {
                continue;
            }
            out.push_str(&settings.indent(indent_level + 1));
            out.push_str(&css);
            out.push_str(settings.newline());
        }
        out.push_str(&settings.indent(indent_level));
        out.push('}');
        out.push_str(settings.newline());
        Ok(out)
    }
}
