//! [CSS Cascade 5 § 6.4 Cascade layers](https://www.w3.org/TR/css-cascade-5/#layering)

use quill_common::{CssVersion, LocationSlot, VersionedObject};

use super::list::CssList;
use super::rule::{TopLevelRule, write_rule_block};
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// `@layer a, b.c;` or `@layer name { rules }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerRule {
    names: CssList<String>,
    rules: CssList<TopLevelRule>,
    block: bool,
    pub(crate) location: LocationSlot,
}

impl LayerRule {
    /// A statement declaring the given layers.
    #[must_use]
    pub fn statement<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A block rule for `name`, or an anonymous layer.
    #[must_use]
    pub fn block(name: Option<String>) -> Self {
        Self {
            names: name.into_iter().collect(),
            block: true,
            ..Self::default()
        }
    }

    /// The layer names, dotted names kept as written.
    #[must_use]
    pub const fn names(&self) -> &CssList<String> {
        &self.names
    }

    /// Mutable access to the layer names.
    pub const fn names_mut(&mut self) -> &mut CssList<String> {
        &mut self.names
    }

    /// Returns `true` if the rule has a `{ }` body. Adding a rule makes it one.
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.block || self.rules.has_any()
    }

    /// The nested rules.
    #[must_use]
    pub const fn rules(&self) -> &CssList<TopLevelRule> {
        &self.rules
    }

    /// Mutable access to the nested rules.
    pub const fn rules_mut(&mut self) -> &mut CssList<TopLevelRule> {
        &mut self.rules
    }

    /// Append a nested rule.
    pub fn add_rule(&mut self, rule: impl Into<TopLevelRule>) {
        self.rules.add(rule.into());
    }
}

impl VersionedObject for LayerRule {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for LayerRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        settings.check_version("@layer", self)?;
        if !settings.write_layer_rules {
            return Ok(String::new());
        }
        let mut out = String::from("@layer");
        if self.names.has_any() {
            out.push(' ');
            out.push_str(&self.names.join(if settings.optimized_output { "," } else { ", " }));
        }
        if self.is_block() {
            out.push_str(&write_rule_block(&self.rules, settings, indent_level)?);
        } else {
            out.push(';');
            out.push_str(settings.newline());
        }
        Ok(out)
    }
}
