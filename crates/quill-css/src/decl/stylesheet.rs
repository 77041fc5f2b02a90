//! The root of the domain model.

use quill_common::{CssVersion, VersionedObject};

use super::block_rule::{FontFaceRule, ViewportRule};
use super::import_rule::{ImportRule, NamespaceRule};
use super::keyframes_rule::KeyframesRule;
use super::layer_rule::LayerRule;
use super::list::CssList;
use super::media_rule::MediaRule;
use super::page_rule::PageRule;
use super::rule::TopLevelRule;
use super::style_rule::StyleRule;
use super::supports_rule::SupportsRule;
use super::unknown_rule::UnknownRule;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// A complete stylesheet.
///
/// `@import` and `@namespace` rules live in their own lists because they
/// must precede every other rule in the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadingStyleSheet {
    import_rules: CssList<ImportRule>,
    namespace_rules: CssList<NamespaceRule>,
    rules: CssList<TopLevelRule>,
}

/// A typed view over the top-level rules of one variant.
macro_rules! rules_of_kind {
    ($($(#[$doc:meta])* $name:ident => $variant:ident($ty:ty);)+) => {$(
        $(#[$doc])*
        pub fn $name(&self) -> impl Iterator<Item = &$ty> {
            self.rules.iter().filter_map(|rule| match rule {
                TopLevelRule::$variant(inner) => Some(inner),
                _ => None,
            })
        }
    )+};
}

impl CascadingStyleSheet {
    /// An empty stylesheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The `@import` rules.
    #[must_use]
    pub const fn import_rules(&self) -> &CssList<ImportRule> {
        &self.import_rules
    }

    /// Mutable access to the `@import` rules.
    pub const fn import_rules_mut(&mut self) -> &mut CssList<ImportRule> {
        &mut self.import_rules
    }

    /// Append an `@import` rule.
    pub fn add_import_rule(&mut self, rule: ImportRule) {
        self.import_rules.add(rule);
    }

    /// The `@namespace` rules.
    #[must_use]
    pub const fn namespace_rules(&self) -> &CssList<NamespaceRule> {
        &self.namespace_rules
    }

    /// Mutable access to the `@namespace` rules.
    pub const fn namespace_rules_mut(&mut self) -> &mut CssList<NamespaceRule> {
        &mut self.namespace_rules
    }

    /// Append an `@namespace` rule.
    pub fn add_namespace_rule(&mut self, rule: NamespaceRule) {
        self.namespace_rules.add(rule);
    }

    /// Every other rule, in source order.
    #[must_use]
    pub const fn rules(&self) -> &CssList<TopLevelRule> {
        &self.rules
    }

    /// Mutable access to the top-level rules.
    pub const fn rules_mut(&mut self) -> &mut CssList<TopLevelRule> {
        &mut self.rules
    }

    /// Append a top-level rule.
    pub fn add_rule(&mut self, rule: impl Into<TopLevelRule>) {
        self.rules.add(rule.into());
    }

    /// Returns `true` if the stylesheet contains any rule at all.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        self.import_rules.has_any() || self.namespace_rules.has_any() || self.rules.has_any()
    }

    rules_of_kind! {
        /// Top-level style rules.
        style_rules => Style(StyleRule);
        /// Top-level `@media` rules.
        media_rules => Media(MediaRule);
        /// Top-level `@page` rules.
        page_rules => Page(PageRule);
        /// Top-level `@font-face` rules.
        font_face_rules => FontFace(FontFaceRule);
        /// Top-level `@keyframes` rules.
        keyframes_rules => Keyframes(KeyframesRule);
        /// Top-level `@viewport` rules.
        viewport_rules => Viewport(ViewportRule);
        /// Top-level `@supports` rules.
        supports_rules => Supports(SupportsRule);
        /// Top-level `@layer` rules.
        layer_rules => Layer(LayerRule);
        /// Top-level at-rules without a dedicated model.
        unknown_rules => Unknown(UnknownRule);
    }

    /// Every style rule, including those nested in `@media`, `@supports`
    /// and `@layer` blocks, depth first.
    #[must_use]
    pub fn all_style_rules(&self) -> Vec<&StyleRule> {
        fn collect<'a>(rules: &'a [TopLevelRule], out: &mut Vec<&'a StyleRule>) {
            for rule in rules {
                match rule {
                    TopLevelRule::Style(style) => out.push(style),
                    other => {
                        if let Some(nested) = other.nested_rules() {
                            collect(nested, out);
                        }
                    }
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.rules, &mut out);
        out
    }
}

impl VersionedObject for CascadingStyleSheet {
    fn min_version(&self) -> CssVersion {
        self.import_rules
            .iter()
            .map(VersionedObject::min_version)
            .chain(self.namespace_rules.iter().map(VersionedObject::min_version))
            .chain(self.rules.iter().map(VersionedObject::min_version))
            .max()
            .unwrap_or(CssVersion::Css10)
    }
}

impl CssWritable for CascadingStyleSheet {
    /// Imports, namespaces, then the remaining rules. Rules are separated
    /// by an empty line in pretty output; rules rendering to nothing are
    /// skipped.
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        let mut out = String::new();
        let mut emitted = 0usize;
        for rule in &self.import_rules {
            out.push_str(&rule.as_css_string(settings, indent_level)?);
            emitted += 1;
        }
        for rule in &self.namespace_rules {
            out.push_str(&rule.as_css_string(settings, indent_level)?);
            emitted += 1;
        }
        for rule in &self.rules {
            let css = rule.as_css_string(settings, indent_level)?;
            if css.is_empty() {
                continue;
            }
            if emitted > 0 {
                out.push_str(settings.newline());
            }
            out.push_str(&css);
            emitted += 1;
        }
        Ok(out)
    }
}
