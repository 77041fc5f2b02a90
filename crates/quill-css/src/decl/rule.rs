//! The rules that may appear at the top level of a stylesheet or nested
//! inside a conditional group rule.

use quill_common::{CssVersion, VersionedObject};

use super::block_rule::{FontFaceRule, ViewportRule};
use super::keyframes_rule::KeyframesRule;
use super::layer_rule::LayerRule;
use super::media_rule::MediaRule;
use super::page_rule::PageRule;
use super::style_rule::StyleRule;
use super::supports_rule::SupportsRule;
use super::unknown_rule::UnknownRule;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// A rule other than `@import` and `@namespace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevelRule {
    /// `selectors { declarations }`
    Style(StyleRule),
    /// `@media`
    Media(MediaRule),
    /// `@page`
    Page(PageRule),
    /// `@font-face`
    FontFace(FontFaceRule),
    /// `@keyframes`
    Keyframes(KeyframesRule),
    /// `@viewport`
    Viewport(ViewportRule),
    /// `@supports`
    Supports(SupportsRule),
    /// `@layer`
    Layer(LayerRule),
    /// Any other at-rule, kept verbatim.
    Unknown(UnknownRule),
}

impl TopLevelRule {
    /// The style rule, if this is one.
    #[must_use]
    pub const fn as_style_rule(&self) -> Option<&StyleRule> {
        match self {
            Self::Style(rule) => Some(rule),
            _ => None,
        }
    }

    /// The media rule, if this is one.
    #[must_use]
    pub const fn as_media_rule(&self) -> Option<&MediaRule> {
        match self {
            Self::Media(rule) => Some(rule),
            _ => None,
        }
    }

    /// The rules nested inside a conditional group rule.
    #[must_use]
    pub fn nested_rules(&self) -> Option<&[Self]> {
        match self {
            Self::Media(rule) => Some(rule.rules()),
            Self::Supports(rule) => Some(rule.rules()),
            Self::Layer(rule) => Some(rule.rules()),
            _ => None,
        }
    }
}

impl VersionedObject for TopLevelRule {
    fn min_version(&self) -> CssVersion {
        match self {
            Self::Style(rule) => rule.min_version(),
            Self::Media(rule) => rule.min_version(),
            Self::Page(rule) => rule.min_version(),
            Self::FontFace(rule) => rule.min_version(),
            Self::Keyframes(rule) => rule.min_version(),
            Self::Viewport(rule) => rule.min_version(),
            Self::Supports(rule) => rule.min_version(),
            Self::Layer(rule) => rule.min_version(),
            Self::Unknown(rule) => rule.min_version(),
        }
    }
}

impl CssWritable for TopLevelRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        match self {
            Self::Style(rule) => rule.as_css_string(settings, indent_level),
            Self::Media(rule) => rule.as_css_string(settings, indent_level),
            Self::Page(rule) => rule.as_css_string(settings, indent_level),
            Self::FontFace(rule) => rule.as_css_string(settings, indent_level),
            Self::Keyframes(rule) => rule.as_css_string(settings, indent_level),
            Self::Viewport(rule) => rule.as_css_string(settings, indent_level),
            Self::Supports(rule) => rule.as_css_string(settings, indent_level),
            Self::Layer(rule) => rule.as_css_string(settings, indent_level),
            Self::Unknown(rule) => rule.as_css_string(settings, indent_level),
        }
    }
}

macro_rules! impl_from_rule {
    ($($variant:ident($ty:ty)),+ $(,)?) => {$(
        impl From<$ty> for TopLevelRule {
            fn from(rule: $ty) -> Self {
                Self::$variant(rule)
            }
        }
    )+};
}

impl_from_rule!(
    Style(StyleRule),
    Media(MediaRule),
    Page(PageRule),
    FontFace(FontFaceRule),
    Keyframes(KeyframesRule),
    Viewport(ViewportRule),
    Supports(SupportsRule),
    Layer(LayerRule),
    Unknown(UnknownRule),
);

/// ` { rules }` for a conditional group rule, with the trailing newline.
///
/// Nested rules are written one indentation level deeper and separated by
/// an empty line in pretty output. Rules that render to nothing are skipped.
pub(crate) fn write_rule_block(
    rules: &[TopLevelRule],
    settings: &WriterSettings,
    indent_level: usize,
) -> Result<String, WriteError> {
    let optimized = settings.optimized_output;
    if rules.is_empty() {
        return Ok(if optimized {
            "{}".to_string()
        } else {
            format!(" {{}}{}", settings.newline())
        });
    }

    let mut out = if optimized {
        "{".to_string()
    } else {
        format!(" {{{}", settings.newline())
    };
    let mut first = true;
    for rule in rules {
        let css = rule.as_css_string(settings, indent_level + 1)?;
        if css.is_empty() {
            continue;
        }
        if !first {
            out.push_str(settings.newline());
        }
        first = false;
        out.push_str(&settings.indent(indent_level + 1));
        out.push_str(&css);
    }
    out.push_str(&settings.indent(indent_level));
    out.push('}');
    out.push_str(settings.newline());
    Ok(out)
}
