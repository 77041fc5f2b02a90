//! [Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/) in the domain model.

use quill_common::{CssVersion, LocationSlot, VersionedObject};
use strum_macros::{Display, EnumString};

use super::expression::Expression;
use super::list::CssList;
use super::rule::{TopLevelRule, write_rule_block};
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// The optional keyword in front of a media query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaQueryModifier {
    /// No keyword.
    #[default]
    #[strum(serialize = "")]
    None,
    /// `not`: the query is negated.
    Not,
    /// `only`: hides the query from legacy user agents.
    Only,
}

impl MediaQueryModifier {
    /// The keyword followed by a space, or nothing.
    #[must_use]
    pub const fn css_text(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Not => "not ",
            Self::Only => "only ",
        }
    }
}

/// `(feature: value)` or `(feature)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaExpression {
    feature: String,
    value: Option<Expression>,
    pub(crate) location: LocationSlot,
}

impl MediaExpression {
    /// Create an expression. The feature name is lowercased.
    #[must_use]
    pub fn new(feature: impl AsRef<str>, value: Option<Expression>) -> Self {
        Self {
            feature: feature.as_ref().trim().to_ascii_lowercase(),
            value,
            location: LocationSlot::NONE,
        }
    }

    /// The feature name.
    #[must_use]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// The value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Expression> {
        self.value.as_ref()
    }
}

impl CssWritable for MediaExpression {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        Ok(match &self.value {
            Some(value) => format!("({}:{})", self.feature, value.as_css_string(settings, indent_level)?),
            None => format!("({})", self.feature),
        })
    }
}

/// `not screen and (min-width: 100px)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaQuery {
    modifier: MediaQueryModifier,
    medium: Option<String>,
    expressions: CssList<MediaExpression>,
    pub(crate) location: LocationSlot,
}

impl MediaQuery {
    /// A query for `medium` with the given modifier.
    #[must_use]
    pub fn new(modifier: MediaQueryModifier, medium: Option<String>) -> Self {
        Self {
            modifier,
            medium: medium.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()),
            expressions: CssList::new(),
            location: LocationSlot::NONE,
        }
    }

    /// A query for a single medium without modifier.
    #[must_use]
    pub fn medium_only(medium: impl Into<String>) -> Self {
        Self::new(MediaQueryModifier::None, Some(medium.into()))
    }

    /// The modifier.
    #[must_use]
    pub const fn modifier(&self) -> MediaQueryModifier {
        self.modifier
    }

    /// Returns `true` for `not ...`.
    #[must_use]
    pub fn is_not(&self) -> bool {
        self.modifier == MediaQueryModifier::Not
    }

    /// Returns `true` for `only ...`.
    #[must_use]
    pub fn is_only(&self) -> bool {
        self.modifier == MediaQueryModifier::Only
    }

    /// The medium as written.
    #[must_use]
    pub fn medium(&self) -> Option<&str> {
        self.medium.as_deref()
    }

    /// The expressions.
    #[must_use]
    pub const fn expressions(&self) -> &CssList<MediaExpression> {
        &self.expressions
    }

    /// Mutable access to the expressions.
    pub const fn expressions_mut(&mut self) -> &mut CssList<MediaExpression> {
        &mut self.expressions
    }

    /// Append an expression.
    pub fn add_expression(&mut self, expression: MediaExpression) {
        self.expressions.add(expression);
    }
}

impl VersionedObject for MediaQuery {
    fn min_version(&self) -> CssVersion {
        if self.modifier != MediaQueryModifier::None || self.expressions.has_any() {
            CssVersion::Css30
        } else {
            CssVersion::Css21
        }
    }
}

impl CssWritable for MediaQuery {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        let mut out = String::from(self.modifier.css_text());
        let mut first = true;
        if let Some(medium) = &self.medium {
            out.push_str(medium);
            first = false;
        }
        for expression in &self.expressions {
            if !first {
                out.push_str(" and ");
            }
            first = false;
            out.push_str(&expression.as_css_string(settings, indent_level)?);
        }
        Ok(out)
    }
}

/// Queries separated by `, ` (`,` in optimized output).
pub(crate) fn write_media_queries(
    queries: &[MediaQuery],
    settings: &WriterSettings,
    indent_level: usize,
) -> Result<String, WriteError> {
    let separator = if settings.optimized_output { "," } else { ", " };
    let queries = queries
        .iter()
        .map(|query| query.as_css_string(settings, indent_level))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(queries.join(separator))
}

/// `@media queries { rules }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRule {
    media_queries: CssList<MediaQuery>,
    rules: CssList<TopLevelRule>,
    pub(crate) location: LocationSlot,
}

impl MediaRule {
    /// An empty rule for all media.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The queries.
    #[must_use]
    pub const fn media_queries(&self) -> &CssList<MediaQuery> {
        &self.media_queries
    }

    /// Mutable access to the queries.
    pub const fn media_queries_mut(&mut self) -> &mut CssList<MediaQuery> {
        &mut self.media_queries
    }

    /// Append a query.
    pub fn add_media_query(&mut self, query: MediaQuery) {
        self.media_queries.add(query);
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

impl VersionedObject for MediaRule {
    fn min_version(&self) -> CssVersion {
        self.media_queries
            .iter()
            .map(VersionedObject::min_version)
            .chain(self.rules.iter().map(VersionedObject::min_version))
            .max()
            .unwrap_or(CssVersion::Css21)
            .max(CssVersion::Css21)
    }
}

impl CssWritable for MediaRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        if !settings.write_media_rules || (settings.remove_unnecessary_code && self.rules.is_empty()) {
            return Ok(String::new());
        }
        let mut out = String::from("@media ");
        out.push_str(&write_media_queries(&self.media_queries, settings, indent_level)?);
        out.push_str(&write_rule_block(&self.rules, settings, indent_level)?);
        Ok(out)
    }
}
