//! [CSS Conditional Rules § 6](https://www.w3.org/TR/css-conditional-3/#at-supports)

use quill_common::{CssVersion, LocationSlot, VersionedObject};
use strum_macros::{Display, EnumString};

use super::declaration::Declaration;
use super::list::CssList;
use super::rule::{TopLevelRule, write_rule_block};
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// `and` or `or` between two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SupportsConditionOperator {
    /// Both sides must hold.
    And,
    /// Either side must hold.
    Or,
}

/// One member of a supports condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportsConditionMember {
    /// `(property: value)`
    Declaration(Declaration),
    /// `not member`
    Negation(Box<SupportsConditionMember>),
    /// A parenthesised group of members.
    Nested(CssList<SupportsConditionMember>),
    /// `and` / `or`
    Operator(SupportsConditionOperator),
}

impl VersionedObject for SupportsConditionMember {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for SupportsConditionMember {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        settings.check_version("@supports condition", self)?;
        match self {
            Self::Declaration(declaration) => Ok(format!("({})", declaration.as_css_string(settings, indent_level)?)),
            Self::Negation(member) => Ok(format!("not {}", member.as_css_string(settings, indent_level)?)),
            Self::Nested(members) => Ok(format!("({})", write_condition(members, settings, indent_level)?)),
            Self::Operator(operator) => Ok(operator.to_string()),
        }
    }
}

impl From<Declaration> for SupportsConditionMember {
    fn from(declaration: Declaration) -> Self {
        Self::Declaration(declaration)
    }
}

impl From<SupportsConditionOperator> for SupportsConditionMember {
    fn from(operator: SupportsConditionOperator) -> Self {
        Self::Operator(operator)
    }
}

/// Members separated by single spaces.
fn write_condition(
    members: &[SupportsConditionMember],
    settings: &WriterSettings,
    indent_level: usize,
) -> Result<String, WriteError> {
    let members = members
        .iter()
        .map(|member| member.as_css_string(settings, indent_level))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members.join(" "))
}

/// `@supports condition { rules }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportsRule {
    condition: CssList<SupportsConditionMember>,
    rules: CssList<TopLevelRule>,
    pub(crate) location: LocationSlot,
}

impl SupportsRule {
    /// An empty rule without a condition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The condition members.
    #[must_use]
    pub const fn condition(&self) -> &CssList<SupportsConditionMember> {
        &self.condition
    }

    /// Mutable access to the condition members.
    pub const fn condition_mut(&mut self) -> &mut CssList<SupportsConditionMember> {
        &mut self.condition
    }

    /// Append a condition member.
    pub fn add_condition_member(&mut self, member: impl Into<SupportsConditionMember>) {
        self.condition.add(member.into());
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

impl VersionedObject for SupportsRule {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for SupportsRule {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        settings.check_version("@supports", self)?;
        if !settings.write_supports_rules || (settings.remove_unnecessary_code && self.rules.is_empty()) {
            return Ok(String::new());
        }
        let mut out = String::from("@supports ");
        out.push_str(&write_condition(&self.condition, settings, indent_level)?);
        out.push_str(&write_rule_block(&self.rules, settings, indent_level)?);
        Ok(out)
    }
}
