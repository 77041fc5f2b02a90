//! [§ 10.1 Basic Arithmetic: calc()](https://www.w3.org/TR/css-values-4/#calc-func)
//!
//! A `calc()` is stored as the flat sequence of its sum: units and
//! operators, where a parenthesised group becomes a [`MathProduct`].

use quill_common::{CssVersion, LocationSlot, VersionedObject};
use strum_macros::{Display, EnumString};

use super::expression::FunctionTerm;
use super::list::CssList;
use crate::property::unit::CssUnit;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// An arithmetic operator inside `calc()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum MathOperator {
    /// `+`
    #[strum(serialize = "+")]
    Plus,
    /// `-`
    #[strum(serialize = "-")]
    Minus,
    /// `*`
    #[strum(serialize = "*")]
    Multiply,
    /// `/`
    #[strum(serialize = "/")]
    Divide,
}

impl MathOperator {
    /// The output spelling. `+` and `-` need surrounding whitespace.
    #[must_use]
    pub const fn css_text(self) -> &'static str {
        match self {
            Self::Plus => " + ",
            Self::Minus => " - ",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// A number, dimension, percentage or keyword inside `calc()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathUnitSimple {
    text: String,
    pub(crate) location: LocationSlot,
}

impl MathUnitSimple {
    /// Create a unit from its text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            location: LocationSlot::NONE,
        }
    }

    /// The text including the unit.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The unit, if the text ends in one other than `%`.
    #[must_use]
    pub fn unit(&self) -> Option<CssUnit> {
        CssUnit::of_value(&self.text).filter(|unit| *unit != CssUnit::Percentage)
    }
}

/// One member of a `calc()` sum or of a parenthesised group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathMember {
    /// A number, dimension or keyword.
    Simple(MathUnitSimple),
    /// An operator.
    Operator(MathOperator),
    /// A function such as `var(--gap)`.
    Function(FunctionTerm),
    /// A nested `calc()`.
    Math(MathExpression),
    /// A parenthesised group.
    UnitProduct(MathProduct),
}

impl CssWritable for MathMember {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        match self {
            Self::Simple(unit) => Ok(unit.text.clone()),
            Self::Operator(operator) => Ok(operator.css_text().to_string()),
            Self::Function(function) => function.as_css_string(settings, indent_level),
            Self::Math(math) => math.as_css_string(settings, indent_level),
            Self::UnitProduct(product) => Ok(format!("({})", product.as_css_string(settings, indent_level)?)),
        }
    }
}

impl From<MathUnitSimple> for MathMember {
    fn from(unit: MathUnitSimple) -> Self {
        Self::Simple(unit)
    }
}

impl From<MathOperator> for MathMember {
    fn from(operator: MathOperator) -> Self {
        Self::Operator(operator)
    }
}

/// The members of a parenthesised group, written inside `(` and `)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MathProduct {
    members: CssList<MathMember>,
    pub(crate) location: LocationSlot,
}

impl MathProduct {
    /// An empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The members in order.
    #[must_use]
    pub const fn members(&self) -> &CssList<MathMember> {
        &self.members
    }

    /// Mutable access to the members.
    pub const fn members_mut(&mut self) -> &mut CssList<MathMember> {
        &mut self.members
    }

    /// Append a member.
    pub fn add_member(&mut self, member: impl Into<MathMember>) {
        self.members.add(member.into());
    }
}

impl VersionedObject for MathProduct {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for MathProduct {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        settings.check_version("calc()", self)?;
        write_members(&self.members, settings, indent_level)
    }
}

/// A `calc(...)` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MathExpression {
    members: CssList<MathMember>,
    pub(crate) location: LocationSlot,
}

impl MathExpression {
    /// An empty `calc()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The members in order.
    #[must_use]
    pub const fn members(&self) -> &CssList<MathMember> {
        &self.members
    }

    /// Mutable access to the members.
    pub const fn members_mut(&mut self) -> &mut CssList<MathMember> {
        &mut self.members
    }

    /// Append a member.
    pub fn add_member(&mut self, member: impl Into<MathMember>) {
        self.members.add(member.into());
    }
}

impl VersionedObject for MathExpression {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for MathExpression {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        settings.check_version("calc()", self)?;
        Ok(format!("calc({})", write_members(&self.members, settings, indent_level)?))
    }
}

fn write_members(
    members: &CssList<MathMember>,
    settings: &WriterSettings,
    indent_level: usize,
) -> Result<String, WriteError> {
    members
        .iter()
        .map(|member| member.as_css_string(settings, indent_level))
        .collect()
}
