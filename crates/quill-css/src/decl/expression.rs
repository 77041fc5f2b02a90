//! Property values.
//!
//! An [`Expression`] is a flat sequence of terms and operators. Functions
//! nest a full expression, and `calc()` nests a [`MathExpression`].

use std::fmt::Display;

use quill_common::{CssVersion, LocationSlot, VersionedObject};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

use super::list::CssList;
use super::math::MathExpression;
use crate::property::unit::CssUnit;
use crate::utils::get_as_css_url;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// An operator between two expression terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ExpressionOperator {
    /// `/`, as in `font: 12px/1.5 serif`.
    #[strum(serialize = "/")]
    Slash,
    /// `,`, separating layers or function arguments.
    #[strum(serialize = ",")]
    Comma,
    /// `=`, only seen in legacy `progid` filters.
    #[strum(serialize = "=")]
    Equals,
}

/// A plain term: keyword, number, dimension, string, color or unicode range.
#[derive(Debug, Clone)]
pub struct TermSimple {
    value: String,
    pub(crate) location: LocationSlot,
}

impl TermSimple {
    /// Create a term. Surrounding whitespace is removed.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into().trim().to_string(),
            location: LocationSlot::NONE,
        }
    }

    /// Create a numeric term.
    #[must_use]
    pub fn number(value: impl Display) -> Self {
        Self::new(value.to_string())
    }

    /// The value as written.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into().trim().to_string();
    }

    /// The shortest equivalent spelling: `0px` becomes `0` and `#aabbcc`
    /// becomes `#abc`. Anything else is returned unchanged.
    #[must_use]
    pub fn optimized_value(&self) -> String {
        optimize_term(&self.value)
    }
}

/// Two simple terms are equal when their optimized spellings are.
impl PartialEq for TermSimple {
    fn eq(&self, other: &Self) -> bool {
        self.optimized_value() == other.optimized_value()
    }
}

impl Eq for TermSimple {}

impl CssWritable for TermSimple {
    fn as_css_string(&self, settings: &WriterSettings, _indent_level: usize) -> Result<String, WriteError> {
        Ok(if settings.optimized_output {
            self.optimized_value()
        } else {
            self.value.clone()
        })
    }
}

fn optimize_term(value: &str) -> String {
    if CssUnit::iter().any(|unit| unit.format(0) == value) {
        return "0".to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    match chars[..] {
        ['#', r1, r2, g1, g2, b1, b2] if r1 == r2 && g1 == g2 && b1 == b2 => format!("#{r1}{g1}{b1}"),
        _ => value.to_string(),
    }
}

/// A resolved URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssUri {
    uri: String,
    pub(crate) location: LocationSlot,
}

impl CssUri {
    /// Create a reference to `uri`, already unescaped.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            location: LocationSlot::NONE,
        }
    }

    /// The URL.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Replace the URL.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    /// Returns `true` for a `data:` URL.
    #[must_use]
    pub fn is_data_url(&self) -> bool {
        self.uri.trim_start().get(..5).is_some_and(|s| s.eq_ignore_ascii_case("data:"))
    }
}

impl CssWritable for CssUri {
    fn as_css_string(&self, settings: &WriterSettings, _indent_level: usize) -> Result<String, WriteError> {
        Ok(get_as_css_url(&self.uri, settings.quote_urls))
    }
}

/// A function call such as `rgb(1, 2, 3)` or `var(--x)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTerm {
    name: String,
    expression: Option<Expression>,
    pub(crate) location: LocationSlot,
}

impl FunctionTerm {
    /// Create a call. A trailing `()` on `name` is dropped.
    #[must_use]
    pub fn new(name: impl Into<String>, expression: Option<Expression>) -> Self {
        let name = name.into();
        let name = name.trim();
        let name = match name.strip_suffix("()") {
            Some(stripped) if !stripped.trim().is_empty() => stripped.trim(),
            _ => name,
        };
        Self {
            name: name.to_string(),
            expression,
            location: LocationSlot::NONE,
        }
    }

    /// The function name, without the parenthesis.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument expression, if any.
    #[must_use]
    pub const fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }

    /// Mutable access to the argument expression.
    pub const fn expression_mut(&mut self) -> Option<&mut Expression> {
        self.expression.as_mut()
    }

    /// Replace the argument expression.
    pub fn set_expression(&mut self, expression: Option<Expression>) {
        self.expression = expression;
    }

    /// Returns `true` for the legacy IE `expression()` function.
    #[must_use]
    pub fn is_expression_function(&self) -> bool {
        self.name == "expression" || self.name.starts_with("expression(")
    }
}

impl CssWritable for FunctionTerm {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        Ok(match &self.expression {
            Some(expression) => format!("{}({})", self.name, expression.as_css_string(settings, indent_level)?),
            None if self.name.ends_with(')') => self.name.clone(),
            None => format!("{}()", self.name),
        })
    }
}

/// One member of an [`Expression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionMember {
    /// A plain term.
    Simple(TermSimple),
    /// A `url(...)`.
    Uri(CssUri),
    /// A function call.
    Function(FunctionTerm),
    /// A `calc(...)`.
    Math(MathExpression),
    /// An operator between terms.
    Operator(ExpressionOperator),
}

impl ExpressionMember {
    /// Returns `true` for an operator.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// The simple term, if this is one.
    #[must_use]
    pub const fn as_simple(&self) -> Option<&TermSimple> {
        match self {
            Self::Simple(term) => Some(term),
            _ => None,
        }
    }

    /// The URL, if this is one.
    #[must_use]
    pub const fn as_uri(&self) -> Option<&CssUri> {
        match self {
            Self::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

impl VersionedObject for ExpressionMember {
    fn min_version(&self) -> CssVersion {
        match self {
            Self::Math(math) => math.min_version(),
            Self::Function(function) => function
                .expression()
                .map_or(CssVersion::Css10, VersionedObject::min_version),
            Self::Simple(_) | Self::Uri(_) | Self::Operator(_) => CssVersion::Css10,
        }
    }
}

impl CssWritable for ExpressionMember {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        match self {
            Self::Simple(term) => term.as_css_string(settings, indent_level),
            Self::Uri(uri) => uri.as_css_string(settings, indent_level),
            Self::Function(function) => function.as_css_string(settings, indent_level),
            Self::Math(math) => math.as_css_string(settings, indent_level),
            Self::Operator(operator) => Ok(operator.to_string()),
        }
    }
}

impl From<TermSimple> for ExpressionMember {
    fn from(term: TermSimple) -> Self {
        Self::Simple(term)
    }
}

impl From<CssUri> for ExpressionMember {
    fn from(uri: CssUri) -> Self {
        Self::Uri(uri)
    }
}

impl From<FunctionTerm> for ExpressionMember {
    fn from(function: FunctionTerm) -> Self {
        Self::Function(function)
    }
}

impl From<MathExpression> for ExpressionMember {
    fn from(math: MathExpression) -> Self {
        Self::Math(math)
    }
}

impl From<ExpressionOperator> for ExpressionMember {
    fn from(operator: ExpressionOperator) -> Self {
        Self::Operator(operator)
    }
}

/// A property value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    members: CssList<ExpressionMember>,
    pub(crate) location: LocationSlot,
}

impl Expression {
    /// An empty expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An expression with a single plain term.
    #[must_use]
    pub fn simple(value: impl Into<String>) -> Self {
        let mut expression = Self::new();
        expression.add_term_simple(value);
        expression
    }

    /// An expression with a single numeric term.
    #[must_use]
    pub fn number(value: impl Display) -> Self {
        Self::simple(value.to_string())
    }

    /// An expression with a single `url(...)`.
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        let mut expression = Self::new();
        expression.members.add(ExpressionMember::Uri(CssUri::new(uri)));
        expression
    }

    /// The members in order.
    #[must_use]
    pub const fn members(&self) -> &CssList<ExpressionMember> {
        &self.members
    }

    /// Mutable access to the members.
    pub const fn members_mut(&mut self) -> &mut CssList<ExpressionMember> {
        &mut self.members
    }

    /// Append a member.
    pub fn add_member(&mut self, member: impl Into<ExpressionMember>) {
        self.members.add(member.into());
    }

    /// Append a plain term.
    pub fn add_term_simple(&mut self, value: impl Into<String>) {
        self.members.add(ExpressionMember::Simple(TermSimple::new(value)));
    }

    /// Append a numeric term.
    pub fn add_number(&mut self, value: impl Display) {
        self.members.add(ExpressionMember::Simple(TermSimple::number(value)));
    }

    /// Append a double quoted string.
    pub fn add_string(&mut self, value: &str) {
        let quoted = format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""));
        self.add_term_simple(quoted);
    }

    /// Append a `url(...)`.
    pub fn add_uri(&mut self, uri: impl Into<String>) {
        self.members.add(ExpressionMember::Uri(CssUri::new(uri)));
    }

    /// Append an operator.
    pub fn add_operator(&mut self, operator: ExpressionOperator) {
        self.members.add(ExpressionMember::Operator(operator));
    }

    /// All plain terms, in order.
    #[must_use]
    pub fn all_simple_members(&self) -> Vec<&TermSimple> {
        self.members.iter().filter_map(ExpressionMember::as_simple).collect()
    }

    /// The expression rendered with default settings.
    #[must_use]
    pub fn text(&self) -> String {
        self.as_css_string(&WriterSettings::default(), 0).unwrap_or_default()
    }
}

impl VersionedObject for Expression {
    fn min_version(&self) -> CssVersion {
        self.members
            .iter()
            .map(VersionedObject::min_version)
            .max()
            .unwrap_or(CssVersion::Css10)
    }
}

impl CssWritable for Expression {
    /// Members are separated by a single space, except next to an operator.
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        let mut out = String::new();
        let mut previous_was_operator = false;
        for member in &self.members {
            let is_operator = member.is_operator();
            if !is_operator && !previous_was_operator && !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&member.as_css_string(settings, indent_level)?);
            previous_was_operator = is_operator;
        }
        Ok(out)
    }
}
