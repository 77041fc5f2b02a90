//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) in the domain model.
//!
//! A [`Selector`] is the flat member sequence of one complex selector:
//! simple selectors, attribute selectors, pseudo-classes and the
//! combinators between compounds.

use quill_common::{CssVersion, LocationSlot, VersionedObject};
use strum_macros::{Display, EnumString};

use super::list::CssList;
use crate::writer::{CssWritable, WriteError, WriterSettings};

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum SelectorCombinator {
    /// Next sibling, `+`.
    #[strum(serialize = "+")]
    Plus,
    /// Child, `>`.
    #[strum(serialize = ">")]
    Greater,
    /// Subsequent sibling, `~`.
    #[strum(serialize = "~")]
    Tilde,
    /// Descendant, whitespace.
    #[strum(serialize = " ")]
    Blank,
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum AttributeOperator {
    /// `[a=v]`
    #[strum(serialize = "=")]
    Equals,
    /// `[a~=v]`, whitespace separated list contains `v`.
    #[strum(serialize = "~=")]
    Includes,
    /// `[a|=v]`, equals `v` or starts with `v-`.
    #[strum(serialize = "|=")]
    DashMatch,
    /// `[a^=v]`
    #[strum(serialize = "^=")]
    BeginMatch,
    /// `[a$=v]`
    #[strum(serialize = "$=")]
    EndMatch,
    /// `[a*=v]`
    #[strum(serialize = "*=")]
    ContainsMatch,
}

/// [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AttributeCase {
    /// `s`
    #[strum(serialize = "s")]
    CaseSensitive,
    /// `i`
    #[strum(serialize = "i")]
    CaseInsensitive,
}

/// A simple selector kept as text: `h1`, `*`, `.note`, `#main`, `:hover`,
/// `::before` or a namespace prefix such as `svg|`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSelectorMember {
    value: String,
    pub(crate) location: LocationSlot,
}

impl SimpleSelectorMember {
    /// Create a member from its text.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            location: LocationSlot::NONE,
        }
    }

    /// The text as written.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` for `#id`.
    #[must_use]
    pub fn is_hash(&self) -> bool {
        self.value.starts_with('#')
    }

    /// Returns `true` for `.class`.
    #[must_use]
    pub fn is_class(&self) -> bool {
        self.value.starts_with('.')
    }

    /// Returns `true` for a pseudo-class or pseudo-element.
    #[must_use]
    pub fn is_pseudo(&self) -> bool {
        self.value.starts_with(':')
    }

    /// Returns `true` for an element name or `*`.
    #[must_use]
    pub fn is_element_name(&self) -> bool {
        !self.is_hash() && !self.is_class() && !self.is_pseudo() && !self.value.ends_with('|')
    }
}

/// `[ns|name op value case]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorAttribute {
    namespace_prefix: Option<String>,
    name: String,
    matcher: Option<(AttributeOperator, String)>,
    case: Option<AttributeCase>,
    pub(crate) location: LocationSlot,
}

impl SelectorAttribute {
    /// A presence test, `[name]`.
    #[must_use]
    pub fn new(namespace_prefix: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace_prefix: namespace_prefix.filter(|p| !p.is_empty()),
            name: name.into(),
            matcher: None,
            case: None,
            location: LocationSlot::NONE,
        }
    }

    /// A value test, `[name op value]`. `value` is kept as written,
    /// quotes included.
    #[must_use]
    pub fn with_value(
        namespace_prefix: Option<String>,
        name: impl Into<String>,
        operator: AttributeOperator,
        value: impl Into<String>,
    ) -> Self {
        let mut attribute = Self::new(namespace_prefix, name);
        attribute.matcher = Some((operator, value.into()));
        attribute
    }

    /// Add a case flag. Ignored for a presence test.
    #[must_use]
    pub const fn with_case(mut self, case: Option<AttributeCase>) -> Self {
        if self.matcher.is_some() {
            self.case = case;
        }
        self
    }

    /// The namespace prefix including the `|`.
    #[must_use]
    pub fn namespace_prefix(&self) -> Option<&str> {
        self.namespace_prefix.as_deref()
    }

    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The operator, if this is a value test.
    #[must_use]
    pub fn operator(&self) -> Option<AttributeOperator> {
        self.matcher.as_ref().map(|(operator, _)| *operator)
    }

    /// The value as written, if this is a value test.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.matcher.as_ref().map(|(_, value)| value.as_str())
    }

    /// The case flag.
    #[must_use]
    pub const fn case(&self) -> Option<AttributeCase> {
        self.case
    }
}

impl VersionedObject for SelectorAttribute {
    fn min_version(&self) -> CssVersion {
        let css3_operator = matches!(
            self.operator(),
            Some(AttributeOperator::BeginMatch | AttributeOperator::EndMatch | AttributeOperator::ContainsMatch)
        );
        if self.case.is_some() || css3_operator {
            CssVersion::Css30
        } else {
            CssVersion::Css21
        }
    }
}

impl CssWritable for SelectorAttribute {
    fn as_css_string(&self, settings: &WriterSettings, _indent_level: usize) -> Result<String, WriteError> {
        if self.case.is_some() {
            settings.check_version("attribute case flag", self)?;
        }
        let mut out = String::from("[");
        if let Some(prefix) = &self.namespace_prefix {
            out.push_str(prefix);
        }
        out.push_str(&self.name);
        if let Some((operator, value)) = &self.matcher {
            out.push_str(&operator.to_string());
            out.push_str(value);
            if let Some(case) = self.case {
                out.push(' ');
                out.push_str(&case.to_string());
            }
        }
        out.push(']');
        Ok(out)
    }
}

/// A functional pseudo-class with a plain argument, e.g. `:nth-child(2n+1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorFunctionLike {
    function_name: String,
    argument: String,
    pub(crate) location: LocationSlot,
}

impl SelectorFunctionLike {
    /// Create a call. `function_name` includes the colon and the `(`,
    /// e.g. `":nth-child("`.
    #[must_use]
    pub fn new(function_name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            argument: argument.into().trim().to_string(),
            location: LocationSlot::NONE,
        }
    }

    /// The name including colon and `(`.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// The argument text.
    #[must_use]
    pub fn argument(&self) -> &str {
        &self.argument
    }
}

/// A pseudo-class taking a selector list: `:not(...)`, `:is(...)`,
/// `:where(...)` and their legacy spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorNested {
    function_name: String,
    selectors: CssList<Selector>,
    pub(crate) location: LocationSlot,
}

impl SelectorNested {
    /// Create a pseudo-class from its opening text, e.g. `":is("`, and
    /// its selectors.
    #[must_use]
    pub fn new(function_name: impl Into<String>, selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self {
            function_name: function_name.into(),
            selectors: selectors.into_iter().collect(),
            location: LocationSlot::NONE,
        }
    }

    /// `:not(selectors)`.
    #[must_use]
    pub fn not(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Self::new(":not(", selectors)
    }

    /// The opening text including the colon and `(`.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Returns `true` for `:not(...)`.
    #[must_use]
    pub fn is_negation(&self) -> bool {
        self.function_name.eq_ignore_ascii_case(":not(")
    }

    /// The nested selectors.
    #[must_use]
    pub const fn selectors(&self) -> &CssList<Selector> {
        &self.selectors
    }

    /// Mutable access to the nested selectors.
    pub const fn selectors_mut(&mut self) -> &mut CssList<Selector> {
        &mut self.selectors
    }
}

impl VersionedObject for SelectorNested {
    fn min_version(&self) -> CssVersion {
        CssVersion::Css30
    }
}

impl CssWritable for SelectorNested {
    fn as_css_string(&self, settings: &WriterSettings, _indent_level: usize) -> Result<String, WriteError> {
        settings.check_version(&format!("{})", self.function_name), self)?;
        let separator = if settings.optimized_output { "," } else { ", " };
        let selectors = self
            .selectors
            .iter()
            .map(|selector| selector.as_css_string(settings, 0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}{})", self.function_name, selectors.join(separator)))
    }
}

/// One member of a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorMember {
    /// Element name, class, id, plain pseudo-class or namespace prefix.
    Simple(SimpleSelectorMember),
    /// An attribute selector.
    Attribute(SelectorAttribute),
    /// A combinator between compounds.
    Combinator(SelectorCombinator),
    /// `:not(...)`, `:is(...)` and friends.
    Nested(SelectorNested),
    /// A functional pseudo-class with a plain argument.
    FunctionLike(SelectorFunctionLike),
}

impl VersionedObject for SelectorMember {
    fn min_version(&self) -> CssVersion {
        match self {
            Self::Attribute(attribute) => attribute.min_version(),
            Self::Nested(nested) => nested.min_version(),
            Self::Combinator(SelectorCombinator::Tilde) | Self::FunctionLike(_) => CssVersion::Css30,
            Self::Combinator(SelectorCombinator::Plus | SelectorCombinator::Greater) => CssVersion::Css21,
            Self::Simple(_) | Self::Combinator(SelectorCombinator::Blank) => CssVersion::Css10,
        }
    }
}

impl CssWritable for SelectorMember {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        match self {
            Self::Simple(simple) => Ok(simple.value.clone()),
            Self::Attribute(attribute) => attribute.as_css_string(settings, indent_level),
            Self::Combinator(combinator) => Ok(combinator.to_string()),
            Self::Nested(nested) => nested.as_css_string(settings, indent_level),
            Self::FunctionLike(function) => Ok(format!("{}{})", function.function_name, function.argument)),
        }
    }
}

impl From<SimpleSelectorMember> for SelectorMember {
    fn from(member: SimpleSelectorMember) -> Self {
        Self::Simple(member)
    }
}

impl From<SelectorAttribute> for SelectorMember {
    fn from(attribute: SelectorAttribute) -> Self {
        Self::Attribute(attribute)
    }
}

impl From<SelectorCombinator> for SelectorMember {
    fn from(combinator: SelectorCombinator) -> Self {
        Self::Combinator(combinator)
    }
}

impl From<SelectorNested> for SelectorMember {
    fn from(nested: SelectorNested) -> Self {
        Self::Nested(nested)
    }
}

impl From<SelectorFunctionLike> for SelectorMember {
    fn from(function: SelectorFunctionLike) -> Self {
        Self::FunctionLike(function)
    }
}

/// One complex selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    members: CssList<SelectorMember>,
    pub(crate) location: LocationSlot,
}

impl Selector {
    /// An empty selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A selector made of one simple member, e.g. `h1` or `.note`.
    #[must_use]
    pub fn simple(value: impl Into<String>) -> Self {
        let mut selector = Self::new();
        selector.add_member(SimpleSelectorMember::new(value));
        selector
    }

    /// The members in order.
    #[must_use]
    pub const fn members(&self) -> &CssList<SelectorMember> {
        &self.members
    }

    /// Mutable access to the members.
    pub const fn members_mut(&mut self) -> &mut CssList<SelectorMember> {
        &mut self.members
    }

    /// Append a member.
    pub fn add_member(&mut self, member: impl Into<SelectorMember>) {
        self.members.add(member.into());
    }
}

impl VersionedObject for Selector {
    fn min_version(&self) -> CssVersion {
        self.members
            .iter()
            .map(VersionedObject::min_version)
            .max()
            .unwrap_or(CssVersion::Css10)
    }
}

impl CssWritable for Selector {
    fn as_css_string(&self, settings: &WriterSettings, indent_level: usize) -> Result<String, WriteError> {
        self.members
            .iter()
            .map(|member| member.as_css_string(settings, indent_level))
            .collect()
    }
}
