//! The closed set of parse tree node kinds.

use strum_macros::{Display, EnumString, IntoStaticStr};

/// The grammar production a parse node was created for.
///
/// The textual rendering (`Display`) is the upper-case production name
/// used in diagnostics and tree dumps, e.g. `STYLEDECLARATION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum NodeKind {
    /// Entry point: a complete stylesheet.
    Root,
    /// `@charset "..."`; consumed during decoding and ignored afterwards.
    Charset,
    /// A skipped region after a syntax error.
    ErrorSkipTo,

    // Style rules and selectors
    /// `selectors { declarations }`
    StyleRule,
    /// One complex selector of a selector list.
    Selector,
    /// A combinator between compound selectors (`+ > ~` or whitespace).
    SelectorCombinator,
    /// `ns|` in front of an element or attribute name.
    NamespacePrefix,
    /// A type selector or `*`.
    ElementName,
    /// `#id`
    Hash,
    /// `.class`
    Class,
    /// `:name`, `::name` or `:name(...)`
    Pseudo,
    /// Raw argument text of a functional pseudo-class.
    Nth,
    /// `:not(...)`
    Negation,
    /// `[attr op value flag]`
    Attrib,
    /// Attribute match operator.
    AttribOperator,
    /// Attribute match value (identifier or quoted string).
    AttribValue,
    /// Attribute case-sensitivity flag (`i` or `s`).
    AttribCase,

    // Declarations and values
    /// Entry point: a bare declaration list; also the body of most blocks.
    StyleDeclarationList,
    /// `property: expr !important`
    StyleDeclaration,
    /// The property name of a declaration.
    Property,
    /// `!important`
    Important,
    /// A value expression.
    Expr,
    /// One term of an expression.
    ExprTerm,
    /// `/`, `,` or `=` between terms.
    ExprOperator,
    /// `url(...)`
    Url,
    /// `name(args)`
    Function,
    /// `calc(...)`
    Calc,
    /// A product inside a `calc()` sum.
    CalcProduct,
    /// `+` or `-` inside `calc()`.
    CalcSumOperator,
    /// `*` or `/` inside `calc()`.
    CalcProductOperator,
    /// An operand inside a `calc()` product.
    CalcUnit,

    // At-rules
    /// `@import`
    ImportRule,
    /// `@namespace`
    NamespaceRule,
    /// Prefix of a `@namespace` rule.
    NamespaceRulePrefix,
    /// URL of a `@namespace` rule.
    NamespaceRuleUrl,
    /// `@media`
    MediaRule,
    /// Comma separated media queries.
    MediaList,
    /// One media query.
    MediaQuery,
    /// `not` or `only` in front of a media query.
    MediaModifier,
    /// The media type of a query.
    Medium,
    /// `(feature: value)`
    MediaExpr,
    /// The feature name of a media expression.
    MediaFeature,
    /// `@page`
    PageRule,
    /// `:first`, `:left`, ... after `@page`.
    PageSelector,
    /// The block of a `@page` rule.
    PageRuleBlock,
    /// `@top-left` and friends inside `@page`.
    PageMarginSymbol,
    /// `@font-face`
    FontFaceRule,
    /// `@keyframes` (with any vendor prefix)
    KeyframesRule,
    /// The animation name of a `@keyframes` rule.
    KeyframesIdentifier,
    /// The selector list in front of a keyframes block.
    KeyframesSelector,
    /// `from`, `to` or a percentage.
    SingleKeyframeSelector,
    /// `@viewport` (with any vendor prefix)
    ViewportRule,
    /// `@supports`
    SupportsRule,
    /// A supports condition, possibly nested.
    SupportsCondition,
    /// `(declaration)` or `(condition)` in a supports condition.
    SupportsConditionInParens,
    /// `not (...)` in a supports condition.
    SupportsNegation,
    /// `and` / `or` in a supports condition.
    SupportsConditionOperator,
    /// `@layer`
    LayerRule,
    /// One dotted layer name.
    LayerName,
    /// The nested rules of a block `@layer` rule.
    LayerRuleBlock,
    /// Any other at-rule, preserved verbatim.
    UnknownRule,
    /// The prelude of an unknown at-rule.
    UnknownRuleParameterList,
    /// The block body of an unknown at-rule.
    UnknownRuleBody,
}

impl NodeKind {
    /// Returns `true` for the two kinds a parse tree may be rooted at.
    #[must_use]
    pub const fn is_entry(self) -> bool {
        matches!(self, Self::Root | Self::StyleDeclarationList)
    }

    /// Returns `true` for kinds that form a top level or nested rule.
    #[must_use]
    pub const fn is_rule(self) -> bool {
        matches!(
            self,
            Self::StyleRule
                | Self::ImportRule
                | Self::NamespaceRule
                | Self::MediaRule
                | Self::PageRule
                | Self::FontFaceRule
                | Self::KeyframesRule
                | Self::ViewportRule
                | Self::SupportsRule
                | Self::LayerRule
                | Self::UnknownRule
        )
    }
}
