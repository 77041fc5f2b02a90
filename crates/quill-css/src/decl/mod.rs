//! The typed CSS domain model.
//!
//! Everything here is plain owned data: a [`CascadingStyleSheet`] owns its
//! rules, a rule owns its selectors and declarations, and so on down to
//! single value terms. Every type implements
//! [`CssWritable`](crate::writer::CssWritable), and most carry the source
//! span they were converted from.

mod block_rule;
mod container;
mod declaration;
mod expression;
mod import_rule;
mod keyframes_rule;
mod layer_rule;
mod list;
mod math;
mod media_rule;
mod page_rule;
mod rule;
mod selector;
mod style_rule;
mod stylesheet;
mod supports_rule;
mod unknown_rule;
/// Depth-first traversal of a stylesheet.
pub mod visit;

pub use block_rule::{FontFaceRule, ViewportRule};
pub use container::{DeclarationContainer, DeclarationList};
pub use declaration::{Declaration, IMPORTANT_SUFFIX};
pub use expression::{CssUri, Expression, ExpressionMember, ExpressionOperator, FunctionTerm, TermSimple};
pub use import_rule::{ImportRule, NamespaceRule};
pub use keyframes_rule::{KeyframesBlock, KeyframesRule};
pub use layer_rule::LayerRule;
pub use list::{Change, CssList};
pub use math::{MathExpression, MathMember, MathOperator, MathProduct, MathUnitSimple};
pub use media_rule::{MediaExpression, MediaQuery, MediaQueryModifier, MediaRule};
pub use page_rule::{PageMarginBlock, PageMember, PageRule};
pub use rule::TopLevelRule;
pub use selector::{
    AttributeCase, AttributeOperator, Selector, SelectorAttribute, SelectorCombinator, SelectorFunctionLike,
    SelectorMember, SelectorNested, SimpleSelectorMember,
};
pub use style_rule::StyleRule;
pub use stylesheet::CascadingStyleSheet;
pub use supports_rule::{SupportsConditionMember, SupportsConditionOperator, SupportsRule};
pub use unknown_rule::UnknownRule;

use quill_common::SourceArea;

/// A domain object that remembers where in the source it came from.
///
/// The span never takes part in equality.
pub trait SourceLocationAware {
    /// The source span, if the object was read with source locations enabled.
    fn source_location(&self) -> Option<SourceArea>;

    /// Replace the source span.
    fn set_source_location(&mut self, area: Option<SourceArea>);
}

macro_rules! impl_source_location {
    ($($ty:ty),+ $(,)?) => {$(
        impl SourceLocationAware for $ty {
            fn source_location(&self) -> Option<SourceArea> {
                self.location.get()
            }

            fn set_source_location(&mut self, area: Option<SourceArea>) {
                self.location.set(area);
            }
        }
    )+};
}

impl_source_location!(
    Declaration,
    TermSimple,
    CssUri,
    FunctionTerm,
    Expression,
    MathUnitSimple,
    MathProduct,
    MathExpression,
    SimpleSelectorMember,
    SelectorAttribute,
    SelectorFunctionLike,
    SelectorNested,
    Selector,
    StyleRule,
    ImportRule,
    NamespaceRule,
    MediaExpression,
    MediaQuery,
    MediaRule,
    FontFaceRule,
    ViewportRule,
    KeyframesBlock,
    KeyframesRule,
    PageMarginBlock,
    PageRule,
    SupportsRule,
    LayerRule,
    UnknownRule,
);
