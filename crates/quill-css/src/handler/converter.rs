//! Parse tree to domain model conversion.
//!
//! The converter walks the tree depth-first and maps every node kind to the
//! domain constructor for it. Positions where a node kind has no mapping are
//! skipped, or fail the conversion in strict mode. Problems that do not stop
//! the conversion, such as an unknown medium, go to the interpret-error hook.

use core::fmt;
use core::str::FromStr;

use quill_common::CssVersion;
use quill_tree::{NodeId, NodeKind, ParseTree};

use super::error::ConvertError;
use super::settings::{ConverterSettings, InterpretErrorHook, default_interpret_error_hook};
use crate::decl::{
    AttributeCase, AttributeOperator, CascadingStyleSheet, CssList, CssUri, Declaration, DeclarationContainer,
    DeclarationList, Expression, ExpressionMember, ExpressionOperator, FontFaceRule, FunctionTerm, ImportRule,
    KeyframesBlock, KeyframesRule, LayerRule, MathExpression, MathMember, MathOperator, MathProduct,
    MathUnitSimple, MediaExpression, MediaQuery, MediaQueryModifier, MediaRule, NamespaceRule, PageMarginBlock,
    PageRule, Selector, SelectorAttribute, SelectorCombinator, SelectorFunctionLike, SelectorNested,
    SimpleSelectorMember, SourceLocationAware, StyleRule, SupportsConditionMember, SupportsConditionOperator,
    SupportsRule, TermSimple, TopLevelRule, UnknownRule, ViewportRule,
};
use crate::media::{MediaExpressionFeature, Medium};

type Result<T> = core::result::Result<T, ConvertError>;

/// Turns parse trees into domain objects.
pub struct CssConverter {
    settings: ConverterSettings,
    on_interpret_error: InterpretErrorHook,
}

impl CssConverter {
    /// Create a converter logging interpretation problems through `tracing`.
    #[must_use]
    pub fn new(settings: ConverterSettings) -> Self {
        Self {
            settings,
            on_interpret_error: default_interpret_error_hook(),
        }
    }

    /// Replace the interpret-error hook.
    #[must_use]
    pub fn with_interpret_error_hook(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_interpret_error = Box::new(hook);
        self
    }

    /// The options in use.
    #[must_use]
    pub const fn settings(&self) -> &ConverterSettings {
        &self.settings
    }

    /// Convert a tree produced by
    /// [`CSSParser::parse_stylesheet`](crate::parser::CSSParser::parse_stylesheet).
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::WrongRoot`] before converting anything if the
    /// tree is not rooted at `ROOT`. In strict mode, returns
    /// [`ConvertError::UnknownNode`] or [`ConvertError::Malformed`] for the
    /// first node that cannot be mapped.
    pub fn convert_stylesheet(&mut self, tree: &ParseTree, version: CssVersion) -> Result<CascadingStyleSheet> {
        let mut walker = self.walker(tree, NodeKind::Root, version)?;
        let mut sheet = CascadingStyleSheet::new();
        walker.stylesheet(tree.root(), &mut sheet)?;
        tracing::debug!(rules = sheet.rules().count(), "converted stylesheet");
        Ok(sheet)
    }

    /// Convert a tree produced by
    /// [`CSSParser::parse_declaration_list`](crate::parser::CSSParser::parse_declaration_list).
    ///
    /// # Errors
    ///
    /// See [`CssConverter::convert_stylesheet`]; the expected entry kind is
    /// `STYLEDECLARATIONLIST`.
    pub fn convert_declaration_list(&mut self, tree: &ParseTree, version: CssVersion) -> Result<DeclarationList> {
        let mut walker = self.walker(tree, NodeKind::StyleDeclarationList, version)?;
        let mut list = DeclarationList::new();
        walker.declarations(tree.root(), &mut list)?;
        tracing::debug!(declarations = list.count(), "converted declaration list");
        Ok(list)
    }

    fn walker<'a>(&'a mut self, tree: &'a ParseTree, expected: NodeKind, version: CssVersion) -> Result<Walker<'a>> {
        let found = tree.entry_kind();
        if found != expected {
            return Err(ConvertError::WrongRoot { expected, found });
        }
        if tree.version() != version {
            tracing::debug!(tree = %tree.version(), requested = %version, "converting tree parsed for another level");
        }
        Ok(Walker {
            tree,
            settings: self.settings,
            hook: &mut *self.on_interpret_error,
        })
    }
}

impl Default for CssConverter {
    fn default() -> Self {
        Self::new(ConverterSettings::default())
    }
}

impl fmt::Debug for CssConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssConverter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Convert a stylesheet tree with default settings.
///
/// # Errors
///
/// See [`CssConverter::convert_stylesheet`].
pub fn convert_stylesheet(tree: &ParseTree, version: CssVersion) -> Result<CascadingStyleSheet> {
    CssConverter::default().convert_stylesheet(tree, version)
}

/// Convert a declaration list tree with default settings.
///
/// # Errors
///
/// See [`CssConverter::convert_declaration_list`].
pub fn convert_declaration_list(tree: &ParseTree, version: CssVersion) -> Result<DeclarationList> {
    CssConverter::default().convert_declaration_list(tree, version)
}

/// State of one conversion.
struct Walker<'a> {
    tree: &'a ParseTree,
    settings: ConverterSettings,
    hook: &'a mut dyn FnMut(&str),
}

impl<'a> Walker<'a> {
    // ========== Diagnostics ==========

    fn unknown_node(&self, id: NodeId) -> Result<()> {
        let kind = self.tree.kind(id);
        if self.settings.strict {
            return Err(ConvertError::UnknownNode(kind));
        }
        tracing::debug!(%kind, "skipping node without domain mapping");
        Ok(())
    }

    fn malformed(&mut self, message: String) -> Result<()> {
        if self.settings.strict {
            return Err(ConvertError::Malformed(message));
        }
        (self.hook)(&message);
        Ok(())
    }

    fn interpret_error(&mut self, message: &str) {
        (self.hook)(message);
    }

    fn locate<T: SourceLocationAware>(&self, mut object: T, id: NodeId) -> T {
        if self.settings.use_source_location {
            object.set_source_location(self.tree.area(id));
        }
        object
    }

    /// The text of the first child of `kind`, if there is one.
    fn child_text(&self, id: NodeId, kind: NodeKind) -> Option<&'a str> {
        let tree = self.tree;
        tree.find_child(id, kind).map(|child| tree.text(child))
    }

    // ========== Rules ==========

    fn stylesheet(&mut self, id: NodeId, sheet: &mut CascadingStyleSheet) -> Result<()> {
        let tree = self.tree;
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::Root => self.stylesheet(child, sheet)?,
                NodeKind::ImportRule => sheet.add_import_rule(self.import_rule(child)?),
                NodeKind::NamespaceRule => sheet.add_namespace_rule(self.namespace_rule(child)),
                _ => {
                    if let Some(rule) = self.nested_rule(child)? {
                        sheet.add_rule(rule);
                    }
                }
            }
        }
        Ok(())
    }

    /// A rule inside a rule list. Charsets and skipped regions produce nothing.
    fn nested_rule(&mut self, id: NodeId) -> Result<Option<TopLevelRule>> {
        let rule: TopLevelRule = match self.tree.kind(id) {
            NodeKind::Charset | NodeKind::ErrorSkipTo => return Ok(None),
            NodeKind::StyleRule => match self.style_rule(id)? {
                Some(rule) => rule.into(),
                None => return Ok(None),
            },
            NodeKind::MediaRule => self.media_rule(id)?.into(),
            NodeKind::PageRule => self.page_rule(id)?.into(),
            NodeKind::FontFaceRule => {
                let mut rule = FontFaceRule::new(self.tree.text(id));
                self.block_declarations(id, rule.declarations_mut())?;
                self.locate(rule, id).into()
            }
            NodeKind::ViewportRule => {
                let mut rule = ViewportRule::new(self.tree.text(id));
                self.block_declarations(id, rule.declarations_mut())?;
                self.locate(rule, id).into()
            }
            NodeKind::KeyframesRule => self.keyframes_rule(id)?.into(),
            NodeKind::SupportsRule => self.supports_rule(id)?.into(),
            NodeKind::LayerRule => self.layer_rule(id)?.into(),
            NodeKind::UnknownRule => self.unknown_rule(id).into(),
            _ => {
                self.unknown_node(id)?;
                return Ok(None);
            }
        };
        Ok(Some(rule))
    }

    /// Every rule among the children of `id`, flattening nested `ROOT`s.
    fn rule_list(&mut self, id: NodeId, out: &mut Vec<TopLevelRule>) -> Result<()> {
        let tree = self.tree;
        for &child in tree.children(id) {
            self.rule_list_member(child, out)?;
        }
        Ok(())
    }

    fn rule_list_member(&mut self, id: NodeId, out: &mut Vec<TopLevelRule>) -> Result<()> {
        if self.tree.kind(id) == NodeKind::Root {
            return self.rule_list(id, out);
        }
        if let Some(rule) = self.nested_rule(id)? {
            out.push(rule);
        }
        Ok(())
    }

    fn style_rule(&mut self, id: NodeId) -> Result<Option<StyleRule>> {
        let tree = self.tree;
        let mut rule = StyleRule::new();
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::Selector => rule.add_selector(self.selector(child)?),
                NodeKind::StyleDeclarationList => self.declarations(child, rule.declarations_mut())?,
                NodeKind::ErrorSkipTo => {}
                _ => self.unknown_node(child)?,
            }
        }
        if !rule.selectors().has_any() {
            tracing::debug!("dropping style rule without selectors");
            return Ok(None);
        }
        Ok(Some(self.locate(rule, id)))
    }

    fn import_rule(&mut self, id: NodeId) -> Result<ImportRule> {
        let Some(url) = self.tree.find_child(id, NodeKind::Url) else {
            self.malformed("@import without a URL".to_string())?;
            return Ok(self.locate(ImportRule::new(CssUri::new("")), id));
        };
        let mut rule = ImportRule::new(self.locate(CssUri::new(self.tree.text(url)), url));
        if let Some(list) = self.tree.find_child(id, NodeKind::MediaList) {
            for query in self.media_list(list)? {
                rule.add_media_query(query);
            }
        }
        Ok(self.locate(rule, id))
    }

    fn namespace_rule(&self, id: NodeId) -> NamespaceRule {
        let prefix = self.child_text(id, NodeKind::NamespaceRulePrefix).map(str::to_string);
        let url = self.child_text(id, NodeKind::NamespaceRuleUrl).unwrap_or_default();
        self.locate(NamespaceRule::new(prefix, url), id)
    }

    fn media_rule(&mut self, id: NodeId) -> Result<MediaRule> {
        let tree = self.tree;
        let mut rule = MediaRule::new();
        let mut rules = Vec::new();
        for &child in tree.children(id) {
            if tree.kind(child) == NodeKind::MediaList {
                for query in self.media_list(child)? {
                    rule.add_media_query(query);
                }
            } else {
                self.rule_list_member(child, &mut rules)?;
            }
        }
        for nested in rules {
            rule.add_rule(nested);
        }
        Ok(self.locate(rule, id))
    }

    fn page_rule(&mut self, id: NodeId) -> Result<PageRule> {
        let tree = self.tree;
        let selectors = tree
            .children(id)
            .iter()
            .filter(|&&child| tree.kind(child) == NodeKind::PageSelector)
            .map(|&child| tree.text(child));
        let mut rule = PageRule::with_selectors(selectors);

        let Some(block) = tree.find_child(id, NodeKind::PageRuleBlock) else {
            return Ok(self.locate(rule, id));
        };
        let mut margin: Option<PageMarginBlock> = None;
        for &child in tree.children(block) {
            match tree.kind(child) {
                NodeKind::StyleDeclaration => {
                    if let Some(declaration) = self.declaration(child)? {
                        rule.add_member(declaration);
                    }
                }
                NodeKind::PageMarginSymbol => {
                    margin = Some(self.locate(PageMarginBlock::new(tree.text(child)), child));
                }
                NodeKind::StyleDeclarationList => match margin.take() {
                    Some(mut margin_block) => {
                        self.declarations(child, margin_block.declarations_mut())?;
                        rule.add_member(margin_block);
                    }
                    None => self.malformed("declaration block without page margin symbol".to_string())?,
                },
                NodeKind::ErrorSkipTo => {}
                _ => self.unknown_node(child)?,
            }
        }
        Ok(self.locate(rule, id))
    }

    fn keyframes_rule(&mut self, id: NodeId) -> Result<KeyframesRule> {
        let tree = self.tree;
        let name = self.child_text(id, NodeKind::KeyframesIdentifier).unwrap_or_default();
        let mut rule = KeyframesRule::new(tree.text(id), name);

        let mut pending: Option<KeyframesBlock> = None;
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::KeyframesIdentifier | NodeKind::ErrorSkipTo => {}
                NodeKind::KeyframesSelector => {
                    let selectors = tree.children(child).iter().map(|&single| tree.text(single));
                    pending = Some(self.locate(KeyframesBlock::new(selectors), child));
                }
                NodeKind::StyleDeclarationList => match pending.take() {
                    Some(mut block) => {
                        self.declarations(child, block.declarations_mut())?;
                        rule.add_block(block);
                    }
                    None => self.malformed("keyframes block without selector".to_string())?,
                },
                _ => self.unknown_node(child)?,
            }
        }
        Ok(self.locate(rule, id))
    }

    fn supports_rule(&mut self, id: NodeId) -> Result<SupportsRule> {
        let tree = self.tree;
        let mut rule = SupportsRule::new();
        let mut rules = Vec::new();
        for &child in tree.children(id) {
            if tree.kind(child) == NodeKind::SupportsCondition {
                for member in self.supports_condition(child)? {
                    rule.add_condition_member(member);
                }
            } else {
                self.rule_list_member(child, &mut rules)?;
            }
        }
        for nested in rules {
            rule.add_rule(nested);
        }
        Ok(self.locate(rule, id))
    }

    fn supports_condition(&mut self, id: NodeId) -> Result<Vec<SupportsConditionMember>> {
        let tree = self.tree;
        let mut members = Vec::new();
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::SupportsNegation => {
                    let inner = match tree.first_child(child) {
                        Some(in_parens) => self.supports_in_parens(in_parens)?,
                        None => None,
                    };
                    match inner {
                        Some(inner) => members.push(SupportsConditionMember::Negation(Box::new(inner))),
                        None => self.malformed("'not' without a condition".to_string())?,
                    }
                }
                NodeKind::SupportsConditionInParens => {
                    if let Some(member) = self.supports_in_parens(child)? {
                        members.push(member);
                    }
                }
                NodeKind::SupportsConditionOperator => {
                    match SupportsConditionOperator::from_str(tree.text(child)) {
                        Ok(operator) => members.push(operator.into()),
                        Err(_) => self.malformed(format!("unknown @supports operator '{}'", tree.text(child)))?,
                    }
                }
                _ => self.unknown_node(child)?,
            }
        }
        Ok(members)
    }

    fn supports_in_parens(&mut self, id: NodeId) -> Result<Option<SupportsConditionMember>> {
        let Some(inner) = self.tree.first_child(id) else {
            self.malformed("empty @supports condition".to_string())?;
            return Ok(None);
        };
        match self.tree.kind(inner) {
            NodeKind::StyleDeclaration => Ok(self.declaration(inner)?.map(SupportsConditionMember::from)),
            NodeKind::SupportsCondition => {
                let members = self.supports_condition(inner)?;
                Ok(Some(SupportsConditionMember::Nested(CssList::from(members))))
            }
            _ => {
                self.unknown_node(inner)?;
                Ok(None)
            }
        }
    }

    fn layer_rule(&mut self, id: NodeId) -> Result<LayerRule> {
        let tree = self.tree;
        let names: Vec<&str> = tree
            .children(id)
            .iter()
            .filter(|&&child| tree.kind(child) == NodeKind::LayerName)
            .map(|&child| tree.text(child))
            .collect();

        let Some(block) = tree.find_child(id, NodeKind::LayerRuleBlock) else {
            return Ok(self.locate(LayerRule::statement(names), id));
        };
        let mut rule = LayerRule::block(names.first().map(|name| (*name).to_string()));
        let mut rules = Vec::new();
        self.rule_list(block, &mut rules)?;
        for nested in rules {
            rule.add_rule(nested);
        }
        Ok(self.locate(rule, id))
    }

    fn unknown_rule(&self, id: NodeId) -> UnknownRule {
        let mut rule = UnknownRule::new(self.tree.text(id));
        if let Some(parameters) = self.child_text(id, NodeKind::UnknownRuleParameterList) {
            rule.set_parameter_list(parameters);
        }
        rule.set_body(self.child_text(id, NodeKind::UnknownRuleBody).map(str::to_string));
        self.locate(rule, id)
    }

    // ========== Declarations ==========

    /// The declarations of the `STYLEDECLARATIONLIST` child of `id`.
    fn block_declarations(&mut self, id: NodeId, container: &mut DeclarationContainer) -> Result<()> {
        match self.tree.find_child(id, NodeKind::StyleDeclarationList) {
            Some(list) => self.declarations(list, container),
            None => {
                let message = format!("{} without a declaration block", self.tree.text(id));
                self.malformed(message)
            }
        }
    }

    fn declarations(&mut self, id: NodeId, container: &mut DeclarationContainer) -> Result<()> {
        let tree = self.tree;
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::StyleDeclaration => {
                    if let Some(declaration) = self.declaration(child)? {
                        container.add(declaration);
                    }
                }
                NodeKind::ErrorSkipTo => {}
                _ => self.unknown_node(child)?,
            }
        }
        Ok(())
    }

    fn declaration(&mut self, id: NodeId) -> Result<Option<Declaration>> {
        let Some(property) = self.child_text(id, NodeKind::Property) else {
            self.malformed("declaration without a property".to_string())?;
            return Ok(None);
        };
        let expression = match self.tree.find_child(id, NodeKind::Expr) {
            Some(expr) => self.expression(expr)?,
            None => Expression::new(),
        };
        if !expression.members().has_any() && !property.starts_with("--") {
            tracing::warn!(property, "dropping declaration without a value");
            return Ok(None);
        }
        let important = self.tree.find_child(id, NodeKind::Important).is_some();
        Ok(Some(self.locate(Declaration::new(property, expression, important), id)))
    }

    // ========== Values ==========

    fn expression(&mut self, id: NodeId) -> Result<Expression> {
        let tree = self.tree;
        let mut expression = Expression::new();
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::ExprTerm => {
                    if let Some(member) = self.term(child)? {
                        expression.add_member(member);
                    }
                }
                NodeKind::ExprOperator => match ExpressionOperator::from_str(tree.text(child)) {
                    Ok(operator) => expression.add_operator(operator),
                    Err(_) => self.malformed(format!("unknown expression operator '{}'", tree.text(child)))?,
                },
                _ => self.unknown_node(child)?,
            }
        }
        Ok(self.locate(expression, id))
    }

    fn term(&mut self, id: NodeId) -> Result<Option<ExpressionMember>> {
        let tree = self.tree;
        if tree.has_text(id) {
            return Ok(Some(self.locate(TermSimple::new(tree.text(id)), id).into()));
        }
        let Some(inner) = tree.first_child(id) else {
            self.malformed("empty expression term".to_string())?;
            return Ok(None);
        };
        let member = match tree.kind(inner) {
            NodeKind::Url => self.locate(CssUri::new(tree.text(inner)), inner).into(),
            NodeKind::Function => self.function(inner)?.into(),
            NodeKind::Calc => self.calc(inner)?.into(),
            _ => {
                self.unknown_node(inner)?;
                return Ok(None);
            }
        };
        Ok(Some(member))
    }

    fn function(&mut self, id: NodeId) -> Result<FunctionTerm> {
        let arguments = match self.tree.find_child(id, NodeKind::Expr) {
            Some(expr) => Some(self.expression(expr)?),
            None => None,
        };
        Ok(self.locate(FunctionTerm::new(self.tree.text(id), arguments), id))
    }

    fn calc(&mut self, id: NodeId) -> Result<MathExpression> {
        let mut math = MathExpression::new();
        for member in self.calc_sum(id)? {
            math.add_member(member);
        }
        Ok(self.locate(math, id))
    }

    /// The units and operators of the products and sum operators below `id`.
    fn calc_sum(&mut self, id: NodeId) -> Result<Vec<MathMember>> {
        let tree = self.tree;
        let mut members = Vec::new();
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::CalcProduct => {
                    for &part in tree.children(child) {
                        match tree.kind(part) {
                            NodeKind::CalcUnit => {
                                if let Some(unit) = self.calc_unit(part)? {
                                    members.push(unit);
                                }
                            }
                            NodeKind::CalcProductOperator => {
                                if let Some(operator) = self.math_operator(part)? {
                                    members.push(operator);
                                }
                            }
                            _ => self.unknown_node(part)?,
                        }
                    }
                }
                NodeKind::CalcSumOperator => {
                    if let Some(operator) = self.math_operator(child)? {
                        members.push(operator);
                    }
                }
                _ => self.unknown_node(child)?,
            }
        }
        Ok(members)
    }

    fn calc_unit(&mut self, id: NodeId) -> Result<Option<MathMember>> {
        let tree = self.tree;
        if tree.has_text(id) {
            return Ok(Some(self.locate(MathUnitSimple::new(tree.text(id)), id).into()));
        }
        match tree.first_child(id).map(|inner| (inner, tree.kind(inner))) {
            Some((inner, NodeKind::Function)) => Ok(Some(MathMember::Function(self.function(inner)?))),
            Some((inner, NodeKind::Calc)) => Ok(Some(MathMember::Math(self.calc(inner)?))),
            Some(_) => {
                // A parenthesised sum.
                let mut product = MathProduct::new();
                for member in self.calc_sum(id)? {
                    product.add_member(member);
                }
                Ok(Some(MathMember::UnitProduct(self.locate(product, id))))
            }
            None => {
                self.malformed("empty calc() value".to_string())?;
                Ok(None)
            }
        }
    }

    fn math_operator(&mut self, id: NodeId) -> Result<Option<MathMember>> {
        let text = self.tree.text(id);
        match MathOperator::from_str(text) {
            Ok(operator) => Ok(Some(operator.into())),
            Err(_) => {
                self.malformed(format!("unknown calc() operator '{text}'"))?;
                Ok(None)
            }
        }
    }

    // ========== Selectors ==========

    fn selector(&mut self, id: NodeId) -> Result<Selector> {
        let tree = self.tree;
        let mut selector = Selector::new();
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::NamespacePrefix | NodeKind::ElementName | NodeKind::Hash | NodeKind::Class => {
                    selector.add_member(self.locate(SimpleSelectorMember::new(tree.text(child)), child));
                }
                NodeKind::Pseudo => self.pseudo(child, &mut selector)?,
                NodeKind::Negation => {
                    let nested = SelectorNested::not(self.nested_selectors(child)?);
                    selector.add_member(self.locate(nested, child));
                }
                NodeKind::Attrib => selector.add_member(self.attribute(child)?),
                NodeKind::SelectorCombinator => match SelectorCombinator::from_str(tree.text(child)) {
                    Ok(combinator) => selector.add_member(combinator),
                    Err(_) => self.malformed(format!("unknown combinator '{}'", tree.text(child)))?,
                },
                _ => self.unknown_node(child)?,
            }
        }
        Ok(self.locate(selector, id))
    }

    fn pseudo(&mut self, id: NodeId, selector: &mut Selector) -> Result<()> {
        let tree = self.tree;
        let name = tree.text(id);
        if let Some(argument) = self.child_text(id, NodeKind::Nth) {
            selector.add_member(self.locate(SelectorFunctionLike::new(name, argument), id));
        } else if tree.find_child(id, NodeKind::Selector).is_some() {
            let nested = SelectorNested::new(name, self.nested_selectors(id)?);
            selector.add_member(self.locate(nested, id));
        } else {
            selector.add_member(self.locate(SimpleSelectorMember::new(name), id));
        }
        Ok(())
    }

    fn nested_selectors(&mut self, id: NodeId) -> Result<Vec<Selector>> {
        let tree = self.tree;
        let mut selectors = Vec::new();
        for &child in tree.children(id) {
            if tree.kind(child) == NodeKind::Selector {
                selectors.push(self.selector(child)?);
            } else {
                self.unknown_node(child)?;
            }
        }
        Ok(selectors)
    }

    fn attribute(&mut self, id: NodeId) -> Result<SelectorAttribute> {
        let prefix = self.child_text(id, NodeKind::NamespacePrefix).map(str::to_string);
        let name = self.tree.text(id);
        let Some(operator) = self.child_text(id, NodeKind::AttribOperator) else {
            return Ok(self.locate(SelectorAttribute::new(prefix, name), id));
        };
        let Ok(operator) = AttributeOperator::from_str(operator) else {
            self.malformed(format!("unknown attribute operator '{operator}'"))?;
            return Ok(self.locate(SelectorAttribute::new(prefix, name), id));
        };
        let value = self.child_text(id, NodeKind::AttribValue).unwrap_or_default();
        let case = self
            .child_text(id, NodeKind::AttribCase)
            .and_then(|flag| AttributeCase::from_str(flag).ok());
        let attribute = SelectorAttribute::with_value(prefix, name, operator, value).with_case(case);
        Ok(self.locate(attribute, id))
    }

    // ========== Media ==========

    fn media_list(&mut self, id: NodeId) -> Result<Vec<MediaQuery>> {
        let tree = self.tree;
        let mut queries = Vec::new();
        for &child in tree.children(id) {
            if tree.kind(child) == NodeKind::MediaQuery {
                queries.push(self.media_query(child)?);
            } else {
                self.unknown_node(child)?;
            }
        }
        Ok(queries)
    }

    fn media_query(&mut self, id: NodeId) -> Result<MediaQuery> {
        let tree = self.tree;
        let modifier = match self.child_text(id, NodeKind::MediaModifier) {
            None => MediaQueryModifier::None,
            Some(text) if text.eq_ignore_ascii_case("not") => MediaQueryModifier::Not,
            Some(text) if text.eq_ignore_ascii_case("only") => MediaQueryModifier::Only,
            Some(text) => {
                self.malformed(format!("unknown media query modifier '{text}'"))?;
                MediaQueryModifier::None
            }
        };
        let medium = self.child_text(id, NodeKind::Medium).map(str::to_string);
        if let Some(name) = medium.as_deref().filter(|name| Medium::from_name(name).is_none()) {
            self.interpret_error(&format!("unknown medium '{name}'"));
        }

        let mut query = MediaQuery::new(modifier, medium);
        for &child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::MediaModifier | NodeKind::Medium => {}
                NodeKind::MediaExpr => query.add_expression(self.media_expression(child)?),
                _ => self.unknown_node(child)?,
            }
        }
        Ok(self.locate(query, id))
    }

    fn media_expression(&mut self, id: NodeId) -> Result<MediaExpression> {
        let feature = self.child_text(id, NodeKind::MediaFeature).unwrap_or_default();
        if MediaExpressionFeature::from_name(feature).is_none() {
            self.interpret_error(&format!("unknown media feature '{feature}'"));
        }
        let value = match self.tree.find_child(id, NodeKind::Expr) {
            Some(expr) => Some(self.expression(expr)?),
            None => None,
        };
        Ok(self.locate(MediaExpression::new(feature, value), id))
    }
}
