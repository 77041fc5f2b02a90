//! Depth-first traversal of the domain model.
//!
//! Implement [`CssVisitor`] and override the callbacks you need; every
//! callback defaults to doing nothing. Rules are visited in document
//! order, nested rules between their `begin_*` and `end_*` callbacks.

use super::block_rule::{FontFaceRule, ViewportRule};
use super::container::DeclarationContainer;
use super::declaration::Declaration;
use super::expression::{CssUri, Expression, ExpressionMember};
use super::import_rule::{ImportRule, NamespaceRule};
use super::keyframes_rule::{KeyframesBlock, KeyframesRule};
use super::layer_rule::LayerRule;
use super::media_rule::MediaRule;
use super::page_rule::{PageMarginBlock, PageMember, PageRule};
use super::rule::TopLevelRule;
use super::selector::Selector;
use super::style_rule::StyleRule;
use super::stylesheet::CascadingStyleSheet;
use super::supports_rule::SupportsRule;
use super::unknown_rule::UnknownRule;

/// Callbacks invoked by [`visit_stylesheet`].
#[allow(unused_variables)]
pub trait CssVisitor {
    /// Before anything else.
    fn begin_visit(&mut self) {}
    /// After everything else.
    fn end_visit(&mut self) {}

    /// An `@import` rule.
    fn on_import(&mut self, rule: &ImportRule) {}
    /// An `@namespace` rule.
    fn on_namespace(&mut self, rule: &NamespaceRule) {}
    /// A declaration inside any block.
    fn on_declaration(&mut self, declaration: &Declaration) {}

    /// Entering a style rule.
    fn begin_style_rule(&mut self, rule: &StyleRule) {}
    /// One selector of the current style rule.
    fn on_style_rule_selector(&mut self, selector: &Selector) {}
    /// Leaving a style rule.
    fn end_style_rule(&mut self, rule: &StyleRule) {}

    /// Entering `@page`.
    fn begin_page_rule(&mut self, rule: &PageRule) {}
    /// Entering a page margin block.
    fn begin_page_margin_block(&mut self, block: &PageMarginBlock) {}
    /// Leaving a page margin block.
    fn end_page_margin_block(&mut self, block: &PageMarginBlock) {}
    /// Leaving `@page`.
    fn end_page_rule(&mut self, rule: &PageRule) {}

    /// Entering `@font-face`.
    fn begin_font_face_rule(&mut self, rule: &FontFaceRule) {}
    /// Leaving `@font-face`.
    fn end_font_face_rule(&mut self, rule: &FontFaceRule) {}

    /// Entering `@media`.
    fn begin_media_rule(&mut self, rule: &MediaRule) {}
    /// Leaving `@media`.
    fn end_media_rule(&mut self, rule: &MediaRule) {}

    /// Entering `@keyframes`.
    fn begin_keyframes_rule(&mut self, rule: &KeyframesRule) {}
    /// Entering one keyframe block.
    fn begin_keyframes_block(&mut self, block: &KeyframesBlock) {}
    /// Leaving one keyframe block.
    fn end_keyframes_block(&mut self, block: &KeyframesBlock) {}
    /// Leaving `@keyframes`.
    fn end_keyframes_rule(&mut self, rule: &KeyframesRule) {}

    /// Entering `@viewport`.
    fn begin_viewport_rule(&mut self, rule: &ViewportRule) {}
    /// Leaving `@viewport`.
    fn end_viewport_rule(&mut self, rule: &ViewportRule) {}

    /// Entering `@supports`.
    fn begin_supports_rule(&mut self, rule: &SupportsRule) {}
    /// Leaving `@supports`.
    fn end_supports_rule(&mut self, rule: &SupportsRule) {}

    /// Entering `@layer`.
    fn begin_layer_rule(&mut self, rule: &LayerRule) {}
    /// Leaving `@layer`.
    fn end_layer_rule(&mut self, rule: &LayerRule) {}

    /// Any other at-rule.
    fn on_unknown_rule(&mut self, rule: &UnknownRule) {}
}

/// Walk `css` in document order.
pub fn visit_stylesheet(css: &CascadingStyleSheet, visitor: &mut impl CssVisitor) {
    visitor.begin_visit();
    for rule in css.import_rules() {
        visitor.on_import(rule);
    }
    for rule in css.namespace_rules() {
        visitor.on_namespace(rule);
    }
    for rule in css.rules() {
        visit_rule(rule, visitor);
    }
    visitor.end_visit();
}

/// Walk a bare declaration list.
pub fn visit_declaration_list(declarations: &DeclarationContainer, visitor: &mut impl CssVisitor) {
    visitor.begin_visit();
    visit_declarations(declarations, visitor);
    visitor.end_visit();
}

fn visit_declarations(declarations: &DeclarationContainer, visitor: &mut impl CssVisitor) {
    for declaration in declarations.iter() {
        visitor.on_declaration(declaration);
    }
}

fn visit_rule(rule: &TopLevelRule, visitor: &mut impl CssVisitor) {
    match rule {
        TopLevelRule::Style(rule) => {
            visitor.begin_style_rule(rule);
            for selector in rule.selectors() {
                visitor.on_style_rule_selector(selector);
            }
            visit_declarations(rule.declarations(), visitor);
            visitor.end_style_rule(rule);
        }
        TopLevelRule::Page(rule) => {
            visitor.begin_page_rule(rule);
            for member in rule.members() {
                match member {
                    PageMember::Declaration(declaration) => visitor.on_declaration(declaration),
                    PageMember::MarginBlock(block) => {
                        visitor.begin_page_margin_block(block);
                        visit_declarations(block.declarations(), visitor);
                        visitor.end_page_margin_block(block);
                    }
                }
            }
            visitor.end_page_rule(rule);
        }
        TopLevelRule::FontFace(rule) => {
            visitor.begin_font_face_rule(rule);
            visit_declarations(rule.declarations(), visitor);
            visitor.end_font_face_rule(rule);
        }
        TopLevelRule::Media(rule) => {
            visitor.begin_media_rule(rule);
            for nested in rule.rules() {
                visit_rule(nested, visitor);
            }
            visitor.end_media_rule(rule);
        }
        TopLevelRule::Keyframes(rule) => {
            visitor.begin_keyframes_rule(rule);
            for block in rule.blocks() {
                visitor.begin_keyframes_block(block);
                visit_declarations(block.declarations(), visitor);
                visitor.end_keyframes_block(block);
            }
            visitor.end_keyframes_rule(rule);
        }
        TopLevelRule::Viewport(rule) => {
            visitor.begin_viewport_rule(rule);
            visit_declarations(rule.declarations(), visitor);
            visitor.end_viewport_rule(rule);
        }
        TopLevelRule::Supports(rule) => {
            visitor.begin_supports_rule(rule);
            for nested in rule.rules() {
                visit_rule(nested, visitor);
            }
            visitor.end_supports_rule(rule);
        }
        TopLevelRule::Layer(rule) => {
            visitor.begin_layer_rule(rule);
            for nested in rule.rules() {
                visit_rule(nested, visitor);
            }
            visitor.end_layer_rule(rule);
        }
        TopLevelRule::Unknown(rule) => visitor.on_unknown_rule(rule),
    }
}

/// Collects every URL referenced by a stylesheet: `@import` targets and
/// `url()` terms in declaration values, including those nested in
/// functions such as `image-set()`.
#[derive(Debug, Default)]
pub struct UrlCollector {
    urls: Vec<String>,
}

impl UrlCollector {
    /// An empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The URLs found so far, in document order.
    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Consume the collector.
    #[must_use]
    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }

    fn collect_expression(&mut self, expression: &Expression) {
        for member in expression.members() {
            match member {
                ExpressionMember::Uri(uri) => self.push(uri),
                ExpressionMember::Function(function) => {
                    if let Some(inner) = function.expression() {
                        self.collect_expression(inner);
                    }
                }
                _ => {}
            }
        }
    }

    fn push(&mut self, uri: &CssUri) {
        self.urls.push(uri.uri().to_string());
    }
}

impl CssVisitor for UrlCollector {
    fn on_import(&mut self, rule: &ImportRule) {
        self.push(rule.location_uri());
    }

    fn on_declaration(&mut self, declaration: &Declaration) {
        self.collect_expression(declaration.expression());
    }
}
