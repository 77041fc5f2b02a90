//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) productions.
//!
//! Every simple selector keeps its source text in the node, so the domain
//! model can write it back byte for byte.

use quill_tree::{NodeId, NodeKind};

use super::css_parser::CSSParser;
use super::issue::PResult;
use crate::tokenizer::CSSToken;

impl CSSParser {
    /// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#structure)
    ///
    /// "A complex selector is a sequence of one or more compound selectors
    /// separated by combinators."
    pub(super) fn selector(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let selector = self.tree.alloc(NodeKind::Selector, None, None);

        loop {
            if !self.compound_selector(selector)? {
                return Err(self.unexpected("a selector"));
            }

            let had_ws = self.skip_ws();
            let combinator = match &self.peek().kind {
                CSSToken::Delim(c @ ('>' | '+' | '~')) => Some(c.to_string()),
                CSSToken::Comma | CSSToken::LeftBrace | CSSToken::RightParen | CSSToken::EOF => None,
                _ if had_ws => Some(" ".to_string()),
                _ => return Err(self.unexpected("a combinator, ',' or '{'")),
            };
            let Some(combinator) = combinator else {
                break;
            };

            let token_area = self.peek().area;
            if combinator != " " {
                let _ = self.bump();
                let _ = self.skip_ws();
            }
            let _ = self.tree.append_new(selector, NodeKind::SelectorCombinator, Some(combinator), Some(token_area));
        }

        let area = self.area_from(begin);
        self.tree.set_area(selector, area);
        Ok(selector)
    }

    /// [§ 3.1](https://www.w3.org/TR/selectors-4/#structure)
    ///
    /// "A compound selector is a sequence of simple selectors that are not
    /// separated by a combinator."
    ///
    /// Members are appended to `selector`. Returns `false` if nothing matched.
    fn compound_selector(&mut self, selector: NodeId) -> PResult<bool> {
        let mut matched = self.type_selector(selector);

        loop {
            let token = self.peek().clone();
            match &token.kind {
                CSSToken::Hash { .. } => {
                    let _ = self.bump();
                    let _ = self.tree.append_new(selector, NodeKind::Hash, Some(token.text), Some(token.area));
                }
                CSSToken::Delim('.') => {
                    let _ = self.bump();
                    let name = self.expect(|k| matches!(k, CSSToken::Ident(_)), "a class name after '.'")?;
                    let area = self.area_from(token.location());
                    let _ = self
                        .tree
                        .append_new(selector, NodeKind::Class, Some(format!(".{}", name.text)), area);
                }
                CSSToken::LeftBracket => {
                    let attrib = self.traced("attribute-selector", Self::attribute_selector)?;
                    self.tree.append_child(selector, attrib);
                }
                CSSToken::Colon => {
                    let pseudo = self.traced("pseudo", Self::pseudo)?;
                    self.tree.append_child(selector, pseudo);
                }
                _ => break,
            }
            matched = true;
        }
        Ok(matched)
    }

    /// `ns|E`, `*|E`, `|E`, `E` or `*`. Returns `true` if anything was consumed.
    fn type_selector(&mut self, selector: NodeId) -> bool {
        let is_name = |k: &CSSToken| matches!(k, CSSToken::Ident(_)) || k.is_delim('*');

        let has_prefix = (is_name(&self.peek().kind) && self.peek_at(1).kind.is_delim('|'))
            || self.peek().kind.is_delim('|');
        if has_prefix && is_name(&self.peek_at(if self.peek().kind.is_delim('|') { 1 } else { 2 }).kind) {
            let begin = self.peek().location();
            let mut prefix = String::new();
            if !self.peek().kind.is_delim('|') {
                prefix.push_str(&self.bump().text);
            }
            prefix.push_str(&self.bump().text);
            let area = self.area_from(begin);
            let _ = self.tree.append_new(selector, NodeKind::NamespacePrefix, Some(prefix), area);
        }

        if is_name(&self.peek().kind) {
            let token = self.bump();
            let _ = self.tree.append_new(selector, NodeKind::ElementName, Some(token.text), Some(token.area));
            return true;
        }
        false
    }

    /// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// `[ns|name op value case]`
    fn attribute_selector(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();

        let prefix = if self.peek_at(1).kind.is_delim('|')
            && matches!(self.peek_at(2).kind, CSSToken::Ident(_))
            && (matches!(self.peek().kind, CSSToken::Ident(_)) || self.peek().kind.is_delim('*'))
        {
            let ns = self.bump();
            let bar = self.bump();
            Some((format!("{}{}", ns.text, bar.text), ns.area))
        } else if self.peek().kind.is_delim('|') && matches!(self.peek_at(1).kind, CSSToken::Ident(_)) {
            let bar = self.bump();
            Some((bar.text, bar.area))
        } else {
            None
        };

        let name = self.expect(|k| matches!(k, CSSToken::Ident(_)), "an attribute name")?;
        let attrib = self.tree.alloc(NodeKind::Attrib, Some(name.text), None);
        if let Some((prefix, area)) = prefix {
            let _ = self.tree.append_new(attrib, NodeKind::NamespacePrefix, Some(prefix), Some(area));
        }
        let _ = self.skip_ws();

        if let Some(operator) = self.attribute_operator() {
            let op_begin = self.peek().location();
            let _ = self.bump();
            if operator != "=" {
                let _ = self.bump();
            }
            let area = self.area_from(op_begin);
            let _ = self.tree.append_new(attrib, NodeKind::AttribOperator, Some(operator.to_string()), area);
            let _ = self.skip_ws();

            let value = self.expect(
                |k| matches!(k, CSSToken::Ident(_) | CSSToken::String(_)),
                "an attribute value",
            )?;
            let _ = self.tree.append_new(attrib, NodeKind::AttribValue, Some(value.text), Some(value.area));
            let _ = self.skip_ws();

            if self.peek().kind.is_ident("i") || self.peek().kind.is_ident("s") {
                let flag = self.bump();
                let _ = self.tree.append_new(
                    attrib,
                    NodeKind::AttribCase,
                    Some(flag.text.to_ascii_lowercase()),
                    Some(flag.area),
                );
                let _ = self.skip_ws();
            }
        }

        let _ = self.expect(|k| matches!(k, CSSToken::RightBracket), "']'")?;
        let area = self.area_from(begin);
        self.tree.set_area(attrib, area);
        Ok(attrib)
    }

    /// The attribute matcher at the current position, without consuming it.
    fn attribute_operator(&self) -> Option<&'static str> {
        let first = &self.peek().kind;
        if first.is_delim('=') {
            return Some("=");
        }
        if !self.peek_at(1).kind.is_delim('=') {
            return None;
        }
        match first {
            CSSToken::Delim('~') => Some("~="),
            CSSToken::Delim('|') => Some("|="),
            CSSToken::Delim('^') => Some("^="),
            CSSToken::Delim('$') => Some("$="),
            CSSToken::Delim('*') => Some("*="),
            _ => None,
        }
    }

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// and [pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements).
    ///
    /// `:not(...)` becomes a `NEGATION` with nested selectors, and `:is(...)`
    /// style pseudo-classes a `PSEUDO` with nested selectors. Any other
    /// functional pseudo-class keeps its argument text in an `NTH` child.
    fn pseudo(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let mut prefix = String::from(":");
        if matches!(self.peek().kind, CSSToken::Colon) {
            let _ = self.bump();
            prefix.push(':');
        }

        let token = self.peek().clone();
        match &token.kind {
            CSSToken::Ident(_) => {
                let _ = self.bump();
                let area = self.area_from(begin);
                Ok(self.tree.alloc(NodeKind::Pseudo, Some(format!("{prefix}{}", token.text)), area))
            }
            CSSToken::Function(name) if prefix == ":" && name.eq_ignore_ascii_case("not") => {
                let _ = self.bump();
                let negation = self.tree.alloc(NodeKind::Negation, None, None);
                self.nested_selectors(negation, &token.text)?;
                let area = self.area_from(begin);
                self.tree.set_area(negation, area);
                Ok(negation)
            }
            CSSToken::Function(name) if prefix == ":" && takes_selector_list(name) => {
                let _ = self.bump();
                let pseudo = self.tree.alloc(NodeKind::Pseudo, Some(format!(":{}", token.text)), None);
                self.nested_selectors(pseudo, &token.text)?;
                let area = self.area_from(begin);
                self.tree.set_area(pseudo, area);
                Ok(pseudo)
            }
            CSSToken::Function(_) => {
                let _ = self.bump();
                let pseudo = self.tree.alloc(NodeKind::Pseudo, Some(format!("{prefix}{}", token.text)), None);
                let args_begin = self.peek().location();
                let args = self.raw_until(|k| matches!(k, CSSToken::RightParen));
                let area = self.area_from(args_begin);
                let _ = self.tree.append_new(pseudo, NodeKind::Nth, Some(args.trim().to_string()), area);
                let _ = self.expect(
                    |k| matches!(k, CSSToken::RightParen),
                    &format!("')' to close '{prefix}{}'", token.text),
                )?;
                let area = self.area_from(begin);
                self.tree.set_area(pseudo, area);
                Ok(pseudo)
            }
            _ => Err(self.unexpected("a pseudo-class name after ':'")),
        }
    }

    /// A comma separated selector list up to and including the closing `)`.
    fn nested_selectors(&mut self, parent: NodeId, opener: &str) -> PResult<()> {
        loop {
            let _ = self.skip_ws();
            let inner = self.traced("selector", Self::selector)?;
            self.tree.append_child(parent, inner);
            let _ = self.skip_ws();
            if self.eat(|k| matches!(k, CSSToken::Comma)).is_none() {
                break;
            }
        }
        let _ = self.expect(|k| matches!(k, CSSToken::RightParen), &format!("')' to close ':{opener}'"))?;
        Ok(())
    }
}

/// Functional pseudo-classes whose argument is a selector list.
fn takes_selector_list(name: &str) -> bool {
    ["is", "where", "matches", "-webkit-any", "-moz-any"]
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}
