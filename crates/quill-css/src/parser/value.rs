//! Value productions: expressions, terms, functions and `calc()`.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use quill_tree::{NodeId, NodeKind};

use super::css_parser::CSSParser;
use super::issue::PResult;
use crate::tokenizer::{CSSToken, Token};
use crate::utils::{extract_string_value, unescape_url};

impl CSSParser {
    /// A space, `/`, `,` or `=` separated sequence of terms.
    pub(super) fn expr(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let expr = self.tree.alloc(NodeKind::Expr, None, None);

        let first = self.term()?;
        self.tree.append_child(expr, first);
        loop {
            let _ = self.skip_ws();
            let token = self.peek().clone();
            match &token.kind {
                CSSToken::Delim('/' | '=') | CSSToken::Comma => {
                    let _ = self.bump();
                    let _ = self.tree.append_new(expr, NodeKind::ExprOperator, Some(token.text), Some(token.area));
                    let _ = self.skip_ws();
                }
                kind if Self::ends_expr(kind) => break,
                _ => {}
            }
            let term = self.term()?;
            self.tree.append_child(expr, term);
        }

        let area = self.area_from(begin);
        self.tree.set_area(expr, area);
        Ok(expr)
    }

    /// Tokens that end an expression.
    const fn ends_expr(kind: &CSSToken) -> bool {
        matches!(
            kind,
            CSSToken::Semicolon
                | CSSToken::RightBrace
                | CSSToken::LeftBrace
                | CSSToken::RightParen
                | CSSToken::RightBracket
                | CSSToken::Delim('!')
                | CSSToken::EOF
        )
    }

    /// A single value: plain text, `url()`, a function or `calc()`.
    fn term(&mut self) -> PResult<NodeId> {
        let token = self.peek().clone();
        let term = self.tree.alloc(NodeKind::ExprTerm, None, Some(token.area));
        match &token.kind {
            CSSToken::Ident(_)
            | CSSToken::String(_)
            | CSSToken::Hash { .. }
            | CSSToken::Number { .. }
            | CSSToken::Percentage { .. }
            | CSSToken::Dimension { .. }
            | CSSToken::UnicodeRange { .. } => {
                let _ = self.bump();
                self.tree.set_text(term, token.text);
            }
            CSSToken::Url(_) => {
                let _ = self.bump();
                let url = unescape_url(raw_url_content(&token.text));
                let _ = self.tree.append_new(term, NodeKind::Url, Some(url), Some(token.area));
            }
            CSSToken::Function(name) if name.eq_ignore_ascii_case("url") => {
                let url = self.quoted_url()?;
                self.tree.append_child(term, url);
            }
            CSSToken::Function(name) if name.eq_ignore_ascii_case("calc") => {
                let calc = self.traced("calc", Self::calc)?;
                self.tree.append_child(term, calc);
            }
            CSSToken::Function(_) => {
                let function = self.traced("function", Self::function)?;
                self.tree.append_child(term, function);
            }
            // Grid line names: `[first-line]`
            CSSToken::LeftBracket => {
                let begin = self.bump().location();
                let inner = self.raw_until(|k| matches!(k, CSSToken::RightBracket));
                let _ = self.expect(|k| matches!(k, CSSToken::RightBracket), "']'")?;
                self.tree.set_text(term, format!("[{}]", inner.trim()));
                let area = self.area_from(begin);
                self.tree.set_area(term, area);
            }
            _ => return Err(self.unexpected("a value")),
        }
        Ok(term)
    }

    /// `url("...")` with a quoted argument, which tokenizes as a function.
    pub(super) fn quoted_url(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let value = self.expect(|k| matches!(k, CSSToken::String(_)), "a quoted URL")?;
        let _ = self.skip_ws();
        let _ = self.expect(|k| matches!(k, CSSToken::RightParen), "')' to close 'url('")?;
        let area = self.area_from(begin);
        Ok(self.tree.alloc(NodeKind::Url, Some(url_text(&value)), area))
    }

    /// `name(args)`; the node text is the function name as written.
    fn function(&mut self) -> PResult<NodeId> {
        let token = self.bump();
        let name = token.text.strip_suffix('(').unwrap_or(&token.text).to_string();
        let function = self.tree.alloc(NodeKind::Function, Some(name.clone()), None);
        let _ = self.skip_ws();
        if !matches!(self.peek().kind, CSSToken::RightParen) {
            let args = self.traced("expression", Self::expr)?;
            self.tree.append_child(function, args);
            let _ = self.skip_ws();
        }
        let _ = self.expect(
            |k| matches!(k, CSSToken::RightParen),
            &format!("')' to close function '{name}'"),
        )?;
        let area = self.area_from(token.location());
        self.tree.set_area(function, area);
        Ok(function)
    }

    /// [§ 10.1 Basic Arithmetic: calc()](https://www.w3.org/TR/css-values-4/#calc-func)
    ///
    /// `calc( <calc-sum> )`
    fn calc(&mut self) -> PResult<NodeId> {
        let token = self.bump();
        let calc = self.tree.alloc(NodeKind::Calc, None, None);
        let _ = self.skip_ws();
        self.calc_sum(calc)?;
        let _ = self.skip_ws();
        let _ = self.expect(|k| matches!(k, CSSToken::RightParen), "')' to close 'calc('")?;
        let area = self.area_from(token.location());
        self.tree.set_area(calc, area);
        Ok(calc)
    }

    /// "`<calc-sum> = <calc-product> [ [ '+' | '-' ] <calc-product> ]*`"
    ///
    /// Products and operators are appended to `parent`.
    fn calc_sum(&mut self, parent: NodeId) -> PResult<()> {
        loop {
            let product = self.calc_product()?;
            self.tree.append_child(parent, product);
            let _ = self.skip_ws();
            let token = self.peek().clone();
            if token.kind.is_delim('+') || token.kind.is_delim('-') {
                let _ = self.bump();
                let _ = self.tree.append_new(parent, NodeKind::CalcSumOperator, Some(token.text), Some(token.area));
                let _ = self.skip_ws();
            } else {
                return Ok(());
            }
        }
    }

    /// "`<calc-product> = <calc-value> [ [ '*' | '/' ] <calc-value> ]*`"
    fn calc_product(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let product = self.tree.alloc(NodeKind::CalcProduct, None, None);
        loop {
            let unit = self.calc_value()?;
            self.tree.append_child(product, unit);
            let _ = self.skip_ws();
            let token = self.peek().clone();
            if token.kind.is_delim('*') || token.kind.is_delim('/') {
                let _ = self.bump();
                let _ = self
                    .tree
                    .append_new(product, NodeKind::CalcProductOperator, Some(token.text), Some(token.area));
                let _ = self.skip_ws();
            } else {
                break;
            }
        }
        let area = self.area_from(begin);
        self.tree.set_area(product, area);
        Ok(product)
    }

    /// "`<calc-value> = <number> | <dimension> | <percentage> | ( <calc-sum> )`"
    ///
    /// Functions such as `var()` and nested `calc()` are accepted as values.
    fn calc_value(&mut self) -> PResult<NodeId> {
        let token = self.peek().clone();
        let unit = self.tree.alloc(NodeKind::CalcUnit, None, Some(token.area));
        match &token.kind {
            CSSToken::Number { .. }
            | CSSToken::Percentage { .. }
            | CSSToken::Dimension { .. }
            | CSSToken::Ident(_) => {
                let _ = self.bump();
                self.tree.set_text(unit, token.text);
            }
            CSSToken::Function(name) if name.eq_ignore_ascii_case("calc") => {
                let calc = self.traced("calc", Self::calc)?;
                self.tree.append_child(unit, calc);
            }
            CSSToken::Function(_) => {
                let function = self.traced("function", Self::function)?;
                self.tree.append_child(unit, function);
            }
            CSSToken::LeftParen => {
                let _ = self.bump();
                let _ = self.skip_ws();
                self.calc_sum(unit)?;
                let _ = self.skip_ws();
                let _ = self.expect(|k| matches!(k, CSSToken::RightParen), "')' in calc()")?;
                let area = self.area_from(token.location());
                self.tree.set_area(unit, area);
            }
            _ => return Err(self.unexpected("a value in calc()")),
        }
        Ok(unit)
    }
}

/// The text between `url(` and `)` of an unquoted URL token, escapes intact.
pub(super) fn raw_url_content(text: &str) -> &str {
    let inner = text.get(4..).unwrap_or("");
    inner.strip_suffix(')').unwrap_or(inner).trim()
}

/// The resolved URL of a string token: quotes stripped, escapes resolved.
pub(super) fn url_text(token: &Token) -> String {
    unescape_url(extract_string_value(&token.text))
}
