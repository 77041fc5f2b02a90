//! At-rule productions.
//!
//! Known at-rules get a dedicated node shape; anything else becomes an
//! `UNKNOWNRULE` whose prelude and body are kept as raw text.

use quill_common::{CssVersion, SourceLocation};
use quill_tree::{NodeId, NodeKind};

use super::css_parser::CSSParser;
use super::issue::PResult;
use super::value::{raw_url_content, url_text};
use crate::tokenizer::{CSSToken, Token};
use crate::utils::unescape_url;

impl CSSParser {
    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// Dispatches on the at-keyword. Vendor prefixed `@keyframes` and
    /// `@viewport` are accepted.
    pub(super) fn at_rule(&mut self) -> PResult<Option<NodeId>> {
        let CSSToken::AtKeyword(name) = &self.peek().kind else {
            return Err(self.unexpected("an at-rule"));
        };
        let name = name.to_ascii_lowercase();

        match name.as_str() {
            "charset" => Err(self.error("@charset is only allowed at the very start of a stylesheet")),
            "import" => self.traced("import", Self::import_rule).map(Some),
            "namespace" => self.traced("namespace", Self::namespace_rule).map(Some),
            "media" => self.traced("media", Self::media_rule).map(Some),
            "page" => self.traced("page", Self::page_rule).map(Some),
            "font-face" => {
                self.require_css3("@font-face")?;
                self.traced("font-face", |p| p.keyword_block_rule(NodeKind::FontFaceRule))
                    .map(Some)
            }
            "supports" => {
                self.require_css3("@supports")?;
                self.traced("supports", Self::supports_rule).map(Some)
            }
            "layer" => {
                self.require_css3("@layer")?;
                self.traced("layer", Self::layer_rule).map(Some)
            }
            _ if is_vendor_variant(&name, "keyframes") => {
                self.require_css3("@keyframes")?;
                self.traced("keyframes", Self::keyframes_rule).map(Some)
            }
            _ if is_vendor_variant(&name, "viewport") => {
                self.require_css3("@viewport")?;
                self.traced("viewport", |p| p.keyword_block_rule(NodeKind::ViewportRule))
                    .map(Some)
            }
            _ => self.traced("unknown-rule", Self::unknown_rule).map(Some),
        }
    }

    /// Fail for a CSS 3 construct when parsing an older level strictly.
    fn require_css3(&self, construct: &str) -> PResult<()> {
        if self.settings.version.satisfies(CssVersion::Css30) || self.settings.browser_compliant_mode {
            return Ok(());
        }
        Err(self.error(format!(
            "{construct} requires {} but the stylesheet is parsed as {}",
            CssVersion::Css30,
            self.settings.version
        )))
    }

    /// The `offset`-th token after the current one that is not whitespace.
    fn peek_significant(&self, mut offset: usize) -> &Token {
        let mut index = 0;
        loop {
            while self.peek_at(index).kind.is_whitespace() {
                index += 1;
            }
            if offset == 0 || self.peek_at(index).kind.is_eof() {
                return self.peek_at(index);
            }
            offset -= 1;
            index += 1;
        }
    }

    /// A `URL` node from `url(...)`, `url("...")` or a bare string.
    fn url_or_string(&mut self, what: &str) -> PResult<NodeId> {
        let token = self.peek().clone();
        match &token.kind {
            CSSToken::Url(_) => {
                let _ = self.bump();
                let url = unescape_url(raw_url_content(&token.text));
                Ok(self.tree.alloc(NodeKind::Url, Some(url), Some(token.area)))
            }
            CSSToken::String(_) => {
                let _ = self.bump();
                Ok(self.tree.alloc(NodeKind::Url, Some(url_text(&token)), Some(token.area)))
            }
            CSSToken::Function(name) if name.eq_ignore_ascii_case("url") => self.quoted_url(),
            _ => Err(self.unexpected(what)),
        }
    }

    // ========== @import and @namespace ==========

    /// `@import url media-list;`
    fn import_rule(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::ImportRule, None, None);

        let url = self.url_or_string("a URL after @import")?;
        self.tree.append_child(rule, url);
        let _ = self.skip_ws();

        if !matches!(self.peek().kind, CSSToken::Semicolon | CSSToken::EOF) {
            let list = self.traced("media-list", Self::media_list)?;
            self.tree.append_child(rule, list);
            let _ = self.skip_ws();
        }
        let _ = self.expect(|k| matches!(k, CSSToken::Semicolon), "';' after @import")?;

        let area = self.area_from(begin);
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    /// `@namespace prefix? url;`
    fn namespace_rule(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::NamespaceRule, None, None);

        if let CSSToken::Ident(_) = self.peek().kind {
            let prefix = self.bump();
            let _ = self
                .tree
                .append_new(rule, NodeKind::NamespaceRulePrefix, Some(prefix.text), Some(prefix.area));
            let _ = self.skip_ws();
        }

        let url = self.url_or_string("a namespace URL")?;
        let text = self.tree.text(url).to_string();
        let area = self.tree.area(url);
        let _ = self.tree.append_new(rule, NodeKind::NamespaceRuleUrl, Some(text), area);
        let _ = self.skip_ws();
        let _ = self.expect(|k| matches!(k, CSSToken::Semicolon), "';' after @namespace")?;

        let area = self.area_from(begin);
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    // ========== @media ==========

    /// `@media media-list { rules }`
    fn media_rule(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::MediaRule, None, None);

        if !matches!(self.peek().kind, CSSToken::LeftBrace) {
            let list = self.traced("media-list", Self::media_list)?;
            self.tree.append_child(rule, list);
            let _ = self.skip_ws();
        }
        let _ = self.expect(|k| matches!(k, CSSToken::LeftBrace), "'{' after the media query list")?;
        self.rule_list(rule, false)?;
        self.close_block()?;

        let area = self.area_from(begin);
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    /// [Media Queries § 3](https://www.w3.org/TR/mediaqueries-3/#syntax)
    ///
    /// Comma separated media queries, stopping before `{` or `;`.
    fn media_list(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let list = self.tree.alloc(NodeKind::MediaList, None, None);
        loop {
            let query = self.traced("media-query", Self::media_query)?;
            self.tree.append_child(list, query);
            let _ = self.skip_ws();
            if self.eat(|k| matches!(k, CSSToken::Comma)).is_none() {
                break;
            }
            let _ = self.skip_ws();
        }
        let area = self.area_from(begin);
        self.tree.set_area(list, area);
        Ok(list)
    }

    /// `[only | not]? medium [and (expr)]*` or `(expr) [and (expr)]*`
    fn media_query(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let query = self.tree.alloc(NodeKind::MediaQuery, None, None);

        let has_modifier = (self.peek().kind.is_ident("not") || self.peek().kind.is_ident("only"))
            && matches!(self.peek_significant(1).kind, CSSToken::Ident(_));
        if has_modifier {
            let modifier = self.bump();
            let _ = self.tree.append_new(
                query,
                NodeKind::MediaModifier,
                Some(modifier.text.to_ascii_lowercase()),
                Some(modifier.area),
            );
            let _ = self.skip_ws();
        }

        let mut needs_and = false;
        if matches!(self.peek().kind, CSSToken::Ident(_)) && !self.peek().kind.is_ident("and") {
            let medium = self.bump();
            let _ = self.tree.append_new(query, NodeKind::Medium, Some(medium.text), Some(medium.area));
            needs_and = true;
        }

        loop {
            let _ = self.skip_ws();
            let token = self.peek().clone();
            match &token.kind {
                CSSToken::Ident(_) if needs_and && token.kind.is_ident("and") => {
                    let _ = self.bump();
                    let _ = self.skip_ws();
                    let _ = self.expect(|k| matches!(k, CSSToken::LeftParen), "'(' after 'and'")?;
                }
                // `and(` without a space tokenizes as a function
                CSSToken::Function(name) if needs_and && name.eq_ignore_ascii_case("and") => {
                    let _ = self.bump();
                }
                CSSToken::LeftParen if !needs_and => {
                    let _ = self.bump();
                }
                _ => break,
            }
            let expr = self.traced("media-expression", |p| p.media_expr(token.location()))?;
            self.tree.append_child(query, expr);
            needs_and = true;
        }

        if self.tree.child_count(query) == 0 {
            return Err(self.unexpected("a media query"));
        }
        let area = self.area_from(begin);
        self.tree.set_area(query, area);
        Ok(query)
    }

    /// `feature [: expr]? )` after the opening parenthesis.
    fn media_expr(&mut self, begin: SourceLocation) -> PResult<NodeId> {
        let _ = self.skip_ws();
        let feature = self.expect(|k| matches!(k, CSSToken::Ident(_)), "a media feature name")?;
        let expr = self.tree.alloc(NodeKind::MediaExpr, None, None);
        let _ = self.tree.append_new(
            expr,
            NodeKind::MediaFeature,
            Some(feature.text.to_ascii_lowercase()),
            Some(feature.area),
        );
        let _ = self.skip_ws();

        if self.eat(|k| matches!(k, CSSToken::Colon)).is_some() {
            let _ = self.skip_ws();
            let value = self.traced("expression", Self::expr)?;
            self.tree.append_child(expr, value);
            let _ = self.skip_ws();
        }
        let _ = self.expect(|k| matches!(k, CSSToken::RightParen), "')' to close the media expression")?;

        let area = self.area_from(begin);
        self.tree.set_area(expr, area);
        Ok(expr)
    }

    // ========== @page ==========

    /// [CSS Paged Media § 3](https://www.w3.org/TR/css-page-3/#syntax-page-selector)
    ///
    /// `@page selectors { declarations and margin boxes }`
    fn page_rule(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::PageRule, None, None);

        let selectors_begin = self.peek().location();
        let selectors = self.raw_until(|k| matches!(k, CSSToken::LeftBrace | CSSToken::Semicolon));
        let area = self.area_from(selectors_begin);
        for selector in selectors.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let _ = self
                .tree
                .append_new(rule, NodeKind::PageSelector, Some(selector.to_string()), area);
        }

        let block_begin = self.peek().location();
        let _ = self.expect(|k| matches!(k, CSSToken::LeftBrace), "'{' after @page")?;
        let block = self.tree.alloc(NodeKind::PageRuleBlock, None, None);
        loop {
            let _ = self.skip_ws();
            match self.peek().kind {
                CSSToken::Semicolon => {
                    let _ = self.bump();
                }
                CSSToken::RightBrace | CSSToken::EOF => break,
                CSSToken::AtKeyword(_) => {
                    if let Err(interrupt) = self.page_margin_block(block) {
                        self.recover(block, interrupt)?;
                    }
                }
                _ => match self.traced("declaration", Self::declaration) {
                    Ok(Some(decl)) => self.tree.append_child(block, decl),
                    Ok(None) => {}
                    Err(interrupt) => self.recover(block, interrupt)?,
                },
            }
        }
        self.close_block()?;
        let area = self.area_from(block_begin);
        self.tree.set_area(block, area);
        self.tree.append_child(rule, block);

        let area = self.area_from(begin);
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    /// `@top-left { declarations }`, appended as a symbol plus its block.
    fn page_margin_block(&mut self, block: NodeId) -> PResult<()> {
        let symbol = self.bump();
        let _ = self.skip_ws();
        let declarations = self.declaration_block()?;
        let _ = self
            .tree
            .append_new(block, NodeKind::PageMarginSymbol, Some(symbol.text), Some(symbol.area));
        self.tree.append_child(block, declarations);
        Ok(())
    }

    // ========== @font-face, @viewport and @keyframes ==========

    /// An at-rule whose body is a declaration block. The node keeps the
    /// keyword as written, vendor prefix included.
    fn keyword_block_rule(&mut self, kind: NodeKind) -> PResult<NodeId> {
        let keyword = self.bump();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(kind, Some(keyword.text.clone()), None);
        let block = self.declaration_block()?;
        self.tree.append_child(rule, block);
        let area = self.area_from(keyword.location());
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    /// [CSS Animations § 4](https://www.w3.org/TR/css-animations-1/#keyframes)
    ///
    /// `@keyframes name { selectors { declarations } ... }`
    fn keyframes_rule(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::KeyframesRule, Some(keyword.text.clone()), None);

        let name = self.expect(
            |k| matches!(k, CSSToken::Ident(_) | CSSToken::String(_)),
            "an animation name",
        )?;
        let _ = self
            .tree
            .append_new(rule, NodeKind::KeyframesIdentifier, Some(name.text), Some(name.area));
        let _ = self.skip_ws();
        let _ = self.expect(|k| matches!(k, CSSToken::LeftBrace), "'{' after the animation name")?;

        loop {
            let _ = self.skip_ws();
            if matches!(self.peek().kind, CSSToken::RightBrace | CSSToken::EOF) {
                break;
            }
            if let Err(interrupt) = self.keyframes_block(rule) {
                self.recover(rule, interrupt)?;
            }
        }
        self.close_block()?;

        let area = self.area_from(keyword.location());
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    /// `from, 50% { declarations }`, appended as a selector plus its block.
    fn keyframes_block(&mut self, rule: NodeId) -> PResult<()> {
        let begin = self.peek().location();
        let selector = self.tree.alloc(NodeKind::KeyframesSelector, None, None);
        loop {
            let single = self.expect(
                |k| k.is_ident("from") || k.is_ident("to") || matches!(k, CSSToken::Percentage { .. }),
                "'from', 'to' or a percentage",
            )?;
            let _ = self.tree.append_new(
                selector,
                NodeKind::SingleKeyframeSelector,
                Some(single.text),
                Some(single.area),
            );
            let _ = self.skip_ws();
            if self.eat(|k| matches!(k, CSSToken::Comma)).is_none() {
                break;
            }
            let _ = self.skip_ws();
        }
        let area = self.area_from(begin);
        self.tree.set_area(selector, area);

        let declarations = self.declaration_block()?;
        self.tree.append_child(rule, selector);
        self.tree.append_child(rule, declarations);
        Ok(())
    }

    // ========== @supports ==========

    /// [CSS Conditional Rules § 6](https://www.w3.org/TR/css-conditional-3/#at-supports)
    ///
    /// `@supports condition { rules }`
    fn supports_rule(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::SupportsRule, None, None);

        let condition = self.traced("supports-condition", Self::supports_condition)?;
        self.tree.append_child(rule, condition);
        let _ = self.skip_ws();
        let _ = self.expect(|k| matches!(k, CSSToken::LeftBrace), "'{' after the supports condition")?;
        self.rule_list(rule, false)?;
        self.close_block()?;

        let area = self.area_from(begin);
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    /// "`<supports-condition> = not <supports-in-parens>
    /// | <supports-in-parens> [ and <supports-in-parens> ]*
    /// | <supports-in-parens> [ or <supports-in-parens> ]*`"
    fn supports_condition(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let condition = self.tree.alloc(NodeKind::SupportsCondition, None, None);
        loop {
            let member = if self.peek().kind.is_ident("not") {
                let not = self.bump();
                let _ = self.skip_ws();
                let negation = self.tree.alloc(NodeKind::SupportsNegation, None, None);
                let inner = self.supports_in_parens()?;
                self.tree.append_child(negation, inner);
                let area = self.area_from(not.location());
                self.tree.set_area(negation, area);
                negation
            } else {
                self.supports_in_parens()?
            };
            self.tree.append_child(condition, member);

            let _ = self.skip_ws();
            if !(self.peek().kind.is_ident("and") || self.peek().kind.is_ident("or")) {
                break;
            }
            let operator = self.bump();
            let _ = self.tree.append_new(
                condition,
                NodeKind::SupportsConditionOperator,
                Some(operator.text.to_ascii_lowercase()),
                Some(operator.area),
            );
            let _ = self.skip_ws();
        }
        let area = self.area_from(begin);
        self.tree.set_area(condition, area);
        Ok(condition)
    }

    /// `( declaration )` or `( condition )`
    fn supports_in_parens(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let _ = self.expect(|k| matches!(k, CSSToken::LeftParen), "'(' in the supports condition")?;
        let _ = self.skip_ws();
        let parens = self.tree.alloc(NodeKind::SupportsConditionInParens, None, None);

        let is_declaration = matches!(self.peek().kind, CSSToken::Ident(_))
            && !self.peek().kind.is_ident("not")
            && matches!(self.peek_significant(1).kind, CSSToken::Colon);
        let inner = if is_declaration {
            match self.traced("declaration", Self::declaration)? {
                Some(decl) => decl,
                None => return Err(self.error("The declaration in the @supports condition was dropped")),
            }
        } else {
            self.traced("supports-condition", Self::supports_condition)?
        };
        self.tree.append_child(parens, inner);
        let _ = self.skip_ws();
        let _ = self.expect(|k| matches!(k, CSSToken::RightParen), "')' in the supports condition")?;

        let area = self.area_from(begin);
        self.tree.set_area(parens, area);
        Ok(parens)
    }

    // ========== @layer ==========

    /// [CSS Cascade 5 § 6.4](https://www.w3.org/TR/css-cascade-5/#layering)
    ///
    /// `@layer a.b, c;` or `@layer name? { rules }`
    fn layer_rule(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::LayerRule, None, None);

        let mut names = 0usize;
        while matches!(self.peek().kind, CSSToken::Ident(_)) {
            let name_begin = self.peek().location();
            let mut name = self.bump().text;
            while self.peek().kind.is_delim('.') && matches!(self.peek_at(1).kind, CSSToken::Ident(_)) {
                name.push_str(&self.bump().text);
                name.push_str(&self.bump().text);
            }
            let area = self.area_from(name_begin);
            let _ = self.tree.append_new(rule, NodeKind::LayerName, Some(name), area);
            names += 1;

            let _ = self.skip_ws();
            if self.eat(|k| matches!(k, CSSToken::Comma)).is_none() {
                break;
            }
            let _ = self.skip_ws();
        }

        if matches!(self.peek().kind, CSSToken::LeftBrace) {
            if names > 1 {
                return Err(self.error("A block @layer rule takes at most one layer name"));
            }
            let block_begin = self.bump().location();
            let block = self.tree.alloc(NodeKind::LayerRuleBlock, None, None);
            self.rule_list(block, false)?;
            self.close_block()?;
            let area = self.area_from(block_begin);
            self.tree.set_area(block, area);
            self.tree.append_child(rule, block);
        } else if names == 0 {
            return Err(self.unexpected("a layer name or '{'"));
        } else {
            let _ = self.expect(|k| matches!(k, CSSToken::Semicolon), "';' after the layer names")?;
        }

        let area = self.area_from(begin);
        self.tree.set_area(rule, area);
        Ok(rule)
    }

    // ========== Unknown at-rules ==========

    /// `@name prelude;` or `@name prelude { body }`, kept verbatim.
    fn unknown_rule(&mut self) -> PResult<NodeId> {
        let keyword = self.bump();
        let _ = self.skip_ws();
        let rule = self.tree.alloc(NodeKind::UnknownRule, Some(keyword.text.clone()), None);

        let params_begin = self.peek().location();
        let params = self.raw_until(|k| matches!(k, CSSToken::LeftBrace | CSSToken::Semicolon));
        let area = self.area_from(params_begin);
        let _ = self.tree.append_new(
            rule,
            NodeKind::UnknownRuleParameterList,
            Some(params.trim().to_string()),
            area,
        );

        if matches!(self.peek().kind, CSSToken::LeftBrace) {
            let body_begin = self.bump().location();
            let body = self.raw_until(|k| matches!(k, CSSToken::RightBrace));
            self.close_block()?;
            let area = self.area_from(body_begin);
            let _ = self
                .tree
                .append_new(rule, NodeKind::UnknownRuleBody, Some(body.trim().to_string()), area);
        } else {
            let _ = self.expect(
                |k| matches!(k, CSSToken::Semicolon),
                &format!("';' or '{{' after {}", keyword.text),
            )?;
        }

        let area = self.area_from(keyword.location());
        self.tree.set_area(rule, area);
        Ok(rule)
    }
}

/// `base` itself or a vendor prefixed variant such as `-webkit-base`.
fn is_vendor_variant(name: &str, base: &str) -> bool {
    name == base
        || (name.starts_with('-')
            && name
                .strip_suffix(base)
                .is_some_and(|prefix| prefix.len() > 2 && prefix.ends_with('-')))
}
