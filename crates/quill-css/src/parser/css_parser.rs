//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! The parser builds a [`ParseTree`] whose node kinds mirror the CSS 2.1 and
//! CSS 3 productions. Whitespace tokens are kept in the stream because they
//! are significant between selectors; every production skips them where the
//! grammar allows. Selector, value and at-rule productions live in sibling
//! modules.

use quill_common::{SourceArea, SourceLocation};
use quill_tree::{NodeId, NodeKind, ParseTree};

use super::issue::{ErrorAction, Interrupt, PResult, ParseError, ParseIssue};
use super::settings::{ParserSettings, TraceScope};
use crate::tokenizer::{CSSToken, CSSTokenizer, DecodeError, Token};

/// The result of a completed parse.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The parse tree; its entry node is `ROOT` or `STYLEDECLARATIONLIST`.
    pub tree: ParseTree,
    /// Every issue reported and recovered from, in document order.
    pub issues: Vec<ParseIssue>,
}

/// CSS parser
pub struct CSSParser {
    pub(super) tokens: Vec<Token>,
    pub(super) position: usize,
    /// End of the most recently consumed token.
    pub(super) last_end: SourceLocation,
    pub(super) settings: ParserSettings,
    pub(super) tree: ParseTree,
    issues: Vec<ParseIssue>,
    depth: usize,
}

impl CSSParser {
    /// Create a new parser from a list of tokens.
    ///
    /// An EOF token is appended if the list does not already end with one.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>, settings: ParserSettings) -> Self {
        if !tokens.last().is_some_and(|t| t.kind.is_eof()) {
            let end = tokens.last().map_or(SourceLocation::START, |t| t.area.end);
            tokens.push(Token::new(CSSToken::EOF, "", SourceArea::at(end)));
        }
        let tree = ParseTree::new(NodeKind::Root, settings.version);
        Self {
            tokens,
            position: 0,
            last_end: SourceLocation::START,
            settings,
            tree,
            issues: Vec::new(),
            depth: 0,
        }
    }

    /// Tokenize `text` and create a parser over it.
    #[must_use]
    pub fn from_text(text: &str, settings: ParserSettings) -> Self {
        let mut tokenizer = CSSTokenizer::new(text);
        tokenizer.run();
        Self::new(tokenizer.into_tokens(), settings)
    }

    /// Tokenize UTF-16 code units and create a parser over them.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Decode`] for a broken surrogate pair.
    pub fn from_utf16(units: &[u16], settings: ParserSettings) -> Result<Self, ParseError> {
        let mut tokenizer = CSSTokenizer::from_utf16(units).map_err(DecodeError::from)?;
        tokenizer.run();
        Ok(Self::new(tokenizer.into_tokens(), settings))
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// "To parse a stylesheet from input..."
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the error handler aborts, or in strict mode
    /// without a handler at the first error.
    pub fn parse_stylesheet(mut self) -> Result<ParseOutcome, ParseError> {
        self.tree = ParseTree::new(NodeKind::Root, self.settings.version);
        let root = self.tree.root();
        tracing::debug!(tokens = self.tokens.len(), version = %self.settings.version, "parsing stylesheet");

        self.skip_ws_and_cdo();
        if matches!(&self.peek().kind, CSSToken::AtKeyword(name) if name.eq_ignore_ascii_case("charset")) {
            match self.charset() {
                Ok(id) => self.tree.append_child(root, id),
                Err(interrupt) => self.recover(root, interrupt)?,
            }
        }

        // "Consume a list of rules from input, with the top-level flag set."
        self.rule_list(root, true).map_err(Self::into_error)?;
        Ok(self.finish())
    }

    /// [§ 5.3.6 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style attribute or similar.
    ///
    /// # Errors
    ///
    /// See [`CSSParser::parse_stylesheet`].
    pub fn parse_declaration_list(mut self) -> Result<ParseOutcome, ParseError> {
        self.tree = ParseTree::new(NodeKind::StyleDeclarationList, self.settings.version);
        let root = self.tree.root();
        tracing::debug!(tokens = self.tokens.len(), "parsing declaration list");

        loop {
            self.declaration_list(root).map_err(Self::into_error)?;
            if self.peek().kind.is_eof() {
                break;
            }
            // A stray `}` cannot close anything here.
            let token = self.bump();
            let issue = ParseIssue::error(token.location(), "Unexpected '}' in declaration list");
            self.report(issue)?;
            let _ = self.tree.append_new(root, NodeKind::ErrorSkipTo, Some(token.text), Some(token.area));
        }
        Ok(self.finish())
    }

    fn finish(self) -> ParseOutcome {
        tracing::debug!(nodes = self.tree.len(), issues = self.issues.len(), "parse finished");
        ParseOutcome {
            tree: self.tree,
            issues: self.issues,
        }
    }

    fn into_error(interrupt: Interrupt) -> ParseError {
        match interrupt {
            Interrupt::Syntax(issue) => ParseError::Syntax(issue),
            Interrupt::Fatal(error) => error,
        }
    }

    // ========== Token access ==========

    /// The current token. The stream always ends with EOF, which is never consumed.
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    /// The token `offset` positions after the current one.
    pub(super) fn peek_at(&self, offset: usize) -> &Token {
        &self.tokens[(self.position + offset).min(self.tokens.len() - 1)]
    }

    /// Consume the current token and return a copy of it.
    pub(super) fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.kind.is_eof() {
            self.position += 1;
            self.last_end = token.area.end;
        }
        #[cfg(feature = "parser-trace")]
        tracing::trace!(%token, "consumed");
        token
    }

    /// Skip whitespace. Returns `true` if any was skipped.
    pub(super) fn skip_ws(&mut self) -> bool {
        let mut skipped = false;
        while self.peek().kind.is_whitespace() {
            let _ = self.bump();
            skipped = true;
        }
        skipped
    }

    fn skip_ws_and_cdo(&mut self) {
        while matches!(self.peek().kind, CSSToken::Whitespace | CSSToken::CDO | CSSToken::CDC) {
            let _ = self.bump();
        }
    }

    /// Consume the current token if `pred` accepts it.
    pub(super) fn eat(&mut self, pred: impl Fn(&CSSToken) -> bool) -> Option<Token> {
        pred(&self.peek().kind).then(|| self.bump())
    }

    /// Consume a token accepted by `pred` or fail with "Expected {what}".
    pub(super) fn expect(&mut self, pred: impl Fn(&CSSToken) -> bool, what: &str) -> PResult<Token> {
        if pred(&self.peek().kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(what))
        }
    }

    /// A syntax error at the current token.
    pub(super) fn error(&self, message: impl Into<String>) -> Interrupt {
        Interrupt::Syntax(ParseIssue::error(self.peek().location(), message))
    }

    /// "Expected {what} but found {current token}".
    pub(super) fn unexpected(&self, what: &str) -> Interrupt {
        let found = self.describe_current();
        self.error(format!("Expected {what} but found {found}"))
    }

    pub(super) fn describe_current(&self) -> String {
        let token = self.peek();
        if token.kind.is_eof() {
            "end of input".to_string()
        } else {
            format!("'{}'", token.text)
        }
    }

    /// The span from `begin` to the end of the last consumed token.
    pub(super) fn area_from(&self, begin: SourceLocation) -> Option<SourceArea> {
        Some(SourceArea::new(begin, self.last_end.max(begin)))
    }

    /// Run a production between trace scope events.
    pub(super) fn traced<T>(
        &mut self,
        production: &'static str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.trace(TraceScope::Open, production);
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        self.trace(TraceScope::Close, production);
        result
    }

    fn trace(&mut self, scope: TraceScope, production: &'static str) {
        let depth = self.depth;
        if let Some(sink) = self.settings.trace.as_mut() {
            sink(scope, production, depth);
            return;
        }
        #[cfg(feature = "parser-trace")]
        tracing::trace!(?scope, production, depth, "parser scope");
    }

    // ========== Error reporting and recovery ==========

    /// Hand an issue to the error handler.
    ///
    /// Warnings are recorded and never abort. Errors abort when the handler
    /// says so, or in strict mode when no handler is installed.
    pub(super) fn report(&mut self, issue: ParseIssue) -> Result<(), ParseError> {
        tracing::debug!(%issue, "parse issue");
        let action = match self.settings.error_handler.as_mut() {
            Some(handler) => handler(&issue),
            None if self.settings.strict && issue.is_error() => {
                return Err(ParseError::Syntax(issue));
            }
            None => ErrorAction::Continue,
        };
        if action == ErrorAction::Abort && issue.is_error() {
            return Err(ParseError::Aborted(issue));
        }
        self.issues.push(issue);
        Ok(())
    }

    /// Report a syntax interrupt, then skip to the next recovery point.
    ///
    /// Skipping stops after a `;` or after a complete `{...}` block at the
    /// current nesting level, and before a `}` that closes an enclosing
    /// block. The skipped text is kept as an `ERROR_SKIPTO` node.
    pub(super) fn recover(&mut self, parent: NodeId, interrupt: Interrupt) -> Result<(), ParseError> {
        self.recover_to(parent, interrupt, true)
    }

    /// Like [`Self::recover`] for a qualified rule prelude, which runs up to
    /// its `{...}` block: a `;` does not end the skipped region.
    fn recover_rule(&mut self, parent: NodeId, interrupt: Interrupt) -> Result<(), ParseError> {
        self.recover_to(parent, interrupt, false)
    }

    fn recover_to(&mut self, parent: NodeId, interrupt: Interrupt, at_semicolon: bool) -> Result<(), ParseError> {
        let issue = match interrupt {
            Interrupt::Syntax(issue) => issue,
            Interrupt::Fatal(error) => return Err(error),
        };
        self.report(issue)?;

        let begin = self.peek().location();
        let mut skipped = String::new();
        let mut depth = 0usize;
        loop {
            match &self.peek().kind {
                CSSToken::EOF => break,
                CSSToken::RightBrace if depth == 0 => break,
                CSSToken::Semicolon if depth == 0 && at_semicolon => {
                    skipped.push_str(&self.bump().text);
                    break;
                }
                CSSToken::LeftBrace
                | CSSToken::LeftParen
                | CSSToken::LeftBracket
                | CSSToken::Function(_) => {
                    depth += 1;
                    skipped.push_str(&self.bump().text);
                }
                CSSToken::RightBrace | CSSToken::RightParen | CSSToken::RightBracket => {
                    let closes_block = matches!(self.peek().kind, CSSToken::RightBrace);
                    depth = depth.saturating_sub(1);
                    skipped.push_str(&self.bump().text);
                    if depth == 0 && closes_block {
                        break;
                    }
                }
                _ => skipped.push_str(&self.bump().text),
            }
        }

        if !skipped.is_empty() {
            let area = self.area_from(begin);
            let _ = self.tree.append_new(parent, NodeKind::ErrorSkipTo, Some(skipped), area);
        }
        Ok(())
    }

    /// Collect the raw text of tokens up to (not including) the first
    /// token at nesting level zero that `stop` accepts, or an unbalanced
    /// closing bracket, or EOF.
    pub(super) fn raw_until(&mut self, stop: impl Fn(&CSSToken) -> bool) -> String {
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            let kind = &self.peek().kind;
            if kind.is_eof() || (depth == 0 && stop(kind)) {
                break;
            }
            match kind {
                CSSToken::LeftBrace
                | CSSToken::LeftParen
                | CSSToken::LeftBracket
                | CSSToken::Function(_) => depth += 1,
                CSSToken::RightBrace | CSSToken::RightParen | CSSToken::RightBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            text.push_str(&self.bump().text);
        }
        text
    }

    // ========== Rules ==========

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// Stops at EOF, or before the `}` closing a nested list.
    pub(super) fn rule_list(&mut self, parent: NodeId, top_level: bool) -> PResult<()> {
        loop {
            if top_level {
                // "<CDO-token> <CDC-token>: If the top-level flag is set, do nothing."
                self.skip_ws_and_cdo();
            } else {
                let _ = self.skip_ws();
            }

            let qualified = !matches!(self.peek().kind, CSSToken::AtKeyword(_));
            let result = match &self.peek().kind {
                // "<EOF-token>: Return the list of rules."
                CSSToken::EOF => return Ok(()),
                CSSToken::RightBrace if !top_level => return Ok(()),
                CSSToken::RightBrace => {
                    let token = self.bump();
                    let issue = ParseIssue::error(token.location(), "Unexpected '}' at top level");
                    self.report(issue)?;
                    let _ = self.tree.append_new(
                        parent,
                        NodeKind::ErrorSkipTo,
                        Some(token.text),
                        Some(token.area),
                    );
                    continue;
                }
                // "<at-keyword-token>: Reconsume the current input token. Consume an
                // at-rule, and append the returned value to the list of rules."
                CSSToken::AtKeyword(_) => self.traced("at-rule", Self::at_rule),
                // "anything else: Reconsume the current input token. Consume a
                // qualified rule. If anything is returned, append it to the list of rules."
                _ => self.traced("style-rule", Self::style_rule),
            };

            match result {
                Ok(Some(id)) => self.tree.append_child(parent, id),
                Ok(None) => {}
                Err(interrupt) if qualified => self.recover_rule(parent, interrupt)?,
                Err(interrupt) => self.recover(parent, interrupt)?,
            }
        }
    }

    /// `@charset "name";`, only valid as the very first rule.
    fn charset(&mut self) -> PResult<NodeId> {
        let begin = self.bump().location();
        let _ = self.skip_ws();
        let name = self.expect(|k| matches!(k, CSSToken::String(_)), "a charset name string")?;
        let _ = self.skip_ws();
        let _ = self.expect(|k| matches!(k, CSSToken::Semicolon), "';' after @charset")?;
        let value = match name.kind {
            CSSToken::String(value) => value,
            _ => name.text,
        };
        let area = self.area_from(begin);
        Ok(self.tree.alloc(NodeKind::Charset, Some(value), area))
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    ///
    /// A style rule: a selector list followed by a declaration block.
    fn style_rule(&mut self) -> PResult<Option<NodeId>> {
        let begin = self.peek().location();
        let rule = self.tree.alloc(NodeKind::StyleRule, None, None);

        loop {
            let selector = self.traced("selector", Self::selector)?;
            self.tree.append_child(rule, selector);
            let _ = self.skip_ws();
            match self.peek().kind {
                CSSToken::Comma => {
                    let _ = self.bump();
                    let _ = self.skip_ws();
                }
                CSSToken::LeftBrace => break,
                _ => return Err(self.unexpected("',' or '{' after selector")),
            }
        }

        let block = self.declaration_block()?;
        self.tree.append_child(rule, block);
        let area = self.area_from(begin);
        self.tree.set_area(rule, area);
        Ok(Some(rule))
    }

    // ========== Declarations ==========

    /// `{ declarations }` as a `STYLEDECLARATIONLIST` node.
    ///
    /// A missing `}` at the end of input is reported and tolerated.
    pub(super) fn declaration_block(&mut self) -> PResult<NodeId> {
        let begin = self.peek().location();
        let _ = self.expect(|k| matches!(k, CSSToken::LeftBrace), "'{'")?;
        let list = self.tree.alloc(NodeKind::StyleDeclarationList, None, None);
        self.declaration_list(list)?;
        self.close_block()?;
        let area = self.area_from(begin);
        self.tree.set_area(list, area);
        Ok(list)
    }

    /// Consume the `}` closing a block, tolerating EOF with a reported issue.
    pub(super) fn close_block(&mut self) -> PResult<()> {
        if self.eat(|k| matches!(k, CSSToken::RightBrace)).is_none() {
            let issue = ParseIssue::error(self.peek().location(), "Unexpected end of input, missing '}'");
            self.report(issue)?;
        }
        Ok(())
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    ///
    /// Stops before `}` or at EOF.
    pub(super) fn declaration_list(&mut self, parent: NodeId) -> PResult<()> {
        loop {
            let _ = self.skip_ws();
            match self.peek().kind {
                // "<whitespace-token> <semicolon-token>: Do nothing."
                CSSToken::Semicolon => {
                    let _ = self.bump();
                }
                // "<EOF-token>: Return the list of declarations."
                CSSToken::EOF | CSSToken::RightBrace => return Ok(()),
                _ => match self.traced("declaration", Self::declaration) {
                    Ok(Some(id)) => self.tree.append_child(parent, id),
                    Ok(None) => {}
                    Err(interrupt) => self.recover(parent, interrupt)?,
                },
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    ///
    /// Returns `None` for a deprecated property hack that is dropped.
    pub(super) fn declaration(&mut self) -> PResult<Option<NodeId>> {
        let begin = self.peek().location();

        // `*zoom: 1` is an old IE hack; `_height` tokenizes as a plain ident.
        let star_hack = self.peek().kind.is_delim('*')
            && matches!(self.peek_at(1).kind, CSSToken::Ident(_));
        let mut name = String::new();
        if star_hack {
            name.push_str(&self.bump().text);
        }
        let ident = self.expect(|k| matches!(k, CSSToken::Ident(_)), "a property name")?;
        name.push_str(&ident.text);
        let deprecated = star_hack || name.starts_with('_');

        let decl = self.tree.alloc(NodeKind::StyleDeclaration, None, None);
        let _ = self.tree.append_new(decl, NodeKind::Property, Some(name.clone()), Some(ident.area));

        let _ = self.skip_ws();
        let _ = self.expect(
            |k| matches!(k, CSSToken::Colon),
            &format!("':' after property name '{name}'"),
        )?;
        let _ = self.skip_ws();

        let raw_value = name.starts_with("--")
            || (self.peek().kind.is_ident("progid") && matches!(self.peek_at(1).kind, CSSToken::Colon));
        if raw_value {
            self.raw_declaration_value(decl);
        } else {
            let expr = self.traced("expression", Self::expr)?;
            self.tree.append_child(decl, expr);
        }

        let _ = self.skip_ws();
        if self.peek().kind.is_delim('!') {
            let bang = self.bump();
            let _ = self.skip_ws();
            let _ = self.expect(|k| k.is_ident("important"), "'important' after '!'")?;
            let area = self.area_from(bang.location());
            let _ = self.tree.append_new(decl, NodeKind::Important, Some("!important".to_string()), area);
            let _ = self.skip_ws();
        }

        if !Self::ends_declaration(&self.peek().kind) {
            let found = self.describe_current();
            return Err(self.error(format!("Unexpected {found} in declaration of '{name}'")));
        }

        if deprecated && !self.settings.keep_deprecated_properties {
            let issue = ParseIssue::warning(begin, format!("Ignoring deprecated property '{name}'"));
            self.report(issue)?;
            return Ok(None);
        }

        let area = self.area_from(begin);
        self.tree.set_area(decl, area);
        Ok(Some(decl))
    }

    /// Tokens that may follow a complete declaration.
    pub(super) const fn ends_declaration(kind: &CSSToken) -> bool {
        matches!(
            kind,
            CSSToken::Semicolon | CSSToken::RightBrace | CSSToken::RightParen | CSSToken::EOF
        )
    }

    /// Capture a custom property or `progid:` value verbatim as one term.
    ///
    /// A trailing `!important` is split off and left for the caller.
    fn raw_declaration_value(&mut self, decl: NodeId) {
        let begin = self.peek().location();
        let start = self.position;
        let _ = self.raw_until(|k| matches!(k, CSSToken::Semicolon | CSSToken::RightBrace));

        // Give back a trailing `! important` so the declaration sees it.
        let mut end = self.position;
        let mut back = end;
        while back > start && self.tokens[back - 1].kind.is_whitespace() {
            back -= 1;
        }
        if back > start && self.tokens[back - 1].kind.is_ident("important") {
            let mut bang = back - 1;
            while bang > start && self.tokens[bang - 1].kind.is_whitespace() {
                bang -= 1;
            }
            if bang > start && self.tokens[bang - 1].kind.is_delim('!') {
                end = bang - 1;
            }
        }
        self.position = end;
        if end > start {
            self.last_end = self.tokens[end - 1].area.end;
        }

        let text: String = self.tokens[start..end].iter().map(|t| t.text.as_str()).collect();
        let area = self.area_from(begin);
        let expr = self.tree.alloc(NodeKind::Expr, None, area);
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            let _ = self.tree.append_new(expr, NodeKind::ExprTerm, Some(trimmed.to_string()), area);
        }
        self.tree.append_child(decl, expr);
    }
}
