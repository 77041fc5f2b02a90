//! Integration tests for the CSS grammar parser.

use std::cell::RefCell;
use std::rc::Rc;

use quill_css::parser::{CSSParser, ErrorAction, ParseError, ParseOutcome, ParserSettings, TraceScope};
use quill_css::CssVersion;
use quill_tree::{NodeId, NodeKind, ParseTree};

/// Parse a stylesheet with default settings
fn parse(css: &str) -> ParseOutcome {
    CSSParser::from_text(css, ParserSettings::default())
        .parse_stylesheet()
        .unwrap()
}

/// The kinds of the children of `id`
fn child_kinds(tree: &ParseTree, id: NodeId) -> Vec<NodeKind> {
    tree.children(id).iter().map(|&c| tree.kind(c)).collect()
}

/// The `index`-th child of `id`
fn nth(tree: &ParseTree, id: NodeId, index: usize) -> NodeId {
    tree.child(id, index).unwrap()
}

// ========== Style rules ==========

#[test]
fn test_simple_style_rule() {
    let outcome = parse("h1 { color: red }");
    let tree = &outcome.tree;
    assert!(outcome.issues.is_empty());
    assert_eq!(tree.entry_kind(), NodeKind::Root);
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::StyleRule]);

    let rule = nth(tree, tree.root(), 0);
    assert_eq!(child_kinds(tree, rule), vec![NodeKind::Selector, NodeKind::StyleDeclarationList]);

    let selector = nth(tree, rule, 0);
    assert_eq!(child_kinds(tree, selector), vec![NodeKind::ElementName]);
    assert_eq!(tree.text(nth(tree, selector, 0)), "h1");

    let list = nth(tree, rule, 1);
    let decl = nth(tree, list, 0);
    assert_eq!(child_kinds(tree, decl), vec![NodeKind::Property, NodeKind::Expr]);
    assert_eq!(tree.text(nth(tree, decl, 0)), "color");
    let expr = nth(tree, decl, 1);
    assert_eq!(child_kinds(tree, expr), vec![NodeKind::ExprTerm]);
    assert_eq!(tree.text(nth(tree, expr, 0)), "red");
}

#[test]
fn test_selector_list_with_combinators() {
    let outcome = parse("div > p.note, #main a {}");
    let tree = &outcome.tree;
    let rule = nth(tree, tree.root(), 0);
    assert_eq!(
        child_kinds(tree, rule),
        vec![NodeKind::Selector, NodeKind::Selector, NodeKind::StyleDeclarationList]
    );

    let first = nth(tree, rule, 0);
    assert_eq!(
        child_kinds(tree, first),
        vec![
            NodeKind::ElementName,
            NodeKind::SelectorCombinator,
            NodeKind::ElementName,
            NodeKind::Class
        ]
    );
    assert_eq!(tree.text(nth(tree, first, 1)), ">");
    assert_eq!(tree.text(nth(tree, first, 3)), ".note");

    let second = nth(tree, rule, 1);
    assert_eq!(
        child_kinds(tree, second),
        vec![NodeKind::Hash, NodeKind::SelectorCombinator, NodeKind::ElementName]
    );
    assert_eq!(tree.text(nth(tree, second, 0)), "#main");
    assert_eq!(tree.text(nth(tree, second, 1)), " ");
}

#[test]
fn test_attribute_selector() {
    let outcome = parse("a[href^=\"http\" i] {}");
    let tree = &outcome.tree;
    let selector = nth(tree, nth(tree, tree.root(), 0), 0);
    let attrib = nth(tree, selector, 1);
    assert_eq!(tree.kind(attrib), NodeKind::Attrib);
    assert_eq!(tree.text(attrib), "href");
    assert_eq!(
        child_kinds(tree, attrib),
        vec![NodeKind::AttribOperator, NodeKind::AttribValue, NodeKind::AttribCase]
    );
    assert_eq!(tree.text(nth(tree, attrib, 0)), "^=");
    assert_eq!(tree.text(nth(tree, attrib, 1)), "\"http\"");
    assert_eq!(tree.text(nth(tree, attrib, 2)), "i");
}

#[test]
fn test_pseudo_classes_and_elements() {
    let outcome = parse("li:nth-child(2n+1)::before {}");
    let tree = &outcome.tree;
    let selector = nth(tree, nth(tree, tree.root(), 0), 0);
    assert_eq!(
        child_kinds(tree, selector),
        vec![NodeKind::ElementName, NodeKind::Pseudo, NodeKind::Pseudo]
    );
    let nth_child = nth(tree, selector, 1);
    assert_eq!(tree.text(nth_child), ":nth-child(");
    assert_eq!(child_kinds(tree, nth_child), vec![NodeKind::Nth]);
    assert_eq!(tree.text(nth(tree, nth_child, 0)), "2n+1");
    assert_eq!(tree.text(nth(tree, selector, 2)), "::before");
}

#[test]
fn test_negation_and_matches() {
    let outcome = parse("p:not(.a, .b):is(h1) {}");
    let tree = &outcome.tree;
    let selector = nth(tree, nth(tree, tree.root(), 0), 0);
    assert_eq!(
        child_kinds(tree, selector),
        vec![NodeKind::ElementName, NodeKind::Negation, NodeKind::Pseudo]
    );
    let negation = nth(tree, selector, 1);
    assert_eq!(child_kinds(tree, negation), vec![NodeKind::Selector, NodeKind::Selector]);
    let is = nth(tree, selector, 2);
    assert_eq!(tree.text(is), ":is(");
    assert_eq!(child_kinds(tree, is), vec![NodeKind::Selector]);
}

// ========== Declarations ==========

#[test]
fn test_important_declaration() {
    let outcome = parse("p { color: red ! important; }");
    let tree = &outcome.tree;
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    let decl = nth(tree, list, 0);
    assert_eq!(
        child_kinds(tree, decl),
        vec![NodeKind::Property, NodeKind::Expr, NodeKind::Important]
    );
}

#[test]
fn test_expression_operators() {
    let outcome = parse("p { font: 12px/1.5 a, b }");
    let tree = &outcome.tree;
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    let expr = nth(tree, nth(tree, list, 0), 1);
    assert_eq!(
        child_kinds(tree, expr),
        vec![
            NodeKind::ExprTerm,
            NodeKind::ExprOperator,
            NodeKind::ExprTerm,
            NodeKind::ExprTerm,
            NodeKind::ExprOperator,
            NodeKind::ExprTerm
        ]
    );
    assert_eq!(tree.text(nth(tree, expr, 1)), "/");
    assert_eq!(tree.text(nth(tree, expr, 4)), ",");
}

#[test]
fn test_function_and_url_terms() {
    let outcome = parse("p { background: rgb(1, 2, 3) url(a\\(b\\).png) }");
    let tree = &outcome.tree;
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    let expr = nth(tree, nth(tree, list, 0), 1);

    let function = nth(tree, nth(tree, expr, 0), 0);
    assert_eq!(tree.kind(function), NodeKind::Function);
    assert_eq!(tree.text(function), "rgb");
    assert_eq!(tree.child_count(nth(tree, function, 0)), 5);

    let url = nth(tree, nth(tree, expr, 1), 0);
    assert_eq!(tree.kind(url), NodeKind::Url);
    assert_eq!(tree.text(url), "a(b).png");
}

#[test]
fn test_calc_structure() {
    let outcome = parse("p { width: calc(100% - 2 * 10px) }");
    let tree = &outcome.tree;
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    let term = nth(tree, nth(tree, nth(tree, list, 0), 1), 0);
    let calc = nth(tree, term, 0);
    assert_eq!(tree.kind(calc), NodeKind::Calc);
    assert_eq!(
        child_kinds(tree, calc),
        vec![NodeKind::CalcProduct, NodeKind::CalcSumOperator, NodeKind::CalcProduct]
    );
    let product = nth(tree, calc, 2);
    assert_eq!(
        child_kinds(tree, product),
        vec![NodeKind::CalcUnit, NodeKind::CalcProductOperator, NodeKind::CalcUnit]
    );
    assert_eq!(tree.text(nth(tree, product, 2)), "10px");
}

#[test]
fn test_custom_property_value_is_raw() {
    let outcome = parse("p { --main: 1px solid; }");
    let tree = &outcome.tree;
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    let expr = nth(tree, nth(tree, list, 0), 1);
    assert_eq!(child_kinds(tree, expr), vec![NodeKind::ExprTerm]);
    assert_eq!(tree.text(nth(tree, expr, 0)), "1px solid");
}

#[test]
fn test_deprecated_properties_dropped_with_warning() {
    let outcome = parse("p { *zoom: 1; _height: 1px; color: red }");
    let tree = &outcome.tree;
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    assert_eq!(child_kinds(tree, list), vec![NodeKind::StyleDeclaration]);
    assert_eq!(outcome.issues.len(), 2);
    assert!(outcome.issues.iter().all(|issue| !issue.is_error()));
}

#[test]
fn test_deprecated_properties_kept_on_request() {
    let settings = ParserSettings::default().with_keep_deprecated_properties(true);
    let outcome = CSSParser::from_text("p { *zoom: 1; _height: 1px }", settings)
        .parse_stylesheet()
        .unwrap();
    let tree = &outcome.tree;
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    assert_eq!(tree.child_count(list), 2);
    assert_eq!(tree.text(nth(tree, nth(tree, list, 0), 0)), "*zoom");
    assert!(outcome.issues.is_empty());
}

#[test]
fn test_declaration_list_entry() {
    let outcome = CSSParser::from_text("color: red; margin: 0", ParserSettings::default())
        .parse_declaration_list()
        .unwrap();
    let tree = &outcome.tree;
    assert_eq!(tree.entry_kind(), NodeKind::StyleDeclarationList);
    assert_eq!(
        child_kinds(tree, tree.root()),
        vec![NodeKind::StyleDeclaration, NodeKind::StyleDeclaration]
    );
}

#[test]
fn test_declaration_list_stray_brace() {
    let outcome = CSSParser::from_text("color: red } margin: 0", ParserSettings::default())
        .parse_declaration_list()
        .unwrap();
    let tree = &outcome.tree;
    assert_eq!(
        child_kinds(tree, tree.root()),
        vec![NodeKind::StyleDeclaration, NodeKind::ErrorSkipTo, NodeKind::StyleDeclaration]
    );
    assert_eq!(outcome.issues.len(), 1);
}

// ========== Error recovery ==========

#[test]
fn test_bad_declaration_is_skipped() {
    let outcome = parse("h1 { color: ; margin: 0 } h2 { }");
    let tree = &outcome.tree;
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::StyleRule, NodeKind::StyleRule]);
    let list = nth(tree, nth(tree, tree.root(), 0), 1);
    assert_eq!(
        child_kinds(tree, list),
        vec![NodeKind::ErrorSkipTo, NodeKind::StyleDeclaration]
    );
    assert_eq!(outcome.issues.len(), 1);
    assert!(outcome.issues[0].is_error());
}

#[test]
fn test_stray_top_level_brace() {
    let outcome = parse("} h1 {}");
    let tree = &outcome.tree;
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::ErrorSkipTo, NodeKind::StyleRule]);
    assert_eq!(outcome.issues.len(), 1);
}

#[test]
fn test_bad_selector_skips_rule() {
    let outcome = parse("h1 ! { color: red } h2 { color: blue }");
    let tree = &outcome.tree;
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::ErrorSkipTo, NodeKind::StyleRule]);
    let selector = nth(tree, nth(tree, tree.root(), 1), 0);
    assert_eq!(tree.text(nth(tree, selector, 0)), "h2");
}

#[test]
fn test_semicolon_in_selector_drops_whole_rule() {
    let outcome = parse("a;b{c:d} e{f:g}");
    let tree = &outcome.tree;
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::ErrorSkipTo, NodeKind::StyleRule]);
    assert_eq!(tree.text(nth(tree, tree.root(), 0)), ";b{c:d}");
    let selector = nth(tree, nth(tree, tree.root(), 1), 0);
    assert_eq!(tree.text(nth(tree, selector, 0)), "e");
    assert_eq!(outcome.issues.len(), 1);
}

#[test]
fn test_missing_close_brace_at_eof() {
    let outcome = parse("h1 { color: red");
    let tree = &outcome.tree;
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::StyleRule]);
    assert_eq!(outcome.issues.len(), 1);
    assert!(outcome.issues[0].message.contains("missing '}'"));
}

#[test]
fn test_strict_mode_stops_at_first_error() {
    let settings = ParserSettings::default().with_strict(true);
    let result = CSSParser::from_text("h1 { color: ; }", settings).parse_stylesheet();
    assert!(matches!(result, Err(ParseError::Syntax(_))));
}

#[test]
fn test_strict_mode_ignores_warnings() {
    let settings = ParserSettings::default().with_strict(true);
    let outcome = CSSParser::from_text("p { *zoom: 1 }", settings).parse_stylesheet().unwrap();
    assert_eq!(outcome.issues.len(), 1);
}

#[test]
fn test_error_handler_abort() {
    let settings = ParserSettings::default().with_error_handler(|_| ErrorAction::Abort);
    let result = CSSParser::from_text("h1 { color: ; }", settings).parse_stylesheet();
    match result {
        Err(ParseError::Aborted(issue)) => assert!(issue.is_error()),
        other => panic!("Expected an aborted parse, got {other:?}"),
    }
}

#[test]
fn test_error_handler_sees_every_issue() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let settings = ParserSettings::default().with_error_handler(move |issue| {
        sink.borrow_mut().push(issue.message.clone());
        ErrorAction::Continue
    });
    let outcome = CSSParser::from_text("a { b: ; } } c { d: ; }", settings)
        .parse_stylesheet()
        .unwrap();
    assert_eq!(seen.borrow().len(), 3);
    assert_eq!(outcome.issues.len(), 3);
}

#[test]
fn test_trace_scopes_are_balanced() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let settings = ParserSettings::default().with_trace(move |scope, name, depth| {
        sink.borrow_mut().push((scope, name, depth));
    });
    let _ = CSSParser::from_text("@media print { h1 { color: red } }", settings)
        .parse_stylesheet()
        .unwrap();

    let events = events.borrow();
    let opens = events.iter().filter(|(scope, ..)| *scope == TraceScope::Open).count();
    let closes = events.iter().filter(|(scope, ..)| *scope == TraceScope::Close).count();
    assert!(opens > 0);
    assert_eq!(opens, closes);
    assert_eq!(events[0], (TraceScope::Open, "at-rule", 0));
}

// ========== At-rules ==========

#[test]
fn test_charset_rule() {
    let outcome = parse("@charset \"utf-8\"; h1 {}");
    let tree = &outcome.tree;
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::Charset, NodeKind::StyleRule]);
    assert_eq!(tree.text(nth(tree, tree.root(), 0)), "utf-8");
}

#[test]
fn test_misplaced_charset_rule() {
    let outcome = parse("h1 {} @charset \"utf-8\";");
    assert_eq!(outcome.issues.len(), 1);
    assert!(outcome.issues[0].is_error());
}

#[test]
fn test_import_rule() {
    let outcome = parse("@import \"a.css\" screen, print;");
    let tree = &outcome.tree;
    let import = nth(tree, tree.root(), 0);
    assert_eq!(tree.kind(import), NodeKind::ImportRule);
    assert_eq!(child_kinds(tree, import), vec![NodeKind::Url, NodeKind::MediaList]);
    assert_eq!(tree.text(nth(tree, import, 0)), "a.css");
    assert_eq!(tree.child_count(nth(tree, import, 1)), 2);
}

#[test]
fn test_namespace_rule() {
    let outcome = parse("@namespace svg url(http://www.w3.org/2000/svg);");
    let tree = &outcome.tree;
    let rule = nth(tree, tree.root(), 0);
    assert_eq!(
        child_kinds(tree, rule),
        vec![NodeKind::NamespaceRulePrefix, NodeKind::NamespaceRuleUrl]
    );
    assert_eq!(tree.text(nth(tree, rule, 0)), "svg");
    assert_eq!(tree.text(nth(tree, rule, 1)), "http://www.w3.org/2000/svg");
}

#[test]
fn test_media_rule() {
    let outcome = parse("@media only screen and (min-width: 100px), print { h1 { color: red } }");
    let tree = &outcome.tree;
    let media = nth(tree, tree.root(), 0);
    assert_eq!(child_kinds(tree, media), vec![NodeKind::MediaList, NodeKind::StyleRule]);

    let list = nth(tree, media, 0);
    assert_eq!(tree.child_count(list), 2);
    let query = nth(tree, list, 0);
    assert_eq!(
        child_kinds(tree, query),
        vec![NodeKind::MediaModifier, NodeKind::Medium, NodeKind::MediaExpr]
    );
    assert_eq!(tree.text(nth(tree, query, 0)), "only");
    let expr = nth(tree, query, 2);
    assert_eq!(child_kinds(tree, expr), vec![NodeKind::MediaFeature, NodeKind::Expr]);
    assert_eq!(tree.text(nth(tree, expr, 0)), "min-width");
}

#[test]
fn test_media_query_without_medium() {
    let outcome = parse("@media (color) and (orientation: landscape) {}");
    let tree = &outcome.tree;
    let query = nth(tree, nth(tree, nth(tree, tree.root(), 0), 0), 0);
    assert_eq!(child_kinds(tree, query), vec![NodeKind::MediaExpr, NodeKind::MediaExpr]);
    assert!(outcome.issues.is_empty());
}

#[test]
fn test_page_rule_with_margin_box() {
    let outcome = parse("@page :first { margin: 1in; @top-left { content: \"x\" } }");
    let tree = &outcome.tree;
    let page = nth(tree, tree.root(), 0);
    assert_eq!(child_kinds(tree, page), vec![NodeKind::PageSelector, NodeKind::PageRuleBlock]);
    assert_eq!(tree.text(nth(tree, page, 0)), ":first");
    let block = nth(tree, page, 1);
    assert_eq!(
        child_kinds(tree, block),
        vec![
            NodeKind::StyleDeclaration,
            NodeKind::PageMarginSymbol,
            NodeKind::StyleDeclarationList
        ]
    );
    assert_eq!(tree.text(nth(tree, block, 1)), "@top-left");
}

#[test]
fn test_font_face_rule() {
    let outcome = parse("@font-face { font-family: x; src: url(x.woff) }");
    let tree = &outcome.tree;
    let rule = nth(tree, tree.root(), 0);
    assert_eq!(tree.kind(rule), NodeKind::FontFaceRule);
    assert_eq!(tree.text(rule), "@font-face");
    assert_eq!(tree.child_count(nth(tree, rule, 0)), 2);
}

#[test]
fn test_keyframes_rule() {
    let outcome = parse("@-webkit-keyframes spin { from { opacity: 0 } 50%, to { opacity: 1 } }");
    let tree = &outcome.tree;
    let rule = nth(tree, tree.root(), 0);
    assert_eq!(tree.kind(rule), NodeKind::KeyframesRule);
    assert_eq!(tree.text(rule), "@-webkit-keyframes");
    assert_eq!(
        child_kinds(tree, rule),
        vec![
            NodeKind::KeyframesIdentifier,
            NodeKind::KeyframesSelector,
            NodeKind::StyleDeclarationList,
            NodeKind::KeyframesSelector,
            NodeKind::StyleDeclarationList
        ]
    );
    assert_eq!(tree.text(nth(tree, rule, 0)), "spin");
    assert_eq!(tree.child_count(nth(tree, rule, 3)), 2);
}

#[test]
fn test_supports_rule() {
    let outcome = parse("@supports not (display: grid) or (float: left) { p {} }");
    let tree = &outcome.tree;
    let rule = nth(tree, tree.root(), 0);
    assert_eq!(child_kinds(tree, rule), vec![NodeKind::SupportsCondition, NodeKind::StyleRule]);
    let condition = nth(tree, rule, 0);
    assert_eq!(
        child_kinds(tree, condition),
        vec![
            NodeKind::SupportsNegation,
            NodeKind::SupportsConditionOperator,
            NodeKind::SupportsConditionInParens
        ]
    );
    assert_eq!(tree.text(nth(tree, condition, 1)), "or");
    let negation = nth(tree, condition, 0);
    let parens = nth(tree, negation, 0);
    assert_eq!(child_kinds(tree, parens), vec![NodeKind::StyleDeclaration]);
}

#[test]
fn test_layer_rules() {
    let outcome = parse("@layer base, theme.dark; @layer base { p {} }");
    let tree = &outcome.tree;
    let statement = nth(tree, tree.root(), 0);
    assert_eq!(child_kinds(tree, statement), vec![NodeKind::LayerName, NodeKind::LayerName]);
    assert_eq!(tree.text(nth(tree, statement, 1)), "theme.dark");

    let block = nth(tree, tree.root(), 1);
    assert_eq!(child_kinds(tree, block), vec![NodeKind::LayerName, NodeKind::LayerRuleBlock]);
    assert_eq!(child_kinds(tree, nth(tree, block, 1)), vec![NodeKind::StyleRule]);
}

#[test]
fn test_unknown_rule_kept_verbatim() {
    let outcome = parse("@foo bar baz { x: y }");
    let tree = &outcome.tree;
    let rule = nth(tree, tree.root(), 0);
    assert_eq!(tree.kind(rule), NodeKind::UnknownRule);
    assert_eq!(tree.text(rule), "@foo");
    assert_eq!(tree.text(nth(tree, rule, 0)), "bar baz");
    assert_eq!(tree.text(nth(tree, rule, 1)), "x: y");
}

#[test]
fn test_css3_rule_in_css21() {
    let settings = ParserSettings::new(CssVersion::Css21);
    let outcome = CSSParser::from_text("@supports (a: b) { p {} } h1 {}", settings)
        .parse_stylesheet()
        .unwrap();
    let tree = &outcome.tree;
    assert_eq!(child_kinds(tree, tree.root()), vec![NodeKind::ErrorSkipTo, NodeKind::StyleRule]);
    assert_eq!(outcome.issues.len(), 1);

    let browser = ParserSettings::new(CssVersion::Css21).with_browser_compliant_mode(true);
    let outcome = CSSParser::from_text("@supports (a: b) { p {} }", browser)
        .parse_stylesheet()
        .unwrap();
    assert!(outcome.issues.is_empty());
}
