//! Integration tests for parse tree to domain model conversion.

use std::cell::RefCell;
use std::rc::Rc;

use quill_css::CssVersion;
use quill_css::decl::{
    CascadingStyleSheet, ExpressionMember, MediaQueryModifier, PageMember, SelectorMember, SupportsConditionMember,
    SupportsConditionOperator,
};
use quill_css::handler::{ConvertError, ConverterSettings, CssConverter, convert_declaration_list, convert_stylesheet};
use quill_css::parser::{CSSParser, ParserSettings};
use quill_tree::NodeKind;

/// Parse and convert a stylesheet with default settings
fn sheet(css: &str) -> CascadingStyleSheet {
    let outcome = CSSParser::from_text(css, ParserSettings::default())
        .parse_stylesheet()
        .unwrap();
    convert_stylesheet(&outcome.tree, CssVersion::LATEST).unwrap()
}

/// Convert `css`, collecting every interpret-error message
fn sheet_with_messages(css: &str) -> (CascadingStyleSheet, Vec<String>) {
    let messages = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&messages);
    let outcome = CSSParser::from_text(css, ParserSettings::default())
        .parse_stylesheet()
        .unwrap();
    let sheet = CssConverter::new(ConverterSettings::default())
        .with_interpret_error_hook(move |message| sink.borrow_mut().push(message.to_string()))
        .convert_stylesheet(&outcome.tree, CssVersion::LATEST)
        .unwrap();
    let messages = messages.borrow().clone();
    (sheet, messages)
}

// ========== Entry points ==========

#[test]
fn test_wrong_root_is_rejected() {
    let outcome = CSSParser::from_text("color: red", ParserSettings::default())
        .parse_declaration_list()
        .unwrap();
    let err = convert_stylesheet(&outcome.tree, CssVersion::LATEST).unwrap_err();
    assert_eq!(
        err,
        ConvertError::WrongRoot {
            expected: NodeKind::Root,
            found: NodeKind::StyleDeclarationList,
        }
    );

    let outcome = CSSParser::from_text("p {}", ParserSettings::default())
        .parse_stylesheet()
        .unwrap();
    let err = convert_declaration_list(&outcome.tree, CssVersion::LATEST).unwrap_err();
    assert!(matches!(err, ConvertError::WrongRoot { found: NodeKind::Root, .. }));
}

#[test]
fn test_declaration_list() {
    let outcome = CSSParser::from_text("color: red; margin: 0 !important", ParserSettings::default())
        .parse_declaration_list()
        .unwrap();
    let list = convert_declaration_list(&outcome.tree, CssVersion::LATEST).unwrap();
    assert_eq!(list.count(), 2);
    let margin = list.declaration_of_property("margin").unwrap();
    assert!(margin.is_important());
    assert_eq!(margin.expression().text(), "0");
}

#[test]
fn test_strict_mode_converts_well_formed_input() {
    let outcome = CSSParser::from_text("a:hover, p > em { color: red }", ParserSettings::default())
        .parse_stylesheet()
        .unwrap();
    let settings = ConverterSettings::default().with_strict(true);
    let sheet = CssConverter::new(settings)
        .convert_stylesheet(&outcome.tree, CssVersion::LATEST)
        .unwrap();
    assert_eq!(sheet.style_rules().count(), 1);
}

// ========== Style rules ==========

#[test]
fn test_style_rule() {
    let sheet = sheet("h1 { background-color: #F00 }");
    assert_eq!(sheet.rules().count(), 1);
    let rule = sheet.style_rules().next().unwrap();
    assert_eq!(rule.selectors().count(), 1);
    assert_eq!(rule.selectors()[0].members().len(), 1);

    let decl = rule.declarations().declaration_of_property("background-color").unwrap();
    assert!(!decl.is_important());
    assert_eq!(decl.expression().text(), "#F00");
}

#[test]
fn test_selector_members() {
    let sheet = sheet("ul li.item > a[href^='http' i]:not(.x):nth-child(2n+1) {}");
    let rule = sheet.style_rules().next().unwrap();
    let members = rule.selectors()[0].members();

    let kinds: Vec<&str> = members
        .iter()
        .map(|member| match member {
            SelectorMember::Simple(_) => "simple",
            SelectorMember::Attribute(_) => "attribute",
            SelectorMember::Combinator(_) => "combinator",
            SelectorMember::Nested(_) => "nested",
            SelectorMember::FunctionLike(_) => "function",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "simple",
            "combinator",
            "simple",
            "simple",
            "combinator",
            "simple",
            "attribute",
            "nested",
            "function"
        ]
    );

    let SelectorMember::Attribute(attribute) = &members[6] else {
        panic!("expected an attribute selector");
    };
    assert_eq!(attribute.name(), "href");
    assert_eq!(attribute.value(), Some("'http'"));
    assert!(attribute.case().is_some());

    let SelectorMember::Nested(nested) = &members[7] else {
        panic!("expected a nested selector");
    };
    assert!(nested.is_negation());
    assert_eq!(nested.selectors().len(), 1);
}

#[test]
fn test_rule_without_selector_is_dropped() {
    let sheet = sheet("{ color: red } p { color: blue }");
    assert_eq!(sheet.style_rules().count(), 1);
}

#[test]
fn test_custom_property_without_value_is_kept() {
    let sheet = sheet("p { --empty:; --main: 1px solid; }");
    let rule = sheet.style_rules().next().unwrap();
    assert_eq!(rule.declarations().count(), 2);
    let empty = rule.declarations().declaration_of_property("--empty").unwrap();
    assert!(empty.is_custom_property());
    assert!(!empty.expression().members().has_any());
    let main = rule.declarations().declaration_of_property("--main").unwrap();
    assert_eq!(main.expression().text(), "1px solid");
}

#[test]
fn test_expression_members() {
    let sheet = sheet("p { font: 12px/1.5 serif; background: url(a.png) no-repeat; width: calc(100% - 2 * 3px) }");
    let rule = sheet.style_rules().next().unwrap();

    let font = rule.declarations().declaration_of_property("font").unwrap();
    assert_eq!(font.expression().members().len(), 4);
    assert!(font.expression().members()[1].is_operator());
    assert_eq!(font.expression().text(), "12px/1.5 serif");

    let background = rule.declarations().declaration_of_property("background").unwrap();
    let uri = background.expression().members()[0].as_uri().unwrap();
    assert_eq!(uri.uri(), "a.png");

    let width = rule.declarations().declaration_of_property("width").unwrap();
    assert!(matches!(width.expression().members()[0], ExpressionMember::Math(_)));
}

// ========== At-rules ==========

#[test]
fn test_import_and_namespace() {
    let sheet = sheet("@import url(\"a.css\") screen; @namespace svg url(http://www.w3.org/2000/svg); p {}");
    assert_eq!(sheet.import_rules().count(), 1);
    let import = &sheet.import_rules()[0];
    assert_eq!(import.location_uri().uri(), "a.css");
    assert_eq!(import.media_queries().len(), 1);
    assert_eq!(import.media_queries()[0].medium(), Some("screen"));

    assert_eq!(sheet.namespace_rules().count(), 1);
    let namespace = &sheet.namespace_rules()[0];
    assert_eq!(namespace.prefix(), Some("svg"));
    assert_eq!(namespace.url(), "http://www.w3.org/2000/svg");
    assert_eq!(sheet.rules().count(), 1);
}

#[test]
fn test_media_rule() {
    let sheet = sheet("@media only screen and (min-width: 100px), print { h1 { color: red } }");
    let media = sheet.media_rules().next().unwrap();
    assert_eq!(media.media_queries().len(), 2);

    let first = &media.media_queries()[0];
    assert_eq!(first.modifier(), MediaQueryModifier::Only);
    assert!(first.is_only());
    assert_eq!(first.medium(), Some("screen"));
    assert_eq!(first.expressions().len(), 1);
    assert_eq!(first.expressions()[0].feature(), "min-width");
    assert_eq!(first.expressions()[0].value().unwrap().text(), "100px");

    assert_eq!(media.rules().len(), 1);
    assert_eq!(sheet.all_style_rules().len(), 1);
}

#[test]
fn test_unknown_medium_reported_and_kept() {
    let (sheet, messages) = sheet_with_messages("@media foo { p { color: red } }");
    assert_eq!(messages, vec!["unknown medium 'foo'".to_string()]);
    let media = sheet.media_rules().next().unwrap();
    assert_eq!(media.media_queries()[0].medium(), Some("foo"));
}

#[test]
fn test_unknown_media_feature_reported() {
    let (_, messages) = sheet_with_messages("@media screen and (max-flavour: 2) { p {} }");
    assert_eq!(messages, vec!["unknown media feature 'max-flavour'".to_string()]);
}

#[test]
fn test_page_rule() {
    let sheet = sheet("@page :first { margin: 1in; @top-left { content: \"x\" } }");
    let page = sheet.page_rules().next().unwrap();
    assert_eq!(page.selectors().get_all(), vec![":first".to_string()]);
    assert_eq!(page.members().len(), 2);
    assert!(matches!(page.members()[0], PageMember::Declaration(_)));
    let PageMember::MarginBlock(block) = &page.members()[1] else {
        panic!("expected a margin block");
    };
    assert_eq!(block.margin_symbol(), "@top-left");
    assert_eq!(block.declarations().count(), 1);
}

#[test]
fn test_font_face_rule() {
    let sheet = sheet("@font-face { font-family: x; src: url(x.woff) }");
    let rule = sheet.font_face_rules().next().unwrap();
    assert_eq!(rule.declaration(), "@font-face");
    assert_eq!(rule.declarations().count(), 2);
}

#[test]
fn test_keyframes_rule() {
    let sheet = sheet("@-webkit-keyframes spin { from { opacity: 0 } 50%, to { opacity: 1 } }");
    let rule = sheet.keyframes_rules().next().unwrap();
    assert_eq!(rule.declaration(), "@-webkit-keyframes");
    assert_eq!(rule.animation_name(), "spin");
    assert_eq!(rule.blocks().len(), 2);
    assert_eq!(rule.blocks()[0].selectors().get_all(), vec!["from".to_string()]);
    assert_eq!(
        rule.blocks()[1].selectors().get_all(),
        vec!["50%".to_string(), "to".to_string()]
    );
}

#[test]
fn test_supports_rule() {
    let sheet = sheet("@supports not (display: grid) or (float: left) { p {} }");
    let rule = sheet.supports_rules().next().unwrap();
    let condition = rule.condition();
    assert_eq!(condition.len(), 3);
    assert!(matches!(condition[0], SupportsConditionMember::Negation(_)));
    assert_eq!(
        condition[1],
        SupportsConditionMember::Operator(SupportsConditionOperator::Or)
    );
    let SupportsConditionMember::Declaration(declaration) = &condition[2] else {
        panic!("expected a declaration");
    };
    assert_eq!(declaration.property(), "float");
    assert_eq!(rule.rules().len(), 1);
}

#[test]
fn test_layer_rules() {
    let sheet = sheet("@layer base, theme.dark; @layer base { p {} }");
    let layers: Vec<_> = sheet.layer_rules().collect();
    assert_eq!(layers.len(), 2);

    assert!(!layers[0].is_block());
    assert_eq!(
        layers[0].names().get_all(),
        vec!["base".to_string(), "theme.dark".to_string()]
    );

    assert!(layers[1].is_block());
    assert_eq!(layers[1].names().get_all(), vec!["base".to_string()]);
    assert_eq!(layers[1].rules().len(), 1);
}

#[test]
fn test_unknown_rule() {
    let sheet = sheet("@foo bar baz { x: y } @bar;");
    let rules: Vec<_> = sheet.unknown_rules().collect();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].declaration(), "@foo");
    assert_eq!(rules[0].parameter_list(), "bar baz");
    assert_eq!(rules[0].body(), Some("x: y"));
    assert_eq!(rules[1].declaration(), "@bar");
    assert_eq!(rules[1].body(), None);
}

#[test]
fn test_charset_and_skipped_regions_produce_nothing() {
    let sheet = sheet("@charset \"UTF-8\"; } p { color: red }");
    assert_eq!(sheet.rules().count(), 1);
    assert_eq!(sheet.style_rules().count(), 1);
}
