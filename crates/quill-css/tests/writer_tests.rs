//! Integration tests for CSS serialization.

use quill_css::decl::{CascadingStyleSheet, Declaration, Expression, StyleRule};
use quill_css::{CssReader, CssVersion, CssWriter, ReaderSettings, WriteError, WriterSettings};

/// Read `css` with default settings
fn read(css: &str) -> CascadingStyleSheet {
    CssReader::new(ReaderSettings::default().with_use_source_location(false))
        .read_from_string(css)
        .unwrap()
        .value
}

/// Read `css` and write it back with default (pretty) settings
fn pretty(css: &str) -> String {
    CssWriter::new(WriterSettings::default())
        .write_stylesheet(&read(css))
        .unwrap()
}

/// Read `css` and write it back optimized
fn optimized(css: &str) -> String {
    CssWriter::new(WriterSettings::default().with_optimized_output(true))
        .write_stylesheet(&read(css))
        .unwrap()
}

// ========== Pretty output ==========

#[test]
fn test_single_declaration_rule() {
    assert_eq!(pretty("h1 { color: red }"), "h1 { color:red; }\n");
}

#[test]
fn test_multiple_declarations() {
    assert_eq!(
        pretty("h1 { color: red; margin: 0 }"),
        "h1 {\n  color:red;\n  margin:0;\n}\n"
    );
}

#[test]
fn test_selector_list_on_separate_lines() {
    assert_eq!(pretty("h1, h2 { color: red }"), "h1,\nh2 { color:red; }\n");
}

#[test]
fn test_rules_separated_by_empty_line() {
    assert_eq!(
        pretty("h1 { color: red } p { color: blue }"),
        "h1 { color:red; }\n\np { color:blue; }\n"
    );
}

#[test]
fn test_media_rule_nests_indented() {
    assert_eq!(
        pretty("@media screen { h1 { color: red } }"),
        "@media screen {\n  h1 { color:red; }\n}\n"
    );
}

#[test]
fn test_important_and_operators() {
    assert_eq!(
        pretty("p { font: 12px/1.5 serif !important }"),
        "p { font:12px/1.5 serif !important; }\n"
    );
}

#[test]
fn test_import_and_namespace_come_first() {
    assert_eq!(
        pretty("@import url(a.css) print; @namespace svg url(http://x); p { color: red }"),
        "@import url(a.css) print;\n@namespace svg url(http://x);\n\np { color:red; }\n"
    );
}

#[test]
fn test_header_and_charset() {
    let settings = WriterSettings::default()
        .with_header_text("generated")
        .with_content_charset("UTF-8");
    let css = CssWriter::new(settings)
        .write_stylesheet(&read("p { color: red }"))
        .unwrap();
    assert_eq!(css, "/*\n * generated\n */\n@charset \"UTF-8\";\np { color:red; }\n");
}

#[test]
fn test_footer_keeps_line_breaks_when_optimized() {
    let settings = WriterSettings::default()
        .with_optimized_output(true)
        .with_footer_text("one\ntwo");
    let css = CssWriter::new(settings)
        .write_stylesheet(&read("p { color: red }"))
        .unwrap();
    assert_eq!(css, "p{color:red}/*\n * one\n * two\n */\n");
}

#[test]
fn test_page_margin_block_has_no_terminator() {
    let source = "@page :first { margin: 1in; @top-left { content: \"x\" } }";
    assert_eq!(
        pretty(source),
        "@page :first {\n  margin:1in;\n  @top-left { content:\"x\"; }\n}\n"
    );
    assert_eq!(optimized(source), "@page :first{margin:1in;@top-left{content:\"x\"}}");
}

// ========== Optimized output ==========

#[test]
fn test_optimized_single_rule() {
    assert_eq!(optimized("h1 { color: red }"), "h1{color:red}");
}

#[test]
fn test_optimized_drops_separators() {
    assert_eq!(
        optimized("h1, h2 { color: red; margin: 0 } p { color: blue }"),
        "h1,h2{color:red;margin:0}p{color:blue}"
    );
}

#[test]
fn test_optimized_shortens_values() {
    assert_eq!(optimized("p { color: #ff0000; margin: 0px }"), "p{color:#f00;margin:0}");
}

#[test]
fn test_optimized_media_rule() {
    assert_eq!(
        optimized("@media screen, print { h1 { color: red } }"),
        "@media screen,print{h1{color:red}}"
    );
}

#[test]
fn test_remove_unnecessary_code_drops_empty_rules() {
    let sheet = read("h1 {} p { color: red } @media print { a {} }");
    let css = CssWriter::new(WriterSettings::optimized(CssVersion::LATEST))
        .write_stylesheet(&sheet)
        .unwrap();
    assert_eq!(css, "p{color:red}@media print{}");

    let keep = CssWriter::new(WriterSettings::default().with_optimized_output(true))
        .write_stylesheet(&sheet)
        .unwrap();
    assert_eq!(keep, "h1{}p{color:red}@media print{a{}}");
}

#[test]
fn test_rule_kind_can_be_suppressed() {
    let sheet = read("@font-face { font-family: x } p { color: red }");
    let settings = WriterSettings::default()
        .with_optimized_output(true)
        .with_write_font_face_rules(false);
    let css = CssWriter::new(settings).write_stylesheet(&sheet).unwrap();
    assert_eq!(css, "p{color:red}");
}

// ========== Version checks ==========

#[test]
fn test_supports_requires_css3() {
    let sheet = read("@supports (display: grid) { p { color: red } }");
    let err = CssWriter::new(WriterSettings::new(CssVersion::Css21))
        .write_stylesheet(&sheet)
        .unwrap_err();
    assert_eq!(
        err,
        WriteError::VersionRequirement {
            construct: "@supports".to_string(),
            required: CssVersion::Css30,
            requested: CssVersion::Css21,
        }
    );
}

#[test]
fn test_custom_property_requires_css3() {
    let sheet = read("p { --main: red }");
    let result = CssWriter::new(WriterSettings::new(CssVersion::Css21)).write_stylesheet(&sheet);
    assert!(matches!(
        result,
        Err(WriteError::VersionRequirement {
            required: CssVersion::Css30,
            ..
        })
    ));
    assert!(CssWriter::new(WriterSettings::new(CssVersion::Css30))
        .write_stylesheet(&sheet)
        .is_ok());
}

#[test]
fn test_plain_rule_writes_at_css1() {
    let css = CssWriter::new(WriterSettings::new(CssVersion::Css10))
        .write_stylesheet(&read("h1 { color: red }"))
        .unwrap();
    assert_eq!(css, "h1 { color:red; }\n");
}

// ========== Objects and settings ==========

#[test]
fn test_write_constructed_object() {
    let mut rule = StyleRule::new();
    rule.add_selector(quill_css::Selector::simple("div"));
    rule.add_declaration(Declaration::new("width", Expression::simple("10px"), false));
    rule.add_declaration(Declaration::new("color", Expression::simple("blue"), true));

    let writer = CssWriter::new(WriterSettings::default().with_optimized_output(true));
    assert_eq!(writer.write_object(&rule).unwrap(), "div{width:10px;color:blue !important}");
}

#[test]
fn test_simple_terms_compare_optimized() {
    assert_eq!(Expression::simple("#FF0000"), Expression::simple("#F00"));
    assert_eq!(Expression::simple("0px"), Expression::simple("0"));
    assert_ne!(Expression::simple("#F00"), Expression::simple("#f00"));
}

#[test]
fn test_settings_from_json() {
    let settings = WriterSettings::from_json(r#"{"version":"css21","optimized_output":true}"#).unwrap();
    assert_eq!(settings.version, CssVersion::Css21);
    assert!(settings.optimized_output);
    assert_eq!(settings.indent, "  ");
    assert!(settings.write_media_rules);
    assert!(WriterSettings::from_json("{").is_err());
    assert!(WriterSettings::from_json("[]").is_err());
    assert!(WriterSettings::from_json("42").is_err());
}

#[test]
fn test_round_trip() {
    let source = "@import \"a.css\" screen;\n\
                  h1, h2 > em { color: red; margin: 0 1px }\n\
                  @media print { p { font: 12px/1.5 serif !important } }\n\
                  @keyframes spin { from { opacity: 0 } to { opacity: 1 } }";
    let first = read(source);
    for settings in [WriterSettings::default(), WriterSettings::default().with_optimized_output(true)] {
        let css = CssWriter::new(settings).write_stylesheet(&first).unwrap();
        assert_eq!(read(&css), first, "round trip through {css:?}");
    }
}
