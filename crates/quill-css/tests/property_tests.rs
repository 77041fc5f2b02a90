//! Integration tests for the property registry, customizers, shorthands
//! and validation.

use quill_css::decl::{Declaration, Expression};
use quill_css::property::vendor::VendorPrefix;
use quill_css::property::{
    CssUnit, ShorthandLayout, ShorthandMismatch, ValidationProblem, is_known_property, is_shorthand,
    is_valid_value, is_vendor_specific, lookup, shorthand, validate_declarations, validate_stylesheet,
};
use quill_css::writer::{CssWritable, WriterSettings};
use quill_css::{CssReader, ReaderSettings};

/// Build a declaration from space separated simple terms
fn declaration(property: &str, value: &str, important: bool) -> Declaration {
    let mut expression = Expression::new();
    for part in value.split_whitespace() {
        expression.add_term_simple(part);
    }
    Declaration::new(property, expression, important)
}

/// `(property, value)` pairs of split declarations
fn pairs(declarations: &[Declaration]) -> Vec<(String, String)> {
    declarations
        .iter()
        .map(|d| (d.property().to_string(), d.expression().text()))
        .collect()
}

// ========== Registry ==========

#[test]
fn test_lookup_ignores_case() {
    assert_eq!(lookup("color").unwrap().name(), "color");
    assert_eq!(lookup("COLOR").unwrap().name(), "color");
    assert!(lookup("colour").is_none());
}

#[test]
fn test_known_properties() {
    assert!(is_known_property("margin-top"));
    assert!(is_known_property("-webkit-transition"));
    assert!(is_known_property("-MOZ-border-radius"));
    assert!(is_known_property("--anything"));
    assert!(!is_known_property("colr"));
    assert!(!is_known_property("-webkit-colr"));
}

#[test]
fn test_enum_grammar() {
    assert!(is_valid_value("border-left-style", "none"));
    assert!(is_valid_value("border-left-style", "DASHED"));
    assert!(!is_valid_value("border-left-style", "any"));
    assert!(is_valid_value("border-left-style", "inherit"));
}

#[test]
fn test_enum_or_int_grammar() {
    for value in ["-500", "0", "1000", "auto"] {
        assert!(is_valid_value("z-index", value), "{value}");
    }
    assert!(!is_valid_value("z-index", "1.5"));
    assert!(!is_valid_value("z-index", "high"));
}

#[test]
fn test_length_and_color_grammars() {
    assert!(is_valid_value("width", "10px"));
    assert!(is_valid_value("width", "auto"));
    assert!(!is_valid_value("width", "wide"));
    assert!(is_valid_value("color", "#fff"));
    assert!(!is_valid_value("color", "12px"));
    assert!(is_valid_value("margin", "0 auto 1em"));
    assert!(!is_valid_value("margin", "1px 2px 3px 4px 5px"));
}

#[test]
fn test_comma_lists_only_for_layered_properties() {
    assert!(!is_valid_value("z-index", "1, 2"));
    assert!(!is_valid_value("color", "red, blue"));
    assert!(!is_valid_value("border-left-style", "none, solid"));
    assert!(!lookup("color").unwrap().is_multi_layer());

    assert!(lookup("background-repeat").unwrap().is_multi_layer());
    assert!(is_valid_value("background-repeat", "no-repeat, repeat-x"));
    assert!(is_valid_value("background-image", "url(a.png), none"));
    assert!(!is_valid_value("background-repeat", "no-repeat, sideways"));
    assert!(!is_valid_value("background-repeat", "no-repeat,"));
}

#[test]
fn test_unknown_property_accepts_anything() {
    assert!(is_valid_value("colr", "whatever"));
}

#[test]
fn test_units_and_vendors() {
    assert_eq!(CssUnit::of_value("12px"), Some(CssUnit::Px));
    assert_eq!(CssUnit::of_value("auto"), None);
    assert_eq!(CssUnit::Em.format(2), "2em");

    assert!(is_vendor_specific("-webkit-box-shadow"));
    assert!(!is_vendor_specific("box-shadow"));
    assert_eq!(VendorPrefix::Opera.apply("transform"), "-o-transform");
}

// ========== Customizers ==========

#[test]
fn test_opacity_customizer() {
    let opacity = lookup("opacity").unwrap();
    assert!(opacity.has_customizer());

    let values = opacity.create_values("0.5", false);
    let names: Vec<&str> = values.iter().map(|v| v.name()).collect();
    assert_eq!(
        names,
        vec!["-ms-filter", "filter", "-moz-opacity", "-webkit-opacity", "opacity"]
    );
    assert_eq!(
        values[0].value(),
        "\"progid:DXImageTransform.Microsoft.Alpha(Opacity=50)\""
    );
    assert_eq!(values[1].value(), "alpha(opacity=50)");
    assert_eq!(values[4].value(), "0.5");
}

#[test]
fn test_opacity_customizer_ignores_keywords() {
    let values = lookup("opacity").unwrap().create_values("inherit", false);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].name(), "opacity");
}

#[test]
fn test_border_radius_customizer() {
    let values = lookup("border-radius").unwrap().create_values("4px", true);
    let names: Vec<&str> = values.iter().map(|v| v.name()).collect();
    assert_eq!(
        names,
        vec!["-moz-border-radius", "-webkit-border-radius", "-khtml-border-radius", "border-radius"]
    );
    assert!(values.iter().all(|v| v.is_important()));
}

#[test]
fn test_css_value_output() {
    let value = lookup("color").unwrap().create_value("red", true);
    let settings = WriterSettings::default();
    assert_eq!(value.as_css_string(&settings, 0).unwrap(), "color:red !important;");

    let declaration = value.to_declaration();
    assert_eq!(declaration.property(), "color");
    assert!(declaration.is_important());
    assert_eq!(declaration.expression().text(), "red");
}

// ========== Shorthands ==========

#[test]
fn test_margin_two_values() {
    let margin = shorthand("margin").unwrap();
    assert_eq!(margin.layout(), ShorthandLayout::Alignment);
    let parts = margin.split(&declaration("margin", "1px 2px", false)).unwrap();
    assert_eq!(
        pairs(&parts),
        vec![
            ("margin-top".to_string(), "1px".to_string()),
            ("margin-right".to_string(), "2px".to_string()),
            ("margin-bottom".to_string(), "1px".to_string()),
            ("margin-left".to_string(), "2px".to_string()),
        ]
    );
}

#[test]
fn test_padding_three_values_important() {
    let parts = shorthand("padding")
        .unwrap()
        .split(&declaration("padding", "1px 2px 3px", true))
        .unwrap();
    let values: Vec<String> = parts.iter().map(|d| d.expression().text()).collect();
    assert_eq!(values, vec!["1px", "2px", "3px", "2px"]);
    assert!(parts.iter().all(Declaration::is_important));
}

#[test]
fn test_plain_shorthand_fills_defaults() {
    let parts = shorthand("outline")
        .unwrap()
        .split(&declaration("outline", "dotted", false))
        .unwrap();
    assert_eq!(
        pairs(&parts),
        vec![
            ("outline-width".to_string(), "3px".to_string()),
            ("outline-style".to_string(), "dotted".to_string()),
            ("outline-color".to_string(), "black".to_string()),
        ]
    );
}

#[test]
fn test_flex_keywords() {
    let flex = shorthand("flex").unwrap();
    let parts = flex.split(&declaration("flex", "none", false)).unwrap();
    let values: Vec<String> = parts.iter().map(|d| d.expression().text()).collect();
    assert_eq!(values, vec!["0", "0", "auto"]);

    let parts = flex.split(&declaration("flex", "auto", false)).unwrap();
    let values: Vec<String> = parts.iter().map(|d| d.expression().text()).collect();
    assert_eq!(values, vec!["1", "1", "auto"]);
}

#[test]
fn test_split_wrong_property() {
    let err = shorthand("margin")
        .unwrap()
        .split(&declaration("padding", "1px", false))
        .unwrap_err();
    assert_eq!(
        err,
        ShorthandMismatch {
            expected: "margin".to_string(),
            found: "padding".to_string(),
        }
    );
}

#[test]
fn test_is_shorthand() {
    assert!(is_shorthand("margin"));
    assert!(is_shorthand("Border-Style"));
    assert!(!is_shorthand("margin-top"));
    assert!(shorthand("color").is_none());
}

// ========== Validation ==========

#[test]
fn test_validate_stylesheet() {
    let css = "p { colr: red; color: 12px; --x: y; -webkit-transition: none }\n\
               @media print { a { z-index: high } }";
    let sheet = CssReader::new(ReaderSettings::default()).read_from_string(css).unwrap().value;
    let issues = validate_stylesheet(&sheet);
    let found: Vec<(ValidationProblem, &str)> = issues
        .iter()
        .map(|issue| (issue.problem, issue.property.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (ValidationProblem::UnknownProperty, "colr"),
            (ValidationProblem::InvalidValue, "color"),
            (ValidationProblem::InvalidValue, "z-index"),
        ]
    );
    assert_eq!(issues[1].value, "12px");
    assert!(issues[0].location.is_some());
    assert_eq!(issues[0].to_string().split(": ").last(), Some("unknown property 'colr'"));
}

#[test]
fn test_validation_warns_once_per_problem() {
    let css = "a { colr: red } b { colr: blue }";
    let sheet = CssReader::new(ReaderSettings::default()).read_from_string(css).unwrap().value;
    let issues = validate_stylesheet(&sheet);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].message(), issues[1].message());
    assert!(quill_common::has_warned("CSS", "unknown property 'colr'"));
}

#[test]
fn test_validate_declarations() {
    let list = CssReader::new(ReaderSettings::default())
        .read_declaration_list("width: 10px; border-left-style: any")
        .unwrap()
        .value;
    let issues = validate_declarations(&list);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].problem, ValidationProblem::InvalidValue);
    assert_eq!(issues[0].property, "border-left-style");
}
