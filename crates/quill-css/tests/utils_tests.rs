//! Integration tests for the number, color, string and URL helpers.

use quill_css::utils::{
    extract_css_url, extract_string_value, get_as_css_url, is_color_value, is_hex_color, is_named_color,
    is_number_value, is_number_with_unit, is_percentage_value, is_url_value, split_number, unescape_url,
    url_needs_quotes,
};

// ========== Numbers ==========

#[test]
fn test_split_number() {
    assert_eq!(split_number("17in"), "17");
    assert_eq!(split_number("-3.25em"), "-3.25");
    assert_eq!(split_number(".5dpi"), ".5");
    assert_eq!(split_number("5.px"), "5");
    assert_eq!(split_number("."), "");
    assert_eq!(split_number("px"), "");
    assert_eq!(split_number(""), "");
}

#[test]
fn test_split_number_exponent() {
    assert_eq!(split_number("1e3px"), "1e3");
    assert_eq!(split_number("-2.5E-2x"), "-2.5E-2");
    assert_eq!(split_number("1em"), "1");
    assert_eq!(split_number("3e+"), "3");
    assert!(is_number_value("1e3"));
}

#[test]
fn test_number_values() {
    assert!(is_number_value("42"));
    assert!(is_number_value(" -0.5 "));
    assert!(!is_number_value("4px"));
    assert!(!is_number_value(""));
}

#[test]
fn test_number_with_unit() {
    assert!(is_number_with_unit("12px", false));
    assert!(is_number_with_unit("1.5em", false));
    assert!(is_number_with_unit("0", false));
    assert!(!is_number_with_unit("50%", false));
    assert!(is_number_with_unit("50%", true));
    assert!(!is_number_with_unit("12", false));
    assert!(!is_number_with_unit("px", false));
}

#[test]
fn test_percentage_value() {
    assert!(is_percentage_value("50%"));
    assert!(is_percentage_value("-12.5%"));
    assert!(!is_percentage_value("50"));
    assert!(!is_percentage_value("%"));
}

// ========== Colors ==========

#[test]
fn test_hex_colors() {
    assert!(is_hex_color("#fff"));
    assert!(is_hex_color("#FFFF"));
    assert!(is_hex_color("#a0b1c2"));
    assert!(is_hex_color("#a0b1c2d3"));
    assert!(!is_hex_color("#ff"));
    assert!(!is_hex_color("#ggg"));
    assert!(!is_hex_color("fff"));
}

#[test]
fn test_named_colors() {
    assert!(is_named_color("red"));
    assert!(is_named_color("RebeccaPurple"));
    assert!(is_named_color("transparent"));
    assert!(is_named_color("currentcolor"));
    assert!(!is_named_color("reddish"));
}

#[test]
fn test_color_values() {
    assert!(is_color_value("#000"));
    assert!(is_color_value("navy"));
    assert!(is_color_value("rgb(1, 2, 3)"));
    assert!(is_color_value("HSLA(0, 0%, 0%, .5)"));
    assert!(!is_color_value("rgb(1, 2, 3"));
    assert!(!is_color_value("10px"));
}

// ========== Strings ==========

#[test]
fn test_extract_string_value() {
    assert_eq!(extract_string_value("\"abc\""), "abc");
    assert_eq!(extract_string_value("'abc'"), "abc");
    assert_eq!(extract_string_value("\"abc'"), "\"abc'");
    assert_eq!(extract_string_value("abc"), "abc");
    assert_eq!(extract_string_value("\""), "\"");
    assert_eq!(extract_string_value("''"), "");
}

// ========== URLs ==========

#[test]
fn test_unescape_url() {
    assert_eq!(unescape_url("/foo/bla.gif"), "/foo/bla.gif");
    assert_eq!(unescape_url(r"/foo/bla\(\).gif"), "/foo/bla().gif");
    assert_eq!(unescape_url(r"\\\\server\\foo\\bla.gif"), r"\\server\foo\bla.gif");
    assert_eq!(unescape_url(r"a\20 b"), "a b");
    assert_eq!(unescape_url("a\\\nb"), "ab");
}

#[test]
fn test_get_as_css_url() {
    assert_eq!(get_as_css_url("a.png", false), "url(a.png)");
    assert_eq!(get_as_css_url("a.png", true), "url('a.png')");
    assert_eq!(get_as_css_url("a b.png", false), "url('a b.png')");
    assert_eq!(get_as_css_url("it's.png", false), "url(\"it's.png\")");
    assert_eq!(get_as_css_url("a'b\".png", false), "url('a\\'b\".png')");
    assert_eq!(get_as_css_url("bla(1).gif", false), "url('bla(1).gif')");
}

#[test]
fn test_url_needs_quotes() {
    assert!(!url_needs_quotes("http://example.com/a.png?x=1"));
    assert!(url_needs_quotes("a b"));
    assert!(url_needs_quotes("a(b)"));
    assert!(url_needs_quotes("a\"b"));
}

#[test]
fn test_url_values() {
    assert!(is_url_value("url(a.png)"));
    assert!(is_url_value(" none "));
    assert!(!is_url_value("url()"));
    assert!(!is_url_value("a.png"));

    assert_eq!(extract_css_url("url( 'a b.png' )"), Some("a b.png".to_string()));
    assert_eq!(extract_css_url(r"url(bla\(\).gif)"), Some("bla().gif".to_string()));
    assert_eq!(extract_css_url("none"), None);
    assert_eq!(extract_css_url("a.png"), None);
}
