//! Integration tests for the one-call reading pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use quill_css::parser::{ErrorAction, ParseError, TraceScope};
use quill_css::{Charset, CssReader, CssVersion, ReadError, ReaderSettings};

/// A reader with default settings
fn reader() -> CssReader {
    CssReader::new(ReaderSettings::default())
}

// ========== Settings ==========

#[test]
fn test_default_settings() {
    let settings = ReaderSettings::default();
    assert_eq!(settings.version, CssVersion::LATEST);
    assert_eq!(settings.fallback_charset, Charset::Utf8);
    assert!(settings.use_source_location);
    assert!(!settings.strict);
    assert!(!settings.browser_compliant_mode);
}

#[test]
fn test_settings_from_json() {
    let settings =
        ReaderSettings::from_json(r#"{"version":"css21","fallback_charset":"iso88591","strict":true}"#).unwrap();
    assert_eq!(settings.version, CssVersion::Css21);
    assert_eq!(settings.fallback_charset, Charset::Iso88591);
    assert!(settings.strict);
    assert!(settings.use_source_location);

    assert_eq!(ReaderSettings::from_json("{}").unwrap(), ReaderSettings::default());
    assert!(ReaderSettings::from_json("[]").is_err());
    assert!(ReaderSettings::from_json("\"css21\"").is_err());
}

#[test]
fn test_settings_builders() {
    let settings = ReaderSettings::new(CssVersion::Css21)
        .with_browser_compliant_mode(true)
        .with_keep_deprecated_properties(true)
        .with_use_source_location(false);
    assert_eq!(settings.version, CssVersion::Css21);
    assert!(settings.browser_compliant_mode);
    assert!(settings.keep_deprecated_properties);
    assert!(!settings.use_source_location);
    assert_eq!(reader().settings(), &ReaderSettings::default());
}

// ========== Reading ==========

#[test]
fn test_read_from_string() {
    let parsed = reader().read_from_string("h1 { color: red } p { margin: 0 }").unwrap();
    assert!(parsed.issues.is_empty());
    assert!(!parsed.has_errors());
    assert_eq!(parsed.value.style_rules().count(), 2);
}

#[test]
fn test_recovered_errors_are_reported() {
    let parsed = reader().read_from_string("h1 { color: red } } p { margin: 0 }").unwrap();
    assert!(parsed.has_errors());
    assert_eq!(parsed.value.style_rules().count(), 2);
}

#[test]
fn test_warnings_are_not_errors() {
    let parsed = reader().read_from_string("p { *zoom: 1; color: red }").unwrap();
    assert_eq!(parsed.issues.len(), 1);
    assert!(!parsed.has_errors());
    let rule = parsed.value.style_rules().next().unwrap();
    assert_eq!(rule.declarations().count(), 1);

    let keep = CssReader::new(ReaderSettings::default().with_keep_deprecated_properties(true));
    let parsed = keep.read_from_string("p { *zoom: 1; color: red }").unwrap();
    assert!(parsed.issues.is_empty());
    assert_eq!(parsed.value.style_rules().next().unwrap().declarations().count(), 2);
}

#[test]
fn test_strict_reading_fails() {
    let strict = CssReader::new(ReaderSettings::default().with_strict(true));
    let err = strict.read_from_string("h1 { color: red } } p {}").unwrap_err();
    assert!(matches!(err, ReadError::Parse(ParseError::Syntax(_))));
}

#[test]
fn test_read_from_bytes_with_charset_rule() {
    let bytes = b"@charset \"ISO-8859-1\"; p { content: \"caf\xe9\" }";
    let parsed = reader().read_from_bytes(bytes).unwrap();
    let rule = parsed.value.style_rules().next().unwrap();
    let content = rule.declarations().declaration_of_property("content").unwrap();
    assert_eq!(content.expression().text(), "\"caf\u{e9}\"");
}

#[test]
fn test_read_from_bytes_with_fallback() {
    /// The `content` value of the only rule
    fn content(reader: &CssReader, bytes: &[u8]) -> String {
        let parsed = reader.read_from_bytes(bytes).unwrap();
        let rule = parsed.value.style_rules().next().unwrap();
        rule.declarations().declaration_of_property("content").unwrap().expression().text()
    }

    let bytes = b"p { content: \"caf\xe9\" }";
    assert_eq!(content(&reader(), bytes), "\"caf\u{fffd}\"");

    let latin1 = CssReader::new(ReaderSettings::default().with_fallback_charset(Charset::Iso88591));
    assert_eq!(content(&latin1, bytes), "\"caf\u{e9}\"");
}

#[test]
fn test_read_from_bytes_with_bom() {
    let parsed = reader().read_from_bytes(b"\xef\xbb\xbfp { color: red }").unwrap();
    assert_eq!(parsed.value.style_rules().count(), 1);
    assert!(parsed.issues.is_empty());
}

#[test]
fn test_unsupported_charset() {
    let err = reader().read_from_bytes(b"@charset \"EBCDIC\"; p {}").unwrap_err();
    assert!(matches!(err, ReadError::Decode(_)));
}

#[test]
fn test_read_from_utf16() {
    let units: Vec<u16> = "p { color: red }".encode_utf16().collect();
    let parsed = reader().read_from_utf16(&units).unwrap();
    assert_eq!(parsed.value.style_rules().count(), 1);

    let broken = [u16::from(b'p'), 0xD800, u16::from(b'{')];
    assert!(matches!(reader().read_from_utf16(&broken), Err(ReadError::Decode(_))));
}

#[test]
fn test_read_declaration_list() {
    let parsed = reader()
        .read_declaration_list("color: red; background: url(a.png) !important")
        .unwrap();
    assert_eq!(parsed.value.count(), 2);
    let background = parsed.value.declaration_of_property("background").unwrap();
    assert!(background.is_important());
}

#[test]
fn test_is_valid_css() {
    let reader = reader();
    assert!(reader.is_valid_css("h1 { color: red }"));
    assert!(reader.is_valid_css("p { *zoom: 1 }"));
    assert!(!reader.is_valid_css("h1 { color: red"));
    assert!(!reader.is_valid_css("} h1 {}"));
}

// ========== Hooks ==========

#[test]
fn test_error_handler_is_shared_between_reads() {
    let count = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&count);
    let reader = reader().with_error_handler(move |_| {
        *seen.borrow_mut() += 1;
        ErrorAction::Continue
    });
    let _ = reader.read_from_string("} p {}").unwrap();
    let _ = reader.read_from_string("} p {}").unwrap();
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn test_error_handler_can_abort() {
    let reader = reader().with_error_handler(|_| ErrorAction::Abort);
    let err = reader.read_from_string("} p {}").unwrap_err();
    assert!(matches!(err, ReadError::Parse(ParseError::Aborted(_))));
}

#[test]
fn test_interpret_error_hook() {
    let messages = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&messages);
    let reader = reader().with_interpret_error_hook(move |message| sink.borrow_mut().push(message.to_string()));
    let parsed = reader.read_from_string("@media tablet { p {} }").unwrap();
    assert_eq!(parsed.value.media_rules().count(), 1);
    assert_eq!(*messages.borrow(), vec!["unknown medium 'tablet'".to_string()]);
}

#[test]
fn test_trace_sink() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let reader = reader().with_trace(move |scope, name, depth| sink.borrow_mut().push((scope, name, depth)));
    let _ = reader.read_from_string("@media print { p {} }").unwrap();

    let events = events.borrow();
    assert_eq!(events.first(), Some(&(TraceScope::Open, "at-rule", 0)));
    let opens = events.iter().filter(|(scope, ..)| *scope == TraceScope::Open).count();
    let closes = events.iter().filter(|(scope, ..)| *scope == TraceScope::Close).count();
    assert_eq!(opens, closes);
}
