//! Tests for versions, locations and the warning registry.

use quill_common::{
    CssVersion, LocationSlot, SourceArea, SourceLocation, clear_warnings, has_warned, warn_once,
};

// ========== versions ==========

#[test]
fn test_version_ordering() {
    assert!(CssVersion::Css10 < CssVersion::Css21);
    assert!(CssVersion::Css21 < CssVersion::Css30);
    assert_eq!(CssVersion::LATEST, CssVersion::Css30);
    assert_eq!(CssVersion::default(), CssVersion::Css30);
}

#[test]
fn test_version_satisfies() {
    assert!(CssVersion::Css30.satisfies(CssVersion::Css21));
    assert!(CssVersion::Css21.satisfies(CssVersion::Css21));
    assert!(!CssVersion::Css21.satisfies(CssVersion::Css30));
}

#[test]
fn test_version_text() {
    assert_eq!(CssVersion::Css21.to_string(), "CSS 2.1");
    assert_eq!(CssVersion::Css30.version_number(), "3.0");
    assert_eq!("CSS 1.0".parse::<CssVersion>().ok(), Some(CssVersion::Css10));
}

#[test]
fn test_version_serde() {
    let json = serde_json::to_string(&CssVersion::Css21).unwrap();
    assert_eq!(json, "\"css21\"");
    let back: CssVersion = serde_json::from_str("\"css30\"").unwrap();
    assert_eq!(back, CssVersion::Css30);
}

// ========== locations ==========

#[test]
fn test_location_display() {
    let begin = SourceLocation::new(3, 7);
    assert_eq!(begin.to_string(), "3:7");
    assert_eq!(SourceArea::at(begin).to_string(), "3:7");
    let area = SourceArea::new(begin, SourceLocation::new(4, 1));
    assert_eq!(area.to_string(), "3:7-4:1");
}

#[test]
fn test_location_slot_ignored_by_equality() {
    let a = LocationSlot::from(SourceArea::at(SourceLocation::new(1, 1)));
    let b = LocationSlot::NONE;
    assert_eq!(a, b);
    assert!(a.is_set());
    assert!(!b.is_set());
}

// ========== warnings ==========

// Both assertions live in one test: the registry is process-wide and tests run in parallel.
#[test]
fn test_warn_once_and_clear() {
    warn_once("test", "first warning of its kind");
    assert!(has_warned("test", "first warning of its kind"));
    assert!(!has_warned("test", "never emitted"));

    clear_warnings();
    assert!(!has_warned("test", "first warning of its kind"));
}
