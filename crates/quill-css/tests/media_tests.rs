//! Integration tests for media types, media features and media lists.

use quill_css::decl::Change;
use quill_css::media::{MediaExpressionFeature, MediaList, Medium, UnknownMedium};

// ========== Medium ==========

#[test]
fn test_medium_lookup() {
    assert_eq!(Medium::from_name("screen"), Some(Medium::Screen));
    assert_eq!(Medium::from_name(" PRINT "), Some(Medium::Print));
    assert_eq!(Medium::from_name("tv"), Some(Medium::Tv));
    assert_eq!(Medium::from_name("paper"), None);
    assert_eq!(Medium::Projection.name(), "projection");
}

#[test]
fn test_deprecated_medium() {
    assert!(Medium::Aural.is_deprecated());
    assert!(!Medium::Speech.is_deprecated());
}

// ========== Media features ==========

#[test]
fn test_feature_lookup() {
    assert_eq!(
        MediaExpressionFeature::from_name("min-width"),
        Some(MediaExpressionFeature::MinWidth)
    );
    assert_eq!(
        MediaExpressionFeature::from_name("Prefers-Color-Scheme"),
        Some(MediaExpressionFeature::PrefersColorScheme)
    );
    assert_eq!(MediaExpressionFeature::from_name("max-flavour"), None);
    assert_eq!(MediaExpressionFeature::AspectRatio.name(), "aspect-ratio");
}

#[test]
fn test_vendor_features() {
    let webkit = MediaExpressionFeature::from_name("-webkit-min-device-pixel-ratio").unwrap();
    assert!(webkit.is_webkit_specific());
    assert!(webkit.is_vendor_specific());

    let moz = MediaExpressionFeature::from_name("min--moz-device-pixel-ratio").unwrap();
    assert!(moz.is_mozilla_specific());
    assert!(moz.is_vendor_specific());

    let ms = MediaExpressionFeature::from_name("-ms-high-contrast").unwrap();
    assert!(ms.is_microsoft_specific());

    assert!(!MediaExpressionFeature::Width.is_vendor_specific());
}

// ========== Media list ==========

#[test]
fn test_add_is_unique() {
    let mut list = MediaList::new();
    assert_eq!(list.add(Medium::Screen), Change::Changed);
    assert_eq!(list.add(Medium::Screen), Change::Unchanged);
    assert_eq!(list.count(), 1);
    assert!(list.contains(Medium::Screen));
}

#[test]
fn test_insertion_order_is_kept() {
    let mut list = MediaList::new();
    let _ = list.add(Medium::Print);
    let _ = list.add(Medium::Screen);
    let _ = list.add(Medium::Print);
    assert_eq!(list.media(), &[Medium::Print, Medium::Screen]);
    assert_eq!(list.media_string(), "print, screen");
    assert_eq!(list.media_string_with(","), "print,screen");
    assert_eq!(list.to_string(), "print, screen");
}

#[test]
fn test_add_all() {
    let mut list = MediaList::from(Medium::Tv);
    assert!(list.add_all([Medium::Tv, Medium::Tty]).is_changed());
    assert!(list.add_all([Medium::Tv, Medium::Tty]).is_unchanged());
    assert_eq!(list.count(), 2);
}

#[test]
fn test_remove_and_clear() {
    let mut list: MediaList = [Medium::Screen, Medium::Print].into_iter().collect();
    assert_eq!(list.remove(Medium::Tv), Change::Unchanged);
    assert_eq!(list.remove(Medium::Screen), Change::Changed);
    assert_eq!(list.media(), &[Medium::Print]);
    assert_eq!(list.clear(), Change::Changed);
    assert_eq!(list.clear(), Change::Unchanged);
    assert!(list.is_empty());
}

#[test]
fn test_all_and_screen_usability() {
    let empty = MediaList::new();
    assert!(empty.has_no_media_or_all());
    assert!(empty.is_usable_for_screen());
    assert_eq!(empty.media_string(), "");

    let all = MediaList::from(Medium::All);
    assert!(all.contains_or_all(Medium::Print));
    assert!(all.is_usable_for_screen());

    let print = MediaList::from(Medium::Print);
    assert!(!print.has_no_media_or_all());
    assert!(!print.contains_or_all(Medium::Screen));
    assert!(!print.is_usable_for_screen());

    let both: MediaList = [Medium::Print, Medium::Screen].into_iter().collect();
    assert!(both.is_usable_for_screen());
}

#[test]
fn test_parse_media_string() {
    let list: MediaList = "screen, Print,,tv".parse().unwrap();
    assert_eq!(list.media(), &[Medium::Screen, Medium::Print, Medium::Tv]);

    let empty: MediaList = "".parse().unwrap();
    assert!(empty.is_empty());

    let err = "screen, paper".parse::<MediaList>().unwrap_err();
    assert_eq!(err, UnknownMedium("paper".to_string()));
    assert_eq!(err.to_string(), "unknown medium 'paper'");
}
