//! Output customizers: extra vendor specific declarations emitted in
//! front of the standard one.

use super::registry::Property;
use super::value::CssValue;
use super::vendor::VendorPrefix;

/// Produces the vendor specific declarations for a property value, or
/// `None` to emit only the standard declaration.
///
/// The value passed in is trimmed and never empty.
pub type Customizer = fn(&Property, &str, bool) -> Option<Vec<CssValue>>;

/// `opacity` for old Internet Explorer, Firefox and WebKit.
///
/// Non-numeric values get no special treatment.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn customize_opacity(property: &Property, value: &str, important: bool) -> Option<Vec<CssValue>> {
    let opacity = value.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let percent = (opacity * 100.0) as i64;
    Some(vec![
        CssValue::with_name(
            property,
            VendorPrefix::Microsoft.apply("filter"),
            format!("\"progid:DXImageTransform.Microsoft.Alpha(Opacity={percent})\""),
            important,
        ),
        CssValue::with_name(property, "filter", format!("alpha(opacity={percent})"), important),
        CssValue::prefixed(property, VendorPrefix::Mozilla, value, important),
        CssValue::prefixed(property, VendorPrefix::Webkit, value, important),
    ])
}

/// `border-radius` and its corner longhands for Firefox, WebKit and
/// Konqueror.
#[must_use]
pub fn customize_border_radius(property: &Property, value: &str, important: bool) -> Option<Vec<CssValue>> {
    Some(
        [VendorPrefix::Mozilla, VendorPrefix::Webkit, VendorPrefix::Khtml]
            .into_iter()
            .map(|vendor| CssValue::prefixed(property, vendor, value, important))
            .collect(),
    )
}
