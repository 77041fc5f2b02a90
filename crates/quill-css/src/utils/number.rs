//! Numeric value helpers.

use std::sync::LazyLock;

use regex::Regex;

use crate::property::unit::CssUnit;

/// Optional sign, then digits with an optional fraction or a bare fraction,
/// then an optional exponent. A trailing `.` without digits is not part of
/// the number, and neither is an `e` without exponent digits (`1em`).
static LEADING_NUMBER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?"));

/// Return the longest leading numeric prefix of `value`.
///
/// The prefix is an optional sign, a digit sequence and an optional
/// fractional part, or a fractional part on its own, followed by an
/// optional exponent. The rest of the string is left untouched. When no
/// digit precedes the first non-numeric character the result is empty.
///
/// ```
/// use quill_css::utils::split_number;
///
/// assert_eq!(split_number("17in"), "17");
/// assert_eq!(split_number(".5dpi"), ".5");
/// assert_eq!(split_number("."), "");
/// ```
#[must_use]
pub fn split_number(value: &str) -> &str {
    LEADING_NUMBER
        .as_ref()
        .ok()
        .and_then(|re| re.find(value))
        .map_or("", |m| m.as_str())
}

/// Check whether the whole of `value` is a plain number.
#[must_use]
pub fn is_number_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && split_number(trimmed).len() == trimmed.len()
}

/// Check whether `value` is a number followed by a known unit, e.g. `12px`.
///
/// A bare `0` counts as a length as well. Percentages are accepted only
/// when `with_percentage` is set.
#[must_use]
pub fn is_number_with_unit(value: &str, with_percentage: bool) -> bool {
    let trimmed = value.trim();
    if trimmed == "0" {
        return true;
    }
    let Some(unit) = CssUnit::of_value(trimmed) else {
        return false;
    };
    if unit == CssUnit::Percentage && !with_percentage {
        return false;
    }
    is_number_value(&trimmed[..trimmed.len() - unit.suffix().len()])
}

/// Check whether `value` is a number followed by `%`.
#[must_use]
pub fn is_percentage_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed
        .strip_suffix('%')
        .is_some_and(|number| is_number_value(number) && !number.ends_with(char::is_whitespace))
}
