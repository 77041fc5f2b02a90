//! Quoted string helpers.

/// Strip one pair of matching `"` or `'` quotes from `value`.
///
/// Values that are not fully quoted come back unchanged.
#[must_use]
pub fn extract_string_value(value: &str) -> &str {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first @ ('"' | '\'')), Some(last)) if first == last && value.len() >= 2 => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}
