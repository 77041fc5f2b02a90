//! Value grammars for known properties.
//!
//! Validation works on the rendered value text, so it applies equally to
//! parsed declarations and to values set through the API.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::{is_color_value, is_number_value, is_number_with_unit, is_url_value};

/// Keywords every property accepts.
const GLOBAL_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert"];

/// `rect(a, b, c, d)` or the older `rect(a b c d)`; parts are lengths or `auto`.
static RECT: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    let part = r"([+-]?[0-9]*\.?[0-9]+(?:[a-zA-Z]+|%)?|auto)";
    Regex::new(&format!(
        r"(?i)^rect\s*\(\s*{part}(?:\s*,\s*|\s+){part}(?:\s*,\s*|\s+){part}(?:\s*,\s*|\s+){part}\s*\)$"
    ))
});

/// The grammar a property's value must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Anything goes.
    Free,
    /// One of the keywords.
    Enum(&'static [&'static str]),
    /// A keyword or an integer.
    EnumOrInt(&'static [&'static str]),
    /// A length, optionally a percentage.
    Number {
        /// Percentages are accepted.
        percentage: bool,
    },
    /// A keyword or a length.
    EnumOrNumber {
        /// Percentages are accepted.
        percentage: bool,
        /// Accepted keywords.
        values: &'static [&'static str],
    },
    /// Between `min` and `max` space separated lengths.
    Numbers {
        /// Percentages are accepted.
        percentage: bool,
        /// Fewest parts.
        min: usize,
        /// Most parts.
        max: usize,
    },
    /// Between `min` and `max` space separated keywords or lengths.
    EnumOrNumbers {
        /// Percentages are accepted.
        percentage: bool,
        /// Fewest parts.
        min: usize,
        /// Most parts.
        max: usize,
        /// Accepted keywords.
        values: &'static [&'static str],
    },
    /// Between `min` and `max` space separated keywords.
    Enums {
        /// Fewest parts.
        min: usize,
        /// Most parts.
        max: usize,
        /// Accepted keywords.
        values: &'static [&'static str],
    },
    /// A color.
    Color,
    /// A keyword or a color.
    EnumOrColor(&'static [&'static str]),
    /// Between `min` and `max` space separated colors.
    Colors {
        /// Fewest parts.
        min: usize,
        /// Most parts.
        max: usize,
    },
    /// Between `min` and `max` space separated keywords or colors.
    EnumOrColors {
        /// Fewest parts.
        min: usize,
        /// Most parts.
        max: usize,
        /// Accepted keywords.
        values: &'static [&'static str],
    },
    /// An integer.
    Long,
    /// A number.
    Double,
    /// A `url(...)`.
    Url,
    /// A keyword or a `url(...)`.
    EnumOrUrl(&'static [&'static str]),
    /// A keyword or a `rect(...)`.
    EnumOrRect(&'static [&'static str]),
}

impl PropertyKind {
    /// Check `value` against the grammar. Surrounding whitespace is ignored.
    #[must_use]
    pub fn is_valid_value(self, value: &str) -> bool {
        self.check(value, false)
    }

    /// Like [`Self::is_valid_value`], but a comma separated list of layers
    /// is accepted when every layer is valid.
    #[must_use]
    pub fn is_valid_layered_value(self, value: &str) -> bool {
        self.check(value, true)
    }

    fn check(self, value: &str, layered: bool) -> bool {
        let value = value.trim();
        if is_keyword(value, GLOBAL_KEYWORDS) {
            return true;
        }
        if matches!(self, Self::Free) {
            return true;
        }
        if value.is_empty() {
            return false;
        }
        if !layered {
            return self.is_valid_layer(value);
        }
        split_top_level(value, ',')
            .into_iter()
            .all(|layer| !layer.is_empty() && self.is_valid_layer(layer))
    }

    /// Fewest space separated parts a single value consists of.
    #[must_use]
    pub const fn min_argument_count(self) -> usize {
        match self {
            Self::Numbers { min, .. }
            | Self::EnumOrNumbers { min, .. }
            | Self::Enums { min, .. }
            | Self::Colors { min, .. }
            | Self::EnumOrColors { min, .. } => min,
            _ => 1,
        }
    }

    /// Most space separated parts a single value consists of.
    #[must_use]
    pub const fn max_argument_count(self) -> usize {
        match self {
            Self::Numbers { max, .. }
            | Self::EnumOrNumbers { max, .. }
            | Self::Enums { max, .. }
            | Self::Colors { max, .. }
            | Self::EnumOrColors { max, .. } => max,
            _ => 1,
        }
    }

    fn is_valid_layer(self, value: &str) -> bool {
        match self {
            Self::Free => true,
            Self::Enum(values) => is_keyword(value, values),
            Self::EnumOrInt(values) => is_keyword(value, values) || value.parse::<i64>().is_ok(),
            Self::Number { percentage } => is_number_with_unit(value, percentage),
            Self::EnumOrNumber { percentage, values } => {
                is_keyword(value, values) || is_number_with_unit(value, percentage)
            }
            Self::Numbers { percentage, min, max } => {
                parts_match(value, min, max, |part| is_number_with_unit(part, percentage))
            }
            Self::EnumOrNumbers {
                percentage,
                min,
                max,
                values,
            } => parts_match(value, min, max, |part| {
                is_keyword(part, values) || is_number_with_unit(part, percentage)
            }),
            Self::Enums { min, max, values } => parts_match(value, min, max, |part| is_keyword(part, values)),
            Self::Color => is_color_value(value),
            Self::EnumOrColor(values) => is_keyword(value, values) || is_color_value(value),
            Self::Colors { min, max } => parts_match(value, min, max, is_color_value),
            Self::EnumOrColors { min, max, values } => parts_match(value, min, max, |part| {
                is_keyword(part, values) || is_color_value(part)
            }),
            Self::Long => value.parse::<i64>().is_ok(),
            Self::Double => is_number_value(value),
            Self::Url => is_url_value(value),
            Self::EnumOrUrl(values) => is_keyword(value, values) || is_url_value(value),
            Self::EnumOrRect(values) => is_keyword(value, values) || is_rect_value(value),
        }
    }
}

/// Returns `true` for `rect(...)` with four lengths or `auto`.
#[must_use]
pub fn is_rect_value(value: &str) -> bool {
    RECT.as_ref().is_ok_and(|re| re.is_match(value.trim()))
}

fn is_keyword(value: &str, values: &[&str]) -> bool {
    values.iter().any(|v| v.eq_ignore_ascii_case(value))
}

fn parts_match(value: &str, min: usize, max: usize, check: impl Fn(&str) -> bool) -> bool {
    let parts = split_top_level(value, ' ');
    let parts: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    (min..=max).contains(&parts.len()) && parts.into_iter().all(check)
}

/// Split `value` at `separator` outside of parentheses and quotes. Any
/// whitespace counts as a `' '` separator. Parts are trimmed.
pub(crate) fn split_top_level(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (index, c) in value.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, _)
                if depth == 0 && (c == separator || (separator == ' ' && c.is_whitespace())) =>
            {
                parts.push(value[start..index].trim());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts
}
