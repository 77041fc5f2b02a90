//! `url()` helpers.
//!
//! A [`crate::decl::Uri`] always stores the resolved URL, with escapes
//! removed. Escaping and quoting happen again when the URL is written.

use super::string::extract_string_value;

const URL_OPEN: &str = "url(";
const URL_CLOSE: char = ')';

/// Resolve backslash escapes in the raw content of a `url()` reference.
///
/// - `\` followed by ASCII punctuation or a space yields that character.
/// - `\` followed by a newline is removed together with the newline.
/// - `\` followed by up to six hex digits yields that code point; a single
///   space after the digits is swallowed.
/// - `\r` and `\f` cannot be escaped and are kept as they are.
/// - Any other escaped character stands for itself.
///
/// ```
/// use quill_css::utils::unescape_url;
///
/// assert_eq!(unescape_url(r"/foo/bla\(\).gif"), "/foo/bla().gif");
/// assert_eq!(unescape_url(r"\\\\server\\foo\\bla.gif"), r"\\server\foo\bla.gif");
/// ```
#[must_use]
pub fn unescape_url(escaped: &str) -> String {
    if !escaped.contains('\\') {
        return escaped.to_string();
    }

    let chars: Vec<char> = escaped.chars().collect();
    let mut out = String::with_capacity(escaped.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            out.push(c);
            break;
        };
        match next {
            '\n' => i += 2,
            '\r' | '\u{000C}' => {
                out.push(c);
                i += 1;
            }
            _ if next.is_ascii_hexdigit() => {
                let digits: String = chars[i + 1..]
                    .iter()
                    .take(6)
                    .take_while(|d| d.is_ascii_hexdigit())
                    .collect();
                i += 1 + digits.len();
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}');
                out.push(decoded);
                if chars.get(i) == Some(&' ') {
                    i += 1;
                }
            }
            _ => {
                out.push(next);
                i += 2;
            }
        }
    }
    out
}

/// Characters that may appear in an unquoted `url()`.
const fn is_valid_url_char(c: char) -> bool {
    matches!(c, '!' | '#' | '$' | '%' | '&' | '*'..='[' | ']'..='~') || c >= '\u{80}'
}

/// Check whether `url` has to be quoted inside `url()`.
#[must_use]
pub fn url_needs_quotes(url: &str) -> bool {
    !url.chars().all(is_valid_url_char)
}

/// Render `url` as a CSS `url()` value.
///
/// The URL is quoted when `force_quote` is set or when it contains a
/// character that is not allowed unquoted. Single quotes are used unless
/// the URL contains a `'` but no `"`.
#[must_use]
pub fn get_as_css_url(url: &str, force_quote: bool) -> String {
    let mut out = String::from(URL_OPEN);
    if force_quote || url_needs_quotes(url) {
        let quote = if url.contains('\'') && !url.contains('"') { '"' } else { '\'' };
        out.push(quote);
        for c in url.chars() {
            if c == quote || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push(quote);
    } else {
        out.push_str(url);
    }
    out.push(URL_CLOSE);
    out
}

/// Check whether `value` is `none` or a complete `url(...)` reference.
#[must_use]
pub fn is_url_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed == "none"
        || (trimmed.len() > URL_OPEN.len() + 1
            && trimmed.starts_with(URL_OPEN)
            && trimmed.ends_with(URL_CLOSE))
}

/// Extract the resolved URL from a complete `url(...)` reference.
///
/// Surrounding whitespace and quotes are stripped and escapes resolved.
/// Returns `None` when `value` is not a `url(...)` reference.
#[must_use]
pub fn extract_css_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed == "none" || !is_url_value(trimmed) {
        return None;
    }
    let inner = trimmed[URL_OPEN.len()..trimmed.len() - 1].trim();
    Some(unescape_url(extract_string_value(inner)))
}
