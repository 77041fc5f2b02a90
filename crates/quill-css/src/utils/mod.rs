//! Small text helpers shared by the parser, the domain model and the
//! property registry.

/// Color value recognition.
pub mod color;
/// Leading-number extraction and numeric value checks.
pub mod number;
/// Quoted string helpers.
pub mod string;
/// `url()` escaping, unescaping and quoting.
pub mod url;

pub use color::{is_color_value, is_hex_color, is_named_color};
pub use number::{is_number_value, is_number_with_unit, is_percentage_value, split_number};
pub use string::extract_string_value;
pub use url::{extract_css_url, get_as_css_url, is_url_value, unescape_url, url_needs_quotes};
