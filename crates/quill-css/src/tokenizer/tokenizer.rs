use quill_common::{SourceArea, SourceLocation};

use super::codepoint::{CodepointReader, MalformedCodepoint};
use super::start_type::TokenStartType;
use super::token::{CSSToken, HashType, NumericType, Token};

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// CSS tokenizer following the CSS Syntax Module Level 3 specification.
/// The input is preprocessed once up front; every code point keeps the
/// source location it was read at so tokens can report their span.
pub struct CSSTokenizer {
    /// The preprocessed input code points
    input: Vec<char>,
    /// Source location of each code point in `input`
    locations: Vec<SourceLocation>,
    /// Location just past the final code point
    end_location: SourceLocation,
    /// Current position in the input
    position: usize,
    /// Collected tokens
    tokens: Vec<Token>,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer over already decoded text.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut reader = CodepointReader::for_text(input);
        let mut tokenizer = Self::empty();
        // Text from a `&str` is always well-formed UTF-16.
        while let Ok(Some(c)) = tokenizer.read_from(&mut reader) {
            tokenizer.input.push(c);
        }
        tokenizer.end_location = reader.location();
        tokenizer
    }

    /// Create a tokenizer over raw UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedCodepoint`] if a high surrogate is not followed by a low surrogate.
    pub fn from_utf16(units: &[u16]) -> Result<Self, MalformedCodepoint> {
        let mut reader = CodepointReader::new(units.iter().copied());
        let mut tokenizer = Self::empty();
        while let Some(c) = tokenizer.read_from(&mut reader)? {
            tokenizer.input.push(c);
        }
        tokenizer.end_location = reader.location();
        Ok(tokenizer)
    }

    const fn empty() -> Self {
        Self {
            input: Vec::new(),
            locations: Vec::new(),
            end_location: SourceLocation::START,
            position: 0,
            tokens: Vec::new(),
        }
    }

    fn read_from<I: Iterator<Item = u16>>(
        &mut self,
        reader: &mut CodepointReader<I>,
    ) -> Result<Option<char>, MalformedCodepoint> {
        let location = reader.location();
        let c = reader.read()?;
        if c.is_some() {
            self.locations.push(location);
        }
        Ok(c)
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// Tokenize the whole input. The last collected token is always EOF.
    pub fn run(&mut self) {
        loop {
            // "Consume comments."
            self.consume_comments();

            let start = self.position;
            let kind = self.consume_token();
            let is_eof = kind.is_eof();
            let token = self.make_token(kind, start);
            self.tokens.push(token);
            if is_eof {
                break;
            }
        }
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn make_token(&self, kind: CSSToken, start: usize) -> Token {
        let text: String = self.input[start..self.position].iter().collect();
        let begin = self.location_at(start);
        let end = if self.position > start {
            self.location_at(self.position - 1)
        } else {
            begin
        };
        Token::new(kind, text, SourceArea::new(begin, end))
    }

    fn location_at(&self, index: usize) -> SourceLocation {
        self.locations.get(index).copied().unwrap_or(self.end_location)
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    fn consume_token(&mut self) -> CSSToken {
        // "Consume the next input code point."
        let Some(c) = self.consume() else {
            return CSSToken::EOF;
        };

        match TokenStartType::of(Some(c)) {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            TokenStartType::Whitespace => {
                self.consume_whitespace();
                CSSToken::Whitespace
            }

            // "U+0022 QUOTATION MARK (")" / "U+0027 APOSTROPHE (')"
            // "Consume a string token and return it."
            TokenStartType::QuotationMark | TokenStartType::Apostrophe => {
                self.consume_string_token(c)
            }

            // "U+0023 NUMBER SIGN (#)"
            TokenStartType::NumberSign => {
                // "If the next input code point is an ident code point or the next
                // two input code points are a valid escape..."
                if self.peek().is_some_and(is_ident_code_point)
                    || is_valid_escape(self.peek(), self.peek_at(1))
                {
                    // "If the next 3 input code points would start an ident sequence,
                    // set the <hash-token>'s type flag to 'id'."
                    let hash_type =
                        if would_start_ident_sequence(self.peek(), self.peek_at(1), self.peek_at(2)) {
                            HashType::Id
                        } else {
                            HashType::Unrestricted
                        };
                    let value = self.consume_ident_sequence();
                    CSSToken::Hash { value, hash_type }
                } else {
                    CSSToken::Delim('#')
                }
            }

            // "U+0028 LEFT PARENTHESIS (()"
            TokenStartType::LeftParenthesis => CSSToken::LeftParen,

            // "U+0029 RIGHT PARENTHESIS ())"
            TokenStartType::RightParenthesis => CSSToken::RightParen,

            // "U+002B PLUS SIGN (+)" / "U+002E FULL STOP (.)"
            TokenStartType::PlusSign | TokenStartType::FullStop => {
                // "If the input stream starts with a number..."
                if would_start_number(Some(c), self.peek(), self.peek_at(1)) {
                    self.reconsume();
                    self.consume_numeric_token()
                } else {
                    CSSToken::Delim(c)
                }
            }

            // "U+002C COMMA (,)"
            TokenStartType::Comma => CSSToken::Comma,

            // "U+002D HYPHEN-MINUS (-)"
            TokenStartType::HyphenMinus => {
                if would_start_number(Some(c), self.peek(), self.peek_at(1)) {
                    self.reconsume();
                    self.consume_numeric_token()
                }
                // "Otherwise, if the next 2 input code points are U+002D U+003E (->)..."
                else if self.peek() == Some('-') && self.peek_at(1) == Some('>') {
                    let _ = self.consume();
                    let _ = self.consume();
                    CSSToken::CDC
                }
                // "Otherwise, if the input stream starts with an ident sequence..."
                else if would_start_ident_sequence(Some(c), self.peek(), self.peek_at(1)) {
                    self.reconsume();
                    self.consume_ident_like_token()
                } else {
                    CSSToken::Delim('-')
                }
            }

            // "U+003A COLON (:)"
            TokenStartType::Colon => CSSToken::Colon,

            // "U+003B SEMICOLON (;)"
            TokenStartType::Semicolon => CSSToken::Semicolon,

            // "U+003C LESS-THAN SIGN (<)"
            TokenStartType::LessThanSign => {
                // "If the next 3 input code points are U+0021 U+002D U+002D (!--)..."
                if self.peek() == Some('!')
                    && self.peek_at(1) == Some('-')
                    && self.peek_at(2) == Some('-')
                {
                    let _ = self.consume();
                    let _ = self.consume();
                    let _ = self.consume();
                    CSSToken::CDO
                } else {
                    CSSToken::Delim('<')
                }
            }

            // "U+0040 COMMERCIAL AT (@)"
            TokenStartType::CommercialAt => {
                if would_start_ident_sequence(self.peek(), self.peek_at(1), self.peek_at(2)) {
                    CSSToken::AtKeyword(self.consume_ident_sequence())
                } else {
                    CSSToken::Delim('@')
                }
            }

            // "U+005B LEFT SQUARE BRACKET ([)"
            TokenStartType::LeftSquareBracket => CSSToken::LeftBracket,

            // "U+005C REVERSE SOLIDUS (\)"
            TokenStartType::ReverseSolidus => {
                if is_valid_escape(Some('\\'), self.peek()) {
                    self.reconsume();
                    self.consume_ident_like_token()
                } else {
                    // "This is a parse error."
                    CSSToken::Delim('\\')
                }
            }

            // "U+005D RIGHT SQUARE BRACKET (])"
            TokenStartType::RightSquareBracket => CSSToken::RightBracket,

            // "U+007B LEFT CURLY BRACKET ({)"
            TokenStartType::LeftCurlyBracket => CSSToken::LeftBrace,

            // "U+007D RIGHT CURLY BRACKET (})"
            TokenStartType::RightCurlyBracket => CSSToken::RightBrace,

            // "digit"
            TokenStartType::Digit => {
                self.reconsume();
                self.consume_numeric_token()
            }

            // "ident-start code point"
            TokenStartType::NameStart => {
                if matches!(c, 'u' | 'U')
                    && self.peek() == Some('+')
                    && self.peek_at(1).is_some_and(|n| n.is_ascii_hexdigit() || n == '?')
                {
                    let _ = self.consume(); // +
                    return self.consume_unicode_range();
                }
                self.reconsume();
                self.consume_ident_like_token()
            }

            // "anything else"
            // "Return a <delim-token> with its value set to the current input code point."
            TokenStartType::DollarSign
            | TokenStartType::Asterisk
            | TokenStartType::Solidus
            | TokenStartType::CircumflexAccent
            | TokenStartType::VerticalLine
            | TokenStartType::Tilde
            | TokenStartType::AnythingElse => CSSToken::Delim(c),

            TokenStartType::Eof => CSSToken::EOF,
        }
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    fn consume_comments(&mut self) {
        while self.peek() == Some('/') && self.peek_at(1) == Some('*') {
            let _ = self.consume(); // /
            let _ = self.consume(); // *

            loop {
                match self.consume() {
                    Some('*') if self.peek() == Some('/') => {
                        let _ = self.consume(); // /
                        break;
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }

    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.consume();
        }
    }

    /// [§ 4.3.4 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, ending_code_point: char) -> CSSToken {
        let mut value = String::new();

        loop {
            match self.consume() {
                // "ending code point" / "EOF"
                Some(c) if c == ending_code_point => return CSSToken::String(value),
                None => return CSSToken::String(value),

                // "newline"
                // "This is a parse error. Reconsume the current input code point,
                // create a <bad-string-token>, and return it."
                Some('\n') => {
                    self.reconsume();
                    return CSSToken::BadString;
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    Some(_) => value.push(self.consume_escaped_code_point()),
                },

                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.5 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> CSSToken {
        let (value, int_value, numeric_type) = self.consume_number();

        if would_start_ident_sequence(self.peek(), self.peek_at(1), self.peek_at(2)) {
            let unit = self.consume_ident_sequence();
            CSSToken::Dimension {
                value,
                int_value,
                numeric_type,
                unit,
            }
        } else if self.peek() == Some('%') {
            let _ = self.consume();
            CSSToken::Percentage {
                value,
                int_value,
                numeric_type,
            }
        } else {
            CSSToken::Number {
                value,
                int_value,
                numeric_type,
            }
        }
    }

    /// [§ 4.3.6 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> CSSToken {
        let string = self.consume_ident_sequence();

        // "If string's value is an ASCII case-insensitive match for 'url',
        // and the next input code point is U+0028 LEFT PARENTHESIS (()"
        if string.eq_ignore_ascii_case("url") && self.peek() == Some('(') {
            let _ = self.consume(); // (

            // "While the next two input code points are whitespace, consume the next input code point."
            while self.peek().is_some_and(is_whitespace) && self.peek_at(1).is_some_and(is_whitespace) {
                let _ = self.consume();
            }

            // "If the next one or two input code points are U+0022 QUOTATION MARK,
            // U+0027 APOSTROPHE, or whitespace followed by U+0022 QUOTATION MARK or
            // U+0027 APOSTROPHE, then create a <function-token>"
            let quote_follows = |c: Option<char>| matches!(c, Some('"' | '\''));
            if quote_follows(self.peek())
                || (self.peek().is_some_and(is_whitespace) && quote_follows(self.peek_at(1)))
            {
                CSSToken::Function(string)
            } else {
                self.consume_url_token()
            }
        } else if self.peek() == Some('(') {
            let _ = self.consume();
            CSSToken::Function(string)
        } else {
            CSSToken::Ident(string)
        }
    }

    /// [§ 4.3.7 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    ///
    /// The value keeps backslash escapes verbatim; they are resolved later
    /// by the URL helpers so the raw reference can be written back unchanged.
    fn consume_url_token(&mut self) -> CSSToken {
        let mut value = String::new();

        self.consume_whitespace();

        loop {
            match self.consume() {
                Some(')') | None => return CSSToken::Url(value),

                Some(c) if is_whitespace(c) => {
                    self.consume_whitespace();
                    return match self.peek() {
                        Some(')') => {
                            let _ = self.consume();
                            CSSToken::Url(value)
                        }
                        None => CSSToken::Url(value),
                        _ => {
                            self.consume_bad_url_remnants();
                            CSSToken::BadUrl
                        }
                    };
                }

                Some('"' | '\'' | '(') => {
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }
                Some(c) if is_non_printable(c) => {
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }

                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        value.push('\\');
                        self.copy_escape_into(&mut value);
                    } else {
                        self.consume_bad_url_remnants();
                        return CSSToken::BadUrl;
                    }
                }

                Some(c) => value.push(c),
            }
        }
    }

    /// Copy the body of an escape (after the backslash) into `value` unresolved.
    fn copy_escape_into(&mut self, value: &mut String) {
        let Some(first) = self.consume() else {
            return;
        };
        value.push(first);
        if !first.is_ascii_hexdigit() {
            return;
        }
        let mut count = 1;
        while count < 6 {
            match self.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    let _ = self.consume();
                    value.push(h);
                    count += 1;
                }
                _ => break,
            }
        }
        if self.peek() == Some(' ') {
            let _ = self.consume();
            value.push(' ');
        }
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    let _ = self.consume_escaped_code_point();
                }
                Some(_) => {}
            }
        }
    }

    /// `U+` followed by up to six hex digits or `?` wildcards, optionally `-` and an end.
    fn consume_unicode_range(&mut self) -> CSSToken {
        let mut digits = String::new();
        while digits.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            if let Some(c) = self.consume() {
                digits.push(c);
            }
        }
        let mut wildcards = 0;
        while digits.len() + wildcards < 6 && self.peek() == Some('?') {
            let _ = self.consume();
            wildcards += 1;
        }

        if wildcards > 0 {
            let start = hex_value(&format!("{digits}{}", "0".repeat(wildcards)));
            let end = hex_value(&format!("{digits}{}", "F".repeat(wildcards)));
            return CSSToken::UnicodeRange { start, end };
        }

        let start = hex_value(&digits);
        if self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c.is_ascii_hexdigit()) {
            let _ = self.consume(); // -
            let mut end_digits = String::new();
            while end_digits.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                if let Some(c) = self.consume() {
                    end_digits.push(c);
                }
            }
            return CSSToken::UnicodeRange {
                start,
                end: hex_value(&end_digits),
            };
        }
        CSSToken::UnicodeRange { start, end: start }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();

        loop {
            match self.consume() {
                Some(c) if is_ident_code_point(c) => result.push(c),
                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    result.push(self.consume_escaped_code_point());
                }
                Some(_) => {
                    self.reconsume();
                    return result;
                }
                None => return result,
            }
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    fn consume_number(&mut self) -> (f64, Option<i64>, NumericType) {
        let mut numeric_type = NumericType::Integer;
        let mut repr = String::new();

        // "If the next input code point is U+002B PLUS SIGN (+) or U+002D HYPHEN-MINUS (-),
        // consume it and append it to repr."
        if let Some(sign @ ('+' | '-')) = self.peek() {
            let _ = self.consume();
            repr.push(sign);
        }

        self.consume_digits_into(&mut repr);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a digit..."
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            let _ = self.consume();
            repr.push('.');
            numeric_type = NumericType::Number;
            self.consume_digits_into(&mut repr);
        }

        // "If the next 2 or 3 input code points are U+0045 (E) or U+0065 (e), optionally
        // followed by U+002D (-) or U+002B (+), followed by a digit..."
        if matches!(self.peek(), Some('e' | 'E')) {
            let has_sign = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_pos = if has_sign { 2 } else { 1 };

            if self.peek_at(digit_pos).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_pos {
                    if let Some(c) = self.consume() {
                        repr.push(c);
                    }
                }
                numeric_type = NumericType::Number;
                self.consume_digits_into(&mut repr);
            }
        }

        // "Convert repr to a number, and set the value to the returned value."
        let value: f64 = repr.parse().unwrap_or(0.0);
        let int_value = if numeric_type == NumericType::Integer {
            repr.parse().ok()
        } else {
            None
        };

        (value, int_value, numeric_type)
    }

    fn consume_digits_into(&mut self, repr: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            let _ = self.consume();
            repr.push(c);
        }
    }

    /// [§ 4.3.13 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    fn consume_escaped_code_point(&mut self) -> char {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                // "Consume as many hex digits as possible, but no more than 5."
                while hex.len() < 6 {
                    match self.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            let _ = self.consume();
                            hex.push(h);
                        }
                        _ => break,
                    }
                }
                // "If the next input code point is whitespace, consume it."
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                // "If this number is zero, or is for a surrogate, or is greater than the
                // maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
                match hex_value(&hex) {
                    0 => '\u{FFFD}',
                    code_point => char::from_u32(code_point).unwrap_or('\u{FFFD}'),
                }
            }
            // "EOF"
            None => '\u{FFFD}',
            // "anything else"
            Some(c) => c,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    const fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

fn hex_value(digits: &str) -> u32 {
    u32::from_str_radix(digits, 16).unwrap_or(0)
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    // "If the first code point is not U+005C REVERSE SOLIDUS (\), return false."
    // "Otherwise, if the second code point is a newline, return false."
    first == Some('\\') && second != Some('\n')
}

/// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
fn would_start_ident_sequence(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        // "U+002D HYPHEN-MINUS"
        Some('-') => {
            second.is_some_and(is_ident_start_code_point)
                || second == Some('-')
                || is_valid_escape(second, third)
        }
        Some('\\') => is_valid_escape(first, second),
        Some(c) => is_ident_start_code_point(c),
        None => false,
    }
}

/// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
fn would_start_number(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
    match first {
        Some('+' | '-') => is_digit(second) || (second == Some('.') && is_digit(third)),
        Some('.') => is_digit(second),
        c => is_digit(c),
    }
}

/// [§ 4.2 Definitions - whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
const fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ')
}

/// [§ 4.2 Definitions - non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
const fn is_non_printable(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{E}'..='\u{1F}' | '\u{7F}')
}

/// [§ 4.2 Definitions - ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII code point, or U+005F LOW LINE (_)."
const fn is_ident_start_code_point(c: char) -> bool {
    matches!(TokenStartType::of(Some(c)), TokenStartType::NameStart)
}

/// [§ 4.2 Definitions - ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+005F LOW LINE (_)."
const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}
