//! First-character classification.
//!
//! Every token begins with one code point, and that code point alone
//! decides which consume algorithm of
//! [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
//! runs next. The tokenizer dispatches on [`TokenStartType`] instead of on
//! raw characters.

use strum_macros::{Display, EnumIter};

/// The class a token's first code point falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TokenStartType {
    /// `\n`, `\t` or space
    Whitespace,
    /// `"`
    QuotationMark,
    /// `#`
    NumberSign,
    /// `$`
    DollarSign,
    /// `'`
    Apostrophe,
    /// `(`
    LeftParenthesis,
    /// `)`
    RightParenthesis,
    /// `*`
    Asterisk,
    /// `+`
    PlusSign,
    /// `,`
    Comma,
    /// `-`
    HyphenMinus,
    /// `.`
    FullStop,
    /// `/`
    Solidus,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `<`
    LessThanSign,
    /// `@`
    CommercialAt,
    /// `[`
    LeftSquareBracket,
    /// `\`
    ReverseSolidus,
    /// `]`
    RightSquareBracket,
    /// `^`
    CircumflexAccent,
    /// `{`
    LeftCurlyBracket,
    /// `}`
    RightCurlyBracket,
    /// `0` to `9`
    Digit,
    /// ASCII letter, `_`, or any code point at or above U+0080
    NameStart,
    /// `|`
    VerticalLine,
    /// `~`
    Tilde,
    /// End of input
    Eof,
    /// Everything else
    AnythingElse,
}

impl TokenStartType {
    /// Classify the next code point; `None` is end of input.
    #[must_use]
    pub const fn of(c: Option<char>) -> Self {
        let Some(c) = c else {
            return Self::Eof;
        };
        match c {
            '\n' | '\t' | ' ' => Self::Whitespace,
            '"' => Self::QuotationMark,
            '#' => Self::NumberSign,
            '$' => Self::DollarSign,
            '\'' => Self::Apostrophe,
            '(' => Self::LeftParenthesis,
            ')' => Self::RightParenthesis,
            '*' => Self::Asterisk,
            '+' => Self::PlusSign,
            ',' => Self::Comma,
            '-' => Self::HyphenMinus,
            '.' => Self::FullStop,
            '/' => Self::Solidus,
            ':' => Self::Colon,
            ';' => Self::Semicolon,
            '<' => Self::LessThanSign,
            '@' => Self::CommercialAt,
            '[' => Self::LeftSquareBracket,
            '\\' => Self::ReverseSolidus,
            ']' => Self::RightSquareBracket,
            '^' => Self::CircumflexAccent,
            '{' => Self::LeftCurlyBracket,
            '}' => Self::RightCurlyBracket,
            '0'..='9' => Self::Digit,
            'a'..='z' | 'A'..='Z' | '_' => Self::NameStart,
            '|' => Self::VerticalLine,
            '~' => Self::Tilde,
            c if c as u32 >= 0x80 => Self::NameStart,
            _ => Self::AnythingElse,
        }
    }

    /// Returns `true` if a code point of this class is a complete token on its own,
    /// without looking at what follows.
    #[must_use]
    pub const fn is_self_contained(self) -> bool {
        matches!(
            self,
            Self::LeftParenthesis
                | Self::RightParenthesis
                | Self::Comma
                | Self::Colon
                | Self::Semicolon
                | Self::LeftSquareBracket
                | Self::RightSquareBracket
                | Self::LeftCurlyBracket
                | Self::RightCurlyBracket
                | Self::Eof
                | Self::AnythingElse
        )
    }
}
