//! Integration tests for charset detection and the CSS tokenizer.

use quill_css::tokenizer::{
    CSSToken, CSSTokenizer, Charset, CharsetError, HashType, NumericType, Token, decode_bytes, detect_charset,
    strip_bom,
};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = CSSTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper returning only the token kinds
fn kinds(input: &str) -> Vec<CSSToken> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

// ========== Charset detection ==========

#[test]
fn test_declared_charset_wins_over_fallback() {
    let bytes = b"@charset \"utf-8\"; h1 { color: red }";
    assert_eq!(detect_charset(bytes, Charset::Iso88591), Ok(Charset::Utf8));
    assert_eq!(detect_charset(bytes, Charset::UsAscii), Ok(Charset::Utf8));
}

#[test]
fn test_declared_charset_is_case_insensitive() {
    let bytes = b"@CHARSET \"ISO-8859-1\";";
    assert_eq!(detect_charset(bytes, Charset::Utf8), Ok(Charset::Iso88591));
}

#[test]
fn test_short_input_uses_fallback() {
    // fewer than 12 bytes can never hold a complete @charset rule
    assert_eq!(detect_charset(b"@charset \"", Charset::Iso88591), Ok(Charset::Iso88591));
    assert_eq!(detect_charset(b"", Charset::UsAscii), Ok(Charset::UsAscii));
}

#[test]
fn test_no_charset_rule_uses_fallback() {
    assert_eq!(detect_charset(b"h1 { color: red }", Charset::UsAscii), Ok(Charset::UsAscii));
}

#[test]
fn test_utf16_names_resolve_to_utf8() {
    assert_eq!(detect_charset(b"@charset \"utf-16be\";", Charset::UsAscii), Ok(Charset::Utf8));
    assert_eq!(detect_charset(b"@charset \"UTF-16LE\";", Charset::UsAscii), Ok(Charset::Utf8));
}

#[test]
fn test_unsupported_charset() {
    let result = detect_charset(b"@charset \"klingon-1\";", Charset::Utf8);
    assert_eq!(result, Err(CharsetError::Unsupported("klingon-1".to_string())));
}

#[test]
fn test_unterminated_charset() {
    let result = detect_charset(b"@charset \"utf-8; h1 {}", Charset::Utf8);
    assert_eq!(result, Err(CharsetError::UnexpectedEnd));
}

#[test]
fn test_strip_bom() {
    assert_eq!(strip_bom(b"\xEF\xBB\xBFh1{}"), b"h1{}");
    assert_eq!(strip_bom(b"h1{}"), b"h1{}");
}

#[test]
fn test_decode_latin1_fallback() {
    let text = decode_bytes(b"p { content: \"\xE9\" }", Charset::Iso88591).unwrap();
    assert_eq!(text, "p { content: \"\u{e9}\" }");
}

#[test]
fn test_decode_ascii_replaces_high_bytes() {
    let text = decode_bytes(b"p{a:\"\xE9\"}", Charset::UsAscii).unwrap();
    assert_eq!(text, "p{a:\"\u{FFFD}\"}");
}

#[test]
fn test_charset_from_name() {
    assert_eq!(Charset::from_name("Latin1"), Some(Charset::Iso88591));
    assert_eq!(Charset::from_name(" us-ascii "), Some(Charset::UsAscii));
    assert_eq!(Charset::from_name("shift_jis"), None);
}

// ========== Basic tokens ==========

#[test]
fn test_whitespace() {
    let tokens = kinds("   \t\n  ");
    assert_eq!(tokens.len(), 2); // whitespace + EOF
    assert!(matches!(tokens[0], CSSToken::Whitespace));
    assert!(matches!(tokens[1], CSSToken::EOF));
}

#[test]
fn test_ident() {
    let tokens = kinds("color");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "color"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_ident_with_hyphen() {
    let tokens = kinds("background-color");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "background-color"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_custom_property_ident() {
    let tokens = kinds("--main-color");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Ident(name) => assert_eq!(name, "--main-color"),
        _ => panic!("Expected Ident token"),
    }
}

#[test]
fn test_function() {
    let tokens = kinds("rgb(");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Function(name) => assert_eq!(name, "rgb"),
        _ => panic!("Expected Function token"),
    }
}

#[test]
fn test_at_keyword() {
    let tokens = kinds("@media");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::AtKeyword(name) => assert_eq!(name, "media"),
        _ => panic!("Expected AtKeyword token"),
    }
}

#[test]
fn test_hash_id() {
    let tokens = kinds("#header");
    match &tokens[0] {
        CSSToken::Hash { value, hash_type } => {
            assert_eq!(value, "header");
            assert_eq!(*hash_type, HashType::Id);
        }
        _ => panic!("Expected Hash token"),
    }
}

#[test]
fn test_hash_numeric_unrestricted() {
    // #123 starts with a digit, which is not an ident-start code point
    let tokens = kinds("#123");
    match &tokens[0] {
        CSSToken::Hash { value, hash_type } => {
            assert_eq!(value, "123");
            assert_eq!(*hash_type, HashType::Unrestricted);
        }
        _ => panic!("Expected Hash token"),
    }
}

#[test]
fn test_string_double_quote() {
    let tokens = kinds("\"hello world\"");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::String(value) => assert_eq!(value, "hello world"),
        _ => panic!("Expected String token"),
    }
}

#[test]
fn test_string_single_quote() {
    let tokens = kinds("'hello world'");
    match &tokens[0] {
        CSSToken::String(value) => assert_eq!(value, "hello world"),
        _ => panic!("Expected String token"),
    }
}

#[test]
fn test_unterminated_string_is_bad_string() {
    let tokens = kinds("\"abc\ndef");
    assert!(matches!(tokens[0], CSSToken::BadString));
}

// ========== Numbers ==========

#[test]
fn test_integer() {
    let tokens = kinds("42");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Number {
            value,
            int_value,
            numeric_type,
        } => {
            assert_eq!(*value, 42.0);
            assert_eq!(*int_value, Some(42));
            assert_eq!(*numeric_type, NumericType::Integer);
        }
        _ => panic!("Expected Number token"),
    }
}

#[test]
fn test_negative_integer() {
    let tokens = kinds("-10");
    match &tokens[0] {
        CSSToken::Number {
            value, int_value, ..
        } => {
            assert_eq!(*value, -10.0);
            assert_eq!(*int_value, Some(-10));
        }
        _ => panic!("Expected Number token"),
    }
}

#[test]
fn test_float() {
    let tokens = kinds("3.25");
    match &tokens[0] {
        CSSToken::Number {
            value, numeric_type, ..
        } => {
            assert!((value - 3.25).abs() < 0.001);
            assert_eq!(*numeric_type, NumericType::Number);
        }
        _ => panic!("Expected Number token"),
    }
}

#[test]
fn test_leading_dot_number() {
    let tokens = kinds(".5");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Number { value, .. } => assert!((value - 0.5).abs() < 0.001),
        _ => panic!("Expected Number token"),
    }
}

#[test]
fn test_percentage() {
    let tokens = kinds("50%");
    match &tokens[0] {
        CSSToken::Percentage { value, .. } => assert_eq!(*value, 50.0),
        _ => panic!("Expected Percentage token"),
    }
}

#[test]
fn test_dimension_px() {
    let tokens = kinds("16px");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        CSSToken::Dimension { value, unit, .. } => {
            assert_eq!(*value, 16.0);
            assert_eq!(unit, "px");
        }
        _ => panic!("Expected Dimension token"),
    }
}

#[test]
fn test_dimension_em() {
    let tokens = kinds("1.5em");
    match &tokens[0] {
        CSSToken::Dimension { value, unit, .. } => {
            assert!((value - 1.5).abs() < 0.001);
            assert_eq!(unit, "em");
        }
        _ => panic!("Expected Dimension token"),
    }
}

#[test]
fn test_scientific_notation() {
    let tokens = kinds("1e10");
    match &tokens[0] {
        CSSToken::Number {
            value, numeric_type, ..
        } => {
            assert_eq!(*value, 1e10);
            assert_eq!(*numeric_type, NumericType::Number);
        }
        _ => panic!("Expected Number token"),
    }
}

#[test]
fn test_unicode_range() {
    let tokens = kinds("U+0025-00FF");
    assert_eq!(tokens[0], CSSToken::UnicodeRange { start: 0x25, end: 0xFF });

    let tokens = kinds("u+4??");
    assert_eq!(tokens[0], CSSToken::UnicodeRange { start: 0x400, end: 0x4FF });
}

// ========== Punctuation ==========

#[test]
fn test_colon_semicolon_comma() {
    let tokens = kinds(":;,");
    assert!(matches!(tokens[0], CSSToken::Colon));
    assert!(matches!(tokens[1], CSSToken::Semicolon));
    assert!(matches!(tokens[2], CSSToken::Comma));
}

#[test]
fn test_braces_brackets_parens() {
    let tokens = kinds("{}[]()");
    assert_eq!(tokens.len(), 7);
    assert!(matches!(tokens[0], CSSToken::LeftBrace));
    assert!(matches!(tokens[1], CSSToken::RightBrace));
    assert!(matches!(tokens[2], CSSToken::LeftBracket));
    assert!(matches!(tokens[3], CSSToken::RightBracket));
    assert!(matches!(tokens[4], CSSToken::LeftParen));
    assert!(matches!(tokens[5], CSSToken::RightParen));
}

#[test]
fn test_comment() {
    let tokens = kinds("/* comment */ color");
    assert_eq!(tokens.len(), 3); // whitespace + ident + EOF
    assert!(matches!(tokens[0], CSSToken::Whitespace));
    assert_eq!(tokens[1], CSSToken::Ident("color".to_string()));
}

#[test]
fn test_cdo_cdc() {
    let tokens = kinds("<!-- -->");
    assert_eq!(tokens.len(), 4); // CDO + whitespace + CDC + EOF
    assert!(matches!(tokens[0], CSSToken::CDO));
    assert!(matches!(tokens[1], CSSToken::Whitespace));
    assert!(matches!(tokens[2], CSSToken::CDC));
}

#[test]
fn test_class_selector() {
    let tokens = kinds(".container");
    assert_eq!(tokens.len(), 3); // delim(.) + ident + EOF
    assert!(matches!(tokens[0], CSSToken::Delim('.')));
    assert_eq!(tokens[1], CSSToken::Ident("container".to_string()));
}

#[test]
fn test_escaped_character() {
    let tokens = kinds("\\41 "); // \41 is 'A' in hex
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], CSSToken::Ident("A".to_string()));
}

// ========== URLs ==========

#[test]
fn test_url_unquoted() {
    let tokens = kinds("url(image.png)");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], CSSToken::Url("image.png".to_string()));
}

#[test]
fn test_url_keeps_escapes_raw() {
    let tokens = kinds(r"url(a\(b\).png)");
    assert_eq!(tokens[0], CSSToken::Url(r"a\(b\).png".to_string()));
}

#[test]
fn test_url_quoted_is_function() {
    let tokens = kinds("url('a.png')");
    assert_eq!(tokens[0], CSSToken::Function("url".to_string()));
    assert_eq!(tokens[1], CSSToken::String("a.png".to_string()));
    assert!(matches!(tokens[2], CSSToken::RightParen));
}

#[test]
fn test_bad_url() {
    let tokens = kinds("url(a b)");
    assert!(matches!(tokens[0], CSSToken::BadUrl));
    assert!(matches!(tokens[1], CSSToken::EOF));
}

// ========== Sequences ==========

#[test]
fn test_simple_rule() {
    let tokens = kinds("color: red;");
    // color, :, whitespace, red, ;, EOF
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0], CSSToken::Ident("color".to_string()));
    assert!(matches!(tokens[1], CSSToken::Colon));
    assert!(matches!(tokens[2], CSSToken::Whitespace));
    assert_eq!(tokens[3], CSSToken::Ident("red".to_string()));
    assert!(matches!(tokens[4], CSSToken::Semicolon));
}

#[test]
fn test_selector_and_block() {
    let tokens = kinds("body { }");
    // body, whitespace, {, whitespace, }, EOF
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[2], CSSToken::LeftBrace));
    assert!(matches!(tokens[4], CSSToken::RightBrace));
}

#[test]
fn test_token_text_is_raw_source() {
    let tokens = tokenize("16px #abc");
    assert_eq!(tokens[0].text, "16px");
    assert_eq!(tokens[2].text, "#abc");
}

#[test]
fn test_utf16_input() {
    let units: Vec<u16> = "a{b:c}".encode_utf16().collect();
    let mut tokenizer = CSSTokenizer::from_utf16(&units).unwrap();
    tokenizer.run();
    assert_eq!(tokenizer.tokens().len(), 7);
    assert_eq!(tokenizer.tokens()[0].kind, CSSToken::Ident("a".to_string()));
}

#[test]
fn test_utf16_broken_surrogate() {
    let units = [0x61, 0xD800, 0x62];
    assert!(CSSTokenizer::from_utf16(&units).is_err());
}

#[test]
fn test_token_display() {
    let tokens = tokenize("a: 'b'");
    assert_eq!(tokens[0].to_string(), "<ident:a>");
    assert_eq!(tokens[1].to_string(), "<colon::>");
    assert_eq!(tokens[3].to_string(), "<string:'b'>");
    assert_eq!(tokens[4].kind.name(), "EOF");

    let tokens = tokenize("a\n\tb");
    assert_eq!(tokens[1].to_string(), "<whitespace:\\n\\t>");
}
