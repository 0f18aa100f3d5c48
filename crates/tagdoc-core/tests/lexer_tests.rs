//! Integration tests for the tokenizer and its lookahead cursor

use tagdoc_core::{LexError, Lexer, TagName, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(input).unwrap();
    let mut out = Vec::new();
    loop {
        let tok = lexer.advance();
        out.push(tok.kind);
        if tok.kind == TokenKind::Eof {
            return out;
        }
    }
}

// ============================================================================
// Token Sequence Tests
// ============================================================================

#[test]
fn test_tokenize_simple_paragraph() {
    let mut lexer = Lexer::new("[p Hello]").unwrap();

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::LBracket);

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::Tag(TagName::Para));
    assert_eq!(tok.text, "p");

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::Str);
    assert_eq!(tok.text, "Hello");

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::RBracket);

    assert_eq!(lexer.advance().kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_quoted_string() {
    let mut lexer = Lexer::new("[title \"My Doc\"]").unwrap();
    lexer.advance();
    assert_eq!(lexer.advance().kind, TokenKind::Tag(TagName::Title));

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::Str);
    assert_eq!(tok.text, "My Doc");

    assert_eq!(lexer.advance().kind, TokenKind::RBracket);
}

#[test]
fn test_tokenize_multiline_quoted_string() {
    let mut lexer = Lexer::new("[title \"line one\nline two\"]").unwrap();
    lexer.advance();
    lexer.advance();
    assert_eq!(lexer.advance().text, "line one\nline two");
}

#[test]
fn test_tokenize_all_tag_keywords() {
    for (word, tag) in [
        ("article", TagName::Article),
        ("title", TagName::Title),
        ("author", TagName::Author),
        ("date", TagName::Date),
        ("sec", TagName::Sec),
        ("p", TagName::Para),
        ("b", TagName::Bold),
        ("i", TagName::Italic),
        ("u", TagName::Underline),
        ("code", TagName::Code),
        ("math", TagName::Math),
    ] {
        let input = format!("[{word}]");
        let mut lexer = Lexer::new(&input).unwrap();
        lexer.advance();
        assert_eq!(lexer.advance().kind, TokenKind::Tag(tag), "keyword {word}");
    }
}

#[test]
fn test_unknown_word_after_bracket() {
    let mut lexer = Lexer::new("[bogus]").unwrap();
    lexer.advance();

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::Word);
    assert_eq!(tok.text, "bogus");
}

#[test]
fn test_whitespace_between_tags_produces_no_token() {
    assert_eq!(
        kinds("[article [sec]]"),
        vec![
            TokenKind::LBracket,
            TokenKind::Tag(TagName::Article),
            TokenKind::LBracket,
            TokenKind::Tag(TagName::Sec),
            TokenKind::RBracket,
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(kinds("  \n\t "), vec![TokenKind::Eof]);
}

// ============================================================================
// Text Run Tests
// ============================================================================

#[test]
fn test_star_splits_text_runs() {
    let mut lexer = Lexer::new("[p Hi *there*!]").unwrap();
    lexer.advance();
    lexer.advance();

    assert_eq!(lexer.advance().text, "Hi ");
    assert_eq!(lexer.advance().kind, TokenKind::Star);
    assert_eq!(lexer.advance().text, "there");
    assert_eq!(lexer.advance().kind, TokenKind::Star);
    assert_eq!(lexer.advance().text, "!");
    assert_eq!(lexer.advance().kind, TokenKind::RBracket);
}

#[test]
fn test_text_run_keeps_space_after_inline_close() {
    // The space between `[b a]` and `b` separates fragments and must
    // survive tokenization.
    let mut lexer = Lexer::new("[p [b a] b]").unwrap();
    for _ in 0..5 {
        lexer.advance(); // [ p [ b a
    }
    assert_eq!(lexer.advance().kind, TokenKind::RBracket);

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::Str);
    assert_eq!(tok.text, " b");
}

#[test]
fn test_text_after_quoted_string_keeps_separator() {
    let mut lexer = Lexer::new("[p \"Hello\" world]").unwrap();
    lexer.advance();
    lexer.advance();
    assert_eq!(lexer.advance().text, "Hello");
    assert_eq!(lexer.advance().text, " world");
}

#[test]
fn test_equals_in_body_is_plain_text() {
    // `=` is punctuation only in option position; past the first word of
    // the body it reads as text.
    let mut lexer = Lexer::new("[p x a=b]").unwrap();
    lexer.advance();
    lexer.advance();

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::Str);
    assert_eq!(tok.text, "x a=b");
}

#[test]
fn test_utf8_text_run() {
    let mut lexer = Lexer::new("[p Grüße, café ≠ kaffee]").unwrap();
    lexer.advance();
    lexer.advance();
    assert_eq!(lexer.advance().text, "Grüße, café ≠ kaffee");
}

// ============================================================================
// Option Position Tests
// ============================================================================

#[test]
fn test_single_option() {
    assert_eq!(
        kinds("[code lang=rust x]"),
        vec![
            TokenKind::LBracket,
            TokenKind::Tag(TagName::Code),
            TokenKind::OptName,
            TokenKind::Equal,
            TokenKind::Word,
            TokenKind::Str,
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comma_separated_options_with_quoted_value() {
    let mut lexer = Lexer::new("[sec width=100,height=\"50 px\"]").unwrap();
    lexer.advance();
    lexer.advance();

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::OptName);
    assert_eq!(tok.text, "width");
    assert_eq!(lexer.advance().kind, TokenKind::Equal);
    assert_eq!(lexer.advance().text, "100");
    assert_eq!(lexer.advance().kind, TokenKind::Comma);

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::OptName);
    assert_eq!(tok.text, "height");
    assert_eq!(lexer.advance().kind, TokenKind::Equal);

    let tok = lexer.advance();
    assert_eq!(tok.kind, TokenKind::Str);
    assert_eq!(tok.text, "50 px");
}

// ============================================================================
// Lookahead Cursor Tests
// ============================================================================

#[test]
fn test_peek_is_stable_until_advance() {
    let mut lexer = Lexer::new("[p Hello]").unwrap();

    let first_peek = lexer.peek();
    assert_eq!(lexer.peek(), first_peek);
    assert_eq!(lexer.peek(), first_peek);
    assert_eq!(first_peek.kind, TokenKind::Tag(TagName::Para));

    // advance returns what was current and moves exactly one position
    let consumed = lexer.advance();
    assert_eq!(consumed.kind, TokenKind::LBracket);
    assert_eq!(lexer.current(), first_peek);
}

#[test]
fn test_peek_next_sees_two_ahead() {
    let lexer = Lexer::new("[p Hello]").unwrap();
    assert_eq!(lexer.current().kind, TokenKind::LBracket);
    assert_eq!(lexer.peek().kind, TokenKind::Tag(TagName::Para));
    assert_eq!(lexer.peek_next().kind, TokenKind::Str);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("[p]").unwrap();
    while lexer.advance().kind != TokenKind::Eof {}

    for _ in 0..10 {
        assert_eq!(lexer.current().kind, TokenKind::Eof);
        assert_eq!(lexer.advance().kind, TokenKind::Eof);
        assert_eq!(lexer.peek().kind, TokenKind::Eof);
        assert_eq!(lexer.peek_next().kind, TokenKind::Eof);
    }
}

// ============================================================================
// Failure Mode Tests
// ============================================================================

#[test]
fn test_unterminated_string_fails() {
    let err = Lexer::new("[p \"hello]").unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { offset: 3 });
}

#[test]
fn test_unterminated_string_in_option_value() {
    let err = Lexer::new("[code lang=\"rust").unwrap_err();
    assert!(matches!(err, LexError::UnterminatedString { .. }));
}

#[test]
fn test_control_byte_is_rejected() {
    let err = Lexer::new("[p ab\u{1}cd]").unwrap_err();
    assert!(matches!(
        err,
        LexError::UnexpectedCharacter { byte: 0x01, .. }
    ));
}

#[test]
fn test_tab_and_newline_are_not_rejected() {
    assert!(Lexer::new("[p a\tb\nc]").is_ok());
}
