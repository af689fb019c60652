use crate::syntax::cst::SyntaxKind;
use crate::syntax::lexer::{lex, token_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn punctuation() {
    assert_eq!(
        kinds("(){}[],.;:"),
        vec![
            SyntaxKind::ParenOpen,
            SyntaxKind::ParenClose,
            SyntaxKind::BraceOpen,
            SyntaxKind::BraceClose,
            SyntaxKind::BracketOpen,
            SyntaxKind::BracketClose,
            SyntaxKind::Comma,
            SyntaxKind::Dot,
            SyntaxKind::Semicolon,
            SyntaxKind::Colon,
        ]
    );
}

#[test]
fn arrow_wins_over_equals() {
    assert_eq!(
        kinds("=> = =>"),
        vec![
            SyntaxKind::Arrow,
            SyntaxKind::Whitespace,
            SyntaxKind::Equals,
            SyntaxKind::Whitespace,
            SyntaxKind::Arrow,
        ]
    );
}

#[test]
fn keywords_beat_identifiers() {
    assert_eq!(
        kinds("const constant"),
        vec![
            SyntaxKind::KwConst,
            SyntaxKind::Whitespace,
            SyntaxKind::Ident,
        ]
    );
}

#[test]
fn identifiers_allow_dollar_and_underscore() {
    assert_eq!(kinds("$data _x a1"), vec![
        SyntaxKind::Ident,
        SyntaxKind::Whitespace,
        SyntaxKind::Ident,
        SyntaxKind::Whitespace,
        SyntaxKind::Ident,
    ]);
}

#[test]
fn numbers() {
    assert_eq!(kinds("42"), vec![SyntaxKind::Number]);
    assert_eq!(kinds("-3.14"), vec![SyntaxKind::Number]);
}

#[test]
fn strings_split_into_quote_content_quote() {
    assert_eq!(
        kinds(r#""movie""#),
        vec![
            SyntaxKind::DoubleQuote,
            SyntaxKind::StrVal,
            SyntaxKind::DoubleQuote,
        ]
    );
    assert_eq!(
        kinds("'movie'"),
        vec![
            SyntaxKind::SingleQuote,
            SyntaxKind::StrVal,
            SyntaxKind::SingleQuote,
        ]
    );
}

#[test]
fn empty_string_has_no_content_token() {
    assert_eq!(
        kinds(r#""""#),
        vec![SyntaxKind::DoubleQuote, SyntaxKind::DoubleQuote]
    );
}

#[test]
fn string_content_keeps_escapes_raw() {
    let source = r#""a\"b""#;
    let tokens = lex(source);
    assert_eq!(tokens[1].kind, SyntaxKind::StrVal);
    assert_eq!(token_text(source, &tokens[1]), r#"a\"b"#);
}

#[test]
fn comments_are_single_tokens() {
    assert_eq!(
        kinds("// line\nx"),
        vec![SyntaxKind::LineComment, SyntaxKind::Newline, SyntaxKind::Ident]
    );
    assert_eq!(
        kinds("/* block */x"),
        vec![SyntaxKind::BlockComment, SyntaxKind::Ident]
    );
}

#[test]
fn garbage_coalesces() {
    assert_eq!(
        kinds("a @#@ b"),
        vec![
            SyntaxKind::Ident,
            SyntaxKind::Whitespace,
            SyntaxKind::Garbage,
            SyntaxKind::Whitespace,
            SyntaxKind::Ident,
        ]
    );
}

#[test]
fn token_text_slices_source() {
    let source = "const q";
    let tokens = lex(source);
    assert_eq!(token_text(source, &tokens[0]), "const");
    assert_eq!(token_text(source, &tokens[2]), "q");
}
