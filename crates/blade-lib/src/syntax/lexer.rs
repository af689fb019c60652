//! Tokenizer for the JavaScript subset.
//!
//! Tokens are kind + span only; text is sliced out of the source on demand.
//! Two adjustments happen on top of the raw logos stream: runs of characters
//! the grammar has no use for collapse into one `Garbage` token, and string
//! literals are re-emitted as quote / body / quote so the parser can treat
//! the quotes as delimiters and the body as an opaque value.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

/// Kind and span. The text lives in the source slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut out = Vec::new();
    // Start of the garbage run currently being collected, if any.
    let mut garbage_from: Option<u32> = None;

    let mut stream = SyntaxKind::lexer(source);
    while let Some(result) = stream.next() {
        let span = stream.span();
        let Ok(kind) = result else {
            garbage_from.get_or_insert(span.start as u32);
            continue;
        };
        if let Some(from) = garbage_from.take() {
            out.push(Token::new(SyntaxKind::Garbage, span_of(from, span.start as u32)));
        }
        if kind == SyntaxKind::StringLiteral {
            push_string(&mut out, span.start as u32, span.end as u32, source);
        } else {
            out.push(Token::new(kind, span_of(span.start as u32, span.end as u32)));
        }
    }
    if let Some(from) = garbage_from {
        out.push(Token::new(SyntaxKind::Garbage, span_of(from, source.len() as u32)));
    }

    out
}

/// A matched string literal always carries both quotes; it re-emits as three
/// tokens, with the body token omitted when the literal is empty.
fn push_string(out: &mut Vec<Token>, start: u32, end: u32, source: &str) {
    let quote = match source.as_bytes()[start as usize] {
        b'"' => SyntaxKind::DoubleQuote,
        _ => SyntaxKind::SingleQuote,
    };
    out.push(Token::new(quote, span_of(start, start + 1)));
    if end - start > 2 {
        out.push(Token::new(SyntaxKind::StrVal, span_of(start + 1, end - 1)));
    }
    out.push(Token::new(quote, span_of(end - 1, end)));
}

fn span_of(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

/// The token's text, sliced straight from source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
