//! Syntax kinds for the host-language subset.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds
//! (from parser). Logos derives token recognition; node kinds lack
//! token/regex attributes. `JsLang` implements Rowan's `Language` trait for
//! tree construction.

#![allow(dead_code)] // Some items are for future use

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    /// `=>` for arrow functions. Defined before `Equals` for correct precedence.
    #[token("=>")]
    Arrow,

    #[token("=")]
    Equals,

    #[token("const")]
    KwConst,

    #[token("let")]
    KwLet,

    #[token("var")]
    KwVar,

    #[token("function")]
    KwFunction,

    #[token("return")]
    KwReturn,

    #[token("if")]
    KwIf,

    #[token("else")]
    KwElse,

    #[token("import")]
    KwImport,

    #[token("export")]
    KwExport,

    #[token("default")]
    KwDefault,

    #[token("from")]
    KwFrom,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("null")]
    KwNull,

    /// Identifier. Keywords are defined before this so they take precedence.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"-?[0-9]+(?:\.[0-9]+)?")]
    Number,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    #[doc(hidden)]
    StringLiteral, // Lexer-internal only

    DoubleQuote,
    SingleQuote,
    /// String content between quotes
    StrVal,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    ImportDecl,
    NamedImports,
    ExportDefault,
    VarDecl,
    Declarator,
    ObjectPattern,
    PatternProp,
    FnDecl,
    ParamList,
    Block,
    ReturnStmt,
    IfStmt,
    ExprStmt,
    ObjectLit,
    ObjectEntry,
    ArrayLit,
    MemberExpr,
    CallExpr,
    ArgList,
    AssignExpr,
    ParenExpr,
    ArrowFn,
    NameRef,
    Literal,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            KwConst
                | KwLet
                | KwVar
                | KwFunction
                | KwReturn
                | KwIf
                | KwElse
                | KwImport
                | KwExport
                | KwDefault
                | KwFrom
                | KwTrue
                | KwFalse
                | KwNull
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsLang {}

impl Language for JsLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<JsLang>;
pub type SyntaxToken = rowan::SyntaxToken<JsLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of expressions.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        ParenOpen,
        BraceOpen,
        BracketOpen,
        Ident,
        Number,
        DoubleQuote,
        SingleQuote,
        KwTrue,
        KwFalse,
        KwNull,
        KwFunction,
    ]);

    /// FIRST set of statements. Superset of `EXPR_FIRST`.
    pub const STMT_FIRST: TokenSet = EXPR_FIRST.union(TokenSet::new(&[
        KwConst,
        KwLet,
        KwVar,
        KwReturn,
        KwIf,
        KwImport,
        KwExport,
        Semicolon,
    ]));

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, Newline, LineComment, BlockComment]);

    pub const DECL_KEYWORDS: TokenSet = TokenSet::new(&[KwConst, KwLet, KwVar]);

    /// Tokens that end an object literal / pattern entry list.
    pub const BRACE_RECOVERY: TokenSet = TokenSet::new(&[BraceClose, Semicolon]);

    /// Tokens that end an argument or parameter list.
    pub const PAREN_RECOVERY: TokenSet = TokenSet::new(&[ParenClose, Semicolon, BraceClose]);

    /// Synchronization points for statement-level recovery.
    pub const STMT_RECOVERY: TokenSet = TokenSet::new(&[
        KwConst,
        KwLet,
        KwVar,
        KwFunction,
        KwReturn,
        KwIf,
        KwImport,
        KwExport,
        Semicolon,
        BraceClose,
    ]);
}
