//! Parser infrastructure for the host-language subset.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//! Key design decisions borrowed from rust-analyzer, rnix-parser, and taplo:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: retroactively wrap postfix chains and assignments
//! - Explicit recovery sets: per-production sets determine when to bail vs consume diagnostics
//!
//! # Recovery Strategy
//!
//! The parser is resilient—it always produces a tree. Recovery follows these rules:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Unclosed delimiters report the opening position as related context
//! 4. On recursion limit, remaining input goes into single Error node
//!
//! However, fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    ArgList, ArrayLit, ArrowFn, AssignExpr, Block, CallExpr, Declarator, Expr, ExportDefault,
    ExprStmt, FnDecl, IfStmt, ImportDecl, Literal, LiteralKind, MemberExpr, NameRef, NamedImports,
    ObjectEntry, ObjectLit, ObjectPattern, ParamList, ParenExpr, PatternProp, ReturnStmt, Root,
    Stmt, VarDecl,
};

pub use core::{ParseResult, Parser};

use crate::Error;
use lexer::lex;

/// Main entry point. Returns Err on fuel exhaustion.
pub fn parse(source: &str) -> Result<ParseResult, Error> {
    Parser::new(source, lex(source)).parse()
}
