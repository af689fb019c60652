//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(ImportDecl, ImportDecl);
ast_node!(NamedImports, NamedImports);
ast_node!(ExportDefault, ExportDefault);
ast_node!(VarDecl, VarDecl);
ast_node!(Declarator, Declarator);
ast_node!(ObjectPattern, ObjectPattern);
ast_node!(PatternProp, PatternProp);
ast_node!(FnDecl, FnDecl);
ast_node!(ParamList, ParamList);
ast_node!(Block, Block);
ast_node!(ReturnStmt, ReturnStmt);
ast_node!(IfStmt, IfStmt);
ast_node!(ExprStmt, ExprStmt);
ast_node!(ObjectLit, ObjectLit);
ast_node!(ObjectEntry, ObjectEntry);
ast_node!(ArrayLit, ArrayLit);
ast_node!(MemberExpr, MemberExpr);
ast_node!(CallExpr, CallExpr);
ast_node!(ArgList, ArgList);
ast_node!(AssignExpr, AssignExpr);
ast_node!(ParenExpr, ParenExpr);
ast_node!(ArrowFn, ArrowFn);
ast_node!(NameRef, NameRef);
ast_node!(Literal, Literal);

/// Statement: any top-level or block-level form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    ImportDecl(ImportDecl),
    ExportDefault(ExportDefault),
    VarDecl(VarDecl),
    FnDecl(FnDecl),
    Block(Block),
    ReturnStmt(ReturnStmt),
    IfStmt(IfStmt),
    ExprStmt(ExprStmt),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ImportDecl => ImportDecl::cast(node).map(Stmt::ImportDecl),
            SyntaxKind::ExportDefault => ExportDefault::cast(node).map(Stmt::ExportDefault),
            SyntaxKind::VarDecl => VarDecl::cast(node).map(Stmt::VarDecl),
            SyntaxKind::FnDecl => FnDecl::cast(node).map(Stmt::FnDecl),
            SyntaxKind::Block => Block::cast(node).map(Stmt::Block),
            SyntaxKind::ReturnStmt => ReturnStmt::cast(node).map(Stmt::ReturnStmt),
            SyntaxKind::IfStmt => IfStmt::cast(node).map(Stmt::IfStmt),
            SyntaxKind::ExprStmt => ExprStmt::cast(node).map(Stmt::ExprStmt),
            _ => None,
        }
    }
}

/// Expression: any value-producing form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    NameRef(NameRef),
    Literal(Literal),
    ObjectLit(ObjectLit),
    ArrayLit(ArrayLit),
    MemberExpr(MemberExpr),
    CallExpr(CallExpr),
    AssignExpr(AssignExpr),
    ParenExpr(ParenExpr),
    ArrowFn(ArrowFn),
    FnExpr(FnDecl),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NameRef => NameRef::cast(node).map(Expr::NameRef),
            SyntaxKind::Literal => Literal::cast(node).map(Expr::Literal),
            SyntaxKind::ObjectLit => ObjectLit::cast(node).map(Expr::ObjectLit),
            SyntaxKind::ArrayLit => ArrayLit::cast(node).map(Expr::ArrayLit),
            SyntaxKind::MemberExpr => MemberExpr::cast(node).map(Expr::MemberExpr),
            SyntaxKind::CallExpr => CallExpr::cast(node).map(Expr::CallExpr),
            SyntaxKind::AssignExpr => AssignExpr::cast(node).map(Expr::AssignExpr),
            SyntaxKind::ParenExpr => ParenExpr::cast(node).map(Expr::ParenExpr),
            SyntaxKind::ArrowFn => ArrowFn::cast(node).map(Expr::ArrowFn),
            SyntaxKind::FnDecl => FnDecl::cast(node).map(Expr::FnExpr),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::NameRef(n) => n.as_cst(),
            Expr::Literal(n) => n.as_cst(),
            Expr::ObjectLit(n) => n.as_cst(),
            Expr::ArrayLit(n) => n.as_cst(),
            Expr::MemberExpr(n) => n.as_cst(),
            Expr::CallExpr(n) => n.as_cst(),
            Expr::AssignExpr(n) => n.as_cst(),
            Expr::ParenExpr(n) => n.as_cst(),
            Expr::ArrowFn(n) => n.as_cst(),
            Expr::FnExpr(n) => n.as_cst(),
        }
    }
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

impl Root {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl ImportDecl {
    /// The default-import binding, if present: `import NAME from "m"`.
    pub fn default_binding(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Ident)
    }

    pub fn named_imports(&self) -> Option<NamedImports> {
        self.0.children().find_map(NamedImports::cast)
    }

    pub fn module_name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::StrVal)
    }
}

impl NamedImports {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Ident)
    }
}

impl ExportDefault {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl VarDecl {
    /// `const` | `let` | `var`
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::KwConst | SyntaxKind::KwLet | SyntaxKind::KwVar
                )
            })
    }

    pub fn declarators(&self) -> impl Iterator<Item = Declarator> + '_ {
        self.0.children().filter_map(Declarator::cast)
    }
}

impl Declarator {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Ident)
    }

    pub fn pattern(&self) -> Option<ObjectPattern> {
        self.0.children().find_map(ObjectPattern::cast)
    }

    pub fn init(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ObjectPattern {
    pub fn props(&self) -> impl Iterator<Item = PatternProp> + '_ {
        self.0.children().filter_map(PatternProp::cast)
    }
}

impl PatternProp {
    /// The property key: `a` in both `{ a }` and `{ a: localName }`.
    pub fn key(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Ident)
    }

    /// The local binding name: `localName` in `{ a: localName }`, or the key
    /// itself in shorthand form.
    pub fn binding(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .last()
    }
}

impl FnDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Ident)
    }

    pub fn params(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl ParamList {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Ident)
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl ReturnStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl IfStmt {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn branches(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ObjectLit {
    pub fn entries(&self) -> impl Iterator<Item = ObjectEntry> + '_ {
        self.0.children().filter_map(ObjectEntry::cast)
    }
}

impl ObjectEntry {
    /// Key text, whether written as an identifier, a string, or a number.
    pub fn key_text(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Ident | SyntaxKind::StrVal | SyntaxKind::Number
                )
            })
            .map(|t| t.text().to_string())
    }

    pub fn key_range(&self) -> rowan::TextRange {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Ident | SyntaxKind::StrVal | SyntaxKind::Number
                )
            })
            .map_or_else(|| self.0.text_range(), |t| t.text_range())
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn is_shorthand(&self) -> bool {
        first_token(&self.0, SyntaxKind::Colon).is_none()
    }
}

impl ArrayLit {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl MemberExpr {
    pub fn object(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The property name after the dot.
    pub fn prop(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Ident)
    }
}

impl CallExpr {
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn args(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }
}

impl ArgList {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl AssignExpr {
    pub fn target(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ArrowFn {
    pub fn params(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    pub fn block_body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn expr_body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl NameRef {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Ident)
    }

    pub fn text(&self) -> String {
        self.token().map(|t| t.text().to_string()).unwrap_or_default()
    }
}

/// What a literal holds, with string content unquoted.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    String(String),
    Number(String),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    pub fn classify(&self) -> Option<LiteralKind> {
        let token = self.token()?;
        Some(match token.kind() {
            SyntaxKind::Number => LiteralKind::Number(token.text().to_string()),
            SyntaxKind::KwTrue => LiteralKind::Bool(true),
            SyntaxKind::KwFalse => LiteralKind::Bool(false),
            SyntaxKind::KwNull => LiteralKind::Null,
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => {
                let content = first_token(&self.0, SyntaxKind::StrVal)
                    .map(|t| t.text().to_string())
                    .unwrap_or_default();
                LiteralKind::String(content)
            }
            _ => return None,
        })
    }

    pub fn is_string(&self) -> bool {
        matches!(self.classify(), Some(LiteralKind::String(_)))
    }

    /// Unquoted string content (raw, escapes not yet interpreted).
    pub fn string_value(&self) -> Option<String> {
        match self.classify()? {
            LiteralKind::String(s) => Some(s),
            _ => None,
        }
    }
}
