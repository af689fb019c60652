//! Scope graph for the host-language subset.
//!
//! Built in one walk over the AST: declarations and references are collected
//! with the scope they appear in, then references resolve through the scope
//! chain once every declaration is known. That ordering gives `var` and
//! `function` hoisting for free.
//!
//! Scoping rules:
//! - `const`/`let` declare into the enclosing block scope
//! - `var` and function declarations hoist to the nearest function or module
//!   scope
//! - function parameters and a function expression's own name live in the
//!   function's scope
//! - a function body block shares the function scope instead of opening its
//!   own

use indexmap::IndexMap;
use rowan::TextRange;

use crate::syntax::ast;
use crate::syntax::{NameRef, Root, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Const,
    Let,
    Var,
    Function,
    Param,
    Import,
    /// Synthetic binding for `export default` query roots.
    DefaultExport,
}

impl DeclKind {
    /// `const`/`let` bindings cannot be referenced before their declaration.
    pub fn has_temporal_dead_zone(self) -> bool {
        matches!(self, DeclKind::Const | DeclKind::Let)
    }
}

#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub name_range: TextRange,
    pub kind: DeclKind,
    pub scope: ScopeId,
    /// The declarator that introduced this binding, when there is one.
    pub declarator: Option<ast::Declarator>,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    decls: IndexMap<String, DeclId>,
}

#[derive(Debug, Clone)]
pub struct Reference {
    pub name_ref: NameRef,
    pub scope: ScopeId,
    pub decl: Option<DeclId>,
}

/// A binding to insert before the walk, with no declarator behind it.
#[derive(Debug, Clone)]
pub struct SyntheticBinding {
    pub name: String,
    pub range: TextRange,
}

#[derive(Debug, Default)]
pub struct ScopeGraph {
    scopes: Vec<Scope>,
    decls: Vec<Declaration>,
    refs: Vec<Reference>,
    ref_index: IndexMap<SyntaxNode, usize>,
}

impl ScopeGraph {
    pub fn build(root: &Root, synthetics: &[SyntheticBinding]) -> Self {
        let mut builder = Builder {
            graph: ScopeGraph::default(),
        };
        let module = builder.new_scope(ScopeKind::Module, None);
        for synthetic in synthetics {
            builder.declare(
                module,
                &synthetic.name,
                synthetic.range,
                DeclKind::DefaultExport,
                None,
            );
        }
        builder.walk_stmts(root.statements(), module);
        builder.resolve_refs();
        builder.graph
    }

    pub fn module_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    pub fn refs(&self) -> &[Reference] {
        &self.refs
    }

    /// The declaration a reference resolved to, if any.
    pub fn resolve(&self, name_ref: &NameRef) -> Option<DeclId> {
        self.ref_index
            .get(name_ref.as_cst())
            .and_then(|&i| self.refs[i].decl)
    }

    /// References to `id`, in source order.
    pub fn refs_of(&self, id: DeclId) -> impl Iterator<Item = &NameRef> {
        self.refs
            .iter()
            .filter(move |r| r.decl == Some(id))
            .map(|r| &r.name_ref)
    }

    /// The declaration whose binding name occupies `range` exactly.
    pub fn decl_at(&self, range: TextRange) -> Option<DeclId> {
        self.decls
            .iter()
            .position(|d| d.name_range == range)
            .map(|i| DeclId(i as u32))
    }

    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<DeclId> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let scope = &self.scopes[id.0 as usize];
            if let Some(&decl) = scope.decls.get(name) {
                return Some(decl);
            }
            cur = scope.parent;
        }
        None
    }

    /// Nearest non-block scope, for `var` and function hoisting.
    fn hoist_target(&self, scope: ScopeId) -> ScopeId {
        let mut cur = scope;
        while self.scopes[cur.0 as usize].kind == ScopeKind::Block {
            cur = self.scopes[cur.0 as usize]
                .parent
                .expect("block scopes always have a parent");
        }
        cur
    }

    #[cfg(test)]
    pub(crate) fn dump(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for (i, scope) in self.scopes.iter().enumerate() {
            let _ = writeln!(
                out,
                "scope {} {:?} parent={:?}",
                i,
                scope.kind,
                scope.parent.map(|p| p.0)
            );
            for (name, &decl) in &scope.decls {
                let _ = writeln!(out, "  {} ({:?})", name, self.decls[decl.0 as usize].kind);
            }
        }
        for reference in &self.refs {
            let _ = writeln!(
                out,
                "ref {} -> {}",
                reference.name_ref.text(),
                match reference.decl {
                    Some(d) => format!("{:?}", self.decls[d.0 as usize].name_range),
                    None => "unresolved".to_string(),
                }
            );
        }
        out
    }
}

struct Builder {
    graph: ScopeGraph,
}

impl Builder {
    fn new_scope(&mut self, kind: ScopeKind, parent: Option<ScopeId>) -> ScopeId {
        self.graph.scopes.push(Scope {
            kind,
            parent,
            decls: IndexMap::new(),
        });
        ScopeId(self.graph.scopes.len() as u32 - 1)
    }

    fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        name_range: TextRange,
        kind: DeclKind,
        declarator: Option<ast::Declarator>,
    ) -> DeclId {
        self.graph.decls.push(Declaration {
            name: name.to_string(),
            name_range,
            kind,
            scope,
            declarator,
        });
        let id = DeclId(self.graph.decls.len() as u32 - 1);
        // Redeclaration in the same scope shadows the earlier binding.
        self.graph.scopes[scope.0 as usize]
            .decls
            .insert(name.to_string(), id);
        id
    }

    fn walk_stmts(&mut self, stmts: impl Iterator<Item = ast::Stmt>, scope: ScopeId) {
        for stmt in stmts {
            self.walk_stmt(&stmt, scope);
        }
    }

    fn walk_stmt(&mut self, stmt: &ast::Stmt, scope: ScopeId) {
        match stmt {
            ast::Stmt::ImportDecl(import) => {
                if let Some(binding) = import.default_binding() {
                    self.declare(
                        scope,
                        binding.text(),
                        binding.text_range(),
                        DeclKind::Import,
                        None,
                    );
                }
                if let Some(named) = import.named_imports() {
                    for name in named.names() {
                        self.declare(scope, name.text(), name.text_range(), DeclKind::Import, None);
                    }
                }
            }
            ast::Stmt::ExportDefault(export) => {
                if let Some(expr) = export.expr() {
                    self.walk_expr(&expr, scope);
                }
            }
            ast::Stmt::VarDecl(decl) => self.walk_var_decl(decl, scope),
            ast::Stmt::FnDecl(func) => {
                if let Some(name) = func.name() {
                    let target = self.graph.hoist_target(scope);
                    self.declare(
                        target,
                        name.text(),
                        name.text_range(),
                        DeclKind::Function,
                        None,
                    );
                }
                self.walk_function_body(func.params(), func.body(), scope);
            }
            ast::Stmt::Block(block) => {
                let inner = self.new_scope(ScopeKind::Block, Some(scope));
                self.walk_stmts(block.statements(), inner);
            }
            ast::Stmt::ReturnStmt(ret) => {
                if let Some(expr) = ret.expr() {
                    self.walk_expr(&expr, scope);
                }
            }
            ast::Stmt::IfStmt(stmt) => {
                if let Some(cond) = stmt.condition() {
                    self.walk_expr(&cond, scope);
                }
                for branch in stmt.branches() {
                    self.walk_stmt(&branch, scope);
                }
            }
            ast::Stmt::ExprStmt(stmt) => {
                if let Some(expr) = stmt.expr() {
                    self.walk_expr(&expr, scope);
                }
            }
        }
    }

    fn walk_var_decl(&mut self, decl: &ast::VarDecl, scope: ScopeId) {
        let kind = match decl.keyword().map(|t| t.kind()) {
            Some(crate::syntax::SyntaxKind::KwLet) => DeclKind::Let,
            Some(crate::syntax::SyntaxKind::KwVar) => DeclKind::Var,
            _ => DeclKind::Const,
        };
        let target = if kind == DeclKind::Var {
            self.graph.hoist_target(scope)
        } else {
            scope
        };

        for declarator in decl.declarators() {
            if let Some(name) = declarator.name() {
                self.declare(
                    target,
                    name.text(),
                    name.text_range(),
                    kind,
                    Some(declarator.clone()),
                );
            } else if let Some(pattern) = declarator.pattern() {
                for prop in pattern.props() {
                    if let Some(binding) = prop.binding() {
                        self.declare(
                            target,
                            binding.text(),
                            binding.text_range(),
                            kind,
                            Some(declarator.clone()),
                        );
                    }
                }
            }
            if let Some(init) = declarator.init() {
                self.walk_expr(&init, scope);
            }
        }
    }

    /// Parameters and the body statements share one function scope.
    fn walk_function_body(
        &mut self,
        params: Option<ast::ParamList>,
        body: Option<ast::Block>,
        parent: ScopeId,
    ) {
        let fn_scope = self.new_scope(ScopeKind::Function, Some(parent));
        if let Some(params) = params {
            for param in params.names() {
                self.declare(
                    fn_scope,
                    param.text(),
                    param.text_range(),
                    DeclKind::Param,
                    None,
                );
            }
        }
        if let Some(body) = body {
            self.walk_stmts(body.statements(), fn_scope);
        }
    }

    fn walk_expr(&mut self, expr: &ast::Expr, scope: ScopeId) {
        match expr {
            ast::Expr::NameRef(name_ref) => {
                self.graph
                    .ref_index
                    .insert(name_ref.as_cst().clone(), self.graph.refs.len());
                self.graph.refs.push(Reference {
                    name_ref: name_ref.clone(),
                    scope,
                    decl: None,
                });
            }
            ast::Expr::Literal(_) => {}
            ast::Expr::ObjectLit(obj) => {
                for entry in obj.entries() {
                    if let Some(value) = entry.value() {
                        self.walk_expr(&value, scope);
                    }
                }
            }
            ast::Expr::ArrayLit(arr) => {
                for element in arr.elements() {
                    self.walk_expr(&element, scope);
                }
            }
            ast::Expr::MemberExpr(member) => {
                if let Some(object) = member.object() {
                    self.walk_expr(&object, scope);
                }
            }
            ast::Expr::CallExpr(call) => {
                if let Some(callee) = call.callee() {
                    self.walk_expr(&callee, scope);
                }
                if let Some(args) = call.args() {
                    for arg in args.exprs() {
                        self.walk_expr(&arg, scope);
                    }
                }
            }
            ast::Expr::AssignExpr(assign) => {
                if let Some(target) = assign.target() {
                    self.walk_expr(&target, scope);
                }
                if let Some(value) = assign.value() {
                    self.walk_expr(&value, scope);
                }
            }
            ast::Expr::ParenExpr(paren) => {
                if let Some(inner) = paren.inner() {
                    self.walk_expr(&inner, scope);
                }
            }
            ast::Expr::ArrowFn(arrow) => {
                if let Some(body) = arrow.block_body() {
                    self.walk_function_body(arrow.params(), Some(body), scope);
                } else {
                    let fn_scope = self.new_scope(ScopeKind::Function, Some(scope));
                    if let Some(params) = arrow.params() {
                        for param in params.names() {
                            self.declare(
                                fn_scope,
                                param.text(),
                                param.text_range(),
                                DeclKind::Param,
                                None,
                            );
                        }
                    }
                    if let Some(body) = arrow.expr_body() {
                        self.walk_expr(&body, fn_scope);
                    }
                }
            }
            ast::Expr::FnExpr(func) => {
                // A function expression's own name is visible only inside it,
                // so it is declared in the function scope.
                let fn_scope = self.new_scope(ScopeKind::Function, Some(scope));
                if let Some(name) = func.name() {
                    self.declare(
                        fn_scope,
                        name.text(),
                        name.text_range(),
                        DeclKind::Function,
                        None,
                    );
                }
                if let Some(params) = func.params() {
                    for param in params.names() {
                        self.declare(
                            fn_scope,
                            param.text(),
                            param.text_range(),
                            DeclKind::Param,
                            None,
                        );
                    }
                }
                if let Some(body) = func.body() {
                    self.walk_stmts(body.statements(), fn_scope);
                }
            }
        }
    }

    fn resolve_refs(&mut self) {
        for i in 0..self.graph.refs.len() {
            let name = self.graph.refs[i].name_ref.text();
            let scope = self.graph.refs[i].scope;
            self.graph.refs[i].decl = self.graph.lookup(scope, &name);
        }
    }
}
