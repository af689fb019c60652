//! Constructor tagging.
//!
//! Finds every `createQuery` call, opens a query root for it, and records
//! how the placeholder is bound: a declarator name or `export default`.
//! Also records the constructor call site and the `createQuery` import for
//! the rewriter, since neither survives the transform.

use indexmap::IndexMap;
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::engine::rewriter::{ConstructorSite, ImportRemoval, RewritePlan};
use crate::engine::scope::SyntheticBinding;
use crate::engine::tree::{QueryTree, RootId, VariableDecl};
use crate::escape::unescape_string;
use crate::syntax::{Root, SyntaxKind, ast};
use crate::transform::{DEFAULT_EXPORT_BINDING, QUERY_CONSTRUCTOR};

/// How a constructor call's placeholder is reachable from the rest of the unit.
#[derive(Debug, Clone)]
pub enum BindingSite {
    Declarator { name: String, name_range: TextRange },
    ExportDefault,
}

#[derive(Debug, Clone)]
pub struct RootSeed {
    pub root: RootId,
    pub binding: BindingSite,
}

#[derive(Debug, Default)]
pub struct TagOutput {
    pub seeds: Vec<RootSeed>,
    /// Module-scope bindings the scope graph must know about.
    pub synthetics: Vec<SyntheticBinding>,
}

pub fn tag(
    root: &Root,
    tree: &mut QueryTree,
    plan: &mut RewritePlan,
    diagnostics: &mut Diagnostics,
) -> TagOutput {
    let mut output = TagOutput::default();

    for node in root.as_cst().descendants() {
        let Some(call) = ast::CallExpr::cast(node) else {
            continue;
        };
        if !is_constructor_call(&call) {
            continue;
        }
        tag_constructor(&call, tree, plan, diagnostics, &mut output);
    }

    if let Some(removal) = find_import_removal(root) {
        plan.import_removal = Some(removal);
    }

    output
}

fn is_constructor_call(call: &ast::CallExpr) -> bool {
    matches!(
        call.callee(),
        Some(ast::Expr::NameRef(name)) if name.text() == QUERY_CONSTRUCTOR
    )
}

fn tag_constructor(
    call: &ast::CallExpr,
    tree: &mut QueryTree,
    plan: &mut RewritePlan,
    diagnostics: &mut Diagnostics,
    output: &mut TagOutput,
) {
    let call_range = call.as_cst().text_range();

    let Some(binding) = binding_site(call, diagnostics) else {
        return;
    };

    let (explicit_name, variables) = constructor_args(call, diagnostics);

    let name = explicit_name.or_else(|| match &binding {
        BindingSite::Declarator { name, .. } if name != DEFAULT_EXPORT_BINDING => {
            Some(name.clone())
        }
        _ => None,
    });

    let root = tree.new_root(name, variables, call_range);

    plan.constructor_sites.push(ConstructorSite {
        root,
        call_range,
        removable_stmt: removable_stmt(call),
    });

    if matches!(binding, BindingSite::ExportDefault) {
        output.synthetics.push(SyntheticBinding {
            name: DEFAULT_EXPORT_BINDING.to_string(),
            range: call_range,
        });
    }

    output.seeds.push(RootSeed { root, binding });
}

/// The constructor must be the whole initializer of a plain declarator, or
/// the default export. Anything else leaves the placeholder unreachable.
fn binding_site(call: &ast::CallExpr, diagnostics: &mut Diagnostics) -> Option<BindingSite> {
    let call_range = call.as_cst().text_range();
    let parent = call.as_cst().parent()?;

    match parent.kind() {
        SyntaxKind::Declarator => {
            let declarator = ast::Declarator::cast(parent)?;
            if let Some(name) = declarator.name() {
                return Some(BindingSite::Declarator {
                    name: name.text().to_string(),
                    name_range: name.text_range(),
                });
            }
            diagnostics
                .report(DiagnosticKind::InvalidArgument, call_range)
                .message("bind the query placeholder to a single name, not a pattern")
                .emit();
            None
        }
        SyntaxKind::ExportDefault => Some(BindingSite::ExportDefault),
        _ => {
            diagnostics
                .report(DiagnosticKind::InvalidArgument, call_range)
                .message("the query placeholder must be bound to a declaration or exported")
                .emit();
            None
        }
    }
}

/// `createQuery()`, `createQuery("Name")`, `createQuery({ vars })`, or
/// `createQuery("Name", { vars })`.
fn constructor_args(
    call: &ast::CallExpr,
    diagnostics: &mut Diagnostics,
) -> (Option<String>, IndexMap<String, VariableDecl>) {
    let mut explicit_name = None;
    let mut variables = IndexMap::new();

    let Some(args) = call.args() else {
        return (explicit_name, variables);
    };

    for (i, arg) in args.exprs().enumerate() {
        match &arg {
            ast::Expr::Literal(lit) if lit.is_string() && i == 0 => {
                explicit_name = lit.string_value().map(|raw| unescape_string(&raw));
            }
            ast::Expr::ObjectLit(obj) if variables.is_empty() => {
                variables = variable_decls(obj, diagnostics);
            }
            _ => {
                diagnostics
                    .report(DiagnosticKind::InvalidArgument, arg.as_cst().text_range())
                    .message(
                        "createQuery accepts an operation name string and a variables object",
                    )
                    .emit();
            }
        }
    }

    (explicit_name, variables)
}

fn variable_decls(
    obj: &ast::ObjectLit,
    diagnostics: &mut Diagnostics,
) -> IndexMap<String, VariableDecl> {
    let mut variables = IndexMap::new();
    for entry in obj.entries() {
        let Some(key) = entry.key_text() else {
            continue;
        };
        let range = entry.key_range();
        match entry.value() {
            Some(ast::Expr::Literal(lit)) if lit.is_string() => {
                let ty = unescape_string(&lit.string_value().unwrap_or_default());
                variables.insert(key, VariableDecl { ty, range });
            }
            _ => {
                diagnostics
                    .report(DiagnosticKind::InvalidArgument, range)
                    .message("variable types must be string literals")
                    .emit();
            }
        }
    }
    variables
}

/// The whole `const q = createQuery(...)` statement can go when the call is
/// the only declarator. Otherwise the call is replaced in place.
fn removable_stmt(call: &ast::CallExpr) -> Option<TextRange> {
    let declarator = call.as_cst().parent()?;
    if declarator.kind() != SyntaxKind::Declarator {
        return None;
    }
    let var_decl = ast::VarDecl::cast(declarator.parent()?)?;
    if var_decl.declarators().count() == 1 {
        Some(var_decl.as_cst().text_range())
    } else {
        None
    }
}

/// The `createQuery` import: remove the whole statement when it is the only
/// specifier, otherwise just the specifier and its comma.
fn find_import_removal(root: &Root) -> Option<ImportRemoval> {
    for stmt in root.statements() {
        let ast::Stmt::ImportDecl(import) = stmt else {
            continue;
        };
        let Some(named) = import.named_imports() else {
            continue;
        };
        let Some(token) = named.names().find(|t| t.text() == QUERY_CONSTRUCTOR) else {
            continue;
        };

        let only_specifier =
            import.default_binding().is_none() && named.names().count() == 1;
        if only_specifier {
            return Some(ImportRemoval::Whole(import.as_cst().text_range()));
        }
        return Some(ImportRemoval::Specifier(specifier_range(&named, &token)));
    }
    None
}

/// Specifier range widened over the adjacent comma.
fn specifier_range(
    named: &ast::NamedImports,
    token: &crate::syntax::SyntaxToken,
) -> TextRange {
    let mut range = token.text_range();
    let tokens: Vec<_> = named
        .as_cst()
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| !t.kind().is_trivia())
        .collect();
    let idx = tokens.iter().position(|t| t == token);

    if let Some(i) = idx {
        if let Some(next) = tokens.get(i + 1).filter(|t| t.kind() == SyntaxKind::Comma) {
            range = TextRange::new(range.start(), next.text_range().end());
        } else if i > 0 && tokens[i - 1].kind() == SyntaxKind::Comma {
            range = TextRange::new(tokens[i - 1].text_range().start(), range.end());
        }
    }
    range
}
