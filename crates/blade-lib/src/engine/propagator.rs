//! Placeholder propagation.
//!
//! Starting from each constructor binding, follows every reference through
//! member and call chains, growing the query tree as it goes. Bindings
//! discovered along the way (declarators, destructuring, assignments) are
//! processed depth-first; the active set catches bindings defined in terms
//! of themselves.
//!
//! Structural errors (bad arguments, cycles, escaped references) stop the
//! stage: a partial tree must not reach serialization.

use indexmap::{IndexMap, IndexSet};
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::engine::rewriter::{ChainRewrite, FetchSite, RewritePlan};
use crate::engine::scope::{DeclId, ScopeGraph};
use crate::engine::tagger::{BindingSite, RootSeed};
use crate::engine::tree::{Arg, ArgValue, NodeId, QueryTree, RootId};
use crate::escape::{escape_double_quoted, unescape_string};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken, ast};
use crate::transform::PAYLOAD_IDENT;

/// One step of an access chain, from the head outward.
enum Segment {
    Member { prop: SyntaxToken },
    Call { args: Option<ast::ArgList>, range: TextRange },
}

/// Where the outermost chain expression sits in the surrounding code.
enum ChainContext {
    /// `const name = <chain>`
    DeclaratorName { name: SyntaxToken },
    /// `const { a, b: c } = <chain>`
    DeclaratorPattern { pattern: ast::ObjectPattern },
    /// `name = <chain>`
    AssignTarget { target: ast::NameRef },
    /// The reference itself is being assigned; the value side binds it.
    AssignedOver,
    /// `<chain>;`
    Statement { stmt: SyntaxNode },
    Other,
}

pub fn propagate(
    scopes: &ScopeGraph,
    seeds: &[RootSeed],
    tree: &mut QueryTree,
    plan: &mut RewritePlan,
    diagnostics: &mut Diagnostics,
) {
    let mut propagator = Propagator {
        scopes,
        tree,
        plan,
        diagnostics,
        bindings: IndexMap::new(),
        active: IndexSet::new(),
        failed: false,
    };

    for seed in seeds {
        if propagator.failed {
            break;
        }
        let decl = match &seed.binding {
            BindingSite::Declarator { name_range, .. } => scopes.decl_at(*name_range),
            // The synthetic export binding was declared with the call range.
            BindingSite::ExportDefault => {
                scopes.decl_at(propagator.tree.root(seed.root).call_range)
            }
        };
        let Some(decl) = decl else {
            continue;
        };
        let node = propagator.tree.root_node(seed.root);
        propagator.bind(decl, seed.root, node);
    }

    if !propagator.failed {
        propagator.scan_escaped_refs();
    }

    tree.seal();
}

struct Propagator<'a> {
    scopes: &'a ScopeGraph,
    tree: &'a mut QueryTree,
    plan: &'a mut RewritePlan,
    diagnostics: &'a mut Diagnostics,
    /// Declarations known to hold a query selection.
    bindings: IndexMap<DeclId, (RootId, NodeId)>,
    /// Declarations currently being processed, for cycle detection.
    active: IndexSet<DeclId>,
    failed: bool,
}

impl Propagator<'_> {
    fn bind(&mut self, decl: DeclId, root: RootId, node: NodeId) {
        // Re-entering a binding still being resolved means its defining
        // chain leads back to itself, even when both ends name one node.
        if self.active.contains(&decl) {
            let declaration = self.scopes.decl(decl);
            self.diagnostics
                .report(DiagnosticKind::CyclicAlias, declaration.name_range)
                .message(&declaration.name)
                .emit();
            self.failed = true;
            return;
        }
        if let Some(&(bound_root, bound_node)) = self.bindings.get(&decl) {
            if bound_root == root && bound_node == node {
                return;
            }
            let declaration = self.scopes.decl(decl);
            self.diagnostics
                .report(DiagnosticKind::InvalidArgument, declaration.name_range)
                .message(format!(
                    "`{}` is already bound to a different query selection",
                    declaration.name
                ))
                .emit();
            self.failed = true;
            return;
        }

        self.bindings.insert(decl, (root, node));
        self.active.insert(decl);
        self.process_decl(decl);
        self.active.shift_remove(&decl);
    }

    fn process_decl(&mut self, decl: DeclId) {
        let refs: Vec<ast::NameRef> = self.scopes.refs_of(decl).cloned().collect();
        for name_ref in refs {
            if self.failed {
                return;
            }
            self.process_ref(decl, &name_ref);
        }
    }

    fn process_ref(&mut self, decl: DeclId, name_ref: &ast::NameRef) {
        let (root, node) = self.bindings[&decl];
        let ref_range = name_ref.as_cst().text_range();

        let declaration = self.scopes.decl(decl);
        if declaration.kind.has_temporal_dead_zone()
            && ref_range.start() < declaration.name_range.start()
        {
            self.diagnostics
                .report(DiagnosticKind::UnresolvedReference, ref_range)
                .message(&declaration.name)
                .emit();
            self.failed = true;
            return;
        }

        let (outermost, segments) = collect_chain(name_ref);
        let context = chain_context(&outermost);

        if matches!(context, ChainContext::AssignedOver) {
            return;
        }
        if segments.is_empty() {
            self.process_bare_ref(root, node, &outermost, context);
            return;
        }

        let head_is_root = node == self.tree.root_node(root);
        let target_name = match &context {
            ChainContext::DeclaratorName { name } => Some(name.text().to_string()),
            ChainContext::AssignTarget { target } => Some(target.text()),
            _ => None,
        };
        let alias_index = target_name.as_ref().and_then(|_| alias_segment(&segments));

        let mut cur = node;
        let mut member_nodes = Vec::new();
        let local_name = declaration.name.clone();

        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Member { prop } => {
                    let alias = if Some(i) == alias_index {
                        target_name.as_deref()
                    } else {
                        None
                    };
                    cur = self.tree.child(cur, prop.text(), alias, prop.text_range());
                    member_nodes.push(cur);
                }
                Segment::Call { args, range } => {
                    if i == 0 {
                        if head_is_root {
                            self.diagnostics
                                .report(DiagnosticKind::InvalidArgument, *range)
                                .message(
                                    "variables are declared at the constructor, \
                                     not on the query root",
                                )
                                .emit();
                            self.failed = true;
                            return;
                        }
                        // Calling a bound selection attaches arguments and pins
                        // its payload key to the local name.
                        if let Some(parsed) = self.parse_args(args.as_ref(), *range) {
                            self.attach(cur, parsed, *range);
                        }
                        self.tree.set_explicit_alias(cur, &local_name);
                    } else if let Some(parsed) = self.parse_args(args.as_ref(), *range) {
                        self.attach(cur, parsed, *range);
                    }
                }
            }
            if self.failed {
                return;
            }
        }

        match context {
            ChainContext::DeclaratorName { name } => {
                if let Some(target) = self.scopes.decl_at(name.text_range()) {
                    self.bind(target, root, cur);
                }
            }
            ChainContext::AssignTarget { target } => {
                if let Some(target) = self.scopes.resolve(&target) {
                    self.bind(target, root, cur);
                }
            }
            ChainContext::DeclaratorPattern { pattern } => {
                self.destructure(&pattern, root, cur);
            }
            ChainContext::Statement { stmt } => {
                // An attachment call as a whole statement has served its
                // purpose; the statement disappears from the output.
                if matches!(segments.last(), Some(Segment::Call { .. })) {
                    self.plan.stmt_removals.push(stmt.text_range());
                    return;
                }
            }
            ChainContext::AssignedOver | ChainContext::Other => {}
        }

        if self.failed {
            return;
        }
        let head = if head_is_root {
            PAYLOAD_IDENT.to_string()
        } else {
            name_ref.text()
        };
        self.plan.chains.push(ChainRewrite {
            range: outermost.text_range(),
            head,
            segments: member_nodes,
        });
    }

    fn process_bare_ref(
        &mut self,
        root: RootId,
        node: NodeId,
        outermost: &SyntaxNode,
        context: ChainContext,
    ) {
        let is_root = node == self.tree.root_node(root);
        match context {
            ChainContext::DeclaratorName { name } => {
                if let Some(target) = self.scopes.decl_at(name.text_range()) {
                    self.bind(target, root, node);
                }
                if is_root {
                    self.plan
                        .text_edits
                        .push((outermost.text_range(), PAYLOAD_IDENT.to_string()));
                }
            }
            ChainContext::AssignTarget { target } => {
                if let Some(target) = self.scopes.resolve(&target) {
                    self.bind(target, root, node);
                }
                if is_root {
                    self.plan
                        .text_edits
                        .push((outermost.text_range(), PAYLOAD_IDENT.to_string()));
                }
            }
            ChainContext::DeclaratorPattern { pattern } => {
                self.destructure(&pattern, root, node);
                if is_root {
                    self.plan
                        .text_edits
                        .push((outermost.text_range(), PAYLOAD_IDENT.to_string()));
                }
            }
            ChainContext::Statement { .. } | ChainContext::Other => {
                // The placeholder used as a plain value is a fetch site: the
                // serialized document is spliced in.
                if is_root {
                    self.plan.fetch_sites.push(FetchSite {
                        root,
                        range: outermost.text_range(),
                    });
                }
            }
            ChainContext::AssignedOver => {}
        }
    }

    /// `const { title, poster: cover } = <selection>`: every property becomes
    /// a child selection keyed by its local binding.
    fn destructure(&mut self, pattern: &ast::ObjectPattern, root: RootId, node: NodeId) {
        for prop in pattern.props() {
            let (Some(key), Some(binding)) = (prop.key(), prop.binding()) else {
                continue;
            };
            let alias = binding.text();
            let child = self
                .tree
                .child(node, key.text(), Some(alias), key.text_range());
            if let Some(target) = self.scopes.decl_at(binding.text_range()) {
                self.bind(target, root, child);
            }
            if self.failed {
                return;
            }
            // When the payload key diverges from the field, the pattern must
            // pick up the aliased key.
            if key.text() != alias {
                self.plan
                    .text_edits
                    .push((prop.as_cst().text_range(), alias.to_string()));
            }
        }
    }

    /// Arguments are always a single object literal of scalar literals or
    /// `"$var"` references.
    fn parse_args(
        &mut self,
        args: Option<&ast::ArgList>,
        call_range: TextRange,
    ) -> Option<IndexMap<String, Arg>> {
        let object = args.and_then(|list| {
            let exprs: Vec<_> = list.exprs().collect();
            match exprs.as_slice() {
                [ast::Expr::ObjectLit(obj)] => Some(obj.clone()),
                _ => None,
            }
        });
        let Some(object) = object else {
            self.diagnostics
                .report(DiagnosticKind::InvalidArgument, call_range)
                .message("arguments must be passed in a single object literal")
                .emit();
            self.failed = true;
            return None;
        };

        let mut parsed = IndexMap::new();
        for entry in object.entries() {
            let Some(key) = entry.key_text() else {
                continue;
            };
            let range = entry.key_range();
            let value = match entry.value() {
                Some(ast::Expr::Literal(lit)) => match lit.classify() {
                    Some(ast::LiteralKind::String(raw)) => {
                        let unescaped = unescape_string(&raw);
                        match unescaped.strip_prefix('$') {
                            Some(var) => ArgValue::Variable(var.to_string()),
                            None => ArgValue::Scalar(format!(
                                "\"{}\"",
                                escape_double_quoted(&unescaped)
                            )),
                        }
                    }
                    Some(ast::LiteralKind::Number(text)) => ArgValue::Scalar(text),
                    Some(ast::LiteralKind::Bool(value)) => ArgValue::Scalar(value.to_string()),
                    Some(ast::LiteralKind::Null) => ArgValue::Scalar("null".to_string()),
                    None => {
                        self.invalid_arg_value(range);
                        return None;
                    }
                },
                _ => {
                    self.invalid_arg_value(range);
                    return None;
                }
            };
            parsed.insert(key, Arg { value, range });
        }
        Some(parsed)
    }

    fn invalid_arg_value(&mut self, range: TextRange) {
        self.diagnostics
            .report(DiagnosticKind::InvalidArgument, range)
            .message("argument values must be scalar literals or variable references")
            .emit();
        self.failed = true;
    }

    fn attach(&mut self, node: NodeId, args: IndexMap<String, Arg>, call_range: TextRange) {
        if let Err(name) = self.tree.attach_args(node, args) {
            self.diagnostics
                .report(DiagnosticKind::InvalidArgument, call_range)
                .message(format!("conflicting values for argument `{}`", name))
                .emit();
            self.failed = true;
        }
    }

    /// A reference that failed to resolve but shares its name with a query
    /// binding escaped the binding's scope.
    fn scan_escaped_refs(&mut self) {
        let bound_names: IndexSet<&str> = self
            .bindings
            .keys()
            .map(|&d| self.scopes.decl(d).name.as_str())
            .collect();

        for reference in self.scopes.refs() {
            if reference.decl.is_some() {
                continue;
            }
            let name = reference.name_ref.text();
            if bound_names.contains(name.as_str()) {
                self.diagnostics
                    .report(
                        DiagnosticKind::UnresolvedReference,
                        reference.name_ref.as_cst().text_range(),
                    )
                    .message(&name)
                    .emit();
                self.failed = true;
            }
        }
    }
}

/// Climbs from a reference through the member/call chain it heads.
///
/// Parenthesized sub-expressions are transparent. Stops at the first parent
/// where the expression is no longer in head position.
fn collect_chain(name_ref: &ast::NameRef) -> (SyntaxNode, Vec<Segment>) {
    let mut cur = name_ref.as_cst().clone();
    let mut segments = Vec::new();

    while let Some(parent) = cur.parent() {
        match parent.kind() {
            SyntaxKind::ParenExpr => cur = parent,
            SyntaxKind::MemberExpr => {
                let Some(member) = ast::MemberExpr::cast(parent.clone()) else {
                    break;
                };
                let Some(prop) = member.prop() else {
                    break;
                };
                segments.push(Segment::Member { prop });
                cur = parent;
            }
            SyntaxKind::CallExpr => {
                let Some(call) = ast::CallExpr::cast(parent.clone()) else {
                    break;
                };
                segments.push(Segment::Call {
                    args: call.args(),
                    range: parent.text_range(),
                });
                cur = parent;
            }
            _ => break,
        }
    }

    (cur, segments)
}

fn chain_context(outermost: &SyntaxNode) -> ChainContext {
    let Some(parent) = outermost.parent() else {
        return ChainContext::Other;
    };
    match parent.kind() {
        SyntaxKind::Declarator => {
            let Some(declarator) = ast::Declarator::cast(parent) else {
                return ChainContext::Other;
            };
            if let Some(name) = declarator.name() {
                ChainContext::DeclaratorName { name }
            } else if let Some(pattern) = declarator.pattern() {
                ChainContext::DeclaratorPattern { pattern }
            } else {
                ChainContext::Other
            }
        }
        SyntaxKind::AssignExpr => {
            let Some(assign) = ast::AssignExpr::cast(parent) else {
                return ChainContext::Other;
            };
            let is_value = assign
                .value()
                .is_some_and(|v| v.as_cst() == outermost);
            if !is_value {
                return ChainContext::AssignedOver;
            }
            match assign.target() {
                Some(ast::Expr::NameRef(target)) => ChainContext::AssignTarget { target },
                _ => ChainContext::Other,
            }
        }
        SyntaxKind::ExprStmt => ChainContext::Statement { stmt: parent },
        _ => ChainContext::Other,
    }
}

/// The member segment a binding name aliases: the one that ends the access
/// path, allowing for a trailing argument call.
fn alias_segment(segments: &[Segment]) -> Option<usize> {
    match segments.last() {
        Some(Segment::Member { .. }) => Some(segments.len() - 1),
        Some(Segment::Call { .. })
            if segments.len() >= 2
                && matches!(segments[segments.len() - 2], Segment::Member { .. }) =>
        {
            Some(segments.len() - 2)
        }
        _ => None,
    }
}
