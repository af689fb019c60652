//! Whole-tree validation.
//!
//! Runs over the sealed tree, once per root:
//! - the root must select at least one field
//! - no two selections anywhere in one root may share a payload key
//! - every `$variable` used in arguments must be declared at the constructor
//! - declared variables that are never used get a warning

use indexmap::{IndexMap, IndexSet};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::engine::tree::{ArgValue, NodeId, QueryTree, RootId};

pub fn validate(tree: &QueryTree, diagnostics: &mut Diagnostics) {
    debug_assert!(tree.is_sealed(), "validation runs on the sealed tree");
    for (root, _) in tree.roots() {
        validate_selections(tree, root, diagnostics);
        validate_aliases(tree, root, diagnostics);
        validate_variables(tree, root, diagnostics);
    }
}

/// An empty selection set is not expressible in the document grammar.
fn validate_selections(tree: &QueryTree, root: RootId, diagnostics: &mut Diagnostics) {
    let data = tree.root(root);
    if !tree.node(data.node()).children().is_empty() {
        return;
    }
    let builder = diagnostics.report(DiagnosticKind::EmptyQuery, data.call_range);
    match &data.name {
        Some(name) => builder.message(name).emit(),
        None => builder.emit(),
    }
}

/// Payload keys are flat per document: a selection's key, aliased or not,
/// may not repeat anywhere else in the same root. Repeated accesses to one
/// field were already merged into a single node where they share a parent.
fn validate_aliases(tree: &QueryTree, root: RootId, diagnostics: &mut Diagnostics) {
    let mut by_key: IndexMap<&str, Vec<NodeId>> = IndexMap::new();
    for id in tree.descendants(root) {
        let node = tree.node(id);
        if node.parent().is_none() {
            continue;
        }
        by_key.entry(node.result_key()).or_default().push(id);
    }

    for (key, ids) in &by_key {
        if ids.len() < 2 {
            continue;
        }
        let first = tree.node(ids[0]);
        for &later in &ids[1..] {
            diagnostics
                .report(DiagnosticKind::DuplicateAlias, tree.node(later).key_range())
                .message(*key)
                .related_to("first used here", first.key_range())
                .emit();
        }
    }
}

fn validate_variables(tree: &QueryTree, root: RootId, diagnostics: &mut Diagnostics) {
    let declared = &tree.root(root).variables;
    let mut used: IndexSet<&str> = IndexSet::new();

    for id in tree.descendants(root) {
        for arg in tree.node(id).args().values() {
            let ArgValue::Variable(name) = &arg.value else {
                continue;
            };
            if declared.contains_key(name.as_str()) {
                used.insert(name.as_str());
            } else {
                diagnostics
                    .report(DiagnosticKind::UndeclaredVariable, arg.range)
                    .message(name)
                    .emit();
            }
        }
    }

    for (name, decl) in declared {
        if !used.contains(name.as_str()) {
            diagnostics
                .report(DiagnosticKind::UnusedVariable, decl.range)
                .message(name)
                .emit();
        }
    }
}
