//! Query document rendering.
//!
//! Turns each sealed query root into a [`Document`]: the operation header,
//! declared variables, and the selection text with two-space indentation.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;

use crate::engine::tree::{NodeId, QueryTree};

/// A rendered query document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Operation name, `None` for anonymous queries.
    pub name: Option<String>,
    /// Declared variables, name to type.
    pub variables: IndexMap<String, String>,
    /// The full document text.
    pub text: String,
}

pub fn serialize(tree: &QueryTree) -> Vec<Document> {
    debug_assert!(tree.is_sealed(), "serialization runs on the sealed tree");
    tree.roots()
        .map(|(_, root)| {
            let variables: IndexMap<String, String> = root
                .variables
                .iter()
                .map(|(name, decl)| (name.clone(), decl.ty.clone()))
                .collect();

            let mut text = String::from("query");
            if let Some(name) = &root.name {
                let _ = write!(text, " {}", name);
            }
            if !variables.is_empty() {
                let vars = variables
                    .iter()
                    .map(|(name, ty)| format!("${}: {}", name, ty))
                    .collect::<Vec<_>>()
                    .join(", ");
                // Anonymous operations still carry their variable list.
                if root.name.is_none() {
                    let _ = write!(text, " ({})", vars);
                } else {
                    let _ = write!(text, "({})", vars);
                }
            }
            text.push_str(" {");
            for &child in tree.node(root.node()).children() {
                text.push('\n');
                write_selection(&mut text, tree, child, 1);
            }
            text.push_str("\n}");

            Document {
                name: root.name.clone(),
                variables,
                text,
            }
        })
        .collect()
}

fn write_selection(out: &mut String, tree: &QueryTree, id: NodeId, depth: usize) {
    let node = tree.node(id);
    for _ in 0..depth {
        out.push_str("  ");
    }
    if node.has_explicit_alias() {
        let _ = write!(out, "{}: {}", node.result_key(), node.field());
    } else {
        out.push_str(node.field());
    }
    if !node.args().is_empty() {
        let args = node
            .args()
            .iter()
            .map(|(name, arg)| format!("{}: {}", name, arg.value))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(out, "({})", args);
    }
    if !node.children().is_empty() {
        out.push_str(" {");
        for &child in node.children() {
            out.push('\n');
            write_selection(out, tree, child, depth + 1);
        }
        out.push('\n');
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push('}');
    }
}
