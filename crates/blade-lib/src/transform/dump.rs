//! Test-only dump methods for transform inspection.

#[cfg(test)]
mod test_helpers {
    use std::fmt::Write;

    use crate::Transform;
    use crate::syntax::SyntaxNode;

    impl Transform<'_> {
        pub fn dump_cst(&self) -> String {
            let mut out = String::new();
            dump_node(&mut out, self.as_cst(), 0);
            out.trim_end().to_string()
        }

        pub fn dump_tree(&self) -> String {
            let tree = self.tree();
            let mut out = String::new();
            for (root_id, root) in tree.roots() {
                let _ = write!(out, "query");
                if let Some(name) = &root.name {
                    let _ = write!(out, " {}", name);
                }
                for (var, decl) in &root.variables {
                    let _ = write!(out, " ${}: {}", var, decl.ty);
                }
                out.push('\n');
                dump_selection(&mut out, tree, tree.root_node(root_id), 1);
            }
            out.trim_end().to_string()
        }

        pub fn dump_documents(&self) -> String {
            let mut out = String::new();
            for document in self.documents() {
                let _ = writeln!(
                    out,
                    "-- {}",
                    document.name.as_deref().unwrap_or("(anonymous)")
                );
                let _ = writeln!(out, "{}", document.text);
            }
            out.trim_end().to_string()
        }

        pub fn dump_output(&self) -> String {
            self.output().unwrap_or("(no output)").to_string()
        }

        pub fn dump_diagnostics(&self) -> String {
            self.diagnostics().render_filtered(self.source())
        }

        pub fn dump_diagnostics_raw(&self) -> String {
            self.diagnostics().render(self.source())
        }

        /// Parse and assert the unit comes out valid.
        #[track_caller]
        pub fn expect_valid(source: &str) -> Transform<'_> {
            let transform = Transform::try_from(source).expect("out of fuel");
            assert!(
                transform.is_valid(),
                "expected a valid unit, got:\n{}",
                transform.dump_diagnostics()
            );
            transform
        }

        /// Parse, assert errors, and return the rendered diagnostics.
        #[track_caller]
        pub fn expect_invalid(source: &str) -> String {
            let transform = Transform::try_from(source).expect("out of fuel");
            assert!(
                !transform.is_valid(),
                "expected diagnostics, but the unit is valid"
            );
            transform.dump_diagnostics()
        }
    }

    fn dump_node(out: &mut String, node: &SyntaxNode, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        let _ = writeln!(out, "{:?}", node.kind());
        for element in node.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Node(child) => dump_node(out, &child, depth + 1),
                rowan::NodeOrToken::Token(token) => {
                    if token.kind().is_trivia() {
                        continue;
                    }
                    for _ in 0..depth + 1 {
                        out.push_str("  ");
                    }
                    let _ = writeln!(out, "{:?} {:?}", token.kind(), token.text());
                }
            }
        }
    }

    fn dump_selection(
        out: &mut String,
        tree: &crate::engine::tree::QueryTree,
        id: crate::engine::tree::NodeId,
        depth: usize,
    ) {
        for &child in tree.node(id).children() {
            let node = tree.node(child);
            for _ in 0..depth {
                out.push_str("  ");
            }
            if node.has_explicit_alias() {
                let _ = write!(out, "{}: {}", node.result_key(), node.field());
            } else {
                out.push_str(node.field());
            }
            for (name, arg) in node.args() {
                let _ = write!(out, " {}={}", name, arg.value);
            }
            out.push('\n');
            dump_selection(out, tree, child, depth + 1);
        }
    }
}
