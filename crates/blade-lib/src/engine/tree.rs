//! Arena storage for inferred query trees.
//!
//! One [`QueryTree`] holds every query root found in a unit. Nodes are
//! created by the propagator as it follows access chains; after the fixed
//! point is reached the tree is sealed and becomes read-only input for
//! validation, serialization, and rewriting.

use indexmap::IndexMap;
use rowan::TextRange;

/// Index of a query root within the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(pub(crate) u32);

/// Index of a selection node within the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl RootId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Argument value attached to a selection node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Scalar literal, stored in serialized form (`"text"`, `42`, `true`, `null`).
    Scalar(String),
    /// Reference to a variable declared at the constructor, stored without `$`.
    Variable(String),
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::Scalar(text) => write!(f, "{}", text),
            ArgValue::Variable(name) => write!(f, "${}", name),
        }
    }
}

/// Named argument with its source range for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub value: ArgValue,
    pub range: TextRange,
}

/// Variable declared at a constructor call: `createQuery("Q", { id: "ID" })`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    /// Declared type, verbatim from the constructor.
    pub ty: String,
    pub range: TextRange,
}

/// One field selection. The root selection of a query has an empty field.
#[derive(Debug, Clone)]
pub struct QueryNode {
    field: String,
    result_key: String,
    explicit_alias: bool,
    parent: Option<NodeId>,
    args: IndexMap<String, Arg>,
    children: Vec<NodeId>,
    /// Where this selection's key was introduced.
    key_range: TextRange,
}

impl QueryNode {
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The key this selection occupies in the response payload.
    pub fn result_key(&self) -> &str {
        &self.result_key
    }

    pub fn has_explicit_alias(&self) -> bool {
        self.explicit_alias
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn args(&self) -> &IndexMap<String, Arg> {
        &self.args
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn key_range(&self) -> TextRange {
        self.key_range
    }
}

/// One query document in the making.
#[derive(Debug, Clone)]
pub struct QueryRoot {
    pub name: Option<String>,
    pub variables: IndexMap<String, VariableDecl>,
    pub call_range: TextRange,
    node: NodeId,
}

impl QueryRoot {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryTree {
    nodes: Vec<QueryNode>,
    roots: Vec<QueryRoot>,
    sealed: bool,
}

impl QueryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_root(
        &mut self,
        name: Option<String>,
        variables: IndexMap<String, VariableDecl>,
        call_range: TextRange,
    ) -> RootId {
        assert!(!self.sealed, "cannot grow a sealed tree");
        let node = self.push_node(QueryNode {
            field: String::new(),
            result_key: String::new(),
            explicit_alias: false,
            parent: None,
            args: IndexMap::new(),
            children: Vec::new(),
            key_range: call_range,
        });
        self.roots.push(QueryRoot {
            name,
            variables,
            call_range,
            node,
        });
        RootId(self.roots.len() as u32 - 1)
    }

    pub fn root(&self, id: RootId) -> &QueryRoot {
        &self.roots[id.0 as usize]
    }

    pub fn root_node(&self, id: RootId) -> NodeId {
        self.roots[id.0 as usize].node
    }

    pub fn roots(&self) -> impl Iterator<Item = (RootId, &QueryRoot)> {
        self.roots
            .iter()
            .enumerate()
            .map(|(i, r)| (RootId(i as u32), r))
    }

    pub fn node(&self, id: NodeId) -> &QueryNode {
        &self.nodes[id.0 as usize]
    }

    /// Child selection for `field` under `parent`, keyed by `alias` when given.
    ///
    /// Deduplicates: a second access to the same field under the same key
    /// returns the existing node. The same field under a different key opens
    /// a distinct selection (validation decides whether the keys collide).
    pub fn child(
        &mut self,
        parent: NodeId,
        field: &str,
        alias: Option<&str>,
        site: TextRange,
    ) -> NodeId {
        assert!(!self.sealed, "cannot grow a sealed tree");
        let key = alias.unwrap_or(field);

        let existing = self.nodes[parent.0 as usize]
            .children
            .iter()
            .copied()
            .find(|&c| {
                let n = &self.nodes[c.0 as usize];
                n.field == field && n.result_key == key
            });
        if let Some(id) = existing {
            return id;
        }

        let id = self.push_node(QueryNode {
            field: field.to_string(),
            result_key: key.to_string(),
            explicit_alias: alias.is_some_and(|a| a != field),
            parent: Some(parent),
            args: IndexMap::new(),
            children: Vec::new(),
            key_range: site,
        });
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    /// Force an explicit alias on an existing selection.
    ///
    /// Used when a call site names a selection after its local binding, so
    /// the payload key survives even when it equals the field name.
    pub fn set_explicit_alias(&mut self, id: NodeId, key: &str) {
        assert!(!self.sealed, "cannot grow a sealed tree");
        let node = &mut self.nodes[id.0 as usize];
        node.result_key = key.to_string();
        node.explicit_alias = true;
    }

    /// Attach arguments to a selection.
    ///
    /// Re-attaching an identical value is idempotent. A different value for
    /// an already-attached argument is a conflict, reported by name.
    pub fn attach_args(
        &mut self,
        id: NodeId,
        args: IndexMap<String, Arg>,
    ) -> Result<(), String> {
        assert!(!self.sealed, "cannot grow a sealed tree");
        let node = &mut self.nodes[id.0 as usize];
        for (name, arg) in args {
            match node.args.get(&name) {
                Some(existing) if existing.value != arg.value => return Err(name),
                Some(_) => {}
                None => {
                    node.args.insert(name, arg);
                }
            }
        }
        Ok(())
    }

    /// Result keys from the root selection down to `id`, excluding the root.
    pub fn path(&self, id: NodeId) -> Vec<&str> {
        let mut keys = Vec::new();
        let mut cur = Some(id);
        while let Some(node_id) = cur {
            let node = &self.nodes[node_id.0 as usize];
            if node.parent.is_some() {
                keys.push(node.result_key.as_str());
            }
            cur = node.parent;
        }
        keys.reverse();
        keys
    }

    /// All selections under a root, preorder.
    pub fn descendants(&self, root: RootId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root_node(root)];
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.nodes[id.0 as usize];
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn push_node(&mut self, node: QueryNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() as u32 - 1)
    }
}
