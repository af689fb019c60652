//! Transform pipeline.
//!
//! Stages: parse → tag → propagate → validate → serialize → rewrite.
//! Each stage populates its own diagnostics. Use `is_valid()` to check
//! if any stage produced errors; documents and the rewritten output exist
//! only for fully valid units.

mod dump;

#[cfg(test)]
mod mod_tests;

use rowan::GreenNodeBuilder;

use crate::Result;
use crate::diagnostics::Diagnostics;
use crate::engine::propagator;
use crate::engine::rewriter::{self, RewritePlan};
use crate::engine::scope::ScopeGraph;
use crate::engine::serializer::{self, Document};
use crate::engine::tagger::{self, TagOutput};
use crate::engine::tree::QueryTree;
use crate::engine::validator;
use crate::syntax::lexer::lex;
use crate::syntax::{ParseResult, Parser, Root, SyntaxKind, SyntaxNode};

/// The constructor recognized by the tagger.
pub const QUERY_CONSTRUCTOR: &str = "createQuery";

/// Identifier under which an `export default` placeholder is reachable.
pub const DEFAULT_EXPORT_BINDING: &str = "DATA";

/// Identifier the rewritten unit reads the response payload from.
pub const PAYLOAD_IDENT: &str = "data";

const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
const DEFAULT_RECURSION_FUEL: u32 = 4096;

/// A parsed and transformed unit.
///
/// Create with [`new`](Self::new), optionally configure fuel limits,
/// then call [`exec`](Self::exec) to run the pipeline.
///
/// Check [`is_valid`](Self::is_valid) or [`diagnostics`](Self::diagnostics)
/// to determine if the unit has syntax/semantic issues.
#[derive(Debug)]
pub struct Transform<'a> {
    source: &'a str,
    ast: Root,
    tree: QueryTree,
    plan: RewritePlan,
    documents: Vec<Document>,
    output: Option<String>,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
    parse_diagnostics: Diagnostics,
    tag_diagnostics: Diagnostics,
    propagate_diagnostics: Diagnostics,
    validate_diagnostics: Diagnostics,
}

fn empty_root() -> Root {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::Root.into());
    builder.finish_node();
    let green = builder.finish();
    Root::cast(SyntaxNode::new_root(green)).expect("we just built a Root node")
}

impl<'a> Transform<'a> {
    /// Create a new transform from source text.
    ///
    /// Call [`exec`](Self::exec) to run the pipeline.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            ast: empty_root(),
            tree: QueryTree::new(),
            plan: RewritePlan::default(),
            documents: Vec::new(),
            output: None,
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
            parse_diagnostics: Diagnostics::new(),
            tag_diagnostics: Diagnostics::new(),
            propagate_diagnostics: Diagnostics::new(),
            validate_diagnostics: Diagnostics::new(),
        }
    }

    /// Set execution fuel limit. None = infinite.
    ///
    /// Execution fuel never replenishes. It protects against large inputs.
    /// Returns error from [`exec`](Self::exec) when exhausted.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Set recursion depth limit. None = infinite.
    ///
    /// Recursion fuel restores when exiting recursion. It protects against
    /// deeply nested input. Returns error from [`exec`](Self::exec) when exhausted.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Run the whole pipeline.
    ///
    /// Returns `Err` only when fuel limits are exceeded. Other problems are
    /// collected as diagnostics; a stage with errors stops the stages after
    /// it, so partial trees never serialize.
    pub fn exec(mut self) -> Result<Self> {
        self.try_parse()?;
        if self.parse_diagnostics.has_errors() {
            self.tree.seal();
            return Ok(self);
        }

        let TagOutput { seeds, synthetics } = tagger::tag(
            &self.ast,
            &mut self.tree,
            &mut self.plan,
            &mut self.tag_diagnostics,
        );
        if self.tag_diagnostics.has_errors() {
            self.tree.seal();
            return Ok(self);
        }

        let scopes = ScopeGraph::build(&self.ast, &synthetics);
        propagator::propagate(
            &scopes,
            &seeds,
            &mut self.tree,
            &mut self.plan,
            &mut self.propagate_diagnostics,
        );
        if self.propagate_diagnostics.has_errors() {
            return Ok(self);
        }

        validator::validate(&self.tree, &mut self.validate_diagnostics);
        if self.validate_diagnostics.has_errors() {
            return Ok(self);
        }

        self.documents = serializer::serialize(&self.tree);
        self.output = Some(rewriter::rewrite(
            self.source,
            &self.tree,
            &self.plan,
            &self.documents,
        ));
        Ok(self)
    }

    fn try_parse(&mut self) -> Result<()> {
        let tokens = lex(self.source);
        let parser = Parser::new(self.source, tokens)
            .with_exec_fuel(self.exec_fuel)
            .with_recursion_fuel(self.recursion_fuel);

        let ParseResult { root, diagnostics } = parser.parse()?;
        self.ast = root;
        self.parse_diagnostics = diagnostics;
        Ok(())
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub(crate) fn as_cst(&self) -> &SyntaxNode {
        self.ast.as_cst()
    }

    pub(crate) fn tree(&self) -> &QueryTree {
        &self.tree
    }

    /// Serialized query documents, one per constructor call.
    ///
    /// Empty unless the unit is fully valid.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The rewritten unit. `None` unless the unit is fully valid.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// All diagnostics combined from all stages.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut all = Diagnostics::new();
        all.extend(self.parse_diagnostics.clone());
        all.extend(self.tag_diagnostics.clone());
        all.extend(self.propagate_diagnostics.clone());
        all.extend(self.validate_diagnostics.clone());
        all
    }

    /// Valid if no stage produced error-severity diagnostics (warnings are allowed).
    pub fn is_valid(&self) -> bool {
        !self.parse_diagnostics.has_errors()
            && !self.tag_diagnostics.has_errors()
            && !self.propagate_diagnostics.has_errors()
            && !self.validate_diagnostics.has_errors()
    }
}

impl<'a> TryFrom<&'a str> for Transform<'a> {
    type Error = crate::Error;

    fn try_from(source: &'a str) -> Result<Self> {
        Self::new(source).exec()
    }
}

impl<'a> TryFrom<&'a String> for Transform<'a> {
    type Error = crate::Error;

    fn try_from(source: &'a String) -> Result<Self> {
        Self::new(source.as_str()).exec()
    }
}
