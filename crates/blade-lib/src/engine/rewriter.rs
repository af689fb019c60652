//! Source rewriting.
//!
//! The tagger and propagator accumulate a [`RewritePlan`] of byte ranges;
//! once the documents are serialized the plan is resolved into concrete
//! edits and spliced into the source in one pass.
//!
//! Resulting shape:
//! - the `createQuery` import and constructor disappear
//! - fetch sites receive the document as a template literal
//! - access chains read from the payload (`data.…`) using result keys
//! - attachment call statements vanish

use rowan::TextRange;

use crate::engine::serializer::Document;
use crate::engine::tree::{NodeId, QueryTree, RootId};
use crate::escape::escape_template;

/// How the `createQuery` import specifier is dropped.
#[derive(Debug, Clone)]
pub enum ImportRemoval {
    /// The whole import statement, including its line.
    Whole(TextRange),
    /// Just the specifier (and its comma) within a larger import.
    Specifier(TextRange),
}

/// A constructor call site recorded by the tagger.
#[derive(Debug, Clone)]
pub struct ConstructorSite {
    pub root: RootId,
    pub call_range: TextRange,
    /// The enclosing declaration statement, when it can be removed whole.
    pub removable_stmt: Option<TextRange>,
}

/// A bare placeholder reference that receives the serialized document.
#[derive(Debug, Clone)]
pub struct FetchSite {
    pub root: RootId,
    pub range: TextRange,
}

/// An access chain to rewrite into a payload read.
#[derive(Debug, Clone)]
pub struct ChainRewrite {
    pub range: TextRange,
    /// `data` for root-headed chains, the local binding otherwise.
    pub head: String,
    /// Member selections along the chain, in order.
    pub segments: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct RewritePlan {
    pub import_removal: Option<ImportRemoval>,
    pub constructor_sites: Vec<ConstructorSite>,
    pub fetch_sites: Vec<FetchSite>,
    pub chains: Vec<ChainRewrite>,
    /// Whole statements to drop (attachment calls).
    pub stmt_removals: Vec<TextRange>,
    /// Direct replacements (payload rebinds, destructuring keys).
    pub text_edits: Vec<(TextRange, String)>,
}

#[derive(Debug)]
struct Edit {
    range: TextRange,
    text: String,
}

pub fn rewrite(
    source: &str,
    tree: &QueryTree,
    plan: &RewritePlan,
    documents: &[Document],
) -> String {
    let mut edits = Vec::new();

    match &plan.import_removal {
        Some(ImportRemoval::Whole(range)) => {
            edits.push(line_removal(source, *range));
        }
        Some(ImportRemoval::Specifier(range)) => {
            edits.push(Edit {
                range: *range,
                text: String::new(),
            });
        }
        None => {}
    }

    for site in &plan.constructor_sites {
        let has_fetch = plan.fetch_sites.iter().any(|f| f.root == site.root);
        match site.removable_stmt {
            // A fetched placeholder no longer needs its declaration.
            Some(stmt) if has_fetch => edits.push(line_removal(source, stmt)),
            _ => edits.push(Edit {
                range: site.call_range,
                text: template_literal(documents, site.root),
            }),
        }
    }

    for site in &plan.fetch_sites {
        edits.push(Edit {
            range: site.range,
            text: template_literal(documents, site.root),
        });
    }

    for chain in &plan.chains {
        let mut path = chain.head.clone();
        for &segment in &chain.segments {
            path.push('.');
            path.push_str(tree.node(segment).result_key());
        }
        // Chains that already read the right keys stay untouched.
        if source_slice(source, chain.range) == path {
            continue;
        }
        edits.push(Edit {
            range: chain.range,
            text: path,
        });
    }

    for &range in &plan.stmt_removals {
        edits.push(line_removal(source, range));
    }

    for (range, text) in &plan.text_edits {
        edits.push(Edit {
            range: *range,
            text: text.clone(),
        });
    }

    splice(source, edits)
}

fn template_literal(documents: &[Document], root: RootId) -> String {
    let text = documents
        .get(root.index())
        .map(|d| d.text.as_str())
        .unwrap_or_default();
    format!("`\n{}`", escape_template(text))
}

fn source_slice(source: &str, range: TextRange) -> &str {
    &source[usize::from(range.start())..usize::from(range.end())]
}

/// Removal widened to the whole line when the statement owns it.
fn line_removal(source: &str, range: TextRange) -> Edit {
    let mut start = usize::from(range.start());
    let mut end = usize::from(range.end());
    let bytes = source.as_bytes();

    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let owns_line = source[line_start..start]
        .chars()
        .all(|c| c == ' ' || c == '\t');
    if owns_line {
        start = line_start;
        while end < bytes.len() && (bytes[end] == b' ' || bytes[end] == b'\t') {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'\r' {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'\n' {
            end += 1;
        }
    }

    Edit {
        range: TextRange::new((start as u32).into(), (end as u32).into()),
        text: String::new(),
    }
}

fn splice(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| (e.range.start(), e.range.end()));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    let mut last_end = 0usize;

    for edit in &edits {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        if start < last_end {
            // Overlapping edits come from the same construct being recorded
            // twice; the first one wins.
            debug_assert!(
                edit.text.is_empty() || start >= last_end,
                "conflicting rewrite at {}..{}",
                start,
                end
            );
            continue;
        }
        out.push_str(&source[cursor..start]);
        out.push_str(&edit.text);
        cursor = end;
        last_end = end;
    }
    out.push_str(&source[cursor..]);
    out
}
