//! Query extraction engine.
//!
//! Stages over a parsed unit: tag → scope → propagate → validate →
//! serialize → rewrite. Each stage reports into its own [`Diagnostics`]
//! (see [`crate::transform::Transform`] for orchestration).
//!
//! - [`tagger`]: finds `createQuery` constructor calls and opens a query root
//!   per call
//! - [`scope`]: binding resolution for the host-language subset
//! - [`propagator`]: follows placeholder references through member/call
//!   chains, growing the query tree
//! - [`tree`]: the arena the propagator grows
//! - [`validator`]: whole-tree checks (aliases, variables)
//! - [`serializer`]: renders query documents
//! - [`rewriter`]: splices the rewritten unit

pub mod propagator;
pub mod rewriter;
pub mod scope;
pub mod serializer;
pub mod tagger;
pub mod tree;
pub mod validator;
