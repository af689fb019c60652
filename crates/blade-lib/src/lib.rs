//! Blade: static query extraction from ordinary property access.
//!
//! A developer writes plain member access and call expressions against a
//! placeholder value returned by `createQuery`. The transform infers the
//! complete query document from those expressions, then rewrites the unit so
//! the placeholder becomes a literal query string and every access chain
//! reads directly from the response payload.
//!
//! # Example
//!
//! ```
//! use blade_lib::Transform;
//!
//! let source = r#"
//!     import { createQuery } from 'blade';
//!     const DATA = createQuery("Movie", { id: "String" });
//!     DATA.movie({ id: "$id" }).title;
//!     fetchQuery(DATA);
//! "#;
//!
//! let transform = Transform::try_from(source).expect("out of fuel");
//! eprintln!("{}", transform.diagnostics().render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod engine;
pub mod syntax;
pub mod transform;

mod escape;

#[cfg(test)]
mod escape_tests;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use engine::serializer::Document;
pub use transform::{DEFAULT_EXPORT_BINDING, PAYLOAD_IDENT, QUERY_CONSTRUCTOR, Transform};

/// Fatal errors. Everything else flows through [`Diagnostics`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, Error>;
