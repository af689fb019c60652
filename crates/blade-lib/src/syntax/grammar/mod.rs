//! Grammar productions for the host-language subset.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! The grammar covers the statement and expression forms the query engine
//! consumes: declarations, functions, imports/exports, member/call chains,
//! object and array literals, assignments, and arrow functions.

mod expressions;
mod statements;
