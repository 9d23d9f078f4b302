//! Diagnostics over a finished AST.
//!
//! - collector: Gathers every error node of a tree in pre-order
//! - report: Renders error nodes and syntax errors against their source text

pub mod collector;
pub mod report;
