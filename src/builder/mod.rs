//! AST builder.
//!
//! Resolves the concrete syntax tree produced by the parser into the AST:
//! variable references are bound to their declarations, calls to the
//! prototypes registered in the session and user defined operators are
//! lowered to calls of their implementing functions.

pub mod ast_builder;
pub mod scope;

#[cfg(test)]
mod tests;
