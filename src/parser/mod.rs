//! Parser module producing the concrete syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a concrete syntax tree. Grouping is decided by the grammar while
//! operator folding uses precedence climbing against the session's
//! operator table, which operator prototypes update as they are parsed:
//!
//! - Top level units (definitions, extern declarations, expressions)
//! - Expressions (operators, calls, conditionals, loops, locals)
//! - REPL mode and full source mode with per unit error recovery
//!
//! Primary expressions and units use NUD (null denotation) style lookup
//! tables keyed by token kind.

pub mod cst;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
