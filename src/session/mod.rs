//! Per-session state shared across every statement of a REPL run.
//!
//! A session owns the long lived semantic state: the operator table, the
//! function declaration and definition registries and the anonymous function
//! name generator. The lexer, parser and AST builder are recreated for every
//! parse and only borrow the session while they run.

pub mod options;
pub mod runtime_state;
pub mod session;
