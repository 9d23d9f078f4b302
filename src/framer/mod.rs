//! Splits a line based input stream into statements.
//!
//! The framer reads one line at a time and yields every complete statement
//! (ending in the terminator) along with the unterminated remainder of each
//! line, flagged as partial. A [`ReadyState`] tracks whether the consumer
//! is at the start of a statement or in the middle of one.

pub mod framer;
pub mod ready_state;
