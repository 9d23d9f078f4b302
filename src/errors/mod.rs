//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexer and the parser
//! - The stable diagnostic code taxonomy carried by AST error nodes
//! - Diagnostic severities

pub mod errors;
