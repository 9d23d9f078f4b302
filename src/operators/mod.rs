//! Dynamic operator table consulted by the parser.
//!
//! Operators are looked up by symbol every time the parser meets one, so
//! operators defined by earlier statements shape the parse of later ones.

pub mod operators;

#[cfg(test)]
mod tests;
