/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Top level node enum, error nodes and the borrowed `NodeRef` view
/// - expressions: Definitions for the expression node types
/// - declarations: Prototypes, function definitions and variable declarations
/// - visitor: Typed visitor traits dispatched over `NodeRef`
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod visitor;

#[cfg(test)]
mod tests;
