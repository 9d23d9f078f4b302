//! Concrete syntax tree produced by the parser.
//!
//! The tree keeps grouping decided by the grammar but leaves operator
//! application unfolded: an `Expression` node holds one atom followed by the
//! ordered `(operator, rhs)` pairs that trail it.

use crate::{lexer::tokens::Token, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CstKind {
    FullSource,
    Repl,
    FunctionDefinition,
    ExternalDeclaration,
    TopLevelExpression,
    FunctionPrototype,
    UnaryPrototype,
    BinaryPrototype,
    Parameter,
    Expression,
    ConstExpression,
    VariableExpression,
    ParenExpression,
    FunctionCallExpression,
    UnaryOpExpression,
    ConditionalExpression,
    ForExpression,
    VarInExpression,
    Initializer,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CstNode {
    pub kind: CstKind,
    pub span: Span,
    /// Name, literal or operator symbol, depending on `kind`.
    pub text: String,
    pub children: Vec<CstNode>,
    /// Trailing operator applications, only used by `Expression` nodes.
    pub operators: Vec<(Token, CstNode)>,
}

impl CstNode {
    pub fn new(kind: CstKind, span: Span) -> Self {
        CstNode {
            kind,
            span,
            text: String::new(),
            children: vec![],
            operators: vec![],
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_children(mut self, children: Vec<CstNode>) -> Self {
        self.children = children;
        self
    }

    pub fn child(&self, index: usize) -> Option<&CstNode> {
        self.children.get(index)
    }

    /// Text of the operator token, for operator nodes and prototypes.
    pub fn operator_symbol(&self) -> Option<char> {
        match self.kind {
            CstKind::UnaryPrototype | CstKind::BinaryPrototype | CstKind::UnaryOpExpression => {
                self.text.chars().next()
            }
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == CstKind::Error
    }
}
