use std::{fmt::Display, rc::Rc};

use crate::Span;

use super::{
    ast::ErrorNode,
    declarations::{DeclarationRef, LocalVariableDeclaration, Prototype, VariableDeclaration},
};

/// Operators with a dedicated AST representation.
///
/// User defined operators never appear here, they are lowered to calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInOperatorKind {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Less,
    Pow,
}

impl BuiltInOperatorKind {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '=' => Some(Self::Assign),
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '<' => Some(Self::Less),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Assign => "Assign",
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Less => "Less",
            Self::Pow => "Pow",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(ConstantExpression),
    VariableReference(VariableReferenceExpression),
    FunctionCall(FunctionCallExpression),
    BinaryOperator(BinaryOperatorExpression),
    Conditional(ConditionalExpression),
    ForIn(ForInExpression),
    VarIn(VarInExpression),
    /// Marks an invalid subtree in place of the expression it replaces.
    Error(ErrorNode),
}

impl Expression {
    pub fn get_span(&self) -> &Span {
        match self {
            Expression::Constant(e) => &e.span,
            Expression::VariableReference(e) => &e.span,
            Expression::FunctionCall(e) => &e.span,
            Expression::BinaryOperator(e) => &e.span,
            Expression::Conditional(e) => &e.span,
            Expression::ForIn(e) => &e.span,
            Expression::VarIn(e) => &e.span,
            Expression::Error(e) => &e.span,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Constant(e) => write!(f, "{}", e.value),
            Expression::VariableReference(e) => write!(f, "{}", e.declaration.name()),
            Expression::FunctionCall(e) => {
                write!(f, "Call({}", e.function.name)?;
                for argument in &e.arguments {
                    write!(f, ",{}", argument)?;
                }
                write!(f, ")")
            }
            Expression::BinaryOperator(e) => {
                write!(f, "{}({},{})", e.op.name(), e.left, e.right)
            }
            Expression::Conditional(e) => write!(
                f,
                "Conditional({},{},{})",
                e.condition, e.then_expression, e.else_expression
            ),
            Expression::ForIn(e) => write!(
                f,
                "For({},{},{},{})",
                e.loop_variable, e.condition, e.step, e.body
            ),
            Expression::VarIn(e) => {
                write!(f, "VarIn(")?;
                for local in &e.local_variables {
                    write!(f, "{},", local)?;
                }
                write!(f, "{})", e.body)
            }
            Expression::Error(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantExpression {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableReferenceExpression {
    pub declaration: DeclarationRef,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpression {
    pub function: Rc<Prototype>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperatorExpression {
    pub op: BuiltInOperatorKind,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub condition: Box<Expression>,
    pub then_expression: Box<Expression>,
    pub else_expression: Box<Expression>,
    /// Compiler generated slot both branches store their value into.
    pub result_variable: Rc<LocalVariableDeclaration>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForInExpression {
    /// The loop variable, carrying the start value as its initializer.
    pub loop_variable: Rc<LocalVariableDeclaration>,
    pub condition: Box<Expression>,
    pub step: Box<Expression>,
    pub body: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarInExpression {
    pub local_variables: Vec<Rc<LocalVariableDeclaration>>,
    pub body: Box<Expression>,
    pub span: Span,
}
