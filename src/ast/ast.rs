use std::{fmt::Display, rc::Rc};

use crate::{
    errors::errors::{DiagnosticCode, Severity},
    Span,
};

use super::{
    declarations::{FunctionDefinition, LocalVariableDeclaration, ParameterDeclaration, Prototype},
    expressions::{
        BinaryOperatorExpression, ConditionalExpression, ConstantExpression, Expression,
        ForInExpression, FunctionCallExpression, VarInExpression, VariableReferenceExpression,
    },
    visitor::{AstVisitor, AstVisitorWithArg},
};

/// A recoverable diagnostic that stands in for the node that failed to build.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNode {
    pub span: Span,
    pub code: DiagnosticCode,
    pub message: String,
    pub severity: Severity,
}

impl ErrorNode {
    pub fn new(span: Span, code: DiagnosticCode, message: impl Into<String>) -> Self {
        ErrorNode {
            span,
            code,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

impl Display for ErrorNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error({}: {})", self.code, self.message)
    }
}

/// The top level units of a full source parse, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RootNode {
    pub units: Vec<AstNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Root(RootNode),
    Error(ErrorNode),
    Prototype(Rc<Prototype>),
    FunctionDefinition(Rc<FunctionDefinition>),
    Expression(Expression),
}

impl AstNode {
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            AstNode::Root(root) => NodeRef::Root(root),
            AstNode::Error(error) => NodeRef::Error(error),
            AstNode::Prototype(proto) => NodeRef::Prototype(proto),
            AstNode::FunctionDefinition(definition) => NodeRef::FunctionDefinition(definition),
            AstNode::Expression(expression) => NodeRef::from(expression),
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            AstNode::Root(root) => &root.span,
            AstNode::Error(error) => &error.span,
            AstNode::Prototype(proto) => &proto.span,
            AstNode::FunctionDefinition(definition) => &definition.span,
            AstNode::Expression(expression) => expression.get_span(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AstNode::Error(_))
    }

    pub fn accept<'a, R: Default, V: AstVisitor<'a, R> + ?Sized>(&'a self, visitor: &mut V) -> R {
        self.as_node_ref().accept(visitor)
    }

    pub fn accept_with<'a, R: Default, A, V: AstVisitorWithArg<'a, R, A> + ?Sized>(
        &'a self,
        visitor: &mut V,
        arg: &A,
    ) -> R {
        self.as_node_ref().accept_with(visitor, arg)
    }
}

impl Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AstNode::Root(root) => {
                let units = root
                    .units
                    .iter()
                    .map(|unit| unit.to_string())
                    .collect::<Vec<String>>()
                    .join(",");
                write!(f, "Root({})", units)
            }
            AstNode::Error(error) => write!(f, "{}", error),
            AstNode::Prototype(proto) => write!(f, "{}", proto),
            AstNode::FunctionDefinition(definition) => write!(f, "{}", definition),
            AstNode::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

/// Discriminant of a [`NodeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Error,
    Prototype,
    FunctionDefinition,
    Constant,
    VariableReference,
    FunctionCall,
    BinaryOperator,
    Conditional,
    ForIn,
    VarIn,
    ParameterDeclaration,
    LocalVariableDeclaration,
}

/// Borrowed view of any node in the tree.
///
/// Flattens the owning enums so generic walks see one uniform node type with
/// ordered children.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a RootNode),
    Error(&'a ErrorNode),
    Prototype(&'a Prototype),
    FunctionDefinition(&'a FunctionDefinition),
    Constant(&'a ConstantExpression),
    VariableReference(&'a VariableReferenceExpression),
    FunctionCall(&'a FunctionCallExpression),
    BinaryOperator(&'a BinaryOperatorExpression),
    Conditional(&'a ConditionalExpression),
    ForIn(&'a ForInExpression),
    VarIn(&'a VarInExpression),
    ParameterDeclaration(&'a ParameterDeclaration),
    LocalVariableDeclaration(&'a LocalVariableDeclaration),
}

impl<'a> From<&'a Expression> for NodeRef<'a> {
    fn from(expression: &'a Expression) -> Self {
        match expression {
            Expression::Constant(e) => NodeRef::Constant(e),
            Expression::VariableReference(e) => NodeRef::VariableReference(e),
            Expression::FunctionCall(e) => NodeRef::FunctionCall(e),
            Expression::BinaryOperator(e) => NodeRef::BinaryOperator(e),
            Expression::Conditional(e) => NodeRef::Conditional(e),
            Expression::ForIn(e) => NodeRef::ForIn(e),
            Expression::VarIn(e) => NodeRef::VarIn(e),
            Expression::Error(e) => NodeRef::Error(e),
        }
    }
}

impl<'a> From<&'a AstNode> for NodeRef<'a> {
    fn from(node: &'a AstNode) -> Self {
        node.as_node_ref()
    }
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Root(_) => NodeKind::Root,
            NodeRef::Error(_) => NodeKind::Error,
            NodeRef::Prototype(_) => NodeKind::Prototype,
            NodeRef::FunctionDefinition(_) => NodeKind::FunctionDefinition,
            NodeRef::Constant(_) => NodeKind::Constant,
            NodeRef::VariableReference(_) => NodeKind::VariableReference,
            NodeRef::FunctionCall(_) => NodeKind::FunctionCall,
            NodeRef::BinaryOperator(_) => NodeKind::BinaryOperator,
            NodeRef::Conditional(_) => NodeKind::Conditional,
            NodeRef::ForIn(_) => NodeKind::ForIn,
            NodeRef::VarIn(_) => NodeKind::VarIn,
            NodeRef::ParameterDeclaration(_) => NodeKind::ParameterDeclaration,
            NodeRef::LocalVariableDeclaration(_) => NodeKind::LocalVariableDeclaration,
        }
    }

    pub fn span(&self) -> &'a Span {
        match *self {
            NodeRef::Root(n) => &n.span,
            NodeRef::Error(n) => &n.span,
            NodeRef::Prototype(n) => &n.span,
            NodeRef::FunctionDefinition(n) => &n.span,
            NodeRef::Constant(n) => &n.span,
            NodeRef::VariableReference(n) => &n.span,
            NodeRef::FunctionCall(n) => &n.span,
            NodeRef::BinaryOperator(n) => &n.span,
            NodeRef::Conditional(n) => &n.span,
            NodeRef::ForIn(n) => &n.span,
            NodeRef::VarIn(n) => &n.span,
            NodeRef::ParameterDeclaration(n) => &n.span,
            NodeRef::LocalVariableDeclaration(n) => &n.span,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::Root(n) => n.units.iter().map(NodeRef::from).collect(),
            NodeRef::Prototype(n) => n
                .parameters
                .iter()
                .map(|p| NodeRef::ParameterDeclaration(p))
                .collect(),
            NodeRef::FunctionDefinition(n) => {
                vec![NodeRef::Prototype(&n.signature), NodeRef::from(&n.body)]
            }
            NodeRef::FunctionCall(n) => n.arguments.iter().map(NodeRef::from).collect(),
            NodeRef::BinaryOperator(n) => {
                vec![NodeRef::from(n.left.as_ref()), NodeRef::from(n.right.as_ref())]
            }
            NodeRef::Conditional(n) => vec![
                NodeRef::from(n.condition.as_ref()),
                NodeRef::from(n.then_expression.as_ref()),
                NodeRef::from(n.else_expression.as_ref()),
            ],
            NodeRef::ForIn(n) => vec![
                NodeRef::LocalVariableDeclaration(&n.loop_variable),
                NodeRef::from(n.condition.as_ref()),
                NodeRef::from(n.step.as_ref()),
                NodeRef::from(n.body.as_ref()),
            ],
            NodeRef::VarIn(n) => n
                .local_variables
                .iter()
                .map(|local| NodeRef::LocalVariableDeclaration(local))
                .chain(std::iter::once(NodeRef::from(n.body.as_ref())))
                .collect(),
            NodeRef::LocalVariableDeclaration(n) => {
                n.initializer.iter().map(NodeRef::from).collect()
            }
            NodeRef::Error(_)
            | NodeRef::Constant(_)
            | NodeRef::VariableReference(_)
            | NodeRef::ParameterDeclaration(_) => vec![],
        }
    }

    /// Dispatches to the visit method matching this node's variant.
    pub fn accept<R: Default, V: AstVisitor<'a, R> + ?Sized>(self, visitor: &mut V) -> R {
        match self {
            NodeRef::Root(n) => visitor.visit_root(n),
            NodeRef::Error(n) => visitor.visit_error(n),
            NodeRef::Prototype(n) => visitor.visit_prototype(n),
            NodeRef::FunctionDefinition(n) => visitor.visit_function_definition(n),
            NodeRef::Constant(n) => visitor.visit_constant(n),
            NodeRef::VariableReference(n) => visitor.visit_variable_reference(n),
            NodeRef::FunctionCall(n) => visitor.visit_function_call(n),
            NodeRef::BinaryOperator(n) => visitor.visit_binary_operator(n),
            NodeRef::Conditional(n) => visitor.visit_conditional(n),
            NodeRef::ForIn(n) => visitor.visit_for_in(n),
            NodeRef::VarIn(n) => visitor.visit_var_in(n),
            NodeRef::ParameterDeclaration(n) => visitor.visit_parameter_declaration(n),
            NodeRef::LocalVariableDeclaration(n) => visitor.visit_local_variable_declaration(n),
        }
    }

    pub fn accept_with<R: Default, A, V: AstVisitorWithArg<'a, R, A> + ?Sized>(
        self,
        visitor: &mut V,
        arg: &A,
    ) -> R {
        match self {
            NodeRef::Root(n) => visitor.visit_root(n, arg),
            NodeRef::Error(n) => visitor.visit_error(n, arg),
            NodeRef::Prototype(n) => visitor.visit_prototype(n, arg),
            NodeRef::FunctionDefinition(n) => visitor.visit_function_definition(n, arg),
            NodeRef::Constant(n) => visitor.visit_constant(n, arg),
            NodeRef::VariableReference(n) => visitor.visit_variable_reference(n, arg),
            NodeRef::FunctionCall(n) => visitor.visit_function_call(n, arg),
            NodeRef::BinaryOperator(n) => visitor.visit_binary_operator(n, arg),
            NodeRef::Conditional(n) => visitor.visit_conditional(n, arg),
            NodeRef::ForIn(n) => visitor.visit_for_in(n, arg),
            NodeRef::VarIn(n) => visitor.visit_var_in(n, arg),
            NodeRef::ParameterDeclaration(n) => visitor.visit_parameter_declaration(n, arg),
            NodeRef::LocalVariableDeclaration(n) => {
                visitor.visit_local_variable_declaration(n, arg)
            }
        }
    }
}
