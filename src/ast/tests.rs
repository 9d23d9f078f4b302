use std::rc::Rc;

use super::{
    ast::{AstNode, ErrorNode, NodeKind, NodeRef, RootNode},
    declarations::{LocalVariableDeclaration, ParameterDeclaration, Prototype},
    expressions::{
        BinaryOperatorExpression, BuiltInOperatorKind, ConstantExpression, Expression,
        ForInExpression, VariableReferenceExpression,
    },
    visitor::{AstVisitor, AstVisitorWithArg},
};
use crate::{ast::declarations::DeclarationRef, errors::errors::DiagnosticCode, Span};

fn constant(value: f64) -> Expression {
    Expression::Constant(ConstantExpression {
        value,
        span: Span::null(),
    })
}

fn binary(op: BuiltInOperatorKind, left: Expression, right: Expression) -> Expression {
    Expression::BinaryOperator(BinaryOperatorExpression {
        op,
        left: Box::new(left),
        right: Box::new(right),
        span: Span::null(),
    })
}

fn local(name: &str, initializer: Expression) -> Rc<LocalVariableDeclaration> {
    Rc::new(LocalVariableDeclaration {
        name: name.to_string(),
        initializer: Some(initializer),
        is_compiler_generated: false,
        span: Span::null(),
    })
}

/// `for i = 1, i < 10 in 2.5`
fn sample_loop() -> Expression {
    let loop_variable = local("i", constant(1.0));
    let reference = Expression::VariableReference(VariableReferenceExpression {
        declaration: DeclarationRef::Local(Rc::clone(&loop_variable)),
        span: Span::null(),
    });

    Expression::ForIn(ForInExpression {
        loop_variable,
        condition: Box::new(binary(BuiltInOperatorKind::Less, reference, constant(10.0))),
        step: Box::new(constant(1.0)),
        body: Box::new(constant(2.5)),
        span: Span::null(),
    })
}

#[test]
fn test_expression_display() {
    let expression = binary(
        BuiltInOperatorKind::Add,
        constant(1.0),
        binary(BuiltInOperatorKind::Multiply, constant(2.0), constant(3.0)),
    );
    assert_eq!(expression.to_string(), "Add(1,Multiply(2,3))");
    assert_eq!(sample_loop().to_string(), "For(i=1,Less(i,10),1,2.5)");
}

#[test]
fn test_prototype_display() {
    let parameters = ["a", "b"]
        .iter()
        .enumerate()
        .map(|(index, name)| {
            Rc::new(ParameterDeclaration {
                name: name.to_string(),
                index,
                span: Span::null(),
            })
        })
        .collect();

    let prototype = Prototype {
        name: "foo".to_string(),
        parameters,
        is_extern: true,
        is_compiler_generated: false,
        span: Span::null(),
    };
    assert_eq!(prototype.to_string(), "[extern]foo(a, b)");
    assert_eq!(prototype.arity(), 2);
}

#[test]
fn test_error_and_root_display() {
    let error = ErrorNode::new(Span::null(), DiagnosticCode::UnknownVariable, "Unknown variable name: x");
    assert_eq!(error.to_string(), "Error(KLS1001: Unknown variable name: x)");

    let root = AstNode::Root(RootNode {
        units: vec![AstNode::Error(error), AstNode::Expression(constant(4.0))],
        span: Span::null(),
    });
    assert_eq!(root.to_string(), "Root(Error(KLS1001: Unknown variable name: x),4)");
}

#[test]
fn test_node_ref_children() {
    let expression = sample_loop();
    let node = NodeRef::from(&expression);
    assert_eq!(node.kind(), NodeKind::ForIn);

    let kinds: Vec<NodeKind> = node.children().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::LocalVariableDeclaration,
            NodeKind::BinaryOperator,
            NodeKind::Constant,
            NodeKind::Constant
        ]
    );

    // The initializer hangs off the declaration
    let declaration = node.children()[0];
    assert_eq!(declaration.children()[0].kind(), NodeKind::Constant);
}

#[derive(Default)]
struct ConstantSum;

impl<'a> AstVisitor<'a, f64> for ConstantSum {
    fn visit_constant(&mut self, node: &'a ConstantExpression) -> f64 {
        node.value
    }

    fn aggregate_result(&mut self, aggregate: f64, next: f64) -> f64 {
        aggregate + next
    }
}

#[test]
fn test_visitor_aggregates_children() {
    let node = AstNode::Expression(sample_loop());
    assert_eq!(node.accept(&mut ConstantSum), 14.5);
}

#[derive(Default)]
struct KindCollector<'a> {
    visited: Vec<(String, NodeRef<'a>)>,
}

impl<'a> AstVisitorWithArg<'a, (), String> for KindCollector<'a> {
    fn visit_error(&mut self, node: &'a ErrorNode, arg: &String) {
        self.visited.push((arg.clone(), NodeRef::Error(node)));
    }

    fn visit_binary_operator(&mut self, node: &'a BinaryOperatorExpression, arg: &String) {
        self.visited.push((arg.clone(), NodeRef::BinaryOperator(node)));
        self.visit_children(NodeRef::BinaryOperator(node), arg);
    }
}

#[test]
fn test_visitor_with_argument() {
    let root = AstNode::Root(RootNode {
        units: vec![
            AstNode::Expression(binary(
                BuiltInOperatorKind::Subtract,
                constant(1.0),
                Expression::Error(ErrorNode::new(
                    Span::null(),
                    DiagnosticCode::SyntaxError,
                    "Syntax Error: bad",
                )),
            )),
            AstNode::Error(ErrorNode::new(
                Span::null(),
                DiagnosticCode::InvalidBinaryOp,
                "Invalid binary operator '|'",
            )),
        ],
        span: Span::null(),
    });

    let mut collector = KindCollector::default();
    root.accept_with(&mut collector, &"unit".to_string());

    let kinds: Vec<NodeKind> = collector.visited.iter().map(|(_, node)| node.kind()).collect();
    assert_eq!(kinds, vec![NodeKind::BinaryOperator, NodeKind::Error, NodeKind::Error]);
    assert!(collector.visited.iter().all(|(arg, _)| arg == "unit"));
}
