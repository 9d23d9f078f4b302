use std::rc::Rc;

use super::{ast_builder::AstBuilder, scope::ScopeStack};
use crate::{
    ast::{
        ast::{AstNode, ErrorNode},
        declarations::{DeclarationRef, FunctionDefinition, VariableDeclaration},
        expressions::{BuiltInOperatorKind, Expression},
    },
    errors::errors::DiagnosticCode,
    lexer::lexer::tokenize,
    operators::operators::OperatorKind,
    parser::{
        cst::{CstKind, CstNode},
        parser::{parse, ParseMode},
    },
    session::{options::SessionOptions, runtime_state::RuntimeState},
    Span,
};

fn build(source: &str, state: &mut RuntimeState) -> AstNode {
    let level = state.options.language_level;
    let tokens = tokenize(source, None, level).unwrap();
    let cst = parse(
        tokens,
        Rc::new("shell".to_string()),
        &mut state.operators,
        level,
        ParseMode::Repl,
    )
    .unwrap();
    AstBuilder::new(state).build(&cst)
}

fn definition(node: &AstNode) -> &FunctionDefinition {
    match node {
        AstNode::FunctionDefinition(definition) => definition,
        other => panic!("expected a function definition, got {}", other),
    }
}

fn error(node: &AstNode) -> &ErrorNode {
    match node {
        AstNode::Error(error) => error,
        other => panic!("expected an error, got {}", other),
    }
}

#[test]
fn test_scope_stack_shadowing() {
    let mut scopes = ScopeStack::new();
    scopes.insert("a", 1);
    scopes.push_scope();
    scopes.insert("a", 2);
    scopes.insert("b", 3);

    assert_eq!(scopes.depth(), 2);
    assert_eq!(scopes.get("a"), Some(&2));
    assert!(scopes.contains("b"));

    scopes.pop_scope();
    assert_eq!(scopes.get("a"), Some(&1));
    assert!(!scopes.contains("b"));

    // The root frame survives
    scopes.pop_scope();
    assert_eq!(scopes.depth(), 1);
    assert_eq!(scopes.get("a"), Some(&1));
}

#[test]
fn test_top_level_expression_is_anonymous_function() {
    let mut state = RuntimeState::default();

    let first = build("1 + 2 * 3;", &mut state);
    let first = definition(&first);
    assert!(first.is_anonymous);
    assert!(first.signature.is_compiler_generated);
    assert_eq!(first.name(), "anon_expr_0");
    assert_eq!(first.body.to_string(), "Add(1,Multiply(2,3))");

    let second = build("2", &mut state);
    assert_eq!(definition(&second).name(), "anon_expr_1");
    assert!(state.function_definitions.contains_key("anon_expr_1"));
}

#[test]
fn test_anonymous_counter_wraps() {
    let mut state = RuntimeState::default();
    state.set_anonymous_name_index(u32::MAX);

    assert_eq!(definition(&build("1", &mut state)).name(), format!("anon_expr_{}", u32::MAX));
    assert_eq!(definition(&build("1", &mut state)).name(), "anon_expr_0");
}

#[test]
fn test_parameters_resolve() {
    let mut state = RuntimeState::default();
    let node = build("def foo(a b) a * b;", &mut state);
    let foo = definition(&node);

    assert!(!foo.is_anonymous);
    assert_eq!(foo.signature.arity(), 2);
    match &foo.body {
        Expression::BinaryOperator(multiply) => {
            assert_eq!(multiply.op, BuiltInOperatorKind::Multiply);
            match multiply.left.as_ref() {
                Expression::VariableReference(reference) => {
                    assert!(matches!(&reference.declaration, DeclarationRef::Parameter(p) if p.index == 0));
                }
                other => panic!("unexpected {}", other),
            }
        }
        other => panic!("unexpected {}", other),
    }

    assert!(state.function_definitions.contains_key("foo"));
    assert!(state.function_declarations.contains_key("foo"));
}

#[test]
fn test_unknown_variable() {
    let mut state = RuntimeState::default();
    let node = build("def foo(a) b;", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::UnknownVariable);
    assert_eq!(error(&node).message, "Unknown variable name: b");

    // Parameters do not leak out of their function
    build("def bar(a) a;", &mut state);
    let node = build("a", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::UnknownVariable);
}

#[test]
fn test_unknown_function() {
    let mut state = RuntimeState::default();
    let node = build("bar(1)", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::InvokeUnknownFunction);

    build("extern bar(x);", &mut state);
    let node = build("bar(1)", &mut state);
    assert_eq!(definition(&node).body.to_string(), "Call(bar,1)");
}

#[test]
fn test_redeclaration_arity() {
    let mut state = RuntimeState::default();
    assert!(matches!(build("extern foo(a);", &mut state), AstNode::Prototype(_)));

    let node = build("extern foo(a b);", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::IncompatibleRedeclaration);
    assert_eq!(state.function_declarations["foo"].arity(), 1);

    let node = build("def foo(x) x;", &mut state);
    assert!(!node.is_error());
    assert!(!state.function_declarations["foo"].is_extern);
    assert_eq!(state.function_declarations["foo"].parameters[0].name, "x");
}

#[test]
fn test_failed_definition_restores_declaration() {
    let mut state = RuntimeState::default();
    build("extern foo(a);", &mut state);

    let node = build("def foo(a) nope;", &mut state);
    assert!(node.is_error());
    assert!(state.function_declarations["foo"].is_extern);
    assert!(!state.function_definitions.contains_key("foo"));

    let node = build("def bar(a) nope;", &mut state);
    assert!(node.is_error());
    assert!(!state.function_declarations.contains_key("bar"));
}

#[test]
fn test_redefinition() {
    let mut state = RuntimeState::default();
    build("def foo(a) a;", &mut state);
    let node = build("def foo(a) a + 1;", &mut state);
    assert!(!node.is_error());
    assert_eq!(state.function_definitions["foo"].body.to_string(), "Add(a,1)");

    let mut state = RuntimeState::new(SessionOptions {
        function_redefinition_is_error: true,
        ..Default::default()
    });
    build("def foo(a) a;", &mut state);
    let node = build("def foo(a) a + 1;", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::RedefinedFunction);
    assert_eq!(state.function_definitions["foo"].body.to_string(), "a");
}

#[test]
fn test_conditional_result_locals() {
    let mut state = RuntimeState::default();
    let node = build("def f(x) if x then (if x then 1 else 2) else 3;", &mut state);
    let f = definition(&node);

    let names: Vec<&str> = f.local_variables.iter().map(|l| l.name()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"$ifresult$0"));
    assert!(names.contains(&"$ifresult$1"));
    assert!(f.local_variables.iter().all(|l| l.is_compiler_generated()));

    // Numbering restarts for every function
    let node = build("def g(x) if x then 1 else 2;", &mut state);
    assert_eq!(definition(&node).local_variables[0].name, "$ifresult$0");
}

#[test]
fn test_for_defaults_step() {
    let mut state = RuntimeState::default();
    let node = build("def f(n) for i = 1, i < n in i;", &mut state);
    let f = definition(&node);

    match &f.body {
        Expression::ForIn(for_in) => {
            assert_eq!(for_in.loop_variable.name, "i");
            match for_in.step.as_ref() {
                Expression::Constant(step) => {
                    assert_eq!(step.value, 1.0);
                    assert!(step.span.is_null());
                }
                other => panic!("unexpected {}", other),
            }
        }
        other => panic!("unexpected {}", other),
    }
    assert_eq!(f.body.to_string(), "For(i=1,Less(i,n),1,i)");
    assert_eq!(f.local_variables.len(), 1);
}

#[test]
fn test_for_initializer_outside_loop_scope() {
    let mut state = RuntimeState::default();
    let node = build("def f() for i = i, i < 3 in 0;", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::UnknownVariable);
}

#[test]
fn test_var_in_defaults_and_ordering() {
    let mut state = RuntimeState::default();
    let node = build("def f() var a, b = a + 1 in b;", &mut state);
    let f = definition(&node);

    assert_eq!(f.body.to_string(), "VarIn(a=0,b=Add(a,1),b)");
    assert_eq!(f.local_variables.len(), 2);

    let node = build("def g() (var a in a) + a;", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::UnknownVariable);
}

#[test]
fn test_assignment_is_builtin() {
    let mut state = RuntimeState::default();
    let node = build("def f(x) x = 3;", &mut state);
    assert_eq!(definition(&node).body.to_string(), "Assign(x,3)");
}

#[test]
fn test_user_binary_operator_lowers_to_call() {
    let mut state = RuntimeState::default();
    build("def binary | 5 (a b) a;", &mut state);
    assert!(state.function_definitions.contains_key("binary-op$|"));

    let node = build("1 | 2", &mut state);
    assert_eq!(definition(&node).body.to_string(), "Call(binary-op$|,1,2)");
}

#[test]
fn test_user_unary_operator_lowers_to_call() {
    let mut state = RuntimeState::default();
    build("def unary ! (v) 0 - v;", &mut state);

    let node = build("!2 + 1", &mut state);
    assert_eq!(definition(&node).body.to_string(), "Add(Call(unary-op$!,2),1)");
}

#[test]
fn test_unknown_binary_operator() {
    let mut state = RuntimeState::default();
    let node = build("1 | 2", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::InvalidBinaryOp);
}

#[test]
fn test_binary_operator_without_function() {
    let mut state = RuntimeState::default();
    state
        .operators
        .register_operator('|', OperatorKind::InfixLeftAssociative, 5);

    let node = build("1 | 2", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::UnaryOpNotFound);
    assert_eq!(error(&node).message, "Binary operator function 'binary-op$|' not found");
}

#[test]
fn test_unary_operator_without_function() {
    let mut state = RuntimeState::default();
    state.operators.register_operator('!', OperatorKind::PreFix, 100);

    let node = build("!1", &mut state);
    assert_eq!(error(&node).code, DiagnosticCode::InvalidUnaryOpRef);
}

#[test]
fn test_unregistered_unary_operator() {
    let mut state = RuntimeState::default();
    let constant = CstNode::new(CstKind::ConstExpression, Span::null()).with_text("1");
    let unary = CstNode::new(CstKind::UnaryOpExpression, Span::null())
        .with_text("!")
        .with_children(vec![constant]);

    let error = AstBuilder::new(&mut state).build_expression(&unary).unwrap_err();
    assert_eq!(error.code, DiagnosticCode::InvalidUnaryOp);
}

#[test]
fn test_full_source_keeps_sibling_units() {
    let mut state = RuntimeState::default();
    let level = state.options.language_level;
    let source = "def foo(a) a;\n) oops;\nfoo(1);\nbar(2);\n";
    let tokens = tokenize(source, None, level).unwrap();
    let cst = parse(
        tokens,
        Rc::new("shell".to_string()),
        &mut state.operators,
        level,
        ParseMode::FullSource,
    )
    .unwrap();

    let root = AstBuilder::new(&mut state).build(&cst);
    let AstNode::Root(root) = root else {
        panic!("expected a root node");
    };

    assert_eq!(root.units.len(), 4);
    assert!(!root.units[0].is_error());
    assert_eq!(error(&root.units[1]).code, DiagnosticCode::SyntaxError);
    assert!(error(&root.units[1]).message.starts_with("Syntax Error: "));
    assert_eq!(definition(&root.units[2]).body.to_string(), "Call(foo,1)");
    assert_eq!(error(&root.units[3]).code, DiagnosticCode::InvokeUnknownFunction);
}
