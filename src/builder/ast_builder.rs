use std::{
    mem,
    ops::{Deref, DerefMut},
    rc::Rc,
};

use crate::{
    ast::{
        ast::{AstNode, ErrorNode, RootNode},
        declarations::{
            DeclarationRef, FunctionDefinition, LocalVariableDeclaration, ParameterDeclaration,
            Prototype,
        },
        expressions::{
            BinaryOperatorExpression, BuiltInOperatorKind, ConditionalExpression,
            ConstantExpression, Expression, ForInExpression, FunctionCallExpression,
            VarInExpression, VariableReferenceExpression,
        },
    },
    errors::errors::{DiagnosticCode, Error},
    lexer::tokens::Token,
    parser::cst::{CstKind, CstNode},
    session::runtime_state::RuntimeState,
    Span,
};

use super::scope::ScopeStack;

/// Result of building one node; the error replaces the whole node.
pub type BuildResult<T> = Result<T, ErrorNode>;

pub fn unary_function_name(symbol: &str) -> String {
    format!("unary-op${}", symbol)
}

pub fn binary_function_name(symbol: &str) -> String {
    format!("binary-op${}", symbol)
}

/// Error node standing in for a statement the parser rejected.
pub fn syntax_error(error: &Error) -> ErrorNode {
    let position = error.get_position().clone();
    ErrorNode::new(
        Span {
            start: position.clone(),
            end: position,
        },
        DiagnosticCode::SyntaxError,
        format!("Syntax Error: {}", error),
    )
}

/// Turns a concrete syntax tree into the AST, resolving names against the
/// session's registries and the enclosing scopes.
///
/// User errors never abort the build of sibling units: the failing unit is
/// replaced by its `ErrorNode`. Inside a unit the first error wins and is
/// returned upward through `BuildResult`.
pub struct AstBuilder<'s> {
    state: &'s mut RuntimeState,
    named_values: ScopeStack<DeclarationRef>,
    local_variables: Vec<Rc<LocalVariableDeclaration>>,
    local_var_index: usize,
}

/// Scope entered on an [`AstBuilder`], popped again when dropped.
struct BuilderScope<'b, 's> {
    builder: &'b mut AstBuilder<'s>,
}

impl<'s> Deref for BuilderScope<'_, 's> {
    type Target = AstBuilder<'s>;

    fn deref(&self) -> &Self::Target {
        &*self.builder
    }
}

impl DerefMut for BuilderScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.builder
    }
}

impl Drop for BuilderScope<'_, '_> {
    fn drop(&mut self) {
        self.builder.named_values.pop_scope();
    }
}

impl<'s> AstBuilder<'s> {
    pub fn new(state: &'s mut RuntimeState) -> Self {
        AstBuilder {
            state,
            named_values: ScopeStack::new(),
            local_variables: vec![],
            local_var_index: 0,
        }
    }

    /// Builds the AST for a `Repl` or `FullSource` tree.
    pub fn build(&mut self, cst: &CstNode) -> AstNode {
        match cst.kind {
            CstKind::FullSource => AstNode::Root(RootNode {
                units: cst.children.iter().map(|unit| self.build_unit(unit)).collect(),
                span: cst.span.clone(),
            }),
            CstKind::Repl => match cst.child(0) {
                Some(unit) => self.build_unit(unit),
                None => AstNode::Error(unexpected_node(cst)),
            },
            _ => self.build_unit(cst),
        }
    }

    pub fn build_unit(&mut self, node: &CstNode) -> AstNode {
        let result = match node.kind {
            CstKind::FunctionDefinition => self.build_function_definition(node),
            CstKind::ExternalDeclaration => self.build_external_declaration(node),
            CstKind::TopLevelExpression => self.build_top_level_expression(node),
            _ => Err(unexpected_node(node)),
        };

        result.unwrap_or_else(AstNode::Error)
    }

    fn enter_scope(&mut self) -> BuilderScope<'_, 's> {
        self.named_values.push_scope();
        BuilderScope { builder: self }
    }

    fn begin_function_definition(&mut self) {
        self.local_variables.clear();
        self.local_var_index = 0;
    }

    fn push_local(&mut self, local: Rc<LocalVariableDeclaration>) {
        self.named_values
            .insert(local.name.clone(), DeclarationRef::Local(Rc::clone(&local)));
        self.local_variables.push(local);
    }

    fn build_external_declaration(&mut self, node: &CstNode) -> BuildResult<AstNode> {
        let signature = required_child(node, 0)?;
        let prototype = self.build_prototype(signature, true)?;
        Ok(AstNode::Prototype(prototype))
    }

    fn build_function_definition(&mut self, node: &CstNode) -> BuildResult<AstNode> {
        self.begin_function_definition();

        let signature_node = required_child(node, 0)?;
        let body_node = required_child(node, 1)?;
        let name = prototype_name(signature_node);

        if self.state.options.function_redefinition_is_error
            && self.state.function_definitions.contains_key(&name)
        {
            return Err(ErrorNode::new(
                signature_node.span.clone(),
                DiagnosticCode::RedefinedFunction,
                format!("Function '{}' is already defined", name),
            ));
        }

        let previous_declaration = self.state.function_declarations.get(&name).cloned();
        let signature = self.build_prototype(signature_node, false)?;

        let body = {
            let mut scope = self.enter_scope();
            for parameter in &signature.parameters {
                scope.named_values.insert(
                    parameter.name.clone(),
                    DeclarationRef::Parameter(Rc::clone(parameter)),
                );
            }
            scope.build_expression(body_node)
        };

        let body = match body {
            Ok(body) => body,
            Err(error) => {
                // The definition is dropped, so is the prototype it declared
                match previous_declaration {
                    Some(previous) => {
                        self.state.function_declarations.insert(name, previous);
                    }
                    None => {
                        self.state.function_declarations.remove(&name);
                    }
                }
                return Err(error);
            }
        };

        let definition = Rc::new(FunctionDefinition {
            signature,
            body,
            local_variables: mem::take(&mut self.local_variables),
            is_anonymous: false,
            span: node.span.clone(),
        });
        self.state
            .function_definitions
            .insert(name, Rc::clone(&definition));

        Ok(AstNode::FunctionDefinition(definition))
    }

    /// Wraps a bare expression in a compiler generated, parameterless function.
    fn build_top_level_expression(&mut self, node: &CstNode) -> BuildResult<AstNode> {
        self.begin_function_definition();

        let signature = Rc::new(Prototype {
            name: self.state.generate_anonymous_name(),
            parameters: vec![],
            is_extern: false,
            is_compiler_generated: true,
            span: node.span.clone(),
        });

        let body = self.build_expression(required_child(node, 0)?)?;

        let definition = Rc::new(FunctionDefinition {
            signature,
            body,
            local_variables: mem::take(&mut self.local_variables),
            is_anonymous: true,
            span: node.span.clone(),
        });
        self.state
            .function_definitions
            .insert(definition.name().to_string(), Rc::clone(&definition));

        Ok(AstNode::FunctionDefinition(definition))
    }

    /// Builds and registers a prototype.
    ///
    /// A name already declared with a different number of parameters is
    /// rejected; a matching redeclaration replaces the old one.
    fn build_prototype(&mut self, node: &CstNode, is_extern: bool) -> BuildResult<Rc<Prototype>> {
        if !matches!(
            node.kind,
            CstKind::FunctionPrototype | CstKind::UnaryPrototype | CstKind::BinaryPrototype
        ) {
            return Err(unexpected_node(node));
        }

        let name = prototype_name(node);
        let parameters = node
            .children
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                Rc::new(ParameterDeclaration {
                    name: parameter.text.clone(),
                    index,
                    span: parameter.span.clone(),
                })
            })
            .collect::<Vec<Rc<ParameterDeclaration>>>();

        if let Some(existing) = self.state.function_declarations.get(&name) {
            if existing.arity() != parameters.len() {
                return Err(ErrorNode::new(
                    node.span.clone(),
                    DiagnosticCode::IncompatibleRedeclaration,
                    "Declaration incompatible with previous declaration",
                ));
            }
        }

        let prototype = Rc::new(Prototype {
            name: name.clone(),
            parameters,
            is_extern,
            is_compiler_generated: false,
            span: node.span.clone(),
        });
        self.state
            .function_declarations
            .insert(name, Rc::clone(&prototype));

        Ok(prototype)
    }

    pub fn build_expression(&mut self, node: &CstNode) -> BuildResult<Expression> {
        match node.kind {
            CstKind::Expression => self.build_operator_expression(node),
            CstKind::ParenExpression => self.build_expression(required_child(node, 0)?),
            CstKind::ConstExpression => build_constant(node),
            CstKind::VariableExpression => self.build_variable_reference(node),
            CstKind::FunctionCallExpression => self.build_function_call(node),
            CstKind::UnaryOpExpression => self.build_unary_operator(node),
            CstKind::ConditionalExpression => self.build_conditional(node),
            CstKind::ForExpression => self.build_for_in(node),
            CstKind::VarInExpression => self.build_var_in(node),
            _ => Err(unexpected_node(node)),
        }
    }

    /// Folds an atom with its trailing `(operator, rhs)` pairs, left to right.
    ///
    /// Each rhs already holds every operator that binds tighter than the one
    /// before it, so a plain left fold yields the right grouping.
    fn build_operator_expression(&mut self, node: &CstNode) -> BuildResult<Expression> {
        let mut lhs = self.build_expression(required_child(node, 0)?)?;

        for (operator, rhs_node) in &node.operators {
            let rhs = self.build_expression(rhs_node)?;
            lhs = self.create_binary_operator_node(lhs, operator, rhs)?;
        }

        Ok(lhs)
    }

    fn create_binary_operator_node(
        &mut self,
        lhs: Expression,
        operator: &Token,
        rhs: Expression,
    ) -> BuildResult<Expression> {
        let span = lhs.get_span().to(rhs.get_span());
        let symbol = operator.operator_char().unwrap_or_default();

        if let Some(op) = BuiltInOperatorKind::from_symbol(symbol) {
            return Ok(Expression::BinaryOperator(BinaryOperatorExpression {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            }));
        }

        if !self.state.operators.lookup_infix(symbol).kind.is_infix() {
            return Err(ErrorNode::new(
                operator.span.clone(),
                DiagnosticCode::InvalidBinaryOp,
                format!("Invalid binary operator '{}'", operator.value),
            ));
        }

        let callee = binary_function_name(&operator.value);
        let Some(function) = self.state.find_call_target(&callee) else {
            return Err(ErrorNode::new(
                operator.span.clone(),
                DiagnosticCode::UnaryOpNotFound,
                format!("Binary operator function '{}' not found", callee),
            ));
        };

        Ok(Expression::FunctionCall(FunctionCallExpression {
            function,
            arguments: vec![lhs, rhs],
            span,
        }))
    }

    fn build_variable_reference(&mut self, node: &CstNode) -> BuildResult<Expression> {
        match self.named_values.get(&node.text) {
            Some(declaration) => Ok(Expression::VariableReference(VariableReferenceExpression {
                declaration: declaration.clone(),
                span: node.span.clone(),
            })),
            None => Err(ErrorNode::new(
                node.span.clone(),
                DiagnosticCode::UnknownVariable,
                format!("Unknown variable name: {}", node.text),
            )),
        }
    }

    fn build_function_call(&mut self, node: &CstNode) -> BuildResult<Expression> {
        let Some(function) = self.state.find_call_target(&node.text) else {
            return Err(ErrorNode::new(
                node.span.clone(),
                DiagnosticCode::InvokeUnknownFunction,
                format!("Call to unknown function '{}'", node.text),
            ));
        };

        let arguments = node
            .children
            .iter()
            .map(|argument| self.build_expression(argument))
            .collect::<BuildResult<Vec<Expression>>>()?;

        Ok(Expression::FunctionCall(FunctionCallExpression {
            function,
            arguments,
            span: node.span.clone(),
        }))
    }

    fn build_unary_operator(&mut self, node: &CstNode) -> BuildResult<Expression> {
        let symbol = node.operator_symbol().unwrap_or_default();

        if self.state.operators.lookup_prefix(symbol).is_none() {
            return Err(ErrorNode::new(
                node.span.clone(),
                DiagnosticCode::InvalidUnaryOp,
                format!("invalid unary operator {}", node.text),
            ));
        }

        let callee = unary_function_name(&node.text);
        let Some(function) = self.state.find_call_target(&callee) else {
            return Err(ErrorNode::new(
                node.span.clone(),
                DiagnosticCode::InvalidUnaryOpRef,
                format!("reference to unknown unary operator function {}", callee),
            ));
        };

        let argument = self.build_expression(required_child(node, 0)?)?;

        Ok(Expression::FunctionCall(FunctionCallExpression {
            function,
            arguments: vec![argument],
            span: node.span.clone(),
        }))
    }

    fn build_conditional(&mut self, node: &CstNode) -> BuildResult<Expression> {
        let condition = self.build_expression(required_child(node, 0)?)?;
        let then_expression = self.build_expression(required_child(node, 1)?)?;
        let else_expression = self.build_expression(required_child(node, 2)?)?;

        // Both branches store into this slot, standing in for a phi node
        let result_variable = Rc::new(LocalVariableDeclaration {
            name: format!("$ifresult${}", self.local_var_index),
            initializer: None,
            is_compiler_generated: true,
            span: node.span.clone(),
        });
        self.local_var_index += 1;
        self.push_local(Rc::clone(&result_variable));

        Ok(Expression::Conditional(ConditionalExpression {
            condition: Box::new(condition),
            then_expression: Box::new(then_expression),
            else_expression: Box::new(else_expression),
            result_variable,
            span: node.span.clone(),
        }))
    }

    fn build_for_in(&mut self, node: &CstNode) -> BuildResult<Expression> {
        // The start value is evaluated outside the loop's scope
        let loop_variable = self.build_initializer(required_child(node, 0)?)?;
        let has_step = node.children.len() > 3;

        let mut scope = self.enter_scope();
        scope.push_local(Rc::clone(&loop_variable));

        let condition = scope.build_expression(required_child(node, 1)?)?;
        let step = if has_step {
            scope.build_expression(required_child(node, 2)?)?
        } else {
            Expression::Constant(ConstantExpression {
                value: 1.0,
                span: Span::null(),
            })
        };
        let body = scope.build_expression(required_child(node, if has_step { 3 } else { 2 })?)?;

        Ok(Expression::ForIn(ForInExpression {
            loop_variable,
            condition: Box::new(condition),
            step: Box::new(step),
            body: Box::new(body),
            span: node.span.clone(),
        }))
    }

    fn build_var_in(&mut self, node: &CstNode) -> BuildResult<Expression> {
        let (body_node, initializers) = node
            .children
            .split_last()
            .ok_or_else(|| unexpected_node(node))?;

        let mut scope = self.enter_scope();
        let mut local_variables = vec![];

        // Each initializer already sees the locals declared before it
        for initializer in initializers {
            let local = scope.build_initializer(initializer)?;
            scope.push_local(Rc::clone(&local));
            local_variables.push(local);
        }

        let body = scope.build_expression(body_node)?;

        Ok(Expression::VarIn(VarInExpression {
            local_variables,
            body: Box::new(body),
            span: node.span.clone(),
        }))
    }

    /// `name [= value]`, defaulting the value to `0`.
    fn build_initializer(&mut self, node: &CstNode) -> BuildResult<Rc<LocalVariableDeclaration>> {
        if node.kind != CstKind::Initializer {
            return Err(unexpected_node(node));
        }

        let value = match node.child(0) {
            Some(value) => self.build_expression(value)?,
            None => Expression::Constant(ConstantExpression {
                value: 0.0,
                span: node.span.clone(),
            }),
        };

        Ok(Rc::new(LocalVariableDeclaration {
            name: node.text.clone(),
            initializer: Some(value),
            is_compiler_generated: false,
            span: node.span.clone(),
        }))
    }
}

fn build_constant(node: &CstNode) -> BuildResult<Expression> {
    match node.text.parse::<f64>() {
        Ok(value) => Ok(Expression::Constant(ConstantExpression {
            value,
            span: node.span.clone(),
        })),
        Err(_) => Err(ErrorNode::new(
            node.span.clone(),
            DiagnosticCode::SyntaxError,
            format!("Syntax Error: invalid number {:?}", node.text),
        )),
    }
}

/// Registry name of the function a prototype declares.
fn prototype_name(node: &CstNode) -> String {
    match node.kind {
        CstKind::UnaryPrototype => unary_function_name(&node.text),
        CstKind::BinaryPrototype => binary_function_name(&node.text),
        _ => node.text.clone(),
    }
}

fn required_child(node: &CstNode, index: usize) -> BuildResult<&CstNode> {
    node.child(index).ok_or_else(|| unexpected_node(node))
}

fn unexpected_node(node: &CstNode) -> ErrorNode {
    if node.is_error() {
        return ErrorNode::new(
            node.span.clone(),
            DiagnosticCode::SyntaxError,
            format!("Syntax Error: {}", node.text),
        );
    }
    ErrorNode::new(
        node.span.clone(),
        DiagnosticCode::SyntaxError,
        format!("Syntax Error: unexpected {:?} node", node.kind),
    )
}
