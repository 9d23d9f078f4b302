use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    operators::operators::{
        OperatorKind, DEFAULT_BINARY_PRECEDENCE, DEFAULT_UNARY_PRECEDENCE, MAX_PRECEDENCE,
    },
};

use super::{
    cst::{CstKind, CstNode},
    expr::parse_expr,
    parser::Parser,
};

/// Parses one definition, extern declaration or top level expression.
pub fn parse_unit(parser: &mut Parser) -> Result<CstNode, Error> {
    let handler = parser
        .get_unit_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => parse_top_level_expression(parser),
    }
}

/// `def <prototype> <body>`
pub fn parse_function_definition(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;

    let prototype = parse_prototype(parser)?;
    let body = parse_expr(parser, 0)?;

    Ok(
        CstNode::new(CstKind::FunctionDefinition, parser.span_from(&start))
            .with_children(vec![prototype, body]),
    )
}

/// `extern <prototype>`
pub fn parse_external_declaration(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;
    let prototype = parse_prototype(parser)?;

    Ok(
        CstNode::new(CstKind::ExternalDeclaration, parser.span_from(&start))
            .with_children(vec![prototype]),
    )
}

pub fn parse_top_level_expression(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.get_position();
    let expression = parse_expr(parser, 0)?;

    Ok(
        CstNode::new(CstKind::TopLevelExpression, parser.span_from(&start))
            .with_children(vec![expression]),
    )
}

pub fn parse_prototype(parser: &mut Parser) -> Result<CstNode, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => parse_function_prototype(parser),
        TokenKind::Unary => parse_unary_prototype(parser),
        TokenKind::Binary => parse_binary_prototype(parser),
        _ => Err(parser.unexpected_detailed("expected a function name or operator prototype")),
    }
}

/// `<name> ( <id> [,] <id> ... )`
fn parse_function_prototype(parser: &mut Parser) -> Result<CstNode, Error> {
    let name = parser.advance();
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() == TokenKind::Identifier {
        parameters.push(parameter_node(parser.advance()));
        parser.eat(TokenKind::Comma);
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(
        CstNode::new(CstKind::FunctionPrototype, parser.span_from(&name.span.start))
            .with_text(name.value)
            .with_children(parameters),
    )
}

/// `unary <op> [precedence] ( <id> )`, registering `<op>` as a prefix operator.
fn parse_unary_prototype(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;
    let (symbol, operator) = expect_operator(parser)?;
    let precedence = parse_precedence(parser, DEFAULT_UNARY_PRECEDENCE)?;

    parser.expect(TokenKind::OpenParen)?;
    let operand = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::CloseParen)?;

    if !parser
        .operators_mut()
        .register_operator(symbol, OperatorKind::PreFix, precedence)
    {
        return Err(Error::new(
            ErrorImpl::BuiltInOperatorRedefinition { operator: symbol },
            operator.span.start,
        ));
    }

    Ok(CstNode::new(CstKind::UnaryPrototype, parser.span_from(&start))
        .with_text(operator.value)
        .with_children(vec![parameter_node(operand)]))
}

/// `binary <op> [precedence] ( <id> [,] <id> )`, registering `<op>` as a
/// left associative infix operator.
///
/// The registration stands even if the definition's body later fails to
/// build; uses of `<op>` then report the missing `binary-op$<op>` function.
fn parse_binary_prototype(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;
    let (symbol, operator) = expect_operator(parser)?;

    if parser.operators().lookup_infix(symbol).is_built_in {
        return Err(Error::new(
            ErrorImpl::BuiltInOperatorRedefinition { operator: symbol },
            operator.span.start,
        ));
    }

    let precedence = parse_precedence(parser, DEFAULT_BINARY_PRECEDENCE)?;

    parser.expect(TokenKind::OpenParen)?;
    let lhs = parser.expect(TokenKind::Identifier)?;
    parser.eat(TokenKind::Comma);
    let rhs = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::CloseParen)?;

    parser
        .operators_mut()
        .register_operator(symbol, OperatorKind::InfixLeftAssociative, precedence);

    Ok(CstNode::new(CstKind::BinaryPrototype, parser.span_from(&start))
        .with_text(operator.value)
        .with_children(vec![parameter_node(lhs), parameter_node(rhs)]))
}

fn expect_operator(parser: &mut Parser) -> Result<(char, Token), Error> {
    match parser.current_token().operator_char() {
        Some(symbol) => Ok((symbol, parser.advance())),
        None => Err(parser.unexpected_detailed("expected an operator symbol")),
    }
}

/// Optional whole number precedence between 1 and 100.
fn parse_precedence(parser: &mut Parser, default: i32) -> Result<i32, Error> {
    if parser.current_token_kind() != TokenKind::Number {
        return Ok(default);
    }

    let token = parser.advance();
    match token.value.parse::<f64>() {
        Ok(value)
            if value.fract() == 0.0 && (1.0..=MAX_PRECEDENCE as f64).contains(&value) =>
        {
            Ok(value as i32)
        }
        _ => Err(Error::new(
            ErrorImpl::InvalidPrecedence { token: token.value },
            token.span.start,
        )),
    }
}

fn parameter_node(token: Token) -> CstNode {
    CstNode::new(CstKind::Parameter, token.span).with_text(token.value)
}
