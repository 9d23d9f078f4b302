use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    operators::operators::OperatorTable,
    session::options::LanguageLevel,
};

use super::{
    cst::{CstKind, CstNode},
    parser::Parser,
};

/// Parses an atom followed by every operator whose precedence is at least
/// `min_precedence`.
///
/// The right operand of each operator is parsed recursively with that
/// operator's next binding power, so the operators it absorbs end up nested
/// inside the rhs node. Precedence is read from the operator table at the
/// moment each operator is met. Symbols that are not infix operators count
/// as precedence `0` and are left for the AST builder to report.
pub fn parse_expr(parser: &mut Parser, min_precedence: i32) -> Result<CstNode, Error> {
    let start = parser.get_position();
    let atom = parse_unary_expr(parser)?;
    let mut operators = vec![];

    while let Some(symbol) = parser.current_token().operator_char() {
        let info = parser.operators().lookup_infix(symbol);
        let precedence = if info.is_none() { 0 } else { info.precedence };
        if precedence < min_precedence {
            break;
        }

        if symbol == '=' {
            parser.require_level(LanguageLevel::MutableVariables, "assignment")?;
        }

        let operator = parser.advance();
        let next_power = if info.is_none() {
            1
        } else {
            OperatorTable::next_binding_power(&info)
        };
        let rhs = parse_expr(parser, next_power)?;
        operators.push((operator, rhs));
    }

    let mut expression =
        CstNode::new(CstKind::Expression, parser.span_from(&start)).with_children(vec![atom]);
    expression.operators = operators;
    Ok(expression)
}

/// Parses a prefix operator application or a primary expression.
pub fn parse_unary_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let Some(symbol) = parser.current_token().operator_char() else {
        return parse_primary_expr(parser);
    };

    if !parser.operators().is_prefix_op(symbol) {
        return Err(parser.unexpected_detailed("not a prefix operator"));
    }

    let operator = parser.advance();
    let info = parser.operators().lookup_prefix(symbol);
    let operand = parse_expr(parser, OperatorTable::next_binding_power(&info))?;

    Ok(
        CstNode::new(CstKind::UnaryOpExpression, parser.span_from(&operator.span.start))
            .with_text(operator.value)
            .with_children(vec![operand]),
    )
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let handler = parser
        .get_nud_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected()),
    }
}

pub fn parse_const_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let token = parser.advance();

    if token.value.parse::<f64>().is_err() {
        return Err(Error::new(
            ErrorImpl::NumberParseError { token: token.value },
            token.span.start,
        ));
    }

    Ok(CstNode::new(CstKind::ConstExpression, token.span).with_text(token.value))
}

/// Variable reference, or a call when followed by `(`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let name = parser.advance();

    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(CstNode::new(CstKind::VariableExpression, name.span).with_text(name.value));
    }

    parser.advance();
    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, 0)?);
            if !parser.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(
        CstNode::new(CstKind::FunctionCallExpression, parser.span_from(&name.span.start))
            .with_text(name.value)
            .with_children(arguments),
    )
}

pub fn parse_paren_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;
    let expression = parse_expr(parser, 0)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(CstNode::new(CstKind::ParenExpression, parser.span_from(&start))
        .with_children(vec![expression]))
}

/// `if <cond> then <expr> else <expr>`
pub fn parse_conditional_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, 0)?;
    parser.expect(TokenKind::Then)?;
    let then_expression = parse_expr(parser, 0)?;
    parser.expect(TokenKind::Else)?;
    let else_expression = parse_expr(parser, 0)?;

    Ok(
        CstNode::new(CstKind::ConditionalExpression, parser.span_from(&start))
            .with_children(vec![condition, then_expression, else_expression]),
    )
}

/// `for <id> = <start>, <cond> [, <step>] in <body>`
///
/// Children are the initializer, the condition, the optional step and the body.
pub fn parse_for_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;

    let name = parser.expect(TokenKind::Identifier)?;
    if !parser.current_token().is_operator('=') {
        return Err(parser.unexpected_detailed("expected `=` after the loop variable"));
    }
    parser.advance();
    let value = parse_expr(parser, 0)?;
    let initializer = CstNode::new(CstKind::Initializer, parser.span_from(&name.span.start))
        .with_text(name.value)
        .with_children(vec![value]);

    parser.expect(TokenKind::Comma)?;
    let condition = parse_expr(parser, 0)?;

    let mut children = vec![initializer, condition];
    if parser.eat(TokenKind::Comma) {
        children.push(parse_expr(parser, 0)?);
    }

    parser.expect(TokenKind::In)?;
    children.push(parse_expr(parser, 0)?);

    Ok(CstNode::new(CstKind::ForExpression, parser.span_from(&start)).with_children(children))
}

/// `var <id> [= <expr>] (, <id> [= <expr>])* in <body>`
///
/// Children are the initializers followed by the body.
pub fn parse_var_in_expr(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.advance().span.start;
    let mut children = vec![];

    loop {
        children.push(parse_initializer(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::In)?;
    children.push(parse_expr(parser, 0)?);

    Ok(CstNode::new(CstKind::VarInExpression, parser.span_from(&start)).with_children(children))
}

fn parse_initializer(parser: &mut Parser) -> Result<CstNode, Error> {
    let name = parser.expect(TokenKind::Identifier)?;

    let mut children = vec![];
    if parser.current_token().is_operator('=') {
        parser.advance();
        children.push(parse_expr(parser, 0)?);
    }

    Ok(
        CstNode::new(CstKind::Initializer, parser.span_from(&name.span.start))
            .with_text(name.value)
            .with_children(children),
    )
}
