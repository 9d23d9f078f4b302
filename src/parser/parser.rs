//! Parser implementation producing the concrete syntax tree.
//!
//! This module contains the main Parser struct and the entry points for
//! both parse modes. Primary expressions and top level units are dispatched
//! through per token lookup tables; infix operators are looked up in the
//! session's operator table at the moment they are met.

use std::{collections::HashMap, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    operators::operators::OperatorTable,
    session::options::LanguageLevel,
    Position, Span,
};

use super::{
    cst::{CstKind, CstNode},
    lookups::{create_token_lookups, NUDHandler, NUDLookup, UnitHandler, UnitLookup},
    stmt::parse_unit,
};

/// What a single parse call consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Exactly one unit, optionally followed by `;`.
    Repl,
    /// Any number of units, recovering from errors at `;`.
    FullSource,
}

/// The main parser structure that maintains parsing state.
///
/// A parser lives for one parse call only. The operator table is borrowed
/// from the session so that operator definitions take effect immediately.
pub struct Parser<'a> {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Session operator table, read for every operator and written by operator prototypes
    operators: &'a mut OperatorTable,
    /// Features enabled for this parse
    level: LanguageLevel,
    /// Lookup table for top level unit handlers
    unit_lookup: UnitLookup,
    /// Lookup table for primary expression handlers
    nud_lookup: NUDLookup,
}

impl<'a> Parser<'a> {
    pub fn new(
        mut tokens: Vec<Token>,
        file: Rc<String>,
        operators: &'a mut OperatorTable,
        level: LanguageLevel,
    ) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            let position = Position(0, Rc::clone(&file));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: position.clone(),
                    end: position,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            operators,
            level,
            unit_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// The parser never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Error for the current token, reporting end of input at `EOF`.
    pub fn unexpected(&self) -> Error {
        let token = self.current_token();
        let error = if token.kind == TokenKind::EOF {
            ErrorImpl::UnexpectedEndOfInput
        } else {
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            }
        };
        Error::new(error, token.span.start.clone())
    }

    /// Like [`Parser::unexpected`] with an explanation of what was expected.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        let token = self.current_token();
        if token.kind == TokenKind::EOF {
            return self.unexpected();
        }
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: message.to_string(),
            },
            token.span.start.clone(),
        )
    }

    /// Consumes a token of the given kind or fails without advancing.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consumes the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Fails unless `level` is enabled for this parse.
    pub fn require_level(&self, level: LanguageLevel, feature: &str) -> Result<(), Error> {
        if self.level >= level {
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::FeatureNotEnabled {
                    feature: feature.to_string(),
                    required: level,
                },
                self.current_token().span.start.clone(),
            ))
        }
    }

    pub fn operators(&self) -> &OperatorTable {
        &*self.operators
    }

    pub fn operators_mut(&mut self) -> &mut OperatorTable {
        &mut *self.operators
    }

    pub fn level(&self) -> LanguageLevel {
        self.level
    }

    pub fn get_unit_lookup(&self) -> &UnitLookup {
        &self.unit_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Registers a top level unit handler for a token.
    pub fn unit(&mut self, kind: TokenKind, unit_fn: UnitHandler) {
        self.unit_lookup.insert(kind, unit_fn);
    }

    /// Registers a primary expression handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: &Position) -> Span {
        let end = if self.pos == 0 {
            start.clone()
        } else {
            self.tokens[(self.pos - 1).min(self.tokens.len() - 1)]
                .span
                .end
                .clone()
        };
        Span {
            start: start.clone(),
            end,
        }
    }

    /// Returns the current position in the source.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Skips to just past the next `;`, or to `EOF`.
    fn synchronize(&mut self) {
        while self.has_tokens() && self.current_token_kind() != TokenKind::Semicolon {
            self.advance();
        }
        self.eat(TokenKind::Semicolon);
    }
}

/// Parses a token stream into a concrete syntax tree.
///
/// In REPL mode the first error is returned, and running out of tokens is
/// reported as `UnexpectedEndOfInput` so callers can ask for more input. In
/// full source mode errors become `CstKind::Error` units and parsing resumes
/// after the next `;`.
pub fn parse(
    tokens: Vec<Token>,
    file: Rc<String>,
    operators: &mut OperatorTable,
    level: LanguageLevel,
    mode: ParseMode,
) -> Result<CstNode, Error> {
    let mut parser = Parser::new(tokens, file, operators, level);
    create_token_lookups(&mut parser);

    match mode {
        ParseMode::Repl => parse_repl(&mut parser),
        ParseMode::FullSource => Ok(parse_full_source(&mut parser)),
    }
}

fn parse_repl(parser: &mut Parser) -> Result<CstNode, Error> {
    let start = parser.get_position();
    let unit = parse_unit(parser)?;

    parser.eat(TokenKind::Semicolon);
    if parser.has_tokens() {
        return Err(parser.unexpected_detailed("expected end of statement"));
    }

    Ok(CstNode::new(CstKind::Repl, parser.span_from(&start)).with_children(vec![unit]))
}

fn parse_full_source(parser: &mut Parser) -> CstNode {
    let start = parser.get_position();
    let mut units = vec![];

    while parser.has_tokens() {
        if parser.eat(TokenKind::Semicolon) {
            continue;
        }

        match parse_unit(parser) {
            Ok(unit) => {
                units.push(unit);
                if !parser.eat(TokenKind::Semicolon) && parser.has_tokens() {
                    let error = parser.unexpected_detailed("expected `;` between statements");
                    units.push(error_node(&error));
                    parser.synchronize();
                }
            }
            Err(error) => {
                units.push(error_node(&error));
                parser.synchronize();
            }
        }
    }

    CstNode::new(CstKind::FullSource, parser.span_from(&start)).with_children(units)
}

/// Wraps a parse error as an error unit.
pub fn error_node(error: &Error) -> CstNode {
    let position = error.get_position().clone();
    CstNode::new(
        CstKind::Error,
        Span {
            start: position.clone(),
            end: position,
        },
    )
    .with_text(error.to_string())
}
