use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{cst::CstNode, expr::*, parser::Parser, stmt::*};

pub type UnitHandler = fn(&mut Parser) -> Result<CstNode, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<CstNode, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and symbols
    parser.nud(TokenKind::Number, parse_const_expr);
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::OpenParen, parse_paren_expr);

    // Control flow and locals, only reachable when the keywords lex
    parser.nud(TokenKind::If, parse_conditional_expr);
    parser.nud(TokenKind::For, parse_for_expr);
    parser.nud(TokenKind::Var, parse_var_in_expr);

    // Top level units
    parser.unit(TokenKind::Def, parse_function_definition);
    parser.unit(TokenKind::Extern, parse_external_declaration);
}

// Lookup tables inside parser struct, rebuilt for every parse
pub type UnitLookup = HashMap<TokenKind, UnitHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
