use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{session::options::LanguageLevel, Span};

lazy_static! {
    /// Keywords and the language level that introduces each of them.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, (TokenKind, LanguageLevel)> = {
        let mut map = HashMap::new();
        map.insert("def", (TokenKind::Def, LanguageLevel::SimpleExpressions));
        map.insert("extern", (TokenKind::Extern, LanguageLevel::SimpleExpressions));
        map.insert("if", (TokenKind::If, LanguageLevel::ControlFlow));
        map.insert("then", (TokenKind::Then, LanguageLevel::ControlFlow));
        map.insert("else", (TokenKind::Else, LanguageLevel::ControlFlow));
        map.insert("for", (TokenKind::For, LanguageLevel::ControlFlow));
        map.insert("in", (TokenKind::In, LanguageLevel::ControlFlow));
        map.insert("unary", (TokenKind::Unary, LanguageLevel::UserDefinedOperators));
        map.insert("binary", (TokenKind::Binary, LanguageLevel::UserDefinedOperators));
        map.insert("var", (TokenKind::Var, LanguageLevel::MutableVariables));
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    /// Any single punctuation character not claimed by the grammar itself.
    Operator,

    OpenParen,
    CloseParen,
    Comma,
    Semicolon,

    // Reserved
    Def,
    Extern,
    If,
    Then,
    Else,
    For,
    In,
    Unary,
    Binary,
    Var,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// The operator symbol, if this is an operator token.
    pub fn operator_char(&self) -> Option<char> {
        if self.kind == TokenKind::Operator {
            self.value.chars().next()
        } else {
            None
        }
    }

    pub fn is_operator(&self, symbol: char) -> bool {
        self.operator_char() == Some(symbol)
    }
}
