//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and their language level gating
//! - Identifiers and numeric literals
//! - Single character operators and punctuation
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};
use crate::session::options::LanguageLevel;

#[test]
fn test_tokenize_keywords() {
    let source = "def extern if then else for in var unary binary";
    let tokens = tokenize(source, Some("test.kls".to_string()), LanguageLevel::MutableVariables).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Def);
    assert_eq!(tokens[1].kind, TokenKind::Extern);
    assert_eq!(tokens[2].kind, TokenKind::If);
    assert_eq!(tokens[3].kind, TokenKind::Then);
    assert_eq!(tokens[4].kind, TokenKind::Else);
    assert_eq!(tokens[5].kind, TokenKind::For);
    assert_eq!(tokens[6].kind, TokenKind::In);
    assert_eq!(tokens[7].kind, TokenKind::Var);
    assert_eq!(tokens[8].kind, TokenKind::Unary);
    assert_eq!(tokens[9].kind, TokenKind::Binary);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_keywords_gated_by_level() {
    let source = "def if var unary";
    let tokens = tokenize(source, None, LanguageLevel::SimpleExpressions).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Def);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);

    let tokens = tokenize(source, None, LanguageLevel::ControlFlow).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::If);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);

    let tokens = tokenize(source, None, LanguageLevel::UserDefinedOperators).unwrap();
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Unary);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase";
    let tokens = tokenize(source, None, LanguageLevel::MutableVariables).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100. .5";
    let tokens = tokenize(source, None, LanguageLevel::MutableVariables).unwrap();

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "0", "100.", ".5", "EOF"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_operators() {
    let source = "+-*/<^=|&!:";
    let tokens = tokenize(source, None, LanguageLevel::MutableVariables).unwrap();

    assert_eq!(tokens.len(), 12);
    for (token, expected) in tokens.iter().zip(source.chars()) {
        assert_eq!(token.kind, TokenKind::Operator);
        assert_eq!(token.operator_char(), Some(expected));
    }
}

#[test]
fn test_tokenize_punctuation() {
    let source = "foo(a, b);";
    let tokens = tokenize(source, None, LanguageLevel::MutableVariables).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::OpenParen);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Comma);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].kind, TokenKind::CloseParen);
    assert_eq!(tokens[6].kind, TokenKind::Semicolon);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "1 # ignored + 2\n+ 3";
    let tokens = tokenize(source, None, LanguageLevel::MutableVariables).unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].value, "1");
    assert!(tokens[1].is_operator('+'));
    assert_eq!(tokens[2].value, "3");
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("  foo + 12", Some("span.kls".to_string()), LanguageLevel::MutableVariables).unwrap();

    assert_eq!(tokens[0].span.start.0, 2);
    assert_eq!(tokens[0].span.end.0, 5);
    assert_eq!(tokens[1].span.start.0, 6);
    assert_eq!(tokens[2].span.start.0, 8);
    assert_eq!(tokens[2].span.end.0, 10);
    assert_eq!(tokens[3].span.start.0, 10);
    assert_eq!(tokens[0].span.start.1.as_str(), "span.kls");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x", None, LanguageLevel::MutableVariables).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_unrecognised_token() {
    let result = tokenize("1 + \u{e9}", None, LanguageLevel::MutableVariables);

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_empty_source() {
    let tokens = tokenize("", None, LanguageLevel::MutableVariables).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}
