use std::fmt::Display;

use colored::{ColoredString, Colorize};
use thiserror::Error;

use crate::{session::options::LanguageLevel, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Input ran out before the construct being parsed was complete.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::UnexpectedEndOfInput)
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidPrecedence { .. } => "InvalidPrecedence",
            ErrorImpl::BuiltInOperatorRedefinition { .. } => "BuiltInOperatorRedefinition",
            ErrorImpl::FeatureNotEnabled { .. } => "FeatureNotEnabled",
            ErrorImpl::InvalidTerminator { .. } => "InvalidTerminator",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput => {
                ErrorTip::Suggestion(String::from("The statement is incomplete"))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::InvalidPrecedence { token } => ErrorTip::Suggestion(format!(
                "Invalid precedence `{}`, expected a whole number between 1 and 100",
                token
            )),
            ErrorImpl::BuiltInOperatorRedefinition { operator } => ErrorTip::Suggestion(format!(
                "Operator `{}` is built in and cannot be redefined",
                operator
            )),
            ErrorImpl::FeatureNotEnabled { feature, required } => ErrorTip::Suggestion(format!(
                "{} requires language level {:?}",
                feature, required
            )),
            ErrorImpl::InvalidTerminator { .. } => ErrorTip::Suggestion(String::from(
                "Statement terminators must be visible characters",
            )),
            ErrorImpl::Io { message } => ErrorTip::Suggestion(message.clone()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid operator precedence: {token:?}")]
    InvalidPrecedence { token: String },
    #[error("built-in operator {operator:?} cannot be redefined")]
    BuiltInOperatorRedefinition { operator: char },
    #[error("{feature} is not available below language level {required:?}")]
    FeatureNotEnabled {
        feature: String,
        required: LanguageLevel,
    },
    #[error("{terminator:?} cannot end a statement")]
    InvalidTerminator { terminator: char },
    #[error("failed to read source: {message}")]
    Io { message: String },
}

/// Stable identifiers for diagnostics reported through AST error nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DiagnosticCode {
    SyntaxError = 1000,
    UnknownVariable = 1001,
    InvokeUnknownFunction = 1002,
    InvalidUnaryOp = 1003,
    InvalidUnaryOpRef = 1004,
    InvalidBinaryOp = 1005,
    UnaryOpNotFound = 1006,
    IncompatibleRedeclaration = 1007,
    ParseCanceled = 1008,
    RedefinedFunction = 1009,
}

impl DiagnosticCode {
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticCode::SyntaxError => "SyntaxError",
            DiagnosticCode::UnknownVariable => "UnknownVariable",
            DiagnosticCode::InvokeUnknownFunction => "InvokeUnknownFunction",
            DiagnosticCode::InvalidUnaryOp => "InvalidUnaryOp",
            DiagnosticCode::InvalidUnaryOpRef => "InvalidUnaryOpRef",
            DiagnosticCode::InvalidBinaryOp => "InvalidBinaryOp",
            DiagnosticCode::UnaryOpNotFound => "UnaryOpNotFound",
            DiagnosticCode::IncompatibleRedeclaration => "IncompatibleRedeclaration",
            DiagnosticCode::ParseCanceled => "ParseCanceled",
            DiagnosticCode::RedefinedFunction => "RedefinedFunction",
        }
    }
}

impl Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KLS{}", self.code())
    }
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Severity {
    #[default]
    Error,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }

    pub fn colored_name(&self) -> ColoredString {
        match self {
            Self::Error => self.name().red().bold(),
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
