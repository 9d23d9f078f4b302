use std::{io::Read, rc::Rc};

use crate::{
    ast::ast::{AstNode, ErrorNode, RootNode},
    builder::ast_builder::{syntax_error, AstBuilder},
    diagnostics::collector::collect_errors,
    errors::errors::{DiagnosticCode, Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::{
        cst::CstNode,
        parser::{parse, ParseMode},
    },
    Position, Span,
};

use super::{options::SessionOptions, runtime_state::RuntimeState};

pub const DEFAULT_SOURCE_NAME: &str = "shell";

/// Outcome of parsing one REPL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Complete(AstNode),
    Error(Vec<ErrorNode>),
    /// The input ended inside a statement; feed it again with more text.
    NeedMoreInput,
}

/// Front end for one REPL run or one source file.
///
/// Every call lexes and parses with fresh instances; only the
/// [`RuntimeState`] carries over between calls.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: RuntimeState,
    source_name: Option<String>,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Session {
            state: RuntimeState::new(options),
            source_name: None,
        }
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RuntimeState {
        &mut self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.state.options
    }

    /// Name reported in positions, `shell` when unset.
    pub fn set_source_name(&mut self, name: impl Into<String>) {
        self.source_name = Some(name.into());
    }

    pub fn source_name(&self) -> &str {
        self.source_name.as_deref().unwrap_or(DEFAULT_SOURCE_NAME)
    }

    /// Parses a single statement.
    ///
    /// Input that ends inside the statement produces a root holding one
    /// `ParseCanceled` error.
    pub fn parse(&mut self, text: &str) -> AstNode {
        match self.syntax_tree(text, ParseMode::Repl) {
            Ok(cst) => self.build(&cst),
            Err(error) if error.is_end_of_input() => parse_canceled(&error),
            Err(error) => AstNode::Error(syntax_error(&error)),
        }
    }

    /// Parses a whole source text into a root with one unit per definition,
    /// declaration or expression.
    pub fn parse_source(&mut self, text: &str) -> AstNode {
        match self.syntax_tree(text, ParseMode::FullSource) {
            Ok(cst) => self.build(&cst),
            Err(error) => {
                let error = syntax_error(&error);
                AstNode::Root(RootNode {
                    span: error.span.clone(),
                    units: vec![AstNode::Error(error)],
                })
            }
        }
    }

    pub fn parse_reader<R: Read>(&mut self, mut reader: R) -> Result<AstNode, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| {
            Error::new(
                ErrorImpl::Io {
                    message: e.to_string(),
                },
                Position(0, Rc::new(self.source_name().to_string())),
            )
        })?;

        Ok(self.parse_source(&text))
    }

    /// Parses a single statement, splitting the outcome for a REPL loop.
    pub fn parse_statement(&mut self, text: &str) -> ParseResult {
        let cst = match self.syntax_tree(text, ParseMode::Repl) {
            Ok(cst) => cst,
            Err(error) if error.is_end_of_input() => return ParseResult::NeedMoreInput,
            Err(error) => return ParseResult::Error(vec![syntax_error(&error)]),
        };

        let node = self.build(&cst);
        let errors = collect_errors(&node);
        if errors.is_empty() {
            ParseResult::Complete(node)
        } else {
            ParseResult::Error(errors.into_iter().cloned().collect())
        }
    }

    fn syntax_tree(&mut self, text: &str, mode: ParseMode) -> Result<CstNode, Error> {
        let level = self.state.options.language_level;
        let file = self.source_name().to_string();

        let tokens = tokenize(text, Some(file.clone()), level)?;
        parse(tokens, Rc::new(file), &mut self.state.operators, level, mode)
    }

    fn build(&mut self, cst: &CstNode) -> AstNode {
        AstBuilder::new(&mut self.state).build(cst)
    }
}

fn parse_canceled(error: &Error) -> AstNode {
    let position = error.get_position().clone();
    let span = Span {
        start: position.clone(),
        end: position,
    };

    AstNode::Root(RootNode {
        units: vec![AstNode::Error(ErrorNode::new(
            span.clone(),
            DiagnosticCode::ParseCanceled,
            "Parse canceled",
        ))],
        span,
    })
}
