use std::{
    cell::{Cell, RefCell},
    io::{self, BufRead, Write},
    mem,
};

use crate::{
    diagnostics::report::Renderer,
    errors::errors::{Error, ErrorImpl},
    framer::{
        framer::{validate_terminator, CancelToken, StatementFramer, DEFAULT_TERMINATOR},
        ready_state::ReadyState,
    },
    session::session::{ParseResult, Session},
    Position,
};

/// Interactive loop: frames input into statements, parses each complete one
/// and reports the result.
pub struct Repl<W: Write> {
    session: Session,
    output: RefCell<W>,
    terminator: char,
    show_prompt: bool,
    renderer: Renderer,
}

/// Counts of what a run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplSummary {
    pub parsed: usize,
    pub failed: usize,
}

impl<W: Write> Repl<W> {
    pub fn new(session: Session, output: W) -> Self {
        Repl {
            session,
            output: RefCell::new(output),
            terminator: DEFAULT_TERMINATOR,
            show_prompt: true,
            renderer: Renderer::new(),
        }
    }

    pub fn with_terminator(mut self, terminator: char) -> Result<Self, Error> {
        self.terminator = validate_terminator(terminator)?;
        Ok(self)
    }

    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    /// Runs until `input` ends or `cancel` is set.
    ///
    /// A statement whose text ends inside a construct, for instance because a
    /// comment swallowed its terminator, is held back and parsed again in
    /// front of the next one. Whatever is still held back when input ends is
    /// dropped along with the framer's unterminated text.
    pub fn run<R: BufRead>(&mut self, input: R, cancel: CancelToken) -> Result<ReplSummary, Error> {
        let Repl {
            session,
            output,
            terminator,
            show_prompt,
            renderer,
        } = self;
        let show_prompt = *show_prompt;
        let continuing = Cell::new(false);

        let prompt = |state: ReadyState| -> io::Result<()> {
            if show_prompt {
                let state = if continuing.get() {
                    ReadyState::ContinueExpression
                } else {
                    state
                };
                let mut output = output.borrow_mut();
                write!(output, "{}", state.prompt())?;
                output.flush()?;
            }
            Ok(())
        };

        let mut summary = ReplSummary::default();
        let mut held_back = String::new();
        let framer = StatementFramer::new(*terminator)?;
        for fragment in framer.statements(input, prompt, cancel) {
            let fragment = fragment?;
            if fragment.is_partial {
                continue;
            }

            let mut text = mem::take(&mut held_back);
            text.push_str(&statement_text(&fragment.text, *terminator));

            let mut output = output.borrow_mut();
            let written = match session.parse_statement(&text) {
                ParseResult::Complete(node) => {
                    summary.parsed += 1;
                    writeln!(output, "PARSED: {}", node)
                }
                ParseResult::Error(errors) => {
                    summary.failed += 1;
                    errors.iter().try_for_each(|error| {
                        write!(
                            output,
                            "{}",
                            renderer.render(session.source_name(), &text, error)
                        )
                    })
                }
                ParseResult::NeedMoreInput => {
                    held_back = text;
                    held_back.push('\n');
                    Ok(())
                }
            };
            continuing.set(!held_back.is_empty());

            written.map_err(|error| {
                Error::new(
                    ErrorImpl::Io {
                        message: error.to_string(),
                    },
                    Position::null(),
                )
            })?;
        }

        Ok(summary)
    }
}

/// Statement text as the parser expects it, ending in `;` whatever the
/// configured terminator is.
fn statement_text(fragment: &str, terminator: char) -> String {
    match fragment.strip_suffix(terminator) {
        Some(body) if terminator != DEFAULT_TERMINATOR => format!("{};", body),
        _ => fragment.to_string(),
    }
}
