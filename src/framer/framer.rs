use std::{
    collections::VecDeque,
    io::{BufRead, Lines},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::ready_state::ReadyState;

pub const DEFAULT_TERMINATOR: char = ';';

/// One piece of framed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Set for the unterminated tail of a line; the text is also kept in the
    /// framer's buffer and will lead the next complete statement.
    pub is_partial: bool,
}

impl Fragment {
    fn complete(text: String) -> Self {
        Fragment {
            text,
            is_partial: false,
        }
    }

    fn partial(text: &str) -> Self {
        Fragment {
            text: text.to_string(),
            is_partial: true,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Shared flag that stops a [`Statements`] iterator at the next line boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct StatementFramer {
    terminator: char,
    buffer: String,
    state: ReadyState,
}

impl Default for StatementFramer {
    fn default() -> Self {
        Self::with_valid_terminator(DEFAULT_TERMINATOR)
    }
}

/// Rejects terminators that would leave a complete statement looking blank.
pub fn validate_terminator(terminator: char) -> Result<char, Error> {
    if terminator.is_whitespace() || terminator.is_control() {
        return Err(Error::new(
            ErrorImpl::InvalidTerminator { terminator },
            Position::null(),
        ));
    }
    Ok(terminator)
}

impl StatementFramer {
    pub fn new(terminator: char) -> Result<Self, Error> {
        validate_terminator(terminator).map(Self::with_valid_terminator)
    }

    fn with_valid_terminator(terminator: char) -> Self {
        StatementFramer {
            terminator,
            buffer: String::new(),
            state: ReadyState::StartExpression,
        }
    }

    pub fn state(&self) -> ReadyState {
        self.state
    }

    pub fn terminator(&self) -> char {
        self.terminator
    }

    /// Text of an unfinished statement carried over from earlier lines.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Frames one input line.
    ///
    /// Each terminated segment is returned as a complete statement, prefixed
    /// by whatever partial text was buffered before it and suffixed with the
    /// terminator. The trailing segment is returned as a partial fragment
    /// unless the line ended with the terminator.
    pub fn push_line(&mut self, line: &str) -> Vec<Fragment> {
        let mut segments = line.split(self.terminator).collect::<Vec<&str>>();
        let tail = segments.pop().unwrap_or_default();
        let was_terminated = !segments.is_empty() && tail.is_empty();

        let mut fragments = vec![];
        for segment in segments {
            let mut statement = std::mem::take(&mut self.buffer);
            statement.push_str(segment);
            statement.push(self.terminator);
            fragments.push(Fragment::complete(statement));
        }

        if !was_terminated {
            if !tail.trim().is_empty() {
                self.buffer.push_str(tail);
                self.buffer.push('\n');
            }
            fragments.push(Fragment::partial(tail));
        }

        for fragment in &fragments {
            self.state = self.state.next(fragment.is_partial, fragment.is_blank());
        }

        fragments
    }

    /// Ends the stream, discarding any buffered partial statement.
    pub fn finish(&mut self) {
        self.buffer.clear();
        self.state = ReadyState::StartExpression;
    }

    /// Lazily frames every line of `reader`.
    ///
    /// `prompt` is called with the current state each time another line is
    /// needed. Cancellation is checked before and after every line read; once
    /// cancelled, nothing more is read and buffered text is dropped.
    pub fn statements<R, F>(self, reader: R, prompt: F, cancel: CancelToken) -> Statements<R, F>
    where
        R: BufRead,
        F: FnMut(ReadyState) -> std::io::Result<()>,
    {
        Statements {
            framer: self,
            lines: reader.lines(),
            prompt,
            cancel,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

/// Iterator returned by [`StatementFramer::statements`].
pub struct Statements<R, F> {
    framer: StatementFramer,
    lines: Lines<R>,
    prompt: F,
    cancel: CancelToken,
    pending: VecDeque<Fragment>,
    done: bool,
}

impl<R, F> Statements<R, F> {
    pub fn state(&self) -> ReadyState {
        self.framer.state()
    }

    fn stop(&mut self) {
        self.framer.finish();
        self.pending.clear();
        self.done = true;
    }
}

impl<R, F> Iterator for Statements<R, F>
where
    R: BufRead,
    F: FnMut(ReadyState) -> std::io::Result<()>,
{
    type Item = Result<Fragment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(fragment) = self.pending.pop_front() {
                return Some(Ok(fragment));
            }
            if self.done {
                return None;
            }
            if self.cancel.is_cancelled() {
                self.stop();
                return None;
            }

            if let Err(error) = (self.prompt)(self.framer.state()) {
                self.stop();
                return Some(Err(io_error(error)));
            }

            match self.lines.next() {
                None => {
                    self.stop();
                    return None;
                }
                Some(Err(error)) => {
                    self.stop();
                    return Some(Err(io_error(error)));
                }
                Some(Ok(_)) if self.cancel.is_cancelled() => {
                    self.stop();
                    return None;
                }
                Some(Ok(line)) => self.pending.extend(self.framer.push_line(&line)),
            }
        }
    }
}

fn io_error(error: std::io::Error) -> Error {
    Error::new(
        ErrorImpl::Io {
            message: error.to_string(),
        },
        Position::null(),
    )
}
