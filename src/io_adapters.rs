//! Sources of input lines for the session loop.

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Outcome of asking a [`LineSource`] for the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A full line, without its line terminator.
    Line(String),
    /// The user abandoned the line being typed (Ctrl-C at the prompt).
    Interrupted,
    /// No more input.
    Eof,
}

/// Something that shows a prompt and blocks until a line is available.
///
/// An `Err` is a real read failure and ends the session; end of input is [`Input::Eof`].
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

/// Interactive source backed by rustyline.
///
/// Lines are kept in the editor's in-memory recall list for the arrow keys; nothing
/// is written to disk.
pub struct Editor {
    rl: DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Self> {
        let rl = DefaultEditor::new().context("can't initialize line editor")?;
        Ok(Self { rl })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.rl.add_history_entry(line.as_str())?;
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err).context("can't read line"),
        }
    }
}

/// Plain source reading lines from any buffered reader, e.g. a piped stdin.
///
/// The prompt is written to `prompt_out` before every read. Invalid UTF-8 does not
/// end the session: offending bytes are replaced with U+FFFD.
pub struct Lines<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> Lines<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for Lines<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        write!(self.prompt_out, "{prompt}")?;
        self.prompt_out.flush()?;

        let mut buf = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut buf)
            .context("can't read line")?;
        if read == 0 {
            return Ok(Input::Eof);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        Ok(Input::Line(line))
    }
}
