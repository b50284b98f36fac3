use crate::builtin::BuiltinRegistry;
use crate::command::{Command, Flow, Streams};
use crate::env::Environment;
use crate::external::{Launcher, SystemLauncher};
use crate::history::History;
use crate::io_adapters::{Input, LineSource};
use crate::lexer;
use anyhow::Result;
use std::fmt::Display;
use tracing::{debug, warn};

/// Prompt shown before each line unless configured otherwise.
pub const DEFAULT_PROMPT: &str = "> ";

/// A minimal interactive interpreter that runs builtins and external programs.
///
/// The interpreter owns the session [`Environment`] (and with it the history), an
/// immutable [`BuiltinRegistry`] and a [`Launcher`] for everything else. Names found
/// in the registry always shadow programs of the same name.
///
/// Example
/// ```
/// use lsh::{Command, Flow, Interpreter, Streams};
/// let mut sh = Interpreter::default();
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// let flow = sh.execute(&Command::from_iter(["exit"]), &mut Streams::new(&mut out, &mut err));
/// assert_eq!(flow, Flow::Stop);
/// ```
pub struct Interpreter {
    env: Environment,
    builtins: BuiltinRegistry,
    launcher: Box<dyn Launcher>,
    prompt: String,
}

impl Interpreter {
    /// Create an interpreter with a custom registry and launcher.
    pub fn new(builtins: BuiltinRegistry, launcher: Box<dyn Launcher>) -> Self {
        Self {
            env: Environment::new(),
            builtins,
            launcher,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn history(&self) -> &History {
        self.env.history()
    }

    /// Run one tokenized command and report whether the session should go on.
    ///
    /// Blank commands do nothing. Errors from builtins and launch failures are
    /// written to `io.stderr` and never stop the session.
    pub fn execute(&mut self, cmd: &Command, io: &mut Streams<'_>) -> Flow {
        let Some(name) = cmd.name() else {
            return Flow::Continue;
        };

        if let Some(builtin) = self.builtins.get(name) {
            debug!(name, "running builtin");
            return match builtin.execute(cmd, io, &mut self.env) {
                Ok(flow) => flow,
                Err(err) => {
                    report(io, format_args!("{err:#}"));
                    Flow::Continue
                }
            };
        }

        debug!(name, args = ?cmd.args(), "launching program");
        if let Err(err) = self.launcher.launch(cmd) {
            debug!(name, error = %err, "launch failed");
            report(io, format_args!("{name}: {err}"));
        }
        Flow::Continue
    }

    /// Tokenize `line`, record it in the history and execute it.
    ///
    /// Every line is recorded before it runs, blank ones included.
    pub fn run_line(&mut self, line: &str, io: &mut Streams<'_>) -> Flow {
        let cmd = lexer::split_into_tokens(line);
        debug!(tokens = ?cmd.tokens(), "read command");
        self.env.history_mut().record(&cmd);
        let flow = self.execute(&cmd, io);
        if let Err(err) = io.stdout.flush() {
            warn!(error = %err, "can't flush stdout");
        }
        flow
    }

    /// Read and run lines from `input` until `exit` or end of input.
    ///
    /// Returns an error only when `input` fails for a reason other than end of input.
    pub fn repl(&mut self, input: &mut dyn LineSource, io: &mut Streams<'_>) -> Result<()> {
        loop {
            let line = match input.read_line(&self.prompt)? {
                Input::Line(line) => line,
                Input::Interrupted => continue,
                Input::Eof => {
                    debug!("end of input");
                    return Ok(());
                }
            };
            if self.run_line(&line, io) == Flow::Stop {
                debug!("exit requested");
                return Ok(());
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the standard builtins and a [`SystemLauncher`].
    fn default() -> Self {
        Self::new(BuiltinRegistry::default(), Box::new(SystemLauncher))
    }
}

fn report(io: &mut Streams<'_>, message: impl Display) {
    if let Err(err) = writeln!(io.stderr, "lsh: {message}") {
        warn!(error = %err, "can't write error report");
    }
}
