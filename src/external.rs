use crate::command::Command;
use std::fmt;
use std::io;
use std::process::ExitStatus;
use tracing::debug;

/// How an external program ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Normal exit with the given status code.
    Exited(i32),
    /// Killed by the given signal number.
    Signaled(i32),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited(code) => write!(f, "exited with status {code}"),
            Termination::Signaled(signal) => write!(f, "killed by signal {signal}"),
        }
    }
}

/// Runs a program to completion.
///
/// The caller blocks until the program terminates. An `Err` means the program never
/// ran: it could not be spawned, found or loaded.
pub trait Launcher {
    fn launch(&mut self, cmd: &Command) -> io::Result<Termination>;
}

/// Launches programs as child processes of the current one.
///
/// The child inherits stdin, stdout, stderr, the environment and the working
/// directory. Bare names are looked up in `PATH`.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, cmd: &Command) -> io::Result<Termination> {
        let Some(program) = cmd.name() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
        };
        let mut child = std::process::Command::new(program)
            .args(cmd.args())
            .spawn()?;
        debug!(program, pid = child.id(), "spawned");
        let status = child.wait()?;
        let termination = termination(status);
        debug!(program, %termination, "child finished");
        Ok(termination)
    }
}

fn termination(status: ExitStatus) -> Termination {
    match status.code() {
        Some(code) => Termination::Exited(code),
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => Termination::Signaled(signal),
        None => Termination::Exited(-1),
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> Termination {
    Termination::Exited(-1)
}
