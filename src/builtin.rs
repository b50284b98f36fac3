use crate::command::{Command, Flow, Streams};
use crate::env::Environment;
use anyhow::{Result, bail};
use std::path::Path;

/// A command implemented in-process rather than by spawning a program.
///
/// Handlers get the full tokenized [`Command`] (name included) and may change the
/// working directory through the [`Environment`]. Errors are reported by the caller
/// and never end the session; only [`Flow::Stop`] does.
pub trait Builtin {
    /// Name the command is invoked by, e.g. "cd".
    fn name(&self) -> &'static str;

    fn execute(&self, cmd: &Command, io: &mut Streams<'_>, env: &mut Environment) -> Result<Flow>;
}

/// Fixed table of builtins, looked up by exact name.
pub struct BuiltinRegistry {
    handlers: Vec<Box<dyn Builtin>>,
}

impl BuiltinRegistry {
    /// Create a registry from a custom set of handlers. Earlier entries win on name clashes.
    pub fn new(handlers: Vec<Box<dyn Builtin>>) -> Self {
        Self { handlers }
    }

    /// Find the handler registered under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.handlers
            .iter()
            .find(|h| h.name() == name)
            .map(|h| h.as_ref())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.name())
    }

    /// Insert a `help` handler at `index` that lists every registered name, its own included.
    fn insert_help(&mut self, index: usize) {
        let mut names: Vec<_> = self.names().collect();
        names.insert(index, Help::NAME);
        self.handlers.insert(index, Box::new(Help::new(names)));
    }
}

impl Default for BuiltinRegistry {
    /// The standard builtins: `cd`, `help`, `exit` and `history`.
    fn default() -> Self {
        let mut registry = Self::new(vec![Box::new(Cd), Box::new(Exit), Box::new(ShowHistory)]);
        registry.insert_help(1);
        registry
    }
}

/// Change the working directory to the first argument.
pub struct Cd;

impl Cd {
    const NAME: &'static str = "cd";
}

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self, cmd: &Command, _io: &mut Streams<'_>, env: &mut Environment) -> Result<Flow> {
        let Some(target) = cmd.args().first() else {
            bail!("expected argument to \"cd\"");
        };
        env.set_current_dir(Path::new(target))?;
        Ok(Flow::Continue)
    }
}

/// Print the builtin names and a short usage note.
pub struct Help {
    builtins: Vec<&'static str>,
}

impl Help {
    const NAME: &'static str = "help";

    pub fn new(builtins: Vec<&'static str>) -> Self {
        Self { builtins }
    }
}

impl Builtin for Help {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(
        &self,
        _cmd: &Command,
        io: &mut Streams<'_>,
        _env: &mut Environment,
    ) -> Result<Flow> {
        writeln!(
            io.stdout,
            "Type program names and arguments, and hit enter."
        )?;
        writeln!(io.stdout, "The following are built-in commands:")?;
        for name in &self.builtins {
            writeln!(io.stdout, "  {name}")?;
        }
        writeln!(
            io.stdout,
            "Use the man command for information on other programs."
        )?;
        Ok(Flow::Continue)
    }
}

/// Leave the session.
pub struct Exit;

impl Exit {
    const NAME: &'static str = "exit";
}

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(
        &self,
        _cmd: &Command,
        _io: &mut Streams<'_>,
        _env: &mut Environment,
    ) -> Result<Flow> {
        Ok(Flow::Stop)
    }
}

/// Print the session history, one `" <seq> <label>"` line per entry.
pub struct ShowHistory;

impl ShowHistory {
    const NAME: &'static str = "history";
}

impl Builtin for ShowHistory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn execute(&self, _cmd: &Command, io: &mut Streams<'_>, env: &mut Environment) -> Result<Flow> {
        for entry in env.history().list() {
            writeln!(io.stdout, "{entry}")?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lock_current_dir;
    use std::env as stdenv;

    fn cmd(tokens: &[&str]) -> Command {
        tokens.iter().copied().collect()
    }

    /// Run `handler` on `tokens`, returning the result and captured stdout/stderr.
    fn run(
        handler: &dyn Builtin,
        tokens: &[&str],
        env: &mut Environment,
    ) -> (Result<Flow>, String, String) {
        let mut out = Vec::<u8>::new();
        let mut err = Vec::<u8>::new();
        let res = handler.execute(
            &cmd(tokens),
            &mut Streams::new(&mut out, &mut err),
            env,
        );
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_registry_lookup_is_exact() {
        let registry = BuiltinRegistry::default();
        assert_eq!(registry.get("cd").map(|h| h.name()), Some("cd"));
        assert_eq!(registry.get("history").map(|h| h.name()), Some("history"));
        assert!(registry.get("hist").is_none());
        assert!(registry.get("CD").is_none());
        assert!(registry.get("exit ").is_none());
        assert!(registry.get("ls").is_none());
    }

    #[test]
    fn test_registry_names_in_order() {
        let registry = BuiltinRegistry::default();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["cd", "help", "exit", "history"]);
    }

    #[test]
    fn test_help_lists_custom_registry() {
        let mut registry = BuiltinRegistry::new(vec![Box::new(Exit)]);
        registry.insert_help(0);
        let mut env = Environment::new();

        let (res, out, _) = run(registry.get("help").unwrap(), &["help"], &mut env);

        assert!(res.is_ok());
        assert!(out.contains("commands:\n  help\n  exit\nUse"), "{out}");
    }

    #[test]
    fn test_cd_to_absolute_path() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().canonicalize().unwrap();

        let mut env = Environment::new();
        let (res, out, err) = run(&Cd, &["cd", target.to_str().unwrap()], &mut env);
        let now = stdenv::current_dir().unwrap().canonicalize().unwrap();

        stdenv::set_current_dir(&orig).expect("failed to restore cwd");
        assert_eq!(res.unwrap(), Flow::Continue);
        assert_eq!(now, target);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_cd_ignores_extra_arguments() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().canonicalize().unwrap();

        let mut env = Environment::new();
        let (res, _, _) = run(&Cd, &["cd", target.to_str().unwrap(), "extra"], &mut env);
        let now = stdenv::current_dir().unwrap().canonicalize().unwrap();

        stdenv::set_current_dir(&orig).expect("failed to restore cwd");
        assert!(res.is_ok());
        assert_eq!(now, target);
    }

    #[test]
    fn test_cd_without_argument_is_usage_error() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment::new();
        let (res, _, _) = run(&Cd, &["cd"], &mut env);

        let err = res.unwrap_err();
        assert_eq!(err.to_string(), "expected argument to \"cd\"");
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_cd_nonexistent_path_errors() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();

        let mut env = Environment::new();
        let (res, _, _) = run(&Cd, &["cd", "/nonexistent-path-xyz"], &mut env);

        assert!(res.is_err());
        assert_eq!(stdenv::current_dir().unwrap(), orig);
    }

    #[test]
    fn test_help_lists_builtins() {
        let registry = BuiltinRegistry::default();
        let mut env = Environment::new();
        let help = registry.get("help").unwrap();

        let (res, out, err) = run(help, &["help", "ignored"], &mut env);

        assert_eq!(res.unwrap(), Flow::Continue);
        assert!(err.is_empty());
        assert_eq!(
            out,
            "Type program names and arguments, and hit enter.\n\
             The following are built-in commands:\n  cd\n  help\n  exit\n  history\n\
             Use the man command for information on other programs.\n"
        );
    }

    #[test]
    fn test_exit_stops_without_output() {
        let mut env = Environment::new();
        let (res, out, err) = run(&Exit, &["exit", "3"], &mut env);

        assert_eq!(res.unwrap(), Flow::Stop);
        assert!(out.is_empty());
        assert!(err.is_empty());
        assert!(env.history().is_empty());
    }

    #[test]
    fn test_history_prints_entries() {
        let mut env = Environment::new();
        env.history_mut().record(&cmd(&["ls", "-l", "-a"]));
        env.history_mut().record(&cmd(&[]));
        env.history_mut().record(&cmd(&["history"]));

        let (res, out, _) = run(&ShowHistory, &["history"], &mut env);

        assert_eq!(res.unwrap(), Flow::Continue);
        assert_eq!(out, " 1 ls -l\n 2 \n 3 history\n");
    }

    #[test]
    fn test_history_empty_prints_nothing() {
        let mut env = Environment::new();
        let (res, out, _) = run(&ShowHistory, &["history"], &mut env);
        assert!(res.is_ok());
        assert!(out.is_empty());
    }
}
