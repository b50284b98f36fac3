use crate::history::History;
use anyhow::{Context, Result};
use std::env as stdenv;
use std::path::Path;
use tracing::debug;

/// State shared by one interactive session.
///
/// The environment owns the session [`History`]. The working directory is
/// process-global; this type only wraps access to it so builtins go through one place.
#[derive(Debug, Default)]
pub struct Environment {
    history: History,
}

impl Environment {
    /// Create an environment with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Change the process working directory.
    ///
    /// Relative paths resolve against the current working directory. On failure the
    /// directory is left unchanged and the OS error is kept as the cause.
    pub fn set_current_dir(&mut self, dir: &Path) -> Result<()> {
        stdenv::set_current_dir(dir).with_context(|| format!("cd: {}", dir.display()))?;
        debug!(dir = %dir.display(), "changed working directory");
        Ok(())
    }
}
