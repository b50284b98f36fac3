//! Append-only log of the lines entered during a session.

use crate::command::Command;
use std::fmt;
use tracing::debug;

/// One recorded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    seq: usize,
    label: String,
}

impl HistoryEntry {
    /// 1-based sequence number.
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// The command name joined with its first argument, if any.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {} {}", self.seq, self.label)
    }
}

/// Ordered session history. Entries are never removed or changed once recorded.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry for `command` and returns it.
    ///
    /// Only the first two tokens make it into the label; anything after the first
    /// argument is dropped. Blank lines are recorded with an empty label.
    pub fn record(&mut self, command: &Command) -> &HistoryEntry {
        let label = command
            .tokens()
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let seq = self.entries.len() + 1;
        debug!(seq, label = %label, "recorded history entry");
        self.entries.push(HistoryEntry { seq, label });
        &self.entries[seq - 1]
    }

    /// Entries in the order they were recorded.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
