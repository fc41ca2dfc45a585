use crate::core::output::CommandOutput;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub command: String,
    pub output: CommandOutput,
}

/// Scrollback of executed commands. Entries are only ever appended, or all
/// dropped at once by `clear`.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    clears: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.clears += 1;
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monotonic counter bumped on every `clear`, so callers can tell whether
    /// the history was cleared while they were working.
    pub fn generation(&self) -> u64 {
        self.clears
    }

    /// Previously entered command lines, oldest first, skipping blanks.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|e| e.command.as_str())
            .filter(|c| !c.trim().is_empty())
    }
}
