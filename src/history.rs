/// Submitted-line history with a browse position.
///
/// `pos == len()` means the user is on the live line rather than on an
/// entry. Entries are only ever appended.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    pos: usize,
    enabled: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty, enabled history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pos: 0,
            enabled: true,
        }
    }

    /// Add a submitted line to history
    ///
    /// Empty lines are skipped, and nothing is recorded while disabled.
    pub fn add(&mut self, line: &str) {
        if !self.enabled || line.is_empty() {
            return;
        }

        self.entries.push(line.to_owned());
        self.pos = self.entries.len();
        tracing::debug!(entries = self.entries.len(), "history entry added");
    }

    /// Step back to the previous entry
    ///
    /// Returns `None` when already at the oldest entry.
    pub fn prev(&mut self) -> Option<&str> {
        if self.pos == 0 {
            return None;
        }

        self.pos -= 1;
        Some(&self.entries[self.pos])
    }

    /// Step forward to the next entry
    ///
    /// Returns `None` both when already on the live line and when this step
    /// lands back on it; check [`History::is_browsing`] to tell them apart.
    pub fn next(&mut self) -> Option<&str> {
        if self.pos >= self.entries.len() {
            return None;
        }

        self.pos += 1;
        self.entries.get(self.pos).map(String::as_str)
    }

    /// Current browse position
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// True while an entry rather than the live line is selected
    pub fn is_browsing(&self) -> bool {
        self.pos < self.entries.len()
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the number of entries in history
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an iterator over history entries (oldest to newest)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    /// Get an iterator over history entries in reverse (newest to oldest)
    pub fn iter_rev(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().map(|s| s.as_str())
    }
}
