use std::collections::VecDeque;

/// Maximum number of snapshots the log retains.
pub const MAX_HISTORY_SIZE: usize = 20;

/// Bounded log of past document snapshots, oldest first.
///
/// Appending an exact duplicate of the newest entry is a no-op, so edits
/// that round-trip back to the same text don't flood the log. At capacity
/// the oldest entry is evicted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryLog {
    entries: VecDeque<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Append `snapshot` unless it repeats the newest entry. Returns whether
    /// the log changed.
    pub fn push(&mut self, snapshot: &str) -> bool {
        if self.entries.back().is_some_and(|last| last == snapshot) {
            return false;
        }
        if self.entries.len() == MAX_HISTORY_SIZE {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot.to_string());
        true
    }

    /// Snapshot at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Newest snapshot.
    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Serialize as a JSON array of strings, newest last.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Rebuild from the persisted JSON array. Entries are re-pushed one by
    /// one, so hand-edited stores still come back deduplicated and capped.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<String> = serde_json::from_str(json)?;
        let mut log = Self::new();
        for entry in &entries {
            log.push(entry);
        }
        Ok(log)
    }
}
