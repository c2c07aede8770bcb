//! Bounded activity stream.

use std::collections::VecDeque;

use crate::types::LogEntry;

/// Maximum number of entries kept; older entries are dropped silently.
pub const LOG_CAPACITY: usize = 50;

/// Newest-first log of recorded events with fixed capacity.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_CAPACITY + 1),
        }
    }

    /// Prepend an entry, evicting from the tail past [`LOG_CAPACITY`].
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(LOG_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Entries newest first (display order).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// Entries oldest first (report order).
    pub fn chronological(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogKind;

    fn entry(n: usize) -> LogEntry {
        LogEntry {
            id: format!("id-{n}"),
            timestamp: "10:00:00".to_string(),
            kind: LogKind::Note,
            label: format!("entry {n}"),
            detail: None,
        }
    }

    #[test]
    fn test_push_is_newest_first() {
        let mut log = ActivityLog::new();
        log.push(entry(1));
        log.push(entry(2));

        assert_eq!(log.latest().unwrap().label, "entry 2");
        let chronological: Vec<_> = log.chronological().map(|e| e.label.as_str()).collect();
        assert_eq!(chronological, vec!["entry 1", "entry 2"]);
    }

    #[test]
    fn test_capacity_keeps_most_recent() {
        let mut log = ActivityLog::new();
        for n in 0..60 {
            log.push(entry(n));
        }

        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.iter().next().unwrap().label, "entry 59");
        assert_eq!(log.iter().last().unwrap().label, "entry 10");
    }

    #[test]
    fn test_clear() {
        let mut log = ActivityLog::new();
        log.push(entry(1));
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}
