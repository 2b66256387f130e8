use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of retained entries. One over and the oldest entry is
/// evicted.
pub const LOG_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogDetail {
    pub message: String,
    #[serde(default)]
    pub trace: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub detail: Option<LogDetail>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, detail: Option<LogDetail>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            detail,
        }
    }
}

/// Append-only ring buffer backing the in-app log viewer. Persistence
/// and forwarding live with the renderer; this is only the bounded
/// storage contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a buffer from persisted entries, keeping only the
    /// newest `LOG_CAPACITY` of an oversized snapshot.
    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        let mut buffer = Self::new();
        for entry in entries {
            buffer.push(entry);
        }
        buffer
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries oldest-first, as a plain vector for JSON persistence.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{LOG_CAPACITY, LogBuffer, LogEntry, LogLevel};

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(LogLevel::Info, message, None)
    }

    #[test]
    fn capacity_overflow_evicts_the_oldest_entry() {
        let mut buffer = LogBuffer::new();
        for index in 0..=LOG_CAPACITY {
            buffer.push(entry(&format!("entry {index}")));
        }

        assert_eq!(buffer.len(), LOG_CAPACITY);
        let first = buffer.entries().next().expect("buffer not empty");
        assert_eq!(first.message, "entry 1");
        let last = buffer.entries().last().expect("buffer not empty");
        assert_eq!(last.message, format!("entry {LOG_CAPACITY}"));
    }

    #[test]
    fn from_entries_truncates_oversized_snapshots() {
        let entries: Vec<LogEntry> = (0..LOG_CAPACITY + 5)
            .map(|index| entry(&format!("entry {index}")))
            .collect();
        let buffer = LogBuffer::from_entries(entries);

        assert_eq!(buffer.len(), LOG_CAPACITY);
        let first = buffer.entries().next().expect("buffer not empty");
        assert_eq!(first.message, "entry 5");
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut buffer = LogBuffer::from_entries(vec![entry("a"), entry("b")]);
        assert!(!buffer.is_empty());
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut buffer = LogBuffer::new();
        buffer.push(entry("kept"));
        let json = serde_json::to_string(&buffer.snapshot()).expect("serialize");
        let restored: Vec<LogEntry> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(LogBuffer::from_entries(restored), buffer);
    }
}
