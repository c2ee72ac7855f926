//! Bounded calculation history

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::format_general;

/// A single entry in the calculation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression that was evaluated
    pub expression: String,
    /// The result of the calculation
    pub result: f64,
    /// When the calculation was performed (Unix epoch millis)
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates a new history entry stamped with the current time
    #[must_use]
    pub fn new(expression: String, result: f64) -> Self {
        Self {
            expression,
            result,
            timestamp: Self::current_timestamp(),
        }
    }

    /// Creates a history entry with a specific timestamp
    #[must_use]
    pub fn with_timestamp(expression: String, result: f64, timestamp: u64) -> Self {
        Self {
            expression,
            result,
            timestamp,
        }
    }

    fn current_timestamp() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Returns `"<expression> = <result>"`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, format_general(self.result))
    }
}

/// Calculator history.
///
/// Holds at most `max_entries` entries; the oldest is discarded first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 50;

    /// Creates a new history with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history with custom maximum size
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Adds an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.max_entries == 0 {
            return;
        }
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Adds a calculation result to the history
    pub fn record(&mut self, expression: &str, result: f64) {
        self.push(HistoryEntry::new(expression.to_string(), result));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Returns the oldest entry
    #[must_use]
    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Returns the display lines, newest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.iter_rev().map(HistoryEntry::display).collect()
    }

    /// Serializes the entries (oldest first) to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_new() {
        let entry = HistoryEntry::new("2 + 2".into(), 4.0);
        assert_eq!(entry.expression, "2 + 2");
        assert_eq!(entry.result, 4.0);
        assert!(entry.timestamp > 0);
    }

    #[test]
    fn test_history_entry_display() {
        let entry = HistoryEntry::with_timestamp("5 + 3".into(), 8.0, 1);
        assert_eq!(entry.display(), "5 + 3 = 8");
    }

    #[test]
    fn test_history_entry_display_general_format() {
        let entry = HistoryEntry::with_timestamp("1/3".into(), 1.0 / 3.0, 1);
        assert_eq!(entry.display(), "1/3 = 0.3333333333333333");
        let entry = HistoryEntry::with_timestamp("big".into(), 1e22, 1);
        assert_eq!(entry.display(), "big = 1e+22");
    }

    #[test]
    fn test_history_entry_serialize() {
        let entry = HistoryEntry::with_timestamp("2*3".into(), 6.0, 1000);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"expression\":\"2*3\""));
        assert!(json.contains("\"result\":6.0"));
        assert!(json.contains("\"timestamp\":1000"));
    }

    // ===== History tests =====

    #[test]
    fn test_history_new() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), 50);
    }

    #[test]
    fn test_history_record() {
        let mut history = History::new();
        history.record("3 + 4", 7.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().expression, "3 + 4");
    }

    #[test]
    fn test_history_max_entries_enforcement() {
        let mut history = History::with_capacity(3);
        for i in 1..=4 {
            history.record(&i.to_string(), f64::from(i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.first().unwrap().result, 2.0);
        assert_eq!(history.last().unwrap().result, 4.0);
    }

    #[test]
    fn test_history_default_cap() {
        let mut history = History::new();
        for i in 0..75 {
            history.record("x", f64::from(i));
        }
        assert_eq!(history.len(), 50);
        assert_eq!(history.first().unwrap().result, 25.0);
    }

    #[test]
    fn test_history_zero_capacity() {
        let mut history = History::with_capacity(0);
        history.record("1", 1.0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_iter_orders() {
        let mut history = History::new();
        history.record("a", 1.0);
        history.record("b", 2.0);
        history.record("c", 3.0);

        let oldest_first: Vec<f64> = history.iter().map(|e| e.result).collect();
        assert_eq!(oldest_first, vec![1.0, 2.0, 3.0]);
        let newest_first: Vec<f64> = history.iter_rev().map(|e| e.result).collect();
        assert_eq!(newest_first, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_history_lines_newest_first() {
        let mut history = History::new();
        history.push(HistoryEntry::with_timestamp("1+1".into(), 2.0, 1));
        history.push(HistoryEntry::with_timestamp("2*3".into(), 6.0, 2));
        assert_eq!(history.lines(), vec!["2*3 = 6", "1+1 = 2"]);
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.record("1", 1.0);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_to_json() {
        let mut history = History::new();
        history.push(HistoryEntry::with_timestamp("1+1".into(), 2.0, 1000));
        history.push(HistoryEntry::with_timestamp("2+2".into(), 4.0, 2000));

        let json = history.to_json().unwrap();
        let parsed: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].expression, "1+1");
    }
}
