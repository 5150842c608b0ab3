//! In-memory audit trail of every guess submitted.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};

/// Number of entries shown when the log is displayed.
pub const RECENT_ENTRIES: usize = 20;

/// What the player submitted: raw text when it never parsed, else the number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptValue {
    Raw(String),
    Parsed(i32),
}

impl fmt::Display for AttemptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => write!(f, "{text:?}"),
            Self::Parsed(n) => write!(f, "{n}"),
        }
    }
}

impl From<i32> for AttemptValue {
    fn from(value: i32) -> Self {
        Self::Parsed(value)
    }
}

impl From<&str> for AttemptValue {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptLogEntry {
    pub value: AttemptValue,
    pub is_valid: bool,
    pub timestamp: DateTime<Local>,
}

impl fmt::Display for AttemptLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_valid { "VALID" } else { "INVALID" };
        write!(
            f,
            "[{}] {status} - Guess: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.value
        )
    }
}

/// Ring buffer that keeps only the most recent `capacity` attempts.
#[derive(Debug, Clone)]
pub struct AttemptLog {
    entries: VecDeque<AttemptLogEntry>,
    capacity: usize,
}

impl AttemptLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an attempt stamped with the current local time.
    pub fn log_attempt(&mut self, value: impl Into<AttemptValue>, is_valid: bool) {
        self.push(AttemptLogEntry {
            value: value.into(),
            is_valid,
            timestamp: Local::now(),
        });
    }

    pub fn push(&mut self, entry: AttemptLogEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AttemptLogEntry> {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<AttemptLogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }
}
