//! Calculation tape
//!
//! Every binary resolution (an operator press that folds the pending
//! operator, or equals) is recorded as one entry. The tape is bounded so a
//! long session cannot grow it without limit.

use crate::core::format::format_number;
use crate::core::BinaryOp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One resolved binary calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// Accumulator before the operation
    #[serde(with = "crate::core::format::display_float")]
    pub lhs: f64,
    /// The applied operation
    pub op: BinaryOp,
    /// Operand taken from the display
    #[serde(with = "crate::core::format::display_float")]
    pub rhs: f64,
    /// Result of the operation
    #[serde(with = "crate::core::format::display_float")]
    pub result: f64,
}

impl TapeEntry {
    /// Creates a new tape entry
    #[must_use]
    pub const fn new(lhs: f64, op: BinaryOp, rhs: f64, result: f64) -> Self {
        Self {
            lhs,
            op,
            rhs,
            result,
        }
    }

    /// Returns a formatted line such as `2 + 3 = 5`
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} {} {} = {}",
            format_number(self.lhs),
            self.op,
            format_number(self.rhs),
            format_number(self.result)
        )
    }
}

/// Bounded history of resolved calculations
#[derive(Debug, Clone, PartialEq)]
pub struct Tape {
    entries: VecDeque<TapeEntry>,
    capacity: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Default maximum number of entries
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a tape with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a tape holding at most `capacity` entries
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Adds an entry, evicting the oldest one when full
    pub fn push(&mut self, entry: TapeEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the tape is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&TapeEntry> {
        self.entries.back()
    }

    /// Returns the entry at `index` (0 = oldest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TapeEntry> {
        self.entries.get(index)
    }

    /// Formatted lines, oldest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(TapeEntry::display).collect()
    }

    /// Serializes the entries to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Restores a tape from JSON, keeping the newest `capacity` entries
    pub fn from_json(json: &str, capacity: usize) -> Result<Self, serde_json::Error> {
        let entries: Vec<TapeEntry> = serde_json::from_str(json)?;
        let mut tape = Self::with_capacity(capacity);
        for entry in entries {
            tape.push(entry);
        }
        Ok(tape)
    }
}
