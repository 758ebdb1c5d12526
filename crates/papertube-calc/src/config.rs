//! Engine configuration

use crate::core::history::Tape;
use crate::core::{format::DEFAULT_SIGNIFICANT_DIGITS, AngleMode, CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the calculator engine
///
/// Loaded from JSON; every field is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest display text digit entry may produce
    pub max_entry_len: usize,
    /// Significant digits shown for computed results
    pub significant_digits: usize,
    /// Number of resolved calculations kept on the tape
    pub tape_capacity: usize,
    /// Angle mode a fresh calculator starts in
    pub angle_mode: AngleMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_entry_len: Self::DEFAULT_MAX_ENTRY_LEN,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            tape_capacity: Tape::DEFAULT_CAPACITY,
            angle_mode: AngleMode::Degrees,
        }
    }
}

impl EngineConfig {
    /// Default limit on display text length during entry
    pub const DEFAULT_MAX_ENTRY_LEN: usize = 30;

    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry length limit
    #[must_use]
    pub const fn with_max_entry_len(mut self, len: usize) -> Self {
        self.max_entry_len = len;
        self
    }

    /// Set the significant digits shown
    #[must_use]
    pub const fn with_significant_digits(mut self, digits: usize) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Set the tape capacity
    #[must_use]
    pub const fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape_capacity = capacity;
        self
    }

    /// Set the initial angle mode
    #[must_use]
    pub const fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Checks that every field is in range
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_entry_len == 0 {
            return Err(CalcError::config("max_entry_len must be at least 1"));
        }
        if !(1..=17).contains(&self.significant_digits) {
            return Err(CalcError::config(format!(
                "significant_digits must be between 1 and 17, got {}",
                self.significant_digits
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CalcError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file
    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }
}
