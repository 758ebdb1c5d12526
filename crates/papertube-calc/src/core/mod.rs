//! Core calculator engine
//!
//! Arithmetic never fails here: division by zero, logarithms of negative
//! numbers and the like produce `Infinity`/`NaN`, which are ordinary display
//! states. [`CalcError`] only covers the edges around the engine.

pub mod format;
pub mod history;
mod operations;
pub mod state;

pub use operations::{BinaryOp, UnaryOp, FACTORIAL_LIMIT};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum CalcError {
    /// A token or keyboard key that maps to no calculator key
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// A unary operation received an operand outside its domain
    #[error("Invalid operand {value} for {op}")]
    InvalidOperand {
        /// The operation that rejected the operand
        op: UnaryOp,
        /// The rejected operand
        #[serde(with = "crate::core::format::display_float")]
        value: f64,
    },

    /// Engine configuration could not be loaded or is out of range
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// How trigonometric operations interpret and report angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Angles in degrees
    #[default]
    Degrees,
    /// Angles in radians
    Radians,
}

impl AngleMode {
    /// Returns the other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Converts an angle in this mode to radians
    #[must_use]
    pub fn angle_to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    /// Converts an angle in radians to this mode
    #[must_use]
    pub fn radians_to_angle(self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians.to_degrees(),
            Self::Radians => radians,
        }
    }

    /// Short indicator shown next to the display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degrees => "DEG",
            Self::Radians => "RAD",
        }
    }
}

impl std::fmt::Display for AngleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AngleMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            _ => Err(CalcError::config(format!("unknown angle mode '{s}'"))),
        }
    }
}
