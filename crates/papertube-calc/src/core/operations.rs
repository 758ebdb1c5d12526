//! Binary and unary operations
//!
//! Closed enums with exhaustive matches; an operator that is not listed here
//! cannot reach the engine.

use crate::core::{AngleMode, CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Largest factorial operand computed exactly; anything above overflows `f64`
pub const FACTORIAL_LIMIT: u32 = 170;

/// Binary operation queued as the pending operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Truncated remainder (mod)
    Modulo,
    /// Power (x^y)
    Power,
    /// y-th root of x
    Root,
    /// Logarithm of x in base y
    LogBase,
}

impl BinaryOp {
    /// Every binary operation, in keypad order
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Power,
        Self::Root,
        Self::LogBase,
    ];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "mod",
            Self::Power => "^",
            Self::Root => "yroot",
            Self::LogBase => "logy",
        }
    }

    /// Applies the operation to the accumulator `a` and the entered operand `b`
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Modulo => a % b,
            Self::Power => a.powf(b),
            Self::Root => a.powf(b.recip()),
            Self::LogBase => a.ln() / b.ln(),
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operation applied immediately to the displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Arcsine
    Asin,
    /// Arccosine
    Acos,
    /// Arctangent
    Atan,
    /// Base-10 logarithm
    Log10,
    /// Natural logarithm
    Ln,
    /// Square root
    Sqrt,
    /// Reciprocal (1/x)
    Invert,
    /// x²
    Square,
    /// x³
    Cube,
    /// n!
    Factorial,
    /// Sign change (±)
    Sign,
}

impl UnaryOp {
    /// Every unary operation, in keypad order
    pub const ALL: [Self; 14] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Log10,
        Self::Ln,
        Self::Sqrt,
        Self::Invert,
        Self::Square,
        Self::Cube,
        Self::Factorial,
        Self::Sign,
    ];

    /// Returns the button caption
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log10 => "log",
            Self::Ln => "ln",
            Self::Sqrt => "√",
            Self::Invert => "1/x",
            Self::Square => "x²",
            Self::Cube => "x³",
            Self::Factorial => "n!",
            Self::Sign => "±",
        }
    }

    /// Returns true for operations whose result depends on the angle mode
    #[must_use]
    pub const fn is_trigonometric(self) -> bool {
        matches!(
            self,
            Self::Sin | Self::Cos | Self::Tan | Self::Asin | Self::Acos | Self::Atan
        )
    }

    /// Evaluates the operation
    ///
    /// Only factorial rejects operands (negative, fractional or NaN); every
    /// other operation folds invalid input into `NaN`/`Infinity`.
    pub fn evaluate(self, x: f64, mode: AngleMode) -> CalcResult<f64> {
        let value = match self {
            Self::Sin => mode.angle_to_radians(x).sin(),
            Self::Cos => mode.angle_to_radians(x).cos(),
            Self::Tan => mode.angle_to_radians(x).tan(),
            Self::Asin => mode.radians_to_angle(x.asin()),
            Self::Acos => mode.radians_to_angle(x.acos()),
            Self::Atan => mode.radians_to_angle(x.atan()),
            Self::Log10 => x.log10(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
            Self::Invert => x.recip(),
            Self::Square => x * x,
            Self::Cube => x * x * x,
            Self::Factorial => factorial(x)?,
            Self::Sign => -x,
        };
        Ok(value)
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn factorial(x: f64) -> CalcResult<f64> {
    if x == f64::INFINITY {
        return Ok(f64::INFINITY);
    }
    if x.is_nan() || x < 0.0 || x.fract() != 0.0 {
        return Err(CalcError::InvalidOperand {
            op: UnaryOp::Factorial,
            value: x,
        });
    }
    if x > f64::from(FACTORIAL_LIMIT) {
        return Ok(f64::INFINITY);
    }
    let n = x as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}
