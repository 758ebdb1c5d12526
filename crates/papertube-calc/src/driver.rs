//! Calculator driver
//!
//! One trait for "press keys, read the display", so a scenario is written
//! once and replayed against any front end bound to the engine.

use crate::calculator::Calculator;
use crate::config::EngineConfig;
use crate::core::state::Input;
use crate::core::CalcResult;
use crate::keypad::parse_sequence;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use papertube_calc::prelude::*;
///
/// fn left_to_right<D: CalculatorDriver>(driver: &mut D) {
///     driver.press_sequence("2 + 3 * 4 =").unwrap();
///     assert_eq!(driver.display(), "20");
/// }
///
/// left_to_right(&mut EngineDriver::new());
/// ```
pub trait CalculatorDriver {
    /// Presses a single key
    fn press(&mut self, input: Input);

    /// Gets the current display text
    fn display(&self) -> String;

    /// Presses Clear
    fn clear(&mut self) {
        self.press(Input::Clear);
    }

    /// Gets the calculation tape (oldest first)
    fn tape(&self) -> Vec<String>;

    /// Presses every key of a whitespace-separated sequence
    ///
    /// Nothing is pressed if any token is unknown.
    fn press_sequence(&mut self, keys: &str) -> CalcResult<()> {
        for input in parse_sequence(keys)? {
            self.press(input);
        }
        Ok(())
    }
}

/// Driver that talks to the engine directly
#[derive(Debug, Clone, Default)]
pub struct EngineDriver {
    calculator: Calculator,
}

impl EngineDriver {
    /// Creates a driver over a default calculator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over a calculator with a custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            calculator: Calculator::with_config(config),
        }
    }

    /// Returns a reference to the underlying calculator
    #[must_use]
    pub const fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Returns a mutable reference to the underlying calculator
    pub fn calculator_mut(&mut self) -> &mut Calculator {
        &mut self.calculator
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, input: Input) {
        self.calculator.press(input);
    }

    fn display(&self) -> String {
        self.calculator.display().to_string()
    }

    fn tape(&self) -> Vec<String> {
        self.calculator.tape().lines()
    }
}
