//! PaperTube Calculator Engine
//!
//! The arithmetic engine behind the PaperTube scientific calculator widget,
//! usable without any UI.
//!
//! # Semantics
//!
//! - **Immediate execution**: operators apply left to right as they are
//!   pressed, with no precedence (`2 + 3 × 4 =` shows `20`)
//! - **Pure reducer**: `(state, input) -> state`, see [`core::state::reduce`]
//! - **No exceptions**: division by zero and friends show `Infinity`/`NaN`
//! - **Memory survives Clear**: only MC resets the register
//!
//! # Example
//!
//! ```rust
//! use papertube_calc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! calc.press_all(parse_sequence("2 + 3 * 4 =").unwrap());
//! assert_eq!(calc.display(), "20");
//!
//! // The same thing through the reducer
//! let state = [Input::Digit(5), Input::Unary(UnaryOp::Factorial)]
//!     .into_iter()
//!     .fold(CalculatorState::new(), CalculatorState::reduce);
//! assert_eq!(state.display(), "120");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod calculator;
pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;
pub mod telemetry;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::Calculator;
    pub use crate::config::EngineConfig;
    pub use crate::core::format::{format_number, format_number_with, parse_display};
    pub use crate::core::history::{Tape, TapeEntry};
    pub use crate::core::state::{reduce, CalculatorState, Input, MemoryOp, Reduction};
    pub use crate::core::{AngleMode, BinaryOp, CalcError, CalcResult, UnaryOp};
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::keypad::{parse_sequence, Keypad, KeypadButton};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut calc = Calculator::new();
        calc.press_all(parse_sequence("6 * 7 =").unwrap());
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_reducer_direct() {
        let state = [
            Input::Digit(1),
            Input::Binary(BinaryOp::Divide),
            Input::Digit(0),
            Input::Equals,
        ]
        .into_iter()
        .fold(CalculatorState::new(), CalculatorState::reduce);
        assert_eq!(state.display(), "Infinity");
    }

    #[test]
    fn test_keypad_click_to_display() {
        let keypad = Keypad::scientific();
        let mut calc = Calculator::new();
        for id in ["btn-9", "btn-sqrt", "btn-plus", "btn-1", "btn-equals"] {
            calc.press(keypad.handle_click(id).unwrap());
        }
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn test_trig_ops_flagged() {
        let trig: Vec<_> = UnaryOp::ALL
            .into_iter()
            .filter(|op| op.is_trigonometric())
            .collect();
        assert_eq!(trig.len(), 6);
        assert!(!UnaryOp::Sqrt.is_trigonometric());
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number_with(2.0 / 3.0, 3), "0.667");
        assert_eq!(parse_display("12."), 12.0);
    }
}
