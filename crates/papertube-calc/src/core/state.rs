//! Calculator state and the pure reducer that advances it
//!
//! Immediate execution: a binary operator resolves whatever is pending
//! before queuing itself, so `2 + 3 × 4 =` yields `20`, not `14`.

use crate::config::EngineConfig;
use crate::core::format::{format_number_with, is_editable, parse_display};
use crate::core::history::TapeEntry;
use crate::core::{AngleMode, BinaryOp, CalcError, UnaryOp};
use serde::{Deserialize, Serialize};

/// Memory register commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryOp {
    /// MS: store the display
    Store,
    /// MR: recall into the display
    Recall,
    /// MC: reset to zero
    Clear,
    /// M+: add the display
    Add,
    /// M−: subtract the display
    Subtract,
}

/// A single discrete input to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    /// Digit 0-9; anything above 9 is ignored
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Remove the last entered character
    Backspace,
    /// Reset display, accumulator and pending operator
    Clear,
    /// Queue a binary operation
    Binary(BinaryOp),
    /// Resolve the pending operation
    Equals,
    /// Apply a unary operation to the display
    Unary(UnaryOp),
    /// Memory register command
    Memory(MemoryOp),
    /// Flip between degrees and radians
    ToggleAngleMode,
    /// Select an angle mode
    SetAngleMode(AngleMode),
}

/// Complete calculator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    display: String,
    #[serde(with = "crate::core::format::display_float")]
    accumulator: f64,
    pending_operator: Option<BinaryOp>,
    #[serde(with = "crate::core::format::display_float")]
    memory: f64,
    angle_mode: AngleMode,
    awaiting_new_entry: bool,
    fault: Option<CalcError>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a zeroed state in degrees mode
    #[must_use]
    pub fn new() -> Self {
        Self::with_angle_mode(AngleMode::Degrees)
    }

    /// Creates a zeroed state in the given angle mode
    #[must_use]
    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        Self {
            display: "0".to_string(),
            accumulator: 0.0,
            pending_operator: None,
            memory: 0.0,
            angle_mode,
            awaiting_new_entry: false,
            fault: None,
        }
    }

    /// Text currently shown
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Numeric value of the display
    #[must_use]
    pub fn value(&self) -> f64 {
        parse_display(&self.display)
    }

    /// Running total used by binary operations
    #[must_use]
    pub const fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Queued binary operation, if any
    #[must_use]
    pub const fn pending_operator(&self) -> Option<BinaryOp> {
        self.pending_operator
    }

    /// Memory register
    #[must_use]
    pub const fn memory(&self) -> f64 {
        self.memory
    }

    /// Current angle mode
    #[must_use]
    pub const fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// True when the next digit starts a fresh number
    #[must_use]
    pub const fn is_awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    /// Domain error raised by the last input, if any
    #[must_use]
    pub const fn fault(&self) -> Option<&CalcError> {
        self.fault.as_ref()
    }

    /// Applies one input with the default configuration
    #[must_use]
    pub fn reduce(self, input: Input) -> Self {
        reduce(self, input, &EngineConfig::default()).state
    }
}

/// Outcome of one reducer step
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// State after the input
    pub state: CalculatorState,
    /// Binary calculation resolved during the step, if any
    pub evaluation: Option<TapeEntry>,
}

/// Applies one input to a state
///
/// Never fails: invalid results show up as `Infinity`/`NaN` in the display,
/// and domain errors are additionally recorded in [`CalculatorState::fault`].
#[must_use]
pub fn reduce(mut state: CalculatorState, input: Input, config: &EngineConfig) -> Reduction {
    let format = |value: f64| format_number_with(value, config.significant_digits);
    let mut evaluation = None;
    state.fault = None;

    match input {
        Input::Digit(d) => {
            if let Some(ch) = char::from_digit(u32::from(d), 10) {
                enter_digit(&mut state, ch, config.max_entry_len);
            }
        }
        Input::Decimal => {
            if state.awaiting_new_entry || !is_editable(&state.display) {
                state.display = "0.".to_string();
                state.awaiting_new_entry = false;
            } else if !state.display.contains('.') && state.display.len() < config.max_entry_len {
                state.display.push('.');
            }
        }
        Input::Backspace => {
            if is_editable(&state.display) {
                state.display.pop();
                if state.display.is_empty() || state.display == "-" {
                    state.display = "0".to_string();
                }
            } else {
                state.display = "0".to_string();
            }
            state.awaiting_new_entry = false;
        }
        Input::Clear => {
            state.display = "0".to_string();
            state.accumulator = 0.0;
            state.pending_operator = None;
            state.awaiting_new_entry = false;
        }
        Input::Binary(op) => {
            let operand = state.value();
            if let Some(pending) = state.pending_operator {
                let entry = resolve(state.accumulator, pending, operand);
                state.accumulator = entry.result;
                state.display = format(entry.result);
                evaluation = Some(entry);
            } else {
                state.accumulator = operand;
            }
            state.pending_operator = Some(op);
            state.awaiting_new_entry = true;
        }
        Input::Equals => {
            if let Some(pending) = state.pending_operator.take() {
                let entry = resolve(state.accumulator, pending, state.value());
                state.display = format(entry.result);
                state.accumulator = 0.0;
                state.awaiting_new_entry = true;
                evaluation = Some(entry);
            }
        }
        Input::Unary(op) => {
            let operand = state.value();
            let result = match op.evaluate(operand, state.angle_mode) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(error = %err, "unary operation rejected operand");
                    state.fault = Some(err);
                    f64::NAN
                }
            };
            state.display = format(result);
            state.awaiting_new_entry = true;
        }
        Input::Memory(op) => apply_memory(&mut state, op, format),
        Input::ToggleAngleMode => state.angle_mode = state.angle_mode.toggled(),
        Input::SetAngleMode(mode) => state.angle_mode = mode,
    }

    Reduction { state, evaluation }
}

fn enter_digit(state: &mut CalculatorState, digit: char, max_len: usize) {
    if state.awaiting_new_entry || !is_editable(&state.display) {
        state.display = digit.to_string();
        state.awaiting_new_entry = false;
    } else if state.display == "0" {
        state.display = digit.to_string();
    } else if state.display == "-0" {
        state.display = format!("-{digit}");
    } else if state.display.len() < max_len {
        state.display.push(digit);
    }
}

fn resolve(lhs: f64, op: BinaryOp, rhs: f64) -> TapeEntry {
    let result = op.apply(lhs, rhs);
    tracing::debug!(lhs, op = %op, rhs, result, "resolved binary operation");
    TapeEntry::new(lhs, op, rhs, result)
}

fn apply_memory(state: &mut CalculatorState, op: MemoryOp, format: impl Fn(f64) -> String) {
    match op {
        MemoryOp::Store => {
            state.memory = state.value();
            state.awaiting_new_entry = true;
        }
        MemoryOp::Recall => {
            state.display = format(state.memory);
            state.awaiting_new_entry = true;
        }
        MemoryOp::Clear => state.memory = 0.0,
        MemoryOp::Add => {
            state.memory += state.value();
            state.awaiting_new_entry = true;
        }
        MemoryOp::Subtract => {
            state.memory -= state.value();
            state.awaiting_new_entry = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(state: CalculatorState, text: &str) -> CalculatorState {
        text.chars().fold(state, |s, ch| match ch {
            '.' => s.reduce(Input::Decimal),
            _ => s.reduce(Input::Digit(ch.to_digit(10).unwrap() as u8)),
        })
    }

    fn run(inputs: &[Input]) -> CalculatorState {
        inputs
            .iter()
            .fold(CalculatorState::new(), |s, &input| s.reduce(input))
    }

    // ===== Entry =====

    #[test]
    fn test_new_state() {
        let state = CalculatorState::new();
        assert_eq!(state.display(), "0");
        assert_eq!(state.accumulator(), 0.0);
        assert_eq!(state.pending_operator(), None);
        assert_eq!(state.memory(), 0.0);
        assert_eq!(state.angle_mode(), AngleMode::Degrees);
        assert!(!state.is_awaiting_new_entry());
        assert!(state.fault().is_none());
    }

    #[test]
    fn test_digit_entry_appends() {
        assert_eq!(digits(CalculatorState::new(), "123").display(), "123");
    }

    #[test]
    fn test_leading_zero_suppressed() {
        assert_eq!(digits(CalculatorState::new(), "007").display(), "7");
    }

    #[test]
    fn test_zero_point_keeps_zero() {
        assert_eq!(digits(CalculatorState::new(), "0.05").display(), "0.05");
    }

    #[test]
    fn test_digit_above_nine_ignored() {
        let state = CalculatorState::new().reduce(Input::Digit(12));
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_entry_length_limit() {
        let state = digits(CalculatorState::new(), &"9".repeat(35));
        assert_eq!(state.display().len(), 30);
    }

    #[test]
    fn test_custom_entry_length_limit() {
        let config = EngineConfig::new().with_max_entry_len(4);
        let state = "123456".chars().fold(CalculatorState::new(), |s, ch| {
            let d = ch.to_digit(10).unwrap() as u8;
            reduce(s, Input::Digit(d), &config).state
        });
        assert_eq!(state.display(), "1234");
    }

    #[test]
    fn test_decimal_respects_length_limit() {
        let config = EngineConfig::new().with_max_entry_len(4);
        let state = [
            Input::Digit(1),
            Input::Digit(2),
            Input::Digit(3),
            Input::Digit(4),
            Input::Decimal,
        ]
        .into_iter()
        .fold(CalculatorState::new(), |s, input| reduce(s, input, &config).state);
        assert_eq!(state.display(), "1234");
    }

    #[test]
    fn test_decimal_entry() {
        let state = digits(CalculatorState::new(), "12.");
        assert_eq!(state.display(), "12.");
        assert_eq!(state.value(), 12.0);
    }

    #[test]
    fn test_second_decimal_is_noop() {
        assert_eq!(digits(CalculatorState::new(), "1.2.3").display(), "1.23");
    }

    #[test]
    fn test_decimal_after_operator_starts_zero_point() {
        let state = digits(CalculatorState::new(), "5").reduce(Input::Binary(BinaryOp::Add));
        let state = digits(state, ".5");
        assert_eq!(state.display(), "0.5");
    }

    #[test]
    fn test_digit_after_sign_of_zero() {
        let state = CalculatorState::new().reduce(Input::Unary(UnaryOp::Sign));
        assert_eq!(state.display(), "0");
        assert_eq!(digits(state, "4").display(), "4");
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_removes_last() {
        let state = digits(CalculatorState::new(), "123").reduce(Input::Backspace);
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn test_backspace_to_empty_resets() {
        let state = digits(CalculatorState::new(), "7").reduce(Input::Backspace);
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_backspace_negative_single_digit() {
        let state = digits(CalculatorState::new(), "7")
            .reduce(Input::Unary(UnaryOp::Sign))
            .reduce(Input::Backspace);
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_backspace_on_infinity_resets() {
        let state = run(&[
            Input::Digit(1),
            Input::Binary(BinaryOp::Divide),
            Input::Digit(0),
            Input::Equals,
            Input::Backspace,
        ]);
        assert_eq!(state.display(), "0");
    }

    // ===== Clear =====

    #[test]
    fn test_clear_resets_but_keeps_memory() {
        let state = run(&[
            Input::Digit(9),
            Input::Memory(MemoryOp::Store),
            Input::Digit(4),
            Input::Binary(BinaryOp::Add),
            Input::Digit(2),
            Input::ToggleAngleMode,
            Input::Clear,
        ]);
        assert_eq!(state.display(), "0");
        assert_eq!(state.accumulator(), 0.0);
        assert_eq!(state.pending_operator(), None);
        assert_eq!(state.memory(), 9.0);
        assert_eq!(state.angle_mode(), AngleMode::Radians);
    }

    // ===== Binary operators =====

    #[test]
    fn test_left_to_right_no_precedence() {
        let state = run(&[
            Input::Digit(2),
            Input::Binary(BinaryOp::Add),
            Input::Digit(3),
            Input::Binary(BinaryOp::Multiply),
            Input::Digit(4),
            Input::Equals,
        ]);
        assert_eq!(state.display(), "20");
    }

    #[test]
    fn test_chained_operator_shows_intermediate() {
        let state = run(&[
            Input::Digit(2),
            Input::Binary(BinaryOp::Add),
            Input::Digit(3),
            Input::Binary(BinaryOp::Multiply),
        ]);
        assert_eq!(state.display(), "5");
        assert_eq!(state.accumulator(), 5.0);
        assert_eq!(state.pending_operator(), Some(BinaryOp::Multiply));
        assert!(state.is_awaiting_new_entry());
    }

    #[test]
    fn test_first_operator_copies_display() {
        let state = digits(CalculatorState::new(), "12").reduce(Input::Binary(BinaryOp::Subtract));
        assert_eq!(state.accumulator(), 12.0);
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn test_operator_twice_resolves_with_display() {
        let state = run(&[
            Input::Digit(2),
            Input::Binary(BinaryOp::Add),
            Input::Binary(BinaryOp::Add),
        ]);
        assert_eq!(state.display(), "4");
    }

    #[test]
    fn test_float_noise_hidden() {
        let state = digits(CalculatorState::new(), "0.1").reduce(Input::Binary(BinaryOp::Add));
        let state = digits(state, "0.2").reduce(Input::Equals);
        assert_eq!(state.display(), "0.3");
    }

    #[test]
    fn test_divide_by_zero_is_infinity() {
        let state = run(&[
            Input::Digit(5),
            Input::Binary(BinaryOp::Divide),
            Input::Digit(0),
            Input::Equals,
        ]);
        assert_eq!(state.display(), "Infinity");
        assert!(state.fault().is_none());
    }

    #[test]
    fn test_zero_over_zero_is_nan() {
        let state = run(&[
            Input::Digit(0),
            Input::Binary(BinaryOp::Divide),
            Input::Digit(0),
            Input::Equals,
        ]);
        assert_eq!(state.display(), "NaN");
    }

    #[test]
    fn test_modulo_by_zero_is_nan() {
        let state = run(&[
            Input::Digit(7),
            Input::Binary(BinaryOp::Modulo),
            Input::Digit(0),
            Input::Equals,
        ]);
        assert_eq!(state.display(), "NaN");
    }

    #[test]
    fn test_power_root_log_base() {
        let power = run(&[
            Input::Digit(2),
            Input::Binary(BinaryOp::Power),
            Input::Digit(8),
            Input::Equals,
        ]);
        assert_eq!(power.display(), "256");

        let root = run(&[
            Input::Digit(8),
            Input::Binary(BinaryOp::Root),
            Input::Digit(3),
            Input::Equals,
        ]);
        assert_eq!(root.display(), "2");

        let log = run(&[
            Input::Digit(8),
            Input::Binary(BinaryOp::LogBase),
            Input::Digit(2),
            Input::Equals,
        ]);
        assert_eq!(log.display(), "3");
    }

    // ===== Equals =====

    #[test]
    fn test_equals_clears_pending_and_accumulator() {
        let state = run(&[
            Input::Digit(6),
            Input::Binary(BinaryOp::Multiply),
            Input::Digit(7),
            Input::Equals,
        ]);
        assert_eq!(state.display(), "42");
        assert_eq!(state.pending_operator(), None);
        assert_eq!(state.accumulator(), 0.0);
        assert!(state.is_awaiting_new_entry());
    }

    #[test]
    fn test_repeated_equals_is_noop() {
        let once = run(&[
            Input::Digit(6),
            Input::Binary(BinaryOp::Add),
            Input::Digit(1),
            Input::Equals,
        ]);
        let twice = once.clone().reduce(Input::Equals);
        assert_eq!(once, twice);
        assert_eq!(twice.display(), "7");
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let state = digits(CalculatorState::new(), "15");
        assert_eq!(state.clone().reduce(Input::Equals), state);
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        let state = run(&[
            Input::Digit(1),
            Input::Binary(BinaryOp::Add),
            Input::Digit(1),
            Input::Equals,
            Input::Digit(9),
        ]);
        assert_eq!(state.display(), "9");
    }

    #[test]
    fn test_reduction_reports_evaluation() {
        let state = digits(CalculatorState::new(), "2").reduce(Input::Binary(BinaryOp::Add));
        let state = digits(state, "3");
        let step = reduce(state, Input::Equals, &EngineConfig::default());
        let entry = step.evaluation.unwrap();
        assert_eq!(entry, TapeEntry::new(2.0, BinaryOp::Add, 3.0, 5.0));

        let step = reduce(step.state, Input::Equals, &EngineConfig::default());
        assert!(step.evaluation.is_none());
    }

    // ===== Unary operators =====

    #[test]
    fn test_factorial() {
        let state = digits(CalculatorState::new(), "5").reduce(Input::Unary(UnaryOp::Factorial));
        assert_eq!(state.display(), "120");
        assert!(state.is_awaiting_new_entry());
    }

    #[test]
    fn test_factorial_overflow_is_infinity() {
        let state =
            digits(CalculatorState::new(), "171").reduce(Input::Unary(UnaryOp::Factorial));
        assert_eq!(state.display(), "Infinity");
        assert!(state.fault().is_none());
    }

    #[test]
    fn test_factorial_of_fraction_faults() {
        let state =
            digits(CalculatorState::new(), "2.5").reduce(Input::Unary(UnaryOp::Factorial));
        assert_eq!(state.display(), "NaN");
        assert!(matches!(
            state.fault(),
            Some(CalcError::InvalidOperand {
                op: UnaryOp::Factorial,
                ..
            })
        ));
        let state = state.reduce(Input::Clear);
        assert!(state.fault().is_none());
    }

    #[test]
    fn test_sin_degrees_and_radians() {
        let degrees = digits(CalculatorState::new(), "30").reduce(Input::Unary(UnaryOp::Sin));
        assert_eq!(degrees.display(), "0.5");

        let radians = digits(CalculatorState::with_angle_mode(AngleMode::Radians), "30")
            .reduce(Input::Unary(UnaryOp::Sin));
        assert_eq!(radians.display(), "-0.9880316241");
    }

    #[test]
    fn test_asin_reports_degrees() {
        let state = digits(CalculatorState::new(), "0.5").reduce(Input::Unary(UnaryOp::Asin));
        assert_eq!(state.display(), "30");
    }

    #[test]
    fn test_sqrt_of_negative_is_nan() {
        let state = digits(CalculatorState::new(), "4")
            .reduce(Input::Unary(UnaryOp::Sign))
            .reduce(Input::Unary(UnaryOp::Sqrt));
        assert_eq!(state.display(), "NaN");
        assert!(state.fault().is_none());
    }

    #[test]
    fn test_unary_inside_binary_chain() {
        let state = run(&[
            Input::Digit(2),
            Input::Binary(BinaryOp::Add),
            Input::Digit(9),
            Input::Unary(UnaryOp::Sqrt),
            Input::Equals,
        ]);
        assert_eq!(state.display(), "5");
    }

    #[test]
    fn test_invert_square_cube() {
        let state = digits(CalculatorState::new(), "4").reduce(Input::Unary(UnaryOp::Invert));
        assert_eq!(state.display(), "0.25");
        let state = digits(CalculatorState::new(), "3").reduce(Input::Unary(UnaryOp::Square));
        assert_eq!(state.display(), "9");
        let state = state.reduce(Input::Unary(UnaryOp::Cube));
        assert_eq!(state.display(), "729");
    }

    // ===== Memory =====

    #[test]
    fn test_memory_round_trip() {
        let state = run(&[
            Input::Digit(4),
            Input::Digit(2),
            Input::Memory(MemoryOp::Store),
            Input::Clear,
            Input::Memory(MemoryOp::Recall),
        ]);
        assert_eq!(state.display(), "42");
        assert!(state.is_awaiting_new_entry());
    }

    #[test]
    fn test_memory_add_subtract_clear() {
        let state = run(&[
            Input::Digit(1),
            Input::Digit(0),
            Input::Memory(MemoryOp::Add),
            Input::Digit(3),
            Input::Memory(MemoryOp::Subtract),
        ]);
        assert_eq!(state.memory(), 7.0);
        assert_eq!(state.display(), "3");

        let state = state.reduce(Input::Memory(MemoryOp::Clear));
        assert_eq!(state.memory(), 0.0);
    }

    #[test]
    fn test_digit_after_store_starts_fresh() {
        let state = run(&[
            Input::Digit(5),
            Input::Memory(MemoryOp::Store),
            Input::Digit(6),
        ]);
        assert_eq!(state.display(), "6");
    }

    // ===== Angle mode =====

    #[test]
    fn test_angle_mode_inputs_leave_display() {
        let state = digits(CalculatorState::new(), "12.");
        let toggled = state.clone().reduce(Input::ToggleAngleMode);
        assert_eq!(toggled.angle_mode(), AngleMode::Radians);
        assert_eq!(toggled.display(), "12.");
        let set = toggled.reduce(Input::SetAngleMode(AngleMode::Degrees));
        assert_eq!(set.angle_mode(), AngleMode::Degrees);
    }

    // ===== Serialization =====

    #[test]
    fn test_state_serializes() {
        let state = run(&[Input::Digit(3), Input::Binary(BinaryOp::Power)]);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"pending_operator\":\"power\""));
        let back: CalculatorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_state_with_infinite_accumulator_round_trips() {
        let state = run(&[
            Input::Digit(5),
            Input::Binary(BinaryOp::Divide),
            Input::Digit(0),
            Input::Binary(BinaryOp::Add),
            Input::Memory(MemoryOp::Store),
        ]);
        assert_eq!(state.accumulator(), f64::INFINITY);
        assert_eq!(state.memory(), f64::INFINITY);

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains(r#""accumulator":"Infinity""#));
        let back: CalculatorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_state_with_nan_fault_round_trips() {
        let state = run(&[
            Input::Digit(0),
            Input::Binary(BinaryOp::Divide),
            Input::Digit(0),
            Input::Binary(BinaryOp::Add),
            Input::Unary(UnaryOp::Factorial),
        ]);
        assert!(state.accumulator().is_nan());
        let json = serde_json::to_string(&state).unwrap();
        let back: CalculatorState = serde_json::from_str(&json).unwrap();
        assert!(back.accumulator().is_nan());
        assert_eq!(back.display(), "NaN");
        assert!(matches!(
            back.fault(),
            Some(CalcError::InvalidOperand { value, .. }) if value.is_nan()
        ));
    }
}
