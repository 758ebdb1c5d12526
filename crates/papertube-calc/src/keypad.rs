//! Calculator keypad
//!
//! Button captions, stable element ids and the grid layout of the
//! scientific keypad, plus the mapping from keyboard keys and text tokens
//! onto engine inputs.

use crate::core::state::{Input, MemoryOp};
use crate::core::{AngleMode, BinaryOp, CalcError, CalcResult, UnaryOp};

impl Input {
    /// Button caption
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Clear => "C".to_string(),
            Self::Binary(BinaryOp::Power) => "x^y".to_string(),
            Self::Binary(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Unary(op) => op.label().to_string(),
            Self::Memory(op) => memory_label(*op).to_string(),
            Self::ToggleAngleMode => "DEG/RAD".to_string(),
            Self::SetAngleMode(mode) => mode.label().to_string(),
        }
    }

    /// Stable element id, e.g. `btn-7`, `btn-sin`, `btn-mplus`
    #[must_use]
    pub fn element_id(&self) -> String {
        let name = match self {
            Self::Digit(d) => return format!("btn-{d}"),
            Self::Decimal => "decimal",
            Self::Backspace => "backspace",
            Self::Clear => "clear",
            Self::Binary(op) => binary_name(*op),
            Self::Equals => "equals",
            Self::Unary(op) => unary_name(*op),
            Self::Memory(op) => memory_name(*op),
            Self::ToggleAngleMode => "angle",
            Self::SetAngleMode(AngleMode::Degrees) => "deg",
            Self::SetAngleMode(AngleMode::Radians) => "rad",
        };
        format!("btn-{name}")
    }
}

const fn binary_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "plus",
        BinaryOp::Subtract => "minus",
        BinaryOp::Multiply => "times",
        BinaryOp::Divide => "divide",
        BinaryOp::Modulo => "mod",
        BinaryOp::Power => "power",
        BinaryOp::Root => "root",
        BinaryOp::LogBase => "logbase",
    }
}

const fn unary_name(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Sin => "sin",
        UnaryOp::Cos => "cos",
        UnaryOp::Tan => "tan",
        UnaryOp::Asin => "asin",
        UnaryOp::Acos => "acos",
        UnaryOp::Atan => "atan",
        UnaryOp::Log10 => "log",
        UnaryOp::Ln => "ln",
        UnaryOp::Sqrt => "sqrt",
        UnaryOp::Invert => "invert",
        UnaryOp::Square => "square",
        UnaryOp::Cube => "cube",
        UnaryOp::Factorial => "factorial",
        UnaryOp::Sign => "sign",
    }
}

const fn memory_name(op: MemoryOp) -> &'static str {
    match op {
        MemoryOp::Store => "ms",
        MemoryOp::Recall => "mr",
        MemoryOp::Clear => "mc",
        MemoryOp::Add => "mplus",
        MemoryOp::Subtract => "mminus",
    }
}

const fn memory_label(op: MemoryOp) -> &'static str {
    match op {
        MemoryOp::Store => "MS",
        MemoryOp::Recall => "MR",
        MemoryOp::Clear => "MC",
        MemoryOp::Add => "M+",
        MemoryOp::Subtract => "M−",
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Input sent when pressed
    pub input: Input,
    /// Element id
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button at the given grid position
    #[must_use]
    pub fn new(input: Input, row: usize, col: usize) -> Self {
        Self {
            id: input.element_id(),
            input,
            row,
            col,
        }
    }
}

/// Scientific keypad layout
///
/// ```text
/// [ MC ] [ MR ] [ MS ] [ M+ ] [ M− ] [DEG/RAD]
/// [ sin] [ cos] [ tan] [asin] [acos] [ atan ]
/// [ log] [ ln ] [ √  ] [ x² ] [ x³ ] [  n!  ]
/// [ 1/x] [ ±  ] [ mod] [ x^y] [yroot] [ logy ]
/// [ 7  ] [ 8  ] [ 9  ] [ ÷  ] [ ⌫  ] [  C   ]
/// [ 4  ] [ 5  ] [ 6  ] [ ×  ] [ −  ] [  +   ]
/// [ 1  ] [ 2  ] [ 3  ] [ 0  ] [ .  ] [  =   ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::scientific()
    }
}

impl Keypad {
    /// Creates the standard scientific keypad
    #[must_use]
    pub fn scientific() -> Self {
        use Input::{Backspace, Binary, Clear, Decimal, Digit, Equals, Memory, ToggleAngleMode, Unary};

        let layout: [[Input; 6]; 7] = [
            [
                Memory(MemoryOp::Clear),
                Memory(MemoryOp::Recall),
                Memory(MemoryOp::Store),
                Memory(MemoryOp::Add),
                Memory(MemoryOp::Subtract),
                ToggleAngleMode,
            ],
            [
                Unary(UnaryOp::Sin),
                Unary(UnaryOp::Cos),
                Unary(UnaryOp::Tan),
                Unary(UnaryOp::Asin),
                Unary(UnaryOp::Acos),
                Unary(UnaryOp::Atan),
            ],
            [
                Unary(UnaryOp::Log10),
                Unary(UnaryOp::Ln),
                Unary(UnaryOp::Sqrt),
                Unary(UnaryOp::Square),
                Unary(UnaryOp::Cube),
                Unary(UnaryOp::Factorial),
            ],
            [
                Unary(UnaryOp::Invert),
                Unary(UnaryOp::Sign),
                Binary(BinaryOp::Modulo),
                Binary(BinaryOp::Power),
                Binary(BinaryOp::Root),
                Binary(BinaryOp::LogBase),
            ],
            [
                Digit(7),
                Digit(8),
                Digit(9),
                Binary(BinaryOp::Divide),
                Backspace,
                Clear,
            ],
            [
                Digit(4),
                Digit(5),
                Digit(6),
                Binary(BinaryOp::Multiply),
                Binary(BinaryOp::Subtract),
                Binary(BinaryOp::Add),
            ],
            [Digit(1), Digit(2), Digit(3), Digit(0), Decimal, Equals],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, inputs)| {
                inputs
                    .iter()
                    .enumerate()
                    .map(move |(col, &input)| KeypadButton::new(input, row, col))
            })
            .collect();

        Self {
            buttons,
            rows: 7,
            cols: 6,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all buttons
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that sends `input`
    #[must_use]
    pub fn find_button_by_input(&self, input: Input) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.input == input)
    }

    /// Maps a click on an element to the input it sends
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Input> {
        self.find_button_by_id(element_id).map(|b| b.input)
    }

    /// Renders the layout as a text grid
    #[must_use]
    pub fn render_grid(&self) -> String {
        self.buttons
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|b| format!("[{:^7}]", b.input.label()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Maps a keyboard key or text token to an input
    ///
    /// Matching is case-insensitive; `x`, `*` and `×` all mean multiply.
    pub fn key_for_token(token: &str) -> CalcResult<Input> {
        let input = match token.to_lowercase().as_str() {
            "0" => Input::Digit(0),
            "1" => Input::Digit(1),
            "2" => Input::Digit(2),
            "3" => Input::Digit(3),
            "4" => Input::Digit(4),
            "5" => Input::Digit(5),
            "6" => Input::Digit(6),
            "7" => Input::Digit(7),
            "8" => Input::Digit(8),
            "9" => Input::Digit(9),
            "." | "," => Input::Decimal,
            "+" => Input::Binary(BinaryOp::Add),
            "-" | "−" => Input::Binary(BinaryOp::Subtract),
            "*" | "x" | "×" => Input::Binary(BinaryOp::Multiply),
            "/" | "÷" => Input::Binary(BinaryOp::Divide),
            "%" | "mod" => Input::Binary(BinaryOp::Modulo),
            "^" | "pow" | "x^y" => Input::Binary(BinaryOp::Power),
            "root" | "yroot" => Input::Binary(BinaryOp::Root),
            "logb" | "logy" => Input::Binary(BinaryOp::LogBase),
            "=" | "enter" => Input::Equals,
            "c" | "clear" | "escape" => Input::Clear,
            "backspace" | "back" | "⌫" => Input::Backspace,
            "sin" => Input::Unary(UnaryOp::Sin),
            "cos" => Input::Unary(UnaryOp::Cos),
            "tan" => Input::Unary(UnaryOp::Tan),
            "asin" => Input::Unary(UnaryOp::Asin),
            "acos" => Input::Unary(UnaryOp::Acos),
            "atan" => Input::Unary(UnaryOp::Atan),
            "log" | "log10" => Input::Unary(UnaryOp::Log10),
            "ln" => Input::Unary(UnaryOp::Ln),
            "sqrt" | "√" => Input::Unary(UnaryOp::Sqrt),
            "inv" | "1/x" => Input::Unary(UnaryOp::Invert),
            "sq" | "square" | "x²" => Input::Unary(UnaryOp::Square),
            "cube" | "x³" => Input::Unary(UnaryOp::Cube),
            "!" | "n!" | "fact" => Input::Unary(UnaryOp::Factorial),
            "neg" | "±" | "+/-" => Input::Unary(UnaryOp::Sign),
            "ms" => Input::Memory(MemoryOp::Store),
            "mr" => Input::Memory(MemoryOp::Recall),
            "mc" => Input::Memory(MemoryOp::Clear),
            "m+" => Input::Memory(MemoryOp::Add),
            "m-" | "m−" => Input::Memory(MemoryOp::Subtract),
            "angle" | "drg" => Input::ToggleAngleMode,
            "deg" => Input::SetAngleMode(AngleMode::Degrees),
            "rad" => Input::SetAngleMode(AngleMode::Radians),
            _ => return Err(CalcError::UnknownKey(token.to_string())),
        };
        Ok(input)
    }
}

/// Parses a whitespace-separated key sequence
///
/// Numeric tokens expand to one input per character (`12.5` is four key
/// presses); a leading `-` on a number appends a sign change.
pub fn parse_sequence(text: &str) -> CalcResult<Vec<Input>> {
    let mut inputs = Vec::new();
    for token in text.split_whitespace() {
        let (negative, digits) = match token.strip_prefix('-') {
            Some(rest) if is_number(rest) => (true, rest),
            _ => (false, token),
        };
        if is_number(digits) && digits.len() > 1 {
            for ch in digits.chars() {
                inputs.push(Keypad::key_for_token(ch.encode_utf8(&mut [0; 4]))?);
            }
        } else {
            inputs.push(Keypad::key_for_token(digits)?);
        }
        if negative {
            inputs.push(Input::Unary(UnaryOp::Sign));
        }
    }
    Ok(inputs)
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}
