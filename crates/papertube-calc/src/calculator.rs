//! Stateful calculator
//!
//! Owns one [`CalculatorState`] for the lifetime of a widget, runs every
//! input through the reducer and keeps the calculation tape.

use crate::config::EngineConfig;
use crate::core::history::Tape;
use crate::core::state::{reduce, CalculatorState, Input};
use crate::core::{AngleMode, CalcError, CalcResult};
use tracing::trace;

/// Calculator instance bound to one front end
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalculatorState,
    config: EngineConfig,
    tape: Tape,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a calculator with a custom configuration
    ///
    /// The configuration is used as given. Use [`Calculator::try_with_config`]
    /// for configurations that were not built by
    /// [`EngineConfig::from_json_str`] or [`EngineConfig::from_path`].
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: CalculatorState::with_angle_mode(config.angle_mode),
            tape: Tape::with_capacity(config.tape_capacity),
            config,
        }
    }

    /// Creates a calculator after checking the configuration
    pub fn try_with_config(config: EngineConfig) -> CalcResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Applies one input
    pub fn press(&mut self, input: Input) {
        let state = std::mem::take(&mut self.state);
        let step = reduce(state, input, &self.config);
        self.state = step.state;
        if let Some(entry) = step.evaluation {
            self.tape.push(entry);
        }
        trace!(?input, display = %self.state.display(), "input applied");
    }

    /// Applies a sequence of inputs in order
    pub fn press_all(&mut self, inputs: impl IntoIterator<Item = Input>) {
        for input in inputs {
            self.press(input);
        }
    }

    /// Text currently shown
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// Full engine state
    #[must_use]
    pub const fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Memory register
    #[must_use]
    pub const fn memory(&self) -> f64 {
        self.state.memory()
    }

    /// Current angle mode
    #[must_use]
    pub const fn angle_mode(&self) -> AngleMode {
        self.state.angle_mode()
    }

    /// Domain error raised by the last input, if any
    #[must_use]
    pub const fn fault(&self) -> Option<&CalcError> {
        self.state.fault()
    }

    /// Resolved calculations so far
    #[must_use]
    pub const fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Discards everything, memory and tape included
    pub fn reset(&mut self) {
        self.state = CalculatorState::with_angle_mode(self.config.angle_mode);
        self.tape.clear();
    }
}
