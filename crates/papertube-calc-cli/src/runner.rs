//! Command execution
//!
//! Each command writes to a caller-supplied writer so it can be exercised
//! without a terminal.

use crate::commands::{EvalArgs, ReplArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use console::style;
use papertube_calc::prelude::*;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Final state printed by `eval --json`
#[derive(Debug, Serialize)]
pub struct EvalReport {
    /// Display text
    pub display: String,
    /// Angle mode at the end of the sequence
    pub angle_mode: AngleMode,
    /// Memory register
    #[serde(serialize_with = "papertube_calc::core::format::display_float::serialize")]
    pub memory: f64,
    /// Pending binary operation, if the sequence ended mid-calculation
    pub pending_operator: Option<BinaryOp>,
    /// Domain error raised by the last key, if any
    pub fault: Option<String>,
    /// Resolved calculations, oldest first
    pub tape: Vec<String>,
}

impl EvalReport {
    /// Captures the report from a calculator
    #[must_use]
    pub fn from_calculator(calc: &Calculator) -> Self {
        Self {
            display: calc.display().to_string(),
            angle_mode: calc.angle_mode(),
            memory: calc.memory(),
            pending_operator: calc.state().pending_operator(),
            fault: calc.fault().map(ToString::to_string),
            tape: calc.tape().lines(),
        }
    }
}

/// Runs `eval`: presses every key and prints the display
pub fn run_eval(config: &CliConfig, args: &EvalArgs, out: &mut impl Write) -> CliResult<()> {
    let inputs = parse_sequence(&args.keys.join(" "))?;
    if inputs.is_empty() {
        return Err(CliError::invalid_argument("no keys to press"));
    }
    info!(keys = inputs.len(), "evaluating key sequence");

    let mut calc = Calculator::try_with_config(config.engine_with_angle(args.angle))?;
    calc.press_all(inputs);

    if args.json {
        let report = EvalReport::from_calculator(&calc);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    if args.tape {
        for line in calc.tape().lines() {
            writeln!(out, "{line}")?;
        }
    }
    if let Some(fault) = calc.fault() {
        debug!(%fault, "sequence ended in a fault");
    }
    writeln!(out, "{}", calc.display())?;
    Ok(())
}

/// Runs `repl`: one key sequence per input line
///
/// Unknown keys are reported and the session continues; `quit` or `exit`
/// ends it, as does end of input. `tape` prints the tape and `state` the
/// full state as JSON.
pub fn run_repl(
    config: &CliConfig,
    args: &ReplArgs,
    input: impl BufRead,
    out: &mut impl Write,
) -> CliResult<()> {
    let mut calc = Calculator::try_with_config(config.engine_with_angle(args.angle))?;
    let quiet = config.verbosity.is_quiet();

    if !quiet {
        writeln!(out, "{}", status_line(&calc))?;
        write!(out, "{} ", style(">").cyan())?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        match line {
            "" => {}
            "quit" | "exit" => break,
            "tape" => {
                for entry in calc.tape().lines() {
                    writeln!(out, "{entry}")?;
                }
            }
            "state" => writeln!(out, "{}", serde_json::to_string(calc.state())?)?,
            keys => match parse_sequence(keys) {
                Ok(inputs) => {
                    calc.press_all(inputs);
                    if quiet {
                        writeln!(out, "{}", calc.display())?;
                    } else {
                        writeln!(out, "{}", status_line(&calc))?;
                    }
                    if let Some(fault) = calc.fault() {
                        writeln!(out, "{} {fault}", style("fault:").yellow())?;
                    }
                }
                Err(err) => writeln!(out, "{} {err}", style("error:").red())?,
            },
        }
        if !quiet {
            write!(out, "{} ", style(">").cyan())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Runs `keys`: prints the keypad and the accepted tokens
pub fn run_keys(out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "{}", Keypad::scientific().render_grid())?;
    writeln!(out)?;
    writeln!(out, "Tokens (case-insensitive):")?;
    for (group, tokens) in TOKEN_HELP {
        writeln!(out, "  {group:<10} {tokens}")?;
    }
    Ok(())
}

const TOKEN_HELP: [(&str, &str); 7] = [
    ("numbers", "12  3.5  -4 (sign change after entry)"),
    ("binary", "+  -  * x  / ÷  % mod  ^ pow  root  logb"),
    ("unary", "sin cos tan asin acos atan log ln sqrt inv sq cube ! neg"),
    ("control", "=  enter  c clear escape  back backspace"),
    ("memory", "ms  mr  mc  m+  m-"),
    ("angle", "angle (toggle)  deg  rad"),
    ("repl", "tape  state  quit exit"),
];

fn status_line(calc: &Calculator) -> String {
    let memory = if calc.memory() == 0.0 { " " } else { "M" };
    format!(
        "{} {} {}",
        style(calc.angle_mode().label()).dim(),
        style(memory).dim(),
        style(calc.display()).bold()
    )
}
