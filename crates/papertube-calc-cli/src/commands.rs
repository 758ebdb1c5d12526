//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use papertube_calc::prelude::AngleMode;
use std::path::PathBuf;

/// Papercalc: immediate-execution scientific calculator
#[derive(Parser, Debug)]
#[command(name = "papercalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress prompts and logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Engine configuration file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a key sequence and print the final display
    Eval(EvalArgs),

    /// Read key sequences from stdin, one line at a time
    Repl(ReplArgs),

    /// Show the keypad layout and accepted key tokens
    Keys,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Starting angle mode (deg or rad)
    #[arg(long)]
    pub angle: Option<AngleMode>,

    /// Also print the calculation tape
    #[arg(long)]
    pub tape: bool,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,

    /// Keys to press, e.g. `2 + 3 '*' 4 =`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Starting angle mode (deg or rad)
    #[arg(long)]
    pub angle: Option<AngleMode>,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
