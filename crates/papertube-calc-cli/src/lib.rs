//! Papercalc CLI library
//!
//! Command-line front end for the PaperTube calculator engine: evaluate a
//! key sequence, run a line-based session, or print the keypad.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod runner;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, ReplArgs};
pub use config::{init_logging, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
