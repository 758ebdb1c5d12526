//! Papercalc: command-line front end for the PaperTube calculator engine
//!
//! ## Usage
//!
//! ```bash
//! papercalc eval 2 + 3 '*' 4 =        # prints 20
//! papercalc eval --angle rad 30 sin   # prints -0.9880316241
//! papercalc repl                      # one key sequence per line
//! papercalc keys                      # keypad layout and tokens
//! ```

use clap::Parser;
use papertube_calc::prelude::EngineConfig;
use papertube_calc_cli::{
    runner::{run_eval, run_keys, run_repl},
    init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    if !init_logging(config.verbosity) {
        tracing::debug!("tracing subscriber already installed, keeping it");
    }
    config.color.apply();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Eval(args) => run_eval(&config, &args, &mut out),
        Commands::Repl(args) => run_repl(&config, &args, std::io::stdin().lock(), &mut out),
        Commands::Keys => run_keys(&mut out),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    let engine = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_engine(engine))
}
