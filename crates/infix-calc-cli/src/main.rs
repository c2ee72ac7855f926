//! infixcalc: evaluate infix arithmetic from the command line
//!
//! ## Usage
//!
//! ```bash
//! infixcalc eval "2+3*4" "√(16)×2"     # one result per line
//! infixcalc eval --format json "10/4"  # JSON records
//! infixcalc --mode legacy eval "2+3*4" # rightmost-split reduction
//! infixcalc repl                       # interactive session
//! ```

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use infix_calc_cli::{
    build_config, logging, run_eval, Cli, CliConfig, CliResult, Commands, EvalArgs, Repl,
    ReplArgs,
};
use tracing::debug;

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
    let config = build_config(&cli);
    logging::init_tracing(config.verbosity);
    debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Eval(args) => run_eval_command(&config, &args),
        Commands::Repl(args) => run_repl_command(&config, &args),
    }
}

fn run_eval_command(config: &CliConfig, args: &EvalArgs) -> CliResult<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_eval(
        config,
        &args.expressions,
        args.format.into(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?
    .into_result()
}

fn run_repl_command(config: &CliConfig, args: &ReplArgs) -> CliResult<()> {
    let stdin = io::stdin();
    let prompt = !args.no_prompt && !config.verbosity.is_quiet() && stdin.is_terminal();
    let mut repl = Repl::new(config).with_prompt(prompt);
    repl.run(stdin.lock(), &mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(())
}
