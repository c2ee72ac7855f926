//! infixcalc CLI library
//!
//! Command-line front end for the `infix-calc` evaluator: one-shot `eval`
//! and an interactive `repl` over stdin.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod repl;
mod runner;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, FormatArg, ModeArg, ReplArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{EvalRecord, OutputFormat, Printer};
pub use repl::{Repl, ReplCommand, ReplOutcome};
pub use runner::{run_eval, EvalSummary};

/// Builds the runtime configuration from parsed arguments
#[must_use]
pub fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_mode(cli.mode.into())
        .with_max_length(cli.max_length)
        .with_max_depth(cli.max_depth)
        .with_history_limit(cli.history_limit)
}
