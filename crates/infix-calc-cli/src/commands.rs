//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use infix_calc::core::history::History;
use infix_calc::{EvalMode, Limits};

/// infixcalc: evaluate infix arithmetic from the command line
#[derive(Parser, Debug)]
#[command(name = "infixcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Evaluation mode
    #[arg(long, default_value = "standard", env = "INFIXCALC_MODE", global = true)]
    pub mode: ModeArg,

    /// Maximum expression length in characters
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_LENGTH, env = "INFIXCALC_MAX_LENGTH", global = true)]
    pub max_length: usize,

    /// Maximum parenthesis nesting depth
    #[arg(long, default_value_t = Limits::DEFAULT_MAX_DEPTH, env = "INFIXCALC_MAX_DEPTH", global = true)]
    pub max_depth: usize,

    /// Number of history entries kept by the REPL
    #[arg(long, default_value_t = History::DEFAULT_MAX_ENTRIES, env = "INFIXCALC_HISTORY_LIMIT", global = true)]
    pub history_limit: usize,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate one or more expressions
    Eval(EvalArgs),

    /// Interactive calculator reading expressions from stdin
    Repl(ReplArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expressions to evaluate (put `--` before one starting with `-` that is not a number)
    #[arg(required = true, allow_negative_numbers = true)]
    pub expressions: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Do not print the prompt
    #[arg(long)]
    pub no_prompt: bool,
}

/// Evaluation mode argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeArg {
    /// Precedence climbing, left-associative
    #[default]
    Standard,
    /// Rightmost-split string reduction
    Legacy,
}

impl From<ModeArg> for EvalMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Standard => Self::Standard,
            ModeArg::Legacy => Self::Legacy,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// One result per line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color choice argument
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
