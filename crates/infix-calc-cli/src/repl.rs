//! Line-oriented interactive calculator
//!
//! Each input line either edits the pending expression and evaluates it, or
//! is a `:`-prefixed command acting on the calculator (memory, sign,
//! percentage, history). The session is generic over its reader and
//! writers so it can be driven from tests.

use std::io::{BufRead, Write};
use std::str::FromStr;

use infix_calc::Calculator;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Printer;

const PROMPT: &str = "> ";

const HELP: &str = "\
Enter an expression to evaluate it. A line starting with + * / × or ÷
continues from the current value.

Commands:
  :m+            add the current value to memory
  :m-            subtract the current value from memory
  :mr            recall memory
  :mc            clear memory
  :neg           toggle the sign of the current value
  :percent       divide the current value by 100
  :back          delete the last character
  :clear         clear the current value
  :history       show history, newest first
  :history json  show history as JSON
  :help          show this help
  :quit          exit";

/// A `:`-prefixed REPL command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    /// `:m+`
    MemoryAdd,
    /// `:m-`
    MemorySubtract,
    /// `:mr`
    MemoryRecall,
    /// `:mc`
    MemoryClear,
    /// `:neg`
    Negate,
    /// `:percent`
    Percent,
    /// `:back`
    Backspace,
    /// `:clear`
    Clear,
    /// `:history`, optionally as JSON
    History {
        /// Render as JSON
        json: bool,
    },
    /// `:help`
    Help,
    /// `:quit`
    Quit,
}

impl FromStr for ReplCommand {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();
        let arg = words.next();
        if words.next().is_some() {
            return Err(CliError::invalid_argument(format!("too many arguments: {s}")));
        }

        let command = match (name, arg) {
            (":m+", None) => Self::MemoryAdd,
            (":m-", None) => Self::MemorySubtract,
            (":mr", None) => Self::MemoryRecall,
            (":mc", None) => Self::MemoryClear,
            (":neg", None) => Self::Negate,
            (":percent" | ":%", None) => Self::Percent,
            (":back", None) => Self::Backspace,
            (":clear", None) => Self::Clear,
            (":history", None) => Self::History { json: false },
            (":history", Some("json")) => Self::History { json: true },
            (":help" | ":?", None) => Self::Help,
            (":quit" | ":q" | ":exit", None) => Self::Quit,
            _ => return Err(CliError::invalid_argument(format!("unknown command: {s}"))),
        };
        Ok(command)
    }
}

/// What a single REPL line produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplOutcome {
    /// Text for stdout
    Output(String),
    /// Message for stderr
    Error(String),
    /// Nothing to print
    Silent,
    /// End the session
    Quit,
}

/// Interactive calculator session
#[derive(Debug)]
pub struct Repl {
    calculator: Calculator,
    printer: Printer,
    prompt: bool,
}

impl Repl {
    /// Creates a session from CLI configuration
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        Self {
            calculator: Calculator::with_config(config.eval_config(), config.history_limit),
            printer: Printer::new(config.color.should_color(), config.verbosity.is_quiet()),
            prompt: !config.verbosity.is_quiet(),
        }
    }

    /// Enables or disables the prompt
    #[must_use]
    pub const fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Replaces the printer
    #[must_use]
    pub const fn with_printer(mut self, printer: Printer) -> Self {
        self.printer = printer;
        self
    }

    /// Returns the calculator state
    #[must_use]
    pub const fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Runs until `:quit` or end of input, returning the number of lines read
    pub fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> CliResult<usize>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        info!(mode = %self.calculator.evaluator().mode(), "repl started");
        let mut lines_read = 0;
        let mut lines = input.lines();

        loop {
            if self.prompt {
                write!(out, "{PROMPT}")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            lines_read += 1;

            match self.execute(&line) {
                ReplOutcome::Output(text) => writeln!(out, "{text}")?,
                ReplOutcome::Error(message) => writeln!(err, "{}", self.printer.error(&message))?,
                ReplOutcome::Silent => {}
                ReplOutcome::Quit => break,
            }
        }

        if self.prompt {
            writeln!(out)?;
        }
        info!(lines = lines_read, "repl finished");
        Ok(lines_read)
    }

    /// Processes one input line
    pub fn execute(&mut self, line: &str) -> ReplOutcome {
        let line = line.trim();
        if line.is_empty() {
            return ReplOutcome::Silent;
        }

        if line.starts_with(':') {
            return match line.parse::<ReplCommand>() {
                Ok(command) => self.run_command(command),
                Err(e) => ReplOutcome::Error(e.to_string()),
            };
        }

        if continues_value(line) {
            self.calculator.append(line);
        } else {
            self.calculator.set_input(line);
        }
        self.calculate()
    }

    fn calculate(&mut self) -> ReplOutcome {
        match self.calculator.calculate() {
            Ok(Some(value)) => ReplOutcome::Output(self.printer.value(value)),
            Ok(None) => ReplOutcome::Output(self.calculator.display().to_string()),
            Err(e) => ReplOutcome::Error(e.to_string()),
        }
    }

    fn run_command(&mut self, command: ReplCommand) -> ReplOutcome {
        debug!(?command, "repl command");
        match command {
            ReplCommand::MemoryAdd => {
                self.calculator.memory_add();
                self.memory_line()
            }
            ReplCommand::MemorySubtract => {
                self.calculator.memory_subtract();
                self.memory_line()
            }
            ReplCommand::MemoryRecall => {
                self.calculator.memory_recall();
                self.display_line()
            }
            ReplCommand::MemoryClear => {
                self.calculator.memory_clear();
                self.memory_line()
            }
            ReplCommand::Negate => {
                self.calculator.toggle_sign();
                self.display_line()
            }
            ReplCommand::Percent => match self.calculator.percentage() {
                Ok(_) => self.display_line(),
                Err(e) => ReplOutcome::Error(e.to_string()),
            },
            ReplCommand::Backspace => {
                self.calculator.backspace();
                self.display_line()
            }
            ReplCommand::Clear => {
                self.calculator.clear();
                self.display_line()
            }
            ReplCommand::History { json: false } => {
                let lines = self.calculator.history().lines();
                if lines.is_empty() {
                    ReplOutcome::Output(self.printer.note("(no history)"))
                } else {
                    ReplOutcome::Output(lines.join("\n"))
                }
            }
            ReplCommand::History { json: true } => match self.calculator.history().to_json() {
                Ok(json) => ReplOutcome::Output(json),
                Err(e) => ReplOutcome::Error(CliError::from(e).to_string()),
            },
            ReplCommand::Help => ReplOutcome::Output(HELP.to_string()),
            ReplCommand::Quit => ReplOutcome::Quit,
        }
    }

    fn display_line(&self) -> ReplOutcome {
        ReplOutcome::Output(self.calculator.display().to_string())
    }

    fn memory_line(&self) -> ReplOutcome {
        let memory = infix_calc::format_general(self.calculator.memory());
        ReplOutcome::Output(self.printer.note(&format!("M = {memory}")))
    }
}

/// Lines starting with a binary-only operator extend the current value
fn continues_value(line: &str) -> bool {
    line.starts_with(['+', '*', '/', '×', '÷'])
}
