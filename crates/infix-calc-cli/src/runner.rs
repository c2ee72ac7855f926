//! `eval` command implementation

use std::io::Write;

use infix_calc::Evaluator;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{EvalRecord, OutputFormat, Printer};

/// Counts from one `eval` invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalSummary {
    /// Expressions evaluated
    pub total: usize,
    /// Expressions that failed
    pub failed: usize,
}

impl EvalSummary {
    /// Expressions that evaluated
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.total - self.failed
    }

    /// Error when any expression failed
    pub fn into_result(self) -> CliResult<()> {
        if self.failed == 0 {
            Ok(())
        } else {
            Err(CliError::EvaluationFailed {
                failed: self.failed,
                total: self.total,
            })
        }
    }
}

/// Evaluates each expression and writes one result line per expression.
///
/// Text results go to `out` and text errors to `err`; JSON records (both
/// outcomes) go to `out`. Evaluation continues past failures.
pub fn run_eval<W, E>(
    config: &CliConfig,
    expressions: &[String],
    format: OutputFormat,
    out: &mut W,
    err: &mut E,
) -> CliResult<EvalSummary>
where
    W: Write,
    E: Write,
{
    let evaluator = Evaluator::with_config(config.eval_config());
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    let mut summary = EvalSummary::default();

    for expression in expressions {
        let outcome = evaluator.evaluate(expression);
        summary.total += 1;
        if outcome.is_err() {
            summary.failed += 1;
        }

        match (format, &outcome) {
            (OutputFormat::Json, _) => {
                let record = EvalRecord::new(expression, &outcome);
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            }
            (OutputFormat::Text, Ok(value)) => writeln!(out, "{}", printer.value(*value))?,
            (OutputFormat::Text, Err(e)) => writeln!(err, "{}", printer.error(&e.to_string()))?,
        }
    }

    info!(
        total = summary.total,
        failed = summary.failed,
        mode = %evaluator.mode(),
        "eval finished"
    );
    Ok(summary)
}
