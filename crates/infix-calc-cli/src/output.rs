//! Output formatting for evaluation results

use console::style;
use infix_calc::{format_general, CalcResult};
use serde::{Deserialize, Serialize};

/// Output format for `eval` results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Outcome of evaluating one expression, as emitted in JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRecord {
    /// Expression as given
    pub expression: String,
    /// Numeric result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    /// Result in display form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvalRecord {
    /// Builds a record from an evaluation outcome
    #[must_use]
    pub fn new(expression: &str, outcome: &CalcResult<f64>) -> Self {
        match outcome {
            Ok(value) => Self {
                expression: expression.to_string(),
                result: Some(*value),
                display: Some(format_general(*value)),
                error: None,
            },
            Err(e) => Self {
                expression: expression.to_string(),
                result: None,
                display: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Whether the expression evaluated
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Renders messages with optional styling
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub const fn new(use_color: bool, quiet: bool) -> Self {
        Self { use_color, quiet }
    }

    /// `error: <message>` line
    #[must_use]
    pub fn error(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("error:").red().bold().force_styling(true).to_string()
        } else {
            "error:".to_string()
        };
        format!("{prefix} {message}")
    }

    /// Result line for text output
    #[must_use]
    pub fn value(&self, value: f64) -> String {
        let text = format_general(value);
        if self.use_color {
            style(text).green().force_styling(true).to_string()
        } else {
            text
        }
    }

    /// Secondary information such as the memory register
    #[must_use]
    pub fn note(&self, message: &str) -> String {
        if self.use_color {
            style(message).dim().force_styling(true).to_string()
        } else {
            message.to_string()
        }
    }
}
