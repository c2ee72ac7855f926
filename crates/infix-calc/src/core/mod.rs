//! Expression evaluation core
//!
//! Input text is normalized, checked against [`Limits`], scanned for
//! parenthesis pairs, and then reduced by one of two engines selected by
//! [`EvalMode`].

pub mod evaluator;
pub mod format;
pub mod history;
mod legacy;
mod operations;
pub mod parens;
pub mod parser;

pub use evaluator::Evaluator;
pub use format::{format_general, format_plain, parse_literal};
pub use operations::{square_root, Operation};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Unbalanced `(` or `)`
    #[error("Mismatched parentheses")]
    MismatchedParentheses,
    /// Text that is neither a number nor a decomposable expression
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
    /// Right operand of a division evaluated to zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Function applied outside its valid input range
    #[error("Domain error: {0}")]
    DomainError(String),
    /// A literal or intermediate result is not finite
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Input longer than [`Limits::max_length`]
    #[error("Expression too long: {length} characters (limit {max})")]
    TooLong {
        /// Length of the normalized input in characters
        length: usize,
        /// Configured limit
        max: usize,
    },
    /// Parentheses nested deeper than [`Limits::max_depth`]
    #[error("Expression nested too deeply: depth {depth} (limit {max})")]
    TooDeep {
        /// Deepest nesting found
        depth: usize,
        /// Configured limit
        max: usize,
    },
}

impl CalcError {
    /// Create an invalid expression error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidExpression(message.into())
    }

    /// Create a domain error
    #[must_use]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::DomainError(message.into())
    }
}

/// Reduction strategy used once an input is known to be balanced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    /// Tokenize once and parse with precedence climbing.
    /// `*` and `/` bind tighter than `+` and `-`; all four are left-associative.
    #[default]
    Standard,
    /// Peel innermost parentheses by string substitution, then split flat text
    /// on the rightmost `*`, `/`, `+`, `-` (tried in that order).
    ///
    /// Multiply and divide are split before add and subtract are considered,
    /// so `2+3*4` yields `20`.
    Legacy,
}

impl EvalMode {
    /// Lowercase name used on the command line and in config files
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for EvalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounds applied to every input before any arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum normalized input length in characters
    pub max_length: usize,
    /// Maximum parenthesis nesting depth
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    /// Default maximum input length
    pub const DEFAULT_MAX_LENGTH: usize = 1024;
    /// Default maximum nesting depth
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Set maximum length
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set maximum depth
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rejects inputs longer than `max_length`
    pub fn check_length(&self, expr: &str) -> CalcResult<()> {
        let length = expr.chars().count();
        if length > self.max_length {
            return Err(CalcError::TooLong {
                length,
                max: self.max_length,
            });
        }
        Ok(())
    }

    /// Rejects nesting deeper than `max_depth`
    pub fn check_depth(&self, depth: usize) -> CalcResult<()> {
        if depth > self.max_depth {
            return Err(CalcError::TooDeep {
                depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }
}

/// Evaluator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Reduction strategy
    pub mode: EvalMode,
    /// Input bounds
    pub limits: Limits,
}

impl EvalConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set evaluation mode
    #[must_use]
    pub const fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set limits
    #[must_use]
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

/// Replaces display glyphs with their evaluable spelling and trims whitespace.
///
/// `×` becomes `*`, `÷` becomes `/`, and `√` becomes `sqrt(`. A `√` that is
/// already followed by `(` does not gain a second parenthesis.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .replace('×', "*")
        .replace('÷', "/")
        .replace("√(", "sqrt(")
        .replace('√', "sqrt(")
        .trim()
        .to_string()
}

/// Evaluates `input` with the default configuration.
///
/// Empty input evaluates to `0.0`.
pub fn evaluate(input: &str) -> CalcResult<f64> {
    Evaluator::new().evaluate(input)
}
