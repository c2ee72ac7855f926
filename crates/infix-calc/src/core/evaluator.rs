//! Expression evaluator
//!
//! Shared front half for both modes: normalize, empty check, length limit,
//! bare-literal fast path, parenthesis scan with depth limit. Only then is the
//! mode-specific reduction run.

use tracing::debug;

use crate::core::parens::ParenPairs;
use crate::core::parser::{AstNode, Parser};
use crate::core::{
    legacy, normalize, parse_literal, square_root, CalcResult, EvalConfig, EvalMode, Limits,
};

/// Stateless evaluator for infix expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Creates an evaluator in standard mode with default limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with an explicit configuration
    #[must_use]
    pub const fn with_config(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Creates an evaluator for `mode` with default limits
    #[must_use]
    pub fn with_mode(mode: EvalMode) -> Self {
        Self::with_config(EvalConfig::new().with_mode(mode))
    }

    /// Returns the configuration
    #[must_use]
    pub const fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Returns the evaluation mode
    #[must_use]
    pub const fn mode(&self) -> EvalMode {
        self.config.mode
    }

    /// Returns the limits
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.config.limits
    }

    /// Evaluates a raw input string.
    ///
    /// Empty or whitespace-only input yields `0.0`.
    pub fn evaluate(&self, input: &str) -> CalcResult<f64> {
        let result = self.evaluate_normalized(&normalize(input));
        match &result {
            Ok(value) => debug!(mode = %self.config.mode, input, value, "evaluated"),
            Err(err) => debug!(mode = %self.config.mode, input, error = %err, "evaluation failed"),
        }
        result
    }

    fn evaluate_normalized(&self, expr: &str) -> CalcResult<f64> {
        if expr.is_empty() {
            return Ok(0.0);
        }
        self.config.limits.check_length(expr)?;

        if let Some(value) = parse_literal(expr)? {
            return Ok(value);
        }

        let pairs = ParenPairs::scan(expr)?;
        self.config.limits.check_depth(pairs.max_depth())?;

        match self.config.mode {
            EvalMode::Standard => {
                let ast = Parser::parse_str(expr)?;
                Self::evaluate_ast(&ast)
            }
            EvalMode::Legacy => legacy::evaluate(expr),
        }
    }

    /// Evaluates a parsed AST node
    pub fn evaluate_ast(node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Ok(*n),
            AstNode::Negate(inner) => Ok(-Self::evaluate_ast(inner)?),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = Self::evaluate_ast(left)?;
                let right_val = Self::evaluate_ast(right)?;
                op.apply(left_val, right_val)
            }
            AstNode::Sqrt(inner) => square_root(Self::evaluate_ast(inner)?),
        }
    }
}
