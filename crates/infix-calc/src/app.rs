//! Calculator application state
//!
//! Owns everything a front end needs between keystrokes: the pending input,
//! the last outcome, the history and the memory register. Evaluation itself
//! is delegated to a stateless [`Evaluator`].

use tracing::{debug, info};

use crate::core::history::History;
use crate::core::{format_general, format_plain, parse_literal, CalcResult, EvalConfig, Evaluator};

/// Calculator application state
#[derive(Debug, Clone)]
pub struct Calculator {
    input: String,
    result: Option<CalcResult<f64>>,
    history: History,
    memory: f64,
    evaluator: Evaluator,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with default evaluator and history capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Evaluator::new(), History::new())
    }

    /// Creates a calculator with an explicit evaluator configuration and history capacity
    #[must_use]
    pub fn with_config(config: EvalConfig, history_limit: usize) -> Self {
        Self::with_parts(
            Evaluator::with_config(config),
            History::with_capacity(history_limit),
        )
    }

    fn with_parts(evaluator: Evaluator, history: History) -> Self {
        Self {
            input: String::new(),
            result: None,
            history,
            memory: 0.0,
            evaluator,
        }
    }

    /// Returns the pending input
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the outcome of the last calculation
    #[must_use]
    pub fn result(&self) -> Option<&CalcResult<f64>> {
        self.result.as_ref()
    }

    /// Returns the history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the memory register
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Returns the evaluator
    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Text for the main display: the input, or `0` when there is none
    #[must_use]
    pub fn display(&self) -> &str {
        if self.input.is_empty() {
            "0"
        } else {
            &self.input
        }
    }

    /// Replaces the input
    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
    }

    /// Appends text to the input
    pub fn append(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Clears the input and the last outcome
    pub fn clear(&mut self) {
        self.input.clear();
        self.result = None;
    }

    /// Removes the last character of the input
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Adds a leading `-`, or removes one that is already there
    pub fn toggle_sign(&mut self) {
        if let Some(rest) = self.input.strip_prefix('-') {
            self.input = rest.to_string();
        } else if !self.input.is_empty() {
            self.input.insert(0, '-');
        }
    }

    /// Replaces the input with its value divided by 100.
    ///
    /// On failure the input is left as it was.
    pub fn percentage(&mut self) -> CalcResult<f64> {
        let value = self.evaluator.evaluate(&self.input)? / 100.0;
        self.input = format_plain(value);
        Ok(value)
    }

    /// Evaluates the input.
    ///
    /// Returns `Ok(None)` when there is nothing to evaluate. On success the
    /// expression is recorded in history and the input becomes the result;
    /// on failure the input is kept so it can be corrected.
    pub fn calculate(&mut self) -> CalcResult<Option<f64>> {
        if self.input.trim().is_empty() {
            return Ok(None);
        }

        match self.evaluator.evaluate(&self.input) {
            Ok(value) => {
                debug!(expression = %self.input, result = %format_general(value), "recorded");
                self.history.record(&self.input, value);
                self.input = format_plain(value);
                self.result = Some(Ok(value));
                Ok(Some(value))
            }
            Err(err) => {
                info!(expression = %self.input, error = %err, "calculation failed");
                self.result = Some(Err(err.clone()));
                Err(err)
            }
        }
    }

    /// Formatted last outcome, empty before the first calculation
    #[must_use]
    pub fn result_display(&self) -> String {
        match &self.result {
            None => String::new(),
            Some(Ok(value)) => format_general(*value),
            Some(Err(e)) => format!("Error: {e}"),
        }
    }

    /// Adds the input to memory if it is a plain number
    pub fn memory_add(&mut self) {
        if let Some(value) = self.input_as_number() {
            self.memory += value;
        }
    }

    /// Subtracts the input from memory if it is a plain number
    pub fn memory_subtract(&mut self) {
        if let Some(value) = self.input_as_number() {
            self.memory -= value;
        }
    }

    /// Replaces the input with the memory value
    pub fn memory_recall(&mut self) {
        self.input = format_plain(self.memory);
    }

    /// Resets memory to zero
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// Clears the history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn input_as_number(&self) -> Option<f64> {
        parse_literal(self.input.trim()).ok().flatten()
    }
}
