//! infix-calc - arithmetic expression evaluation for calculator front ends
//!
//! Evaluates plain-text infix expressions over `+ - * /`, parentheses and
//! `sqrt(...)`, accepting the display glyphs `×`, `÷` and `√`.
//!
//! # Example
//!
//! ```rust
//! use infix_calc::prelude::*;
//!
//! assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
//! assert_eq!(evaluate("").unwrap(), 0.0);
//! assert!(matches!(evaluate("10/0"), Err(CalcError::DivisionByZero)));
//!
//! // Rightmost-split compatibility mode
//! let legacy = Evaluator::with_mode(EvalMode::Legacy);
//! assert_eq!(legacy.evaluate("2+3*4").unwrap(), 20.0);
//!
//! // Calculator state with history and memory
//! let mut calc = Calculator::new();
//! calc.set_input("√(16)×2");
//! calc.calculate().unwrap();
//! assert_eq!(calc.input(), "8");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![warn(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod app;
pub mod core;

pub use crate::app::Calculator;
pub use crate::core::{
    evaluate, format_general, format_plain, normalize, CalcError, CalcResult, EvalConfig,
    EvalMode, Evaluator, Limits,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::Calculator;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parens::ParenPairs;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        evaluate, format_general, format_plain, normalize, parse_literal, square_root, CalcError,
        CalcResult, EvalConfig, EvalMode, Evaluator, Limits, Operation,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        assert_eq!(evaluate("2 + 3").unwrap(), 5.0);
        let ast = Parser::parse_str("1 + 2 * 3").unwrap();
        assert_eq!(Evaluator::evaluate_ast(&ast).unwrap(), 7.0);
    }

    #[test]
    fn test_documented_properties() {
        assert_eq!(evaluate(""), Ok(0.0));
        assert_eq!(evaluate("3.5"), Ok(3.5));
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("10/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("(1+2"), Err(CalcError::MismatchedParentheses));
        assert_eq!(evaluate("1+2)"), Err(CalcError::MismatchedParentheses));
        assert_eq!(evaluate("sqrt(16)"), Ok(4.0));
        assert!(matches!(evaluate("sqrt(-4)"), Err(CalcError::DomainError(_))));
        assert_eq!(evaluate("((1+(2*3))-4)"), Ok(3.0));
    }

    #[test]
    fn test_disjoint_groups_any_order() {
        for eval in [Evaluator::new(), Evaluator::with_mode(EvalMode::Legacy)] {
            assert_eq!(eval.evaluate("(1+2)*(3+4)"), Ok(21.0));
            assert_eq!(eval.evaluate("(3+4)*(1+2)"), Ok(21.0));
            assert_eq!(eval.evaluate("((8/2)-(1+1))*((1))"), Ok(2.0));
        }
    }

    #[test]
    fn test_calculator_history_tracking() {
        let mut calc = Calculator::new();
        calc.set_input("10 / 4");
        calc.calculate().unwrap();
        assert_eq!(calc.history().last().unwrap().display(), "10 / 4 = 2.5");
    }
}
