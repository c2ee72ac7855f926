//! Operator table and checked arithmetic

use crate::core::{CalcError, CalcResult};

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// Order in which the rightmost-split scan looks for operator symbols
    pub const LEGACY_SCAN_ORDER: [Self; 4] =
        [Self::Multiply, Self::Divide, Self::Add, Self::Subtract];

    /// Returns the operator symbol
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Looks up the operator for a symbol
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Precedence tier (higher binds tighter)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    /// Applies the operator to two operands
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        match self {
            Self::Add => add(a, b),
            Self::Subtract => subtract(a, b),
            Self::Multiply => multiply(a, b),
            Self::Divide => divide(a, b),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

fn add(a: f64, b: f64) -> CalcResult<f64> {
    check_finite(a + b)
}

fn subtract(a: f64, b: f64) -> CalcResult<f64> {
    check_finite(a - b)
}

fn multiply(a: f64, b: f64) -> CalcResult<f64> {
    check_finite(a * b)
}

fn divide(a: f64, b: f64) -> CalcResult<f64> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    check_finite(a / b)
}

/// Non-negative square root; negative operands are a domain failure
pub fn square_root(x: f64) -> CalcResult<f64> {
    if x < 0.0 {
        return Err(CalcError::domain(format!("square root of {x}")));
    }
    check_finite(x.sqrt())
}

fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_nan() {
        Err(CalcError::invalid("result is not a number"))
    } else if result.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(result)
    }
}
