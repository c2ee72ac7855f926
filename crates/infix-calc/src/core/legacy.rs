//! Rightmost-split reduction by string substitution
//!
//! Innermost parenthesis groups are evaluated and spliced back as decimal
//! text until none remain; the flat remainder is split on the rightmost
//! occurrence of the first operator in [`Operation::LEGACY_SCAN_ORDER`]
//! found past the first character.

use tracing::trace;

use crate::core::parens::ParenPairs;
use crate::core::{format_plain, parse_literal, square_root, CalcError, CalcResult, Operation};

const SQRT_PREFIX: &str = "sqrt";

/// Reduces a normalized, balanced, non-empty expression
pub(crate) fn evaluate(expr: &str) -> CalcResult<f64> {
    let mut current = expr.trim().to_string();

    loop {
        if let Some(value) = parse_literal(&current)? {
            return Ok(value);
        }

        let pairs = ParenPairs::scan(&current)?;
        let Some((open, close)) = pairs.innermost() else {
            return evaluate_flat(&current);
        };

        let (start, is_sqrt) = match current[..open].trim_end().strip_suffix(SQRT_PREFIX) {
            Some(head) => (head.len(), true),
            None => (open, false),
        };
        let tail = &current[close + 1..];
        check_adjacent(&current[..start], tail)?;

        let mut value = evaluate_flat(&current[open + 1..close])?;
        if is_sqrt {
            value = square_root(value)?;
        }

        let mut head = current[..start].trim_end().to_string();
        if value < 0.0 {
            value = absorb_sign(&mut head, value);
        }

        let spliced = format!("{head}{}{tail}", format_plain(value));
        trace!(from = %current, to = %spliced, "resolved parenthesis group");
        current = spliced.trim().to_string();
    }
}

/// A group must be separated from a preceding operand and a following one
fn check_adjacent(head: &str, tail: &str) -> CalcResult<()> {
    if head
        .trim_end()
        .ends_with(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
    {
        return Err(CalcError::invalid("missing operator before '('"));
    }
    if tail
        .trim_start()
        .starts_with(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '(')
    {
        return Err(CalcError::invalid("missing operator after ')'"));
    }
    Ok(())
}

/// Folds a negative group value into the sign written before it.
///
/// `2-(1-3)` splices as `2+2` rather than `2--2`. Returns the value to splice.
fn absorb_sign(head: &mut String, value: f64) -> f64 {
    let flipped = match head.chars().next_back() {
        Some('-') => '+',
        Some('+') => '-',
        _ => return value,
    };
    head.pop();
    head.push(flipped);
    -value
}

/// Evaluates text containing no parentheses
fn evaluate_flat(expr: &str) -> CalcResult<f64> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(CalcError::invalid("empty sub-expression"));
    }
    if let Some(value) = parse_literal(expr)? {
        return Ok(value);
    }

    for op in Operation::LEGACY_SCAN_ORDER {
        let Some(i) = expr.rfind(op.symbol()) else {
            continue;
        };
        if i == 0 {
            continue;
        }
        trace!(%expr, %op, at = i, "splitting on rightmost operator");
        let left = evaluate_flat(&expr[..i])?;
        let right = evaluate_flat(&expr[i + 1..])?;
        return op.apply(left, right);
    }

    Err(CalcError::invalid(format!("cannot evaluate '{expr}'")))
}
