//! Stack-based RPN evaluation
//!
//! Division is integer-exact: `a / b` is only defined when `b != 0` and `a` is
//! a whole multiple of `b`. Anything else yields NaN for the whole expression.
//! The same rule is used by the trace builder and by the generator's
//! divisibility check, so all three agree on every expression.

use crate::engine::token::{split_tokens, Operator, Token};

/// Apply `a <op> b`, returning `None` when the operation is undefined.
pub fn apply_operator(op: Operator, a: f64, b: f64) -> Option<f64> {
    match op {
        Operator::Add => Some(a + b),
        Operator::Subtract => Some(a - b),
        Operator::Multiply => Some(a * b),
        Operator::Divide => {
            if b == 0.0 || a % b != 0.0 {
                None
            } else {
                Some(a / b)
            }
        }
    }
}

/// Pop `b` then `a` and push `a <op> b`.
///
/// Returns the popped pair and the pushed value (NaN when undefined). A
/// missing operand reads as NaN so malformed input never panics.
pub fn reduce(stack: &mut Vec<f64>, op: Operator) -> (f64, f64, f64) {
    let b = stack.pop().unwrap_or(f64::NAN);
    let a = stack.pop().unwrap_or(f64::NAN);
    let result = apply_operator(op, a, b).unwrap_or(f64::NAN);
    stack.push(result);
    (a, b, result)
}

/// Evaluate a space-delimited RPN expression.
///
/// Returns NaN on division by zero, inexact division, or any structural
/// problem (unknown token, underflow, leftover values).
pub fn evaluate(expression: &str) -> f64 {
    let mut stack: Vec<f64> = Vec::new();

    for raw in split_tokens(expression) {
        match Token::parse(raw) {
            Some(Token::Operand(value)) => stack.push(value),
            Some(Token::Operator(op)) => {
                if stack.len() < 2 {
                    return f64::NAN;
                }
                let (_, _, result) = reduce(&mut stack, op);
                if result.is_nan() {
                    return f64::NAN;
                }
            }
            None => return f64::NAN,
        }
    }

    match stack.as_slice() {
        [result] => *result,
        _ => f64::NAN,
    }
}
