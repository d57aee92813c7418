use crate::engine::evaluator::reduce;
use crate::engine::token::{format_number, split_tokens, Token};

/// One row of the stack visualization
#[derive(Debug, Clone, PartialEq)]
pub struct StackStep {
    pub token: String,
    /// Stack contents before the token is applied
    pub stack: Vec<f64>,
    pub description: String,
    /// Stack contents after the token is applied
    pub next_stack: Vec<f64>,
}

/// Replay the evaluator's reduction, recording every token.
///
/// An illegal division pushes NaN, so the last step's `next_stack` agrees with
/// `evaluate` on every input.
pub fn trace(expression: &str) -> Vec<StackStep> {
    let mut stack: Vec<f64> = Vec::new();
    let mut steps = Vec::new();

    for raw in split_tokens(expression) {
        let before = stack.clone();

        let description = match Token::parse(raw) {
            Some(Token::Operand(value)) => {
                stack.push(value);
                format!("Push {} onto stack", format_number(value))
            }
            Some(Token::Operator(op)) => {
                let (a, b, result) = reduce(&mut stack, op);
                format!(
                    "Pop {b} and {a}, calculate {a} {op} {b} = {result}, push result",
                    a = format_number(a),
                    b = format_number(b),
                    op = op,
                    result = format_number(result),
                )
            }
            None => "Unknown token".to_string(),
        };

        steps.push(StackStep {
            token: raw.to_string(),
            stack: before,
            description,
            next_stack: stack.clone(),
        });
    }

    steps
}
