//! Constrained random RPN expression generator
//!
//! Expressions are built left to right against a simulated stack, so every
//! candidate is structurally valid by construction. Candidates whose value is
//! not a small integer are rejected and rebuilt. When the attempt budget runs
//! out the operand/operator budget shrinks by one each, and as a last resort a
//! fixed expression is returned. `generate` therefore always terminates with a
//! usable expression.

use tracing::{debug, warn};

use crate::engine::config::GeneratorConfig;
use crate::engine::evaluator::{evaluate, reduce};
use crate::engine::expression::Expression;
use crate::engine::random::RandomSource;
use crate::engine::token::{Operator, Token};

/// Operand and operator counts for a target token count.
///
/// A well-formed expression has one more operand than operators, so an even
/// target rounds down to the odd length below it.
pub fn split_token_count(target: usize) -> (usize, usize) {
    let operands = target.div_ceil(2).max(1);
    (operands, operands - 1)
}

pub struct Generator<S> {
    source: S,
    config: GeneratorConfig,
}

impl<S: RandomSource> Generator<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, GeneratorConfig::default())
    }

    pub fn with_config(source: S, config: GeneratorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce a new practice expression as a space-delimited string
    pub fn generate(&mut self) -> String {
        let target = self.draw_token_count();
        let (mut operands, mut operators) = split_token_count(target);

        loop {
            for _ in 0..self.config.max_attempts {
                if let Some(expression) = self.try_build(operands, operators) {
                    return expression;
                }
            }

            debug!(
                operands,
                operators,
                attempts = self.config.max_attempts,
                "generation budget exhausted"
            );

            if operators <= self.config.min_operators {
                break;
            }
            operands -= 1;
            operators -= 1;
        }

        warn!(
            fallback = %self.config.fallback_expression,
            "falling back to fixed expression"
        );
        self.config.fallback_expression.clone()
    }

    /// Draw a target length from the weighted token-count table
    pub fn draw_token_count(&mut self) -> usize {
        let total = self.config.total_weight();
        let fallback = self
            .config
            .token_count_weights
            .last()
            .map(|&(count, _)| count)
            .unwrap_or(1);
        if total == 0 {
            return fallback;
        }

        let roll = self.source.next_unit() * total as f64;
        let mut cumulative = 0.0;
        for &(count, weight) in &self.config.token_count_weights {
            cumulative += weight as f64;
            if roll < cumulative {
                return count;
            }
        }
        fallback
    }

    /// One construction pass. Returns `None` if the candidate is rejected.
    fn try_build(&mut self, operands: usize, operators: usize) -> Option<String> {
        if operands == 0 {
            return None;
        }

        let mut tokens = Vec::with_capacity(operands + operators);
        // Simulated stack holds real values so division can be checked before committing
        let mut values: Vec<f64> = Vec::with_capacity(operands);
        let mut remaining_operands = operands;
        let mut remaining_operators = operators;

        self.push_operand(&mut tokens, &mut values);
        remaining_operands -= 1;

        while remaining_operands > 0 || remaining_operators > 0 {
            let can_add_operator = values.len() >= 2 && remaining_operators > 0;
            let can_add_operand = remaining_operands > 0;

            let add_operator = match (can_add_operator, can_add_operand) {
                (false, false) => break,
                (true, false) => true,
                (false, true) => false,
                (true, true) => {
                    let pending = values.len() + remaining_operands;
                    let surplus = pending as isize - remaining_operators as isize;
                    if surplus > 1 {
                        true
                    } else {
                        // Front-load numbers, back-load operators
                        let share = remaining_operands as f64 / operands as f64;
                        let threshold = self.config.operand_bias * share;
                        !self.source.chance(threshold)
                    }
                }
            };

            if add_operator {
                let op = self.choose_operator(&values);
                reduce(&mut values, op);
                tokens.push(Token::Operator(op));
                remaining_operators -= 1;
            } else {
                self.push_operand(&mut tokens, &mut values);
                remaining_operands -= 1;
            }
        }

        if remaining_operands != 0 || remaining_operators != 0 || values.len() != 1 {
            return None;
        }

        let expression = Expression::from_tokens(tokens).ok()?.to_string();
        let result = evaluate(&expression);
        if self.is_acceptable(result) {
            Some(expression)
        } else {
            None
        }
    }

    fn push_operand(&mut self, tokens: &mut Vec<Token>, values: &mut Vec<f64>) {
        let low = *self.config.operand_range.start();
        let high = *self.config.operand_range.end();
        let span = high.saturating_sub(low) as usize + 1;
        let value = (low + self.source.next_index(span) as u32) as f64;
        tokens.push(Token::Operand(value));
        values.push(value);
    }

    /// Pick an operator for the current simulated stack.
    ///
    /// Division is only chosen when the top two values divide exactly.
    fn choose_operator(&mut self, values: &[f64]) -> Operator {
        if self.source.chance(self.config.division_chance) && divides_exactly(values) {
            return Operator::Divide;
        }
        let choices = Operator::NON_DIVISION;
        choices[self.source.next_index(choices.len())]
    }

    fn is_acceptable(&self, result: f64) -> bool {
        result.is_finite() && result.abs() <= self.config.max_magnitude && result.fract() == 0.0
    }
}

/// Check the candidate division on a scratch copy of the stack
fn divides_exactly(values: &[f64]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let mut scratch = values.to_vec();
    let (_, _, result) = reduce(&mut scratch, Operator::Divide);
    result.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::random::{RngSource, ScriptedSource};

    #[test]
    fn test_split_token_count() {
        assert_eq!(split_token_count(5), (3, 2));
        assert_eq!(split_token_count(6), (3, 2));
        assert_eq!(split_token_count(7), (4, 3));
        assert_eq!(split_token_count(10), (5, 4));
        assert_eq!(split_token_count(1), (1, 0));
        assert_eq!(split_token_count(0), (1, 0));
    }

    #[test]
    fn test_draw_token_count_buckets() {
        let draws = vec![
            0.0, 0.39, 0.4, 0.69, 0.7, 0.89, 0.9, 0.94, 0.95, 0.97, 0.98, 0.999,
        ];
        let mut generator = Generator::new(ScriptedSource::new(draws));
        let counts: Vec<usize> = (0..12).map(|_| generator.draw_token_count()).collect();
        assert_eq!(counts, vec![5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10]);
    }

    #[test]
    fn test_scripted_draws_build_expected_expression() {
        // count=5 | operand 5 | operand 3 | pick operator | try division (5/3 inexact) -> '+'
        // | operand 1 | try division (8/1 exact) -> '/'
        let draws = vec![0.0, 0.5, 0.3, 0.9, 0.1, 0.0, 0.1, 0.1];
        let mut generator = Generator::new(ScriptedSource::new(draws));
        assert_eq!(generator.generate(), "5 3 + 1 /");
    }

    #[test]
    fn test_shrinks_when_budget_exhausted() {
        // Every draw maxes out: 10 tokens of 9s joined by '*' overflow the
        // magnitude limit until the budget shrinks to three operands.
        let mut generator = Generator::new(ScriptedSource::new(vec![0.999]));
        assert_eq!(generator.generate(), "9 9 * 9 *");
    }

    #[test]
    fn test_falls_back_when_nothing_is_acceptable() {
        let config = GeneratorConfig {
            max_magnitude: -1.0,
            ..GeneratorConfig::default()
        };
        let mut generator = Generator::with_config(ScriptedSource::new(vec![0.5]), config);
        assert_eq!(generator.generate(), "3 4 + 5 *");
    }

    #[test]
    fn test_zero_attempt_budget_falls_back() {
        let config = GeneratorConfig {
            max_attempts: 0,
            ..GeneratorConfig::default()
        };
        let mut generator = Generator::with_config(RngSource::seeded(1), config);
        assert_eq!(generator.generate(), "3 4 + 5 *");
    }

    #[test]
    fn test_divides_exactly_uses_top_two_values() {
        assert!(divides_exactly(&[7.0, 8.0, 4.0]));
        assert!(!divides_exactly(&[8.0, 3.0]));
        assert!(!divides_exactly(&[8.0, 0.0]));
        assert!(!divides_exactly(&[8.0]));
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = Generator::new(RngSource::seeded(42));
        let mut b = Generator::new(RngSource::seeded(42));
        for _ in 0..20 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_generated_expressions_are_valid() {
        let mut generator = Generator::new(RngSource::seeded(2024));
        for _ in 0..500 {
            let expr = generator.generate();
            let parsed: Expression = expr.parse().expect("generated expression must parse");
            assert_eq!(parsed.operand_count(), parsed.operator_count() + 1);
            assert!(parsed.len() <= 10, "too long: {}", expr);

            let result = evaluate(&expr);
            assert!(result.is_finite(), "{} -> {}", expr, result);
            assert!(result.abs() <= 1000.0, "{} -> {}", expr, result);
            assert_eq!(result.fract(), 0.0, "{} -> {}", expr, result);
        }
    }

    #[test]
    fn test_generated_operands_are_single_digits() {
        let mut generator = Generator::new(RngSource::seeded(9));
        for _ in 0..200 {
            let expr: Expression = generator.generate().parse().unwrap();
            for token in expr.tokens() {
                if let Token::Operand(value) = token {
                    assert!((1.0..=9.0).contains(value));
                }
            }
        }
    }
}
