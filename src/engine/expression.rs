//! Validated RPN expressions
//!
//! `Expression` is the checked form of the space-delimited strings the engine
//! trades in. Parsing enforces the structural rule: every operator finds two
//! values on the stack and exactly one value remains at the end.

use std::fmt;
use std::str::FromStr;

use crate::engine::error::ExpressionError;
use crate::engine::token::{split_tokens, Token};

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// Build from tokens, checking the stack-depth invariant.
    ///
    /// Positions in errors are 1-based, matching the step numbers shown to
    /// the user.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, ExpressionError> {
        if tokens.is_empty() {
            return Err(ExpressionError::Empty);
        }

        let mut depth = 0usize;
        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Operand(_) => depth += 1,
                Token::Operator(op) => {
                    if depth < 2 {
                        return Err(ExpressionError::StackUnderflow {
                            operator: op.symbol().to_string(),
                            position: index + 1,
                        });
                    }
                    depth -= 1;
                }
            }
        }

        if depth != 1 {
            return Err(ExpressionError::UnreducedStack { remaining: depth });
        }

        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn operand_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_operand()).count()
    }

    pub fn operator_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_operator()).count()
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = split_tokens(s)
            .enumerate()
            .map(|(index, raw)| {
                Token::parse(raw).ok_or_else(|| ExpressionError::UnknownToken {
                    token: raw.to_string(),
                    position: index + 1,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_tokens(tokens)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        f.write_str(&parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::token::Operator;

    #[test]
    fn test_parse_well_formed() {
        let expr: Expression = "7 3 5 * +".parse().unwrap();
        assert_eq!(expr.len(), 5);
        assert_eq!(expr.operand_count(), 3);
        assert_eq!(expr.operator_count(), 2);
        assert_eq!(expr.tokens()[3], Token::Operator(Operator::Multiply));
    }

    #[test]
    fn test_single_operand_is_well_formed() {
        let expr: Expression = "42".parse().unwrap();
        assert_eq!(expr.to_string(), "42");
    }

    #[test]
    fn test_display_normalizes_spacing() {
        let expr: Expression = "  3   4  + ".parse().unwrap();
        assert_eq!(expr.to_string(), "3 4 +");
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!("".parse::<Expression>(), Err(ExpressionError::Empty));
        assert_eq!("   ".parse::<Expression>(), Err(ExpressionError::Empty));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(
            "3 4 %".parse::<Expression>(),
            Err(ExpressionError::UnknownToken {
                token: "%".to_string(),
                position: 3,
            })
        );
    }

    #[test]
    fn test_underflow() {
        assert_eq!(
            "3 + 4".parse::<Expression>(),
            Err(ExpressionError::StackUnderflow {
                operator: "+".to_string(),
                position: 2,
            })
        );
    }

    #[test]
    fn test_leftover_values() {
        assert_eq!(
            "3 4 5 +".parse::<Expression>(),
            Err(ExpressionError::UnreducedStack { remaining: 2 })
        );
    }
}
