use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural problems found while reading an RPN expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Expression is empty")]
    Empty,

    #[error("Unknown token '{token}' at position {position}")]
    UnknownToken { token: String, position: usize },

    #[error("Operator '{operator}' at position {position} needs two values on the stack")]
    StackUnderflow { operator: String, position: usize },

    #[error("Expression leaves {remaining} values on the stack instead of one")]
    UnreducedStack { remaining: usize },
}

/// Errors surfaced by the trainer binary
#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid expression: {0}")]
    Expression(#[from] ExpressionError),

    #[error("Cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_token_message() {
        let err = ExpressionError::UnknownToken {
            token: "x".to_string(),
            position: 2,
        };
        assert_eq!(err.to_string(), "Unknown token 'x' at position 2");
    }

    #[test]
    fn test_underflow_message() {
        let err = ExpressionError::StackUnderflow {
            operator: "+".to_string(),
            position: 1,
        };
        assert_eq!(
            err.to_string(),
            "Operator '+' at position 1 needs two values on the stack"
        );
    }

    #[test]
    fn test_trainer_error_wraps_expression_error() {
        let err: TrainerError = ExpressionError::Empty.into();
        assert!(matches!(
            err,
            TrainerError::Expression(ExpressionError::Empty)
        ));
        assert_eq!(err.to_string(), "Invalid expression: Expression is empty");
    }

    #[test]
    fn test_trainer_error_wraps_io_error() {
        let io_err = io::Error::new(io::ErrorKind::Other, "boom");
        let err: TrainerError = io_err.into();
        assert!(matches!(err, TrainerError::Io(_)));
    }
}
