use std::fmt;

/// Binary arithmetic operators understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Operators the generator picks from when it does not attempt division
    pub const NON_DIVISION: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single unit of an RPN expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Operand(f64),
    Operator(Operator),
}

impl Token {
    /// Classify one whitespace-free chunk of input.
    ///
    /// Operator symbols win over numbers so that a lone `-` is subtraction,
    /// while `-3` still reads as a negative operand.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(op) = Operator::from_symbol(raw) {
            return Some(Token::Operator(op));
        }
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Token::Operand)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Operand(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(value) => f.write_str(&format_number(*value)),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Split an expression string into raw token chunks.
///
/// Any run of whitespace separates tokens, so `"3  4 +"` and `"3 4 +"` are
/// the same expression.
pub fn split_tokens(expression: &str) -> impl Iterator<Item = &str> {
    expression.split_whitespace()
}

/// Render a stack value the way the trainer shows it.
///
/// Integral values print without a fractional part (`22`, not `22.0`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        // Normalize -0 so it prints as 0
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

/// Render a whole stack as `[a, b, c]`
pub fn format_stack(stack: &[f64]) -> String {
    let items: Vec<String> = stack.iter().map(|&v| format_number(v)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operators() {
        assert_eq!(Token::parse("+"), Some(Token::Operator(Operator::Add)));
        assert_eq!(Token::parse("-"), Some(Token::Operator(Operator::Subtract)));
        assert_eq!(Token::parse("*"), Some(Token::Operator(Operator::Multiply)));
        assert_eq!(Token::parse("/"), Some(Token::Operator(Operator::Divide)));
    }

    #[test]
    fn test_parse_operands() {
        assert_eq!(Token::parse("7"), Some(Token::Operand(7.0)));
        assert_eq!(Token::parse("10"), Some(Token::Operand(10.0)));
        assert_eq!(Token::parse("-3"), Some(Token::Operand(-3.0)));
        assert_eq!(Token::parse("2.5"), Some(Token::Operand(2.5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Token::parse("x"), None);
        assert_eq!(Token::parse("^"), None);
        assert_eq!(Token::parse(""), None);
        assert_eq!(Token::parse("inf"), None);
        assert_eq!(Token::parse("NaN"), None);
    }

    #[test]
    fn test_split_tokens_collapses_whitespace() {
        let tokens: Vec<&str> = split_tokens("  3   4\t+ ").collect();
        assert_eq!(tokens, vec!["3", "4", "+"]);
    }

    #[test]
    fn test_format_number_integral() {
        assert_eq!(format_number(22.0), "22");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_fractional_and_nan() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_stack() {
        assert_eq!(format_stack(&[7.0, 3.0, 5.0]), "[7, 3, 5]");
        assert_eq!(format_stack(&[]), "[]");
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Operand(9.0).to_string(), "9");
        assert_eq!(Token::Operator(Operator::Divide).to_string(), "/");
    }
}
