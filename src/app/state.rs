use crate::engine::config::QuizConfig;
use crate::engine::{evaluate, format_number, trace, StackStep};

/// Outcome of the last answer check
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Correct(f64),
    Incorrect(f64),
    /// Typed answer could not be read as a number
    Invalid(String),
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::Correct(answer) => {
                format!("Correct! {} is the right answer.", format_number(*answer))
            }
            Feedback::Incorrect(answer) => {
                let answer = format_number(*answer);
                format!("Incorrect. The correct answer is {}.", answer)
            }
            Feedback::Invalid(message) => message.clone(),
        }
    }
}

/// The problem on screen and what the user has typed for it
pub struct QuizState {
    pub expression: String,
    pub answer: f64,
    pub steps: Vec<StackStep>,
    pub input: String,
    pub feedback: Option<Feedback>,
    pub show_visualization: bool,
    /// Problems checked at least once
    pub attempted: u32,
    /// Problems whose first check was correct
    pub correct: u32,
    checked: bool,
    config: QuizConfig,
}

impl QuizState {
    pub fn new(expression: String, config: QuizConfig) -> Self {
        let mut state = Self {
            expression: String::new(),
            answer: f64::NAN,
            steps: vec![],
            input: String::new(),
            feedback: None,
            show_visualization: false,
            attempted: 0,
            correct: 0,
            checked: false,
            config,
        };
        state.new_problem(expression);
        state
    }

    pub fn new_with_default_config(expression: String) -> Self {
        Self::new(expression, QuizConfig::default())
    }

    /// Swap in a new expression, keeping the tally and visualization toggle
    pub fn new_problem(&mut self, expression: String) {
        self.answer = evaluate(&expression);
        self.steps = trace(&expression);
        self.expression = expression;
        self.input.clear();
        self.feedback = None;
        self.checked = false;
    }

    /// Append a character to the typed answer. Returns `false` if rejected.
    pub fn push_char(&mut self, c: char) -> bool {
        let accepted = c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E');
        if !accepted || self.input.chars().count() >= self.config.max_answer_len {
            return false;
        }
        self.input.push(c);
        self.clear_validation_message();
        true
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.clear_validation_message();
    }

    /// Compare the typed answer with the expected one
    pub fn check_answer(&mut self) -> &Feedback {
        let feedback = match self.input.trim().parse::<f64>() {
            Ok(typed) if typed.is_finite() => {
                let is_correct = (typed - self.answer).abs() < self.config.tolerance;
                if !self.checked {
                    self.checked = true;
                    self.attempted += 1;
                    if is_correct {
                        self.correct += 1;
                    }
                }
                if is_correct {
                    Feedback::Correct(self.answer)
                } else {
                    Feedback::Incorrect(self.answer)
                }
            }
            _ => Feedback::Invalid("Please enter a valid number".to_string()),
        };
        self.feedback.insert(feedback)
    }

    pub fn toggle_visualization(&mut self) {
        self.show_visualization = !self.show_visualization;
    }

    fn clear_validation_message(&mut self) {
        if matches!(self.feedback, Some(Feedback::Invalid(_))) {
            self.feedback = None;
        }
    }
}
