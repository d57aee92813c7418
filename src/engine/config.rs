// Configuration for the expression engine and quiz session
// Defaults reproduce the trainer's tuned behavior

use std::ops::RangeInclusive;

/// Generator tuning
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Target token counts and their weights (default 5:40, 6:30, 7:20, 8:5, 9:3, 10:2)
    pub token_count_weights: Vec<(usize, u32)>,

    /// Range fresh operands are drawn from (default 1..=9)
    pub operand_range: RangeInclusive<u32>,

    /// Construction attempts per operand/operator budget before shrinking (default 50)
    pub max_attempts: usize,

    /// Largest accepted absolute result (default 1000)
    pub max_magnitude: f64,

    /// Chance of trying division when an operator is emitted (default 0.25)
    pub division_chance: f64,

    /// Base probability of emitting an operand when both kinds are legal (default 0.5).
    /// Scaled down by the share of operands already placed.
    pub operand_bias: f64,

    /// Shrinking stops once fewer operators than this would remain (default 1)
    pub min_operators: usize,

    /// Returned when every attempt fails (default "3 4 + 5 *")
    pub fallback_expression: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            token_count_weights: vec![(5, 40), (6, 30), (7, 20), (8, 5), (9, 3), (10, 2)],
            operand_range: 1..=9,
            max_attempts: 50,
            max_magnitude: 1000.0,
            division_chance: 0.25,
            operand_bias: 0.5,
            min_operators: 1,
            fallback_expression: "3 4 + 5 *".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sum of all token-count weights
    pub fn total_weight(&self) -> u32 {
        self.token_count_weights.iter().map(|&(_, w)| w).sum()
    }
}

/// Answer checking
#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Largest accepted difference between typed and expected answer (default 0.001)
    pub tolerance: f64,

    /// Longest answer the input field accepts, in characters (default 24)
    pub max_answer_len: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            max_answer_len: 24,
        }
    }
}

/// Master configuration for the trainer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub quiz: QuizConfig,
    /// Seed for reproducible sessions; `None` uses the thread RNG
    pub seed: Option<u64>,
}
