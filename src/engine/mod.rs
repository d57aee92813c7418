//! Expression engine: evaluation, step traces and problem generation
//!
//! The trainer talks to the engine through three operations:
//!
//! - [`generate`] a new practice expression,
//! - [`evaluate`] an expression to its numeric answer,
//! - [`trace`] an expression into per-token stack steps for display.
//!
//! [`ExpressionEngine`] bundles the three behind one value with an injectable
//! random source.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod generator;
pub mod random;
pub mod token;
pub mod trace;

pub use config::{Config, GeneratorConfig, QuizConfig};
pub use error::{ExpressionError, TrainerError};
pub use evaluator::evaluate;
pub use expression::Expression;
pub use generator::Generator;
pub use random::{boxed_source, RandomSource, RngSource, ScriptedSource};
pub use token::{format_number, format_stack, Operator, Token};
pub use trace::{trace, StackStep};

use rand::rngs::{StdRng, ThreadRng};

/// Generate an expression using the thread-local RNG
pub fn generate() -> String {
    Generator::new(RngSource::thread()).generate()
}

pub struct ExpressionEngine<S = RngSource<ThreadRng>> {
    generator: Generator<S>,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        Self::with_source(RngSource::thread(), GeneratorConfig::default())
    }
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEngine<RngSource<StdRng>> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(RngSource::seeded(seed), GeneratorConfig::default())
    }
}

impl<S: RandomSource> ExpressionEngine<S> {
    pub fn with_source(source: S, config: GeneratorConfig) -> Self {
        Self {
            generator: Generator::with_config(source, config),
        }
    }

    pub fn generate(&mut self) -> String {
        self.generator.generate()
    }

    pub fn evaluate(&self, expression: &str) -> f64 {
        evaluate(expression)
    }

    pub fn trace(&self, expression: &str) -> Vec<StackStep> {
        trace(expression)
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.generator.config()
    }
}
