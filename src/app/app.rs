use tracing::{debug, info, warn};

use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::RenderState;
use super::state::QuizState;
use crate::engine::{boxed_source, Config, Expression, ExpressionEngine, RandomSource};

pub struct App {
    pub mode: AppMode,
    pub quiz: QuizState,
    engine: ExpressionEngine<Box<dyn RandomSource>>,
    command_input: String,
    status: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Build the app and deal the first problem
    pub fn with_config(config: Config) -> Self {
        Self::with_source(boxed_source(config.seed), config)
    }

    pub fn with_source(source: Box<dyn RandomSource>, config: Config) -> Self {
        let mut engine = ExpressionEngine::with_source(source, config.generator);
        let expression = engine.generate();
        Self {
            mode: AppMode::Quiz,
            quiz: QuizState::new(expression, config.quiz),
            engine,
            command_input: String::new(),
            status: None,
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn command_input(&self) -> &str {
        &self.command_input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        // Anything other than editing the deck closes it
        if self.mode == AppMode::Command && !event.edits_command_deck() {
            self.command_input.clear();
            self.mode = AppMode::Quiz;
        }

        match event {
            AppEvent::NewExpression => self.new_expression(),
            AppEvent::CheckAnswer => {
                let feedback = self.quiz.check_answer().clone();
                debug!(expression = %self.quiz.expression, ?feedback, "answer checked");
                self.status = None;
            }
            AppEvent::ToggleVisualization => self.quiz.toggle_visualization(),
            AppEvent::AnswerInput(c) => {
                self.quiz.push_char(c);
            }
            AppEvent::AnswerBackspace => self.quiz.backspace(),
            AppEvent::OpenCommandDeck(prefix) => {
                self.command_input.clear();
                self.command_input.push(prefix);
                self.mode = AppMode::Command;
            }
            AppEvent::CommandInput(c) => self.command_input.push(c),
            AppEvent::CommandBackspace => {
                self.command_input.pop();
                if self.command_input.is_empty() {
                    self.mode = AppMode::Quiz;
                }
            }
            AppEvent::Dismiss => self.mode = AppMode::Quiz,
            AppEvent::PracticeExpression(input) => self.practice(&input),
            AppEvent::Help => self.mode = AppMode::Help,
            AppEvent::Quit => self.mode = AppMode::Quit,
            AppEvent::Warning(message) => self.status = Some(message),
            AppEvent::InvalidCommand(input) => {
                self.status = Some(format!("Unknown command: {}", input));
            }
            AppEvent::None => {}
        }
    }

    fn new_expression(&mut self) {
        let expression = self.engine.generate();
        info!(%expression, "new expression");
        self.quiz.new_problem(expression);
        self.status = None;
        // The instructions panel would hide the new problem
        if self.mode == AppMode::Help {
            self.mode = AppMode::Quiz;
        }
    }

    fn practice(&mut self, input: &str) {
        match input.parse::<Expression>() {
            Ok(expression) => {
                info!(%expression, "practicing custom expression");
                self.quiz.new_problem(expression.to_string());
                self.status = inexact_answer_note(self.quiz.answer).map(str::to_string);
            }
            Err(err) => {
                warn!(input, error = %err, "rejected custom expression");
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn get_render_state(&self) -> RenderState {
        RenderState::from_quiz_state(
            self.mode,
            &self.quiz,
            &self.command_input,
            self.status.as_deref(),
        )
    }
}

/// Why a practice expression has no answer that can be typed in
fn inexact_answer_note(answer: f64) -> Option<&'static str> {
    if answer.is_nan() {
        Some("No exact answer: a division does not come out even")
    } else if answer.is_infinite() {
        Some("No exact answer: the result is too large")
    } else {
        None
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
