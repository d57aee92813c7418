use crate::app::mode::AppMode;
use crate::app::state::{Feedback, QuizState};
use crate::engine::StackStep;

/// Snapshot of everything the UI draws in one frame
pub struct RenderState {
    pub mode: AppMode,
    pub expression: String,
    pub answer_input: String,
    pub feedback: Option<Feedback>,
    pub show_visualization: bool,
    /// Empty unless the visualization is shown
    pub steps: Vec<StackStep>,
    pub command_input: String,
    pub status: Option<String>,
    /// (correct, attempted)
    pub tally: (u32, u32),
}

impl RenderState {
    pub fn from_quiz_state(
        mode: AppMode,
        quiz: &QuizState,
        command_input: &str,
        status: Option<&str>,
    ) -> Self {
        let steps = if quiz.show_visualization {
            quiz.steps.clone()
        } else {
            vec![]
        };

        Self {
            mode,
            expression: quiz.expression.clone(),
            answer_input: quiz.input.clone(),
            feedback: quiz.feedback.clone(),
            show_visualization: quiz.show_visualization,
            steps,
            command_input: command_input.to_string(),
            status: status.map(str::to_string),
            tally: (quiz.correct, quiz.attempted),
        }
    }
}
