/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    NewExpression,
    CheckAnswer,
    ToggleVisualization,
    AnswerInput(char),
    AnswerBackspace,
    /// Open the command deck with its first character (`:` or `@`)
    OpenCommandDeck(char),
    CommandInput(char),
    CommandBackspace,
    /// Esc: close the command deck or the instructions panel
    Dismiss,
    /// Replace the current problem with a user-supplied expression
    PracticeExpression(String),
    Help,
    Quit,
    Warning(String),
    InvalidCommand(String),
    None,
}

impl AppEvent {
    /// Events that keep the command deck open
    pub fn edits_command_deck(&self) -> bool {
        matches!(self, Self::CommandInput(_) | Self::CommandBackspace)
    }
}
