//! Command parsing for the TUI command deck
//!
//! Parses what the user types after pressing `:`, supporting:
//! - `:q` or `:quit` → Quit
//! - `:h` or `:help` → instructions panel
//! - `:n` or `:new` → new expression
//! - `:t` or `:trace` → toggle the stack visualization
//! - `@7 3 5 * +` → practice a specific expression

use crate::app::AppEvent;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    NewExpression,
    ToggleTrace,
    Practice(String),
    MissingExpression,
    Unknown(String),
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    if let Some(cmd) = input.strip_prefix(':') {
        match cmd.trim() {
            "q" | "quit" => Command::Quit,
            "h" | "help" => Command::Help,
            "n" | "new" => Command::NewExpression,
            "t" | "trace" => Command::ToggleTrace,
            _ => Command::Unknown(input.to_string()),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let expression = rest.trim();
        if expression.is_empty() {
            Command::MissingExpression
        } else {
            Command::Practice(expression.to_string())
        }
    } else {
        Command::Unknown(input.to_string())
    }
}

/// Convert a parsed command into an AppEvent
///
/// This is the translation layer between command deck input and App core.
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::NewExpression => AppEvent::NewExpression,
        Command::ToggleTrace => AppEvent::ToggleVisualization,
        Command::Practice(expression) => AppEvent::PracticeExpression(expression),
        Command::MissingExpression => {
            AppEvent::Warning("Type an expression after @, e.g. @3 4 +".to_string())
        }
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
