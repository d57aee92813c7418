use crate::app::{mode::AppMode, App, AppEvent};
use crate::engine::TrainerError;
use crate::ui::command::{command_to_app_event, parse_command};
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::theme::colors;
use crate::ui::view::{
    render_answer_input, render_command_deck, render_expression, render_feedback,
    render_instructions, render_placeholder, render_stack_steps, render_status_bar,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

/// Translate a key press into an app event for the current mode
pub fn map_key(mode: AppMode, command_input: &str, key: KeyEvent) -> AppEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return AppEvent::Quit,
            KeyCode::Char('n') | KeyCode::Char('.') => return AppEvent::NewExpression,
            KeyCode::Char('t') => return AppEvent::ToggleVisualization,
            _ => {}
        }
    }

    match mode {
        AppMode::Quiz => match key.code {
            KeyCode::Enter => AppEvent::CheckAnswer,
            KeyCode::Backspace => AppEvent::AnswerBackspace,
            KeyCode::Tab => AppEvent::ToggleVisualization,
            KeyCode::F(1) | KeyCode::Char('?') => AppEvent::Help,
            KeyCode::Char(c @ (':' | '@')) => AppEvent::OpenCommandDeck(c),
            KeyCode::Char(c) => AppEvent::AnswerInput(c),
            _ => AppEvent::None,
        },
        AppMode::Command => match key.code {
            KeyCode::Enter => command_to_app_event(parse_command(command_input)),
            KeyCode::Backspace => AppEvent::CommandBackspace,
            KeyCode::Esc => AppEvent::Dismiss,
            KeyCode::Char(c) => AppEvent::CommandInput(c),
            _ => AppEvent::None,
        },
        AppMode::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('?' | 'q') => {
                AppEvent::Dismiss
            }
            _ => AppEvent::None,
        },
        AppMode::Quit => AppEvent::None,
    }
}

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    // Dropped after the terminal so the screen is restored last
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, TrainerError> {
        let guard = TerminalGuard::new()?;

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    pub fn run_event_loop(&mut self, app: &mut App) -> Result<(), TrainerError> {
        let poll_timeout = Duration::from_millis(250);
        self.render_frame(app)?;

        loop {
            if app.mode() == AppMode::Quit {
                return Ok(());
            }

            if !event::poll(poll_timeout)? {
                continue;
            }

            match event::read()? {
                // Ignore release/repeat events reported by some terminals
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let app_event = map_key(app.mode(), app.command_input(), key);
                    app.handle_event(app_event);
                }
                _ => {}
            }

            self.render_frame(app)?;
        }
    }

    pub fn render_frame(&mut self, app: &App) -> Result<(), TrainerError> {
        let render_state = app.get_render_state();

        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(Style::default().bg(colors::background())),
                area,
            );

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(3),
                    Constraint::Length(1),
                ])
                .split(area);

            frame.render_widget(render_expression(&render_state.expression), chunks[0]);
            frame.render_widget(
                render_answer_input(
                    &render_state.answer_input,
                    render_state.mode == AppMode::Quiz,
                ),
                chunks[1],
            );
            frame.render_widget(render_feedback(render_state.feedback.as_ref()), chunks[2]);

            if render_state.mode == AppMode::Help {
                frame.render_widget(render_instructions(), chunks[3]);
            } else if render_state.show_visualization {
                // Keep the final steps in view when the panel is short
                let visible_rows = chunks[3].height.saturating_sub(2) as usize;
                let total_rows = render_state.steps.len() * 3;
                let scroll = total_rows.saturating_sub(visible_rows) as u16;
                frame.render_widget(render_stack_steps(&render_state.steps, scroll), chunks[3]);
            } else {
                frame.render_widget(render_placeholder(), chunks[3]);
            }

            if render_state.mode == AppMode::Command {
                render_command_deck(
                    frame,
                    chunks[4],
                    render_state.mode,
                    &render_state.command_input,
                );
            } else {
                frame.render_widget(
                    render_status_bar(render_state.status.as_deref(), render_state.tally),
                    chunks[4],
                );
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn quiz_key(key: KeyEvent) -> AppEvent {
        map_key(AppMode::Quiz, "", key)
    }

    #[test]
    fn test_quiz_keys() {
        let cases = [
            (KeyCode::Enter, AppEvent::CheckAnswer),
            (KeyCode::Char('7'), AppEvent::AnswerInput('7')),
            (KeyCode::Char('-'), AppEvent::AnswerInput('-')),
            (KeyCode::Backspace, AppEvent::AnswerBackspace),
            (KeyCode::Tab, AppEvent::ToggleVisualization),
            (KeyCode::Char('?'), AppEvent::Help),
            (KeyCode::F(1), AppEvent::Help),
            (KeyCode::Char(':'), AppEvent::OpenCommandDeck(':')),
            (KeyCode::Char('@'), AppEvent::OpenCommandDeck('@')),
        ];
        for (code, expected) in cases {
            assert_eq!(quiz_key(press(code)), expected);
        }
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(quiz_key(ctrl(KeyCode::Char('n'))), AppEvent::NewExpression);
        assert_eq!(quiz_key(ctrl(KeyCode::Char('.'))), AppEvent::NewExpression);
        let toggle = quiz_key(ctrl(KeyCode::Char('t')));
        assert_eq!(toggle, AppEvent::ToggleVisualization);

        let quit = map_key(AppMode::Help, "", ctrl(KeyCode::Char('c')));
        assert_eq!(quit, AppEvent::Quit);
    }

    #[test]
    fn test_ctrl_enter_behaves_like_enter() {
        assert_eq!(quiz_key(ctrl(KeyCode::Enter)), AppEvent::CheckAnswer);

        let submit = map_key(AppMode::Command, ":n", ctrl(KeyCode::Enter));
        assert_eq!(submit, AppEvent::NewExpression);
    }

    #[test]
    fn test_command_deck_submit_parses_buffer() {
        let quit = map_key(AppMode::Command, ":q", press(KeyCode::Enter));
        assert_eq!(quit, AppEvent::Quit);

        let practice = map_key(AppMode::Command, "@3 4 +", press(KeyCode::Enter));
        assert_eq!(practice, AppEvent::PracticeExpression("3 4 +".to_string()));

        let typed = map_key(AppMode::Command, ":", press(KeyCode::Char('x')));
        assert_eq!(typed, AppEvent::CommandInput('x'));

        let closed = map_key(AppMode::Command, ":", press(KeyCode::Esc));
        assert_eq!(closed, AppEvent::Dismiss);
    }

    #[test]
    fn test_help_closes_on_escape() {
        let closed = map_key(AppMode::Help, "", press(KeyCode::Esc));
        assert_eq!(closed, AppEvent::Dismiss);

        let ignored = map_key(AppMode::Help, "", press(KeyCode::Char('x')));
        assert_eq!(ignored, AppEvent::None);
    }

    #[test]
    fn test_tui_failures_surface_as_trainer_errors() {
        fn assert_trainer_result<T>(_: fn() -> Result<T, TrainerError>) {}
        assert_trainer_result(TuiManager::new);

        let err: TrainerError = io::Error::new(io::ErrorKind::NotFound, "no tty").into();
        assert_eq!(err.to_string(), "I/O error: no tty");
    }
}
