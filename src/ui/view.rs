use crate::app::mode::AppMode;
use crate::app::Feedback;
use crate::engine::{format_number, StackStep};
use crate::ui::theme::colors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render_expression(expression: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        expression.to_string(),
        Style::default()
            .fg(colors::accent())
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Calculate this expression ")
            .border_style(Style::default().fg(colors::dimmed())),
    )
    .style(Style::default().bg(colors::background()))
}

pub fn render_answer_input(input: &str, focused: bool) -> Paragraph<'static> {
    let cursor = if focused { "▏" } else { "" };
    let text = if input.is_empty() && !focused {
        Span::styled("Enter your answer", Style::default().fg(colors::dimmed()))
    } else {
        Span::styled(
            format!("{}{}", input, cursor),
            Style::default().fg(colors::text()),
        )
    };

    Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your Answer ")
            .border_style(Style::default().fg(colors::dimmed())),
    )
}

pub fn render_feedback(feedback: Option<&Feedback>) -> Paragraph<'static> {
    let Some(feedback) = feedback else {
        return Paragraph::new("");
    };

    let color = match feedback {
        Feedback::Correct(_) => colors::correct(),
        Feedback::Incorrect(_) | Feedback::Invalid(_) => colors::incorrect(),
    };
    let modifier = match feedback {
        Feedback::Invalid(_) => Modifier::empty(),
        _ => Modifier::BOLD,
    };

    Paragraph::new(feedback.message())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(modifier))
}

/// Draw a stack as a row of boxed cells, bottom of the stack on the left
pub fn stack_cells(stack: &[f64]) -> String {
    if stack.is_empty() {
        return "(empty)".to_string();
    }

    let labels: Vec<String> = stack.iter().map(|&v| format_number(v)).collect();
    let width = labels.iter().map(|l| l.width()).max().unwrap_or(1).max(3);

    labels
        .iter()
        .map(|label| {
            let pad = width - label.width();
            let left = pad / 2;
            format!("[{}{}{}]", " ".repeat(left), label, " ".repeat(pad - left))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn step_lines(steps: &[StackStep]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(steps.len() * 3);
    for (index, step) in steps.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("Step {}: Parsing \"{}\"", index + 1, step.token),
            Style::default().fg(colors::dimmed()),
        )));
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<32}", stack_cells(&step.next_stack)),
                Style::default().fg(colors::accent()),
            ),
            Span::styled(
                step.description.clone(),
                Style::default().fg(colors::text()),
            ),
        ]));
        lines.push(Line::from(""));
    }
    lines
}

pub fn render_stack_steps(steps: &[StackStep], scroll: u16) -> Paragraph<'static> {
    Paragraph::new(step_lines(steps))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Stack Visualization ")
                .border_style(Style::default().fg(colors::dimmed())),
        )
        .scroll((scroll, 0))
}

pub const INSTRUCTIONS: &str = "\
RPN (Reverse Polish Notation) uses a stack-based approach to calculate expressions:

  1. Numbers are pushed onto the stack
  2. When an operator is encountered, it pops the top two values
  3. The operator is applied to these values
  4. The result is pushed back onto the stack

Example: 7 3 5 * +

  - Push 7, 3, 5 onto stack -> [7, 3, 5]
  - See * operator: pop 5 and 3, calculate 3 * 5 = 15
  - Push 15 onto stack -> [7, 15]
  - See + operator: pop 15 and 7, calculate 7 + 15 = 22
  - Push 22 onto stack -> [22]
  - Final answer: 22

Division only appears when it comes out even.

Keys: Enter check  Ctrl+N new  Tab stack view  : or @ command deck  Esc close";

pub fn render_instructions() -> Paragraph<'static> {
    let style = Style::default().fg(colors::text());
    Paragraph::new(INSTRUCTIONS)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" How RPN Works ")
                .border_style(Style::default().fg(colors::accent())),
        )
        .style(style.bg(colors::background()))
}

pub fn render_placeholder() -> Paragraph<'static> {
    let text = "Tab shows the stack visualization\n? explains how RPN works\n:q to quit";
    let style = Style::default().fg(colors::dimmed());
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style.bg(colors::background()))
}

const STATUS_HINTS: &str = "Enter check · Ctrl+N new · Tab stack · ? help · :q quit";

pub fn status_text(status: Option<&str>, tally: (u32, u32)) -> String {
    let (correct, attempted) = tally;
    let message = status.unwrap_or(STATUS_HINTS);
    format!("{}  |  Score {}/{}", message, correct, attempted)
}

pub fn render_status_bar(status: Option<&str>, tally: (u32, u32)) -> Line<'static> {
    let color = if status.is_some() {
        colors::incorrect()
    } else {
        colors::dimmed()
    };
    Line::from(Span::styled(
        status_text(status, tally),
        Style::default().fg(color),
    ))
}

pub fn render_command_deck(frame: &mut Frame, area: Rect, mode: AppMode, input: &str) {
    frame.render_widget(Clear, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let accent_bar = Paragraph::new("▌")
        .style(Style::default().fg(colors::accent()).bg(colors::surface()));
    frame.render_widget(accent_bar, layout[0]);

    let mode_indicator = match mode {
        AppMode::Command => " COMMAND ",
        AppMode::Quiz => " QUIZ ",
        AppMode::Help => " HELP ",
        AppMode::Quit => " QUIT ",
    };

    let input_text = format!("{} {}▏", mode_indicator, input);
    let input_widget = Paragraph::new(input_text)
        .style(Style::default().fg(colors::text()).bg(colors::surface()));

    frame.render_widget(input_widget, layout[1]);
}
