use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

/// Input state for the add-task modal. The task is always created for
/// the date that was selected when the form was opened.
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub text: String,
    pub date: NaiveDate,
}

impl TaskFormState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            text: String::new(),
            date,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }
}

pub struct TaskForm;

impl TaskForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &TaskFormState) {
        // Center the popup
        let form_w = area.width.min(56).max(30);
        let form_h = area.height.min(9).max(7);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let title = format!(" Add Task for {} ", state.date.format("%B %d, %Y"));
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Min(3),    // text input
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
        ])
        .split(inner);

        let input = if state.text.is_empty() {
            Paragraph::new(Span::styled(
                "Enter your task description...",
                theme::DIM_STYLE,
            ))
            .wrap(Wrap { trim: false })
        } else {
            Paragraph::new(Span::styled(
                format!("{}_", state.text),
                Style::default().fg(Color::Cyan),
            ))
            .wrap(Wrap { trim: false })
        };
        frame.render_widget(input, rows[0]);

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme::DIM_STYLE),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::DIM_STYLE),
        ]);
        frame.render_widget(Paragraph::new(help), rows[2]);
    }
}
