use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::api::Task;
use crate::theme;

pub struct TaskList;

impl TaskList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        tasks: &[Task],
        selected_index: usize,
        loading: bool,
    ) {
        let w = area.width as usize;

        let title = if w >= 40 {
            format!(" Tasks for {} ", date.format("%A, %B %d, %Y"))
        } else if w >= 24 {
            format!(" Tasks for {} ", date.format("%b %d, %Y"))
        } else {
            format!(" {} ", date.format("%m/%d"))
        };

        let count_str = if tasks.is_empty() {
            String::new()
        } else {
            let open = tasks.iter().filter(|t| !t.completed).count();
            format!(" {} open / {} total ", open, tasks.len())
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::HEADER_STYLE)
            .title_bottom(Line::from(Span::styled(count_str, theme::DIM_STYLE)))
            .borders(Borders::ALL)
            .border_style(theme::BORDER_STYLE);

        if loading {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("Loading tasks...").style(theme::DIM_STYLE);
            frame.render_widget(msg, inner);
            return;
        }

        if tasks.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new("No tasks for this date. Press 'a' to add one.")
                .style(theme::DIM_STYLE);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| format_task(task, i == selected_index, inner_w))
            .collect();

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

fn format_task(task: &Task, is_selected: bool, inner_w: usize) -> ListItem<'static> {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };

    let checkbox_style = if is_selected {
        theme::SELECTED_STYLE
    } else {
        Style::default()
    };

    let text_style = if is_selected {
        theme::SELECTED_STYLE
    } else if task.completed {
        Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", checkbox), checkbox_style),
        Span::styled(truncate(&task.text, inner_w.saturating_sub(12)), text_style),
    ];

    // Creation time, if the server sent one and there is room
    if let Some(created) = task.created_at {
        let created_str = format!(" {}", created.format("%H:%M"));
        if spans.iter().map(|s| s.width()).sum::<usize>() + created_str.len() < inner_w {
            spans.push(Span::styled(created_str, theme::DIM_STYLE));
        }
    }

    ListItem::new(Line::from(spans))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Buy milk", 20), "Buy milk");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("a very long task description", 10), "a very ...");
    }
}
