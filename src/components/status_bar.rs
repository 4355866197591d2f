use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{Notice, NoticeKind};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        notice: Option<&Notice>,
        loading: bool,
        form_open: bool,
    ) {
        let w = area.width as usize;

        let mut left = String::from(" Task Board");
        if form_open {
            left.push_str(" [Add Task]");
        }
        if loading {
            left.push_str(" ...");
        }
        left.push(' ');

        // Notice takes priority over the hint line
        let (right_text, right_style) = match notice {
            Some(notice) => {
                let style = match notice.kind {
                    NoticeKind::Success => theme::SUCCESS_STYLE,
                    NoticeKind::Warning => theme::WARNING_STYLE,
                    NoticeKind::Error => theme::ERROR_STYLE,
                };
                (format!(" {} ", notice.text), style)
            }
            None => {
                let hints = if form_open {
                    " Enter:Save Esc:Cancel".to_string()
                } else if w >= 80 {
                    " hjkl:Nav [/]:Mon t:Today a:Add Sp:Toggle d:Del r:Refresh ?:Help q:Quit"
                        .to_string()
                } else if w >= 50 {
                    " jk:Select a:Add Sp:Toggle d:Del q:Quit".to_string()
                } else {
                    " ?:Help q:Quit".to_string()
                };
                (hints, theme::STATUS_STYLE)
            }
        };

        let padding_len = w.saturating_sub(left.len() + right_text.len());
        let padding = " ".repeat(padding_len);

        let line = Line::from(vec![
            Span::styled(left, theme::STATUS_STYLE),
            Span::styled(padding, theme::STATUS_STYLE),
            Span::styled(right_text, right_style),
        ]);

        let bar = Paragraph::new(line).style(theme::STATUS_STYLE);
        frame.render_widget(bar, area);
    }
}
