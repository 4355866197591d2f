mod event;
mod tui;

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

use taskboard_tui::api::{self, ApiClient};
use taskboard_tui::app::App;
use taskboard_tui::components;
use taskboard_tui::config::Config;
use taskboard_tui::theme;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let config = Config::load();
    let client = ApiClient::new(&config.api_url)?;
    let (requests, responses) = api::worker::spawn(client)?;
    let mut app = App::new(requests, responses);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        // Apply whatever the API worker delivered since the last tick.
        app.drain_responses();

        terminal.draw(|frame| {
            let area = frame.area();
            let w = area.width;

            // Main layout: content + status bar
            let layout = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            render_board(frame, layout[0], app, w);

            // Add-task modal overlay
            if let Some(ref form) = app.form_state {
                components::TaskForm::render(frame, area, form);
            }

            // Help overlay
            if app.show_help {
                render_help(frame, area);
            }

            components::StatusBar::render(
                frame,
                layout[1],
                app.notice.as_ref(),
                app.loading,
                app.form_state.is_some(),
            );
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            // Clear any notice on the next keypress
            app.notice = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            if app.form_state.is_some() {
                handle_form_input(app, key.code);
            } else {
                handle_normal_input(app, key.code, key.modifiers);
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('r'), _) => app.refresh(),
        (KeyCode::Char('a'), _) | (KeyCode::Char('n'), _) => app.open_task_form(),
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => app.delete_selected(),
        (KeyCode::Char(' '), _) => app.toggle_selected(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev_task(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next_task(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_task_form(),
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn render_board(frame: &mut ratatui::Frame, area: Rect, app: &App, total_width: u16) {
    if total_width < 60 {
        components::TaskList::render(
            frame,
            area,
            app.selected_date,
            &app.tasks,
            app.selected_task,
            app.loading,
        );
    } else {
        let calendar_w = if total_width >= 100 { 44 } else { 38 };
        let content = Layout::horizontal([
            Constraint::Min(20),
            Constraint::Length(calendar_w),
        ])
        .split(area);

        components::TaskList::render(
            frame,
            content[0],
            app.selected_date,
            &app.tasks,
            app.selected_task,
            app.loading,
        );

        components::MonthView::render(
            frame,
            content[1],
            app.selected_date,
            app.today,
            &app.date_counts,
        );
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(50).max(30);
    let popup_h = area.height.min(18).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        Line::from(vec![
            Span::styled("  h/l ", key_style),
            Span::styled("or ", theme::DIM_STYLE),
            Span::styled("\u{2190}/\u{2192}  ", key_style),
            Span::styled("Previous/next day", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  j/k ", key_style),
            Span::styled("or ", theme::DIM_STYLE),
            Span::styled("\u{2191}/\u{2193}  ", key_style),
            Span::styled("Select task", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key_style),
            Span::styled("Previous/next month", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  t         ", key_style),
            Span::styled("Jump to today", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Actions", section_style)),
        Line::from(vec![
            Span::styled("  a/n       ", key_style),
            Span::styled("Add a task", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Space     ", key_style),
            Span::styled("Toggle task completion", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::styled("Delete selected task", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  r         ", key_style),
            Span::styled("Refresh tasks and badges", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::DIM_STYLE),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
