use ratatui::style::{Color, Modifier, Style};

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);
pub const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
pub const BORDER_STYLE: Style = Style::new().fg(Color::Gray);
pub const STATUS_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
pub const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
pub const TODAY_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);

/// Incomplete-count badge on calendar cells.
pub const BADGE_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

// Notice colors on the status bar background.
pub const SUCCESS_STYLE: Style = Style::new()
    .fg(Color::Green)
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);
pub const WARNING_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);
pub const ERROR_STYLE: Style = Style::new()
    .fg(Color::Red)
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);
