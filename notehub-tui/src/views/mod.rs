//! View rendering dispatch.

pub mod browser;
pub mod creator;

use crate::keys::InputMode;
use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::theme::notification_color;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);
    browser::render(f, app, layout[1]);
    if let Some(creator) = app.browser.creator() {
        let area = centered_rect(70, 80, f.size());
        creator::render(f, app, creator, area);
    }
    render_footer(f, app, layout[2]);
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "NoteHub",
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | Tag: {}", app.browser.tag().label())),
    ];
    if let Some(info) = app.browser.pagination() {
        spans.push(Span::raw(format!(" | Page {}/{}", info.current, info.total)));
    }
    let search = app.browser.effective_search();
    if !search.is_empty() {
        spans.push(Span::raw(format!(" | Search: \"{}\"", search)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(header, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match app.input_mode() {
        InputMode::Browse => {
            "/ search • Tab tag • j/k select • h/l page • g/G first/last • n new • Ctrl-r refresh • q quit"
        }
        InputMode::Search => "type to search • Enter/Esc done • Ctrl-u clear • Tab tag",
        InputMode::Form => {
            "Tab next field • \u{2190}/\u{2192} tag • Alt-Enter newline • Enter submit • Esc cancel"
        }
    };
    let (text, style) = if let Some(note) = app.latest_notification() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        };
        (
            format!("{}: {}", label, note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
