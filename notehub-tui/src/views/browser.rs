//! Notes browser view: search box, tag tabs, list, detail, and pages.

use crate::browser::{BrowserBody, EMPTY_STATE_MESSAGE};
use crate::nav::{Focus, TAG_FILTERS};
use crate::state::App;
use crate::theme::tag_color;
use crate::widgets::{DetailPanel, FilterBar, FilterOption, Pagination, StatusIndicator, TextInput};
use notehub_core::Note;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let pagination = app.browser.pagination();
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ];
    if pagination.is_some() {
        constraints.push(Constraint::Length(3));
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let theme = &app.theme;
    let search = TextInput {
        label: if app.browser.is_search_pending() {
            "Search (typing...)"
        } else {
            "Search"
        },
        value: app.browser.search_input(),
        focused: app.focus == Focus::Search,
        error: None,
        text_style: Style::default().fg(theme.text),
        border_style: Style::default().fg(theme.border),
        focus_style: Style::default().fg(theme.border_focus),
        error_style: Style::default().fg(theme.error),
    };
    search.render(f, rows[0]);

    let tabs = FilterOption::from_labels(
        TAG_FILTERS.iter().map(|t| t.label()),
        app.browser.tag().label(),
    );
    FilterBar {
        title: "Tags",
        filters: &tabs,
        active_style: Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
        inactive_style: Style::default().fg(theme.text_dim),
        border_style: Style::default().fg(theme.border),
    }
    .render(f, rows[1]);

    render_body(f, app, rows[2]);

    if let Some(info) = pagination {
        Pagination {
            current: info.current,
            total: info.total,
            active_style: Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
            inactive_style: Style::default().fg(theme.text),
        }
        .render(f, rows[3]);
    }
}

fn render_body(f: &mut Frame<'_>, app: &App, area: Rect) {
    let view = app.browser.view();
    let area = if view.loading {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        StatusIndicator {
            title: "Status",
            status: "Loading notes...".to_string(),
            style: Style::default().fg(app.theme.info),
        }
        .render(f, split[0]);
        split[1]
    } else {
        area
    };

    match view.body {
        BrowserBody::Blank => {
            f.render_widget(Block::default().title("Notes").borders(Borders::ALL), area);
        }
        BrowserBody::Error(message) => {
            let detail = app.browser.failure_detail().unwrap_or_default();
            StatusIndicator {
                title: "Notes",
                status: format!("{}\n{}\nPress Ctrl-r to retry.", message, detail),
                style: Style::default().fg(app.theme.error),
            }
            .render(f, area);
        }
        BrowserBody::Empty => {
            let empty = Paragraph::new(EMPTY_STATE_MESSAGE)
                .style(Style::default().fg(app.theme.text_dim))
                .block(Block::default().title("Notes").borders(Borders::ALL));
            f.render_widget(empty, area);
        }
        BrowserBody::Notes(notes) => render_notes(f, app, notes, area),
    }
}

fn render_notes(f: &mut Frame<'_>, app: &App, notes: &[Note], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let items: Vec<ListItem> = notes
        .iter()
        .map(|note| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", note.tag),
                    Style::default().fg(tag_color(note.tag, &app.theme)),
                ),
                Span::raw(note.title.clone()),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.browser.selected_index()));

    let list = List::new(items)
        .block(Block::default().title("Notes").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.bg_highlight),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(note) = app.browser.selected_note() {
        let mut fields = vec![
            (
                "Tag",
                Span::styled(
                    note.tag.as_str(),
                    Style::default().fg(tag_color(note.tag, &app.theme)),
                ),
            ),
            ("Created", Span::raw(note.created_at.format("%Y-%m-%d %H:%M").to_string())),
        ];
        if let Some(updated) = note.updated_at {
            fields.push(("Updated", Span::raw(updated.format("%Y-%m-%d %H:%M").to_string())));
        }
        DetailPanel {
            title: note.title.as_str(),
            fields,
            body: Some(note.content.as_str()),
            label_style: Style::default().fg(app.theme.secondary),
            border_style: Style::default().fg(app.theme.border),
        }
        .render(f, chunks[1]);
    }
}
