//! Note creation modal.

use crate::creator::NoteCreator;
use crate::state::App;
use crate::widgets::{FilterBar, FilterOption, TextInput};
use notehub_core::{DraftField, NoteTag, CONTENT_MAX_CHARS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, creator: &NoteCreator, area: Rect) {
    let theme = &app.theme;
    f.render_widget(Clear, area);
    let block = Block::default()
        .title("New note")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focus));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);

    let draft = creator.draft();
    let input = |field: DraftField, label: &'static str| TextInput {
        label,
        value: draft.value(field),
        focused: creator.focus() == field,
        error: creator.error_for(field).map(|e| e.to_string()),
        text_style: Style::default().fg(theme.text),
        border_style: Style::default().fg(theme.border),
        focus_style: Style::default().fg(theme.border_focus),
        error_style: Style::default().fg(theme.error),
    };

    input(DraftField::Title, "Title").render(f, rows[0]);

    let content_label = format!(
        "Content ({}/{})",
        draft.content.chars().count(),
        CONTENT_MAX_CHARS
    );
    TextInput {
        label: &content_label,
        ..input(DraftField::Content, "Content")
    }
    .render(f, rows[1]);

    let options = FilterOption::from_labels(NoteTag::ALL.iter().map(|t| t.as_str()), &draft.tag);
    let tag_error = creator.error_for(DraftField::Tag).map(|e| e.to_string());
    let tag_title = match &tag_error {
        Some(error) => format!("Tag - {}", error),
        None => "Tag".to_string(),
    };
    let tag_border = if tag_error.is_some() {
        theme.error
    } else if creator.focus() == DraftField::Tag {
        theme.border_focus
    } else {
        theme.border
    };
    FilterBar {
        title: &tag_title,
        filters: &options,
        active_style: Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
        inactive_style: Style::default().fg(theme.text_dim),
        border_style: Style::default().fg(tag_border),
    }
    .render(f, rows[2]);

    let submit_style = if creator.is_submitting() {
        Style::default().fg(theme.text_muted)
    } else {
        Style::default()
            .fg(theme.success)
            .add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![
        Span::styled("[Esc] Cancel", Style::default().fg(theme.text_dim)),
        Span::raw("   "),
        Span::styled(format!("[Enter] {}", creator.submit_label()), submit_style),
    ];
    if let Some(error) = creator.request_error() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(error.to_string(), Style::default().fg(theme.error)));
    }
    let footer = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, rows[3]);
}
