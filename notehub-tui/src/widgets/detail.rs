//! Detail panel widget for showing field/value pairs above a free text body.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, Span<'a>)>,
    pub body: Option<&'a str>,
    pub label_style: Style,
    pub border_style: Style,
}

impl<'a> DetailPanel<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let field_rows = self.fields.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(field_rows + 1), Constraint::Min(0)])
            .split(inner);

        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), self.label_style),
                    value.clone(),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(Text::from(lines)), chunks[0]);

        if let Some(body) = self.body {
            let body = Paragraph::new(body).wrap(Wrap { trim: false });
            f.render_widget(body, chunks[1]);
        }
    }
}
