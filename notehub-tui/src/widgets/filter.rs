//! Filter bar widget, used for the tag tabs and the tag selector.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct FilterOption {
    pub label: String,
    pub active: bool,
}

impl FilterOption {
    /// One option per label, marking the one equal to `active`.
    pub fn from_labels<'l>(labels: impl IntoIterator<Item = &'l str>, active: &str) -> Vec<Self> {
        labels
            .into_iter()
            .map(|label| FilterOption {
                label: label.to_string(),
                active: label == active,
            })
            .collect()
    }
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    pub active_style: Style,
    pub inactive_style: Style,
    pub border_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let spans: Vec<Span> = self
            .filters
            .iter()
            .map(|filter| {
                if filter.active {
                    Span::styled(format!("[{}]", filter.label), self.active_style)
                } else {
                    Span::styled(format!(" {} ", filter.label), self.inactive_style)
                }
            })
            .collect();

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );
        f.render_widget(paragraph, area);
    }
}
