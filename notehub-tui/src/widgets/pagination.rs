//! Page selector widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Pages listed around the current one.
pub const PAGE_WINDOW: u32 = 7;

/// Contiguous run of at most `window` pages containing `current`.
pub fn page_window(current: u32, total: u32, window: u32) -> std::ops::RangeInclusive<u32> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let window = window.clamp(1, total);
    let half = window / 2;
    let start = current.saturating_sub(half).max(1).min(total - window + 1);
    start..=start + window - 1
}

pub struct Pagination {
    pub current: u32,
    pub total: u32,
    pub active_style: Style,
    pub inactive_style: Style,
}

impl Pagination {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::styled(
            "\u{2190} ",
            if self.current > 1 {
                self.inactive_style
            } else {
                Style::default()
            },
        )];
        for page in page_window(self.current, self.total, PAGE_WINDOW) {
            if page == self.current {
                spans.push(Span::styled(format!("[{}]", page), self.active_style));
            } else {
                spans.push(Span::styled(format!(" {} ", page), self.inactive_style));
            }
        }
        spans.push(Span::styled(
            " \u{2192}",
            if self.current < self.total {
                self.inactive_style
            } else {
                Style::default()
            },
        ));
        spans.push(Span::raw(format!("   {} of {}", self.current, self.total)));

        let paragraph =
            Paragraph::new(Line::from(spans)).block(Block::default().title("Pages").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
