//! Single field text input with an inline validation message.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct TextInput<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub focused: bool,
    pub error: Option<String>,
    pub text_style: Style,
    pub border_style: Style,
    pub focus_style: Style,
    pub error_style: Style,
}

impl<'a> TextInput<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let border = if self.error.is_some() {
            self.error_style
        } else if self.focused {
            self.focus_style
        } else {
            self.border_style
        };
        let title = match &self.error {
            Some(error) => Line::from(vec![
                Span::raw(format!("{} ", self.label)),
                Span::styled(format!("- {}", error), self.error_style),
            ]),
            None => Line::from(self.label),
        };

        let mut lines: Vec<Line> = self.value.split('\n').map(Line::from).collect();
        if self.focused {
            if let Some(last) = lines.last_mut() {
                last.spans.push(Span::styled("_", self.focus_style));
            }
        }

        let paragraph = Paragraph::new(lines)
            .style(self.text_style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border),
            );
        f.render_widget(paragraph, area);
    }
}
