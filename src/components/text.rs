use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::Component;
use crate::ui::UiFrame;

/// Wrapped, optionally aligned text. The usual popup body.
#[derive(Debug, Clone)]
pub struct TextComponent {
    text: Text<'static>,
    alignment: Alignment,
    style: Style,
}

impl TextComponent {
    pub fn new(text: impl Into<Text<'static>>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
            style: Style::default(),
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Component for TextComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let paragraph = Paragraph::new(self.text.clone())
            .style(self.style)
            .alignment(self.alignment)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
