use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Clear};

use super::Popup;
use super::geometry::FloatRect;
use super::styles::{NodeStyle, StyleKey};
use crate::constants::{CLOSE_LABEL, RESIZE_GLYPH};
use crate::term_color::parse_css_color;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string};

/// True when a CSS radius value is anything other than zero.
pub fn radius_is_rounded(value: &str) -> bool {
    value.split_whitespace().any(|token| {
        let numeric: String = token
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        numeric.parse::<f64>().is_ok_and(|n| n > 0.0)
    })
}

fn has_shadow(style: &NodeStyle) -> bool {
    style
        .get(StyleKey::BoxShadow)
        .is_some_and(|v| !v.trim().eq_ignore_ascii_case("none"))
}

fn border_type(style: &NodeStyle) -> BorderType {
    let rounded = StyleKey::RADII
        .into_iter()
        .filter_map(|key| style.get(key))
        .any(radius_is_rounded);
    if rounded {
        BorderType::Rounded
    } else {
        BorderType::Plain
    }
}

impl Popup {
    /// Draw backdrop and panel over whatever the host already drew.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let viewport = frame.area();
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }
        let panel = self.sync(viewport);
        if self.is_open() {
            let mut backdrop = theme::backdrop_style();
            if let Some(color) = self
                .applied
                .backdrop
                .get(StyleKey::BackgroundColor)
                .and_then(parse_css_color)
            {
                backdrop = backdrop.bg(color);
            }
            frame.patch_style(viewport, backdrop);
        }
        let visible = panel.clip(viewport);
        if visible.width == 0 || visible.height == 0 {
            return;
        }
        if has_shadow(&self.applied.foreground) {
            for strip in shadow_strips(panel) {
                frame.patch_style(strip.clip(viewport), theme::shadow_style());
            }
        }
        let local = Rect::new(0, 0, panel.width, panel.height);
        let mut offscreen = Buffer::empty(local);
        self.render_panel(&mut UiFrame::from_parts(local, &mut offscreen));
        frame.blit_from_signed(&offscreen, panel);
    }

    fn render_panel(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        let flags = self.state.flags;
        let border = if flags.over || flags.moving || flags.resizing {
            theme::panel_border_active()
        } else {
            theme::panel_border()
        };
        let block = Block::bordered()
            .border_type(border_type(&self.applied.foreground))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme::panel_bg()).fg(theme::panel_fg()))
            .title(self.title.as_str())
            .title_style(theme::title_style());
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        if !self.content.is_empty() && inner.width > 0 && inner.height > 0 {
            let slots = Layout::vertical(vec![Constraint::Fill(1); self.content.len()]).split(inner);
            let focused = self.is_open();
            for (node, slot) in self.content.iter_mut().zip(slots.iter()) {
                node.render(frame, *slot, focused);
            }
        }

        let buffer = frame.buffer_mut();
        if let Some(close) = self.layout.close_button {
            let x = (close.x - self.layout.panel.x) as u16;
            safe_set_string(buffer, area, x, 0, CLOSE_LABEL, theme::close_button_style());
        }
        if self.layout.resize_handle.is_some() {
            safe_set_string(
                buffer,
                area,
                area.width.saturating_sub(1),
                area.height.saturating_sub(1),
                RESIZE_GLYPH,
                theme::resize_handle_style(),
            );
        }
    }
}

/// Cells one to the right of and one below the panel.
fn shadow_strips(panel: FloatRect) -> [FloatRect; 2] {
    [
        FloatRect {
            x: panel.x + panel.width as i32,
            y: panel.y + 1,
            width: 1,
            height: panel.height,
        },
        FloatRect {
            x: panel.x + 1,
            y: panel.y + panel.height as i32,
            width: panel.width,
            height: 1,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TextComponent;
    use crate::content::WrapTarget;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::{Color, Modifier};
    use std::time::Duration;

    fn open_popup(style: Option<&str>) -> Popup {
        let mut popup = Popup::new().with_title("Hello");
        popup.set_preferred_size(20, 6);
        popup.set_transition_duration(Duration::ZERO);
        if let Some(style) = style {
            popup.assign_style(style);
        }
        popup.wrap(WrapTarget::Component(Box::new(TextComponent::new("body"))));
        popup.open();
        popup
    }

    fn draw(popup: &mut Popup) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| {
                let mut ui = UiFrame::new(frame);
                popup.render(&mut ui);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn radius_detection_ignores_zero() {
        assert!(!radius_is_rounded("0"));
        assert!(!radius_is_rounded("0px 0px"));
        assert!(radius_is_rounded("4px"));
        assert!(radius_is_rounded("0 .5em"));
    }

    #[test]
    fn open_popup_draws_panel_content_and_close_button() {
        let mut popup = open_popup(None);
        let buf = draw(&mut popup);
        // 20x6 panel centred in 40x12 starts at (10, 3).
        assert_eq!(buf.cell((10, 3)).unwrap().symbol(), "┌");
        assert_eq!(buf.cell((11, 4)).unwrap().symbol(), "b");
        assert_eq!(buf.cell((25, 3)).unwrap().symbol(), "[");
        assert!(
            buf.cell((0, 0))
                .unwrap()
                .modifier
                .contains(Modifier::DIM)
        );
    }

    #[test]
    fn captured_styles_colour_backdrop_and_round_corners() {
        let mut popup = open_popup(Some(
            "background-color: blue; border-top-left-radius: 3px; box-shadow: 1px 1px black",
        ));
        let buf = draw(&mut popup);
        assert_eq!(buf.cell((0, 0)).unwrap().bg, Color::Blue);
        assert_eq!(buf.cell((10, 3)).unwrap().symbol(), "╭");
        // shadow column right of the panel
        assert_eq!(buf.cell((30, 5)).unwrap().bg, Color::Black);
    }

    #[test]
    fn closed_popup_leaves_frame_untouched() {
        let mut popup = Popup::new();
        let buf = draw(&mut popup);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 40, 12)));
    }
}
