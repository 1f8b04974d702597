use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod text;

pub use text::TextComponent;

/// Anything that can be wrapped into a popup panel.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    struct Marker;
    impl Component for Marker {
        fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
            let symbol = if focused { "F" } else { "u" };
            if let Some(cell) = frame.buffer_mut().cell_mut((area.x, area.y)) {
                cell.set_symbol(symbol);
            }
        }
    }

    #[test]
    fn components_are_object_safe() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let mut boxed: Box<dyn Component> = Box::new(Marker);
        boxed.render(&mut frame, area, true);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "F");
    }
}
