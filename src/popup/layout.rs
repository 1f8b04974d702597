//! Node rectangles of the last rendered frame and pointer hit testing.
//!
//! The popup's node structure is fixed: a backdrop covering the viewport and
//! a foreground panel holding a close button, a resize handle and the wrapped
//! content. Pointer events are classified against the rectangles the
//! renderer actually drew, so a panel caught mid-transition is hit where it
//! appears.

use ratatui::layout::Rect;

use super::geometry::FloatRect;
use super::state::VisualFlags;
use crate::constants::CLOSE_LABEL;

/// The node under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Backdrop,
    /// The foreground container itself: its border and title row.
    Panel,
    CloseButton,
    ResizeHandle,
    /// Wrapped content inside the panel. An empty panel has no content
    /// node, so its interior hits as [`Target::Panel`].
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopupLayout {
    pub viewport: Rect,
    pub panel: FloatRect,
    pub content: Option<FloatRect>,
    pub close_button: Option<FloatRect>,
    pub resize_handle: Option<FloatRect>,
    /// The backdrop only takes pointer input while the popup is open.
    pub active: bool,
}

impl PopupLayout {
    pub fn compute(
        viewport: Rect,
        panel: FloatRect,
        flags: VisualFlags,
        has_content: bool,
        active: bool,
    ) -> Self {
        let content = (has_content && panel.width > 2 && panel.height > 2).then(|| FloatRect {
            x: panel.x + 1,
            y: panel.y + 1,
            width: panel.width - 2,
            height: panel.height - 2,
        });
        let label = CLOSE_LABEL.chars().count() as u16;
        let close_button = (!flags.close_hidden && panel.width >= label + 4).then(|| FloatRect {
            x: panel.x + panel.width as i32 - 2 - label as i32,
            y: panel.y,
            width: label,
            height: 1,
        });
        let resize_handle =
            (flags.resize_handle && panel.width >= 2 && panel.height >= 2).then(|| FloatRect {
                x: panel.x + panel.width as i32 - 1,
                y: panel.y + panel.height as i32 - 1,
                width: 1,
                height: 1,
            });
        Self {
            viewport,
            panel,
            content,
            close_button,
            resize_handle,
            active,
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Target> {
        if !self.active || !self.viewport.contains((column, row).into()) {
            return None;
        }
        let inside = |rect: Option<FloatRect>| rect.is_some_and(|r| r.contains(column, row));
        if inside(self.close_button) {
            Some(Target::CloseButton)
        } else if inside(self.resize_handle) {
            Some(Target::ResizeHandle)
        } else if inside(self.content) {
            Some(Target::Content)
        } else if self.panel.contains(column, row) {
            Some(Target::Panel)
        } else {
            Some(Target::Backdrop)
        }
    }
}
