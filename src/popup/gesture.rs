//! Gesture disambiguation.
//!
//! Every press inside the popup is classified once, at pointer-down, by the
//! node it landed on. That origin alone decides what the following moves and
//! the release mean: a drag of the panel, a resize from the corner handle, or
//! (only when both press and release hit the bare backdrop) a dismissal.

use ratatui::layout::Rect;

use super::Popup;
use super::geometry::{Anchor, FloatRect, Length, Translate};
use super::layout::Target;
use crate::constants::RESIZE_HANDLE_ADJUST;

/// Node category a gesture started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    Backdrop,
    Panel,
    ResizeHandle,
    /// Any other descendant of the panel: wrapped content or the close button.
    Content,
}

impl From<Target> for DragOrigin {
    fn from(target: Target) -> Self {
        match target {
            Target::Backdrop => DragOrigin::Backdrop,
            Target::Panel => DragOrigin::Panel,
            Target::ResizeHandle => DragOrigin::ResizeHandle,
            Target::CloseButton | Target::Content => DragOrigin::Content,
        }
    }
}

/// Pointer offset from the panel's top-left corner at press time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAnchor {
    pub x: i32,
    pub y: i32,
}

/// In-progress gesture. Only this module writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    origin: Option<DragOrigin>,
    anchor: Option<DragAnchor>,
    pressed: Option<Target>,
}

impl GestureState {
    pub fn origin(&self) -> Option<DragOrigin> {
        self.origin
    }

    /// Set if and only if the gesture started on the panel itself.
    pub fn anchor(&self) -> Option<DragAnchor> {
        self.anchor
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    fn begin(&mut self, target: Target, panel: FloatRect, column: u16, row: u16) {
        let origin = DragOrigin::from(target);
        self.origin = Some(origin);
        self.anchor = (origin == DragOrigin::Panel).then(|| DragAnchor {
            x: column as i32 - panel.x,
            y: row as i32 - panel.y,
        });
        self.pressed = Some(target);
    }

    /// Clear the gesture, returning the node originally pressed.
    fn end(&mut self) -> Option<Target> {
        self.origin = None;
        self.anchor = None;
        self.pressed.take()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Translation that puts the panel's top-left corner at the pointer minus
/// the press anchor, expressed as viewport percentages capped so the panel's
/// far edge stays inside the viewport.
pub fn drag_translate(column: u16, row: u16, anchor: DragAnchor, viewport: Rect) -> Option<Translate> {
    if viewport.width == 0 || viewport.height == 0 {
        return None;
    }
    let left = (column as i32 - viewport.x as i32 - anchor.x).max(0);
    let top = (row as i32 - viewport.y as i32 - anchor.y).max(0);
    let x_pc = round2(100.0 * left as f64 / viewport.width as f64);
    let y_pc = round2(100.0 * top as f64 / viewport.height as f64);
    Some(Translate::new(
        Length::ClampedViewport(x_pc),
        Length::ClampedViewport(y_pc),
    ))
}

/// Size that keeps the bottom-right handle under the pointer. Deliberately
/// unclamped: dragging above or left of the panel yields zero or negative.
pub fn resize_extent(column: u16, row: u16, panel: FloatRect) -> (i32, i32) {
    (
        RESIZE_HANDLE_ADJUST + column as i32 - panel.x,
        RESIZE_HANDLE_ADJUST + row as i32 - panel.y,
    )
}

impl Popup {
    pub(super) fn pointer_down(&mut self, target: Target, column: u16, row: u16) {
        let permissions = self.state.permissions;
        if target == Target::ResizeHandle {
            self.state.flags.over = permissions.resizable;
            self.state.flags.resizing = permissions.resizable;
        }
        self.state
            .gesture
            .begin(target, self.layout.panel, column, row);
        let origin = self.state.gesture.origin;
        self.state.flags.moving = permissions.movable && origin == Some(DragOrigin::Panel);
        tracing::debug!(?target, ?origin, column, row, "popup pointer down");
    }

    /// Apply a global pointer move. Returns whether the geometry changed.
    pub(super) fn pointer_move(&mut self, column: u16, row: u16) -> bool {
        if self.state.flags.resizing {
            let (width, height) = resize_extent(column, row, self.layout.panel);
            self.geometry.width = Some(width);
            self.geometry.height = Some(height);
            return true;
        }
        if !self.state.permissions.movable
            || self.state.gesture.origin != Some(DragOrigin::Panel)
        {
            return false;
        }
        let Some(anchor) = self.state.gesture.anchor else {
            return false;
        };
        let Some(step) = drag_translate(column, row, anchor, self.layout.viewport) else {
            return false;
        };
        self.geometry.anchor = Anchor::Origin;
        self.geometry.transform = vec![step];
        true
    }

    pub(super) fn pointer_hover(&mut self, target: Option<Target>) {
        if self.state.flags.resizing {
            return;
        }
        self.state.flags.over = self.state.permissions.movable && target == Some(Target::Panel);
    }

    pub(super) fn pointer_up(&mut self, target: Option<Target>) {
        let origin = self.state.gesture.origin;
        if origin == Some(DragOrigin::Backdrop) && target == Some(Target::Backdrop) {
            tracing::debug!("backdrop press and release, dismissing");
            self.dismiss();
        }
        let pressed = self.state.gesture.end();
        self.state.flags.moving = false;
        self.state.flags.resizing = false;
        if pressed == Some(Target::CloseButton) && target == Some(Target::CloseButton) {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn anchor_only_for_panel_origin() {
        let panel = FloatRect {
            x: 10,
            y: 5,
            width: 20,
            height: 8,
        };
        let mut g = GestureState::default();
        g.begin(Target::Panel, panel, 12, 5);
        assert_eq!(g.origin(), Some(DragOrigin::Panel));
        assert_eq!(g.anchor(), Some(DragAnchor { x: 2, y: 0 }));

        g.begin(Target::CloseButton, panel, 25, 5);
        assert_eq!(g.origin(), Some(DragOrigin::Content));
        assert_eq!(g.anchor(), None);

        assert_eq!(g.end(), Some(Target::CloseButton));
        assert!(!g.is_active());
    }

    #[test]
    fn drag_translate_floors_at_zero_and_rounds() {
        let anchor = DragAnchor { x: 5, y: 3 };
        let step = drag_translate(2, 1, anchor, VIEWPORT).unwrap();
        assert_eq!(step.x, Length::ClampedViewport(0.0));
        assert_eq!(step.y, Length::ClampedViewport(0.0));

        let step = drag_translate(15, 10, anchor, VIEWPORT).unwrap();
        assert_eq!(step.x, Length::ClampedViewport(12.5));
        assert_eq!(step.y, Length::ClampedViewport(29.17));
    }

    #[test]
    fn drag_translate_needs_a_viewport() {
        let anchor = DragAnchor { x: 0, y: 0 };
        assert!(drag_translate(1, 1, anchor, Rect::default()).is_none());
    }

    #[test]
    fn resize_extent_keeps_handle_under_pointer() {
        let panel = FloatRect {
            x: 10,
            y: 4,
            width: 20,
            height: 8,
        };
        assert_eq!(resize_extent(39, 15, panel), (30, 12));
        assert_eq!(resize_extent(5, 2, panel), (-4, -1));
    }
}
