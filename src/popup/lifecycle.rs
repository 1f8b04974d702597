//! Open/close lifecycle.
//!
//! Opening and closing change state and emit their event synchronously; the
//! visual transition that follows only decides when the panel becomes ready
//! (open) or when its geometry is reset (closed).

use super::Popup;
use super::event::PopupEvent;
use super::geometry::{Geometry, Translate};
use super::state::Phase;

/// Property named by a transition-completion signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionProperty {
    /// Panel position/size. The only property the lifecycle reacts to.
    Transform,
    /// Backdrop fade or any other decorative transition.
    Opacity,
}

impl Popup {
    pub fn open(&mut self) {
        if self.state.is_open() {
            return;
        }
        self.apply_open(true);
    }

    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }
        self.apply_open(false);
    }

    fn apply_open(&mut self, open: bool) {
        self.state.flags.moving = false;
        if open {
            self.state.phase = Phase::Opening;
            self.geometry.transform = Geometry::centered_transform();
        } else {
            self.state.phase = Phase::Closing;
            // Exit from wherever the panel currently sits.
            self.geometry.transform.push(Translate::offscreen_up());
        }
        let permissions = self.state.permissions;
        self.state.flags.resize_handle = permissions.resizable;
        self.state.flags.close_hidden = permissions.no_close;
        if open {
            self.applied = self.state.styles.propagate();
        }
        tracing::debug!(
            open,
            transform = %self.geometry.transform_css(),
            "popup lifecycle change"
        );
        self.emit(if open {
            PopupEvent::Open
        } else {
            PopupEvent::Close
        });
        self.refresh_layout();
    }

    /// Completion signal from the presentation layer.
    pub fn on_transition_end(&mut self, property: TransitionProperty) {
        if property != TransitionProperty::Transform {
            return;
        }
        if self.state.is_open() {
            self.state.phase = Phase::Open;
        } else {
            self.geometry = Geometry::offscreen();
            self.state.phase = Phase::Closed;
        }
        tracing::debug!(phase = ?self.state.phase, "popup transition settled");
    }

    /// The host attached the popup to a live surface.
    pub fn connect(&mut self) {
        if self.state.phase == Phase::Opening {
            self.state.phase = Phase::Open;
        }
    }
}
