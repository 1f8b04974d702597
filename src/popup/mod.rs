//! The popup panel component.
//!
//! A `Popup` is a modal-looking panel over a dimmed backdrop. Hosts drive it
//! with attributes and the public operations, forward every mouse event to
//! [`Popup::handle_event`], call [`Popup::tick`] between frames and
//! [`Popup::render`] inside their draw closure, then drain emitted
//! [`PopupEvent`]s.

pub mod attributes;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod intent;
pub mod layout;
pub mod lifecycle;
pub mod render;
pub mod state;
pub mod styles;
pub mod transition;

use std::fmt;
use std::time::Duration;

use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::Rect;

pub use attributes::{Attribute, Permissions};
pub use event::PopupEvent;
pub use geometry::{Anchor, FloatRect, Geometry, Length, Translate};
pub use gesture::{DragAnchor, DragOrigin, GestureState};
pub use intent::{Intent, Predicate};
pub use layout::{PopupLayout, Target};
pub use lifecycle::TransitionProperty;
pub use state::{PanelState, Phase, VisualFlags};
pub use styles::{AppliedStyles, StyleKey};

use crate::components::Component;
use crate::constants::{DEFAULT_PANEL_HEIGHT, DEFAULT_PANEL_WIDTH, DEFAULT_TRANSITION};
use crate::content::WrapTarget;
use transition::Transition;

pub struct Popup {
    state: PanelState,
    geometry: Geometry,
    layout: PopupLayout,
    transition: Transition,
    applied: AppliedStyles,
    content: Vec<Box<dyn Component>>,
    title: String,
    preferred_size: (u16, u16),
    events: Vec<PopupEvent>,
}

impl Popup {
    pub fn new() -> Self {
        Self {
            state: PanelState::default(),
            geometry: Geometry::offscreen(),
            layout: PopupLayout::default(),
            transition: Transition::new(DEFAULT_TRANSITION),
            applied: AppliedStyles::default(),
            content: Vec::new(),
            title: String::new(),
            preferred_size: (DEFAULT_PANEL_WIDTH, DEFAULT_PANEL_HEIGHT),
            events: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Natural panel size before any resize.
    pub fn set_preferred_size(&mut self, width: u16, height: u16) {
        self.preferred_size = (width, height);
    }

    pub fn set_transition_duration(&mut self, duration: Duration) {
        self.transition.set_duration(duration);
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn layout(&self) -> &PopupLayout {
        &self.layout
    }

    /// Inline styles pushed onto the inner nodes by the last open.
    pub fn applied_styles(&self) -> &AppliedStyles {
        &self.applied
    }

    pub fn transition_in_flight(&self) -> bool {
        self.transition.in_flight()
    }

    // Attributes

    pub fn set_attribute(&mut self, attribute: Attribute, value: &str) {
        match attribute {
            Attribute::Open => self.open(),
            Attribute::Style => self.assign_style(value),
            Attribute::Move => self.state.permissions.movable = true,
            Attribute::Resize => self.state.permissions.resizable = true,
            Attribute::NoClose => self.state.permissions.no_close = true,
        }
    }

    pub fn remove_attribute(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Open => self.close(),
            // The style attribute never persists, so there is nothing to remove.
            Attribute::Style => {}
            Attribute::Move => self.state.permissions.movable = false,
            Attribute::Resize => self.state.permissions.resizable = false,
            Attribute::NoClose => self.state.permissions.no_close = false,
        }
    }

    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        let permissions = self.state.permissions;
        match attribute {
            Attribute::Open => self.is_open(),
            Attribute::Style => false,
            Attribute::Move => permissions.movable,
            Attribute::Resize => permissions.resizable,
            Attribute::NoClose => permissions.no_close,
        }
    }

    pub fn set_movable(&mut self, movable: bool) {
        self.toggle_attribute(Attribute::Move, movable);
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.toggle_attribute(Attribute::Resize, resizable);
    }

    pub fn set_no_close(&mut self, no_close: bool) {
        self.toggle_attribute(Attribute::NoClose, no_close);
    }

    fn toggle_attribute(&mut self, attribute: Attribute, present: bool) {
        if present {
            self.set_attribute(attribute, "");
        } else {
            self.remove_attribute(attribute);
        }
    }

    /// One-shot capture of an inline style assignment. The assignment itself
    /// is not kept.
    pub fn assign_style(&mut self, declarations: &str) {
        if declarations.trim().is_empty() {
            return;
        }
        let captured = self.state.styles.capture(declarations);
        tracing::debug!(captured, declarations, "captured popup styles");
    }

    // Intent gate

    pub fn confirm(&mut self) {
        self.run_intent(Intent::Confirm);
    }

    pub fn dismiss(&mut self) {
        self.run_intent(Intent::Dismiss);
    }

    fn run_intent(&mut self, intent: Intent) {
        let verdict = self.state.gate.evaluate(intent);
        tracing::debug!(?intent, proceed = verdict.proceed, "popup intent");
        if let Some(event) = verdict.event {
            self.emit(event);
        }
        if verdict.proceed {
            self.close();
        }
    }

    pub fn set_confirm_callback<F>(&mut self, predicate: F)
    where
        F: FnMut() -> bool + 'static,
    {
        self.state.gate.set(Intent::Confirm, Box::new(predicate));
    }

    pub fn clear_confirm_callback(&mut self) {
        self.state.gate.clear(Intent::Confirm);
    }

    pub fn set_dismiss_callback<F>(&mut self, predicate: F)
    where
        F: FnMut() -> bool + 'static,
    {
        self.state.gate.set(Intent::Dismiss, Box::new(predicate));
    }

    pub fn clear_dismiss_callback(&mut self) {
        self.state.gate.clear(Intent::Dismiss);
    }

    // Content

    /// Move a node into the panel, after any content already there. A
    /// selector that matches nothing leaves the panel unchanged.
    pub fn wrap(&mut self, target: WrapTarget<'_>) {
        let node = match target {
            WrapTarget::Component(node) => node,
            WrapTarget::Selector { registry, selector } => match registry.take(selector) {
                Some(node) => node,
                None => {
                    tracing::debug!(selector, "wrap selector matched nothing");
                    return;
                }
            },
        };
        self.content.push(node);
        // The interior stops hitting as the panel once it holds content.
        self.refresh_layout();
    }

    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    // Events

    fn emit(&mut self, event: PopupEvent) {
        tracing::debug!(%event, "popup event");
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<PopupEvent> {
        std::mem::take(&mut self.events)
    }

    /// Route a terminal event. Returns true when the popup consumed it, i.e.
    /// it landed on the popup or belongs to a gesture the popup started.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        let (column, row) = (mouse.column, mouse.row);
        let target = self.layout.hit_test(column, row);
        let tracking = self.state.gesture.is_active() || self.state.flags.resizing;
        match mouse.kind {
            MouseEventKind::Down(_) => {
                let Some(target) = target else {
                    return false;
                };
                self.pointer_down(target, column, row);
                true
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer_hover(target);
                if self.pointer_move(column, row) {
                    self.refresh_layout();
                }
                tracking
            }
            MouseEventKind::Up(_) => {
                self.pointer_up(target);
                tracking || target.is_some()
            }
            _ => target.is_some(),
        }
    }

    // Presentation

    fn intrinsic_size(&self, viewport: Rect) -> (u16, u16) {
        (
            self.preferred_size.0.min(viewport.width),
            self.preferred_size.1.min(viewport.height),
        )
    }

    /// Resolve geometry against `viewport`, feed the transition and record
    /// the rectangles that hit testing uses. Returns the rectangle to draw.
    pub fn sync(&mut self, viewport: Rect) -> FloatRect {
        let intrinsic = self.intrinsic_size(viewport);
        let target = self.geometry.resolve(viewport, intrinsic);
        self.transition
            .seed(Geometry::offscreen().resolve(viewport, intrinsic));
        let flags = self.state.flags;
        let animate = matches!(self.state.phase, Phase::Opening | Phase::Closing)
            && !flags.moving
            && !flags.resizing;
        if let Some(property) = self.transition.retarget(target, animate) {
            self.on_transition_end(property);
        }
        let displayed = self.transition.displayed().unwrap_or(target);
        self.layout = PopupLayout::compute(
            viewport,
            displayed,
            flags,
            !self.content.is_empty(),
            self.is_open(),
        );
        displayed
    }

    fn refresh_layout(&mut self) {
        let viewport = self.layout.viewport;
        if viewport.width > 0 && viewport.height > 0 {
            self.sync(viewport);
        }
    }

    /// Advance the running transition. Returns true while a redraw is needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let was_running = self.transition.in_flight();
        if let Some(property) = self.transition.advance(dt) {
            self.on_transition_end(property);
        }
        was_running
    }
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popup")
            .field("title", &self.title)
            .field("state", &self.state)
            .field("geometry", &self.geometry)
            .field("layout", &self.layout)
            .field("content", &self.content.len())
            .field("pending_events", &self.events)
            .finish()
    }
}
