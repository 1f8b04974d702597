use super::attributes::Permissions;
use super::gesture::GestureState;
use super::intent::IntentGate;
use super::styles::PendingStyles;

/// Lifecycle phase. Only `is_open` is observable as an attribute; the
/// in-between phases exist while the presentation layer animates.
///
/// ```text
/// Closed --open--> Opening --transition end--> Open
///   ^                 |                          |
///   |               close                      close
///   |                 v                          |
///   +--transition end-- Closing <----------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase {
    pub fn is_open(self) -> bool {
        matches!(self, Phase::Opening | Phase::Open)
    }

    /// The open transition finished; repositioning no longer animates.
    pub fn is_ready(self) -> bool {
        self == Phase::Open
    }
}

/// Visual markers on the foreground node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualFlags {
    pub moving: bool,
    pub resizing: bool,
    /// Pointer hovers a grabbable part of the panel.
    pub over: bool,
    /// Resize handle shown; mirrors the `resize` attribute as of the last
    /// open/close.
    pub resize_handle: bool,
    /// Close button hidden; mirrors `no-close` as of the last open/close.
    pub close_hidden: bool,
}

/// All mutable state of one popup instance.
#[derive(Debug, Default)]
pub struct PanelState {
    pub(super) phase: Phase,
    pub(super) flags: VisualFlags,
    pub(super) permissions: Permissions,
    pub(super) gesture: GestureState,
    pub(super) styles: PendingStyles,
    pub(super) gate: IntentGate,
}

impl PanelState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    pub fn flags(&self) -> VisualFlags {
        self.flags
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn styles(&self) -> &PendingStyles {
        &self.styles
    }
}
