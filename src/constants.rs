//! Shared crate-wide constants.

use std::time::Duration;

/// Cells added to the pointer-relative size while resizing so the corner
/// handle stays under the pointer instead of trailing one cell behind it.
pub const RESIZE_HANDLE_ADJUST: i32 = 1;

/// Default length of the panel's open/close transform transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(200);

/// Longest transition the demo configuration accepts.
pub const MAX_TRANSITION: Duration = Duration::from_secs(5);

/// Intrinsic panel size used until the user resizes it. Clamped to the
/// viewport at resolve time.
pub const DEFAULT_PANEL_WIDTH: u16 = 48;
pub const DEFAULT_PANEL_HEIGHT: u16 = 12;

/// Close affordance drawn into the panel's top border.
pub const CLOSE_LABEL: &str = "[x]";

/// Glyph drawn in the bottom-right corner when resizing is enabled.
pub const RESIZE_GLYPH: &str = "◢";
