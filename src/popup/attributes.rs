use std::fmt;
use std::str::FromStr;

use crate::error::PopupError;

/// Attributes the popup observes. Hosts set these the same way they would
/// on a markup element; the popup reacts to each change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Presence opens the panel, absence closes it.
    Open,
    /// Inline style declarations, captured once and then cleared.
    Style,
    /// Presence permits dragging the panel.
    Move,
    /// Presence permits resizing from the corner handle.
    Resize,
    /// Presence hides the close button. `close()`/`dismiss()` still work.
    NoClose,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Open,
        Attribute::Style,
        Attribute::Move,
        Attribute::Resize,
        Attribute::NoClose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Open => "open",
            Attribute::Style => "style",
            Attribute::Move => "move",
            Attribute::Resize => "resize",
            Attribute::NoClose => "no-close",
        }
    }

    /// Parse `name` or `name=value` as given on a command line.
    pub fn parse_assignment(input: &str) -> Result<(Attribute, String), PopupError> {
        let (name, value) = match input.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => (input.trim(), ""),
        };
        if name.is_empty() {
            return Err(PopupError::MalformedAssignment(input.to_string()));
        }
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        Ok((name.parse()?, value.to_string()))
    }
}

impl FromStr for Attribute {
    type Err = PopupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.name() == lowered)
            .ok_or_else(|| PopupError::UnknownAttribute(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Live configuration attributes. Read at the moment a gesture needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    pub movable: bool,
    pub resizable: bool,
    pub no_close: bool,
}
