use std::fmt;

/// Notifications the popup emits to its host. None carry a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupEvent {
    Open,
    Close,
    ConfirmAccept,
    ConfirmReject,
    DismissAccept,
    DismissReject,
}

impl PopupEvent {
    pub fn name(self) -> &'static str {
        match self {
            PopupEvent::Open => "open",
            PopupEvent::Close => "close",
            PopupEvent::ConfirmAccept => "confirmaccept",
            PopupEvent::ConfirmReject => "confirmreject",
            PopupEvent::DismissAccept => "dismissaccept",
            PopupEvent::DismissReject => "dismissreject",
        }
    }
}

impl fmt::Display for PopupEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
