pub mod components;
pub mod config;
pub mod constants;
pub mod content;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod popup;
pub mod term_color;
pub mod theme;
pub mod tracing_sub;
pub mod ui;

pub use content::{NodeRegistry, WrapTarget};
pub use error::PopupError;
pub use popup::{Attribute, Phase, Popup, PopupEvent};
