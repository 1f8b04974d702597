//! Command-line configuration for the demo host.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::constants::{DEFAULT_TRANSITION, MAX_TRANSITION};
use crate::error::PopupError;
use crate::popup::{Attribute, Popup};

#[derive(Parser, Debug)]
#[command(
    name = "term-popup",
    version = env!("CARGO_PKG_VERSION"),
    about = "Modal popup panel over a dimmed backdrop, driven by the mouse"
)]
pub struct Cli {
    /// Panel title.
    #[arg(short = 't', long = "title", default_value = "Popup")]
    pub title: String,

    /// Allow dragging the panel by its border.
    #[arg(short = 'm', long = "move")]
    pub movable: bool,

    /// Show the corner handle and allow resizing.
    #[arg(short = 'r', long = "resize")]
    pub resizable: bool,

    /// Hide the close button.
    #[arg(long = "no-close")]
    pub no_close: bool,

    /// Inline style declarations captured on the next open,
    /// e.g. "background-color: #203040; border-radius: 1px".
    #[arg(short = 's', long = "style", value_name = "DECLARATIONS")]
    pub style: Option<String>,

    /// Extra attribute as `name` or `name=value`. Repeatable.
    #[arg(short = 'a', long = "attr", value_name = "NAME[=VALUE]")]
    pub attrs: Vec<String>,

    /// Open/close transition length.
    #[arg(long = "transition-ms", value_name = "MILLIS")]
    pub transition_ms: Option<u64>,

    /// Write debug logs to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Install a confirm predicate that always refuses.
    #[arg(long = "confirm-reject")]
    pub confirm_reject: bool,

    /// Install a dismiss predicate that always refuses.
    #[arg(long = "dismiss-reject")]
    pub dismiss_reject: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Attribute(#[from] PopupError),
    #[error("transition of {0} ms exceeds the {max} ms limit", max = MAX_TRANSITION.as_millis())]
    TransitionTooLong(u64),
}

/// Validated demo configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupConfig {
    pub title: String,
    pub movable: bool,
    pub resizable: bool,
    pub no_close: bool,
    pub style: Option<String>,
    pub attributes: Vec<(Attribute, String)>,
    pub transition: Duration,
    pub log_file: Option<PathBuf>,
    pub confirm_reject: bool,
    pub dismiss_reject: bool,
}

impl TryFrom<&Cli> for PopupConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let transition = match cli.transition_ms {
            Some(ms) => {
                let duration = Duration::from_millis(ms);
                if duration > MAX_TRANSITION {
                    return Err(ConfigError::TransitionTooLong(ms));
                }
                duration
            }
            None => DEFAULT_TRANSITION,
        };
        let attributes = cli
            .attrs
            .iter()
            .map(|raw| Attribute::parse_assignment(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title: cli.title.clone(),
            movable: cli.movable,
            resizable: cli.resizable,
            no_close: cli.no_close,
            style: cli.style.clone().filter(|s| !s.trim().is_empty()),
            attributes,
            transition,
            log_file: cli.log_file.clone(),
            confirm_reject: cli.confirm_reject,
            dismiss_reject: cli.dismiss_reject,
        })
    }
}

impl PopupConfig {
    /// Push the configuration onto `popup`. `--attr` entries run last, in
    /// the order given.
    pub fn apply(&self, popup: &mut Popup) {
        popup.set_title(self.title.clone());
        popup.set_transition_duration(self.transition);
        popup.set_movable(self.movable);
        popup.set_resizable(self.resizable);
        popup.set_no_close(self.no_close);
        if let Some(style) = &self.style {
            popup.assign_style(style);
        }
        if self.confirm_reject {
            popup.set_confirm_callback(|| false);
        }
        if self.dismiss_reject {
            popup.set_dismiss_callback(|| false);
        }
        for (attribute, value) in &self.attributes {
            popup.set_attribute(*attribute, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::{PopupEvent, StyleKey};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("term-popup").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_are_plain_closable_panel() {
        let config = PopupConfig::try_from(&parse(&[])).unwrap();
        assert_eq!(config.title, "Popup");
        assert!(!config.movable && !config.resizable && !config.no_close);
        assert_eq!(config.transition, DEFAULT_TRANSITION);
        assert!(config.attributes.is_empty());
    }

    #[test]
    fn attr_flags_parse_names_and_values() {
        let cli = parse(&["--attr", "no-close", "-a", "style=color: red", "--move"]);
        let config = PopupConfig::try_from(&cli).unwrap();
        assert_eq!(
            config.attributes,
            vec![
                (Attribute::NoClose, String::new()),
                (Attribute::Style, "color: red".to_string()),
            ]
        );
        assert!(config.movable);
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let cli = parse(&["--attr", "draggable"]);
        assert_eq!(
            PopupConfig::try_from(&cli),
            Err(ConfigError::Attribute(PopupError::UnknownAttribute(
                "draggable".to_string()
            )))
        );
    }

    #[test]
    fn overlong_transition_is_rejected() {
        let cli = parse(&["--transition-ms", "60000"]);
        assert_eq!(
            PopupConfig::try_from(&cli),
            Err(ConfigError::TransitionTooLong(60_000))
        );
    }

    #[test]
    fn apply_sets_permissions_gate_and_styles() {
        let cli = parse(&[
            "--resize",
            "--dismiss-reject",
            "--style",
            "background-color: navy",
            "--attr",
            "open",
        ]);
        let config = PopupConfig::try_from(&cli).unwrap();
        let mut popup = Popup::new();
        config.apply(&mut popup);
        assert!(popup.has_attribute(Attribute::Resize));
        assert!(popup.is_open());
        assert_eq!(
            popup
                .applied_styles()
                .backdrop
                .get(StyleKey::BackgroundColor),
            Some("navy")
        );
        popup.dismiss();
        assert!(popup.is_open());
        assert_eq!(
            popup.drain_events(),
            vec![PopupEvent::Open, PopupEvent::DismissReject]
        );
    }
}
