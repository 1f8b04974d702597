use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PopupError {
    #[error("unknown popup attribute: {0:?}")]
    UnknownAttribute(String),
    #[error("malformed attribute assignment: {0:?}")]
    MalformedAssignment(String),
}
