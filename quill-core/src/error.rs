use thiserror::Error;

/// Errors raised while building history entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("invalid argument `{what}`: {reason}")]
    InvalidArgument { what: &'static str, reason: String },
}

impl HistoryError {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        HistoryError::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }
}

/// Rejected text engine state, e.g. from a JSON dump.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextEngineError {
    #[error("text engine needs at least one line")]
    NoLines,

    #[error("line {line} contains a newline")]
    NewlineInLine { line: usize },
}
