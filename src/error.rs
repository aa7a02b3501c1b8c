//! Typed errors for malformed dialog input.
//!
//! Persistence failures stay `anyhow::Result` at the store seam; validation
//! of user input is the one place a caller needs to distinguish *which* way
//! the input was wrong.

/// Errors from parsing user-supplied dialog input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing 'question'/'answer' labels")]
    MissingLabels,
    #[error("question and answer must both be non-empty")]
    EmptyField,
    #[error("invalid date, expected DD.MM.YYYY HH:MM")]
    InvalidDate,
}
