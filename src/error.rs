//! Errors raised while reading an inbound `YYYY-MM-DD` value.
//!
//! These never reach the host. The widget logs them and falls back to the
//! pristine mask.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected 10 characters in YYYY-MM-DD, got {0}")]
    WrongLength(usize),

    #[error("expected '-' at position {position}, found {found:?}")]
    MissingDash { position: usize, found: char },

    #[error("expected a digit at position {position}, found {found:?}")]
    NotADigit { position: usize, found: char },
}
