//! Errors raised by the coders. Content errors (malformed or unmappable input)
//! are only raised by the one-shot operations; the stepwise operations return
//! them as a 'CoderResult'.

use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodingError {
    /// The call is not legal in the current session state.
    #[error("current state = {current}, new state = {requested}")]
    IllegalState {
        current: SessionState,
        requested: SessionState,
    },

    /// The replacement sequence was rejected.
    #[error("illegal replacement: {0}")]
    IllegalReplacement(&'static str),

    /// The capacity hints given at construction were rejected.
    #[error("invalid capacity hints: {0}")]
    InvalidHints(&'static str),

    /// The input contains an invalid sequence of this length.
    #[error("malformed input of length {0}")]
    Malformed(usize),

    /// The input contains a sequence of this length that has no
    /// representation in the target charset.
    #[error("unmappable character of length {0}")]
    Unmappable(usize),

    /// The transform misbehaved. The coder is poisoned afterwards.
    #[error("coder malfunction: {0}")]
    Malfunction(String),

    /// A previous call failed with a malfunction.
    #[error("coder is poisoned by an earlier malfunction")]
    Poisoned,

    /// No charset is registered under this name.
    #[error("unsupported charset: {0}")]
    UnsupportedCharset(String),
}

pub type CodingResult<T> = Result<T, CodingError>;
