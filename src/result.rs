//! The value types that describe why a coding step stopped, and what to do
//! when the input is invalid.

use std::fmt;

use crate::error::{CodingError, CodingResult};

/// The reason a coding step returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CoderResult {
    /// All of the available input was consumed.
    Underflow,
    /// The output buffer has no room for the next output unit.
    Overflow,
    /// The input at the cursor is invalid for this many units.
    Malformed(usize),
    /// The input at the cursor is valid but can't be represented in the
    /// target for this many units.
    Unmappable(usize),
}

impl CoderResult {
    pub fn is_underflow(&self) -> bool {
        matches!(self, CoderResult::Underflow)
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, CoderResult::Overflow)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, CoderResult::Malformed(_))
    }

    pub fn is_unmappable(&self) -> bool {
        matches!(self, CoderResult::Unmappable(_))
    }

    /// Returns true for malformed and unmappable results.
    pub fn is_error(&self) -> bool {
        self.is_malformed() || self.is_unmappable()
    }

    /// Returns the length of the erroneous input, if this is an error.
    pub fn length(&self) -> Option<usize> {
        match self {
            CoderResult::Malformed(len) | CoderResult::Unmappable(len) => {
                Some(*len)
            }
            _ => None,
        }
    }

    /// Turn the content errors into a raised 'CodingError'.
    pub fn into_result(self) -> CodingResult<()> {
        match self {
            CoderResult::Malformed(len) => Err(CodingError::Malformed(len)),
            CoderResult::Unmappable(len) => Err(CodingError::Unmappable(len)),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for CoderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoderResult::Underflow => write!(f, "UNDERFLOW"),
            CoderResult::Overflow => write!(f, "OVERFLOW"),
            CoderResult::Malformed(len) => write!(f, "MALFORMED[{}]", len),
            CoderResult::Unmappable(len) => write!(f, "UNMAPPABLE[{}]", len),
        }
    }
}

/// What a coder does when it runs into malformed or unmappable input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CodingErrorAction {
    /// Stop and return the error to the caller.
    #[default]
    Report,
    /// Drop the erroneous input and continue.
    Ignore,
    /// Write the replacement, drop the erroneous input and continue.
    Replace,
}

impl fmt::Display for CodingErrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodingErrorAction::Report => write!(f, "REPORT"),
            CodingErrorAction::Ignore => write!(f, "IGNORE"),
            CodingErrorAction::Replace => write!(f, "REPLACE"),
        }
    }
}

#[test]
fn test_coder_result_queries() {
    assert!(CoderResult::Underflow.is_underflow());
    assert!(!CoderResult::Underflow.is_error());
    assert!(CoderResult::Overflow.is_overflow());
    assert_eq!(CoderResult::Overflow.length(), None);

    let malformed = CoderResult::Malformed(3);
    assert!(malformed.is_error());
    assert!(malformed.is_malformed());
    assert_eq!(malformed.length(), Some(3));
    assert_eq!(malformed, CoderResult::Malformed(3));
    assert_ne!(malformed, CoderResult::Malformed(2));
    assert_ne!(malformed, CoderResult::Unmappable(3));

    assert_eq!(CoderResult::Underflow.into_result(), Ok(()));
    assert_eq!(
        CoderResult::Unmappable(2).into_result(),
        Err(CodingError::Unmappable(2))
    );
    assert_eq!(format!("{}", malformed), "MALFORMED[3]");
    assert_eq!(CodingErrorAction::default(), CodingErrorAction::Report);
}
