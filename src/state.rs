//! The session state machine that is shared by the encoder and the decoder.
//! Every public entry point asks the 'Session' for the state it moves to
//! before doing any work, so an illegal call leaves the coder untouched.
//!
//! Legal transitions:
//!
//! | call          | RESET      | CODING     | CODING_END | FLUSHED |
//! |---------------|------------|------------|------------|---------|
//! | step(false)   | CODING     | CODING     | error      | error   |
//! | step(true)    | CODING_END | CODING_END | CODING_END | error   |
//! | flush         | error      | error      | FLUSHED    | FLUSHED |
//! | reset         | RESET      | RESET      | RESET      | RESET   |

use std::fmt;

use crate::error::{CodingError, CodingResult};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Nothing was coded since construction or the last reset.
    #[default]
    Reset,
    /// Some input was coded and more may follow.
    Coding,
    /// The caller signalled that no more input will follow.
    CodingEnd,
    /// The coder was flushed and has no pending output.
    Flushed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Reset => "RESET",
            SessionState::Coding => "CODING",
            SessionState::CodingEnd => "CODING_END",
            SessionState::Flushed => "FLUSHED",
        };
        write!(f, "{}", name)
    }
}

/// Tracks the state of a coding session, and whether the coder was poisoned
/// by a malfunctioning transform.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    poisoned: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn poison(&mut self) {
        self.poisoned = true;
    }

    /// Fails if the coder can't be used anymore.
    pub fn check_usable(&self) -> CodingResult<()> {
        if self.poisoned {
            return Err(CodingError::Poisoned);
        }
        Ok(())
    }

    /// Returns the state that a step call moves to.
    pub fn on_step(&self, end_of_input: bool) -> CodingResult<SessionState> {
        self.check_usable()?;
        let next = if end_of_input {
            SessionState::CodingEnd
        } else {
            SessionState::Coding
        };
        match (self.state, next) {
            (SessionState::Reset | SessionState::Coding, _) => Ok(next),
            (SessionState::CodingEnd, SessionState::CodingEnd) => Ok(next),
            (current, requested) => {
                Err(CodingError::IllegalState { current, requested })
            }
        }
    }

    /// Returns the state that a flush call moves to, once its output is
    /// written.
    pub fn on_flush(&self) -> CodingResult<SessionState> {
        self.check_usable()?;
        match self.state {
            SessionState::CodingEnd | SessionState::Flushed => {
                Ok(SessionState::Flushed)
            }
            current => Err(CodingError::IllegalState {
                current,
                requested: SessionState::Flushed,
            }),
        }
    }

    pub fn on_reset(&self) -> CodingResult<SessionState> {
        self.check_usable()?;
        Ok(SessionState::Reset)
    }

    /// Commit a transition that was computed by one of the 'on_' methods.
    pub fn enter(&mut self, next: SessionState) {
        if next != self.state {
            log::trace!("Session moves from {} to {}", self.state, next);
        }
        self.state = next;
    }
}

#[test]
fn test_session_transitions() {
    let mut session = Session::new();
    assert_eq!(session.state(), SessionState::Reset);
    assert!(session.on_flush().is_err());

    let next = session.on_step(false).unwrap();
    assert_eq!(next, SessionState::Coding);
    session.enter(next);
    assert!(session.on_flush().is_err());

    session.enter(session.on_step(true).unwrap());
    assert_eq!(session.state(), SessionState::CodingEnd);
    assert_eq!(
        session.on_step(false),
        Err(CodingError::IllegalState {
            current: SessionState::CodingEnd,
            requested: SessionState::Coding,
        })
    );
    assert_eq!(session.on_step(true), Ok(SessionState::CodingEnd));

    session.enter(session.on_flush().unwrap());
    assert_eq!(session.on_flush(), Ok(SessionState::Flushed));
    assert!(session.on_step(true).is_err());
    assert!(session.on_step(false).is_err());

    session.enter(session.on_reset().unwrap());
    assert_eq!(session.state(), SessionState::Reset);
}

#[test]
fn test_session_poison() {
    let mut session = Session::new();
    session.poison();
    assert_eq!(session.on_step(false), Err(CodingError::Poisoned));
    assert_eq!(session.on_flush(), Err(CodingError::Poisoned));
    assert_eq!(session.on_reset(), Err(CodingError::Poisoned));
}

#[test]
fn test_state_names() {
    let err = CodingError::IllegalState {
        current: SessionState::Reset,
        requested: SessionState::Flushed,
    };
    assert_eq!(err.to_string(), "current state = RESET, new state = FLUSHED");
}
