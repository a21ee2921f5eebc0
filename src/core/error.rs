//! Move errors.
//!
//! Two classes of failure reach callers of the engine:
//!
//! - [`IllegalMove`]: the player asked for something the rules forbid. It
//!   carries a human-readable reason meant to be shown as a transient
//!   notice. Nothing was mutated.
//! - [`MoveError::Structural`]: an engine invariant is broken (unknown
//!   pile, index out of range, card not where it should be). These panic in
//!   debug builds and are no-ops in release builds.

use std::borrow::Cow;
use std::fmt;

/// A rejected move, with the reason shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IllegalMove {
    reason: Cow<'static, str>,
}

impl IllegalMove {
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for IllegalMove {}

/// Outcome of a legality predicate.
pub type Legality = Result<(), IllegalMove>;

/// Shorthand for rejecting with a reason.
pub fn illegal<T>(reason: impl Into<Cow<'static, str>>) -> Result<T, IllegalMove> {
    Err(IllegalMove::new(reason))
}

/// Error returned by the session's inbound operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The rules forbid the move.
    Illegal(IllegalMove),
    /// An engine invariant does not hold.
    Structural(String),
}

impl MoveError {
    /// Report a broken invariant.
    ///
    /// Logs at error level and panics in debug builds.
    pub fn structural(message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("structural error: {message}");
        debug_assert!(false, "structural error: {message}");
        MoveError::Structural(message)
    }

    /// The player-facing reason, if this is an illegal move.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            MoveError::Illegal(illegal) => Some(illegal.reason()),
            MoveError::Structural(_) => None,
        }
    }
}

impl From<IllegalMove> for MoveError {
    fn from(err: IllegalMove) -> Self {
        MoveError::Illegal(err)
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Illegal(illegal) => illegal.fmt(f),
            MoveError::Structural(message) => write!(f, "structural error: {message}"),
        }
    }
}

impl std::error::Error for MoveError {}
