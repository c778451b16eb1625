//! Settlement state and outcome types.
//!
//! A deferred value is in exactly one [`State`] at a time. Once it leaves
//! [`State::Pending`] it carries an [`Outcome`]: either the fulfilment value
//! or the rejection value recorded by the first settlement.

use core::fmt;

/// Settlement state of a deferred value.
///
/// ```text
/// Pending --fulfil--> Fulfilled
/// Pending --reject--> Rejected
/// ```
///
/// No transition leaves a terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// No settlement has happened yet.
    #[default]
    Pending,
    /// Settled with a success value.
    Fulfilled,
    /// Settled with a failure value.
    Rejected,
}

impl State {
    /// Returns the state name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if no settlement has happened yet.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true for `Fulfilled` and `Rejected`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recorded result of a settled deferred value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T, E> {
    /// Settled through the fulfil handle.
    Fulfilled(T),
    /// Settled through the reject handle.
    Rejected(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns the terminal state this outcome corresponds to.
    #[must_use]
    pub const fn state(&self) -> State {
        match self {
            Self::Fulfilled(_) => State::Fulfilled,
            Self::Rejected(_) => State::Rejected,
        }
    }

    /// Returns true if this is a fulfilment.
    #[must_use]
    pub const fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    /// Returns true if this is a rejection.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Borrows the payloads.
    #[must_use]
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Fulfilled(v) => Outcome::Fulfilled(v),
            Self::Rejected(e) => Outcome::Rejected(e),
        }
    }

    /// Converts into a `Result`, mapping rejection to `Err`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Fulfilled(v) => Ok(v),
            Self::Rejected(e) => Err(e),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Fulfilled(v),
            Err(e) => Self::Rejected(e),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}
