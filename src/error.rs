//! Typed error variants for keasy.
//!
//! Every configuration call on [`crate::Keasy`] validates its input up front
//! and returns one of these on a contract violation. A failed call leaves
//! the state set by earlier successful calls untouched.

use keasy_keys::MatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeasyError {
    /// The target exposes neither the modern nor the legacy listener shape.
    #[error("attach_to(target) expects a target that accepts event listeners; '{0}' does not")]
    InvalidTarget(String),

    /// A named callback could not be resolved to something invocable.
    #[error("no callback registered for action '{0}'")]
    InvalidCallback(String),

    /// The delay does not fit in a millisecond count.
    #[error("after(amount, unit) cannot represent {amount} {unit} in milliseconds")]
    InvalidAmount { amount: i64, unit: String },

    #[error(transparent)]
    InvalidEventKind(#[from] MatchError),

    /// A delay was requested but no timer host is available.
    #[error("no timer host available for delayed dispatch: {0}")]
    TimerUnavailable(String),
}
