//! Errors raised by profile capabilities

use std::error::Error as StdError;
use std::fmt;

use super::UserId;

/// Failures reported by storage and notification implementations.
///
/// The task combinators never create these; they only carry them from the
/// capability that failed to the caller of `run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// No profile is stored for the user
    NotFound(UserId),
    /// The profile store could not complete the operation
    Storage(String),
    /// The change notification could not be sent
    Notification(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::NotFound(user_id) => write!(f, "no profile for user {}", user_id),
            ProfileError::Storage(msg) => write!(f, "storage failure: {}", msg),
            ProfileError::Notification(msg) => write!(f, "notification failure: {}", msg),
        }
    }
}

impl StdError for ProfileError {}
