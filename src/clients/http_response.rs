//! Attempt and call outcomes.

use serde_json::Value;

use crate::clients::errors::{CallError, ClientError, TransientError};

/// The classified result of one transport exchange.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Status 200 with a decoded body.
    Success(Value),
    /// Status 400..=499. Never retried.
    ClientError(ClientError),
    /// Anything else; eligible for retry.
    Retryable(TransientError),
}

/// The value delivered to the caller of a dispatch.
///
/// Exactly one of the three variants is produced per call. `Exhausted`
/// carries no payload: after the retry budget is spent the call simply has
/// no result. Use [`into_result`](Self::into_result) for an explicit error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallResult {
    /// The decoded response body, envelope removed.
    Success(Value),
    /// The service rejected the request.
    ClientError(ClientError),
    /// Every attempt failed transiently.
    Exhausted,
}

impl CallResult {
    /// Returns `true` for [`CallResult::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`CallResult::Exhausted`].
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns the decoded value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the result, returning the decoded value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the client error, if any.
    #[must_use]
    pub const fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::ClientError(error) => Some(error),
            _ => None,
        }
    }

    /// Converts to a `Result`, reporting exhaustion as
    /// [`CallError::Exhausted`] with the fixed attempt budget.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Client`] for a rejected request and
    /// [`CallError::Exhausted`] when no attempt succeeded.
    pub fn into_result(self) -> Result<Value, CallError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::ClientError(error) => Err(CallError::Client(error)),
            Self::Exhausted => Err(CallError::Exhausted {
                attempts: crate::clients::MAX_ATTEMPTS,
            }),
        }
    }
}
