//! Dispatch error types.
//!
//! - [`ClientError`]: A 4xx response. Terminal; never retried.
//! - [`TransientError`]: A failed attempt that is eligible for retry.
//! - [`CallError`]: The explicit error form of a failed call, produced by
//!   [`CallResult::into_result`](crate::clients::CallResult::into_result).
//!
//! # Example
//!
//! ```rust,ignore
//! use aws_dispatch::clients::{CallError, CallResult};
//!
//! match client.call("ListQueues", params).await.into_result() {
//!     Ok(value) => println!("queues: {value}"),
//!     Err(CallError::Client(e)) => println!("rejected {}: {}", e.status, e.body),
//!     Err(CallError::Exhausted { attempts }) => println!("gave up after {attempts}"),
//! }
//! ```

use thiserror::Error;

use crate::xml::DecodeError;

/// A request rejected by the service with a 4xx status.
///
/// The raw response body is kept as-is; it is usually an XML error
/// document naming the error code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Request rejected with status {status}: {body}")]
pub struct ClientError {
    /// The HTTP status code (400..=499).
    pub status: u16,
    /// The raw response body.
    pub body: String,
}

/// Why a single attempt failed in a way that may succeed on retry.
#[derive(Debug, Error)]
pub enum TransientError {
    /// A status other than 200 outside the 4xx range.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// A 200 response whose body could not be decoded.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] DecodeError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TransientError {
    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Decode(_) => Some(200),
            Self::Network(_) => None,
        }
    }
}

/// A call that did not produce a decoded value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The service rejected the request.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Every attempt failed transiently.
    #[error("Request failed after {attempts} attempts")]
    Exhausted {
        /// The number of attempts made.
        attempts: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_includes_status_and_body() {
        let error = ClientError {
            status: 403,
            body: "<Error><Code>SignatureDoesNotMatch</Code></Error>".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("SignatureDoesNotMatch"));
    }

    #[test]
    fn test_transient_error_status() {
        let error = TransientError::Status {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(error.status(), Some(503));
        assert!(error.to_string().contains("503"));

        let error = TransientError::from(DecodeError::NoRoot);
        assert_eq!(error.status(), Some(200));
        assert!(error.to_string().contains("decode"));
    }

    #[test]
    fn test_call_error_messages() {
        let error = CallError::Exhausted { attempts: 3 };
        assert_eq!(error.to_string(), "Request failed after 3 attempts");

        let error = CallError::from(ClientError {
            status: 400,
            body: "bad".to_string(),
        });
        assert!(error.to_string().contains("400"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &ClientError {
            status: 400,
            body: String::new(),
        };
        let _: &dyn std::error::Error = &CallError::Exhausted { attempts: 3 };
        let _: &dyn std::error::Error = &TransientError::Decode(DecodeError::NoRoot);
    }
}
