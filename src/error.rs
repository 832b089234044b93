//! Configuration error types.
//!
//! Every constructor and builder in [`crate::config`] returns
//! `Result<T, ConfigError>`, so a client with missing or malformed
//! credentials is rejected before any request is signed or sent.
//!
//! # Example
//!
//! ```rust
//! use aws_dispatch::{AccessKeyId, ConfigError};
//!
//! let result = AccessKeyId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessKeyId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access key id cannot be empty.
    #[error("Access key id cannot be empty. Both accessKeyId and secretAccessKey must be set.")]
    EmptyAccessKeyId,

    /// Secret access key cannot be empty.
    #[error("Secret access key cannot be empty. Both accessKeyId and secretAccessKey must be set.")]
    EmptySecretAccessKey,

    /// Endpoint host is invalid.
    #[error("Invalid host '{host}'. Expected a bare host name with optional port (e.g., 'sqs.us-east-1.amazonaws.com').")]
    InvalidHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Request path is invalid.
    #[error("Invalid request path '{path}'. The path must start with '/'.")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// API version tag is invalid.
    #[error("API version cannot be empty.")]
    EmptyApiVersion,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to initialise HTTP client: {reason}")]
    HttpClientInit {
        /// Description of the initialisation failure.
        reason: String,
    },
}
