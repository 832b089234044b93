//! Request dispatch.
//!
//! # Overview
//!
//! - [`SignedRequest`]: Headers and form body for one signed attempt
//! - [`HttpClient`]: Sends one attempt and classifies the response
//! - [`AttemptOutcome`]: Success, terminal client error, or retryable failure
//! - [`AwsClient`]: Runs a call through up to [`MAX_ATTEMPTS`] attempts
//! - [`CallResult`]: What the caller receives
//!
//! # Retry Behavior
//!
//! - **200**: The body is decoded and returned; an undecodable body is retried
//! - **400..=499**: Returned immediately as [`ClientError`], never retried
//! - **Anything else, or a network error**: Retried after yielding to the scheduler
//!
//! After three failed attempts the call ends with [`CallResult::Exhausted`].

mod dispatch;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use dispatch::{AwsClient, MAX_ATTEMPTS};
pub use errors::{CallError, ClientError, TransientError};
pub use http_client::{classify, HttpClient, SDK_VERSION};
pub use http_request::{SignedRequest, AUTHORIZATION_HEADER, AWS3_HTTPS, FORM_CONTENT_TYPE};
pub use http_response::{AttemptOutcome, CallResult};
