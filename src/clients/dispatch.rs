//! Signed dispatch with bounded retries.
//!
//! [`AwsClient::call`] drives one call through at most [`MAX_ATTEMPTS`]
//! attempts:
//!
//! ```text
//! Attempting(n) --Success------------> Succeeded            (value delivered)
//! Attempting(n) --ClientError--------> TerminalClientError  (status, body delivered)
//! Attempting(n) --Retryable, n > 0---> Attempting(n - 1)    (after yielding)
//! Attempting(0) --Retryable----------> Exhausted            (nothing delivered)
//! ```
//!
//! Attempts are strictly sequential. Between attempts the task yields to the
//! scheduler once; there is no backoff or jitter.

use chrono::Utc;

use crate::clients::http_client::HttpClient;
use crate::clients::http_request::SignedRequest;
use crate::clients::http_response::{AttemptOutcome, CallResult};
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::signing::Parameters;

/// Total number of attempts per call, the first one included.
pub const MAX_ATTEMPTS: u32 = 3;

/// What the controller does after an attempt.
#[derive(Debug)]
enum Step {
    Deliver(CallResult),
    Retry,
}

/// Applies one transition. `remaining` is the budget left after the
/// attempt that produced `outcome`.
fn step(outcome: AttemptOutcome, remaining: u32) -> Step {
    match outcome {
        AttemptOutcome::Success(value) => Step::Deliver(CallResult::Success(value)),
        AttemptOutcome::ClientError(error) => Step::Deliver(CallResult::ClientError(error)),
        AttemptOutcome::Retryable(_) if remaining == 0 => Step::Deliver(CallResult::Exhausted),
        AttemptOutcome::Retryable(_) => Step::Retry,
    }
}

/// Signing, dispatching client for one endpoint.
///
/// # Thread Safety
///
/// `AwsClient` is `Send + Sync`. Concurrent calls share only the immutable
/// [`ClientConfig`] and the transport's connection pool; each attempt builds
/// its own parameter snapshot and buffers.
///
/// # Example
///
/// ```rust,ignore
/// use aws_dispatch::{AccessKeyId, AwsClient, CallResult, ClientConfig, Host, Parameters, SecretAccessKey};
///
/// let config = ClientConfig::builder()
///     .access_key_id(AccessKeyId::new("AKIDEXAMPLE")?)
///     .secret_access_key(SecretAccessKey::new("secret")?)
///     .host(Host::new("sdb.amazonaws.com")?)
///     .build()?;
/// let client = AwsClient::new(config)?;
///
/// let mut params = Parameters::new();
/// params.insert("Action".to_string(), "ListDomains".to_string());
///
/// match client.call("ListDomains", &params).await {
///     CallResult::Success(value) => println!("{value}"),
///     CallResult::ClientError(e) => println!("rejected: {} {}", e.status, e.body),
///     CallResult::Exhausted => println!("no result"),
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AwsClient {
    config: ClientConfig,
    transport: HttpClient,
}

// Verify AwsClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AwsClient>();
};

impl AwsClient {
    /// Creates a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the transport cannot be
    /// created.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self { config, transport })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &HttpClient {
        &self.transport
    }

    /// Signs and sends `parameters`, retrying transient failures.
    ///
    /// Each attempt is signed afresh with the current time. The caller's
    /// map is never modified; any action-identifying parameter must already
    /// be present.
    ///
    /// Exactly one [`CallResult`] is produced. A 4xx response ends the call
    /// immediately. After [`MAX_ATTEMPTS`] transient failures the result is
    /// [`CallResult::Exhausted`].
    pub async fn call(&self, action: &str, parameters: &Parameters) -> CallResult {
        let mut remaining = MAX_ATTEMPTS;
        loop {
            remaining -= 1;
            let attempt = MAX_ATTEMPTS - remaining;
            tracing::debug!(action, attempt, url = %self.transport.url(), "sending request");

            let request = SignedRequest::build(action, parameters, &self.config, Utc::now());
            let outcome = self.transport.send(&request).await;

            match step(outcome, remaining) {
                Step::Deliver(CallResult::Exhausted) => {
                    tracing::error!(
                        action,
                        path = %self.config.path().as_ref(),
                        attempts = MAX_ATTEMPTS,
                        "request failed too many times"
                    );
                    return CallResult::Exhausted;
                }
                Step::Deliver(result) => return result,
                Step::Retry => {
                    tracing::warn!(action, remaining, "retrying request");
                    tokio::task::yield_now().await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::{ClientError, TransientError};
    use serde_json::json;

    fn transient() -> AttemptOutcome {
        AttemptOutcome::Retryable(TransientError::Status {
            status: 500,
            body: String::new(),
        })
    }

    #[test]
    fn test_success_is_delivered() {
        let next = step(AttemptOutcome::Success(json!({"A": "1"})), 2);
        assert!(matches!(next, Step::Deliver(CallResult::Success(v)) if v == json!({"A": "1"})));
    }

    #[test]
    fn test_client_error_is_delivered_regardless_of_budget() {
        let error = ClientError {
            status: 404,
            body: "missing".to_string(),
        };
        for remaining in [0, 1, 2] {
            let next = step(AttemptOutcome::ClientError(error.clone()), remaining);
            assert!(matches!(next, Step::Deliver(CallResult::ClientError(ref e)) if *e == error));
        }
    }

    #[test]
    fn test_retryable_retries_while_budget_remains() {
        assert!(matches!(step(transient(), 2), Step::Retry));
        assert!(matches!(step(transient(), 1), Step::Retry));
    }

    #[test]
    fn test_retryable_with_no_budget_is_exhausted() {
        assert!(matches!(
            step(transient(), 0),
            Step::Deliver(CallResult::Exhausted)
        ));
    }

    #[test]
    fn test_max_attempts_is_three() {
        assert_eq!(MAX_ATTEMPTS, 3);
    }
}
