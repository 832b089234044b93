//! HTTP transport.
//!
//! This module provides [`HttpClient`], which sends one signed POST to the
//! configured endpoint and classifies what came back.

use std::collections::BTreeMap;

use crate::clients::errors::{ClientError, TransientError};
use crate::clients::http_request::SignedRequest;
use crate::clients::http_response::AttemptOutcome;
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::xml;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transport for one endpoint.
///
/// The client handles:
/// - URL construction from host, path and the `secure` flag
/// - A default `User-Agent` header
/// - Reuse of a shared [`reqwest::Client`] when the config supplies one
/// - Outcome classification: 200 → decoded, 4xx → client error, else retryable
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Full endpoint URL (e.g., `https://sqs.us-east-1.amazonaws.com/`).
    url: String,
    /// Headers added to every request.
    default_headers: BTreeMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a transport for the endpoint in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if no shared client was
    /// configured and a new one cannot be created (e.g., TLS initialisation
    /// failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = match config.http_client() {
            Some(shared) => shared.clone(),
            None => reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .map_err(|e| ConfigError::HttpClientInit {
                    reason: e.to_string(),
                })?,
        };

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}aws-dispatch v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = BTreeMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        Ok(Self {
            client,
            url: config.endpoint_url(),
            default_headers,
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Sends one signed request and classifies the outcome.
    ///
    /// The whole body is buffered before the status is inspected. Failures
    /// never escape as errors; they are folded into [`AttemptOutcome`].
    pub async fn send(&self, request: &SignedRequest) -> AttemptOutcome {
        let mut req_builder = self.client.post(&self.url);
        for (key, value) in self.default_headers.iter().chain(&request.headers) {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.body(request.body.clone());

        let res = match req_builder.send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!(action = %request.action, url = %self.url, error = %e, "request failed");
                return AttemptOutcome::Retryable(TransientError::Network(e));
            }
        };

        let status = res.status().as_u16();
        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(action = %request.action, status, error = %e, "failed to read response body");
                return AttemptOutcome::Retryable(TransientError::Network(e));
            }
        };

        let outcome = classify(status, body);
        match &outcome {
            AttemptOutcome::Success(_) => {}
            AttemptOutcome::ClientError(e) => {
                tracing::warn!(action = %request.action, status = e.status, body = %e.body, "request rejected");
            }
            AttemptOutcome::Retryable(e) => {
                tracing::warn!(action = %request.action, status = ?e.status(), error = %e, "non-200 response");
            }
        }
        outcome
    }
}

/// Classifies a buffered response.
///
/// - 200: decode the body; a decode failure is retryable
/// - 400..=499: terminal client error
/// - anything else: retryable
#[must_use]
pub fn classify(status: u16, body: String) -> AttemptOutcome {
    match status {
        200 => match xml::decode(&body) {
            Ok(value) => AttemptOutcome::Success(value),
            Err(e) => AttemptOutcome::Retryable(TransientError::Decode(e)),
        },
        400..=499 => AttemptOutcome::ClientError(ClientError { status, body }),
        _ => AttemptOutcome::Retryable(TransientError::Status { status, body }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessKeyId, Host, RequestPath, SecretAccessKey};
    use serde_json::json;

    fn config_builder() -> crate::config::ClientConfigBuilder {
        ClientConfig::builder()
            .access_key_id(AccessKeyId::new("AKIDEXAMPLE").unwrap())
            .secret_access_key(SecretAccessKey::new("secret").unwrap())
            .host(Host::new("sdb.amazonaws.com").unwrap())
    }

    #[test]
    fn test_url_follows_secure_flag() {
        let client = HttpClient::new(&config_builder().build().unwrap()).unwrap();
        assert_eq!(client.url(), "https://sdb.amazonaws.com/");

        let config = config_builder()
            .secure(false)
            .path(RequestPath::new("/onca/xml").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://sdb.amazonaws.com/onca/xml");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&config_builder().build().unwrap()).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("aws-dispatch v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = config_builder().user_agent_prefix("MyApp/1.0").build().unwrap();
        let client = HttpClient::new(&config).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_classify_success_decodes_body() {
        let outcome = classify(200, "<R><A>1</A></R>".to_string());
        assert!(matches!(outcome, AttemptOutcome::Success(v) if v == json!({"A": "1"})));
    }

    #[test]
    fn test_classify_malformed_success_is_retryable() {
        let outcome = classify(200, "<R><A>1</B></R>".to_string());
        assert!(matches!(
            outcome,
            AttemptOutcome::Retryable(TransientError::Decode(_))
        ));
    }

    #[test]
    fn test_classify_client_error_range() {
        for status in [400, 403, 404, 499] {
            let outcome = classify(status, "<Error/>".to_string());
            assert!(
                matches!(&outcome, AttemptOutcome::ClientError(e) if e.status == status && e.body == "<Error/>"),
                "expected client error for {status}"
            );
        }
    }

    #[test]
    fn test_classify_other_statuses_are_retryable() {
        for status in [201, 204, 301, 399, 500, 503] {
            let outcome = classify(status, String::new());
            assert!(
                matches!(&outcome, AttemptOutcome::Retryable(TransientError::Status { status: s, .. }) if *s == status),
                "expected retryable for {status}"
            );
        }
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
