//! Client configuration.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Immutable per-client settings (endpoint, credentials, signing mode)
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`SigningMode`]: Where the request signature travels
//! - [`AccessKeyId`], [`SecretAccessKey`]: Validated credential newtypes
//! - [`Host`], [`RequestPath`]: Validated endpoint newtypes
//! - [`ApiVersion`]: An opaque service API version tag
//!
//! # Example
//!
//! ```rust
//! use aws_dispatch::{AccessKeyId, ClientConfig, Host, SecretAccessKey, SigningMode};
//!
//! let config = ClientConfig::builder()
//!     .access_key_id(AccessKeyId::new("AKIDEXAMPLE").unwrap())
//!     .secret_access_key(SecretAccessKey::new("secret").unwrap())
//!     .host(Host::new("sqs.us-east-1.amazonaws.com").unwrap())
//!     .signing_mode(SigningMode::Query)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.secure());
//! assert_eq!(config.path().as_ref(), "/");
//! ```

mod newtypes;

pub use newtypes::{AccessKeyId, ApiVersion, Host, RequestPath, SecretAccessKey};

use std::fmt;

use crate::error::ConfigError;

/// Where the request signature is carried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SigningMode {
    /// Signature version 2: protocol parameters and the signature travel in
    /// the form body, signed over the canonical query string.
    #[default]
    Query,
    /// `AWS3-HTTPS`: the signature travels in the `X-Amzn-Authorization`
    /// header, signed over the `Date` header value.
    Header,
}

impl fmt::Display for SigningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Header => write!(f, "header"),
        }
    }
}

/// Immutable configuration for one client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`. It is never mutated after
/// [`ClientConfigBuilder::build`], so concurrent calls read it without
/// synchronization.
///
/// # Connection Reuse
///
/// An optional [`reqwest::Client`] can be supplied with
/// [`ClientConfigBuilder::http_client`]. Clients sharing one handle share its
/// connection pool; otherwise each transport builds its own.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    access_key_id: AccessKeyId,
    secret_access_key: SecretAccessKey,
    host: Host,
    path: RequestPath,
    secure: bool,
    signing_mode: SigningMode,
    http_client: Option<reqwest::Client>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the access key id.
    #[must_use]
    pub const fn access_key_id(&self) -> &AccessKeyId {
        &self.access_key_id
    }

    /// Returns the secret access key.
    #[must_use]
    pub const fn secret_access_key(&self) -> &SecretAccessKey {
        &self.secret_access_key
    }

    /// Returns the endpoint host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the request path.
    #[must_use]
    pub const fn path(&self) -> &RequestPath {
        &self.path
    }

    /// Returns whether requests are sent over HTTPS.
    #[must_use]
    pub const fn secure(&self) -> bool {
        self.secure
    }

    /// Returns the signing mode.
    #[must_use]
    pub const fn signing_mode(&self) -> SigningMode {
        self.signing_mode
    }

    /// Returns the shared HTTP client handle, if configured.
    #[must_use]
    pub const fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the scheme implied by [`secure`](Self::secure).
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Returns the full endpoint URL, e.g. `https://sdb.amazonaws.com/`.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}://{}{}",
            self.scheme(),
            self.host.as_ref(),
            self.path.as_ref()
        )
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Required fields are `access_key_id`, `secret_access_key` and `host`.
///
/// # Defaults
///
/// - `path`: `/`
/// - `secure`: `true`
/// - `signing_mode`: [`SigningMode::Query`]
/// - `http_client`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    access_key_id: Option<AccessKeyId>,
    secret_access_key: Option<SecretAccessKey>,
    host: Option<Host>,
    path: Option<RequestPath>,
    secure: Option<bool>,
    signing_mode: Option<SigningMode>,
    http_client: Option<reqwest::Client>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access key id (required).
    #[must_use]
    pub fn access_key_id(mut self, key: AccessKeyId) -> Self {
        self.access_key_id = Some(key);
        self
    }

    /// Sets the secret access key (required).
    #[must_use]
    pub fn secret_access_key(mut self, key: SecretAccessKey) -> Self {
        self.secret_access_key = Some(key);
        self
    }

    /// Sets the endpoint host (required).
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: RequestPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Sets whether requests are sent over HTTPS.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Sets the signing mode.
    #[must_use]
    pub const fn signing_mode(mut self, mode: SigningMode) -> Self {
        self.signing_mode = Some(mode);
        self
    }

    /// Sets a shared HTTP client to reuse its connections.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_key_id`,
    /// `secret_access_key` or `host` are not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let access_key_id = self.access_key_id.ok_or(ConfigError::MissingRequiredField {
            field: "access_key_id",
        })?;
        let secret_access_key =
            self.secret_access_key
                .ok_or(ConfigError::MissingRequiredField {
                    field: "secret_access_key",
                })?;
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;

        Ok(ClientConfig {
            access_key_id,
            secret_access_key,
            host,
            path: self.path.unwrap_or_default(),
            secure: self.secure.unwrap_or(true),
            signing_mode: self.signing_mode.unwrap_or_default(),
            http_client: self.http_client,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> ClientConfigBuilder {
        ClientConfig::builder()
            .access_key_id(AccessKeyId::new("AKIDEXAMPLE").unwrap())
            .secret_access_key(SecretAccessKey::new("secret").unwrap())
            .host(Host::new("example.amazonaws.com").unwrap())
    }

    #[test]
    fn test_builder_requires_access_key_id() {
        let result = ClientConfigBuilder::new()
            .secret_access_key(SecretAccessKey::new("secret").unwrap())
            .host(Host::new("example.amazonaws.com").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_key_id"
            })
        ));
    }

    #[test]
    fn test_builder_requires_secret_access_key() {
        let result = ClientConfigBuilder::new()
            .access_key_id(AccessKeyId::new("AKIDEXAMPLE").unwrap())
            .host(Host::new("example.amazonaws.com").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "secret_access_key"
            })
        ));
    }

    #[test]
    fn test_builder_requires_host() {
        let result = ClientConfigBuilder::new()
            .access_key_id(AccessKeyId::new("AKIDEXAMPLE").unwrap())
            .secret_access_key(SecretAccessKey::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "host" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.path().as_ref(), "/");
        assert!(config.secure());
        assert_eq!(config.signing_mode(), SigningMode::Query);
        assert!(config.http_client().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.endpoint_url(), "https://example.amazonaws.com/");
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = base_builder()
            .path(RequestPath::new("/onca/xml").unwrap())
            .secure(false)
            .signing_mode(SigningMode::Header)
            .http_client(reqwest::Client::new())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.scheme(), "http");
        assert_eq!(config.signing_mode(), SigningMode::Header);
        assert!(config.http_client().is_some());
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.endpoint_url(), "http://example.amazonaws.com/onca/xml");
    }

    #[test]
    fn test_config_debug_masks_secret() {
        let config = base_builder().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ClientConfig"));
        assert!(debug_str.contains("SecretAccessKey(*****)"));
        assert!(!debug_str.contains("\"secret\""));
    }

    #[test]
    fn test_signing_mode_display() {
        assert_eq!(SigningMode::Query.to_string(), "query");
        assert_eq!(SigningMode::Header.to_string(), "header");
    }
}
