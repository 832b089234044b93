//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated access key id.
///
/// # Example
///
/// ```rust
/// use aws_dispatch::AccessKeyId;
///
/// let key = AccessKeyId::new("AKIDEXAMPLE").unwrap();
/// assert_eq!(key.as_ref(), "AKIDEXAMPLE");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessKeyId(String);

impl AccessKeyId {
    /// Creates a new validated access key id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessKeyId`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyAccessKeyId);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for AccessKeyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated secret access key.
///
/// The `Debug` implementation masks the value, displaying only
/// `SecretAccessKey(*****)`, so configurations can be logged safely.
///
/// # Example
///
/// ```rust
/// use aws_dispatch::SecretAccessKey;
///
/// let secret = SecretAccessKey::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "SecretAccessKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretAccessKey(String);

impl SecretAccessKey {
    /// Creates a new validated secret access key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretAccessKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptySecretAccessKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for SecretAccessKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretAccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretAccessKey(*****)")
    }
}

/// A validated endpoint host, with an optional port.
///
/// The host is stored exactly as given; the signer lower-cases it when
/// building the string to sign.
///
/// # Accepted Formats
///
/// - `sqs.us-east-1.amazonaws.com`
/// - `127.0.0.1:8080`
///
/// Schemes, paths, query strings and whitespace are rejected.
///
/// # Example
///
/// ```rust
/// use aws_dispatch::Host;
///
/// let host = Host::new("localhost:4566").unwrap();
/// assert_eq!(host.host_name(), "localhost");
/// assert_eq!(host.port(), Some(4566));
///
/// assert!(Host::new("https://ec2.amazonaws.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Host(String);

impl Host {
    /// Creates a new validated host.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHost`] if the host is empty, carries a
    /// scheme or path, contains whitespace, or has a non-numeric port.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into();
        let host = host.trim().to_string();

        if host.is_empty()
            || host.contains("://")
            || host.contains(['/', '?', '#', '@'])
            || host.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidHost { host });
        }

        if let Some((name, port)) = host.rsplit_once(':') {
            if name.is_empty() || port.parse::<u16>().is_err() {
                return Err(ConfigError::InvalidHost { host });
            }
        }

        Ok(Self(host))
    }

    /// Returns the host name without the port.
    #[must_use]
    pub fn host_name(&self) -> &str {
        self.0.rsplit_once(':').map_or(&self.0, |(name, _)| name)
    }

    /// Returns the explicit port, if one was given.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.0
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse().ok())
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Host {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated request path. Must start with `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestPath(String);

impl RequestPath {
    /// Creates a new validated request path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if the path does not start with
    /// `/` or contains whitespace.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.starts_with('/') || path.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidPath { path });
        }
        Ok(Self(path))
    }

    /// The root path, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }
}

impl Default for RequestPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for RequestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A service API version tag such as `2012-11-05`.
///
/// The tag is opaque to the engine; service wrappers send it as the
/// `Version` parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Creates a new API version tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiVersion`] if the tag is empty.
    pub fn new(version: impl Into<String>) -> Result<Self, ConfigError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(ConfigError::EmptyApiVersion);
        }
        Ok(Self(version))
    }
}

impl AsRef<str> for ApiVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
