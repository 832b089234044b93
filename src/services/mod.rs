//! Per-service client factory.
//!
//! Each [`Service`] knows its default endpoint and signing mode.
//! [`ServiceClient`] wraps an [`AwsClient`] and adds the two fixed
//! parameters every action needs: `Action`, and `Version` when an API version
//! tag is configured. Parameter shaping for individual actions is left to
//! the caller.
//!
//! # Example
//!
//! ```rust
//! use aws_dispatch::services::{Service, ServiceClient};
//! use aws_dispatch::{ApiVersion, Host};
//!
//! let client = ServiceClient::builder(Service::Sqs)
//!     .access_key_id("AKIDEXAMPLE")
//!     .secret_access_key("secret")
//!     .host(Host::new("sqs.eu-west-1.amazonaws.com").unwrap())
//!     .api_version(ApiVersion::new("2012-11-05").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(client.config().host().as_ref(), "sqs.eu-west-1.amazonaws.com");
//! ```

use std::fmt;

use crate::clients::{AwsClient, CallResult};
use crate::config::{
    AccessKeyId, ApiVersion, ClientConfig, Host, RequestPath, SecretAccessKey, SigningMode,
};
use crate::error::ConfigError;
use crate::signing::Parameters;

/// Name of the action parameter.
pub const ACTION: &str = "Action";
/// Name of the API version parameter.
pub const VERSION: &str = "Version";

/// The services sharing the dispatch engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    /// Compute provisioning (EC2).
    Ec2,
    /// Queueing (SQS).
    Sqs,
    /// Notifications (SNS).
    Sns,
    /// Email (SES). Signs in header mode.
    Ses,
    /// Key-value store (`SimpleDB`).
    SimpleDb,
    /// Data processing / warehouse (Elastic `MapReduce`).
    Emr,
    /// Product catalog (Product Advertising).
    ProductAdvertising,
    /// Metrics (`CloudWatch`).
    CloudWatch,
}

impl Service {
    /// Every service, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Ec2,
        Self::Sqs,
        Self::Sns,
        Self::Ses,
        Self::SimpleDb,
        Self::Emr,
        Self::ProductAdvertising,
        Self::CloudWatch,
    ];

    /// Returns the default endpoint host.
    #[must_use]
    pub const fn default_host(self) -> &'static str {
        match self {
            Self::Ec2 => "ec2.amazonaws.com",
            Self::Sqs => "queue.amazonaws.com",
            Self::Sns => "sns.us-east-1.amazonaws.com",
            Self::Ses => "email.us-east-1.amazonaws.com",
            Self::SimpleDb => "sdb.amazonaws.com",
            Self::Emr => "elasticmapreduce.amazonaws.com",
            Self::ProductAdvertising => "ecs.amazonaws.com",
            Self::CloudWatch => "monitoring.amazonaws.com",
        }
    }

    /// Returns the default request path.
    #[must_use]
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::ProductAdvertising => "/onca/xml",
            _ => "/",
        }
    }

    /// Returns the default signing mode.
    #[must_use]
    pub const fn default_signing_mode(self) -> SigningMode {
        match self {
            Self::Ses => SigningMode::Header,
            _ => SigningMode::Query,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ec2 => "ec2",
            Self::Sqs => "sqs",
            Self::Sns => "sns",
            Self::Ses => "ses",
            Self::SimpleDb => "sdb",
            Self::Emr => "emr",
            Self::ProductAdvertising => "prodadv",
            Self::CloudWatch => "cloudwatch",
        };
        f.write_str(name)
    }
}

/// A client for one service.
///
/// # Thread Safety
///
/// `ServiceClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    service: Service,
    api_version: Option<ApiVersion>,
    client: AwsClient,
}

// Verify ServiceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServiceClient>();
};

impl ServiceClient {
    /// Creates a new builder for `service`.
    #[must_use]
    pub fn builder(service: Service) -> ServiceClientBuilder {
        ServiceClientBuilder::new(service)
    }

    /// Creates a client with the service defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessKeyId`] or
    /// [`ConfigError::EmptySecretAccessKey`] if a credential is empty.
    pub fn new(
        service: Service,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::builder(service)
            .access_key_id(access_key_id)
            .secret_access_key(secret_access_key)
            .build()
    }

    /// Returns the service.
    #[must_use]
    pub const fn service(&self) -> Service {
        self.service
    }

    /// Returns the API version tag, if configured.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    /// Returns the parameters sent for `action`: a copy of `parameters`
    /// with `Action` and, if configured, `Version` set.
    #[must_use]
    pub fn action_parameters(&self, action: &str, parameters: &Parameters) -> Parameters {
        let mut parameters = parameters.clone();
        parameters.insert(ACTION.to_string(), action.to_string());
        if let Some(version) = &self.api_version {
            parameters.insert(VERSION.to_string(), version.as_ref().to_string());
        }
        parameters
    }

    /// Calls `action` with `parameters`.
    ///
    /// See [`AwsClient::call`] for retry behavior.
    pub async fn call(&self, action: &str, parameters: &Parameters) -> CallResult {
        let parameters = self.action_parameters(action, parameters);
        self.client.call(action, &parameters).await
    }
}

/// Builder for [`ServiceClient`].
///
/// Required fields are `access_key_id` and `secret_access_key`. Host, path
/// and signing mode default to the [`Service`] values; `secure` defaults to
/// `true`.
#[derive(Debug)]
pub struct ServiceClientBuilder {
    service: Service,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    host: Option<Host>,
    path: Option<RequestPath>,
    secure: Option<bool>,
    signing_mode: Option<SigningMode>,
    api_version: Option<ApiVersion>,
    http_client: Option<reqwest::Client>,
    user_agent_prefix: Option<String>,
}

impl ServiceClientBuilder {
    fn new(service: Service) -> Self {
        Self {
            service,
            access_key_id: None,
            secret_access_key: None,
            host: None,
            path: None,
            secure: None,
            signing_mode: None,
            api_version: None,
            http_client: None,
            user_agent_prefix: None,
        }
    }

    /// Sets the access key id (required).
    #[must_use]
    pub fn access_key_id(mut self, key: impl Into<String>) -> Self {
        self.access_key_id = Some(key.into());
        self
    }

    /// Sets the secret access key (required).
    #[must_use]
    pub fn secret_access_key(mut self, key: impl Into<String>) -> Self {
        self.secret_access_key = Some(key.into());
        self
    }

    /// Overrides the endpoint host.
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    /// Overrides the request path.
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

    /// Overrides the signing mode.
    #[must_use]
    pub const fn signing_mode(mut self, mode: SigningMode) -> Self {
        self.signing_mode = Some(mode);
        self
    }

    /// Sets the API version tag sent as `Version`.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
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

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if a credential was not
    /// set, [`ConfigError::EmptyAccessKeyId`] /
    /// [`ConfigError::EmptySecretAccessKey`] if one is empty, or
    /// [`ConfigError::HttpClientInit`] if the transport cannot be created.
    pub fn build(self) -> Result<ServiceClient, ConfigError> {
        let access_key_id = self.access_key_id.ok_or(ConfigError::MissingRequiredField {
            field: "access_key_id",
        })?;
        let secret_access_key =
            self.secret_access_key
                .ok_or(ConfigError::MissingRequiredField {
                    field: "secret_access_key",
                })?;

        let host = match self.host {
            Some(host) => host,
            None => Host::new(self.service.default_host())?,
        };
        let path = match self.path {
            Some(path) => path,
            None => RequestPath::new(self.service.default_path())?,
        };

        let mut config = ClientConfig::builder()
            .access_key_id(AccessKeyId::new(access_key_id)?)
            .secret_access_key(SecretAccessKey::new(secret_access_key)?)
            .host(host)
            .path(path)
            .secure(self.secure.unwrap_or(true))
            .signing_mode(
                self.signing_mode
                    .unwrap_or_else(|| self.service.default_signing_mode()),
            );
        if let Some(client) = self.http_client {
            config = config.http_client(client);
        }
        if let Some(prefix) = self.user_agent_prefix {
            config = config.user_agent_prefix(prefix);
        }

        let client = AwsClient::new(config.build()?)?;
        tracing::debug!(service = %self.service, url = %client.transport().url(), "service client created");

        Ok(ServiceClient {
            service: self.service,
            api_version: self.api_version,
            client,
        })
    }
}
