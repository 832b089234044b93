//! # aws-dispatch
//!
//! A request signing and dispatch engine for AWS-style query APIs (EC2, SQS,
//! SNS, SES, `SimpleDB`, EMR, `CloudWatch`, Product Advertising).
//!
//! ## Overview
//!
//! A per-service caller supplies an action name and a flat string parameter
//! map. The engine:
//!
//! - Signs the request with HMAC-SHA256, either as signature version 2
//!   parameters in the form body or as an `X-Amzn-Authorization` header
//! - Sends one POST per attempt to the configured endpoint over HTTP or HTTPS
//! - Decodes successful XML responses into a [`serde_json::Value`], with the
//!   outer envelope element removed
//! - Retries transient failures up to three attempts, and returns 4xx
//!   rejections immediately
//!
//! ## Quick Start
//!
//! ```rust
//! use aws_dispatch::services::{Service, ServiceClient};
//! use aws_dispatch::ApiVersion;
//!
//! let sqs = ServiceClient::builder(Service::Sqs)
//!     .access_key_id("AKIDEXAMPLE")
//!     .secret_access_key("secret")
//!     .api_version(ApiVersion::new("2012-11-05").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making Calls
//!
//! ```rust,ignore
//! use aws_dispatch::{CallResult, Parameters};
//!
//! let mut params = Parameters::new();
//! params.insert("QueueName".to_string(), "jobs".to_string());
//!
//! match sqs.call("CreateQueue", &params).await {
//!     CallResult::Success(value) => println!("{}", value["CreateQueueResult"]["QueueUrl"]),
//!     CallResult::ClientError(e) => eprintln!("rejected {}: {}", e.status, e.body),
//!     CallResult::Exhausted => eprintln!("no result after retries"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Endpoint, credentials and transport live on the client configuration
//! - **Fail-fast validation**: Missing or empty credentials are rejected before any request
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Calls never block; attempts run sequentially on the Tokio runtime
//! - **Fresh snapshots**: Each attempt signs a new copy of the parameters

pub mod clients;
pub mod config;
pub mod error;
pub mod services;
pub mod signing;
pub mod xml;

// Re-export public types at crate root for convenience
pub use config::{
    AccessKeyId, ApiVersion, ClientConfig, ClientConfigBuilder, Host, RequestPath,
    SecretAccessKey, SigningMode,
};
pub use error::ConfigError;
pub use signing::Parameters;

// Re-export dispatch types
pub use clients::{
    AttemptOutcome, AwsClient, CallError, CallResult, ClientError, HttpClient, SignedRequest,
    TransientError, MAX_ATTEMPTS,
};
pub use services::{Service, ServiceClient, ServiceClientBuilder};
pub use xml::DecodeError;
