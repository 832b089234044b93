//! Request signing.
//!
//! - [`canonical`]: percent-encoding, canonical query string, timestamp formats
//! - [`hmac`]: HMAC-SHA256 + base64 primitives
//! - [`sign`], [`sign_query`], [`sign_header`], [`verify_signature`]: the signer
//!
//! Signing is a pure function of its inputs; nothing here performs I/O or
//! reads the clock.

pub mod canonical;
pub mod hmac;
mod signer;

use std::collections::BTreeMap;

pub use signer::{sign, sign_header, sign_query, verify_signature};

/// A request parameter map.
///
/// Keys iterate in byte-wise ascending order, the order required by the
/// canonical query string.
pub type Parameters = BTreeMap<String, String>;

/// Name of the access key id parameter.
pub const AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
/// Name of the signature version parameter.
pub const SIGNATURE_VERSION: &str = "SignatureVersion";
/// Name of the signature method parameter.
pub const SIGNATURE_METHOD: &str = "SignatureMethod";
/// Name of the timestamp parameter.
pub const TIMESTAMP: &str = "Timestamp";
/// Name of the signature parameter.
pub const SIGNATURE: &str = "Signature";

/// Value sent as `SignatureVersion`.
pub const SIGNATURE_VERSION_VALUE: &str = "2";
/// Value sent as `SignatureMethod`, and the header-mode `Algorithm`.
pub const HMAC_SHA256: &str = "HmacSHA256";
