//! Request signature computation.
//!
//! # Query mode
//!
//! The string to sign is
//!
//! ```text
//! POST\n<lower-case host>\n<path>\n<canonical query string>
//! ```
//!
//! where the canonical query string is every parameter except `Signature`,
//! sorted byte-wise by key and percent-encoded. The protocol parameters
//! (`AWSAccessKeyId`, `SignatureVersion`, `SignatureMethod`, `Timestamp`)
//! must already be present, since the signature covers them.
//!
//! # Header mode
//!
//! The string to sign is the HTTP-date sent in the `Date` header.

use chrono::{DateTime, Utc};

use crate::config::{ClientConfig, Host, RequestPath, SecretAccessKey, SigningMode};
use crate::signing::canonical::{canonical_query_string, http_date, string_to_sign};
use crate::signing::hmac::{compute_signature_base64, constant_time_compare};
use crate::signing::Parameters;

/// Signs a parameter set in query mode.
///
/// Any existing `Signature` entry is ignored, so re-signing an already
/// signed snapshot yields the same value. The input is not modified.
///
/// # Example
///
/// ```rust
/// use aws_dispatch::{Host, Parameters, RequestPath, SecretAccessKey};
/// use aws_dispatch::signing::sign_query;
///
/// let mut params = Parameters::new();
/// params.insert("Action".to_string(), "ListQueues".to_string());
///
/// let sig = sign_query(
///     &params,
///     &Host::new("sqs.us-east-1.amazonaws.com").unwrap(),
///     &RequestPath::root(),
///     &SecretAccessKey::new("secret").unwrap(),
/// );
/// assert_eq!(sig.len(), 44);
/// ```
#[must_use]
pub fn sign_query(
    params: &Parameters,
    host: &Host,
    path: &RequestPath,
    secret: &SecretAccessKey,
) -> String {
    tracing::debug!(
        keys = ?params.keys().collect::<Vec<_>>(),
        "sorted keys for signing"
    );
    let canonical = canonical_query_string(params);
    let to_sign = string_to_sign(host.as_ref(), path.as_ref(), &canonical);
    compute_signature_base64(to_sign.as_bytes(), secret.as_ref())
}

/// Signs the HTTP-date of `now` for header mode.
#[must_use]
pub fn sign_header(now: DateTime<Utc>, secret: &SecretAccessKey) -> String {
    compute_signature_base64(http_date(now).as_bytes(), secret.as_ref())
}

/// Computes the signature for `params` using the config's signing mode.
///
/// In query mode `now` is unused because the timestamp travels inside
/// `params`; in header mode `params` is unused.
#[must_use]
pub fn sign(params: &Parameters, config: &ClientConfig, now: DateTime<Utc>) -> String {
    match config.signing_mode() {
        SigningMode::Query => sign_query(
            params,
            config.host(),
            config.path(),
            config.secret_access_key(),
        ),
        SigningMode::Header => sign_header(now, config.secret_access_key()),
    }
}

/// Checks a query-mode signature against a signed parameter snapshot.
///
/// The signature is recomputed over the snapshot (its `Signature` entry is
/// ignored) and compared in constant time.
#[must_use]
pub fn verify_signature(params: &Parameters, signature: &str, config: &ClientConfig) -> bool {
    let expected = sign_query(
        params,
        config.host(),
        config.path(),
        config.secret_access_key(),
    );
    constant_time_compare(&expected, signature)
}
