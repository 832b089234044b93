//! Signed request construction.
//!
//! [`SignedRequest::build`] turns an action, a caller parameter map and a
//! timestamp into the exact headers and form body of one attempt. It reads
//! nothing but its arguments, so identical inputs give identical requests.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::{ClientConfig, SigningMode};
use crate::signing::canonical::{form_encode, http_date, iso8601_timestamp};
use crate::signing::{
    sign_header, sign_query, Parameters, AWS_ACCESS_KEY_ID, HMAC_SHA256, SIGNATURE,
    SIGNATURE_METHOD, SIGNATURE_VERSION, SIGNATURE_VERSION_VALUE, TIMESTAMP,
};

/// `Content-Type` of every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Header carrying the header-mode signature.
pub const AUTHORIZATION_HEADER: &str = "X-Amzn-Authorization";

/// Scheme name used in the header-mode authorization value.
pub const AWS3_HTTPS: &str = "AWS3-HTTPS";

/// One fully signed attempt, ready for the transport.
///
/// # Example
///
/// ```rust
/// use aws_dispatch::{AccessKeyId, ClientConfig, Host, Parameters, SecretAccessKey};
/// use aws_dispatch::clients::SignedRequest;
/// use chrono::{TimeZone, Utc};
///
/// let config = ClientConfig::builder()
///     .access_key_id(AccessKeyId::new("AKIDEXAMPLE").unwrap())
///     .secret_access_key(SecretAccessKey::new("secret").unwrap())
///     .host(Host::new("example.amazonaws.com").unwrap())
///     .build()
///     .unwrap();
///
/// let mut params = Parameters::new();
/// params.insert("Action".to_string(), "DescribeX".to_string());
/// params.insert("Foo".to_string(), "bar".to_string());
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let request = SignedRequest::build("DescribeX", &params, &config, now);
///
/// assert_eq!(
///     request.parameters.get("Signature").map(String::as_str),
///     Some("wswB6iWgr0Inb2G65/jiPwayxlfyD+yg4S6yc+Pu+FA=")
/// );
/// assert_eq!(request.header("content-length"), Some(request.body.len().to_string().as_str()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    /// The action name, kept for logging.
    pub action: String,
    /// The parameter snapshot encoded into the body.
    pub parameters: Parameters,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// The URL-encoded form body.
    pub body: String,
}

impl SignedRequest {
    /// Builds the signed request for one attempt.
    ///
    /// The caller's `parameters` are copied; protocol fields are only added
    /// to the copy. In query mode the signature is computed last, after
    /// `AWSAccessKeyId`, `SignatureVersion`, `SignatureMethod` and
    /// `Timestamp` are present. In header mode the parameters are sent
    /// unchanged and the signature goes into [`AUTHORIZATION_HEADER`].
    #[must_use]
    pub fn build(
        action: &str,
        parameters: &Parameters,
        config: &ClientConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let mut snapshot = parameters.clone();
        let mut headers = BTreeMap::new();

        match config.signing_mode() {
            SigningMode::Query => {
                snapshot.insert(
                    AWS_ACCESS_KEY_ID.to_string(),
                    config.access_key_id().as_ref().to_string(),
                );
                snapshot.insert(
                    SIGNATURE_VERSION.to_string(),
                    SIGNATURE_VERSION_VALUE.to_string(),
                );
                snapshot.insert(SIGNATURE_METHOD.to_string(), HMAC_SHA256.to_string());
                snapshot.insert(TIMESTAMP.to_string(), iso8601_timestamp(now));
                let signature = sign_query(
                    &snapshot,
                    config.host(),
                    config.path(),
                    config.secret_access_key(),
                );
                snapshot.insert(SIGNATURE.to_string(), signature);
            }
            SigningMode::Header => {
                let signature = sign_header(now, config.secret_access_key());
                headers.insert("Date".to_string(), http_date(now));
                headers.insert(
                    AUTHORIZATION_HEADER.to_string(),
                    format!(
                        "{AWS3_HTTPS} AWSAccessKeyId={}, Algorithm={HMAC_SHA256}, Signature={signature}",
                        config.access_key_id().as_ref()
                    ),
                );
            }
        }

        let body = form_encode(&snapshot);
        headers.insert("Host".to_string(), config.host().as_ref().to_string());
        headers.insert("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string());
        headers.insert("Content-Length".to_string(), body.len().to_string());

        Self {
            action: action.to_string(),
            parameters: snapshot,
            headers,
            body,
        }
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessKeyId, Host, SecretAccessKey};
    use crate::signing::verify_signature;
    use chrono::TimeZone;

    fn config(mode: SigningMode) -> ClientConfig {
        ClientConfig::builder()
            .access_key_id(AccessKeyId::new("AKIDEXAMPLE").unwrap())
            .secret_access_key(SecretAccessKey::new("secret").unwrap())
            .host(Host::new("example.amazonaws.com").unwrap())
            .signing_mode(mode)
            .build()
            .unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn caller_params() -> Parameters {
        let mut params = Parameters::new();
        params.insert("Action".to_string(), "DescribeX".to_string());
        params.insert("Foo".to_string(), "bar".to_string());
        params
    }

    #[test]
    fn test_query_mode_injects_protocol_parameters() {
        let request = SignedRequest::build(
            "DescribeX",
            &caller_params(),
            &config(SigningMode::Query),
            fixed_now(),
        );

        let p = &request.parameters;
        assert_eq!(p.get("AWSAccessKeyId").unwrap(), "AKIDEXAMPLE");
        assert_eq!(p.get("SignatureVersion").unwrap(), "2");
        assert_eq!(p.get("SignatureMethod").unwrap(), "HmacSHA256");
        assert_eq!(p.get("Timestamp").unwrap(), "2024-01-01T00:00:00Z");
        assert_eq!(
            p.get("Signature").unwrap(),
            "wswB6iWgr0Inb2G65/jiPwayxlfyD+yg4S6yc+Pu+FA="
        );
        assert!(request.header("X-Amzn-Authorization").is_none());
        assert!(request.header("Date").is_none());
    }

    #[test]
    fn test_query_mode_body_and_headers() {
        let request = SignedRequest::build(
            "DescribeX",
            &caller_params(),
            &config(SigningMode::Query),
            fixed_now(),
        );

        assert_eq!(
            request.body,
            "AWSAccessKeyId=AKIDEXAMPLE&Action=DescribeX&Foo=bar\
             &Signature=wswB6iWgr0Inb2G65%2FjiPwayxlfyD%2Byg4S6yc%2BPu%2BFA%3D\
             &SignatureMethod=HmacSHA256&SignatureVersion=2&Timestamp=2024-01-01T00%3A00%3A00Z"
        );
        assert_eq!(request.header("Content-Type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            request.header("Content-Length"),
            Some(request.body.len().to_string().as_str())
        );
        assert_eq!(request.header("host"), Some("example.amazonaws.com"));
    }

    #[test]
    fn test_query_mode_signature_verifies() {
        let cfg = config(SigningMode::Query);
        let request = SignedRequest::build("DescribeX", &caller_params(), &cfg, fixed_now());
        let signature = request.parameters.get("Signature").unwrap();
        assert!(verify_signature(&request.parameters, signature, &cfg));
    }

    #[test]
    fn test_caller_parameters_are_not_mutated() {
        let params = caller_params();
        let before = params.clone();
        let _ = SignedRequest::build(
            "DescribeX",
            &params,
            &config(SigningMode::Query),
            fixed_now(),
        );
        assert_eq!(params, before);
    }

    #[test]
    fn test_build_is_deterministic_for_fixed_time() {
        let cfg = config(SigningMode::Query);
        let first = SignedRequest::build("DescribeX", &caller_params(), &cfg, fixed_now());
        let second = SignedRequest::build("DescribeX", &caller_params(), &cfg, fixed_now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_mode_adds_date_and_authorization() {
        let request = SignedRequest::build(
            "SendEmail",
            &caller_params(),
            &config(SigningMode::Header),
            fixed_now(),
        );

        assert_eq!(request.header("Date"), Some("Mon, 01 Jan 2024 00:00:00 GMT"));
        assert_eq!(
            request.header("X-Amzn-Authorization"),
            Some(
                "AWS3-HTTPS AWSAccessKeyId=AKIDEXAMPLE, Algorithm=HmacSHA256, \
                 Signature=DUIs1qgYeGtfMJhDnUQSWB7GFDUjl1kHZsY5Ycmaz7Q="
            )
        );
        assert_eq!(request.parameters, caller_params());
        assert_eq!(request.body, "Action=DescribeX&Foo=bar");
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let mut params = Parameters::new();
        params.insert("Subject".to_string(), "héllo".to_string());
        let request =
            SignedRequest::build("SendEmail", &params, &config(SigningMode::Header), fixed_now());
        assert_eq!(request.body, "Subject=h%C3%A9llo");
        assert_eq!(request.header("Content-Length"), Some("18"));
    }
}
