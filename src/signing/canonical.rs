//! Canonical forms used by the signer and the request builder.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::signing::{Parameters, SIGNATURE};

/// Percent-encodes a key or value.
///
/// Only the RFC 3986 unreserved set (`A-Z a-z 0-9 - _ . ~`) passes through.
/// Space becomes `%20`, and `!`, `'`, `*`, `(`, `)` are escaped as well.
#[must_use]
pub fn percent_encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Joins parameters as sorted, percent-encoded `key=value` pairs.
///
/// `BTreeMap` iteration is byte-wise ascending on keys, which is the order
/// the signature protocol requires.
fn join_encoded<'a>(params: impl Iterator<Item = (&'a String, &'a String)>) -> String {
    let mut out = String::new();
    for (key, value) in params {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&percent_encode(key));
        out.push('=');
        out.push_str(&percent_encode(value));
    }
    out
}

/// Builds the canonical query string, leaving out any `Signature` entry.
#[must_use]
pub fn canonical_query_string(params: &Parameters) -> String {
    join_encoded(params.iter().filter(|(key, _)| key.as_str() != SIGNATURE))
}

/// Encodes every parameter, `Signature` included, as a form body.
#[must_use]
pub fn form_encode(params: &Parameters) -> String {
    join_encoded(params.iter())
}

/// Builds the query-mode string to sign.
#[must_use]
pub fn string_to_sign(host: &str, path: &str, canonical_query: &str) -> String {
    format!(
        "POST\n{}\n{}\n{}",
        host.to_lowercase(),
        path,
        canonical_query
    )
}

/// Formats `now` as the `Timestamp` parameter, `YYYY-MM-DDTHH:MM:SSZ`.
#[must_use]
pub fn iso8601_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Formats `now` as an HTTP-date, e.g. `Mon, 01 Jan 2024 00:00:00 GMT`.
#[must_use]
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
