//! HMAC-SHA256 primitives.
//!
//! Both signing modes produce a base64-encoded HMAC-SHA256 digest of a
//! string to sign, keyed by the secret access key. Signature comparison is
//! constant-time.
//!
//! # Example
//!
//! ```rust
//! use aws_dispatch::signing::hmac::compute_signature_base64;
//!
//! let sig = compute_signature_base64(b"message", "key");
//! assert_eq!(sig, "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo=");
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes an HMAC-SHA256 digest of `message`, returning standard padded base64.
///
/// HMAC-SHA256 accepts keys of any length, so this function never panics.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature_base64(message: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Performs constant-time comparison of two strings.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    // ConstantTimeEq handles different lengths securely
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_signature_base64_matches_known_value() {
        // HMAC-SHA256("message", "key") in hex: 6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a
        let sig = compute_signature_base64(b"message", "key");
        assert_eq!(sig, "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo=");
    }

    #[test]
    fn test_compute_signature_base64_produces_correct_length() {
        // 32 bytes of digest -> 44 base64 characters
        assert_eq!(compute_signature_base64(b"test", "secret").len(), 44);
        assert_eq!(compute_signature_base64(b"", "secret").len(), 44);
    }

    #[test]
    fn test_compute_signature_base64_valid_characters() {
        let sig = compute_signature_base64(b"test payload", "secret");
        assert!(sig
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(!constant_time_compare("ABC", "abc"));
    }
}
