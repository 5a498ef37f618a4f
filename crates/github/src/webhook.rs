//! Webhook delivery signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw request body and
//! sends the hex digest in the `X-Hub-Signature-256` header, prefixed with
//! `sha256=`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Header carrying the HMAC digest of the delivery body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Check a webhook delivery signature against the shared secret.
///
/// Returns `false` for a missing prefix, malformed hex, or digest mismatch.
/// The comparison is constant-time.
pub fn verify_signature(secret: &str, body: &[u8], signature_header: &str) -> bool {
    let Some(hex_digest) = signature_header.strip_prefix("sha256=") else {
        return false;
    };
    let Some(expected) = decode_hex(hex_digest) else {
        return false;
    };

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Compute the `sha256=<hex>` signature for a body, as GitHub would send it.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    let digest = mac.finalize().into_bytes();
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("sha256={hex}")
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }
    (0..input.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&input[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_round_trip() {
        let body = br#"{"action":"opened"}"#;
        let header = sign("secret", body);
        assert!(header.starts_with("sha256="));
        assert!(verify_signature("secret", body, &header));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = b"payload";
        let header = sign("secret", body);
        assert!(!verify_signature("other", body, &header));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let header = sign("secret", b"payload");
        assert!(!verify_signature("secret", b"payload2", &header));
    }

    #[test]
    fn test_malformed_header_rejected() {
        assert!(!verify_signature("secret", b"payload", "sha1=abcdef"));
        assert!(!verify_signature("secret", b"payload", "sha256=zz"));
        assert!(!verify_signature("secret", b"payload", "sha256=abc"));
        assert!(!verify_signature("secret", b"payload", ""));
    }

    #[test]
    fn test_known_vector() {
        // Matches GitHub's documented example computation.
        let header = sign("It's a Secret to Everybody", b"Hello, World!");
        assert_eq!(
            header,
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17"
        );
    }
}
