//! HMAC-SHA256 request signing
//!
//! The server rebuilds the same canonical message and compares signatures, so
//! the message layout below is a wire contract:
//!
//! - empty body: `METHOD:URL:TIMESTAMP`
//! - otherwise:  `METHOD:URL:BODY:TIMESTAMP`

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Canonical bytes fed into the MAC. Body bytes are copied verbatim.
pub fn canonical_message(method: &str, full_url: &str, body: &[u8], timestamp: &str) -> Vec<u8> {
    let mut message =
        Vec::with_capacity(method.len() + full_url.len() + body.len() + timestamp.len() + 3);
    message.extend_from_slice(method.as_bytes());
    message.push(b':');
    message.extend_from_slice(full_url.as_bytes());
    message.push(b':');
    if !body.is_empty() {
        message.extend_from_slice(body);
        message.push(b':');
    }
    message.extend_from_slice(timestamp.as_bytes());
    message
}

/// Lowercase hex HMAC-SHA256 of the canonical message.
pub fn sign(secret: &[u8], method: &str, full_url: &str, body: &[u8], timestamp: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(&canonical_message(method, full_url, body, timestamp));
    hex::encode(mac.finalize().into_bytes())
}

/// API key + secret pair
#[derive(Clone)]
pub struct HmacSigner {
    api_key: String,
    api_secret: String,
}

impl HmacSigner {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn sign(&self, method: &str, full_url: &str, body: &[u8], timestamp: &str) -> String {
        sign(self.api_secret.as_bytes(), method, full_url, body, timestamp)
    }

    /// Value sent as `X-API-Key`.
    pub fn key_id(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api.webtender.host/api/v1/servers";
    const TS: &str = "1700000000";

    #[test]
    fn test_known_vector() {
        let mut mac = HmacSha256::new_from_slice(b"secret").unwrap();
        mac.update(b"GET:https://api.webtender.host/api/v1/servers:1700000000");
        let expected = hex::encode(mac.finalize().into_bytes());

        assert_eq!(sign(b"secret", "GET", URL, b"", TS), expected);
        assert_eq!(expected.len(), 64);
        assert!(expected.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_canonical_message_branches() {
        assert_eq!(
            canonical_message("GET", URL, b"", TS),
            format!("GET:{}:{}", URL, TS).into_bytes()
        );
        assert_eq!(
            canonical_message("POST", URL, br#"{"name":"a"}"#, TS),
            format!("POST:{}:{}:{}", URL, r#"{"name":"a"}"#, TS).into_bytes()
        );
    }

    #[test]
    fn test_body_branch_changes_signature() {
        let empty = sign(b"secret", "POST", URL, b"", TS);
        let with_body = sign(b"secret", "POST", URL, b"x", TS);
        assert_ne!(empty, with_body);
    }

    #[test]
    fn test_deterministic() {
        let a = sign(b"secret", "PUT", URL, b"{}", TS);
        let b = sign(b"secret", "PUT", URL, b"{}", TS);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_mutation_changes_signature() {
        let base = sign(b"secret", "GET", URL, b"body", TS);

        assert_ne!(base, sign(b"secreT", "GET", URL, b"body", TS));
        assert_ne!(base, sign(b"secret", "GEt", URL, b"body", TS));
        assert_ne!(base, sign(b"secret", "GET", &format!("{}/", URL), b"body", TS));
        assert_ne!(base, sign(b"secret", "GET", URL, b"bodY", TS));
        assert_ne!(base, sign(b"secret", "GET", URL, b"body", "1700000001"));

        // Sample every position of the URL.
        for i in 0..URL.len() {
            let mut mutated = URL.as_bytes().to_vec();
            mutated[i] = if mutated[i] == b'x' { b'y' } else { b'x' };
            let mutated = String::from_utf8(mutated).unwrap();
            assert_ne!(base, sign(b"secret", "GET", &mutated, b"body", TS), "position {}", i);
        }
    }

    #[test]
    fn test_empty_secret_still_signs() {
        let sig = sign(b"", "GET", URL, b"", TS);
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn test_signer_matches_free_function() {
        let signer = HmacSigner::new("key", "secret");
        assert_eq!(signer.key_id(), "key");
        assert_eq!(signer.sign("DELETE", URL, b"", TS), sign(b"secret", "DELETE", URL, b"", TS));
        assert!(!format!("{:?}", signer).contains("api_secret"));
    }
}
