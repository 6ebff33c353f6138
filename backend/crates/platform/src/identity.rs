//! Signed identity tokens
//!
//! The authentication service issues `<subject>.<signature>` tokens where
//! `subject` is the user's UUID in hyphenated form and `signature` is the
//! base64url HMAC-SHA256 of the subject under a shared secret. Verifying the
//! signature is enough to trust the subject; credentials are never re-checked.

use crate::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityTokenError {
    #[error("Malformed identity token")]
    Malformed,
    #[error("Identity token signature mismatch")]
    BadSignature,
}

/// Issue a signed token for `subject`
pub fn sign_identity(subject: &str, secret: &[u8; 32]) -> String {
    let signature = hmac_sha256(secret, subject.as_bytes());
    format!("{}.{}", subject, to_base64url(&signature))
}

/// Verify a token and return its subject
pub fn verify_identity<'a>(
    token: &'a str,
    secret: &[u8; 32],
) -> Result<&'a str, IdentityTokenError> {
    let (subject, signature_b64) = token
        .split_once('.')
        .ok_or(IdentityTokenError::Malformed)?;
    if subject.is_empty() || signature_b64.contains('.') {
        return Err(IdentityTokenError::Malformed);
    }

    let provided = from_base64url(signature_b64).map_err(|_| IdentityTokenError::Malformed)?;
    let expected = hmac_sha256(secret, subject.as_bytes());

    if !constant_time_eq(&provided, &expected) {
        return Err(IdentityTokenError::BadSignature);
    }
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];
    const SUBJECT: &str = "0b0e6f5c-3f3a-4f0e-9d1e-6a1f0d1c2b3a";

    #[test]
    fn test_sign_then_verify() {
        let token = sign_identity(SUBJECT, &SECRET);
        assert_eq!(verify_identity(&token, &SECRET), Ok(SUBJECT));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_identity(SUBJECT, &SECRET);
        assert_eq!(
            verify_identity(&token, &[8u8; 32]),
            Err(IdentityTokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_subject_rejected() {
        let token = sign_identity(SUBJECT, &SECRET);
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("ffffffff-3f3a-4f0e-9d1e-6a1f0d1c2b3a.{}", sig);
        assert_eq!(
            verify_identity(&forged, &SECRET),
            Err(IdentityTokenError::BadSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "no-dot", ".sig", "a.b.c", "subject.!!!"] {
            assert_eq!(
                verify_identity(token, &SECRET),
                Err(IdentityTokenError::Malformed),
                "token {token:?}"
            );
        }
    }
}
