//! # Checkout Signing
//!
//! HMAC-SHA1 adapter for the [`SignatureVerifier`] port. The gateway signs
//! each redirect postback with the application's consumer secret.

use checkout_types::{SignatureVerifier, signature_payload};
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha1::Sha1;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;

/// Error type for signer construction.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("Signing secret cannot be empty")]
    EmptySecret,
}

/// Signs a payload using HMAC-SHA1, returning lowercase hex.
pub fn sign_payload(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a hex signature using constant-time comparison.
///
/// Hex case is not significant.
pub fn verify_payload(payload: &[u8], signature: &str, secret: &str) -> bool {
    let expected = sign_payload(payload, secret);
    let supplied = signature.trim().to_ascii_lowercase();
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}

/// Postback signature verifier keyed with the application secret.
pub struct HmacSha1Verifier {
    secret: String,
}

impl HmacSha1Verifier {
    pub fn new(secret: impl Into<String>) -> Result<Self, SigningError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SigningError::EmptySecret);
        }
        Ok(Self { secret })
    }
}

impl std::fmt::Debug for HmacSha1Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha1Verifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SignatureVerifier for HmacSha1Verifier {
    fn sign(&self, checkout_id: &str, amount: Decimal) -> String {
        sign_payload(signature_payload(checkout_id, amount).as_bytes(), &self.secret)
    }

    #[tracing::instrument(skip(self, signature))]
    fn verify(&self, checkout_id: &str, amount: Decimal, signature: &str) -> bool {
        let payload = signature_payload(checkout_id, amount);
        let valid = verify_payload(payload.as_bytes(), signature, &self.secret);
        if !valid {
            tracing::warn!("postback signature mismatch");
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_answer() {
        // RFC 2202, test case 2
        let signature = sign_payload(b"what do ya want for nothing?", "Jefe");
        assert_eq!(signature, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn test_payload_verification() {
        let payload = b"C3D4DC4F&0.01";
        let secret = "consumer_secret_123";

        let signature = sign_payload(payload, secret);
        assert_eq!(signature.len(), 40);
        assert!(verify_payload(payload, &signature, secret));
        assert!(verify_payload(payload, &signature.to_uppercase(), secret));
        assert!(!verify_payload(payload, &signature, "wrong_secret"));
        assert!(!verify_payload(b"tampered", &signature, secret));
        assert!(!verify_payload(payload, "", secret));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            HmacSha1Verifier::new(""),
            Err(SigningError::EmptySecret)
        ));
    }

    #[test]
    fn test_verifier_signs_checkout_id_and_amount() {
        let verifier = HmacSha1Verifier::new("consumer_secret_123").unwrap();
        let amount = Decimal::new(1999, 2);

        let signature = verifier.sign("abc", amount);
        assert_eq!(
            signature,
            sign_payload(b"abc&19.99", "consumer_secret_123")
        );
        assert!(verifier.verify("abc", amount, &signature));
        assert!(verifier.verify("abc", Decimal::new(199900, 4), &signature));
        assert!(!verifier.verify("abd", amount, &signature));
        assert!(!verifier.verify("abc", Decimal::new(2000, 2), &signature));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let verifier = HmacSha1Verifier::new("consumer_secret_123").unwrap();
        assert!(!format!("{verifier:?}").contains("consumer_secret_123"));
    }
}
