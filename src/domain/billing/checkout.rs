//! Checkout confirmation signature verification.
//!
//! The checkout provider runs an interactive payment flow in the client and
//! calls back with `{payment_id, order_id, signature}`. The signature is
//! HMAC-SHA256 over `"{order_id}|{payment_id}"` keyed with the checkout
//! secret. A subscription only activates after this verification succeeds;
//! a client-reported success alone is never trusted.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::BillingError;

/// Signed confirmation payload returned by the checkout provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutConfirmation {
    /// Provider id of the captured payment.
    pub payment_id: String,

    /// Provider id of the order opened for this checkout.
    pub order_id: String,

    /// Hex-encoded HMAC-SHA256 signature over `order_id|payment_id`.
    pub signature: String,
}

/// Verifier for checkout confirmation signatures.
pub struct CheckoutVerifier {
    secret: SecretString,
}

impl CheckoutVerifier {
    /// Creates a new verifier with the checkout key secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verifies a confirmation payload.
    ///
    /// # Verification Steps
    ///
    /// 1. Reject empty ids or signature outright
    /// 2. Hex-decode the presented signature
    /// 3. Compute the expected HMAC-SHA256 over `order_id|payment_id`
    /// 4. Compare in constant time
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidSignature` on any mismatch or malformed
    /// input. Callers must not distinguish the cases to the client.
    pub fn verify(&self, confirmation: &CheckoutConfirmation) -> Result<(), BillingError> {
        if confirmation.payment_id.is_empty()
            || confirmation.order_id.is_empty()
            || confirmation.signature.is_empty()
        {
            return Err(BillingError::InvalidSignature);
        }

        let presented =
            hex::decode(&confirmation.signature).map_err(|_| BillingError::InvalidSignature)?;

        let expected = self.compute_signature(&confirmation.order_id, &confirmation.payment_id);

        if constant_time_compare(&expected, &presented) {
            Ok(())
        } else {
            Err(BillingError::InvalidSignature)
        }
    }

    /// Computes the HMAC-SHA256 signature for an order/payment pair.
    fn compute_signature(&self, order_id: &str, payment_id: &str) -> Vec<u8> {
        let signed_payload = format!("{}|{}", order_id, payment_id);

        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak the expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a valid hex signature for use in test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let signed_payload = format!("{}|{}", order_id, payment_id);
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(signed_payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "ckt_test_secret_12345";

    fn verifier() -> CheckoutVerifier {
        CheckoutVerifier::new(SecretString::new(TEST_SECRET.to_string()))
    }

    fn signed_confirmation() -> CheckoutConfirmation {
        CheckoutConfirmation {
            payment_id: "pay_A1b2C3d4".to_string(),
            order_id: "order_X9y8Z7".to_string(),
            signature: compute_test_signature(TEST_SECRET, "order_X9y8Z7", "pay_A1b2C3d4"),
        }
    }

    #[test]
    fn valid_signature_verifies() {
        assert!(verifier().verify(&signed_confirmation()).is_ok());
    }

    #[test]
    fn wrong_secret_fails() {
        let other = CheckoutVerifier::new(SecretString::new("wrong_secret".to_string()));
        let result = other.verify(&signed_confirmation());
        assert_eq!(result, Err(BillingError::InvalidSignature));
    }

    #[test]
    fn tampered_payment_id_fails() {
        let mut confirmation = signed_confirmation();
        confirmation.payment_id = "pay_forged".to_string();
        assert_eq!(
            verifier().verify(&confirmation),
            Err(BillingError::InvalidSignature)
        );
    }

    #[test]
    fn tampered_order_id_fails() {
        let mut confirmation = signed_confirmation();
        confirmation.order_id = "order_forged".to_string();
        assert_eq!(
            verifier().verify(&confirmation),
            Err(BillingError::InvalidSignature)
        );
    }

    #[test]
    fn non_hex_signature_fails() {
        let mut confirmation = signed_confirmation();
        confirmation.signature = "not hex at all".to_string();
        assert_eq!(
            verifier().verify(&confirmation),
            Err(BillingError::InvalidSignature)
        );
    }

    #[test]
    fn truncated_signature_fails() {
        let mut confirmation = signed_confirmation();
        confirmation.signature.truncate(16);
        assert_eq!(
            verifier().verify(&confirmation),
            Err(BillingError::InvalidSignature)
        );
    }

    #[test]
    fn empty_fields_fail() {
        for field in ["payment_id", "order_id", "signature"] {
            let mut confirmation = signed_confirmation();
            match field {
                "payment_id" => confirmation.payment_id.clear(),
                "order_id" => confirmation.order_id.clear(),
                _ => confirmation.signature.clear(),
            }
            assert_eq!(
                verifier().verify(&confirmation),
                Err(BillingError::InvalidSignature),
                "empty {} must fail",
                field
            );
        }
    }

    #[test]
    fn constant_time_compare_handles_lengths() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_compare(&[1, 2], &[1, 2, 3]));
        assert!(constant_time_compare(&[], &[]));
    }
}
