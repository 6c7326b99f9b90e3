//! Checkout provider configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Checkout provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Public key id embedded in the client checkout widget
    pub checkout_key_id: String,

    /// Key secret used to verify confirmation signatures
    pub checkout_key_secret: SecretString,
}

impl PaymentConfig {
    /// Check if using the provider's test mode
    pub fn is_test_mode(&self) -> bool {
        self.checkout_key_id.starts_with("rzp_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        use secrecy::ExposeSecret;

        if self.checkout_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("CHECKOUT_KEY_ID"));
        }
        if self.checkout_key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("CHECKOUT_KEY_SECRET"));
        }

        // Key ids are issued with an rzp_ prefix; catch pasted secrets early
        if !self.checkout_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidCheckoutKeyId);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key_id: &str, secret: &str) -> PaymentConfig {
        PaymentConfig {
            checkout_key_id: key_id.to_string(),
            checkout_key_secret: SecretString::new(secret.to_string()),
        }
    }

    #[test]
    fn test_mode_detected_from_key_prefix() {
        assert!(config("rzp_test_abc", "s3cret").is_test_mode());
        assert!(!config("rzp_live_abc", "s3cret").is_test_mode());
    }

    #[test]
    fn valid_config_passes() {
        assert!(config("rzp_test_abc", "s3cret").validate().is_ok());
    }

    #[test]
    fn missing_key_id_fails() {
        assert!(config("", "s3cret").validate().is_err());
    }

    #[test]
    fn missing_secret_fails() {
        assert!(config("rzp_test_abc", "").validate().is_err());
    }

    #[test]
    fn wrong_key_prefix_fails() {
        assert!(config("sk_test_abc", "s3cret").validate().is_err());
    }
}
