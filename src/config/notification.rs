//! Notification gateway configuration (Twilio WhatsApp + EmailJS)

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Twilio account SID
    pub twilio_account_sid: String,

    /// Twilio auth token
    pub twilio_auth_token: SecretString,

    /// WhatsApp sender, e.g. `whatsapp:+14155238886`
    #[serde(default = "default_whatsapp_from")]
    pub twilio_whatsapp_from: String,

    /// Country prefix prepended to the 10-digit member numbers
    #[serde(default = "default_country_prefix")]
    pub whatsapp_country_prefix: String,

    /// EmailJS service id
    pub emailjs_service_id: String,

    /// EmailJS template id
    pub emailjs_template_id: String,

    /// EmailJS user (public) id
    pub emailjs_user_id: String,

    /// Outbound request timeout in seconds. A hung provider surfaces as a
    /// failed send instead of a stuck request.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

impl NotificationConfig {
    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        use secrecy::ExposeSecret;

        if self.twilio_account_sid.is_empty() {
            return Err(ValidationError::MissingRequired("TWILIO_ACCOUNT_SID"));
        }
        if !self.twilio_account_sid.starts_with("AC") {
            return Err(ValidationError::InvalidTwilioSid);
        }
        if self.twilio_auth_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("TWILIO_AUTH_TOKEN"));
        }
        if !self.twilio_whatsapp_from.starts_with("whatsapp:+") {
            return Err(ValidationError::InvalidWhatsAppSender);
        }
        if self.emailjs_service_id.is_empty() {
            return Err(ValidationError::MissingRequired("EMAILJS_SERVICE_ID"));
        }
        if self.emailjs_template_id.is_empty() {
            return Err(ValidationError::MissingRequired("EMAILJS_TEMPLATE_ID"));
        }
        if self.emailjs_user_id.is_empty() {
            return Err(ValidationError::MissingRequired("EMAILJS_USER_ID"));
        }
        if self.send_timeout_secs == 0 || self.send_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_whatsapp_from() -> String {
    // Twilio sandbox sender
    "whatsapp:+14155238886".to_string()
}

fn default_country_prefix() -> String {
    "+91".to_string()
}

fn default_send_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> NotificationConfig {
        NotificationConfig {
            twilio_account_sid: "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx".to_string(),
            twilio_auth_token: SecretString::new("token".to_string()),
            twilio_whatsapp_from: default_whatsapp_from(),
            whatsapp_country_prefix: default_country_prefix(),
            emailjs_service_id: "service_abc".to_string(),
            emailjs_template_id: "template_def".to_string(),
            emailjs_user_id: "user_ghi".to_string(),
            send_timeout_secs: default_send_timeout(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn sid_without_ac_prefix_fails() {
        let config = NotificationConfig {
            twilio_account_sid: "XX123".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn sender_without_whatsapp_scheme_fails() {
        let config = NotificationConfig {
            twilio_whatsapp_from: "+14155238886".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_emailjs_ids_fail() {
        let config = NotificationConfig {
            emailjs_service_id: String::new(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_fails() {
        let config = NotificationConfig {
            send_timeout_secs: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }
}
