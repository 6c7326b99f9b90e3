//! Twilio WhatsApp gateway.

use chrono::NaiveDate;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::config::NotificationConfig;
use crate::domain::roster::Phone;
use crate::ports::GatewayError;

/// Sends WhatsApp reminders through the Twilio Messages API.
pub struct TwilioWhatsApp {
    client: Client,
    account_sid: String,
    auth_token: SecretString,
    from: String,
    country_prefix: String,
}

impl TwilioWhatsApp {
    /// Builds the gateway with a timeout-bounded HTTP client so a hung
    /// provider surfaces as a failed send.
    pub fn new(client: Client, config: &NotificationConfig) -> Self {
        Self {
            client,
            account_sid: config.twilio_account_sid.clone(),
            auth_token: config.twilio_auth_token.clone(),
            from: config.twilio_whatsapp_from.clone(),
            country_prefix: config.whatsapp_country_prefix.clone(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        )
    }

    /// Sends one WhatsApp message.
    pub async fn send(
        &self,
        phone: &Phone,
        name: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError> {
        let to = format!("whatsapp:{}{}", self.country_prefix, phone.as_str());
        let body = format!(
            "Hi {}, your gym membership expires on {}.",
            name, expiry_date
        );

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&[("From", self.from.as_str()), ("To", &to), ("Body", &body)])
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "twilio rejected whatsapp send");
            Err(GatewayError::Rejected(format!("{}: {}", status, detail)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn gateway() -> TwilioWhatsApp {
        let config = NotificationConfig {
            twilio_account_sid: "ACtest".to_string(),
            twilio_auth_token: SecretString::new("token".to_string()),
            twilio_whatsapp_from: "whatsapp:+14155238886".to_string(),
            whatsapp_country_prefix: "+91".to_string(),
            emailjs_service_id: "s".to_string(),
            emailjs_template_id: "t".to_string(),
            emailjs_user_id: "u".to_string(),
            send_timeout_secs: 10,
        };
        TwilioWhatsApp::new(Client::new(), &config)
    }

    #[test]
    fn messages_url_embeds_account_sid() {
        assert_eq!(
            gateway().messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/ACtest/Messages.json"
        );
    }
}
