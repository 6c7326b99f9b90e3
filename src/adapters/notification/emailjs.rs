//! EmailJS gateway.

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::json;

use crate::config::NotificationConfig;
use crate::ports::GatewayError;

const SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Sends email reminders through the EmailJS send API.
pub struct EmailJs {
    client: Client,
    service_id: String,
    template_id: String,
    user_id: String,
}

impl EmailJs {
    pub fn new(client: Client, config: &NotificationConfig) -> Self {
        Self {
            client,
            service_id: config.emailjs_service_id.clone(),
            template_id: config.emailjs_template_id.clone(),
            user_id: config.emailjs_user_id.clone(),
        }
    }

    /// Sends one templated reminder email.
    pub async fn send(
        &self,
        to_name: &str,
        to_email: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError> {
        let payload = json!({
            "service_id": self.service_id,
            "template_id": self.template_id,
            "user_id": self.user_id,
            "template_params": {
                "to_name": to_name,
                "to_email": to_email,
                "expiry_date": expiry_date.to_string(),
            },
        });

        let response = self
            .client
            .post(SEND_URL)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            tracing::warn!(%status, "emailjs rejected send");
            Err(GatewayError::Rejected(status.to_string()))
        }
    }
}
