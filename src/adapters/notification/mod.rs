//! Notification gateway adapters: Twilio WhatsApp and EmailJS.

mod emailjs;
mod twilio;

pub use emailjs::EmailJs;
pub use twilio::TwilioWhatsApp;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

use crate::config::NotificationConfig;
use crate::domain::roster::Phone;
use crate::ports::{GatewayError, NotificationGateway};

/// Combined gateway: WhatsApp via Twilio, email via EmailJS.
pub struct ProviderNotificationGateway {
    whatsapp: TwilioWhatsApp,
    email: EmailJs,
}

impl ProviderNotificationGateway {
    /// Builds both providers over one timeout-bounded HTTP client.
    pub fn new(config: &NotificationConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.send_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        Ok(Self {
            whatsapp: TwilioWhatsApp::new(client.clone(), config),
            email: EmailJs::new(client, config),
        })
    }
}

#[async_trait]
impl NotificationGateway for ProviderNotificationGateway {
    async fn send_whatsapp(
        &self,
        phone: &Phone,
        name: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError> {
        self.whatsapp.send(phone, name, expiry_date).await
    }

    async fn send_email(
        &self,
        to_name: &str,
        to_email: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError> {
        self.email.send(to_name, to_email, expiry_date).await
    }
}
