//! Notification gateway port.
//!
//! Outbound expiry reminders over WhatsApp and email. Sends are
//! fire-and-forget from the caller's perspective: a failure is reported to
//! the user, never retried automatically, and never rolls back the
//! operation that triggered it.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::roster::Phone;

/// Errors from the notification gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The provider rejected the send.
    #[error("Notification rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached (includes timeouts).
    #[error("Notification provider unreachable: {0}")]
    Unreachable(String),
}

/// Port for outbound expiry reminders.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Sends a WhatsApp expiry reminder to a member.
    async fn send_whatsapp(
        &self,
        phone: &Phone,
        name: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError>;

    /// Sends an email expiry reminder.
    async fn send_email(
        &self,
        to_name: &str,
        to_email: &str,
        expiry_date: NaiveDate,
    ) -> Result<(), GatewayError>;
}
