//! SendExpiryReminderHandler - pushes an expiry reminder to a member.
//!
//! WhatsApp is always attempted; email only when an address is supplied.
//! Sends are fire-and-forget: a gateway failure is surfaced to the caller
//! but nothing is retried and no state is rolled back.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{AccountId, MemberId, OwnedByAccount};
use crate::domain::roster::RosterError;
use crate::ports::{GatewayError, MemberRepository, NotificationGateway};

/// Command to send an expiry reminder.
#[derive(Debug, Clone)]
pub struct SendExpiryReminderCommand {
    pub owner_id: AccountId,
    pub member_id: MemberId,
    /// When present, an email reminder is sent as well.
    pub email: Option<String>,
}

/// Errors from the reminder flow.
#[derive(Debug, Error)]
pub enum ReminderError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Handler for expiry reminders.
pub struct SendExpiryReminderHandler {
    members: Arc<dyn MemberRepository>,
    gateway: Arc<dyn NotificationGateway>,
}

impl SendExpiryReminderHandler {
    pub fn new(members: Arc<dyn MemberRepository>, gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { members, gateway }
    }

    pub async fn handle(&self, cmd: SendExpiryReminderCommand) -> Result<(), ReminderError> {
        let member = self
            .members
            .find(&cmd.owner_id, &cmd.member_id)
            .await
            .map_err(RosterError::from)?
            .ok_or(RosterError::MemberNotFound(cmd.member_id))?;
        member.check_owner(&cmd.owner_id).map_err(RosterError::from)?;

        self.gateway
            .send_whatsapp(&member.phone, &member.name, member.expiry_date())
            .await?;

        if let Some(email) = cmd.email.as_deref() {
            self.gateway
                .send_email(&member.name, email, member.expiry_date())
                .await?;
        }

        tracing::info!(member_id = %member.id, "expiry reminder sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryMemberRepository, RecordingNotificationGateway};
    use crate::domain::roster::{Member, MemberPlan, Phone};
    use chrono::NaiveDate;

    async fn seeded(
        gateway: Arc<RecordingNotificationGateway>,
    ) -> (SendExpiryReminderHandler, Member) {
        let members = Arc::new(InMemoryMemberRepository::new());
        let member = Member::register(
            MemberId::new(),
            AccountId::new(),
            "Arun Mehta",
            Phone::try_new("9876543210").unwrap(),
            MemberPlan::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        members.insert(&member).await.unwrap();
        (SendExpiryReminderHandler::new(members, gateway), member)
    }

    #[tokio::test]
    async fn sends_whatsapp_with_member_details() {
        let gateway = Arc::new(RecordingNotificationGateway::new());
        let (handler, member) = seeded(gateway.clone()).await;

        handler
            .handle(SendExpiryReminderCommand {
                owner_id: member.owner_id,
                member_id: member.id,
                email: None,
            })
            .await
            .unwrap();

        let sends = gateway.whatsapp_sends.lock().unwrap();
        assert_eq!(sends.len(), 1);
        let (phone, name, expiry) = &sends[0];
        assert_eq!(phone, "9876543210");
        assert_eq!(name, "Arun Mehta");
        assert_eq!(*expiry, member.expiry_date());
        assert!(gateway.email_sends.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_email_when_address_supplied() {
        let gateway = Arc::new(RecordingNotificationGateway::new());
        let (handler, member) = seeded(gateway.clone()).await;

        handler
            .handle(SendExpiryReminderCommand {
                owner_id: member.owner_id,
                member_id: member.id,
                email: Some("arun@example.com".to_string()),
            })
            .await
            .unwrap();

        let emails = gateway.email_sends.lock().unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].1, "arun@example.com");
    }

    #[tokio::test]
    async fn gateway_failure_is_surfaced_not_swallowed() {
        let gateway = Arc::new(RecordingNotificationGateway::failing());
        let (handler, member) = seeded(gateway).await;

        let result = handler
            .handle(SendExpiryReminderCommand {
                owner_id: member.owner_id,
                member_id: member.id,
                email: None,
            })
            .await;

        assert!(matches!(result, Err(ReminderError::Gateway(_))));
    }

    #[tokio::test]
    async fn cannot_remind_another_accounts_member() {
        let gateway = Arc::new(RecordingNotificationGateway::new());
        let (handler, member) = seeded(gateway.clone()).await;

        let result = handler
            .handle(SendExpiryReminderCommand {
                owner_id: AccountId::new(),
                member_id: member.id,
                email: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(ReminderError::Roster(RosterError::MemberNotFound(_)))
        ));
        assert!(gateway.whatsapp_sends.lock().unwrap().is_empty());
    }
}
