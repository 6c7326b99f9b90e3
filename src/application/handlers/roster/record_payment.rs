//! RecordPaymentHandler - records a collected membership fee.
//!
//! Payments are immutable once written; there is no corresponding update
//! handler anywhere.

use std::sync::Arc;

use crate::domain::foundation::{AccountId, MemberId, PaymentId, Timestamp};
use crate::domain::roster::{Amount, Payment, PaymentMethod, RosterError};
use crate::ports::{MemberRepository, PaymentRepository};

/// Command to record a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub owner_id: AccountId,
    /// Required; `None` models the "no member selected" form state.
    pub member_id: Option<MemberId>,
    pub amount_minor_units: i64,
    /// Defaults to Cash when unspecified.
    pub method: Option<PaymentMethod>,
}

/// Handler for payment recording.
pub struct RecordPaymentHandler {
    members: Arc<dyn MemberRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl RecordPaymentHandler {
    pub fn new(members: Arc<dyn MemberRepository>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { members, payments }
    }

    /// Validates the selection and amount, confirms the member belongs to
    /// the caller, then appends the payment. Nothing is written on
    /// validation failure.
    pub async fn handle(&self, cmd: RecordPaymentCommand) -> Result<Payment, RosterError> {
        let member_id = cmd
            .member_id
            .ok_or_else(|| RosterError::validation("member_id", "Please select a member"))?;
        let amount = Amount::try_new(cmd.amount_minor_units)
            .map_err(|_| RosterError::validation("amount", "Please enter a valid amount"))?;

        // Tenant isolation: the member must exist under this account.
        self.members
            .find(&cmd.owner_id, &member_id)
            .await?
            .ok_or(RosterError::MemberNotFound(member_id))?;

        let payment = Payment::record(
            PaymentId::new(),
            member_id,
            cmd.owner_id,
            amount,
            cmd.method.unwrap_or_default(),
            Timestamp::now(),
        );

        self.payments.insert(&payment).await?;

        tracing::debug!(
            payment_id = %payment.id,
            member_id = %member_id,
            "payment recorded"
        );

        Ok(payment)
    }
}
