//! Payment record entity.
//!
//! Payments are append-only: they are created and read, never edited in
//! place. There is deliberately no update path on this type.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, MemberId, OwnedByAccount, PaymentId, Timestamp};

use super::{Amount, Phone};

/// How a payment was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Online,
}

impl PaymentMethod {
    /// Returns the display name for this method.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Online => "Online",
        }
    }
}

impl Default for PaymentMethod {
    /// Cash is assumed when no method was specified.
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Payment record - one collected membership fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    /// Unique identifier for this payment.
    pub id: PaymentId,

    /// Member the fee was collected from.
    pub member_id: MemberId,

    /// Account that recorded the payment.
    pub owner_id: AccountId,

    /// Collected amount, strictly positive.
    pub amount: Amount,

    /// Collection method.
    pub method: PaymentMethod,

    /// When the payment was recorded.
    pub recorded_at: Timestamp,
}

impl Payment {
    /// Records a new payment.
    pub fn record(
        id: PaymentId,
        member_id: MemberId,
        owner_id: AccountId,
        amount: Amount,
        method: PaymentMethod,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            id,
            member_id,
            owner_id,
            amount,
            method,
            recorded_at,
        }
    }
}

impl OwnedByAccount for Payment {
    fn owner_id(&self) -> &AccountId {
        &self.owner_id
    }
}

/// A payment joined with its member's name and phone for display.
///
/// The member fields are absent when the member has since been deleted;
/// the payment itself is never deleted with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentWithMember {
    pub payment: Payment,
    pub member_name: Option<String>,
    pub member_phone: Option<Phone>,
}
