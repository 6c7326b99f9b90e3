//! Payment repository port.
//!
//! Payments are append-only: the contract has an insert and a read, no
//! update or delete.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::roster::{Payment, PaymentWithMember};

/// Repository port for payment records.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts a recorded payment.
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Lists an account's payments joined with each member's name and
    /// phone, newest first.
    async fn list_with_member(
        &self,
        owner_id: &AccountId,
    ) -> Result<Vec<PaymentWithMember>, DomainError>;
}
