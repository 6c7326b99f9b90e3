//! RefreshDashboardHandler - the formalized refresh-after-mutation
//! contract.
//!
//! Every mutating roster operation is followed by this query so the caller
//! never renders aggregates computed from stale collections. It refetches
//! both collections from the store and recomputes the metrics in one place.

use std::sync::Arc;

use crate::domain::foundation::{AccountId, Timestamp};
use crate::domain::roster::{DashboardMetrics, Member, PaymentWithMember, RosterError};
use crate::ports::{MemberRepository, PaymentRepository};

/// Query for a full roster snapshot.
#[derive(Debug, Clone)]
pub struct RefreshDashboardQuery {
    pub owner_id: AccountId,
}

/// Freshly fetched collections plus the metrics derived from them.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub members: Vec<Member>,
    pub payments: Vec<PaymentWithMember>,
    pub metrics: DashboardMetrics,
}

/// Handler for the refresh contract.
pub struct RefreshDashboardHandler {
    members: Arc<dyn MemberRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl RefreshDashboardHandler {
    pub fn new(members: Arc<dyn MemberRepository>, payments: Arc<dyn PaymentRepository>) -> Self {
        Self { members, payments }
    }

    pub async fn handle(&self, query: RefreshDashboardQuery) -> Result<RosterSnapshot, RosterError> {
        let members = self.members.list(&query.owner_id).await?;
        let payments = self.payments.list_with_member(&query.owner_id).await?;

        let payment_records: Vec<_> = payments.iter().map(|p| p.payment.clone()).collect();
        let metrics = DashboardMetrics::summarize(&members, &payment_records, Timestamp::now());

        Ok(RosterSnapshot {
            members,
            payments,
            metrics,
        })
    }
}
